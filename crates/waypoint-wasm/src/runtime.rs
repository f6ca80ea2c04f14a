//! [`JsRuntime`] over the page's global scope.

use js_sys::{Array, Function, Reflect, JSON};
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};

use waypoint_interop::{split_identifier, InteropError, JsRuntime, Result};

/// Calls functions reachable from `globalThis` by dotted path.
///
/// `invoke` is a plain synchronous JavaScript call on the one thread the
/// page runs on; it returns only after the host function has returned.
#[derive(Debug, Default, Clone, Copy)]
pub struct GlobalJsRuntime;

pub(crate) fn describe(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{value:?}")
}

pub(crate) fn to_js(value: &Value) -> std::result::Result<JsValue, String> {
    let text = serde_json::to_string(value).map_err(|e| e.to_string())?;
    JSON::parse(&text).map_err(|e| describe(&e))
}

fn from_js(identifier: &str, value: &JsValue) -> Result<Value> {
    if value.is_undefined() || value.is_null() {
        return Ok(Value::Null);
    }

    let text: String = JSON::stringify(value)
        .map_err(|e| InteropError::host_failure(identifier, describe(&e)))?
        .into();
    serde_json::from_str(&text).map_err(|source| InteropError::Decode {
        identifier: identifier.to_string(),
        source,
    })
}

impl JsRuntime for GlobalJsRuntime {
    fn invoke(&self, identifier: &str, args: &[Value]) -> Result<Value> {
        let segments = split_identifier(identifier)?;
        let Some((function_name, path)) = segments.split_last() else {
            return Err(InteropError::InvalidIdentifier(identifier.to_string()));
        };

        let mut target: JsValue = js_sys::global().into();
        for segment in path {
            target = Reflect::get(&target, &JsValue::from_str(segment))
                .map_err(|e| InteropError::host_failure(identifier, describe(&e)))?;
            if target.is_undefined() || target.is_null() {
                return Err(InteropError::UnknownIdentifier(identifier.to_string()));
            }
        }

        let function: Function = Reflect::get(&target, &JsValue::from_str(function_name))
            .map_err(|e| InteropError::host_failure(identifier, describe(&e)))?
            .dyn_into()
            .map_err(|_| InteropError::UnknownIdentifier(identifier.to_string()))?;

        let js_args = Array::new();
        for arg in args {
            let value = to_js(arg).map_err(|message| InteropError::host_failure(identifier, message))?;
            js_args.push(&value);
        }

        let result = function
            .apply(&target, &js_args)
            .map_err(|e| InteropError::host_failure(identifier, describe(&e)))?;

        from_js(identifier, &result)
    }
}
