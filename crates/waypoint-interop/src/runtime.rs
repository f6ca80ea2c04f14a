//! Host runtime abstraction

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::InteropError;
use crate::Result;

/// A host environment that can run named operations.
///
/// `invoke` is a blocking round-trip: implementations must not return until
/// the host has finished the operation. Implementations are expected to be
/// driven from a single thread, the same way the browser drives its own
/// event loop.
pub trait JsRuntime {
    fn invoke(&self, identifier: &str, args: &[Value]) -> Result<Value>;
}

impl<R: JsRuntime + ?Sized> JsRuntime for &R {
    fn invoke(&self, identifier: &str, args: &[Value]) -> Result<Value> {
        (**self).invoke(identifier, args)
    }
}

impl<R: JsRuntime + ?Sized> JsRuntime for std::sync::Arc<R> {
    fn invoke(&self, identifier: &str, args: &[Value]) -> Result<Value> {
        (**self).invoke(identifier, args)
    }
}

/// Typed helpers over [`JsRuntime::invoke`].
pub trait JsRuntimeExt: JsRuntime {
    /// Invoke and decode the result into `T`.
    fn invoke_as<T: DeserializeOwned>(&self, identifier: &str, args: &[Value]) -> Result<T> {
        let value = self.invoke(identifier, args)?;
        serde_json::from_value(value).map_err(|source| InteropError::Decode {
            identifier: identifier.to_string(),
            source,
        })
    }

    /// Invoke and drop whatever the host returned.
    fn invoke_void(&self, identifier: &str, args: &[Value]) -> Result<()> {
        self.invoke(identifier, args)?;
        Ok(())
    }
}

impl<R: JsRuntime + ?Sized> JsRuntimeExt for R {}

/// Split a dotted host identifier into its path segments.
///
/// `"a.b.getThing"` yields `["a", "b", "getThing"]`; the last segment is the
/// function to call, the rest is the object path from the global scope.
pub fn split_identifier(identifier: &str) -> Result<Vec<&str>> {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return Err(InteropError::InvalidIdentifier(identifier.to_string()));
    }

    let segments: Vec<&str> = identifier.split('.').collect();
    if segments.iter().any(|s| s.is_empty() || s.contains(char::is_whitespace)) {
        return Err(InteropError::InvalidIdentifier(identifier.to_string()));
    }

    Ok(segments)
}
