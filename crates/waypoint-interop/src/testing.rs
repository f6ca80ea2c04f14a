//! Scripted in-process runtime
//!
//! Stands in for the JavaScript host in tests. Responses are scripted per
//! identifier and every invocation is recorded in order.

use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;

use crate::error::InteropError;
use crate::runtime::JsRuntime;
use crate::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub identifier: String,
    pub args: Vec<Value>,
}

#[derive(Debug, Clone)]
enum Scripted {
    Value(Value),
    Failure(String),
}

/// Runtime whose answers are set up ahead of time.
///
/// Identifiers with no scripted answer return `null`.
#[derive(Debug, Default)]
pub struct ScriptedRuntime {
    responses: Mutex<HashMap<String, Scripted>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, identifier: &str, value: Value) -> Self {
        self.set_response(identifier, value);
        self
    }

    pub fn fail(self, identifier: &str, message: &str) -> Self {
        self.set_failure(identifier, message);
        self
    }

    pub fn set_response(&self, identifier: &str, value: Value) {
        self.responses
            .lock()
            .insert(identifier.to_string(), Scripted::Value(value));
    }

    pub fn set_failure(&self, identifier: &str, message: &str) {
        self.responses
            .lock()
            .insert(identifier.to_string(), Scripted::Failure(message.to_string()));
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn calls_to(&self, identifier: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.identifier == identifier)
            .count()
    }
}

impl JsRuntime for ScriptedRuntime {
    fn invoke(&self, identifier: &str, args: &[Value]) -> Result<Value> {
        self.calls.lock().push(RecordedCall {
            identifier: identifier.to_string(),
            args: args.to_vec(),
        });

        match self.responses.lock().get(identifier).cloned() {
            Some(Scripted::Value(value)) => Ok(value),
            Some(Scripted::Failure(message)) => {
                Err(InteropError::host_failure(identifier, message))
            }
            None => Ok(Value::Null),
        }
    }
}
