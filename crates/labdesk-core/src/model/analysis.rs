//! Analysis query parameters.

use derive_more::{AsRef, Deref, From, Into};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Error, Result};

/// Opaque parameter bag sent to the analysis endpoint.
///
/// The shape is defined by the caller and forwarded without modification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[derive(AsRef, Deref, From, Into)]
#[serde(transparent)]
pub struct AnalysisQuery(Map<String, Value>);

impl AnalysisQuery {
    /// Creates an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a parameter, replacing any previous value under the same key.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Builds a query from caller-supplied JSON.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidInput`] error if `value` is not a JSON object.
    ///
    /// [`InvalidInput`]: crate::ErrorKind::InvalidInput
    pub fn from_json(value: Value) -> Result<Self> {
        Self::try_from(value).map_err(|other| {
            let found = match other {
                Value::Null => "null",
                Value::Bool(_) => "a boolean",
                Value::Number(_) => "a number",
                Value::String(_) => "a string",
                Value::Array(_) => "an array",
                Value::Object(_) => "an object",
            };
            Error::invalid_input()
                .with_message(format!("analysis parameters must be a JSON object, got {found}"))
        })
    }
}

impl TryFrom<Value> for AnalysisQuery {
    type Error = Value;

    /// Accepts JSON objects and hands any other value back unchanged.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(other),
        }
    }
}
