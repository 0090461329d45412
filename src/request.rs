//! Request passed as the first argument to every handler.
//!
//! The enforcer only reads [`Request::params`] (for logging). The remaining
//! fields exist for handler implementations and are never interpreted here.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Incoming request for a handler operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// Unique identifier for this request, used to correlate log lines
    pub request_id: String,
    /// Resource type the request addresses (e.g. "articles")
    pub resource_type: String,
    /// Route and query parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    /// Payload for create and update requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl Request {
    /// Create a request for a resource type with a generated request ID.
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            resource_type: resource_type.into(),
            params: None,
            body: None,
        }
    }

    /// Replace the generated request ID.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = request_id.into();
        self
    }

    /// Attach route and query parameters.
    pub fn with_params(mut self, params: Value) -> Self {
        self.params = Some(params);
        self
    }

    /// Attach a payload.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// The parameters sub-value, if any.
    pub fn params(&self) -> Option<&Value> {
        self.params.as_ref()
    }

    /// Look up a single parameter by name.
    pub fn param(&self, name: &str) -> Option<&Value> {
        self.params.as_ref().and_then(|p| p.get(name))
    }

    /// The `id` parameter as a string, accepting numeric IDs as well.
    pub fn id(&self) -> Option<String> {
        match self.param("id")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}
