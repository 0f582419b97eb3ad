//! Client for the homework review status API
//!
//! One call to [`PracticumClient::fetch`] is one request/response cycle.
//! Nothing is retried here; the poll loop re-attempts on its own cadence.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::PollError;
use crate::io::HttpClient;

/// Default homework status endpoint
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// A decoded API response body. Always a JSON object.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse(Map<String, Value>);

impl ApiResponse {
    pub fn new(body: Map<String, Value>) -> Self {
        Self(body)
    }

    /// Look up a top-level key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Server-reported time of the response, if present and integral
    pub fn current_date(&self) -> Option<i64> {
        self.0.get("current_date").and_then(Value::as_i64)
    }
}

impl TryFrom<Value> for ApiResponse {
    type Error = PollError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(PollError::MalformedPayload(format!(
                "expected a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Homework status API client
pub struct PracticumClient {
    endpoint: String,
    authorization: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl PracticumClient {
    pub fn new(endpoint: &str, token: &str, http: Arc<dyn HttpClient>) -> Self {
        tracing::debug!("Created PracticumClient for {}", endpoint);
        Self {
            endpoint: endpoint.to_string(),
            authorization: format!("OAuth {}", token),
            http,
        }
    }

    /// Request homework statuses changed since `from_date` (unix seconds)
    pub async fn fetch(&self, from_date: i64) -> Result<ApiResponse, PollError> {
        let from_date = from_date.to_string();
        tracing::debug!("Requesting homework statuses from_date={}", from_date);

        let response = self
            .http
            .get(
                &self.endpoint,
                &[("Authorization", self.authorization.as_str())],
                &[("from_date", from_date.as_str())],
            )
            .await?;

        if response.status != 200 {
            return Err(PollError::InvalidHttpStatus {
                status: response.status,
                endpoint: self.endpoint.clone(),
            });
        }

        let value: Value = serde_json::from_str(&response.body)
            .map_err(|e| PollError::MalformedPayload(e.to_string()))?;
        ApiResponse::try_from(value)
    }
}
