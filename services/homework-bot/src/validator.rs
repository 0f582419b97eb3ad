//! Response shape checks

use serde_json::Value;

use crate::api_client::ApiResponse;
use crate::error::PollError;

const HOMEWORKS_KEY: &str = "homeworks";

/// One element of the `homeworks` array, kept as raw JSON.
/// Per-record keys are checked when the record is translated.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeworkRecord(Value);

impl HomeworkRecord {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

/// Pull the list of homework records out of a response.
///
/// A missing `homeworks` key and a `homeworks` value that is not an array
/// both yield [`PollError::MissingResponseKeys`].
pub fn extract_homeworks(response: &ApiResponse) -> Result<Vec<HomeworkRecord>, PollError> {
    let homeworks = response
        .get(HOMEWORKS_KEY)
        .ok_or_else(|| PollError::MissingResponseKeys(format!("'{}'", HOMEWORKS_KEY)))?;

    match homeworks {
        Value::Array(items) => Ok(items.iter().cloned().map(HomeworkRecord).collect()),
        _ => Err(PollError::MissingResponseKeys(format!(
            "'{}' is not a list",
            HOMEWORKS_KEY
        ))),
    }
}
