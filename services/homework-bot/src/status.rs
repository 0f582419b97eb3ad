//! Homework status codes and their verdict messages

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::PollError;
use crate::validator::HomeworkRecord;

/// Review status reported by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    /// Human-readable verdict for this status
    pub fn verdict(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Work reviewed: everything looks good. Hooray!",
            HomeworkStatus::Reviewing => "Work has been taken up for review.",
            HomeworkStatus::Rejected => "Work reviewed: reviewer has comments.",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HomeworkStatus {
    type Err = PollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(HomeworkStatus::Approved),
            "reviewing" => Ok(HomeworkStatus::Reviewing),
            "rejected" => Ok(HomeworkStatus::Rejected),
            other => Err(PollError::UnknownHomeworkStatus(format!("'{}'", other))),
        }
    }
}

/// Turn a homework record into the notification sentence
pub fn translate(record: &HomeworkRecord) -> Result<String, PollError> {
    let name = record
        .get("homework_name")
        .and_then(Value::as_str)
        .ok_or_else(|| PollError::MissingRecordKeys("'homework_name'".to_string()))?;
    let status = match record.get("status") {
        Some(Value::String(code)) => code.parse::<HomeworkStatus>()?,
        Some(other) => return Err(PollError::UnknownHomeworkStatus(other.to_string())),
        None => return Err(PollError::MissingRecordKeys("'status'".to_string())),
    };

    Ok(format!(
        "Status for \"{}\" changed. {}",
        name,
        status.verdict()
    ))
}
