//! Share/move submission types.
//!
//! The dialog keys every submitted value by element name; these constants are
//! shared between the dialog builder and the submission handler.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use std::fmt;
use std::str::FromStr;

use crate::error::ShareError;

pub const TO_CHANNEL_KEY: &str = "to_channel";
pub const FORCE_SHARE_KEY: &str = "force_share";
pub const SHARE_TYPE_KEY: &str = "share_type";
pub const ADDITIONAL_TEXT_KEY: &str = "additional_text";

/// Post prop carrying the user's annotation until the message hook prepends it.
pub const ADDITIONAL_TEXT_PROP: &str = "sharepost.additional_text";

/// Copy the post (share) or relocate it with its thread (move).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareType {
    Share,
    Move,
}

impl ShareType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShareType::Share => "share",
            ShareType::Move => "move",
        }
    }
}

impl fmt::Display for ShareType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShareType {
    type Err = ShareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "share" => Ok(ShareType::Share),
            "move" => Ok(ShareType::Move),
            other => Err(ShareError::InvalidShareType(other.to_string())),
        }
    }
}

/// A decoded dialog submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareSubmission {
    /// Target channel id.
    pub to_channel: String,
    pub share_type: ShareType,
    /// Annotation followed by a blank line, or empty when none was given.
    pub additional_text: String,
    /// Confirmation checkbox; `None` when the dialog did not show it.
    pub force_share: Option<bool>,
}

impl ShareSubmission {
    pub fn from_submission(submission: &Map<String, Value>) -> Result<Self, ShareError> {
        let to_channel = required_str(submission, TO_CHANNEL_KEY)?;
        let share_type = required_str(submission, SHARE_TYPE_KEY)?.parse()?;

        let additional_text = match submission.get(ADDITIONAL_TEXT_KEY).and_then(Value::as_str) {
            Some(text) => format!("{text}\n\n"),
            None => String::new(),
        };

        let force_share = submission.get(FORCE_SHARE_KEY).and_then(|v| match v {
            Value::Bool(b) => Some(*b),
            Value::String(s) => s.parse().ok(),
            _ => None,
        });

        Ok(Self {
            to_channel,
            share_type,
            additional_text,
            force_share,
        })
    }

    pub fn confirmed(&self) -> bool {
        self.force_share == Some(true)
    }
}

fn required_str(submission: &Map<String, Value>, key: &'static str) -> Result<String, ShareError> {
    match submission.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        other => Err(ShareError::MissingField {
            key,
            value: other.map(Value::to_string).unwrap_or_else(|| "<nil>".to_string()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn submission(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_parse_full_submission() {
        let s = ShareSubmission::from_submission(&submission(json!({
            "to_channel": "c2",
            "share_type": "move",
            "additional_text": "look at this",
            "force_share": true,
        })))
        .unwrap();
        assert_eq!(s.to_channel, "c2");
        assert_eq!(s.share_type, ShareType::Move);
        assert_eq!(s.additional_text, "look at this\n\n");
        assert!(s.confirmed());
    }

    #[test]
    fn test_optional_fields_absent() {
        let s = ShareSubmission::from_submission(&submission(json!({
            "to_channel": "c2",
            "share_type": "share",
            "additional_text": null,
        })))
        .unwrap();
        assert_eq!(s.additional_text, "");
        assert_eq!(s.force_share, None);
        assert!(!s.confirmed());
    }

    #[test]
    fn test_missing_to_channel() {
        let err = ShareSubmission::from_submission(&submission(json!({"share_type": "share"})))
            .unwrap_err();
        assert_eq!(err.to_string(), "failed to get to_channel key. Value is: <nil>");
    }

    #[test]
    fn test_invalid_share_type() {
        let err = ShareSubmission::from_submission(&submission(json!({
            "to_channel": "c2",
            "share_type": "copy",
        })))
        .unwrap_err();
        assert!(matches!(err, ShareError::InvalidShareType(ref t) if t == "copy"));
    }

    #[test]
    fn test_force_share_string_value() {
        let s = ShareSubmission::from_submission(&submission(json!({
            "to_channel": "c2",
            "share_type": "share",
            "force_share": "false",
        })))
        .unwrap();
        assert_eq!(s.force_share, Some(false));
    }
}
