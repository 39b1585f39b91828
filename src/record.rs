//! Timer data model
//!
//! These are the types exchanged with the view: the stored [`TimerRecord`]
//! and the raw [`CreateTimerRequest`] it is validated from. Field names
//! serialize as camelCase and actions as lowercase strings, which is the
//! shape the frontend expects.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Opaque timer identifier, assigned at creation and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimerId(String);

impl TimerId {
    /// Mint a fresh id (UUIDv4).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TimerId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for TimerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// What a timer does when it fires.
///
/// Only `Popup` carries a message; the other actions are message-less
/// system commands performed by the notifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerAction {
    Popup,
    Lock,
    Shutdown,
    Reboot,
}

impl TimerAction {
    pub fn requires_message(self) -> bool {
        matches!(self, Self::Popup)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Popup => "popup",
            Self::Lock => "lock",
            Self::Shutdown => "shutdown",
            Self::Reboot => "reboot",
        }
    }
}

impl fmt::Display for TimerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimerAction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "popup" => Ok(Self::Popup),
            "lock" => Ok(Self::Lock),
            "shutdown" => Ok(Self::Shutdown),
            "reboot" => Ok(Self::Reboot),
            other => Err(ValidationError::UnknownAction {
                value: other.to_string(),
            }),
        }
    }
}

/// A pending timer as stored and as returned to the view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerRecord {
    pub id: TimerId,

    pub action: TimerAction,

    /// Absolute instant the timer fires at. Never mutated after creation;
    /// may be in the past, which makes the timer immediately due.
    pub target_time: DateTime<Utc>,

    /// Present (non-empty, trimmed) iff `action` is `Popup`.
    pub message: Option<String>,

    pub created_at: DateTime<Utc>,
}

/// Raw creation request as sent by the view, before validation.
///
/// `action` and `target_time` arrive as strings; `TimerService::create`
/// parses and validates them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTimerRequest {
    pub action: String,
    pub target_time: String,
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_parses_known_variants() {
        assert_eq!("popup".parse::<TimerAction>().unwrap(), TimerAction::Popup);
        assert_eq!("lock".parse::<TimerAction>().unwrap(), TimerAction::Lock);
        assert_eq!(
            "shutdown".parse::<TimerAction>().unwrap(),
            TimerAction::Shutdown
        );
        assert_eq!(
            "reboot".parse::<TimerAction>().unwrap(),
            TimerAction::Reboot
        );
    }

    #[test]
    fn action_rejects_unknown_variant() {
        let err = "explode".parse::<TimerAction>().unwrap_err();
        assert!(matches!(
            err,
            ValidationError::UnknownAction { value } if value == "explode"
        ));
    }

    #[test]
    fn only_popup_requires_message() {
        assert!(TimerAction::Popup.requires_message());
        assert!(!TimerAction::Lock.requires_message());
        assert!(!TimerAction::Shutdown.requires_message());
        assert!(!TimerAction::Reboot.requires_message());
    }

    #[test]
    fn record_serializes_camel_case_with_iso_instant() {
        let record = TimerRecord {
            id: TimerId::from("t-1"),
            action: TimerAction::Popup,
            target_time: "2030-01-01T00:00:00Z".parse().unwrap(),
            message: Some("hi".to_string()),
            created_at: "2029-12-31T23:59:00Z".parse().unwrap(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], "t-1");
        assert_eq!(json["action"], "popup");
        assert_eq!(json["targetTime"], "2030-01-01T00:00:00Z");
        assert_eq!(json["message"], "hi");
        assert_eq!(json["createdAt"], "2029-12-31T23:59:00Z");
    }

    #[test]
    fn request_deserializes_camel_case() {
        let request: CreateTimerRequest = serde_json::from_str(
            r#"{"action":"popup","targetTime":"2030-01-01T00:00:00Z","message":"hi"}"#,
        )
        .unwrap();

        assert_eq!(request.action, "popup");
        assert_eq!(request.target_time, "2030-01-01T00:00:00Z");
        assert_eq!(request.message.as_deref(), Some("hi"));
    }
}
