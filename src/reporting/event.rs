//! Recorded event types.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

/// Severity of a recorded event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorLevel {
    /// Unexpected fault.
    Error,
    /// Expected, recoverable condition (e.g. a retried attempt).
    Warning,
    /// Non-failure diagnostic.
    Info,
}

impl ErrorLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorLevel::Error => "error",
            ErrorLevel::Warning => "warning",
            ErrorLevel::Info => "info",
        }
    }
}

impl std::fmt::Display for ErrorLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-supplied metadata. Contents are never validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub additional_data: BTreeMap<String, Value>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.additional_data.insert(key.into(), value.into());
        self
    }
}

/// Identifies the executing environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeFingerprint {
    pub client: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl RuntimeFingerprint {
    pub fn new(client: impl Into<String>, location: Option<String>) -> Self {
        Self {
            client: client.into(),
            location,
        }
    }
}

/// One recorded occurrence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEvent {
    pub id: String,
    /// RFC 3339 / ISO-8601, UTC, millisecond precision.
    pub timestamp: String,
    pub level: ErrorLevel,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ErrorContext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_fingerprint: Option<RuntimeFingerprint>,
    /// Last known reachability when the event was recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_online: Option<bool>,
}

impl ErrorEvent {
    /// Build an event stamped with a fresh id and the current time.
    ///
    /// Stack traces are only kept on `Error` events.
    pub fn new(
        level: ErrorLevel,
        message: String,
        stack_trace: Option<String>,
        context: Option<ErrorContext>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: event_id(now),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            level,
            message,
            stack_trace: stack_trace.filter(|_| level == ErrorLevel::Error),
            context,
            runtime_fingerprint: None,
            network_online: None,
        }
    }
}

/// Time-based prefix plus random suffix. Unique in practice, not guaranteed.
fn event_id(now: DateTime<Utc>) -> String {
    let millis = now.timestamp_millis().max(0) as u64;
    let suffix: String = std::iter::repeat_with(fastrand::alphanumeric)
        .take(9)
        .collect::<String>()
        .to_ascii_lowercase();
    format!("{millis:x}-{suffix}")
}
