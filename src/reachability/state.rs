//! Reachability state.
//!
//! # State Transitions
//! ```text
//! Online → Offline: source reports offline (push event or poll)
//! Offline → Online: source reports online
//! Same state reported again: no transition, no notification
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Last known network availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReachabilityState {
    /// Whether the host was last seen online.
    pub online: bool,
    /// When `online` last changed.
    pub changed_at: DateTime<Utc>,
}

impl ReachabilityState {
    /// A state stamped with the current time.
    pub fn now(online: bool) -> Self {
        Self {
            online,
            changed_at: Utc::now(),
        }
    }

    pub fn label(&self) -> &'static str {
        if self.online {
            "online"
        } else {
            "offline"
        }
    }
}

impl Default for ReachabilityState {
    /// Optimistic: no signal is not proof of no connectivity.
    fn default() -> Self {
        Self::now(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_online() {
        let state = ReachabilityState::default();
        assert!(state.online);
        assert_eq!(state.label(), "online");
    }

    #[test]
    fn test_serializes_camel_case() {
        let state = ReachabilityState::now(false);
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["online"], false);
        assert!(json.get("changedAt").is_some());
    }
}
