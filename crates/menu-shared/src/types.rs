//! Common types

use serde::{Deserialize, Serialize};

/// What the reorder engine does when the caller's `old_position` no longer
/// matches the stored position of the record being moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StalePositionPolicy {
    /// Shift siblings relative to the stored position.
    Reread,
    /// Fail the move with a conflict.
    Reject,
    /// Shift siblings relative to the caller's value.
    Trust,
}

impl StalePositionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            StalePositionPolicy::Reread => "reread",
            StalePositionPolicy::Reject => "reject",
            StalePositionPolicy::Trust => "trust",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "reread" => Some(StalePositionPolicy::Reread),
            "reject" => Some(StalePositionPolicy::Reject),
            "trust" => Some(StalePositionPolicy::Trust),
            _ => None,
        }
    }
}

impl Default for StalePositionPolicy {
    fn default() -> Self {
        StalePositionPolicy::Reread
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_names_round_trip() {
        for policy in [
            StalePositionPolicy::Reread,
            StalePositionPolicy::Reject,
            StalePositionPolicy::Trust,
        ] {
            assert_eq!(StalePositionPolicy::from_str(policy.as_str()), Some(policy));
        }
        assert_eq!(StalePositionPolicy::from_str("whatever"), None);
    }

    #[test]
    fn policy_deserializes_from_snake_case() {
        let policy: StalePositionPolicy = serde_json::from_str("\"reject\"").unwrap();
        assert_eq!(policy, StalePositionPolicy::Reject);
    }
}
