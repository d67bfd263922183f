use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::plan::Plan;

/// Unique identifier for a user, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Bespoke entitlement overrides for legacy users retained outside the
/// standard plan table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrandfatheredFeatures {
    /// Custom portfolio count bound.
    pub portfolios: u32,
    pub dark_mode: bool,
    pub watermark: bool,
}

/// A registered account in the Folionest platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub display_name: String,
    pub plan: Plan,
    /// Legacy user kept on bespoke overrides instead of the plan table.
    #[serde(default)]
    pub grandfathered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grandfathered_features: Option<GrandfatheredFeatures>,
    /// SHA-256 hex digest of the account's API key. Never the key itself.
    #[serde(default, skip_serializing)]
    pub api_key_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to provision a new user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub display_name: Option<String>,
    pub plan: Option<Plan>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_display_roundtrip() {
        let id = UserId::new();
        let parsed: UserId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_api_key_hash_never_serialized() {
        let user = User {
            id: UserId::new(),
            email: "jane@example.com".to_string(),
            display_name: "Jane".to_string(),
            plan: Plan::Free,
            grandfathered: false,
            grandfathered_features: None,
            api_key_hash: Some("deadbeef".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("deadbeef"));
    }

    #[test]
    fn test_grandfathered_features_serde() {
        let features = GrandfatheredFeatures {
            portfolios: 3,
            dark_mode: true,
            watermark: false,
        };
        let json = serde_json::to_string(&features).unwrap();
        let back: GrandfatheredFeatures = serde_json::from_str(&json).unwrap();
        assert_eq!(back, features);
    }
}
