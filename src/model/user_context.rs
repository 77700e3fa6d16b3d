use serde::{Deserialize, Serialize};

use super::Id;

/// Caller identity extracted from request headers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserContext {
    pub user_id: Id,
    pub user_name: Option<String>,
}

impl UserContext {
    pub fn new(user_id: impl Into<Id>) -> Self {
        Self {
            user_id: user_id.into(),
            user_name: None,
        }
    }

    pub fn with_name(user_id: impl Into<Id>, name: Option<String>) -> Self {
        Self {
            user_id: user_id.into(),
            user_name: name,
        }
    }

    /// Development fallback when no identity headers are sent
    pub fn default_user() -> Self {
        Self {
            user_id: "u-sender-1".to_string(),
            user_name: Some("Development User".to_string()),
        }
    }
}

impl Default for UserContext {
    fn default() -> Self {
        Self::default_user()
    }
}
