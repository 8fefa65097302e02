/// User domain type
use crate::types::UserId;
use serde::{Deserialize, Serialize};

/// User account as returned by the API.
///
/// Deserializes from a raw response payload by field name; `updated_at`
/// is absent until the account has been modified at least once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier, immutable once assigned
    pub id: UserId,

    /// Email address
    pub email: String,

    /// Display name
    pub name: String,

    /// Account creation date (`YYYY-MM-DD` string)
    pub created_at: String,

    /// Last modification date, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}
