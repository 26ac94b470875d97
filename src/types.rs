//! Wire types shared with the WhenWorks API
//!
//! These mirror the JSON bodies of the session endpoints.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authenticated account as returned by the session service.
///
/// The client never mutates one of these; it only replaces the cached
/// value wholesale on re-fetch or successful login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub name: String,
    pub is_admin: bool,
    pub created_at: String,
}

/// Login request body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Success envelope returned by `/v1/me` and `/v1/auth/login`
#[derive(Debug, Deserialize)]
pub struct UserEnvelope {
    pub user: User,
}
