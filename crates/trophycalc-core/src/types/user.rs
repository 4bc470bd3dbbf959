//! Authenticated user profile.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// The signed-in user, as returned by the `/user` endpoint.
///
/// Always replaced wholesale; the session never edits individual fields.
/// Timestamps are kept exactly as the backend sent them; use
/// [`parse_timestamp`] to read one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    /// Display name.
    pub name: String,
    pub email: String,
    /// Avatar image URL.
    pub avatar: String,
    /// Public profile URL on the game platform.
    pub profile_url: String,
    /// 64-bit platform account identifier, kept as a string.
    pub steam_id_64: String,
    /// Last time the platform profile was synchronized.
    pub profile_updated_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl User {
    /// Sign-up time, if the backend sent a readable timestamp.
    pub fn created(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }
}

/// Read a backend timestamp: RFC 3339, or `YYYY-MM-DD HH:MM:SS` taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|at| at.and_utc())
}
