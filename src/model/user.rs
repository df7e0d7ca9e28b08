use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The current "logged in" user. Not an authenticated identity: any
/// non-empty username is accepted and there are no credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Name entered at the login screen
    pub username: String,
    /// When this session was created
    pub login_time: DateTime<Utc>,
}

impl User {
    pub fn new(username: String, login_time: DateTime<Utc>) -> Self {
        User {
            username,
            login_time,
        }
    }
}
