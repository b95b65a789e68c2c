//! Account users
//!
//! Users own tasks and opportunities and create history items. Capsule
//! refers to them by username in record payloads.

use serde::{Deserialize, Serialize};

use core_kernel::payload::lenient_option;
use core_kernel::{PartyId, UserId};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, deserialize_with = "lenient_option")]
    pub id: Option<UserId>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// The person record representing this user
    #[serde(default, deserialize_with = "lenient_option")]
    pub party_id: Option<PartyId>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default, deserialize_with = "lenient_option")]
    pub logged_in: Option<bool>,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            ..Default::default()
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in.unwrap_or(false)
    }
}

/// Finds a user by exact username
pub fn find_by_username<'a>(users: &'a [User], username: &str) -> Option<&'a User> {
    users.iter().find(|user| user.username.as_deref() == Some(username))
}
