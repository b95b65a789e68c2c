//! People who took part in a logged interaction

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::{Validatable, ValidationResult};

/// A participant of a history item, such as an email recipient
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    #[serde(default)]
    pub name: Option<String>,
    #[validate(email)]
    #[serde(default)]
    pub email_address: Option<String>,
    /// FROM, TO, CC or BCC
    #[serde(default)]
    pub role: Option<String>,
}

impl Participant {
    pub fn new(name: impl Into<String>, email_address: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email_address: Some(email_address.into()),
            role: None,
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}

impl Validatable for Participant {
    fn validation(&self) -> ValidationResult {
        let mut result = ValidationResult::ok();
        result.absorb(self.validate());
        result
    }
}
