//! User as seen through the external user directory.

use serde::{Deserialize, Serialize};

/// Directory account resolved from an email address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryUser {
    /// Directory-assigned identifier
    pub id: String,

    /// Account email address
    pub email: String,

    /// Display name, when the directory has one
    pub name: Option<String>,

    /// Whether the email address has been confirmed
    pub email_verified: bool,
}

impl DirectoryUser {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            name: None,
            email_verified: false,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
