use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An account that owns favorite entries. The password hash is opaque
/// here; credential handling lives outside this workspace.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub date_of_birth: NaiveDate,
}

impl User {
    /// Emails are unique case-insensitively.
    pub fn email_matches(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email)
    }
}
