//! Caller identities

use serde::Deserialize;
use std::fmt;

/// Who sent a suggestion or issued a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Numeric chat-platform user id
    pub user_id: u64,
    /// Public handle without the leading `@`, if the user has one
    pub username: Option<String>,
    /// First/display name
    pub first_name: String,
}

impl Identity {
    pub fn new(user_id: u64, username: Option<String>, first_name: impl Into<String>) -> Self {
        Self {
            user_id,
            username,
            first_name: first_name.into(),
        }
    }

    /// Name shown to the administrator: `@username`, else the first name
    pub fn display_name(&self) -> String {
        match self.username.as_deref() {
            Some(username) if !username.is_empty() => format!("@{}", username),
            _ => self.first_name.clone(),
        }
    }
}

/// The single user allowed to delete songs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct AdminId(pub u64);

impl AdminId {
    pub fn is(&self, identity: &Identity) -> bool {
        self.0 == identity.user_id
    }
}

impl fmt::Display for AdminId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_prefers_username() {
        let user = Identity::new(7, Some("ringo".to_string()), "Richard");
        assert_eq!(user.display_name(), "@ringo");
    }

    #[test]
    fn test_display_name_falls_back_to_first_name() {
        let user = Identity::new(7, None, "Richard");
        assert_eq!(user.display_name(), "Richard");

        let blank = Identity::new(7, Some(String::new()), "Richard");
        assert_eq!(blank.display_name(), "Richard");
    }

    #[test]
    fn test_admin_matches_by_user_id() {
        let admin = AdminId(42);
        assert!(admin.is(&Identity::new(42, None, "Admin")));
        assert!(!admin.is(&Identity::new(43, Some("admin".to_string()), "Admin")));
    }
}
