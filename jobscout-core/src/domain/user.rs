//! User domain types

use serde::{Deserialize, Serialize};

/// Role granted to an account by the server
///
/// Roles the client does not know about deserialize to `Other` and are
/// treated like any non-admin account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    JobSeeker,
    #[serde(other)]
    Other,
}

impl Role {
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::JobSeeker => write!(f, "job_seeker"),
            Role::Other => write!(f, "other"),
        }
    }
}

/// Profile of an authenticated account
///
/// Profile fields beyond the identity are optional because the server only
/// returns the ones the account filled in at registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl User {
    /// Full name if the profile has one, otherwise the username
    pub fn display_name(&self) -> String {
        let first = self.first_name.as_deref().unwrap_or("").trim();
        let last = self.last_name.as_deref().unwrap_or("").trim();
        match (first.is_empty(), last.is_empty()) {
            (true, true) => self.username.clone(),
            (false, true) => first.to_string(),
            (true, false) => last.to_string(),
            (false, false) => format!("{} {}", first, last),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_deserializes_snake_case() {
        let role: Role = serde_json::from_str("\"job_seeker\"").unwrap();
        assert_eq!(role, Role::JobSeeker);
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert!(role.is_admin());
    }

    #[test]
    fn test_unknown_role_is_not_admin() {
        let role: Role = serde_json::from_str("\"moderator\"").unwrap();
        assert_eq!(role, Role::Other);
        assert!(!role.is_admin());
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let mut user: User =
            serde_json::from_str(r#"{"id": 1, "username": "jdoe", "role": "job_seeker"}"#).unwrap();
        assert_eq!(user.display_name(), "jdoe");

        user.first_name = Some("John".to_string());
        user.last_name = Some("Doe".to_string());
        assert_eq!(user.display_name(), "John Doe");
    }
}
