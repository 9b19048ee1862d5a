use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use url::Url;

use crate::model::ids::UserId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UserError {
    #[error("user id cannot be empty")]
    EmptyId,

    #[error("user name cannot be empty")]
    EmptyName,

    #[error("email must contain '@'")]
    InvalidEmail,

    #[error("avatar must be an absolute URI")]
    InvalidAvatar,

    #[error("unknown role: {0}")]
    UnknownRole(String),
}

//
// ─── ROLE ──────────────────────────────────────────────────────────────────────
//

/// Role of an authenticated user. Never changes client-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    Student,
    Mentor,
}

impl UserRole {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Student => "STUDENT",
            UserRole::Mentor => "MENTOR",
        }
    }

    #[must_use]
    pub fn is_mentor(self) -> bool {
        matches!(self, UserRole::Mentor)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = UserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "STUDENT" => Ok(UserRole::Student),
            "MENTOR" => Ok(UserRole::Mentor),
            _ => Err(UserError::UnknownRole(s.to_owned())),
        }
    }
}

//
// ─── USER ──────────────────────────────────────────────────────────────────────
//

/// An authenticated user as returned by the backend.
///
/// Deserialization goes through the same validation as [`User::new`], so a
/// record without an id or name never reaches the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "UserRecord")]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    role: UserRole,
    avatar: String,
}

impl User {
    /// Creates a validated user.
    ///
    /// # Errors
    ///
    /// Returns `UserError` if id or name are blank, the email has no `@`, or a
    /// non-empty avatar is not an absolute URI.
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        role: UserRole,
        avatar: impl Into<String>,
    ) -> Result<Self, UserError> {
        let name = name.into().trim().to_owned();
        let email = email.into().trim().to_owned();
        let avatar = avatar.into().trim().to_owned();

        if id.as_str().trim().is_empty() {
            return Err(UserError::EmptyId);
        }
        if name.is_empty() {
            return Err(UserError::EmptyName);
        }
        if !email.contains('@') {
            return Err(UserError::InvalidEmail);
        }
        if !avatar.is_empty() && Url::parse(&avatar).is_err() {
            return Err(UserError::InvalidAvatar);
        }

        Ok(Self {
            id,
            name,
            email,
            role,
            avatar,
        })
    }

    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn role(&self) -> UserRole {
        self.role
    }

    #[must_use]
    pub fn avatar(&self) -> &str {
        &self.avatar
    }

    #[must_use]
    pub fn is_mentor(&self) -> bool {
        self.role.is_mentor()
    }
}

/// Wire shape of a user prior to validation.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserRecord {
    id: UserId,
    name: String,
    email: String,
    role: UserRole,
    #[serde(default)]
    avatar: String,
}

impl TryFrom<UserRecord> for User {
    type Error = UserError;

    fn try_from(record: UserRecord) -> Result<Self, Self::Error> {
        User::new(
            record.id,
            record.name,
            record.email,
            record.role,
            record.avatar,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alex() -> User {
        User::new(
            UserId::new("u1"),
            "Alex Johnson",
            "alex@student.edu",
            UserRole::Student,
            "https://i.pravatar.cc/150?u=alex",
        )
        .unwrap()
    }

    #[test]
    fn rejects_blank_name_and_bad_email() {
        let err = User::new(UserId::new("u1"), "  ", "a@b", UserRole::Student, "").unwrap_err();
        assert_eq!(err, UserError::EmptyName);

        let err = User::new(UserId::new("u1"), "A", "nope", UserRole::Student, "").unwrap_err();
        assert_eq!(err, UserError::InvalidEmail);
    }

    #[test]
    fn rejects_relative_avatar() {
        let err = User::new(UserId::new("u1"), "A", "a@b", UserRole::Mentor, "pic.png").unwrap_err();
        assert_eq!(err, UserError::InvalidAvatar);
    }

    #[test]
    fn wire_format_uses_uppercase_roles() {
        let json = serde_json::to_value(alex()).unwrap();
        assert_eq!(json["role"], "STUDENT");
        assert_eq!(json["email"], "alex@student.edu");

        let back: User = serde_json::from_value(json).unwrap();
        assert_eq!(back, alex());
    }

    #[test]
    fn deserialization_validates() {
        let raw = r#"{"id":"","name":"X","email":"x@y","role":"MENTOR"}"#;
        assert!(serde_json::from_str::<User>(raw).is_err());
    }

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("mentor".parse::<UserRole>().unwrap(), UserRole::Mentor);
        assert!("admin".parse::<UserRole>().is_err());
    }
}
