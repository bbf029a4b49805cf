//! Portal users and the demo login check

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use core_kernel::{CoreError, UserId};
use crate::error::LostFoundError;

/// Portal role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    /// May approve or reject claims
    Faculty,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Faculty => "faculty",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Role::Student),
            "faculty" => Ok(Role::Faculty),
            other => Err(CoreError::validation(format!("Unknown role: {}", other))),
        }
    }
}

/// A portal user; read-only in this domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Roll number or staff code
    pub identifier: String,
    pub email: String,
    pub role: Role,
}

impl User {
    /// True if `value` is this user's identifier or email
    pub fn answers_to(&self, value: &str) -> bool {
        self.identifier == value || self.email == value
    }
}

/// Login attempt
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    /// Identifier or email
    pub identifier: String,
    pub password: String,
    pub role: Role,
}

/// Fixed per-role demo passwords
///
/// The portal does not own user credentials; the identity provider does. Until
/// it is wired in, each role shares one password.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PasswordPolicy {
    pub student: String,
    pub faculty: String,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            student: "Student@123".to_string(),
            faculty: "Faculty@123".to_string(),
        }
    }
}

impl PasswordPolicy {
    pub fn password_for(&self, role: Role) -> &str {
        match role {
            Role::Student => &self.student,
            Role::Faculty => &self.faculty,
        }
    }

    /// Checks the password of an already-resolved user
    ///
    /// A missing user is `InvalidCredentials`; a known user with the wrong
    /// password is `IncorrectPassword`.
    pub fn check(&self, user: Option<User>, password: &str) -> Result<User, LostFoundError> {
        let user = user.ok_or(LostFoundError::InvalidCredentials)?;
        if password == self.password_for(user.role) {
            Ok(user)
        } else {
            Err(LostFoundError::IncorrectPassword)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn faculty() -> User {
        User {
            id: UserId::new(),
            identifier: "FAC001".to_string(),
            email: "r.sharma@campus.edu".to_string(),
            role: Role::Faculty,
        }
    }

    #[test]
    fn test_answers_to_identifier_or_email() {
        let user = faculty();
        assert!(user.answers_to("FAC001"));
        assert!(user.answers_to("r.sharma@campus.edu"));
        assert!(!user.answers_to("fac001"));
    }

    #[test]
    fn test_password_check() {
        let policy = PasswordPolicy::default();
        assert!(policy.check(Some(faculty()), "Faculty@123").is_ok());
        assert!(matches!(
            policy.check(Some(faculty()), "Student@123"),
            Err(LostFoundError::IncorrectPassword)
        ));
        assert!(matches!(
            policy.check(None, "Faculty@123"),
            Err(LostFoundError::InvalidCredentials)
        ));
    }
}
