//! User domain entity and related types.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{USERNAME_PATTERN, USERNAME_PATTERN_MESSAGE};
use crate::errors::{AppError, AppResult};

/// Compiled `USERNAME_PATTERN`
pub static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(USERNAME_PATTERN).expect("valid username pattern"));

/// Account type, stored and exchanged as its numeric code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub enum UserType {
    Admin = 1,
    #[default]
    Candidate = 2,
    Hr = 3,
}

impl UserType {
    pub fn code(self) -> i16 {
        self as i16
    }

    pub fn label(self) -> &'static str {
        match self {
            UserType::Admin => "admin",
            UserType::Candidate => "candidate",
            UserType::Hr => "hr",
        }
    }
}

impl TryFrom<i16> for UserType {
    type Error = String;

    fn try_from(code: i16) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(UserType::Admin),
            2 => Ok(UserType::Candidate),
            3 => Ok(UserType::Hr),
            other => Err(format!("\"{}\" is not a valid choice.", other)),
        }
    }
}

impl From<UserType> for i16 {
    fn from(user_type: UserType) -> Self {
        user_type.code()
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub user_type: UserType,
    pub team_name: Option<String>,
    pub skill: Option<String>,
    pub location: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_admin: bool,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Every permission is granted to every user.
    pub fn has_perm(&self, _perm: &str) -> bool {
        true
    }

    /// Every app is visible to every user.
    pub fn has_module_perms(&self, _app_label: &str) -> bool {
        true
    }

    /// Grant admin and staff status.
    pub fn promote_to_superuser(&mut self) {
        self.is_admin = true;
        self.is_staff = true;
        self.updated_at = Utc::now();
    }

    /// Record a successful login.
    pub fn touch_last_login(&mut self) {
        let now = Utc::now();
        self.last_login = Some(now);
        self.updated_at = now;
    }
}

/// Username, or the email when no username was given.
impl std::fmt::Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.username.is_empty() {
            f.write_str(&self.email)
        } else {
            f.write_str(&self.username)
        }
    }
}

/// Validated field set for inserting a user. The password is already hashed.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub phone: String,
    pub user_type: UserType,
    pub team_name: Option<String>,
    pub skill: Option<String>,
    pub location: String,
    pub password_hash: String,
}

/// Lowercase the domain part of an email address.
///
/// The local part is case-sensitive per RFC 5321 and is kept as given.
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

/// Check a username against the allowed character set.
pub fn validate_username(username: &str) -> AppResult<()> {
    if USERNAME_RE.is_match(username) {
        Ok(())
    } else {
        Err(AppError::validation(USERNAME_PATTERN_MESSAGE))
    }
}
