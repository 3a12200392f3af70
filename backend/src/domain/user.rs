//! User account model.
//!
//! [`User`] is the public, password-free view of an account. [`UserAccount`]
//! pairs it with the stored password digest and never leaves the domain and
//! persistence layers.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::PasswordDigest;

/// Maximum username length accepted by the credential store.
pub const USERNAME_MAX: usize = 50;

/// Validation errors returned by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyUsername,
    UsernameTooLong { max: usize },
    UnknownRole { value: String },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::UnknownRole { value } => {
                write!(f, "role must be either 'user' or 'admin', got '{value}'")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Store-assigned integer identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    /// Wrap a raw store identifier.
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique login name.
///
/// ## Invariants
/// - Trimmed of surrounding whitespace and non-empty.
/// - At most [`USERNAME_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Validate and normalise a username.
    pub fn new(username: &str) -> Result<Self, UserValidationError> {
        let trimmed = username.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if trimmed.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Account role. Only admins may register new accounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    /// Stored and serialised representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = UserValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            other => Err(UserValidationError::UnknownRole {
                value: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Public view of an account: `{id, username, role}`.
///
/// The password digest is deliberately absent so this type can be serialised
/// straight onto the wire.
///
/// # Examples
/// ```
/// use bookshelf::domain::{Role, User, UserId, Username};
///
/// let user = User::new(UserId::new(7), Username::new("bob").unwrap(), Role::User);
/// let json = serde_json::to_value(&user).unwrap();
/// assert_eq!(json, serde_json::json!({"id": 7, "username": "bob", "role": "user"}));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    id: UserId,
    username: Username,
    role: Role,
}

impl User {
    /// Build a user from validated parts.
    pub fn new(id: UserId, username: Username, role: Role) -> Self {
        Self { id, username, role }
    }

    /// Store identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Login name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Account role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Whether the account holds the admin role.
    pub fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}

/// Stored account: public view plus password digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    user: User,
    password_digest: PasswordDigest,
}

impl UserAccount {
    /// Pair a user with its stored digest.
    pub fn new(user: User, password_digest: PasswordDigest) -> Self {
        Self {
            user,
            password_digest,
        }
    }

    /// Public view of the account.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Stored password digest.
    pub fn password_digest(&self) -> &PasswordDigest {
        &self.password_digest
    }

    /// Consume the account, keeping only the public view.
    pub fn into_user(self) -> User {
        self.user
    }
}

/// Account awaiting insertion; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserAccount {
    pub username: Username,
    pub password_digest: PasswordDigest,
    pub role: Role,
}
