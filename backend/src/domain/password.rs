//! Stored password digest.

use std::fmt;

/// Opaque one-way digest of a password, as produced by a
/// [`PasswordHasher`](crate::domain::ports::PasswordHasher).
///
/// The value is a self-describing PHC string for the bundled Argon2 adapter,
/// but the domain never inspects it.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Wrap a digest read from storage or returned by a hasher.
    pub fn new(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(<redacted>)")
    }
}
