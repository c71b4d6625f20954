//! Error types for signer construction and token signing.

use std::fmt;

use thiserror::Error;

/// Result type for signing operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Which reserved-claim set a colliding custom claim ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimScope {
    /// The user-level reserved set (`aud`, `dn`, `g`, `iss`, `sub`).
    User,
    /// The group-level reserved set (`dn`, `id`).
    Group,
}

impl fmt::Display for ClaimScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClaimScope::User => write!(f, "User"),
            ClaimScope::Group => write!(f, "Group"),
        }
    }
}

/// Errors surfaced while constructing a [`Signer`](crate::Signer) or signing
/// a token.
///
/// Every variant except [`AuthError::SigningFailed`] is a deterministic
/// function of the caller's input and is raised before any cryptographic
/// work happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The secret key could not be decoded, or decodes to fewer than 32
    /// bytes. Fatal to signer construction.
    #[error("invalid secret key: {0}")]
    InvalidKey(String),

    /// A user or group field failed structural validation (empty `id`,
    /// empty `domain`, or an empty-but-present display name).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A custom claim key collides with a reserved claim key.
    #[error("the '{key}' claim cannot be custom for a {scope}")]
    ReservedClaim {
        /// The offending claim key.
        key: String,
        /// Whether the user- or group-level reserved set was hit.
        scope: ClaimScope,
    },

    /// An extra header value has the wrong JSON type for its key.
    #[error("header '{key}' expects {expected}")]
    HeaderType {
        /// The header key whose value was rejected.
        key: String,
        /// Human-readable description of the expected type.
        expected: &'static str,
    },

    /// The underlying MAC primitive failed. No token is produced.
    #[error("signing failed")]
    SigningFailed,
}
