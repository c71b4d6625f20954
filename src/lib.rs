//! Signed identity tokens for GoInstant applications.
//!
//! This crate turns an abstract user-and-groups identity model into a
//! compact, HMAC-SHA256-signed JWT. The pipeline is deterministic end to
//! end: claim keys serialize in lexical order, groups serialize sorted by
//! id, and the token format carries no timestamps or nonces, so signing the
//! same input twice yields byte-identical tokens.
//!
//! ```
//! use goinstant_auth::{PlainGroup, PlainUser, Signer};
//!
//! # fn main() -> Result<(), goinstant_auth::AuthError> {
//! // Construct the signer once; it can be reused for every token.
//! let signer = Signer::new("HKYdFdnezle2yrI2_Ph3cHz144bISk-cvuAbeAAA999")?;
//!
//! let user = PlainUser::new("bar", "example.com")
//!     .with_display_name("bob")
//!     .with_group(PlainGroup::new("42").with_display_name("Meaning Group"));
//!
//! let token = signer.sign(&user)?;
//! assert_eq!(token.split('.').count(), 3);
//! # Ok(())
//! # }
//! ```
//!
//! Bring your own identity source by implementing [`User`] (and [`Group`])
//! directly; [`PlainUser`] and [`PlainGroup`] are optional conveniences.

pub mod claims;
pub mod error;
pub mod header;
pub mod identity;
mod keys;
pub mod signer;

pub use error::{AuthError, AuthResult, ClaimScope};
pub use header::Header;
pub use identity::{Group, PlainGroup, PlainUser, User};
pub use signer::Signer;
