//! Token signing: claims and header construction, HMAC-SHA256, compact
//! serialization.

use std::collections::BTreeMap;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use serde_json::Value;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::claims;
use crate::error::{AuthError, AuthResult};
use crate::header::Header;
use crate::identity::User;
use crate::keys;

type HmacSha256 = Hmac<Sha256>;

/// Issues signed identity tokens for users.
///
/// The secret key is decoded and validated once, at construction; a single
/// signer can then be reused for any number of signing calls. Signing never
/// mutates the signer, so sharing one instance across threads needs no
/// locking.
pub struct Signer {
    key: Zeroizing<Vec<u8>>,
}

impl Signer {
    /// Create a signer from a standard or URL-safe base64 encoded secret
    /// key.
    ///
    /// # Errors
    ///
    /// [`AuthError::InvalidKey`] if the key doesn't decode or decodes to
    /// fewer than 32 bytes.
    pub fn new(secret_key: &str) -> AuthResult<Self> {
        let key = keys::parse_secret_key(secret_key)?;
        tracing::debug!(key_len = key.len(), "signer ready");
        Ok(Self { key })
    }

    /// Create a signed token for `user` with the default HS256 header.
    ///
    /// # Errors
    ///
    /// Claim validation errors per [`claims::user_claims`], or
    /// [`AuthError::SigningFailed`] if the MAC primitive fails.
    pub fn sign<U: User + ?Sized>(&self, user: &U) -> AuthResult<String> {
        self.sign_with_headers(user, &BTreeMap::new())
    }

    /// Create a signed token for `user`, mapping `extra_headers` onto the
    /// JWS header per [`Header::with_overrides`].
    ///
    /// All claim and header validation happens before any cryptographic
    /// work, so a rejected call never computes a partial signature.
    ///
    /// # Errors
    ///
    /// Claim validation errors per [`claims::user_claims`], header errors
    /// per [`Header::with_overrides`], or [`AuthError::SigningFailed`] if
    /// the MAC primitive fails.
    pub fn sign_with_headers<U: User + ?Sized>(
        &self,
        user: &U,
        extra_headers: &BTreeMap<String, Value>,
    ) -> AuthResult<String> {
        let claim_set = claims::user_claims(user)?;
        let header = if extra_headers.is_empty() {
            Header::hs256()
        } else {
            Header::with_overrides(extra_headers)?
        };

        let claim_count = claim_set.len();
        let header_json = serde_json::to_string(&header).map_err(|_| AuthError::SigningFailed)?;
        let claims_json = serde_json::to_string(&claim_set).map_err(|_| AuthError::SigningFailed)?;

        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(header_json),
            URL_SAFE_NO_PAD.encode(claims_json)
        );

        let mut mac =
            HmacSha256::new_from_slice(&self.key).map_err(|_| AuthError::SigningFailed)?;
        mac.update(signing_input.as_bytes());
        let signature = mac.finalize().into_bytes();

        tracing::trace!(claims = claim_count, "token signed");
        Ok(format!(
            "{signing_input}.{}",
            URL_SAFE_NO_PAD.encode(signature)
        ))
    }
}
