//! Secret-key parsing.

use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::{alphabet, Engine as _};
use zeroize::Zeroizing;

use crate::error::{AuthError, AuthResult};

/// Minimum decoded key length for HMAC-SHA256.
pub(crate) const MIN_KEY_BYTES: usize = 32;

/// Lenient standard-alphabet engine. Deployed keys arrive padded or
/// unpadded, sometimes with non-canonical trailing bits in the final
/// character.
const SECRET_KEY_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Decode a standard or URL-safe base64 secret key to raw bytes, enforcing
/// the minimum HMAC-SHA256 key length.
pub(crate) fn parse_secret_key(secret_key: &str) -> AuthResult<Zeroizing<Vec<u8>>> {
    // URL-safe and standard alphabets are interchangeable here.
    let normalized = secret_key.replace('-', "+").replace('_', "/");
    let bytes = SECRET_KEY_ENGINE
        .decode(normalized)
        .map_err(|e| AuthError::InvalidKey(e.to_string()))?;

    if bytes.len() < MIN_KEY_BYTES {
        return Err(AuthError::InvalidKey(format!(
            "secret key is too short (must be >= {MIN_KEY_BYTES} bytes after decoding, got {})",
            bytes.len()
        )));
    }

    Ok(Zeroizing::new(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_safe_and_standard_alphabets_decode_identically() {
        let url_safe = "HKYdFdnezle2yrI2_Ph3cHz144bISk-cvuAbeAAA999";
        let standard = "HKYdFdnezle2yrI2/Ph3cHz144bISk+cvuAbeAAA999";

        let a = parse_secret_key(url_safe).unwrap();
        let b = parse_secret_key(standard).unwrap();
        assert_eq!(*a, *b);
        assert_eq!(a.len(), 32);
    }

    #[test]
    fn padding_is_optional() {
        // 32 zero bytes, padded and unpadded.
        let padded = format!("{}=", "A".repeat(43));
        let unpadded = "A".repeat(43);
        assert_eq!(parse_secret_key(&padded).unwrap().len(), 32);
        assert_eq!(parse_secret_key(&unpadded).unwrap().len(), 32);
    }

    #[test]
    fn short_keys_are_rejected() {
        // 24 bytes after decoding.
        let short = "c2hvcnQga2V5IHNob3J0IGtleSE0NTY3";
        assert!(matches!(
            parse_secret_key(short),
            Err(AuthError::InvalidKey(_))
        ));
    }

    #[test]
    fn undecodable_keys_are_rejected() {
        assert!(matches!(
            parse_secret_key("!!! not base64 !!!"),
            Err(AuthError::InvalidKey(_))
        ));
    }
}
