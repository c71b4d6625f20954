//! JWS header construction and caller-supplied header overrides.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use serde_json::Value;

use crate::error::{AuthError, AuthResult};

/// JWS header for an HMAC-SHA256 token.
///
/// `alg` and `typ` are fixed; everything else is populated from caller
/// overrides via [`Header::with_overrides`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Header {
    /// Signing algorithm, always `HS256`.
    alg: &'static str,
    /// Token type, always `JWT`.
    typ: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    kid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    jku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    jwk: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    x5u: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    x5t: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    x5c: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    crit: Option<BTreeSet<String>>,
    /// Opaque custom header parameters.
    #[serde(flatten)]
    custom: BTreeMap<String, Value>,
}

impl Header {
    /// The default HS256 header.
    #[must_use]
    pub fn hs256() -> Self {
        Self {
            alg: "HS256",
            typ: "JWT",
            kid: None,
            cty: None,
            jku: None,
            jwk: None,
            x5u: None,
            x5t: None,
            x5c: None,
            crit: None,
            custom: BTreeMap::new(),
        }
    }

    /// Build an HS256 header with caller-supplied extra fields.
    ///
    /// Recognized keys map onto their typed attributes; any other key is
    /// attached as an opaque custom parameter. Compatibility quirk:
    /// encountering `alg` or `typ` stops override processing entirely,
    /// silently dropping the remaining entries in iteration order.
    ///
    /// # Errors
    ///
    /// [`AuthError::HeaderType`] when a value's JSON type doesn't match
    /// what its key expects.
    pub fn with_overrides(extra_headers: &BTreeMap<String, Value>) -> AuthResult<Self> {
        let mut header = Self::hs256();

        for (key, value) in extra_headers {
            match key.as_str() {
                "alg" | "typ" => break,
                "kid" => header.kid = Some(expect_string(key, value)?),
                "cty" => header.cty = Some(expect_string(key, value)?),
                "jku" => header.jku = Some(expect_string(key, value)?),
                "x5u" => header.x5u = Some(expect_string(key, value)?),
                "x5t" => header.x5t = Some(expect_string(key, value)?),
                "jwk" => {
                    if !value.is_object() {
                        return Err(AuthError::HeaderType {
                            key: key.clone(),
                            expected: "a JSON object",
                        });
                    }
                    header.jwk = Some(value.clone());
                }
                "x5c" => header.x5c = Some(expect_string_array(key, value)?),
                "crit" => header.crit = Some(expect_string_array(key, value)?.into_iter().collect()),
                _ => {
                    header.custom.insert(key.clone(), value.clone());
                }
            }
        }

        Ok(header)
    }
}

fn expect_string(key: &str, value: &Value) -> AuthResult<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| AuthError::HeaderType {
            key: key.to_string(),
            expected: "a string",
        })
}

fn expect_string_array(key: &str, value: &Value) -> AuthResult<Vec<String>> {
    let mismatch = || AuthError::HeaderType {
        key: key.to_string(),
        expected: "an array of strings",
    };
    value
        .as_array()
        .ok_or_else(mismatch)?
        .iter()
        .map(|item| item.as_str().map(str::to_string).ok_or_else(mismatch))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn extras(pairs: &[(&str, Value)]) -> BTreeMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn default_header_serializes_to_exactly_alg_and_typ() {
        let json = serde_json::to_string(&Header::hs256()).unwrap();
        assert_eq!(json, r#"{"alg":"HS256","typ":"JWT"}"#);
    }

    #[test]
    fn recognized_keys_map_onto_attributes() {
        let header = Header::with_overrides(&extras(&[
            ("kid", json!("key-1")),
            ("cty", json!("example")),
            ("jku", json!("https://example.com/jwks")),
            ("x5t", json!("thumb")),
            ("x5c", json!(["cert-a", "cert-b"])),
            ("crit", json!(["exp"])),
            ("jwk", json!({"kty": "oct"})),
        ]))
        .unwrap();

        let value = serde_json::to_value(&header).unwrap();
        assert_eq!(value["alg"], json!("HS256"));
        assert_eq!(value["typ"], json!("JWT"));
        assert_eq!(value["kid"], json!("key-1"));
        assert_eq!(value["cty"], json!("example"));
        assert_eq!(value["jku"], json!("https://example.com/jwks"));
        assert_eq!(value["x5t"], json!("thumb"));
        assert_eq!(value["x5c"], json!(["cert-a", "cert-b"]));
        assert_eq!(value["crit"], json!(["exp"]));
        assert_eq!(value["jwk"], json!({"kty": "oct"}));
    }

    #[test]
    fn unrecognized_keys_become_custom_parameters() {
        let header = Header::with_overrides(&extras(&[("env", json!("prod"))])).unwrap();
        let value = serde_json::to_value(&header).unwrap();
        assert_eq!(value["env"], json!("prod"));
    }

    #[test]
    fn alg_and_typ_stop_override_processing() {
        // "aaa" sorts before "alg"; "kid" sorts after. Only "aaa" applies.
        let header = Header::with_overrides(&extras(&[
            ("aaa", json!(1)),
            ("alg", json!("none")),
            ("kid", json!("key-1")),
        ]))
        .unwrap();

        let value = serde_json::to_value(&header).unwrap();
        assert_eq!(value["alg"], json!("HS256"));
        assert_eq!(value["aaa"], json!(1));
        assert_eq!(value.get("kid"), None);

        let header = Header::with_overrides(&extras(&[
            ("typ", json!("JOSE")),
            ("zzz", json!(true)),
        ]))
        .unwrap();
        let value = serde_json::to_value(&header).unwrap();
        assert_eq!(value["typ"], json!("JWT"));
        assert_eq!(value.get("zzz"), None);
    }

    #[test]
    fn type_mismatches_are_rejected() {
        assert_eq!(
            Header::with_overrides(&extras(&[("kid", json!(42))])),
            Err(AuthError::HeaderType {
                key: "kid".to_string(),
                expected: "a string",
            })
        );
        assert_eq!(
            Header::with_overrides(&extras(&[("x5c", json!("not-a-list"))])),
            Err(AuthError::HeaderType {
                key: "x5c".to_string(),
                expected: "an array of strings",
            })
        );
        assert_eq!(
            Header::with_overrides(&extras(&[("x5c", json!(["ok", 7]))])),
            Err(AuthError::HeaderType {
                key: "x5c".to_string(),
                expected: "an array of strings",
            })
        );
        assert_eq!(
            Header::with_overrides(&extras(&[("jwk", json!("not-an-object"))])),
            Err(AuthError::HeaderType {
                key: "jwk".to_string(),
                expected: "a JSON object",
            })
        );
    }
}
