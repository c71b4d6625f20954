//! Conversion of a [`User`] and its groups into a canonical claim set.
//!
//! Claim objects are `BTreeMap`s, so keys always serialize in lexical order
//! and signing the same logical input twice yields byte-identical tokens.
//! The token format carries no issued-at, expiry, or nonce claims.

use std::collections::{BTreeMap, HashSet};

use once_cell::sync::Lazy;
use serde_json::{json, Value};

use crate::error::{AuthError, AuthResult, ClaimScope};
use crate::identity::{Group, User};

/// The `aud` claim embedded in every token.
pub const AUDIENCE: &str = "goinstant.net";

/// Claims that can't be custom for a user.
static USER_RESERVED_CLAIMS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["aud", "dn", "g", "iss", "sub"].into_iter().collect());

/// Claims that can't be custom for a group.
static GROUP_RESERVED_CLAIMS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["dn", "id"].into_iter().collect());

/// Build the full claim set for `user`.
///
/// Fixed claims are `sub` (user id), `iss` (domain), `aud` (always
/// [`AUDIENCE`]) and `dn` (display name, falling back to the id). Custom
/// claims merge in verbatim. Groups, when present, land under `g` as a list
/// sorted ascending by group id; a user with no groups gets no `g` claim at
/// all.
///
/// # Errors
///
/// [`AuthError::InvalidArgument`] for an empty id or domain, or an empty
/// display name; [`AuthError::ReservedClaim`] when a custom claim key
/// collides with a reserved key at either level.
pub fn user_claims<U: User + ?Sized>(user: &U) -> AuthResult<BTreeMap<String, Value>> {
    let display_name = validated_display_name(user.id(), user.display_name(), ClaimScope::User)?;
    if user.domain().is_empty() {
        return Err(AuthError::InvalidArgument(
            "User domain must be non-empty".to_string(),
        ));
    }

    let mut claims = BTreeMap::new();
    claims.insert("sub".to_string(), Value::String(user.id().to_string()));
    claims.insert("iss".to_string(), Value::String(user.domain().to_string()));
    claims.insert("aud".to_string(), json!([AUDIENCE]));
    claims.insert("dn".to_string(), Value::String(display_name));

    for (key, value) in user.custom_claims() {
        if USER_RESERVED_CLAIMS.contains(key.as_str()) {
            return Err(AuthError::ReservedClaim {
                key,
                scope: ClaimScope::User,
            });
        }
        claims.insert(key, value);
    }

    let mut groups = user.groups();
    if !groups.is_empty() {
        // Total order for serialization: ascending by id, duplicates by id
        // collapsed (set semantics).
        groups.sort_by(|a, b| a.id().cmp(b.id()));
        groups.dedup_by(|a, b| a.id() == b.id());

        let list = groups
            .into_iter()
            .map(|group| group_claims(group).map(object))
            .collect::<AuthResult<Vec<Value>>>()?;
        claims.insert("g".to_string(), Value::Array(list));
    }

    Ok(claims)
}

/// Build the claim object for a single group: `id`, `dn`, plus the group's
/// custom claims.
///
/// # Errors
///
/// Same validation as [`user_claims`], against the group-level reserved set.
pub fn group_claims<G: Group + ?Sized>(group: &G) -> AuthResult<BTreeMap<String, Value>> {
    let display_name = validated_display_name(group.id(), group.display_name(), ClaimScope::Group)?;

    let mut claims = BTreeMap::new();
    claims.insert("id".to_string(), Value::String(group.id().to_string()));
    claims.insert("dn".to_string(), Value::String(display_name));

    for (key, value) in group.custom_claims() {
        if GROUP_RESERVED_CLAIMS.contains(key.as_str()) {
            return Err(AuthError::ReservedClaim {
                key,
                scope: ClaimScope::Group,
            });
        }
        claims.insert(key, value);
    }

    Ok(claims)
}

/// Validate the id/display-name pair shared by users and groups, resolving
/// the display name to the id when absent.
fn validated_display_name(
    id: &str,
    display_name: Option<&str>,
    scope: ClaimScope,
) -> AuthResult<String> {
    if id.is_empty() {
        return Err(AuthError::InvalidArgument(format!(
            "{scope} id must be non-empty"
        )));
    }
    match display_name {
        Some("") => Err(AuthError::InvalidArgument(format!(
            "{scope} displayName must be non-empty when present"
        ))),
        Some(name) => Ok(name.to_string()),
        None => Ok(id.to_string()),
    }
}

/// Wrap a claim map as a JSON object, preserving its sorted key order.
fn object(claims: BTreeMap<String, Value>) -> Value {
    Value::Object(claims.into_iter().collect())
}
