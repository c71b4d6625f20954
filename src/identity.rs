//! The identity model: users, the groups they belong to, and the custom
//! claims attached to either.
//!
//! The signing pipeline operates purely against the [`User`] and [`Group`]
//! traits, so any identity source can be plugged in. [`PlainUser`] and
//! [`PlainGroup`] are plain-old-data implementations for callers that don't
//! want to implement their own.

use std::collections::BTreeMap;

use serde_json::Value;

/// A user to issue a token for.
pub trait User {
    /// Unique, permanent ID for this user.
    ///
    /// Numeric IDs make good permanent identifiers. Usernames and email
    /// addresses not so much, since they're liable to change.
    fn id(&self) -> &str;

    /// The domain this user belongs to, typically the DNS domain of your
    /// website. Becomes the token issuer.
    fn domain(&self) -> &str;

    /// Display name for this user. `None` falls back to [`User::id`] at
    /// claims-construction time.
    fn display_name(&self) -> Option<&str>;

    /// Groups this user belongs to.
    ///
    /// Order doesn't matter: groups are serialized sorted ascending by id,
    /// and two groups with the same id count as the same group.
    fn groups(&self) -> Vec<&dyn Group>;

    /// Additional claims to embed in the token for this user. An empty map
    /// means no custom claims.
    fn custom_claims(&self) -> BTreeMap<String, Value>;
}

/// A group a user belongs to, used to enforce ACLs.
pub trait Group {
    /// Unique ID for this group.
    fn id(&self) -> &str;

    /// Display name for this group. `None` falls back to [`Group::id`].
    fn display_name(&self) -> Option<&str>;

    /// Additional claims to embed in this group's token entry.
    fn custom_claims(&self) -> BTreeMap<String, Value>;
}

/// A plain-old-data [`User`] implementation.
#[derive(Debug, Clone)]
pub struct PlainUser {
    id: String,
    domain: String,
    display_name: Option<String>,
    groups: Vec<PlainGroup>,
    custom: BTreeMap<String, Value>,
}

impl PlainUser {
    /// Create a user with the given permanent id and domain. The display
    /// name defaults to the id until set.
    pub fn new(id: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            domain: domain.into(),
            display_name: None,
            groups: Vec::new(),
            custom: BTreeMap::new(),
        }
    }

    /// Set the visible name for this user.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Add a group this user belongs to.
    #[must_use]
    pub fn with_group(mut self, group: PlainGroup) -> Self {
        self.groups.push(group);
        self
    }

    /// Replace the set of groups this user belongs to.
    #[must_use]
    pub fn with_groups(mut self, groups: Vec<PlainGroup>) -> Self {
        self.groups = groups;
        self
    }

    /// Add a custom claim.
    #[must_use]
    pub fn with_claim(mut self, key: impl Into<String>, value: Value) -> Self {
        self.custom.insert(key.into(), value);
        self
    }

    /// Replace all custom claims. Pass an empty map to clear them.
    pub fn set_custom_claims(&mut self, custom: BTreeMap<String, Value>) {
        self.custom = custom;
    }
}

impl User for PlainUser {
    fn id(&self) -> &str {
        &self.id
    }

    fn domain(&self) -> &str {
        &self.domain
    }

    fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    fn groups(&self) -> Vec<&dyn Group> {
        self.groups.iter().map(|g| g as &dyn Group).collect()
    }

    fn custom_claims(&self) -> BTreeMap<String, Value> {
        self.custom.clone()
    }
}

/// A plain-old-data [`Group`] implementation.
#[derive(Debug, Clone)]
pub struct PlainGroup {
    id: String,
    display_name: Option<String>,
    custom: BTreeMap<String, Value>,
}

impl PlainGroup {
    /// Create a group with the given permanent id. The display name
    /// defaults to the id until set.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: None,
            custom: BTreeMap::new(),
        }
    }

    /// Set the visible name for this group.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Add a custom claim.
    #[must_use]
    pub fn with_claim(mut self, key: impl Into<String>, value: Value) -> Self {
        self.custom.insert(key.into(), value);
        self
    }

    /// Replace all custom claims. Pass an empty map to clear them.
    pub fn set_custom_claims(&mut self, custom: BTreeMap<String, Value>) {
        self.custom = custom;
    }
}

impl Group for PlainGroup {
    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    fn custom_claims(&self) -> BTreeMap<String, Value> {
        self.custom.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn display_name_is_absent_until_set() {
        let user = PlainUser::new("u1", "example.com");
        assert_eq!(user.display_name(), None);

        let user = user.with_display_name("Una");
        assert_eq!(user.display_name(), Some("Una"));
    }

    #[test]
    fn custom_claims_default_to_empty() {
        let group = PlainGroup::new("g1");
        assert!(group.custom_claims().is_empty());
    }

    #[test]
    fn set_custom_claims_replaces_the_whole_map() {
        let mut user = PlainUser::new("u1", "example.com").with_claim("email", json!("u1@example.com"));
        assert_eq!(user.custom_claims().len(), 1);

        user.set_custom_claims(BTreeMap::new());
        assert!(user.custom_claims().is_empty());
    }

    #[test]
    fn groups_are_exposed_through_the_trait() {
        let user = PlainUser::new("u1", "example.com")
            .with_group(PlainGroup::new("a"))
            .with_group(PlainGroup::new("b"));
        let ids: Vec<&str> = user.groups().iter().map(|g| g.id()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
