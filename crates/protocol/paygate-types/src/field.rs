//! Ordered collections of signable key/value pairs.
//!
//! A [`FieldSet`] keeps two views of the same entries:
//!
//! ```text
//! fields: [vpc_Command, vpc_Amount, user_note]     insertion order (rendering)
//! index:  {user_note, vpc_Amount, vpc_Command}     byte-wise name order (signing)
//! ```
//!
//! Each entry is tagged with its [`Namespace`] when it is inserted, so read
//! sites never re-derive it from the name.

use std::collections::{btree_map, BTreeMap};

use serde::{Deserialize, Serialize};

use crate::constants::{CUSTOM_PREFIX, GATEWAY_PREFIX};
use crate::error::{FieldError, FieldResult};

/// Namespace of a wire field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Namespace {
    /// Protocol-defined, reserved by the gateway.
    Gateway,
    /// Caller-defined, passed through opaquely.
    Custom,
}

impl Namespace {
    /// Wire prefix for this namespace.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Gateway => GATEWAY_PREFIX,
            Self::Custom => CUSTOM_PREFIX,
        }
    }

    /// Build the wire name of `key` in this namespace.
    pub fn qualify(&self, key: &str) -> String {
        format!("{}{}", self.prefix(), key)
    }

    /// Resolve the namespace of a wire name, if it carries a known prefix.
    pub fn of(name: &str) -> Option<Self> {
        [Self::Gateway, Self::Custom]
            .into_iter()
            .find(|ns| name.starts_with(ns.prefix()))
    }
}

/// A single named value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    value: String,
    namespace: Option<Namespace>,
}

impl Field {
    fn new(name: String, value: String) -> Self {
        let namespace = Namespace::of(&name);
        Self {
            name,
            value,
            namespace,
        }
    }

    /// Full wire name, including any namespace prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Namespace tag resolved at insertion. `None` for unprefixed names.
    pub fn namespace(&self) -> Option<Namespace> {
        self.namespace
    }

    /// Name with the namespace prefix stripped.
    pub fn key(&self) -> &str {
        match self.namespace {
            Some(ns) => &self.name[ns.prefix().len()..],
            None => &self.name,
        }
    }
}

/// Ordered mapping from field name to string value with unique names.
///
/// Insertion order is preserved for rendering; [`canonical_pairs`](Self::canonical_pairs)
/// yields the sorted view used as signature input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    fields: Vec<Field>,
    index: BTreeMap<String, usize>,
}

impl FieldSet {
    /// Create an empty field set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a field set from raw pairs, rejecting duplicate names.
    pub fn from_pairs<I, K, V>(pairs: I) -> FieldResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut set = Self::new();
        for (name, value) in pairs {
            set.add(name, value)?;
        }
        Ok(set)
    }

    /// Add a field under its full wire name.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) -> FieldResult<()> {
        let name = name.into();
        if name.is_empty() {
            return Err(FieldError::EmptyName);
        }
        match self.index.entry(name) {
            btree_map::Entry::Occupied(entry) => Err(FieldError::DuplicateField {
                name: entry.key().clone(),
            }),
            btree_map::Entry::Vacant(entry) => {
                let field = Field::new(entry.key().clone(), value.into());
                entry.insert(self.fields.len());
                self.fields.push(field);
                Ok(())
            }
        }
    }

    /// Add `key` under the given namespace prefix.
    pub fn add_in(
        &mut self,
        namespace: Namespace,
        key: &str,
        value: impl Into<String>,
    ) -> FieldResult<()> {
        self.add(namespace.qualify(key), value)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.index
            .get(name)
            .map(|&i| self.fields[i].value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    /// `(name, value)` pairs sorted by name, byte-wise ascending.
    ///
    /// The iterator is lazy and cheap to clone, so it can be walked more than once.
    pub fn canonical_pairs(&self) -> CanonicalPairs<'_> {
        CanonicalPairs {
            index: self.index.iter(),
            fields: &self.fields,
        }
    }

    /// Values of one namespace keyed by their prefix-stripped name.
    pub fn namespace_map(&self, namespace: Namespace) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .filter(|f| f.namespace == Some(namespace))
            .map(|f| (f.key().to_string(), f.value.clone()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a FieldSet {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Canonical (sorted) view over a [`FieldSet`].
#[derive(Debug, Clone)]
pub struct CanonicalPairs<'a> {
    index: btree_map::Iter<'a, String, usize>,
    fields: &'a [Field],
}

impl<'a> Iterator for CanonicalPairs<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let (name, &i) = self.index.next()?;
        Some((name.as_str(), self.fields[i].value.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.index.size_hint()
    }
}

impl ExactSizeIterator for CanonicalPairs<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_get() {
        let mut fields = FieldSet::new();
        fields.add("vpc_Amount", "100").unwrap();
        assert_eq!(fields.get("vpc_Amount"), Some("100"));
        assert_eq!(fields.get("vpc_Missing"), None);
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut fields = FieldSet::new();
        fields.add("vpc_Amount", "100").unwrap();
        let err = fields.add("vpc_Amount", "200").unwrap_err();
        assert_eq!(
            err,
            FieldError::DuplicateField {
                name: "vpc_Amount".into()
            }
        );
        // Original value untouched
        assert_eq!(fields.get("vpc_Amount"), Some("100"));
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut fields = FieldSet::new();
        assert_eq!(fields.add("", "x"), Err(FieldError::EmptyName));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut fields = FieldSet::new();
        for name in ["vpc_Version", "vpc_Amount", "user_note", "Title"] {
            fields.add(name, "v").unwrap();
        }
        let names: Vec<_> = fields.iter().map(Field::name).collect();
        assert_eq!(names, vec!["vpc_Version", "vpc_Amount", "user_note", "Title"]);
    }

    #[test]
    fn test_canonical_order_is_bytewise() {
        let mut fields = FieldSet::new();
        for name in ["vpc_b", "vpc_B", "user_a", "vpc_a", "Z"] {
            fields.add(name, name.to_lowercase()).unwrap();
        }
        let names: Vec<_> = fields.canonical_pairs().map(|(k, _)| k).collect();
        // Uppercase sorts before lowercase byte-wise
        assert_eq!(names, vec!["Z", "user_a", "vpc_B", "vpc_a", "vpc_b"]);
    }

    #[test]
    fn test_canonical_pairs_restartable() {
        let fields = FieldSet::from_pairs([("vpc_b", "2"), ("vpc_a", "1")]).unwrap();
        let pairs = fields.canonical_pairs();
        assert_eq!(pairs.len(), 2);
        let first: Vec<_> = pairs.clone().collect();
        let second: Vec<_> = pairs.collect();
        assert_eq!(first, second);
        assert_eq!(first, vec![("vpc_a", "1"), ("vpc_b", "2")]);
    }

    #[test]
    fn test_namespace_resolution() {
        assert_eq!(Namespace::of("vpc_Amount"), Some(Namespace::Gateway));
        assert_eq!(Namespace::of("user_Type"), Some(Namespace::Custom));
        assert_eq!(Namespace::of("Title"), None);
        assert_eq!(Namespace::Custom.qualify("note"), "user_note");
    }

    #[test]
    fn test_field_key_strips_prefix() {
        let fields = FieldSet::from_pairs([("vpc_Amount", "1"), ("Title", "t")]).unwrap();
        let keys: Vec<_> = fields.iter().map(Field::key).collect();
        assert_eq!(keys, vec!["Amount", "Title"]);
        assert_eq!(fields.iter().next().unwrap().namespace(), Some(Namespace::Gateway));
    }

    #[test]
    fn test_namespace_map() {
        let mut fields = FieldSet::new();
        fields.add_in(Namespace::Gateway, "Amount", "100").unwrap();
        fields.add_in(Namespace::Custom, "note", "hi").unwrap();
        fields.add("AgainLink", "x").unwrap();

        let gateway = fields.namespace_map(Namespace::Gateway);
        assert_eq!(gateway.len(), 1);
        assert_eq!(gateway["Amount"], "100");

        let custom = fields.namespace_map(Namespace::Custom);
        assert_eq!(custom.len(), 1);
        assert_eq!(custom["note"], "hi");
    }

    #[test]
    fn test_from_pairs_rejects_duplicates() {
        let result = FieldSet::from_pairs([("vpc_a", "1"), ("vpc_a", "2")]);
        assert!(matches!(result, Err(FieldError::DuplicateField { .. })));
    }
}
