//! Map and struct containers for ROD values.
//!
//! Both wrap [`IndexMap`], so they remember insertion order. That order is
//! kept for iteration and for [`FieldOrder::Insertion`](crate::FieldOrder)
//! encoding, but it is never part of a value's identity:
//!
//! - equality ignores order, like a set of entries;
//! - ordering compares the entry lists sorted by key;
//! - the canonical encoder always writes entries sorted by key.
//!
//! ## Examples
//!
//! ```rust
//! use rod::{RodMap, RodStruct, RodValue};
//!
//! let mut a = RodMap::new();
//! a.insert(RodValue::from(1), RodValue::from("one"));
//! a.insert(RodValue::from("k"), RodValue::Null);
//!
//! let b: RodMap = a.iter().rev().map(|(k, v)| (k.clone(), v.clone())).collect();
//! assert_eq!(a, b);
//!
//! let mut point = RodStruct::new();
//! point.insert("Y", 2);
//! point.insert("X", 1);
//! let names: Vec<&str> = point.sorted().into_iter().map(|(name, _)| name).collect();
//! assert_eq!(names, vec!["X", "Y"]);
//! ```

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;

use crate::RodValue;

/// A map from primitive [`RodValue`] keys to values.
///
/// The map itself accepts any key; the decoder never produces composite
/// keys and the encoder rejects them with
/// [`EncodeError::InvalidMapKey`](crate::EncodeError::InvalidMapKey).
#[derive(Debug, Clone, Default)]
pub struct RodMap(IndexMap<RodValue, RodValue>);

impl RodMap {
    /// Creates an empty `RodMap`.
    #[must_use]
    pub fn new() -> Self {
        RodMap(IndexMap::new())
    }

    /// Creates an empty `RodMap` with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        RodMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts an entry, returning the previous value for an equal key.
    ///
    /// Replacing keeps the entry's original position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rod::{RodMap, RodValue};
    ///
    /// let mut map = RodMap::new();
    /// assert!(map.insert(RodValue::from(1.5), RodValue::from(true)).is_none());
    /// assert_eq!(
    ///     map.insert(RodValue::from(1.5), RodValue::from(false)),
    ///     Some(RodValue::from(true))
    /// );
    /// ```
    pub fn insert(
        &mut self,
        key: impl Into<RodValue>,
        value: impl Into<RodValue>,
    ) -> Option<RodValue> {
        self.0.insert(key.into(), value.into())
    }

    #[must_use]
    pub fn get(&self, key: &RodValue) -> Option<&RodValue> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &RodValue) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, RodValue, RodValue> {
        self.0.keys()
    }

    /// Returns an iterator over the values, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, RodValue, RodValue> {
        self.0.values()
    }

    /// Returns an iterator over the entries, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, RodValue, RodValue> {
        self.0.iter()
    }

    /// Returns the entries ordered by key, the order the encoder writes them.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rod::{RodMap, RodValue};
    ///
    /// let mut map = RodMap::new();
    /// map.insert("b", 0);
    /// map.insert(RodValue::Null, 0);
    /// map.insert(7, 0);
    ///
    /// let keys: Vec<&RodValue> = map.sorted().into_iter().map(|(k, _)| k).collect();
    /// assert_eq!(keys, vec![&RodValue::Null, &RodValue::from(7), &RodValue::from("b")]);
    /// ```
    #[must_use]
    pub fn sorted(&self) -> Vec<(&RodValue, &RodValue)> {
        let mut entries: Vec<_> = self.0.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl PartialEq for RodMap {
    fn eq(&self, other: &Self) -> bool {
        // IndexMap equality is order-independent.
        self.0 == other.0
    }
}

impl Eq for RodMap {}

impl Hash for RodMap {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.len().hash(state);
    }
}

impl PartialOrd for RodMap {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RodMap {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sorted().cmp(&other.sorted())
    }
}

impl IntoIterator for RodMap {
    type Item = (RodValue, RodValue);
    type IntoIter = indexmap::map::IntoIter<RodValue, RodValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a RodMap {
    type Item = (&'a RodValue, &'a RodValue);
    type IntoIter = indexmap::map::Iter<'a, RodValue, RodValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(RodValue, RodValue)> for RodMap {
    fn from_iter<T: IntoIterator<Item = (RodValue, RodValue)>>(iter: T) -> Self {
        RodMap(IndexMap::from_iter(iter))
    }
}

impl From<IndexMap<RodValue, RodValue>> for RodMap {
    fn from(map: IndexMap<RodValue, RodValue>) -> Self {
        RodMap(map)
    }
}

/// A set of named fields.
///
/// Field names are plain strings here; the encoder checks that each one is an
/// identifier (`[A-Za-z_][0-9A-Za-z_]*`).
///
/// # Examples
///
/// ```rust
/// use rod::{RodStruct, RodValue};
///
/// let mut fields = RodStruct::new();
/// fields.insert("Name", "rod");
/// fields.insert("Version", 1);
///
/// assert_eq!(fields.get("Name").and_then(|v| v.as_str()), Some("rod"));
/// assert_eq!(fields.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RodStruct(IndexMap<String, RodValue>);

impl RodStruct {
    #[must_use]
    pub fn new() -> Self {
        RodStruct(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        RodStruct(IndexMap::with_capacity(capacity))
    }

    /// Sets a field, returning its previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<RodValue>) -> Option<RodValue> {
        self.0.insert(name.into(), value.into())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RodValue> {
        self.0.get(name)
    }

    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, String, RodValue> {
        self.0.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, String, RodValue> {
        self.0.values()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, RodValue> {
        self.0.iter()
    }

    /// Returns the fields ordered by name.
    #[must_use]
    pub fn sorted(&self) -> Vec<(&str, &RodValue)> {
        let mut fields: Vec<_> = self.0.iter().map(|(k, v)| (k.as_str(), v)).collect();
        fields.sort_by(|a, b| a.0.cmp(b.0));
        fields
    }
}

impl PartialEq for RodStruct {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for RodStruct {}

impl Hash for RodStruct {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.len().hash(state);
    }
}

impl PartialOrd for RodStruct {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RodStruct {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sorted().cmp(&other.sorted())
    }
}

impl IntoIterator for RodStruct {
    type Item = (String, RodValue);
    type IntoIter = indexmap::map::IntoIter<String, RodValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a RodStruct {
    type Item = (&'a String, &'a RodValue);
    type IntoIter = indexmap::map::Iter<'a, String, RodValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, RodValue)> for RodStruct {
    fn from_iter<T: IntoIterator<Item = (K, RodValue)>>(iter: T) -> Self {
        RodStruct(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
