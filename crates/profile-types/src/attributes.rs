//! Attribute Maps
//!
//! The dictionary projection of a record: attribute name to untyped value.
//! This is the only shape the scorer reads, so anything that can produce an
//! [`AttributeMap`] can be scored.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

use crate::cultural::Tagged;

/// Attribute name → value mapping in insertion order. `null` means absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeMap(Map<String, Value>);

impl AttributeMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an attribute.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Builder-style insert of a tagged value's label; `None` is stored as
    /// `null`.
    pub fn with_tagged<T: Tagged + ?Sized>(
        self,
        name: impl Into<String>,
        value: Option<&T>,
    ) -> Self {
        self.with(name, value.map(|v| Value::from(v.tag())))
    }

    /// Returns the raw value, `None` if the key is missing.
    ///
    /// A present key holding `null` is returned as `Some(&Value::Null)`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// Converts into a JSON object.
    pub fn into_json(self) -> Value {
        Value::Object(self.0)
    }
}

impl FromIterator<(String, Value)> for AttributeMap {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for AttributeMap {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Dictionary projection capability.
///
/// Implemented by the value objects in this crate and by the plain map types
/// callers are likely to hold, so a scorer can accept either.
pub trait AttributeSource {
    /// Returns a fresh map of every attribute this record exposes.
    fn to_attributes(&self) -> AttributeMap;
}

impl AttributeSource for AttributeMap {
    fn to_attributes(&self) -> AttributeMap {
        self.clone()
    }
}

impl AttributeSource for Map<String, Value> {
    fn to_attributes(&self) -> AttributeMap {
        AttributeMap(self.clone())
    }
}

impl AttributeSource for HashMap<String, Value> {
    fn to_attributes(&self) -> AttributeMap {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

impl AttributeSource for BTreeMap<String, Value> {
    fn to_attributes(&self) -> AttributeMap {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

/// A missing record projects to an empty map.
impl<T: AttributeSource> AttributeSource for Option<T> {
    fn to_attributes(&self) -> AttributeMap {
        self.as_ref()
            .map(AttributeSource::to_attributes)
            .unwrap_or_default()
    }
}

impl<T: AttributeSource + ?Sized> AttributeSource for &T {
    fn to_attributes(&self) -> AttributeMap {
        (**self).to_attributes()
    }
}
