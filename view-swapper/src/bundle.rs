use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

/// A single value stored in a [`Bundle`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateValue {
    Bool(bool),
    Int(i64),
    Str(String),
    Bytes(Vec<u8>),
    Bundle(Box<Bundle>),
    BundleList(Vec<Option<Bundle>>),
}

/// An opaque, nestable state container.
///
/// Every saved state in this workspace is a `Bundle`: a parent state is wrapped by storing it
/// under a named key next to the additional fields, and unwrapped by reading those keys back.
/// Keys are kept ordered so two equal bundles always iterate the same way.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bundle {
    entries: BTreeMap<String, StateValue>,
}

impl Bundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn put(&mut self, key: impl Into<String>, value: StateValue) {
        self.entries.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&StateValue> {
        self.entries.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<StateValue> {
        self.entries.remove(key)
    }

    pub fn put_bool(&mut self, key: impl Into<String>, value: bool) {
        self.put(key, StateValue::Bool(value));
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            StateValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn put_int(&mut self, key: impl Into<String>, value: i64) {
        self.put(key, StateValue::Int(value));
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            StateValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn put_str(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.put(key, StateValue::Str(value.into()));
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            StateValue::Str(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn put_bytes(&mut self, key: impl Into<String>, value: Vec<u8>) {
        self.put(key, StateValue::Bytes(value));
    }

    pub fn get_bytes(&self, key: &str) -> Option<&[u8]> {
        match self.get(key)? {
            StateValue::Bytes(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    pub fn put_bundle(&mut self, key: impl Into<String>, value: Bundle) {
        self.put(key, StateValue::Bundle(Box::new(value)));
    }

    pub fn get_bundle(&self, key: &str) -> Option<&Bundle> {
        match self.get(key)? {
            StateValue::Bundle(v) => Some(v),
            _ => None,
        }
    }

    /// Removes a nested bundle and returns it, leaving other value kinds in place.
    pub fn take_bundle(&mut self, key: &str) -> Option<Bundle> {
        if !matches!(self.get(key), Some(StateValue::Bundle(_))) {
            return None;
        }
        match self.entries.remove(key)? {
            StateValue::Bundle(v) => Some(*v),
            _ => None,
        }
    }

    pub fn put_bundle_list(&mut self, key: impl Into<String>, value: Vec<Option<Bundle>>) {
        self.put(key, StateValue::BundleList(value));
    }

    pub fn get_bundle_list(&self, key: &str) -> Option<&[Option<Bundle>]> {
        match self.get(key)? {
            StateValue::BundleList(v) => Some(v.as_slice()),
            _ => None,
        }
    }
}
