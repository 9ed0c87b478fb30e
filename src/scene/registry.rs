use std::collections::BTreeMap;

use crate::{
    foundation::error::{ReelError, ReelResult},
    scene::object::ObjectId,
};

/// Semantic key → object mapping owned by one scene.
///
/// Keys are unique. A lookup of a missing key is a script error: the scene must not be built.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct ObjectRegistry {
    keys: BTreeMap<String, ObjectId>,
}

impl ObjectRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `key` for `id`.
    pub fn insert(&mut self, key: impl Into<String>, id: ObjectId) -> ReelResult<()> {
        let key = key.into();
        if key.is_empty() {
            return Err(ReelError::script("semantic key must not be empty"));
        }
        if self.keys.contains_key(&key) {
            return Err(ReelError::script(format!("duplicate semantic key '{key}'")));
        }
        self.keys.insert(key, id);
        Ok(())
    }

    /// Resolve `key`.
    pub fn get(&self, key: &str) -> ReelResult<ObjectId> {
        self.keys
            .get(key)
            .copied()
            .ok_or_else(|| ReelError::script(format!("unknown semantic key '{key}'")))
    }

    /// `true` when `key` is registered.
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains_key(key)
    }

    /// Number of registered keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// `true` when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keys with their objects, in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ObjectId)> {
        self.keys.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
