use indexmap::IndexMap;

use crate::model::{Column, ObjectKey};

/// Column → value for one differing property, restricted to columns where the
/// object exists. Columns lacking the object are never present here.
pub type PropertyValues = IndexMap<Column, String>;

/// The differing properties of one object, in rendering order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectDiff {
    pub properties: IndexMap<String, PropertyValues>,
}

impl ObjectDiff {
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// Objects with at least one disagreeing property, in index order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiffSet {
    entries: IndexMap<ObjectKey, ObjectDiff>,
}

impl DiffSet {
    pub(crate) fn insert(&mut self, key: ObjectKey, object: ObjectDiff) {
        self.entries.insert(key, object);
    }

    pub fn get(&self, key: &ObjectKey) -> Option<&ObjectDiff> {
        self.entries.get(key)
    }

    /// Values of one property of one object, if that property differs.
    pub fn property(&self, key: &ObjectKey, property: &str) -> Option<&PropertyValues> {
        self.entries.get(key)?.properties.get(property)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ObjectKey, &ObjectDiff)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of (object, property) rows.
    pub fn property_count(&self) -> usize {
        self.entries.values().map(|o| o.properties.len()).sum()
    }
}
