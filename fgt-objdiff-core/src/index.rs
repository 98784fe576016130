//! Cross-source object index.
//!
//! Columns are enumerated in caller order: sources first, then tenants within each
//! source in the order the parser found them. Nothing here is ever re-sorted.

use indexmap::IndexMap;

use crate::model::{Column, ObjectKey, PropertyMap, TenantMap};

/// Column → properties for one object. A missing column means the object does
/// not exist there; an empty map means it exists without properties.
pub type ColumnProperties = IndexMap<Column, PropertyMap>;

/// One parsed source, as handed to [`CrossSourceIndex::build`].
#[derive(Debug, Clone, PartialEq)]
pub struct SourceObjects {
    /// Caller-chosen identifier, usually the file path.
    pub id: String,
    pub tenants: TenantMap,
}

impl SourceObjects {
    pub fn new(id: impl Into<String>, tenants: TenantMap) -> Self {
        Self {
            id: id.into(),
            tenants,
        }
    }
}

/// All objects from all sources, keyed by (type, name).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrossSourceIndex {
    columns: Vec<Column>,
    objects: IndexMap<ObjectKey, ColumnProperties>,
}

impl CrossSourceIndex {
    /// Aggregate parsed sources, in the given order.
    pub fn build(sources: &[SourceObjects]) -> Self {
        let mut index = Self::default();

        for source in sources {
            for (tenant, types) in &source.tenants {
                let column = Column::new(source.id.as_str(), tenant.as_str());
                if !index.columns.contains(&column) {
                    index.columns.push(column.clone());
                }

                for (object_type, objects) in types {
                    for (name, props) in objects {
                        index
                            .objects
                            .entry(ObjectKey::new(object_type.as_str(), name.as_str()))
                            .or_default()
                            .insert(column.clone(), props.clone());
                    }
                }
            }
        }

        tracing::debug!(
            columns = index.columns.len(),
            objects = index.objects.len(),
            "built cross-source index"
        );
        index
    }

    /// Comparison axes in input order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Position of `column` in [`Self::columns`].
    pub fn column_position(&self, column: &Column) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Every object with its per-column properties, in first-seen order.
    pub fn objects(&self) -> &IndexMap<ObjectKey, ColumnProperties> {
        &self.objects
    }

    pub fn get(&self, key: &ObjectKey) -> Option<&ColumnProperties> {
        self.objects.get(key)
    }

    /// Properties of `key` under `column`, or `None` when the object is missing there.
    pub fn properties(&self, key: &ObjectKey, column: &Column) -> Option<&PropertyMap> {
        self.objects.get(key)?.get(column)
    }

    /// Whether `key` exists under `column`, regardless of its properties.
    pub fn is_present(&self, key: &ObjectKey, column: &Column) -> bool {
        self.properties(key, column).is_some()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }
}
