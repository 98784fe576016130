use std::collections::HashSet;

use thiserror::Error;

use crate::diff::result::{DiffSet, ObjectDiff, PropertyValues};
use crate::index::{ColumnProperties, CrossSourceIndex};
use crate::model::Column;

/// Properties listed first, in this order; anything else follows alphabetically.
pub const PREFERRED_PROPERTY_ORDER: &[&str] = &[
    "interface",
    "associated-interface",
    "type",
    "subnet",
    "start-ip",
    "end-ip",
    "fqdn",
    "protocol",
    "tcp-portrange",
    "udp-portrange",
    "icmptype",
    "icmpcode",
    "sctp-portrange",
    "protocol-number",
    "iprange",
    "category",
    "member",
    "exclude-member",
    "visibility",
    "comment",
    "color",
    "fabric-object",
    "allow-routing",
];

/// Errors returned when a comparison cannot be run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompareError {
    /// Fewer than two (source, tenant) columns were supplied.
    #[error("no comparison possible: {columns} column(s) found, at least 2 required")]
    InsufficientColumns { columns: usize },
}

/// Compute the sparse diff set of an index.
///
/// Fails instead of returning an empty diff when there is nothing to compare against.
pub fn diff(index: &CrossSourceIndex) -> Result<DiffSet, CompareError> {
    let columns = index.columns();
    if columns.len() < 2 {
        return Err(CompareError::InsufficientColumns {
            columns: columns.len(),
        });
    }

    let mut out = DiffSet::default();
    for (key, per_column) in index.objects() {
        let object = diff_object(columns, per_column);
        if !object.is_empty() {
            out.insert(key.clone(), object);
        }
    }

    tracing::debug!(
        objects = out.len(),
        properties = out.property_count(),
        "computed diff set"
    );
    Ok(out)
}

/// Differing properties of one object across the columns holding it.
///
/// A property missing from a present object compares as the empty string. A
/// property is kept only when at least two columns hold the object and their
/// values are not unanimous.
pub fn diff_object(columns: &[Column], per_column: &ColumnProperties) -> ObjectDiff {
    let present: Vec<&Column> = columns
        .iter()
        .filter(|column| per_column.contains_key(*column))
        .collect();

    let mut object = ObjectDiff::default();
    if present.len() < 2 {
        return object;
    }

    let mut names: Vec<&str> = Vec::new();
    for props in per_column.values() {
        for name in props.keys() {
            if !names.contains(&name.as_str()) {
                names.push(name);
            }
        }
    }
    names.sort_by(|a, b| property_sort_key(a).cmp(&property_sort_key(b)));

    for name in names {
        let values: PropertyValues = present
            .iter()
            .map(|column| {
                let value = per_column
                    .get(*column)
                    .and_then(|props| props.get(name))
                    .cloned()
                    .unwrap_or_default();
                ((*column).clone(), value)
            })
            .collect();

        let distinct: HashSet<&str> = values.values().map(String::as_str).collect();
        if distinct.len() <= 1 {
            continue;
        }
        object.properties.insert(name.to_string(), values);
    }

    object
}

/// Sort key placing [`PREFERRED_PROPERTY_ORDER`] entries first.
pub fn property_sort_key(name: &str) -> (usize, &str) {
    let rank = PREFERRED_PROPERTY_ORDER
        .iter()
        .position(|preferred| *preferred == name)
        .unwrap_or(PREFERRED_PROPERTY_ORDER.len());
    (rank, name)
}
