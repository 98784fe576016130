//! Narrowing a diff set for display.
//!
//! Filters never modify the [`DiffSet`]; they return borrowed views so that the
//! caller can re-run classification on just the displayed subset.

use serde::{Deserialize, Serialize};

use crate::diff::{DiffSet, PropertyValues};
use crate::model::ObjectKey;

/// Case-insensitive substring filters over object type, property, name and value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffFilter {
    /// Keep objects whose type contains any of these.
    #[serde(default)]
    pub types: Vec<String>,
    /// Keep properties whose name contains any of these.
    #[serde(default)]
    pub properties: Vec<String>,
    /// Keep objects whose name contains this.
    #[serde(default)]
    pub name: Option<String>,
    /// Keep properties where some column value contains this.
    #[serde(default)]
    pub value: Option<String>,
    /// Invert the type/property conditions (name and value still apply).
    #[serde(default)]
    pub invert: bool,
}

/// One object of a filtered view with its surviving properties.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredObject<'a> {
    pub key: &'a ObjectKey,
    pub properties: Vec<(&'a str, &'a PropertyValues)>,
}

impl DiffFilter {
    /// Whether no condition is set.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
            && self.properties.is_empty()
            && blank(&self.name)
            && blank(&self.value)
    }

    /// Apply the filter, keeping diff-set order.
    pub fn apply<'a>(&self, diffs: &'a DiffSet) -> Vec<FilteredObject<'a>> {
        let name = lowered(&self.name);
        let value = lowered(&self.value);
        let types = lowered_all(&self.types);
        let properties = lowered_all(&self.properties);

        let has_type_or_property = !types.is_empty() || !properties.is_empty();
        let has_any_field_filter = has_type_or_property || value.is_some();

        let mut out = Vec::new();
        for (key, object) in diffs.iter() {
            let name_ok = name
                .as_deref()
                .map_or(true, |needle| key.name.to_lowercase().contains(needle));
            let type_ok = contains_any(&key.object_type, &types);

            let kept: Vec<(&str, &PropertyValues)> = object
                .properties
                .iter()
                .filter(|(property, values)| {
                    if !has_any_field_filter {
                        return name_ok;
                    }
                    let property_ok = contains_any(property, &properties);
                    let value_ok = value.as_deref().map_or(true, |needle| {
                        values.values().any(|v| v.to_lowercase().contains(needle))
                    });
                    if self.invert && has_type_or_property {
                        (!type_ok || !property_ok) && name_ok && value_ok
                    } else {
                        type_ok && property_ok && name_ok && value_ok
                    }
                })
                .map(|(property, values)| (property.as_str(), values))
                .collect();

            if !kept.is_empty() {
                out.push(FilteredObject {
                    key,
                    properties: kept,
                });
            }
        }
        out
    }
}

/// True when `needles` is empty or `haystack` contains one of them.
fn contains_any(haystack: &str, needles: &[String]) -> bool {
    if needles.is_empty() {
        return true;
    }
    let haystack = haystack.to_lowercase();
    needles.iter().any(|needle| haystack.contains(needle.as_str()))
}

fn blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

fn lowered(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(str::to_lowercase)
}

fn lowered_all(values: &[String]) -> Vec<String> {
    values
        .iter()
        .filter(|v| !v.is_empty())
        .map(|v| v.to_lowercase())
        .collect()
}
