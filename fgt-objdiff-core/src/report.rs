//! Presentation-ready view of a comparison.
//!
//! A report is a grid: one row per (object, differing property), one cell per
//! column. Each cell is either "object missing", "no property value" (object present,
//! property unset or empty), or the classified items of the value.

use serde::{Deserialize, Serialize};

use crate::classify::{classify_with_palette, ClassifiedToken, Palette};
use crate::diff::DiffSet;
use crate::filter::{DiffFilter, FilteredObject};
use crate::index::CrossSourceIndex;
use crate::model::Column;

/// Object types listed first in reports, in this order.
pub const DEFAULT_TYPE_ORDER: &[&str] = &[
    "config firewall address",
    "config firewall addrgrp",
    "config firewall service custom",
    "config firewall service group",
];

/// Rendering knobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportOptions {
    pub palette: Palette,
    /// Object types sorted first; unlisted types follow, then object name.
    pub type_order: Vec<String>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            type_order: DEFAULT_TYPE_ORDER.iter().map(|t| (*t).to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnHeader {
    pub source: String,
    pub tenant: String,
    pub label: String,
}

impl From<&Column> for ColumnHeader {
    fn from(column: &Column) -> Self {
        Self {
            source: column.source.clone(),
            tenant: column.tenant.clone(),
            label: column.label(),
        }
    }
}

/// Headers for `columns`. Columns whose short labels collide (same file name in
/// different directories) are labelled with their full source instead.
pub fn column_headers(columns: &[Column]) -> Vec<ColumnHeader> {
    let short: Vec<String> = columns.iter().map(Column::label).collect();
    columns
        .iter()
        .zip(&short)
        .map(|(column, label)| {
            let mut header = ColumnHeader::from(column);
            if short.iter().filter(|other| *other == label).count() > 1 {
                header.label = column.qualified_label();
            }
            header
        })
        .collect()
}

/// Content of one column for one differing property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Cell {
    /// The object does not exist under this column.
    ObjectMissing,
    /// The object exists but the property is unset or empty.
    NoValue,
    /// Classified items of the value.
    Value { tokens: Vec<ClassifiedToken> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyRow {
    pub property: String,
    /// Aligned with [`ComparisonReport::columns`].
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectRow {
    /// 1-based position in the report.
    pub number: usize,
    pub object_type: String,
    pub name: String,
    pub properties: Vec<PropertyRow>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub columns: usize,
    pub objects: usize,
    pub differing_objects: usize,
    pub differing_properties: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonReport {
    pub columns: Vec<ColumnHeader>,
    pub rows: Vec<ObjectRow>,
    pub summary: ReportSummary,
}

/// Build a report over the whole diff set.
pub fn build_report(
    index: &CrossSourceIndex,
    diffs: &DiffSet,
    opts: &ReportOptions,
) -> ComparisonReport {
    build_filtered_report(index, &DiffFilter::default().apply(diffs), opts)
}

/// Build a report over a filtered view, classifying only the displayed properties.
pub fn build_filtered_report(
    index: &CrossSourceIndex,
    view: &[FilteredObject<'_>],
    opts: &ReportOptions,
) -> ComparisonReport {
    let mut ordered: Vec<&FilteredObject<'_>> = view.iter().collect();
    ordered.sort_by_cached_key(|object| {
        (
            type_rank(&object.key.object_type, &opts.type_order),
            object.key.name.to_lowercase(),
            object.key.name.clone(),
        )
    });

    let columns = index.columns();
    let mut rows = Vec::with_capacity(ordered.len());
    for (position, object) in ordered.into_iter().enumerate() {
        let properties = object
            .properties
            .iter()
            .map(|(property, values)| {
                let classification = classify_with_palette(values, &opts.palette);
                let cells = columns
                    .iter()
                    .map(|column| {
                        if !index.is_present(object.key, column) {
                            return Cell::ObjectMissing;
                        }
                        match values.get(column).map(String::as_str) {
                            None | Some("") => Cell::NoValue,
                            Some(_) => Cell::Value {
                                tokens: classification.cell(column).unwrap_or_default().to_vec(),
                            },
                        }
                    })
                    .collect();
                PropertyRow {
                    property: (*property).to_string(),
                    cells,
                }
            })
            .collect();

        rows.push(ObjectRow {
            number: position + 1,
            object_type: object.key.object_type.clone(),
            name: object.key.name.clone(),
            properties,
        });
    }

    let summary = ReportSummary {
        columns: columns.len(),
        objects: index.object_count(),
        differing_objects: rows.len(),
        differing_properties: rows.iter().map(|r| r.properties.len()).sum(),
    };

    ComparisonReport {
        columns: column_headers(columns),
        rows,
        summary,
    }
}

fn type_rank(object_type: &str, order: &[String]) -> usize {
    order
        .iter()
        .position(|t| t == object_type)
        .unwrap_or(order.len())
}
