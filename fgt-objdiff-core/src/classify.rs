//! Duplicate/unique classification of a differing property's values.
//!
//! Values are split into atomic items (`"a" "b"` → `a`, `b`), every occurrence is
//! counted across all columns of the property, and items seen at least twice get a
//! palette color: the Nth duplicate in sorted order gets `palette[N % len]`. Items
//! seen once get the unique color. Counting is local to each call, so the same input
//! always produces the same colors.

use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::diff::PropertyValues;
use crate::model::Column;
use crate::normalize::quoted_tokens;

/// Background colors for duplicate items, assigned in sorted item order.
pub const DUPLICATE_COLORS: [&str; 36] = [
    "#ffff99", "#ccffcc", "#99ccff", "#ffcc99", "#ff99cc", "#ccccff", "#ffd699", "#c2f0c2",
    "#b3e6ff", "#ffb3b3", "#d9b3ff", "#ffffb3", "#66ff66", "#66ccff", "#ff6666", "#ffcc00",
    "#9966ff", "#66ffff", "#ff9966", "#66ffcc", "#ff66cc", "#99ff66", "#3399ff", "#ffcc66",
    "#cc99ff", "#99ffff", "#ff9999", "#ccff66", "#66b3ff", "#ff66ff", "#aaffaa", "#ffb366",
    "#c299ff", "#99ffcc", "#ff6699", "#b3ff66",
];

/// Alert color for items that occur only once.
pub const UNIQUE_COLOR: &str = "#ff6666";

/// Ordered duplicate colors plus the unique color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub duplicate: Vec<String>,
    pub unique: String,
}

impl Palette {
    /// Color of the `rank`-th duplicate item, cycling through the palette.
    pub fn duplicate_color(&self, rank: usize) -> &str {
        if self.duplicate.is_empty() {
            return DUPLICATE_COLORS[rank % DUPLICATE_COLORS.len()];
        }
        &self.duplicate[rank % self.duplicate.len()]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            duplicate: DUPLICATE_COLORS.iter().map(|c| (*c).to_string()).collect(),
            unique: UNIQUE_COLOR.to_string(),
        }
    }
}

/// One atomic item of a cell, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedToken {
    pub token: String,
    pub color: String,
    pub duplicate: bool,
    /// Rank of the item among this property's sorted duplicates. Equal items share
    /// it, so a renderer can cross-link occurrences in different columns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<usize>,
}

/// Per-column classified items of one property.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    /// Same column order as the input values.
    pub cells: IndexMap<Column, Vec<ClassifiedToken>>,
    /// Items counted at least twice.
    pub duplicates: BTreeSet<String>,
}

impl Classification {
    pub fn cell(&self, column: &Column) -> Option<&[ClassifiedToken]> {
        self.cells.get(column).map(Vec::as_slice)
    }
}

/// Split a value into atomic items.
///
/// A value containing quotes yields its quoted tokens; any other non-empty value is
/// one item; the empty value yields none.
pub fn tokenize(value: &str) -> Vec<&str> {
    if value.is_empty() {
        Vec::new()
    } else if value.contains('"') {
        quoted_tokens(value)
    } else {
        vec![value]
    }
}

/// Classify with the default palette.
pub fn classify(values: &PropertyValues) -> Classification {
    classify_with_palette(values, &Palette::default())
}

/// Classify each item of each column as duplicate or unique.
///
/// Repeats inside one column's own value count individually.
pub fn classify_with_palette(values: &PropertyValues, palette: &Palette) -> Classification {
    let tokenized: Vec<(&Column, Vec<&str>)> = values
        .iter()
        .map(|(column, value)| (column, tokenize(value)))
        .collect();

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for (_, tokens) in &tokenized {
        for token in tokens {
            *counts.entry(*token).or_default() += 1;
        }
    }

    let ranks: BTreeMap<&str, usize> = counts
        .iter()
        .filter(|(_, count)| **count >= 2)
        .enumerate()
        .map(|(rank, (token, _))| (*token, rank))
        .collect();

    let cells = tokenized
        .into_iter()
        .map(|(column, tokens)| {
            let items = tokens
                .into_iter()
                .map(|token| match ranks.get(token) {
                    Some(rank) => ClassifiedToken {
                        token: token.to_string(),
                        color: palette.duplicate_color(*rank).to_string(),
                        duplicate: true,
                        link: Some(*rank),
                    },
                    None => ClassifiedToken {
                        token: token.to_string(),
                        color: palette.unique.clone(),
                        duplicate: false,
                        link: None,
                    },
                })
                .collect();
            (column.clone(), items)
        })
        .collect();

    Classification {
        cells,
        duplicates: ranks.keys().map(|token| (*token).to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{
        classify, classify_with_palette, tokenize, Palette, DUPLICATE_COLORS, UNIQUE_COLOR,
    };
    use crate::diff::PropertyValues;
    use crate::model::Column;

    fn values(raw: &[&str]) -> PropertyValues {
        raw.iter()
            .enumerate()
            .map(|(idx, value)| (Column::new(format!("f{idx}"), "root"), value.to_string()))
            .collect()
    }

    #[test]
    fn tokenize_handles_lists_scalars_and_empty() {
        assert_eq!(tokenize("\"a\" \"b c\""), vec!["a", "b c"]);
        assert_eq!(tokenize("10.0.0.0 255.0.0.0"), vec!["10.0.0.0 255.0.0.0"]);
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn shared_members_get_palette_colors_in_sorted_order() {
        let result = classify(&values(&["\"web\" \"db\"", "\"db\" \"web\" \"mail\"", ""]));

        let first = result.cell(&Column::new("f0", "root")).expect("cell");
        assert_eq!(first[0].token, "web");
        assert_eq!(first[0].color, DUPLICATE_COLORS[1]);
        assert_eq!(first[1].token, "db");
        assert_eq!(first[1].color, DUPLICATE_COLORS[0]);

        let second = result.cell(&Column::new("f1", "root")).expect("cell");
        assert_eq!(second[2].token, "mail");
        assert!(!second[2].duplicate);
        assert_eq!(second[2].color, UNIQUE_COLOR);
        assert_eq!(second[2].link, None);

        assert!(result.cell(&Column::new("f2", "root")).expect("cell").is_empty());
        assert_eq!(
            result.duplicates.iter().collect::<Vec<_>>(),
            vec!["db", "web"]
        );
    }

    #[test]
    fn repeats_within_one_column_count_as_duplicates() {
        let result = classify(&values(&["\"x\" \"x\"", "\"y\""]));
        let cell = result.cell(&Column::new("f0", "root")).expect("cell");
        assert!(cell.iter().all(|t| t.duplicate));
        assert!(!result.duplicates.contains("y"));
    }

    #[test]
    fn palette_cycles_past_its_length() {
        let palette = Palette {
            duplicate: vec!["red".to_string(), "blue".to_string()],
            unique: "grey".to_string(),
        };
        let input = values(&["\"a\" \"b\" \"c\"", "\"a\" \"b\" \"c\""]);
        let result = classify_with_palette(&input, &palette);
        let colors: Vec<&str> = result.cells[0].iter().map(|t| t.color.as_str()).collect();
        assert_eq!(colors, vec!["red", "blue", "red"]);
    }

    #[test]
    fn empty_palette_falls_back_to_defaults() {
        let palette = Palette {
            duplicate: Vec::new(),
            unique: UNIQUE_COLOR.to_string(),
        };
        assert_eq!(palette.duplicate_color(37), DUPLICATE_COLORS[1]);
    }

    #[test]
    fn classification_is_reproducible() {
        let input = values(&["A", "A", "B"]);
        assert_eq!(classify(&input), classify(&input));
    }
}
