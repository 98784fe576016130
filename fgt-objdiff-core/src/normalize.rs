//! Property value canonicalization.
//!
//! Two dumps of the same logical object can differ textually: members listed in
//! another order, per-device UUIDs, comments reflowed across lines. Every raw
//! `set KEY VALUE` pair goes through [`normalize_property`] before it is stored,
//! so that only semantic differences survive into the diff.
//!
//! | Key (case-insensitive)         | Effect                                              |
//! |--------------------------------|-----------------------------------------------------|
//! | excluded (`uuid`, ...)         | dropped                                             |
//! | sorted list (`member`, ...)    | quoted tokens sorted and re-joined `"a" "b"`        |
//! | `comment`                      | quotes stripped, whitespace runs collapsed          |
//! | anything else                  | surrounding quotes stripped                         |

use serde::{Deserialize, Serialize};

/// Properties dropped by the standard policy.
pub const STANDARD_EXCLUDED_PROPERTIES: &[&str] = &["uuid"];

/// Extra property dropped by the interface-agnostic policy.
pub const ASSOCIATED_INTERFACE: &str = "associated-interface";

/// Multi-valued properties whose token order is not significant.
pub const DEFAULT_SORTED_LIST_PROPERTIES: &[&str] = &["member"];

const COMMENT: &str = "comment";

/// Controls which properties are dropped and which are treated as unordered lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeOptions {
    /// Keys omitted from every property map.
    pub excluded_properties: Vec<String>,
    /// Keys whose quoted tokens are sorted before comparison.
    pub sorted_list_properties: Vec<String>,
}

impl NormalizeOptions {
    /// Drop `uuid` only.
    pub fn standard() -> Self {
        Self {
            excluded_properties: to_owned_list(STANDARD_EXCLUDED_PROPERTIES),
            sorted_list_properties: to_owned_list(DEFAULT_SORTED_LIST_PROPERTIES),
        }
    }

    /// Drop `uuid` and `associated-interface`, for comparing devices whose
    /// interface naming differs.
    pub fn ignore_associated_interface() -> Self {
        Self::standard().with_excluded(ASSOCIATED_INTERFACE)
    }

    /// Add one more excluded key. Duplicates are ignored.
    pub fn with_excluded(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        if !self.is_excluded(&key) {
            self.excluded_properties.push(key);
        }
        self
    }

    /// Whether `key` is dropped. The standard keys are always dropped, whatever
    /// `excluded_properties` holds.
    pub fn is_excluded(&self, key: &str) -> bool {
        STANDARD_EXCLUDED_PROPERTIES
            .iter()
            .any(|standard| standard.eq_ignore_ascii_case(key))
            || contains_ignore_case(&self.excluded_properties, key)
    }

    pub fn is_sorted_list(&self, key: &str) -> bool {
        contains_ignore_case(&self.sorted_list_properties, key)
    }
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self::standard()
    }
}

/// Canonicalize one raw property value.
///
/// Returns `None` when the key is excluded. The function is pure and idempotent:
/// feeding its output back in yields the same string.
pub fn normalize_property(key: &str, raw: &str, opts: &NormalizeOptions) -> Option<String> {
    if opts.is_excluded(key) {
        return None;
    }

    if opts.is_sorted_list(key) {
        let mut tokens = quoted_tokens(raw);
        tokens.sort_unstable();
        return Some(join_quoted(&tokens));
    }

    let stripped = raw.trim_matches('"');
    if key.eq_ignore_ascii_case(COMMENT) {
        return Some(stripped.split_whitespace().collect::<Vec<_>>().join(" "));
    }
    Some(stripped.to_string())
}

/// Return every `"..."` token in `value`, in order.
///
/// A trailing quote without a partner yields nothing.
pub fn quoted_tokens(value: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut rest = value;
    while let Some(open) = rest.find('"') {
        let after = &rest[open + 1..];
        let Some(close) = after.find('"') else {
            break;
        };
        out.push(&after[..close]);
        rest = &after[close + 1..];
    }
    out
}

fn join_quoted(tokens: &[&str]) -> String {
    tokens
        .iter()
        .map(|token| format!("\"{token}\""))
        .collect::<Vec<_>>()
        .join(" ")
}

fn contains_ignore_case(list: &[String], key: &str) -> bool {
    list.iter().any(|item| item.eq_ignore_ascii_case(key))
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_string()).collect()
}
