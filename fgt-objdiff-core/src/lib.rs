//! Extraction-and-diff engine for FortiGate firewall objects.
//!
//! Address objects, address groups, service objects and service groups are pulled
//! out of raw configuration dumps, split per tenant (VDOM), normalized, and compared
//! across every (source, tenant) column. Only disagreeing properties are reported.
//!
//! - [`parser`]: tenant segmentation and block scanning
//! - [`normalize`]: value canonicalization (exclusions, member sorting, quotes, comments)
//! - [`index`]: cross-source object index with stable column order
//! - [`diff`]: sparse property diff with missing-vs-empty semantics
//! - [`classify`]: duplicate/unique item classification with deterministic colors
//! - [`filter`], [`report`], [`format`]: presentation helpers
//!
//! ```ignore
//! use fgt_objdiff_core::{compare_texts, build_report, format_text, NormalizeOptions, ReportOptions};
//!
//! let run = compare_texts([("a.conf", text_a), ("b.conf", text_b)], &NormalizeOptions::standard())?;
//! let report = build_report(&run.index, &run.diffs, &ReportOptions::default());
//! println!("{}", format_text(&report));
//! ```

pub mod classify;
pub mod compare;
pub mod diff;
pub mod filter;
pub mod format;
pub mod index;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod report;
pub mod source;

pub use classify::{
    classify, classify_with_palette, tokenize, ClassifiedToken, Classification, Palette,
};
pub use compare::{compare_texts, Comparison, SourceWarning};
pub use diff::{diff, CompareError, DiffSet, ObjectDiff, PropertyValues};
pub use filter::{DiffFilter, FilteredObject};
pub use format::{format_json, format_summary, format_text};
pub use index::{CrossSourceIndex, SourceObjects};
pub use model::{Column, ObjectKey, PropertyMap, TenantMap};
pub use normalize::{normalize_property, NormalizeOptions};
pub use parser::{parse, parse_file, ParseWarning, ParsedConfig};
pub use report::{build_filtered_report, build_report, Cell, ComparisonReport, ReportOptions};
pub use source::{decode_lossy, load_file, SourceError};
