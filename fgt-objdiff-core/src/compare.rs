//! One-shot pipeline: texts in, index and diff set out.

use serde::Serialize;

use crate::diff::{diff, CompareError, DiffSet};
use crate::index::{CrossSourceIndex, SourceObjects};
use crate::normalize::NormalizeOptions;
use crate::parser::{parse, ParseWarning};

/// A parse warning attributed to its source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceWarning {
    pub source: String,
    pub warning: ParseWarning,
}

/// Everything a presentation layer needs from one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub index: CrossSourceIndex,
    pub diffs: DiffSet,
    pub warnings: Vec<SourceWarning>,
}

/// Parse every `(source id, text)` pair, index them in the given order and diff.
pub fn compare_texts<I, S, T>(
    inputs: I,
    opts: &NormalizeOptions,
) -> Result<Comparison, CompareError>
where
    I: IntoIterator<Item = (S, T)>,
    S: Into<String>,
    T: AsRef<str>,
{
    let mut sources = Vec::new();
    let mut warnings = Vec::new();
    for (id, text) in inputs {
        let id = id.into();
        let parsed = parse(text.as_ref(), opts);
        warnings.extend(parsed.warnings.into_iter().map(|warning| SourceWarning {
            source: id.clone(),
            warning,
        }));
        sources.push(SourceObjects::new(id, parsed.tenants));
    }

    let index = CrossSourceIndex::build(&sources);
    let diffs = diff(&index)?;
    Ok(Comparison {
        index,
        diffs,
        warnings,
    })
}
