//! FortiGate configuration text scanner.
//!
//! Parsing happens in two passes over the text of one source:
//!
//! 1. **Tenant segmentation.** Without a `config vdom` section the whole text is one
//!    tenant named `root`. Otherwise every `edit NAME` line whose next non-blank line
//!    opens `config system object-tagging` starts a tenant, which runs until the next
//!    such start. Tenants lacking that inner marker are not found; this heuristic is
//!    known to be fragile and is reported through [`ParseWarning`] when it finds nothing.
//! 2. **Block scanning.** A line state machine inside each tenant:
//!
//! ```text
//! Outside --"config firewall X"--> InTypeBlock --edit "NAME"--> InObject
//!    ^                               |    ^                       |
//!    +------- "end" / "config ..." --+    +-------- "next" -------+
//! ```
//!
//! An object still open when its block closes is unmatched and dropped.

use std::fmt::{self, Display, Formatter};
use std::path::Path;

use serde::Serialize;

use crate::model::{PropertyMap, TenantMap, TypeMap};
use crate::normalize::{normalize_property, NormalizeOptions};
use crate::source::{load_file, SourceError};

/// Line marking a multi-tenant (multi-VDOM) configuration.
pub const MULTI_TENANT_MARKER: &str = "config vdom";
/// Section expected as the first thing inside every tenant scope.
pub const TENANT_SCOPE_MARKER: &str = "config system object-tagging";
/// Implicit tenant of a single-VDOM configuration.
pub const DEFAULT_TENANT: &str = "root";
/// Tenant name used when segmentation could not find any tenant start.
pub const UNRESOLVED_TENANT: &str = "unresolved";

const FIREWALL_OPENER: &str = "config firewall ";
const BLOCK_TERMINATOR: &str = "end";
const OBJECT_TERMINATOR: &str = "next";

/// Non-fatal issues found while parsing one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseWarning {
    /// A `config vdom` section exists but no tenant carried the scope marker, so the
    /// whole text was parsed as one `unresolved` tenant.
    UnresolvedTenants,
}

impl Display for ParseWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseWarning::UnresolvedTenants => write!(
                f,
                "'{MULTI_TENANT_MARKER}' present but no tenant scope starts with \
                 '{TENANT_SCOPE_MARKER}'; parsed as a single '{UNRESOLVED_TENANT}' tenant"
            ),
        }
    }
}

/// Result of parsing one source.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedConfig {
    /// Whether the multi-tenant marker was found.
    pub multi_tenant: bool,
    /// Tenant → type → object → normalized properties.
    pub tenants: TenantMap,
    pub warnings: Vec<ParseWarning>,
}

impl ParsedConfig {
    /// Total number of objects over all tenants and types.
    pub fn object_count(&self) -> usize {
        self.tenants
            .values()
            .flat_map(|types| types.values())
            .map(|objects| objects.len())
            .sum()
    }
}

/// A tenant's slice of the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenantSegment<'a> {
    pub name: &'a str,
    pub text: &'a str,
}

/// Parse configuration text into normalized tenant/type/object maps.
pub fn parse(text: &str, opts: &NormalizeOptions) -> ParsedConfig {
    let mut parsed = ParsedConfig {
        multi_tenant: is_multi_tenant(text),
        ..ParsedConfig::default()
    };

    let segments = if parsed.multi_tenant {
        let found = find_tenant_segments(text);
        if found.is_empty() {
            tracing::debug!("{}", ParseWarning::UnresolvedTenants);
            parsed.warnings.push(ParseWarning::UnresolvedTenants);
            vec![TenantSegment {
                name: UNRESOLVED_TENANT,
                text,
            }]
        } else {
            found
        }
    } else {
        vec![TenantSegment {
            name: DEFAULT_TENANT,
            text,
        }]
    };

    for segment in segments {
        let types = parsed.tenants.entry(segment.name.to_string()).or_default();
        let dropped = scan_blocks(segment.text, opts, types);
        if dropped > 0 {
            tracing::debug!(
                tenant = segment.name,
                dropped,
                "skipped unterminated object(s)"
            );
        }
    }

    tracing::debug!(
        tenants = parsed.tenants.len(),
        objects = parsed.object_count(),
        "parsed configuration"
    );
    parsed
}

/// Read and parse a configuration file.
pub fn parse_file(path: &Path, opts: &NormalizeOptions) -> Result<ParsedConfig, SourceError> {
    let text = load_file(path)?;
    Ok(parse(&text, opts))
}

/// Whether `text` contains a `config vdom` line.
pub fn is_multi_tenant(text: &str) -> bool {
    text.lines().any(|line| line.trim() == MULTI_TENANT_MARKER)
}

/// Locate tenant scopes: `edit NAME` lines immediately followed by the scope marker.
///
/// Each segment runs from its `edit` line to the start of the next segment, or the
/// end of the text.
pub fn find_tenant_segments(text: &str) -> Vec<TenantSegment<'_>> {
    let lines: Vec<(usize, &str)> = line_offsets(text).collect();
    let mut starts: Vec<(usize, &str)> = Vec::new();

    for (idx, (offset, line)) in lines.iter().enumerate() {
        let Some(name) = tenant_edit_target(line.trim()) else {
            continue;
        };
        let next = lines[idx + 1..]
            .iter()
            .map(|(_, l)| l.trim())
            .find(|l| !l.is_empty());
        if next.is_some_and(|l| l.starts_with(TENANT_SCOPE_MARKER)) {
            starts.push((*offset, name));
        }
    }

    starts
        .iter()
        .enumerate()
        .map(|(idx, &(start, name))| {
            let end = starts.get(idx + 1).map_or(text.len(), |(next, _)| *next);
            TenantSegment {
                name,
                text: &text[start..end],
            }
        })
        .collect()
}

enum ScanState<'a> {
    Outside,
    InTypeBlock {
        object_type: &'a str,
    },
    InObject {
        object_type: &'a str,
        name: &'a str,
        props: PropertyMap,
    },
}

/// Scan one tenant's text and merge its typed blocks into `types`.
///
/// Returns the number of objects dropped for lack of a `next` terminator.
fn scan_blocks(text: &str, opts: &NormalizeOptions, types: &mut TypeMap) -> usize {
    let mut state = ScanState::Outside;
    let mut dropped = 0;
    let mut lines = text.lines();

    while let Some(raw_line) = lines.next() {
        let line = raw_line.trim();

        state = match state {
            ScanState::Outside => open_block(line, types),
            ScanState::InTypeBlock { object_type } => {
                if is_opener(line) || line == BLOCK_TERMINATOR {
                    open_block(line, types)
                } else if let Some(name) = object_edit_name(line) {
                    ScanState::InObject {
                        object_type,
                        name,
                        props: PropertyMap::new(),
                    }
                } else {
                    ScanState::InTypeBlock { object_type }
                }
            }
            ScanState::InObject {
                object_type,
                name,
                mut props,
            } => {
                if line == OBJECT_TERMINATOR {
                    types
                        .entry(object_type.to_string())
                        .or_default()
                        .insert(name.to_string(), props);
                    ScanState::InTypeBlock { object_type }
                } else if is_opener(line) || line == BLOCK_TERMINATOR {
                    dropped += 1;
                    tracing::debug!(
                        object_type,
                        object = name,
                        closed_by = line,
                        "dropped unterminated object"
                    );
                    open_block(line, types)
                } else {
                    if let Some((key, value)) = set_directive(line) {
                        let value = continue_quoted(value, &mut lines);
                        if let Some(canonical) = normalize_property(key, &value, opts) {
                            props.insert(key.to_string(), canonical);
                        }
                    }
                    ScanState::InObject {
                        object_type,
                        name,
                        props,
                    }
                }
            }
        };
    }

    if let ScanState::InObject { object_type, name, .. } = state {
        dropped += 1;
        tracing::debug!(
            object_type,
            object = name,
            "dropped object left open at end of text"
        );
    }
    dropped
}

/// Enter a typed block if `line` opens one; anything else leaves the scanner outside.
fn open_block<'a>(line: &'a str, types: &mut TypeMap) -> ScanState<'a> {
    if line.starts_with(FIREWALL_OPENER) {
        types.entry(line.to_string()).or_default();
        ScanState::InTypeBlock { object_type: line }
    } else {
        ScanState::Outside
    }
}

fn is_opener(line: &str) -> bool {
    line == "config" || line.starts_with("config ")
}

/// `edit "NAME"` → `NAME` (non-empty, up to the closing quote).
fn object_edit_name(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("edit \"")?;
    let close = rest.find('"')?;
    let name = &rest[..close];
    (!name.is_empty()).then_some(name)
}

/// `edit NAME` with a single unquoted token.
fn tenant_edit_target(line: &str) -> Option<&str> {
    let name = line.strip_prefix("edit ")?.trim();
    (!name.is_empty() && !name.contains(char::is_whitespace)).then_some(name)
}

/// `set KEY VALUE` → (`KEY`, `VALUE`); a `set` without a value is ignored.
fn set_directive(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix("set ")?.trim_start();
    let (key, value) = rest.split_once(char::is_whitespace)?;
    let value = value.trim();
    (!value.is_empty()).then_some((key, value))
}

/// Extend a value whose quoted string continues on following lines.
fn continue_quoted<'a>(first: &str, lines: &mut impl Iterator<Item = &'a str>) -> String {
    let mut value = first.to_string();
    while !quotes_balanced(&value) {
        let Some(more) = lines.next() else {
            break;
        };
        value.push('\n');
        value.push_str(more.trim_end());
    }
    value
}

fn quotes_balanced(value: &str) -> bool {
    let mut count = 0;
    let mut escaped = false;
    for c in value.chars() {
        match c {
            '\\' if !escaped => {
                escaped = true;
                continue;
            }
            '"' if !escaped => count += 1,
            _ => {}
        }
        escaped = false;
    }
    count % 2 == 0
}

fn line_offsets(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split_inclusive('\n').scan(0, |offset, chunk| {
        let start = *offset;
        *offset += chunk.len();
        Some((start, chunk.trim_end_matches(['\n', '\r'])))
    })
}
