use fgt_objdiff_core::parser::{ParseWarning, ParsedConfig};
use serde::Serialize;

/// Per-tenant object counts of one parsed configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectReport {
    pub source: String,
    pub multi_tenant: bool,
    pub objects: usize,
    pub tenants: Vec<TenantSummary>,
    pub warnings: Vec<ParseWarning>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TenantSummary {
    pub name: String,
    pub types: Vec<TypeCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeCount {
    pub object_type: String,
    pub objects: usize,
}

/// Summarize a parsed configuration, keeping tenant and type order of appearance.
pub fn build_inspect_report(source: &str, parsed: &ParsedConfig) -> InspectReport {
    let tenants = parsed
        .tenants
        .iter()
        .map(|(name, types)| TenantSummary {
            name: name.clone(),
            types: types
                .iter()
                .map(|(object_type, objects)| TypeCount {
                    object_type: object_type.clone(),
                    objects: objects.len(),
                })
                .collect(),
        })
        .collect();

    InspectReport {
        source: source.to_string(),
        multi_tenant: parsed.multi_tenant,
        objects: parsed.object_count(),
        tenants,
        warnings: parsed.warnings.clone(),
    }
}
