use std::fmt::{self, Display, Formatter};
use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;

/// Property name → canonical value, in `set` line order.
pub type PropertyMap = IndexMap<String, String>;

/// Object name → properties for one typed block.
pub type ObjectMap = IndexMap<String, PropertyMap>;

/// Object type (first line of the block, e.g. `config firewall address`) → objects.
pub type TypeMap = IndexMap<String, ObjectMap>;

/// Tenant (VDOM) name → typed blocks.
pub type TenantMap = IndexMap<String, TypeMap>;

/// One comparison axis: a tenant inside one source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Column {
    /// Source identifier as supplied by the caller (usually a file path).
    pub source: String,
    /// Tenant (VDOM) name.
    pub tenant: String,
}

impl Column {
    pub fn new(source: impl Into<String>, tenant: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            tenant: tenant.into(),
        }
    }

    /// Final path component of the source identifier.
    pub fn source_name(&self) -> &str {
        Path::new(&self.source)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.source)
    }

    /// Two-line header label: `"{basename}\n[{tenant}]"`.
    pub fn label(&self) -> String {
        format!("{}\n[{}]", self.source_name(), self.tenant)
    }

    /// Like [`Column::label`] but with the full source identifier.
    pub fn qualified_label(&self) -> String {
        format!("{}\n[{}]", self.source, self.tenant)
    }
}

impl Display for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.source_name(), self.tenant)
    }
}

/// Identity of a firewall object across all columns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ObjectKey {
    /// Open type identifier; any block opener text is valid.
    pub object_type: String,
    /// Object name as written between the `edit` quotes.
    pub name: String,
}

impl ObjectKey {
    pub fn new(object_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            object_type: object_type.into(),
            name: name.into(),
        }
    }
}

impl Display for ObjectKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} \"{}\"", self.object_type, self.name)
    }
}
