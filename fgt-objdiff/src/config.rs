use std::fs;
use std::path::Path;

use fgt_objdiff_core::classify::{Palette, DUPLICATE_COLORS, UNIQUE_COLOR};
use fgt_objdiff_core::normalize::{
    NormalizeOptions, ASSOCIATED_INTERFACE, DEFAULT_SORTED_LIST_PROPERTIES,
    STANDARD_EXCLUDED_PROPERTIES,
};
use fgt_objdiff_core::report::{ReportOptions, DEFAULT_TYPE_ORDER};
use serde::Deserialize;
use thiserror::Error;

/// Comparison settings read from a TOML file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompareConfig {
    pub normalize: NormalizeSection,
    pub report: ReportSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NormalizeSection {
    pub exclude_properties: Vec<String>,
    pub sorted_list_properties: Vec<String>,
    pub ignore_associated_interface: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportSection {
    pub type_order: Vec<String>,
    pub duplicate_colors: Vec<String>,
    pub unique_color: String,
}

impl Default for NormalizeSection {
    fn default() -> Self {
        Self {
            exclude_properties: owned(STANDARD_EXCLUDED_PROPERTIES),
            sorted_list_properties: owned(DEFAULT_SORTED_LIST_PROPERTIES),
            ignore_associated_interface: false,
        }
    }
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            type_order: owned(DEFAULT_TYPE_ORDER),
            duplicate_colors: owned(&DUPLICATE_COLORS),
            unique_color: UNIQUE_COLOR.to_string(),
        }
    }
}

impl CompareConfig {
    /// Normalization policy described by the `[normalize]` table.
    ///
    /// Configured exclusions extend the standard ones; `uuid` is always dropped.
    pub fn normalize_options(&self) -> NormalizeOptions {
        let mut opts = NormalizeOptions {
            sorted_list_properties: self.normalize.sorted_list_properties.clone(),
            ..NormalizeOptions::standard()
        };
        for key in &self.normalize.exclude_properties {
            opts = opts.with_excluded(key.as_str());
        }
        if self.normalize.ignore_associated_interface {
            opts = opts.with_excluded(ASSOCIATED_INTERFACE);
        }
        opts
    }

    /// Rendering options described by the `[report]` table.
    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            palette: Palette {
                duplicate: self.report.duplicate_colors.clone(),
                unique: self.report.unique_color.clone(),
            },
            type_order: self.report.type_order.clone(),
        }
    }
}

/// Errors returned when loading config files.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Load comparison settings from a TOML file. Missing keys keep their defaults.
pub fn load_config(path: &Path) -> Result<CompareConfig, ConfigLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    parse_config(&raw, path.display().to_string())
}

/// Settings compiled into the binary.
pub fn default_config() -> CompareConfig {
    let embedded = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config/default.toml"));
    parse_config(embedded, "embedded config".to_string()).unwrap_or_default()
}

fn parse_config(raw: &str, path: String) -> Result<CompareConfig, ConfigLoadError> {
    toml::from_str(raw).map_err(|source| ConfigLoadError::Parse { path, source })
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::{default_config, load_config, parse_config, CompareConfig, ConfigLoadError};
    use fgt_objdiff_core::compare_texts;
    use fgt_objdiff_core::normalize::NormalizeOptions;
    use fgt_objdiff_core::report::ReportOptions;

    #[test]
    fn embedded_config_matches_builtin_defaults() {
        let config = default_config();
        assert_eq!(config, CompareConfig::default());
        assert_eq!(config.normalize_options(), NormalizeOptions::standard());
        assert_eq!(config.report_options(), ReportOptions::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = parse_config(
            "[normalize]\nignore_associated_interface = true\n",
            "inline".to_string(),
        )
        .expect("parse");
        assert_eq!(
            config.normalize_options(),
            NormalizeOptions::ignore_associated_interface()
        );
        assert_eq!(config.report, CompareConfig::default().report);
    }

    #[test]
    fn custom_palette_and_exclusions_flow_into_options() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("objdiff.toml");
        fs::write(
            &path,
            r##"
[normalize]
exclude_properties = ["uuid", "color"]

[report]
duplicate_colors = ["#000001"]
unique_color = "#ff0000"
"##,
        )
        .expect("write config");

        let config = load_config(&path).expect("load");
        let normalize = config.normalize_options();
        assert!(normalize.is_excluded("COLOR"));
        assert!(normalize.is_sorted_list("member"));

        let report = config.report_options();
        assert_eq!(report.palette.duplicate_color(5), "#000001");
        assert_eq!(report.palette.unique, "#ff0000");
    }

    #[test]
    fn configured_exclusions_cannot_drop_uuid_exclusion() {
        let config = parse_config(
            "[normalize]\nexclude_properties = [\"color\"]\n",
            "inline".to_string(),
        )
        .expect("parse");
        let opts = config.normalize_options();
        assert_eq!(opts.excluded_properties, vec!["uuid", "color"]);

        let a = "config firewall address\n    edit \"h\"\n        set uuid aaaa\n        set color 3\n    next\nend\n";
        let b = "config firewall address\n    edit \"h\"\n        set uuid bbbb\n    next\nend\n";
        let run = compare_texts([("a.conf", a), ("b.conf", b)], &opts).expect("two columns");
        assert!(run.diffs.is_empty());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = parse_config("[normalize]\nexclude = [\"uuid\"]\n", "bad.toml".to_string())
            .expect_err("unknown key");
        assert!(matches!(err, ConfigLoadError::Parse { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().expect("tempdir");
        let err = load_config(&dir.path().join("absent.toml")).expect_err("missing");
        assert!(matches!(err, ConfigLoadError::Io { .. }));
    }
}
