use std::path::{Component, Path, PathBuf};

use anyhow::{bail, Context, Result};

/// Fail when the report path resolves to a file this run reads (a config dump or
/// the `--config` settings file).
pub fn ensure_report_path_is_free(report: &Path, inputs: &[&Path]) -> Result<()> {
    let target = resolve(report)
        .with_context(|| format!("failed to resolve report path {}", report.display()))?;

    for input in inputs {
        let read = resolve(input)
            .with_context(|| format!("failed to resolve input path {}", input.display()))?;
        if target == read {
            bail!(
                "refusing to overwrite input file: report {} matches {}",
                report.display(),
                input.display()
            );
        }
    }
    Ok(())
}

/// Absolute path with symlinks resolved for the longest existing prefix and `.`/`..`
/// folded lexically for the rest.
fn resolve(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().context("current_dir")?.join(path)
    };
    let lexical = fold_dots(&absolute);

    let mut existing = lexical.as_path();
    let mut missing = Vec::new();
    while !existing.exists() {
        let (Some(parent), Some(name)) = (existing.parent(), existing.file_name()) else {
            return Ok(lexical);
        };
        missing.push(name.to_os_string());
        existing = parent;
    }

    let mut resolved = existing
        .canonicalize()
        .with_context(|| format!("canonicalize {}", existing.display()))?;
    resolved.extend(missing.iter().rev());
    Ok(resolved)
}

fn fold_dots(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}
