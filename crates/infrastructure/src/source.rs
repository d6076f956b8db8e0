//! Filesystem variable source with environment fallback
//!
//! Variable sets live as files named after the set in a vars directory,
//! the extension selecting the format:
//!
//! ```text
//! vars/
//!   base.yaml
//!   linux.yml
//!   ci.json
//! ```
//!
//! A name with no file falls back to a process environment variable of
//! exactly that name, whose content is treated as JSON.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use seltzer_application::ports::{RawVariables, SourceError, VarFormat, VariableSource};

/// The recognized file extensions, in lookup order.
const EXTENSIONS: [(&str, VarFormat); 3] = [
    ("yaml", VarFormat::Yaml),
    ("yml", VarFormat::Yaml),
    ("json", VarFormat::Json),
];

/// Reads variable sets from a vars directory, falling back to the
/// process environment.
///
/// The environment is snapshotted at construction, which keeps reads
/// consistent for the lifetime of the source and gives tests a seam
/// that does not involve mutating the process environment.
#[derive(Debug, Clone)]
pub struct FsVariableSource {
    env: HashMap<String, String>,
}

impl FsVariableSource {
    /// Creates a source backed by the current process environment.
    #[must_use]
    pub fn new() -> Self {
        Self {
            env: std::env::vars().collect(),
        }
    }

    /// Creates a source with an explicit environment overlay.
    #[must_use]
    pub fn with_env(env: HashMap<String, String>) -> Self {
        Self { env }
    }

    fn find_file(vars_dir: &Path, name: &str) -> Option<(PathBuf, VarFormat)> {
        EXTENSIONS.iter().find_map(|(ext, format)| {
            let path = vars_dir.join(format!("{name}.{ext}"));
            path.is_file().then_some((path, *format))
        })
    }
}

impl Default for FsVariableSource {
    fn default() -> Self {
        Self::new()
    }
}

impl VariableSource for FsVariableSource {
    fn read(&self, vars_dir: &Path, name: &str) -> Result<Option<RawVariables>, SourceError> {
        if let Some((path, format)) = Self::find_file(vars_dir, name) {
            tracing::debug!(name, path = %path.display(), %format, "reading variable set file");
            let content = fs::read_to_string(&path)?;
            return Ok(Some(RawVariables { format, content }));
        }

        if let Some(content) = self.env.get(name) {
            tracing::debug!(name, "using environment fallback");
            return Ok(Some(RawVariables {
                format: VarFormat::Json,
                content: content.clone(),
            }));
        }

        Ok(None)
    }
}

/// Lists the variable-set names available under `vars_dir`, sorted and
/// deduplicated (a `base.yaml`/`base.yml` pair is one set).
///
/// # Errors
///
/// Returns [`SourceError::Io`] when the directory cannot be read.
pub fn available_sets(vars_dir: &Path) -> Result<Vec<String>, SourceError> {
    let mut names = Vec::new();
    for entry in fs::read_dir(vars_dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let recognized = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| EXTENSIONS.iter().any(|(known, _)| *known == ext));
        if !recognized {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
            names.push(stem.to_string());
        }
    }
    names.sort();
    names.dedup();
    Ok(names)
}
