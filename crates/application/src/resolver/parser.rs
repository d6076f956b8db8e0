//! Variable content parsing
//!
//! Turns raw `(format, content)` pairs into [`VarValue`] structures and
//! extracts the inheritance directive embedded as a leading comment line:
//!
//! ```text
//! # => inherits: base, linux <= #     (YAML)
//! /* => inherits: base, linux <= */   (JSON)
//! ```

use std::sync::LazyLock;

use regex::Regex;
use seltzer_domain::VarValue;
use thiserror::Error;

use crate::ports::VarFormat;

#[allow(clippy::unwrap_used)]
static YAML_PARENTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^#\s*=>\s*inherits\s*(?::\s+)?(?P<parents>.+?)\s*<=\s*#").unwrap()
});

#[allow(clippy::unwrap_used)]
static JSON_PARENTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^/\*\s*=>\s*inherits\s*(?::\s+)?(?P<parents>.+?)\s*<=\s*\*/").unwrap()
});

/// Placeholder parent names meaning "no parents".
#[allow(clippy::unwrap_used)]
static NO_PARENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)none|nothing").unwrap());

/// Error raised when content cannot be parsed under its declared format.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The content is not valid under `format`.
    #[error("invalid {format} content: {message}")]
    InvalidContent {
        /// The declared format.
        format: VarFormat,
        /// The format parser's diagnostic.
        message: String,
    },
}

/// Parses raw content into a nested value according to `format`.
///
/// Empty or comment-only YAML documents parse to an empty mapping. For
/// JSON the inheritance directive line is stripped first; the directive
/// is not valid JSON and is metadata, not data.
///
/// # Errors
///
/// Returns [`ParseError::InvalidContent`] for malformed content.
pub fn parse_variables(format: VarFormat, content: &str) -> Result<VarValue, ParseError> {
    let parsed = match format {
        VarFormat::Yaml => {
            if yaml_is_effectively_empty(content) {
                return Ok(VarValue::empty_mapping());
            }
            serde_yaml::from_str(content).map_err(|e| ParseError::InvalidContent {
                format,
                message: e.to_string(),
            })?
        }
        VarFormat::Json => {
            let body = JSON_PARENTS.replace(content, "");
            serde_json::from_str(body.trim()).map_err(|e| ParseError::InvalidContent {
                format,
                message: e.to_string(),
            })?
        }
    };
    // A document holding just `null` (or nothing after the directive)
    // resolves to an empty variable set rather than a null root.
    Ok(match parsed {
        VarValue::Null => VarValue::empty_mapping(),
        value => value,
    })
}

/// Extracts the declared parent names from raw content, in left-to-right
/// declaration order.
///
/// Absence of the directive means zero parents. Names matching the
/// case-insensitive `none`/`nothing` placeholder are dropped.
#[must_use]
pub fn parse_parents(format: VarFormat, content: &str) -> Vec<String> {
    let directive = match format {
        VarFormat::Yaml => &YAML_PARENTS,
        VarFormat::Json => &JSON_PARENTS,
    };
    let Some(caps) = directive.captures(content) else {
        return Vec::new();
    };
    caps["parents"]
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty() && !NO_PARENT.is_match(name))
        .map(ToString::to_string)
        .collect()
}

fn yaml_is_effectively_empty(content: &str) -> bool {
    content.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    })
}
