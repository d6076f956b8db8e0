//! Variable source port
//!
//! Resolves a variable-set name to raw, unparsed content plus the format
//! it is written in. Adapters decide where the bytes come from (a vars
//! directory on disk, an environment fallback, an in-memory fixture).

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

/// The format a variable set's raw content is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarFormat {
    /// YAML content (`.yaml` / `.yml` files).
    Yaml,
    /// JSON content (`.json` files and environment fallbacks).
    Json,
}

impl VarFormat {
    /// The canonical lowercase tag for this format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for VarFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VarFormat {
    type Err = FormatError;

    /// Parses an external format tag. Internal code never round-trips
    /// through strings; this exists for tags arriving from the CLI.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            other => Err(FormatError::Unrecognized(other.to_string())),
        }
    }
}

/// Error for format tags outside the supported set.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The tag names no supported format.
    #[error("unrecognized format: `{0}`")]
    Unrecognized(String),
}

/// Raw content of a variable set before parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawVariables {
    /// The declared format of `content`.
    pub format: VarFormat,
    /// The unparsed content, inheritance directive included.
    pub content: String,
}

/// Errors raised while reading a variable source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// An underlying read failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Port resolving a variable-set name to raw `(format, content)`.
pub trait VariableSource {
    /// Reads the raw content for `name`, or `None` when no source exists
    /// for it anywhere the adapter looks.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] only for genuine read failures; a missing
    /// set is `Ok(None)`, which the resolver turns into its own error.
    fn read(&self, vars_dir: &Path, name: &str) -> Result<Option<RawVariables>, SourceError>;
}

impl<S: VariableSource + ?Sized> VariableSource for &S {
    fn read(&self, vars_dir: &Path, name: &str) -> Result<Option<RawVariables>, SourceError> {
        (**self).read(vars_dir, name)
    }
}
