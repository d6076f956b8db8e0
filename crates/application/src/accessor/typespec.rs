//! Type specifications for typed variable lookups
//!
//! A [`TypeSpec`] names one of the seven supported kinds plus two
//! orthogonal flags: `nullable` (a present `null` short-circuits to
//! "no value") and `strict` (validate the raw value's kind instead of
//! coercing it). The kind set is a closed enumeration; unknown tags can
//! only arrive as external input and fail at parse time.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::AccessError;

/// The seven supported target kinds for typed lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// A string value.
    String,
    /// A symbol: a string used as an identifier.
    Symbol,
    /// An integer value.
    Integer,
    /// A boolean value.
    Boolean,
    /// A filesystem path, existence unchecked unless strict.
    Path,
    /// A path that must name a regular file in strict mode.
    File,
    /// A path that must name a directory in strict mode.
    Directory,
}

impl TypeKind {
    /// The canonical lowercase tag for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Symbol => "symbol",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Path => "path",
            Self::File => "file",
            Self::Directory => "directory",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A complete type specification for one typed lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeSpec {
    /// The target kind.
    pub kind: TypeKind,
    /// When true, a present `null` yields "no value" instead of failing.
    pub nullable: bool,
    /// When true, validate the raw kind instead of coercing.
    pub strict: bool,
}

impl TypeSpec {
    /// A coercing, non-nullable spec for `kind`.
    #[must_use]
    pub const fn new(kind: TypeKind) -> Self {
        Self {
            kind,
            nullable: false,
            strict: false,
        }
    }

    /// Marks the spec nullable.
    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Switches the spec to validate-only mode.
    #[must_use]
    pub const fn strict(mut self) -> Self {
        self.strict = true;
        self
    }
}

impl FromStr for TypeSpec {
    type Err = AccessError;

    /// Parses an external type tag, optionally `?`-suffixed for
    /// nullability: `integer`, `bool?`, `str`, `dir`, ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (tag, nullable) = match s.strip_suffix('?') {
            Some(tag) => (tag, true),
            None => (s, false),
        };
        let kind = match tag {
            "string" | "str" => TypeKind::String,
            "symbol" | "sym" => TypeKind::Symbol,
            "integer" | "int" => TypeKind::Integer,
            "boolean" | "bool" => TypeKind::Boolean,
            "path" | "pth" => TypeKind::Path,
            "file" => TypeKind::File,
            "directory" | "dir" => TypeKind::Directory,
            _ => return Err(AccessError::UnsupportedType(s.to_string())),
        };
        let spec = Self::new(kind);
        Ok(if nullable { spec.nullable() } else { spec })
    }
}

/// A value that passed typed lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedValue {
    /// A string.
    Str(String),
    /// A symbol (an identifier-like string).
    Symbol(String),
    /// An integer.
    Int(i64),
    /// A boolean.
    Bool(bool),
    /// A filesystem path (for the path/file/directory kinds).
    Path(PathBuf),
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) | Self::Symbol(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Path(p) => write!(f, "{}", p.display()),
        }
    }
}
