//! Typed access over resolved variable structures
//!
//! A [`VarAccessor`] wraps one resolved [`VarValue`] (no process-wide
//! state; every accessor call names its structure explicitly) and offers
//! dotted-path lookups, required-vs-optional access, type coercion and
//! validation, and feature gating.

mod features;
mod typespec;

use std::path::PathBuf;

use seltzer_domain::VarValue;
use thiserror::Error;

pub use features::{FeatureSelection, FeatureValue};
pub use typespec::{TypeKind, TypeSpec, TypedValue};

use crate::ports::PathProbe;

/// Errors raised by typed lookups.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessError {
    /// A required dotted-path lookup resolved to no value.
    #[error("undefined variable: `{0}`")]
    UndefinedVariable(String),

    /// Coercion or validation failed for a typed lookup.
    #[error("invalid value `{value}` for variable `{path}`: expected {expected}")]
    TypeMismatch {
        /// The dotted path that was looked up.
        path: String,
        /// The offending raw value, rendered.
        value: String,
        /// The kind the lookup asked for.
        expected: TypeKind,
    },

    /// An unrecognized type tag was requested.
    #[error("unsupported variable type: `{0}`")]
    UnsupportedType(String),

    /// The `features` key does not hold a list of feature names.
    #[error("invalid value `{value}` for variable `features`: expected a sequence")]
    InvalidFeatureList {
        /// The offending raw value, rendered.
        value: String,
    },
}

/// Dotted-path lookup and type coercion over one resolved structure.
///
/// The accessor never mutates the structure. Strict `path`/`file`/
/// `directory` lookups consult the [`PathProbe`] for on-disk existence
/// and kind.
#[derive(Debug)]
pub struct VarAccessor<'v, P> {
    vars: &'v VarValue,
    probe: P,
}

impl<'v, P: PathProbe> VarAccessor<'v, P> {
    /// Creates an accessor over `vars` with the given probe.
    pub const fn new(vars: &'v VarValue, probe: P) -> Self {
        Self { vars, probe }
    }

    /// The wrapped structure.
    #[must_use]
    pub const fn vars(&self) -> &'v VarValue {
        self.vars
    }

    /// Looks up a dotted path; absent intermediate keys yield `None`,
    /// never an error.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&'v VarValue> {
        self.vars.lookup(path)
    }

    /// Looks up a dotted path, failing when it resolves to no value.
    ///
    /// A present explicit `null` counts as no value.
    ///
    /// # Errors
    ///
    /// [`AccessError::UndefinedVariable`] when the path is absent or null.
    pub fn require(&self, path: &str) -> Result<&'v VarValue, AccessError> {
        match self.get(path) {
            None | Some(VarValue::Null) => Err(AccessError::UndefinedVariable(path.to_string())),
            Some(value) => Ok(value),
        }
    }

    /// Looks up a dotted path and coerces (or, in strict mode, validates)
    /// the value to the requested kind.
    ///
    /// An absent path yields `Ok(None)`. A present `null` yields
    /// `Ok(None)` under a nullable spec, without coercion; under a
    /// non-nullable spec it is a mismatch like any other wrong kind.
    ///
    /// # Errors
    ///
    /// [`AccessError::TypeMismatch`] when the value cannot satisfy the
    /// spec.
    pub fn get_typed(
        &self,
        path: &str,
        spec: &TypeSpec,
    ) -> Result<Option<TypedValue>, AccessError> {
        let Some(raw) = self.get(path) else {
            return Ok(None);
        };
        if raw.is_null() && spec.nullable {
            return Ok(None);
        }
        self.coerce(path, raw, spec).map(Some)
    }

    /// As [`VarAccessor::get_typed`], but failing when the lookup yields
    /// no value.
    ///
    /// # Errors
    ///
    /// [`AccessError::UndefinedVariable`] when absent (or null under a
    /// nullable spec); [`AccessError::TypeMismatch`] as for `get_typed`.
    pub fn require_typed(&self, path: &str, spec: &TypeSpec) -> Result<TypedValue, AccessError> {
        self.get_typed(path, spec)?
            .ok_or_else(|| AccessError::UndefinedVariable(path.to_string()))
    }

    /// Reports whether `feature` is listed in the required `features` key.
    ///
    /// # Errors
    ///
    /// [`AccessError::UndefinedVariable`] when `features` is missing,
    /// [`AccessError::InvalidFeatureList`] when it is not a sequence.
    pub fn has_feature(&self, feature: &str) -> Result<bool, AccessError> {
        let features = self.require("features")?;
        let Some(items) = features.as_sequence() else {
            return Err(AccessError::InvalidFeatureList {
                value: features.to_string(),
            });
        };
        Ok(items.iter().any(|item| item.as_str() == Some(feature)))
    }

    /// Filters `choices` down to the entries whose feature is enabled,
    /// evaluating producers only for those, and returns the selection
    /// with the given render separator.
    ///
    /// # Errors
    ///
    /// As [`VarAccessor::has_feature`].
    pub fn select_for_features<I, S>(
        &self,
        choices: I,
        separator: Option<&str>,
    ) -> Result<FeatureSelection, AccessError>
    where
        I: IntoIterator<Item = (S, FeatureValue)>,
        S: AsRef<str>,
    {
        let mut items = Vec::new();
        for (feature, value) in choices {
            if self.has_feature(feature.as_ref())? {
                items.push(value.evaluate());
            }
        }
        Ok(FeatureSelection::new(items, separator))
    }

    /// Applies the coercion/validation table to one raw value.
    ///
    /// Non-strict string and symbol coercion stringifies scalars only;
    /// sequences and mappings are a mismatch rather than being rendered
    /// to text.
    fn coerce(
        &self,
        path: &str,
        raw: &VarValue,
        spec: &TypeSpec,
    ) -> Result<TypedValue, AccessError> {
        let mismatch = || AccessError::TypeMismatch {
            path: path.to_string(),
            value: raw.to_string(),
            expected: spec.kind,
        };

        match spec.kind {
            TypeKind::String | TypeKind::Symbol => {
                let text = if spec.strict {
                    raw.as_str().map(ToString::to_string).ok_or_else(&mismatch)?
                } else {
                    scalar_text(raw).ok_or_else(&mismatch)?
                };
                Ok(match spec.kind {
                    TypeKind::String => TypedValue::Str(text),
                    _ => TypedValue::Symbol(text),
                })
            }
            TypeKind::Integer => match raw {
                VarValue::Int(i) => Ok(TypedValue::Int(*i)),
                VarValue::String(s) if !spec.strict => {
                    s.trim().parse().map(TypedValue::Int).map_err(|_| mismatch())
                }
                VarValue::Float(x) if !spec.strict && x.fract() == 0.0 => {
                    Ok(TypedValue::Int(x.into_inner() as i64))
                }
                _ => Err(mismatch()),
            },
            TypeKind::Boolean => match raw {
                VarValue::Bool(b) => Ok(TypedValue::Bool(*b)),
                VarValue::String(s) if !spec.strict && s == "true" => Ok(TypedValue::Bool(true)),
                VarValue::String(s) if !spec.strict && s == "false" => Ok(TypedValue::Bool(false)),
                _ => Err(mismatch()),
            },
            TypeKind::Path | TypeKind::File | TypeKind::Directory => {
                let text = scalar_text(raw).ok_or_else(&mismatch)?;
                let path_value = PathBuf::from(text);
                if spec.strict {
                    let ok = match spec.kind {
                        TypeKind::Path => self.probe.exists(&path_value),
                        TypeKind::File => self.probe.is_file(&path_value),
                        _ => self.probe.is_dir(&path_value),
                    };
                    if !ok {
                        return Err(mismatch());
                    }
                }
                Ok(TypedValue::Path(path_value))
            }
        }
    }
}

/// Renders a scalar to text for coercion; sequences, mappings, and null
/// have no scalar text.
fn scalar_text(value: &VarValue) -> Option<String> {
    match value {
        VarValue::Bool(_) | VarValue::Int(_) | VarValue::Float(_) | VarValue::String(_) => {
            Some(value.to_string())
        }
        _ => None,
    }
}
