//! Variable resolution engine
//!
//! Orchestrates source lookup, parsing, recursive parent resolution, and
//! merging into one fully-resolved structure per call. Resolution either
//! fully succeeds or fully fails; nothing is cached across calls.

use std::path::Path;

use seltzer_domain::VarValue;
use thiserror::Error;

use super::{merge, parser};
use crate::ports::{SourceError, VariableSource};

/// Errors raised while resolving a variable set.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No file or environment fallback exists for the requested name.
    #[error("undefined variable set: `{0}`")]
    UndefinedVariableSet(String),

    /// The set's raw content could not be parsed under its format.
    #[error("invalid variables `{name}`: {source}")]
    InvalidContent {
        /// The variable-set name whose content is malformed.
        name: String,
        /// The underlying parse failure.
        #[source]
        source: parser::ParseError,
    },

    /// Two sibling parents disagree on a shared key's value.
    #[error("inconsistent variables specification:\n{}", merge::format_collisions(.0))]
    InconsistentVariables(Vec<merge::Collision>),

    /// Parent declarations form a cycle.
    #[error("cyclic inheritance: {}", .0.join(" -> "))]
    CyclicInheritance(Vec<String>),

    /// Reading from the variable source failed.
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// The top-level entry point of the variable engine.
///
/// Resolution walks: source -> parse self -> extract parents -> resolve
/// each parent recursively (with fail-fast collision detection after each
/// one) -> merge parents left to right -> merge self over the parents.
/// Self always wins over parents; only sibling parents can collide.
#[derive(Debug)]
pub struct VariableResolver<S> {
    source: S,
}

impl<S: VariableSource> VariableResolver<S> {
    /// Creates a resolver reading raw variable sets from `source`.
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// Resolves `name` into one fully-merged variable structure.
    ///
    /// # Errors
    ///
    /// See [`ResolveError`]; every failure is terminal and nothing is
    /// retried internally.
    pub fn resolve(&self, vars_dir: &Path, name: &str) -> Result<VarValue, ResolveError> {
        let mut chain = Vec::new();
        self.resolve_chained(vars_dir, name, &mut chain)
    }

    /// Recursive resolution step. `chain` holds the names currently being
    /// resolved, outermost first; re-entering one of them is a cycle.
    fn resolve_chained(
        &self,
        vars_dir: &Path,
        name: &str,
        chain: &mut Vec<String>,
    ) -> Result<VarValue, ResolveError> {
        if chain.iter().any(|ancestor| ancestor == name) {
            let mut cycle = chain.clone();
            cycle.push(name.to_string());
            return Err(ResolveError::CyclicInheritance(cycle));
        }

        tracing::debug!(name, "resolving variable set");
        let raw = self
            .source
            .read(vars_dir, name)?
            .ok_or_else(|| ResolveError::UndefinedVariableSet(name.to_string()))?;

        let self_vars = parser::parse_variables(raw.format, &raw.content).map_err(|source| {
            ResolveError::InvalidContent {
                name: name.to_string(),
                source,
            }
        })?;
        let parents = parser::parse_parents(raw.format, &raw.content);
        if !parents.is_empty() {
            tracing::debug!(name, ?parents, "inheriting from parents");
        }

        chain.push(name.to_string());
        let resolved = self.resolve_parents(vars_dir, &parents, chain);
        chain.pop();

        let parent_vars = merge::merge_parents(resolved?);
        Ok(VarValue::deep_merge(parent_vars, self_vars))
    }

    /// Resolves parents in declared order, checking all pairwise
    /// collisions among the parents resolved so far before adding the
    /// next one (fail-fast diamond detection).
    fn resolve_parents(
        &self,
        vars_dir: &Path,
        parents: &[String],
        chain: &mut Vec<String>,
    ) -> Result<Vec<VarValue>, ResolveError> {
        let mut resolved = Vec::with_capacity(parents.len());
        for parent in parents {
            resolved.push(self.resolve_chained(vars_dir, parent, chain)?);
            let collisions = merge::find_collisions(&resolved);
            if !collisions.is_empty() {
                return Err(ResolveError::InconsistentVariables(collisions));
            }
        }
        Ok(resolved)
    }
}
