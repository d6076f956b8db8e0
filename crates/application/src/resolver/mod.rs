//! Hierarchical variable resolution
//!
//! Resolves a named variable set into one fully-merged structure:
//! raw content comes from a [`VariableSource`](crate::ports::VariableSource),
//! [`parser`] turns it into a value and extracts the inheritance
//! directive, parents are resolved recursively with collision detection
//! ([`merge`]), and [`engine`] orchestrates the whole walk.
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//! use seltzer_application::resolver::VariableResolver;
//! # use seltzer_application::ports::{RawVariables, SourceError, VariableSource};
//! # struct SomeSource;
//! # impl VariableSource for SomeSource {
//! #     fn read(&self, _: &Path, _: &str) -> Result<Option<RawVariables>, SourceError> {
//! #         Ok(None)
//! #     }
//! # }
//!
//! let resolver = VariableResolver::new(SomeSource);
//! let vars = resolver.resolve(Path::new("vars"), "production")?;
//! # Ok::<(), seltzer_application::resolver::ResolveError>(())
//! ```

pub mod engine;
pub mod merge;
pub mod parser;

pub use engine::{ResolveError, VariableResolver};
pub use merge::{Collision, find_collisions, merge_parents};
pub use parser::{ParseError, parse_parents, parse_variables};
