//! Seltzer Application - engines over the domain model
//!
//! This crate hosts the two engines of the toolchain: the rule-driven
//! tokenizer and the hierarchical variable resolver, plus the typed
//! accessor over resolved structures. External systems (file system,
//! process environment) are reached only through the ports defined here
//! and implemented in the infrastructure layer.

pub mod accessor;
pub mod ports;
pub mod resolver;
pub mod tokenizer;

pub use accessor::{
    AccessError, FeatureSelection, FeatureValue, TypeKind, TypeSpec, TypedValue, VarAccessor,
};
pub use ports::{
    FormatError, NullProbe, PathProbe, RawVariables, SourceError, VarFormat, VariableSource,
};
pub use resolver::{Collision, ParseError, ResolveError, VariableResolver};
pub use tokenizer::{TokenizeError, Tokenizer};
