//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the engines and external systems.
//! Each port is a trait implemented by an adapter in the infrastructure
//! layer; both engines are synchronous, so the ports are plain traits.

mod probe;
mod source;

pub use probe::{NullProbe, PathProbe};
pub use source::{FormatError, RawVariables, SourceError, VarFormat, VariableSource};
