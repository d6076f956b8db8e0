//! Seltzer Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports defined in
//! the application layer: the filesystem-plus-environment variable
//! source and the on-disk path probe.

mod probe;
mod source;

pub use probe::StdPathProbe;
pub use source::{FsVariableSource, available_sets};
