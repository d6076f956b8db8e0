//! Seltzer Domain - Core value and token types
//!
//! This crate defines the domain model for the Seltzer toolchain:
//! lexical rules and tokens on one side, nested variable values on the
//! other. All types here are pure Rust with no I/O dependencies.

pub mod token;
pub mod value;

pub use token::{RuleAction, RuleError, RuleSet, Token, TokenRule};
pub use value::{Mapping, VarValue};
