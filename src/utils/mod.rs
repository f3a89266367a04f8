//! Helper functions shared across layers.
//!
//! - [`code_generator`] - Short code generation from a secure entropy source

pub mod code_generator;
