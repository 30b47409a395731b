//! Error types and diagnostics for the compiler.
//!
//! - Error structures with source position information
//! - Specific error variants for syntax, semantic, and fatal conditions
//! - The distance-gated reporter that accumulates diagnostics during a run

pub mod errors;
pub mod reporter;

#[cfg(test)]
mod tests;
