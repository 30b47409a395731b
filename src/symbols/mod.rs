//! Scope and symbol management.
//!
//! Names resolve innermost-first through a stack of insertion-ordered
//! scopes, falling back to the external declarations. Storage offsets are
//! assigned at declaration time and procedures get labels composed from
//! the names of the procedures enclosing them.

pub mod scope;
pub mod signatures;
pub mod symbol;

#[cfg(test)]
mod tests;
