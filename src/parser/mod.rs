//! The translation driver.
//!
//! Recursive descent over the token stream with one token of lookahead.
//! Expressions use a Pratt parser with NUD (null denotation) and LED (left
//! denotation) handlers and binding powers for precedence. Every rule acts
//! as it parses:
//!
//! - Declarations populate scopes, flattening arrays and structs
//! - Expressions are type checked and leave their value on the stack
//! - Statements emit control flow through the emitter's label stack
//! - Errors go to the session's reporter and parsing carries on

pub mod decl;
pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
