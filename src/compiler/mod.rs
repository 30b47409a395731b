//! Code generation for the stack machine.
//!
//! This module holds the instruction vocabulary and the emitter that the
//! translation driver appends to as it parses:
//!
//! - Opcodes, header directives, and the rendered listing
//! - Forward-jump labels with backpatching
//! - Global, frame, and external addressing of loads and stores
//! - The declaration header of a finished unit

pub mod emitter;
pub mod instruction;
pub mod listing;
