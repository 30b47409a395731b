//! Static type checking.
//!
//! There is no separate checking pass: the translation driver consults
//! these rules while it emits code, reports any error, and continues with
//! a fallback type so that one mistake does not cascade.

pub mod type_checker;
