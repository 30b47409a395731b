//! Declaration flattening.
//!
//! Arrays and struct instances are expanded at declaration time into one
//! scalar symbol per element or member. Composite names are built the same
//! way a designator is spelled in source (`a[1][0]`, `p.pos.x`), which is
//! how later uses find them.

pub mod arrays;
pub mod structs;

#[cfg(test)]
mod tests;
