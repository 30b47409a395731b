use std::collections::HashSet;

use log::debug;

use crate::symbols::symbol::Type;

/// Most scalars a single array declaration may flatten into.
pub const MAX_ELEMENTS: usize = 1 << 16;

/// Composite names for every element of an array with inclusive `bounds`.
///
/// Each bound `b` admits indices `0..=b`. Names come out in row-major order,
/// so the last dimension varies fastest: `a[0][0]`, `a[0][1]`, ..., `a[1][0]`.
/// Returns `None` when the element count exceeds `MAX_ELEMENTS`.
pub fn element_names(base: &str, bounds: &[usize]) -> Option<Vec<String>> {
    let extents = bounds
        .iter()
        .map(|b| b.checked_add(1))
        .collect::<Option<Vec<usize>>>()?;
    let total = extents
        .iter()
        .try_fold(1usize, |total, extent| total.checked_mul(*extent))
        .filter(|total| *total <= MAX_ELEMENTS)?;

    let mut names = Vec::with_capacity(total);
    for element in 0..total {
        let mut name = base.to_string();
        let mut period = total;
        for extent in extents.iter() {
            period /= extent;
            let index = (element / period) % extent;
            name.push_str(&format!("[{}]", index));
        }
        names.push(name);
    }

    debug!("flattened {}{:?} into {} element(s)", base, bounds, names.len());
    Some(names)
}

/// Every array declared so far, by `(name, element type, dimension count)`.
#[derive(Debug, Default)]
pub struct ArrayRegistry {
    declared: HashSet<(String, Type, usize)>,
}

impl ArrayRegistry {
    pub fn new() -> Self {
        ArrayRegistry::default()
    }

    /// Records an array, returning false if the same triple was already declared.
    pub fn register(&mut self, name: &str, ty: Type, dimensions: usize) -> bool {
        self.declared.insert((name.to_string(), ty, dimensions))
    }

    pub fn contains(&self, name: &str, ty: Type, dimensions: usize) -> bool {
        self.declared.contains(&(name.to_string(), ty, dimensions))
    }
}
