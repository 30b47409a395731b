use std::collections::HashMap;

use log::debug;

use super::symbol::{Signature, Type};

/// Procedure signatures keyed by label, so that shadowed procedures with the
/// same name keep separate entries.
#[derive(Debug, Default)]
pub struct SignatureRegistry {
    signatures: HashMap<String, Signature>,
}

impl SignatureRegistry {
    pub fn new() -> Self {
        SignatureRegistry::default()
    }

    pub fn register(&mut self, label: &str, name: &str, params: Vec<Type>, return_type: Type) {
        debug!("signature {}({:?}) -> {}", label, params, return_type);
        self.signatures.insert(
            label.to_string(),
            Signature {
                name: name.to_string(),
                params,
                return_type,
            },
        );
    }

    pub fn get(&self, label: &str) -> Option<&Signature> {
        self.signatures.get(label)
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}
