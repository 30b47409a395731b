use crate::{
    compiler::emitter::Emitter,
    errors::reporter::Reporter,
    flatten::{arrays::ArrayRegistry, structs::StructTable},
    symbols::{scope::ScopeStack, signatures::SignatureRegistry},
    Options,
};

/// All mutable state of one compilation unit.
///
/// A session is created per translation and consumed when the listing is
/// finished; nothing is shared between compilations.
#[derive(Debug, Default)]
pub struct Session {
    pub scopes: ScopeStack,
    pub structs: StructTable,
    pub arrays: ArrayRegistry,
    pub signatures: SignatureRegistry,
    pub emitter: Emitter,
    pub reporter: Reporter,
}

impl Session {
    pub fn new(options: Options) -> Self {
        Session {
            reporter: Reporter::new(options.min_error_distance),
            ..Session::default()
        }
    }
}
