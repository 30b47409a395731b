use std::fmt::Display;

/// What a name denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Const,
    Var,
    /// Struct instances are expanded into `Var` members at declaration, so
    /// no symbol of this kind is ever stored in a scope.
    Struct,
    Proc,
}

impl Kind {
    /// Consts and vars occupy a storage slot; everything else is addressed by label or name.
    pub fn has_storage(&self) -> bool {
        matches!(self, Kind::Const | Kind::Var)
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Kind::Const => write!(f, "const"),
            Kind::Var => write!(f, "var"),
            Kind::Struct => write!(f, "struct"),
            Kind::Proc => write!(f, "procedure"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Undefined,
    Integer,
    Boolean,
    /// The struct's name travels separately, through the struct table.
    StructRef,
}

impl Type {
    /// Numeric tag used by the `.var` / `.external` directives.
    pub fn tag(&self) -> u8 {
        match self {
            Type::Undefined => 0,
            Type::Integer => 1,
            Type::Boolean => 2,
            Type::StructRef => 3,
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Undefined => write!(f, "undefined"),
            Type::Integer => write!(f, "int"),
            Type::Boolean => write!(f, "bool"),
            Type::StructRef => write!(f, "struct"),
        }
    }
}

/// A declared name with its storage address.
///
/// `frame_depth == 0` places the symbol in global storage. Otherwise it
/// lives at `offset` in the frame of the procedure opened at that depth.
/// Procedures have no storage and carry `offset == None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub kind: Kind,
    pub ty: Type,
    pub frame_depth: usize,
    pub offset: Option<usize>,
}

impl Symbol {
    pub fn is_global(&self) -> bool {
        self.frame_depth == 0
    }
}

/// Static shape of a procedure, checked at every call site.
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    pub name: String,
    pub params: Vec<Type>,
    pub return_type: Type,
}

impl Signature {
    pub fn param_count(&self) -> usize {
        self.params.len()
    }
}
