use std::collections::HashMap;

use log::debug;

use crate::symbols::symbol::{Kind, Type};

/// Joins an instance or embedding member name to the member path beneath it.
pub const MEMBER_SEPARATOR: &str = ".";

#[derive(Debug, Clone, PartialEq)]
pub struct StructMember {
    /// Dotted path below the struct, e.g. `pos.x`.
    pub path: String,
    pub ty: Type,
    pub kind: Kind,
}

/// An ordered, already flattened member map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructDef {
    pub name: String,
    members: Vec<StructMember>,
}

impl StructDef {
    pub fn new(name: &str) -> Self {
        StructDef {
            name: name.to_string(),
            members: vec![],
        }
    }

    pub fn add_member(&mut self, path: &str, ty: Type) {
        self.members.push(StructMember {
            path: path.to_string(),
            ty,
            kind: Kind::Var,
        });
    }

    /// Copies every member of `inner` under `member_name`.
    pub fn embed(&mut self, member_name: &str, inner: &StructDef) {
        for member in inner.members.iter() {
            self.members.push(StructMember {
                path: format!("{}{}{}", member_name, MEMBER_SEPARATOR, member.path),
                ty: member.ty,
                kind: member.kind,
            });
        }
    }

    pub fn members(&self) -> &[StructMember] {
        &self.members
    }

    pub fn member(&self, path: &str) -> Option<&StructMember> {
        self.members.iter().find(|m| m.path == path)
    }
}

/// Struct definitions by type name. A name is defined at most once; the
/// first definition is kept.
#[derive(Debug, Default)]
pub struct StructTable {
    defs: HashMap<String, StructDef>,
}

impl StructTable {
    pub fn new() -> Self {
        StructTable::default()
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.defs.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&StructDef> {
        self.defs.get(name)
    }

    /// Adds `def`, returning false (and leaving the table untouched) if its name is taken.
    pub fn define(&mut self, def: StructDef) -> bool {
        if self.defs.contains_key(&def.name) {
            debug!("struct {} already defined, keeping the first definition", def.name);
            return false;
        }
        debug!("struct {} with {} member(s)", def.name, def.members.len());
        self.defs.insert(def.name.clone(), def);
        true
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

/// The scalar members an instance named `instance` expands to, in member order.
pub fn instance_members(instance: &str, def: &StructDef) -> Vec<StructMember> {
    def.members
        .iter()
        .map(|member| StructMember {
            path: format!("{}{}{}", instance, MEMBER_SEPARATOR, member.path),
            ty: member.ty,
            kind: member.kind,
        })
        .collect()
}
