use log::debug;

use super::symbol::{Kind, Symbol, Type};

/// Joins procedure names into a label.
pub const LABEL_SEPARATOR: &str = "$";

/// Insertion-ordered symbols of one procedure (or of the program).
///
/// Duplicate names are allowed; lookups scan from the most recent
/// declaration backwards so the latest one wins.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    symbols: Vec<Symbol>,
}

impl Scope {
    pub fn new() -> Self {
        Scope::default()
    }

    pub fn push(&mut self, symbol: Symbol) {
        self.symbols.push(symbol);
    }

    /// Number of symbols holding a storage slot (consts and vars).
    pub fn storage_count(&self) -> usize {
        self.symbols.iter().filter(|s| s.kind.has_storage()).count()
    }

    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.symbols.iter().rev().find(|s| s.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// A successful name lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub symbol: Symbol,
    /// Found among the external declarations, so addressed by name.
    pub external: bool,
}

/// The stack of open scopes, the external declarations, and the names of
/// the procedures currently being declared.
///
/// `depth()` is the current lexical nesting level: 1 inside the program
/// body, 2 inside a top-level procedure, and so on.
#[derive(Debug, Default)]
pub struct ScopeStack {
    scopes: Vec<Scope>,
    externals: Scope,
    open_procedures: Vec<String>,
}

impl ScopeStack {
    pub fn new() -> Self {
        ScopeStack::default()
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn open_scope(&mut self) {
        self.scopes.push(Scope::new());
    }

    pub fn close_scope(&mut self) -> Option<Scope> {
        self.scopes.pop()
    }

    pub fn current(&self) -> Option<&Scope> {
        self.scopes.last()
    }

    pub fn global(&self) -> Option<&Scope> {
        self.scopes.first()
    }

    pub fn externals(&self) -> &Scope {
        &self.externals
    }

    fn current_mut(&mut self) -> &mut Scope {
        if self.scopes.is_empty() {
            self.open_scope();
        }
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }

    /// Declares a const or var in the innermost scope at its next free offset.
    pub fn declare_local(&mut self, name: &str, kind: Kind, ty: Type) -> Symbol {
        let scope = self.current_mut();
        let offset = scope.storage_count();
        let frame_depth = self.depth() - 1;

        self.push_symbol(name, kind, ty, frame_depth, Some(offset))
    }

    /// Declares a const or var in the outermost (program) scope.
    pub fn declare_global(&mut self, name: &str, kind: Kind, ty: Type) -> Symbol {
        self.current_mut();
        let symbol = Symbol {
            name: name.to_string(),
            kind,
            ty,
            frame_depth: 0,
            offset: Some(self.scopes[0].storage_count()),
        };
        debug!("global {} {} {} at {:?}", symbol.kind, symbol.ty, symbol.name, symbol.offset);
        self.scopes[0].push(symbol.clone());
        symbol
    }

    /// Declares a name defined in another compilation unit.
    ///
    /// Externals are addressed by name, so the depth is a fixed sentinel of
    /// 1 and the offset is meaningless.
    pub fn declare_external(&mut self, name: &str, kind: Kind, ty: Type) -> Symbol {
        let symbol = Symbol {
            name: name.to_string(),
            kind,
            ty,
            frame_depth: 1,
            offset: if kind == Kind::Proc { None } else { Some(0) },
        };
        debug!("external {} {} {}", symbol.kind, symbol.ty, symbol.name);
        self.externals.push(symbol.clone());
        symbol
    }

    /// Declares a procedure in the innermost scope, i.e. the one enclosing its body.
    pub fn declare_procedure(&mut self, name: &str) -> Symbol {
        self.current_mut();
        let frame_depth = self.depth();
        self.push_symbol(name, Kind::Proc, Type::Undefined, frame_depth, None)
    }

    fn push_symbol(
        &mut self,
        name: &str,
        kind: Kind,
        ty: Type,
        frame_depth: usize,
        offset: Option<usize>,
    ) -> Symbol {
        let symbol = Symbol {
            name: name.to_string(),
            kind,
            ty,
            frame_depth,
            offset,
        };
        debug!(
            "declared {} {} {} (depth {}, offset {:?})",
            symbol.kind, symbol.ty, symbol.name, symbol.frame_depth, symbol.offset
        );
        self.current_mut().push(symbol.clone());
        symbol
    }

    /// Innermost-first lookup through the open scopes, then the externals.
    pub fn resolve(&self, name: &str) -> Option<Resolved> {
        for scope in self.scopes.iter().rev() {
            if let Some(symbol) = scope.lookup(name) {
                return Some(Resolved {
                    symbol: symbol.clone(),
                    external: false,
                });
            }
        }

        self.externals.lookup(name).map(|symbol| Resolved {
            symbol: symbol.clone(),
            external: true,
        })
    }

    /// Label for a procedure declared now: every open procedure, outermost first, then `name`.
    pub fn label_for(&self, name: &str) -> String {
        let mut parts: Vec<&str> = self.open_procedures.iter().map(String::as_str).collect();
        parts.push(name);
        parts.join(LABEL_SEPARATOR)
    }

    /// Label a call site must target for a procedure found `level_difference` levels out.
    ///
    /// Drops the innermost `level_difference` open procedures and composes
    /// the rest exactly as `label_for` did when the target was declared.
    pub fn label_for_call(&self, level_difference: usize, name: &str) -> String {
        let keep = self.open_procedures.len().saturating_sub(level_difference);
        let mut parts: Vec<&str> = self.open_procedures[..keep]
            .iter()
            .map(String::as_str)
            .collect();
        parts.push(name);
        parts.join(LABEL_SEPARATOR)
    }

    /// Opens the body scope of procedure `name`, returning its label.
    pub fn enter_procedure(&mut self, name: &str) -> String {
        let label = self.label_for(name);
        self.open_scope();
        self.open_procedures.push(name.to_string());
        debug!("enter procedure {} as {} (depth {})", name, label, self.depth());
        label
    }

    /// Closes the innermost procedure, handing back its scope.
    pub fn exit_procedure(&mut self) -> Option<Scope> {
        let name = self.open_procedures.pop();
        debug!("exit procedure {:?} (depth {})", name, self.depth());
        self.close_scope()
    }

    /// Frames to walk from here to reach a stored symbol's frame.
    pub fn data_level_difference(&self, symbol: &Symbol) -> usize {
        self.depth().abs_diff(symbol.frame_depth).saturating_sub(1)
    }

    /// Static-link distance passed to `Call` for a procedure symbol.
    pub fn call_level_difference(&self, symbol: &Symbol) -> usize {
        self.depth().abs_diff(symbol.frame_depth)
    }
}
