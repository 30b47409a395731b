//! The translation driver.
//!
//! This module contains the Parser struct and the entry point that runs a
//! whole compilation unit. There is no syntax tree: every grammar rule
//! resolves names, checks types and emits code as soon as it has consumed
//! the tokens it needs, one token of lookahead at a time.
//!
//! It maintains lookup tables for:
//! - Statement handlers, keyed by a statement's first token
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence

use std::collections::HashMap;

use log::trace;

use crate::{
    compiler::{emitter::Emitter, listing::header},
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::TokenSource,
        tokens::{Token, TokenKind},
    },
    session::Session,
    symbols::scope::{Resolved, Scope},
    Compilation, Options, Position,
};

use super::{
    decl::parse_program,
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
};

/// The driver state: the token window and the compilation session.
pub struct Parser {
    source: Box<dyn TokenSource>,
    /// The most recently consumed token
    t: Token,
    /// The lookahead token
    la: Token,
    /// Everything the semantic actions read and write
    pub session: Session,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
}

impl Parser {
    pub fn new(mut source: Box<dyn TokenSource>, options: Options) -> Self {
        let la = source.next();
        Parser {
            source,
            t: la.clone(),
            la,
            session: Session::new(options),
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        }
    }

    /// The token consumed last.
    pub fn current_token(&self) -> &Token {
        &self.t
    }

    pub fn lookahead_kind(&self) -> TokenKind {
        self.la.kind
    }

    pub fn at(&self, kind: TokenKind) -> bool {
        self.la.kind == kind
    }

    pub fn at_eof(&self) -> bool {
        self.la.kind == TokenKind::EOF
    }

    /// Consumes the lookahead and returns it.
    pub fn advance(&mut self) -> &Token {
        let next = self.source.next();
        self.t = std::mem::replace(&mut self.la, next);
        self.session.reporter.token_consumed();
        trace!("consumed {} {:?}", self.t.kind, self.t.value);
        &self.t
    }

    /// Consumes the lookahead if it is of `kind`.
    pub fn accept(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes a token of `kind`, or reports it missing and consumes nothing.
    pub fn expect(&mut self, kind: TokenKind) -> bool {
        if self.accept(kind) {
            return true;
        }

        self.syntax_error(ErrorImpl::Expected {
            token: kind.describe().to_string(),
        });
        false
    }

    /// The text of an expected identifier.
    pub fn expect_identifier(&mut self) -> Option<String> {
        if self.expect(TokenKind::Identifier) {
            Some(self.t.value.clone())
        } else {
            None
        }
    }

    /// Reports at the lookahead, where the grammar went wrong.
    pub fn syntax_error(&mut self, error: ErrorImpl) {
        let position = self.la.span.start.clone();
        self.session.reporter.report(Error::new(error, position));
    }

    /// Reports at the token just consumed, which the failed check was about.
    pub fn semantic_error(&mut self, error: ErrorImpl) {
        let position = self.t.span.start.clone();
        self.session.reporter.report(Error::new(error, position));
    }

    pub fn warn(&mut self, message: String) {
        let position: Position = self.t.span.start.clone();
        self.session.reporter.warn(message, &position);
    }

    /// Reports `invalid <production>` and skips the offending token.
    pub fn skip_invalid(&mut self, production: &'static str) {
        self.syntax_error(ErrorImpl::Invalid { production });
        self.advance();
    }

    pub fn emitter(&mut self) -> &mut Emitter {
        &mut self.session.emitter
    }

    /// Looks `name` up, reporting it if nothing by that name is visible.
    pub fn resolve(&mut self, name: &str) -> Option<Resolved> {
        let resolved = self.session.scopes.resolve(name);
        if resolved.is_none() {
            self.semantic_error(ErrorImpl::UndefinedVariable {
                name: name.to_string(),
            });
        }
        resolved
    }

    /// Emits a load of a storage symbol, addressed from the current depth.
    pub fn load(&mut self, target: &Resolved) {
        let level_difference = self.session.scopes.data_level_difference(&target.symbol);
        self.session.emitter.load(target, level_difference);
    }

    /// Emits a store into a storage symbol, addressed from the current depth.
    pub fn store(&mut self, target: &Resolved) {
        let level_difference = self.session.scopes.data_level_difference(&target.symbol);
        self.session.emitter.store(target, level_difference);
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Whether the lookahead can start a statement.
    pub fn at_stmt_start(&self) -> bool {
        self.stmt_lookup.contains_key(&self.la.kind)
    }

    /// Registers a left denotation (infix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    ///
    /// Prefix handlers leave the binding power table alone, so a token such
    /// as `-` keeps its infix precedence.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Closes the session: prepends the header and collects diagnostics.
    pub fn finish(self) -> Compilation {
        let Session {
            scopes,
            emitter,
            reporter,
            ..
        } = self.session;

        let empty = Scope::new();
        let globals = scopes.global().unwrap_or(&empty);
        let listing = emitter.finish(header(globals, scopes.externals()));

        Compilation {
            listing,
            error_count: reporter.count(),
            diagnostics: reporter.into_diagnostics(),
        }
    }
}

/// Translates one compilation unit, start to finish, in a single pass.
///
/// Syntax and semantic errors never stop the translation; they are counted
/// in the result and the listing is produced regardless.
pub fn translate(source: impl TokenSource + 'static, options: Options) -> Compilation {
    let mut parser = Parser::new(Box::new(source), options);
    create_token_lookups(&mut parser);

    parse_program(&mut parser);

    parser.finish()
}
