//! AST representing a compiled template.

use std::borrow::Cow;

use crate::types::span::Span;

#[cfg_attr(test, derive(Debug))]
pub struct Template<'source> {
    pub source: Cow<'source, str>,
    pub scope: Scope,
}

#[derive(Default)]
#[cfg_attr(test, derive(Debug))]
pub struct Scope {
    pub stmts: Vec<Stmt>,
}

#[cfg_attr(test, derive(Debug))]
pub enum Stmt {
    /// A line without placeholders, emitted verbatim.
    Raw(Span),
    /// A line with at least one placeholder.
    Line(Line),
    /// An explicit loop, e.g. `{$interactions} ... {interactions$}`.
    Loop(Loop),
}

#[cfg_attr(test, derive(Debug))]
pub struct Line {
    pub parts: Vec<Part>,
    pub span: Span,
}

#[cfg_attr(test, derive(Debug))]
pub enum Part {
    Raw(Span),
    Placeholder(Placeholder),
}

#[cfg_attr(test, derive(Debug))]
pub struct Placeholder {
    /// The root name followed by the attribute names.
    pub path: Vec<Ident>,
    pub span: Span,
}

#[cfg_attr(test, derive(Debug))]
pub struct Loop {
    /// The plural relation name.
    pub name: Ident,
    pub body: Scope,
}

#[derive(Clone, Copy)]
#[cfg_attr(test, derive(Debug))]
pub struct Ident {
    pub span: Span,
}

impl Scope {
    pub const fn new() -> Self {
        Self { stmts: Vec::new() }
    }
}

impl Line {
    /// Returns the placeholders on this line.
    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
        self.parts.iter().filter_map(|part| match part {
            Part::Placeholder(p) => Some(p),
            Part::Raw(_) => None,
        })
    }
}

impl Placeholder {
    pub fn root(&self) -> Ident {
        self.path[0]
    }
}
