//! Compile the template into an AST that can be walked by the renderer.
//!
//! This process has two stages:
//! - The template is split into lines and the lexer chunks each line into raw
//!   text, placeholders, and loop markers.
//! - The parser classifies each line and nests loop bodies into scopes.

mod lex;
mod parse;

use std::borrow::Cow;

use crate::types::ast::Template;
use crate::types::span::Span;
use crate::types::syntax::Syntax;
use crate::Result;

/// Compile a template from text.
///
/// Each line keeps its trailing newline so that rendering reproduces the
/// source layout.
pub fn template<'source>(syntax: &Syntax<'_>, source: &'source str) -> Result<Template<'source>> {
    let mut lines = Vec::new();
    let mut m = 0;
    for line in source.split_inclusive('\n') {
        let n = m + line.len();
        lines.push(Span::from(m..n));
        m = n;
    }
    let scope = parse::Parser::new(syntax, source, lines).parse_template()?;
    Ok(Template {
        source: Cow::Borrowed(source),
        scope,
    })
}

/// Compile a template from a sequence of lines.
///
/// The lines are joined with newlines to form the template source, but the
/// span of each line excludes the newline, so rendering yields the lines as
/// they were given.
pub fn lines<I, S>(syntax: &Syntax<'_>, lines: I) -> Result<Template<'static>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut source = String::new();
    let mut spans = Vec::new();
    for (i, line) in lines.into_iter().enumerate() {
        if i > 0 {
            source.push('\n');
        }
        let m = source.len();
        source.push_str(line.as_ref());
        spans.push(Span::from(m..source.len()));
    }
    let scope = parse::Parser::new(syntax, &source, spans).parse_template()?;
    Ok(Template {
        source: Cow::Owned(source),
        scope,
    })
}
