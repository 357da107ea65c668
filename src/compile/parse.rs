use crate::compile::lex::{Lexer, Token};
use crate::resolve::singular;
use crate::types::ast;
use crate::types::span::Span;
use crate::types::syntax::Syntax;
use crate::{Error, Result};

/// A parser that constructs an AST from the lines of a template.
///
/// The parser works line by line with no recursion. Each line is lexed, then
/// classified as a loop marker line, a placeholder line, or a raw line.
pub struct Parser<'syntax, 'source> {
    syntax: &'syntax Syntax<'syntax>,

    /// The original template source.
    source: &'source str,

    /// The span of each line in the source.
    lines: Vec<Span>,
}

/// A partial loop statement.
struct State {
    /// The relation name.
    name: ast::Ident,
    /// The span of the open marker.
    span: Span,
}

impl<'syntax, 'source> Parser<'syntax, 'source> {
    /// Construct a new parser.
    pub fn new(syntax: &'syntax Syntax<'syntax>, source: &'source str, lines: Vec<Span>) -> Self {
        Self {
            syntax,
            source,
            lines,
        }
    }

    /// Parses a template.
    ///
    /// This function works using two stacks:
    /// - A stack of open loops, e.g. `{$interactions}`.
    /// - A stack of scopes which collect each parsed statement.
    pub fn parse_template(self) -> Result<ast::Scope> {
        let mut blocks: Vec<State> = vec![];
        let mut scopes = vec![ast::Scope::new()];

        for &line in &self.lines {
            let tokens: Vec<_> = Lexer::new(self.syntax, self.source, line).collect();

            let mut markers = tokens.iter().filter(|(tk, _)| tk.is_marker());
            let marker = markers.next();
            if let Some((_, span)) = markers.next() {
                return Err(Error::syntax(
                    "only one loop marker is allowed per line",
                    self.source,
                    *span,
                ));
            }

            let stmt = match marker {
                // The start of a loop, e.g. `{$interactions}`. The rest of the
                // line is dropped.
                Some((Token::Open(name), span)) => {
                    if singular(&self.source[*name]).is_none() {
                        return Err(Error::syntax(
                            "expected plural relation name",
                            self.source,
                            *name,
                        ));
                    }
                    blocks.push(State {
                        name: ast::Ident { span: *name },
                        span: *span,
                    });
                    scopes.push(ast::Scope::new());
                    continue;
                }

                // The end of a loop, e.g. `{interactions$}`.
                Some((Token::Close(name), span)) => {
                    let State { name: open, .. } = blocks.pop().ok_or_else(|| {
                        Error::unbalanced(
                            "unexpected loop close marker, there is no open loop",
                            self.source,
                            *span,
                        )
                    })?;
                    if self.source[open.span] != self.source[*name] {
                        return Err(Error::unbalanced(
                            format!(
                                "loop close marker does not match the open loop `{}`",
                                &self.source[open.span]
                            ),
                            self.source,
                            *span,
                        ));
                    }
                    let body = scopes.pop().unwrap();
                    ast::Stmt::Loop(ast::Loop { name: open, body })
                }

                _ if tokens.iter().any(|(tk, _)| matches!(tk, Token::Placeholder(_))) => {
                    ast::Stmt::Line(self.parse_line(tokens, line))
                }

                _ => ast::Stmt::Raw(line),
            };
            scopes.last_mut().unwrap().stmts.push(stmt);
        }

        if let Some(block) = blocks.pop() {
            return Err(Error::unbalanced(
                "unclosed loop open marker",
                self.source,
                block.span,
            ));
        }

        assert!(scopes.len() == 1, "must have single scope");
        Ok(scopes.remove(0))
    }

    fn parse_line(&self, tokens: Vec<(Token, Span)>, span: Span) -> ast::Line {
        let parts = tokens
            .into_iter()
            .map(|(tk, span)| match tk {
                Token::Placeholder(path) => ast::Part::Placeholder(ast::Placeholder {
                    path: path.into_iter().map(|span| ast::Ident { span }).collect(),
                    span,
                }),
                _ => ast::Part::Raw(span),
            })
            .collect();
        ast::Line { parts, span }
    }
}
