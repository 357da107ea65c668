use std::cmp::max;
use std::fmt;

use crate::types::span::Span;

/// The kind of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The template could not be compiled.
    Syntax,
    /// A loop open marker without a matching close marker or vice versa.
    UnbalancedLoopMarker,
    /// No bound object exposes the named relation at any depth.
    UnresolvedName,
    /// More than one candidate exposes the same relation at one level.
    AmbiguousRelation,
    /// A bound object lacks an attribute named in a placeholder.
    AttributeResolution,
    /// A path segment has no corresponding schema entry.
    PathSchemaMismatch,
    /// The resolved value cannot be substituted into a line.
    Render,
    /// The data could not be converted into a tree or object graph.
    Data,
}

/// An error that can occur during template compilation or expansion.
#[derive(Clone)]
pub struct Error {
    kind: ErrorKind,
    msg: String,
    candidates: Vec<String>,
    span: Option<(String, Span)>,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            msg: msg.into(),
            candidates: Vec::new(),
            span: None,
        }
    }

    /// Construct a new error with a span into the template source.
    pub(crate) fn spanned(
        kind: ErrorKind,
        msg: impl Into<String>,
        source: &str,
        span: impl Into<Span>,
    ) -> Self {
        Self::new(kind, msg).with_span(source, span)
    }

    pub(crate) fn syntax(msg: impl Into<String>, source: &str, span: impl Into<Span>) -> Self {
        Self::spanned(ErrorKind::Syntax, msg, source, span)
    }

    pub(crate) fn unbalanced(msg: impl Into<String>, source: &str, span: impl Into<Span>) -> Self {
        Self::spanned(ErrorKind::UnbalancedLoopMarker, msg, source, span)
    }

    pub(crate) fn ambiguous(msg: impl Into<String>, candidates: Vec<String>) -> Self {
        Self {
            candidates,
            ..Self::new(ErrorKind::AmbiguousRelation, msg)
        }
    }

    /// Attach the template source and span, unless the error already has one.
    pub(crate) fn with_span(mut self, source: &str, span: impl Into<Span>) -> Self {
        if self.span.is_none() {
            assert!(!source.is_empty(), "source must be populated");
            self.span = Some((source.to_owned(), span.into()));
        }
        self
    }

    /// Returns the kind of this error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the colliding candidate names of an ambiguous relation.
    ///
    /// Empty for every other kind of error.
    #[inline]
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }
}

#[cfg(feature = "serde")]
impl serde::ser::Error for Error {
    fn custom<T>(msg: T) -> Self
    where
        T: fmt::Display,
    {
        Self::new(ErrorKind::Data, msg.to_string())
    }
}

impl std::error::Error for Error {}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.span {
            Some((source, span)) => fmt_pretty(&self.msg, source, *span, f),
            None => write!(f, "{}", self.msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.span {
            Some((source, span)) => {
                if f.alternate() {
                    fmt_pretty(&self.msg, source, *span, f)
                } else {
                    write!(f, "{} between bytes {} and {}", self.msg, span.m, span.n)
                }
            }
            None => write!(f, "{}", self.msg),
        }
    }
}

fn fmt_pretty(msg: &str, source: &str, span: Span, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let lines: Vec<_> = source.split_terminator('\n').collect();
    let (line, col) = to_line_col(&lines, span.m);
    let width = max(1, width(&source[span]));
    let code = lines
        .get(line)
        .or_else(|| lines.last())
        .copied()
        .unwrap_or_default();

    let num = (line + 1).to_string();
    let pad = num.len();
    let pipe = "|";
    let underline = "^".repeat(width);

    write!(
        f,
        "\n \
        {0:pad$} {pipe}\n \
        {num:>} {pipe} {code}\n \
        {0:pad$} {pipe} {underline:>width$} {msg}\n",
        "",
        pad = pad,
        pipe = pipe,
        num = num,
        code = code,
        underline = underline,
        width = col + width,
        msg = msg
    )
}

fn to_line_col(lines: &[&str], offset: usize) -> (usize, usize) {
    let mut n = 0;
    for (i, line) in lines.iter().enumerate() {
        let len = line.len() + 1;
        if n + len > offset {
            return (i, width(&line[..offset - n]));
        }
        n += len;
    }
    (lines.len(), lines.last().map(|l| width(l)).unwrap_or(0))
}

#[cfg(feature = "unicode")]
fn width(s: &str) -> usize {
    unicode_width::UnicodeWidthStr::width(s)
}

#[cfg(not(feature = "unicode"))]
fn width(s: &str) -> usize {
    s.chars().count()
}
