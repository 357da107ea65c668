use crate::types::span::Span;
use crate::types::syntax::Syntax;

/// A lexer that chunks a single template line into raw text and tags.
///
/// Anything that does not form a complete tag is raw text, including stray
/// delimiters, so braces in the generated target language pass through
/// untouched. Tags never extend past the end of the line.
#[cfg_attr(test, derive(Debug))]
pub struct Lexer<'syntax, 'source> {
    /// The delimiter configuration.
    syntax: &'syntax Syntax<'syntax>,

    /// The original template source.
    source: &'source str,

    /// A cursor over the line.
    cursor: usize,

    /// The end of the line.
    end: usize,
}

/// The unit yielded by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Raw template
    Raw,
    /// A placeholder, e.g. `{interaction.name}`, with the span of each name.
    Placeholder(Vec<Span>),
    /// A loop open marker, e.g. `{$interactions}`, with the span of the name.
    Open(Span),
    /// A loop close marker, e.g. `{interactions$}`, with the span of the name.
    Close(Span),
}

impl Token {
    pub fn is_marker(&self) -> bool {
        matches!(self, Token::Open(_) | Token::Close(_))
    }
}

impl<'syntax, 'source> Lexer<'syntax, 'source> {
    /// Construct a new lexer over the given line of the source.
    pub fn new(syntax: &'syntax Syntax<'syntax>, source: &'source str, line: Span) -> Self {
        Self {
            syntax,
            source,
            cursor: line.m,
            end: line.n,
        }
    }

    /// Tries to lex a tag starting with the begin delimiter at `j`.
    ///
    /// Returns the token and the index just past the end delimiter.
    fn lex_tag(&self, j: usize) -> Option<(Token, usize)> {
        let Syntax { begin, end, marker } = *self.syntax;
        let mut k = j + begin.len();

        // {$name}
        if let Some(i) = self.eat(k, marker) {
            let name = self.lex_ident(i)?;
            let k = self.eat(name.n, end)?;
            return Some((Token::Open(name), k));
        }

        let first = self.lex_ident(k)?;
        k = first.n;

        // {name$}
        if let Some(i) = self.eat(k, marker) {
            let k = self.eat(i, end)?;
            return Some((Token::Close(first), k));
        }

        // {name.name.name}
        let mut path = vec![first];
        while let Some(i) = self.eat(k, ".") {
            let ident = self.lex_ident(i)?;
            k = ident.n;
            path.push(ident);
        }
        let k = self.eat(k, end)?;
        Some((Token::Placeholder(path), k))
    }

    /// Lexes an identifier starting at `i`.
    fn lex_ident(&self, i: usize) -> Option<Span> {
        let mut iter = self.source[i..self.end].char_indices();
        match iter.next() {
            Some((_, c)) if is_ident_start(c) => {}
            _ => return None,
        }
        let j = iter
            .find(|(_, c)| !is_ident(*c))
            .map(|(d, _)| i + d)
            .unwrap_or(self.end);
        Some(Span::from(i..j))
    }

    /// Returns the index after `pat` if the line continues with it at `i`.
    fn eat(&self, i: usize, pat: &str) -> Option<usize> {
        self.source[i..self.end]
            .starts_with(pat)
            .then(|| i + pat.len())
    }
}

impl Iterator for Lexer<'_, '_> {
    type Item = (Token, Span);

    fn next(&mut self) -> Option<Self::Item> {
        let i = self.cursor;
        if i >= self.end {
            return None;
        }

        // Search for the next begin delimiter that starts a valid tag. The
        // following diagram helps describe the variable naming.
        //
        // xxxxxxx{xxxxxx}xx
        //    ^   ^       ^
        //    i   j       k
        let begin = self.syntax.begin;
        let mut from = i;
        while let Some(d) = self.source[from..self.end].find(begin) {
            let j = from + d;
            if let Some((tk, k)) = self.lex_tag(j) {
                if j > i {
                    // flush the raw text first, the tag is lexed again on the
                    // next call
                    self.cursor = j;
                    return Some((Token::Raw, Span::from(i..j)));
                }
                self.cursor = k;
                return Some((tk, Span::from(j..k)));
            }
            from = j + begin.chars().next().map_or(1, char::len_utf8);
        }

        self.cursor = self.end;
        Some((Token::Raw, Span::from(i..self.end)))
    }
}

#[cfg(feature = "unicode")]
fn is_ident_start(c: char) -> bool {
    c == '_' || unicode_ident::is_xid_start(c)
}

#[cfg(feature = "unicode")]
fn is_ident(c: char) -> bool {
    unicode_ident::is_xid_continue(c)
}

#[cfg(not(feature = "unicode"))]
fn is_ident_start(c: char) -> bool {
    matches!(c, 'A'..='Z' | 'a'..='z' | '_')
}

#[cfg(not(feature = "unicode"))]
fn is_ident(c: char) -> bool {
    matches!(c, '0'..='9' | 'A'..='Z' | 'a'..='z' | '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    enum Tk<'a> {
        Raw,
        Placeholder(Vec<&'a str>),
        Open(&'a str),
        Close(&'a str),
    }

    fn lex_with<'a>(syntax: &Syntax<'_>, source: &'a str) -> Vec<(Tk<'a>, &'a str)> {
        Lexer::new(syntax, source, Span::from(0..source.len()))
            .map(|(tk, span)| {
                let tk = match tk {
                    Token::Raw => Tk::Raw,
                    Token::Placeholder(path) => {
                        Tk::Placeholder(path.into_iter().map(|s| &source[s]).collect())
                    }
                    Token::Open(name) => Tk::Open(&source[name]),
                    Token::Close(name) => Tk::Close(&source[name]),
                };
                (tk, &source[span])
            })
            .collect()
    }

    fn lex(source: &str) -> Vec<(Tk<'_>, &str)> {
        lex_with(&Syntax::default(), source)
    }

    #[test]
    fn lex_empty() {
        assert_eq!(lex(""), []);
    }

    #[test]
    fn lex_raw() {
        assert_eq!(lex("cheeseshop"), [(Tk::Raw, "cheeseshop")]);
    }

    #[test]
    fn lex_placeholder() {
        assert_eq!(
            lex("{parameter.name}"),
            [(Tk::Placeholder(vec!["parameter", "name"]), "{parameter.name}")]
        );
    }

    #[test]
    fn lex_placeholder_single_name() {
        assert_eq!(
            lex("x = {federate};"),
            [
                (Tk::Raw, "x = "),
                (Tk::Placeholder(vec!["federate"]), "{federate}"),
                (Tk::Raw, ";"),
            ]
        );
    }

    #[test]
    fn lex_placeholder_long_path() {
        assert_eq!(
            lex("{federation.interaction.parameter.name}"),
            [(
                Tk::Placeholder(vec!["federation", "interaction", "parameter", "name"]),
                "{federation.interaction.parameter.name}"
            )]
        );
    }

    #[test]
    fn lex_multiple_placeholders() {
        assert_eq!(
            lex("{interaction.name} {parameter.name}\n"),
            [
                (Tk::Placeholder(vec!["interaction", "name"]), "{interaction.name}"),
                (Tk::Raw, " "),
                (Tk::Placeholder(vec!["parameter", "name"]), "{parameter.name}"),
                (Tk::Raw, "\n"),
            ]
        );
    }

    #[test]
    fn lex_loop_markers() {
        assert_eq!(
            lex("  {$interactions}"),
            [(Tk::Raw, "  "), (Tk::Open("interactions"), "{$interactions}")]
        );
        assert_eq!(
            lex("{interactions$}\n"),
            [(Tk::Close("interactions"), "{interactions$}"), (Tk::Raw, "\n")]
        );
    }

    #[test]
    fn lex_malformed_is_raw() {
        for source in [
            "{}",
            "{{}}",
            "{ name }",
            "{name",
            "name}",
            "{name.}",
            "{.name}",
            "{name..x}",
            "{$}",
            "{$name$}",
            "{0}",
            "virtual ~Federate() {};",
        ] {
            assert_eq!(lex(source), [(Tk::Raw, source)], "source: {source:?}");
        }
    }

    #[test]
    fn lex_placeholder_after_stray_brace() {
        assert_eq!(
            lex("{{name}}"),
            [
                (Tk::Raw, "{"),
                (Tk::Placeholder(vec!["name"]), "{name}"),
                (Tk::Raw, "}"),
            ]
        );
    }

    #[test]
    fn lex_tag_does_not_cross_line_end() {
        let source = "{name\n}";
        let tokens: Vec<_> = Lexer::new(&Syntax::default(), source, Span::from(0..5)).collect();
        assert_eq!(tokens, [(Token::Raw, Span::from(0..5))]);
    }

    #[test]
    fn lex_custom_syntax() {
        let syntax = Syntax::builder().placeholder("<<", ">>").loop_marker("@").build();
        assert_eq!(
            lex_with(&syntax, "<<@items>> {x} <<item.name>> <<items@>>"),
            [
                (Tk::Open("items"), "<<@items>>"),
                (Tk::Raw, " {x} "),
                (Tk::Placeholder(vec!["item", "name"]), "<<item.name>>"),
                (Tk::Raw, " "),
                (Tk::Close("items"), "<<items@>>"),
            ]
        );
    }

    #[cfg(feature = "unicode")]
    #[test]
    fn lex_unicode_ident() {
        assert_eq!(
            lex("{привіт.світ}"),
            [(Tk::Placeholder(vec!["привіт", "світ"]), "{привіт.світ}")]
        );
    }
}
