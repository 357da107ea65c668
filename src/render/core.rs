use std::collections::BTreeMap;

use crate::object::{Attr, Object};
use crate::render::stack::Stack;
use crate::resolve::{find_attribute, find_relation, plural, singular, walk_attribute_chain, Node};
use crate::types::ast;
use crate::types::span::Span;
use crate::{Error, ErrorKind, Result};

/// How a root name in a placeholder is resolved.
#[derive(Debug, Clone)]
pub enum Resolution {
    /// The name is bound in the current scope.
    Bound,
    /// The name is an element of an unbound relation, reached through the
    /// chain `[binding, relation, ..]`.
    Relation(Vec<String>),
    /// The name is a singular attribute of a binding, `[binding, attribute]`.
    Attribute(Vec<String>),
}

/// Walks a compiled template against an object graph.
///
/// The discovery cache and the bindings live for one expansion only.
#[cfg_attr(test, derive(Debug))]
pub struct RendererImpl<'a> {
    source: &'a str,
    separator: &'a str,
    stack: Stack<'a>,
    /// Resolutions keyed by root name, the innermost bound name and the set
    /// of bound names.
    cache: BTreeMap<(&'a str, &'a str, Vec<&'a str>), Resolution>,
    out: Vec<String>,
}

impl<'a> RendererImpl<'a> {
    pub fn new(source: &'a str, separator: &'a str, stack: Stack<'a>) -> Self {
        Self {
            source,
            separator,
            stack,
            cache: BTreeMap::new(),
            out: Vec::new(),
        }
    }

    pub fn render(mut self, scope: &'a ast::Scope) -> Result<Vec<String>> {
        self.render_scope(&scope.stmts)?;
        Ok(self.out)
    }

    fn render_scope(&mut self, stmts: &'a [ast::Stmt]) -> Result<()> {
        let mut i = 0;
        while let Some(stmt) = stmts.get(i) {
            match stmt {
                ast::Stmt::Raw(span) => {
                    self.out.push(self.source[*span].to_owned());
                    i += 1;
                }
                ast::Stmt::Loop(lp) => {
                    self.render_loop(lp)?;
                    i += 1;
                }
                ast::Stmt::Line(_) => {
                    // Implicit groups never extend past a raw line or a loop so
                    // the run of consecutive placeholder lines is rendered
                    // together.
                    let run: Vec<&'a ast::Line> = stmts[i..]
                        .iter()
                        .map_while(|stmt| match stmt {
                            ast::Stmt::Line(line) => Some(line),
                            _ => None,
                        })
                        .collect();
                    i += run.len();
                    self.render_lines(&run)?;
                }
            }
        }
        Ok(())
    }

    /// Renders an explicit loop, binding each element under the singular of
    /// the loop name.
    fn render_loop(&mut self, lp: &'a ast::Loop) -> Result<()> {
        let source = self.source;
        let relation = &source[lp.name.span];
        let name = singular(relation).unwrap_or(relation);

        let elements: Vec<&'a Object> = match self.stack.relation(relation) {
            Some(elements) => elements.iter().collect(),
            None => match self.discover(name) {
                Ok(Resolution::Relation(chain)) => self.elements(&chain),
                Ok(_) => Err(err_unresolved(name)),
                Err(err) => Err(err),
            }
            .map_err(|err| err.with_span(self.source, lp.name.span))?,
        };

        debug!(relation, elements = elements.len(), "explicit loop");
        for element in elements {
            self.stack.push(name, element);
            self.render_scope(&lp.body.stmts)?;
            self.stack.pop();
        }
        Ok(())
    }

    fn render_lines(&mut self, lines: &[&'a ast::Line]) -> Result<()> {
        let mut i = 0;
        while i < lines.len() {
            i += self.render_line(&lines[i..])?;
        }
        Ok(())
    }

    /// Renders the first line, returning how many lines were consumed.
    ///
    /// If the line references relations with no bound element then the
    /// outermost of them drives an implicit loop. The following lines that
    /// reach deeper into the same relation form a group with it and the whole
    /// group is rendered once per element, with the separator between
    /// elements when the group has more than one line.
    fn render_line(&mut self, lines: &[&'a ast::Line]) -> Result<usize> {
        let line = lines[0];
        let unbound = self.unbound_relations(line)?;
        let Some((driver, chain)) = unbound.into_iter().min_by_key(|(_, chain)| chain.len()) else {
            let rendered = self.substitute(line)?;
            self.out.push(rendered);
            return Ok(1);
        };

        let elements = self
            .elements(&chain)
            .map_err(|err| err.with_span(self.source, root_span(line, self.source, driver)))?;

        let mut n = 1;
        for next in &lines[1..] {
            let deeper = match self.unbound_relations(next) {
                Ok(unbound) => unbound
                    .iter()
                    .any(|(_, c)| c.len() > chain.len() && c.starts_with(&chain)),
                // Relations below an empty driver have no sample element to be
                // discovered through, so such lines belong to the empty group.
                Err(err) if err.kind() == ErrorKind::UnresolvedName => elements.is_empty(),
                Err(err) => return Err(err),
            };
            if !deeper {
                break;
            }
            n += 1;
        }
        let group = &lines[..n];
        debug!(driver, ?chain, lines = n, elements = elements.len(), "implicit group");

        for (k, element) in elements.into_iter().enumerate() {
            if k > 0 && n > 1 {
                self.out.push(self.separator.to_owned());
            }
            self.stack.push(driver, element);
            self.render_lines(group)?;
            self.stack.pop();
        }
        Ok(n)
    }

    /// Returns the distinct root names on the line that resolve to an unbound
    /// relation, together with their chains.
    fn unbound_relations(&mut self, line: &'a ast::Line) -> Result<Vec<(&'a str, Vec<String>)>> {
        let source = self.source;
        let mut unbound: Vec<(&'a str, Vec<String>)> = Vec::new();
        for placeholder in line.placeholders() {
            let root = placeholder.root();
            let name = &source[root.span];
            if unbound.iter().any(|(n, _)| *n == name) {
                continue;
            }
            let resolution = self
                .resolve(name)
                .map_err(|err| err.with_span(self.source, root.span))?;
            if let Resolution::Relation(chain) = resolution {
                unbound.push((name, chain));
            }
        }
        Ok(unbound)
    }

    /// Resolves a root name against the current bindings.
    fn resolve(&mut self, name: &'a str) -> Result<Resolution> {
        if self.stack.lookup(name).is_some() {
            return Ok(Resolution::Bound);
        }
        self.discover(name)
    }

    /// Finds the relation or attribute a name refers to, consulting the
    /// discovery cache first.
    fn discover(&mut self, name: &'a str) -> Result<Resolution> {
        let key = (name, self.stack.innermost().0, self.stack.names());
        if let Some(resolution) = self.cache.get(&key) {
            trace!(root = name, ?resolution, "discovery cache hit");
            return Ok(resolution.clone());
        }

        let candidates = self.stack.candidates();
        let resolution = match self.relation_chain(&candidates, name)? {
            Some(chain) => Resolution::Relation(chain),
            None => match find_attribute(&candidates, name)? {
                Some(chain) => Resolution::Attribute(chain),
                None => return Err(err_unresolved(name)),
            },
        };
        self.cache.insert(key, resolution.clone());
        Ok(resolution)
    }

    /// Finds the relation below the innermost binding first, then falls back
    /// to all candidates.
    fn relation_chain(&self, candidates: &[(&'a str, &'a Object)], name: &str) -> Result<Option<Vec<String>>> {
        if candidates.len() > 1 {
            if let Some(chain) = find_relation(&[self.stack.innermost()], name)? {
                return Ok(Some(chain));
            }
        }
        find_relation(candidates, name)
    }

    /// Collects the elements produced by a relation chain.
    fn elements(&self, chain: &[String]) -> Result<Vec<&'a Object>> {
        let (binding, rest) = chain
            .split_first()
            .ok_or_else(|| Error::new(ErrorKind::UnresolvedName, "empty relation chain"))?;
        let object = self
            .stack
            .lookup(binding)
            .ok_or_else(|| err_unresolved(binding))?;
        walk_attribute_chain(object, rest)
            .map(|node| -> Result<&'a Object> {
                match node? {
                    Node::Object(object) => Ok(object),
                    node => Err(Error::new(
                        ErrorKind::AttributeResolution,
                        format!("expected relation element, found {}", node.human()),
                    )),
                }
            })
            .collect()
    }

    /// Substitutes every placeholder on the line.
    fn substitute(&mut self, line: &'a ast::Line) -> Result<String> {
        let mut s = String::with_capacity(line.span.n - line.span.m);
        for part in &line.parts {
            match part {
                ast::Part::Raw(span) => s.push_str(&self.source[*span]),
                ast::Part::Placeholder(placeholder) => self
                    .render_placeholder(&mut s, placeholder)
                    .map_err(|err| err.with_span(self.source, placeholder.span))?,
            }
        }
        Ok(s)
    }

    fn render_placeholder(&mut self, s: &mut String, placeholder: &'a ast::Placeholder) -> Result<()> {
        let source = self.source;
        let name = &source[placeholder.root().span];

        // The path to follow from a bound object, each segment with its span in
        // the template if it was written there.
        let resolution = self.resolve(name)?;
        let (binding, prefix) = match &resolution {
            Resolution::Relation(chain) | Resolution::Attribute(chain) => match chain.split_first() {
                Some((binding, prefix)) => (binding.as_str(), prefix),
                None => (name, &[][..]),
            },
            Resolution::Bound => (name, &[][..]),
        };
        let object = self
            .stack
            .lookup(binding)
            .ok_or_else(|| err_unresolved(name))?;
        let path: Vec<(&str, Option<Span>)> = prefix
            .iter()
            .map(|seg| (seg.as_str(), None))
            .chain(
                placeholder.path[1..]
                    .iter()
                    .map(|ident| (&source[ident.span], Some(ident.span))),
            )
            .collect();

        let attr = match index(object, &path) {
            Ok(attr) => attr,
            Err((err, Some(span))) => return Err(err.with_span(self.source, span)),
            Err((err, None)) => return Err(err),
        };

        let value = match attr {
            None => {
                return Err(err_unrenderable("object"));
            }
            Some(Attr::Value(value)) => value,
            Some(attr) => return Err(err_unrenderable(attr.human())),
        };
        match value.render(s) {
            Some(result) => {
                result.map_err(|_| Error::new(ErrorKind::Render, "failed to write value"))
            }
            None => Err(err_unrenderable(value.human())),
        }
    }
}

/// Follows the path of attributes from an object.
///
/// Returns `None` for an empty path, which refers to the object itself. On
/// failure the error is returned with the span of the offending segment if it
/// has one.
fn index<'a>(
    mut object: &'a Object,
    path: &[(&str, Option<Span>)],
) -> std::result::Result<Option<&'a Attr>, (Error, Option<Span>)> {
    for (i, (name, span)) in path.iter().enumerate() {
        let attr = object.attr(name).ok_or_else(|| {
            let msg = format!("attribute `{name}` not found");
            (Error::new(ErrorKind::AttributeResolution, msg), *span)
        })?;
        match (path.get(i + 1), attr) {
            (None, attr) => return Ok(Some(attr)),
            (Some(_), Attr::Object(nested)) => object = nested,
            (Some((next, span)), attr) => {
                let msg = format!("cannot access attribute `{next}` of {}", attr.human());
                return Err((Error::new(ErrorKind::AttributeResolution, msg), *span));
            }
        }
    }
    Ok(None)
}

/// Returns the span of the first placeholder root on the line with the name.
fn root_span(line: &ast::Line, source: &str, name: &str) -> Span {
    line.placeholders()
        .map(|p| p.root().span)
        .find(|span| source[*span] == *name)
        .unwrap_or(line.span)
}

fn err_unresolved(name: &str) -> Error {
    Error::new(
        ErrorKind::UnresolvedName,
        format!(
            "cannot resolve `{name}`, no bound object exposes `{}` or `{name}`",
            plural(name)
        ),
    )
}

fn err_unrenderable(human: &str) -> Error {
    Error::new(
        ErrorKind::Render,
        format!("expected renderable value, but placeholder evaluated to {human}"),
    )
}
