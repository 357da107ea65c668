//! Locate the attribute chain that produces instances of a name.
//!
//! Templates refer to objects by their singular name, e.g. `{parameter.name}`,
//! without saying where in the object graph parameters live. The resolver
//! finds the unique chain of relations leading to them, e.g.
//! `federate.interactions.parameters`, by probing the declared relations of
//! the currently bound objects and then of their descendants.

use std::iter::FusedIterator;
use std::slice;

use crate::object::{Attr, Object};
use crate::{Error, ErrorKind, Result, Value};

/// Returns the name of the relation holding instances of `name`.
///
/// ```
/// assert_eq!(relplate::plural("interaction"), "interactions");
/// ```
pub fn plural(name: &str) -> String {
    format!("{name}s")
}

/// Returns the instance name for a relation name.
///
/// Returns `None` if the name is not a plural.
///
/// ```
/// assert_eq!(relplate::singular("parameters"), Some("parameter"));
/// assert_eq!(relplate::singular("fom"), None);
/// ```
pub fn singular(name: &str) -> Option<&str> {
    name.strip_suffix('s').filter(|s| !s.is_empty())
}

/// Finds the relation chain producing instances of `name`.
///
/// The candidates are searched for one that directly exposes the plural
/// relation. If none does, the search recurses into a derived candidate set
/// per candidate, made of the first element of each of its non-empty
/// relations, named after the relation. On success the returned chain starts
/// with the name of the candidate and ends with the plural relation.
///
/// Returns `Ok(None)` if no candidate exposes the relation at any depth.
///
/// # Errors
///
/// If more than one candidate exposes the relation at the same level, or more
/// than one candidate leads to it through its descendants.
///
/// ```
/// use relplate::Object;
///
/// let federate = Object::new().with_relation("interactions", [
///     Object::new().with_relation("parameters", [Object::new()]),
/// ]);
/// let chain = relplate::find_relation(&[("federate", &federate)], "parameter")?;
/// assert_eq!(chain.unwrap(), ["federate", "interactions", "parameters"]);
/// # Ok::<(), relplate::Error>(())
/// ```
pub fn find_relation(candidates: &[(&str, &Object)], name: &str) -> Result<Option<Vec<String>>> {
    let chain = find_relation_at(candidates, &plural(name), 0)?;
    debug!(relation = name, ?chain, "find relation");
    Ok(chain)
}

fn find_relation_at(
    candidates: &[(&str, &Object)],
    relation: &str,
    level: usize,
) -> Result<Option<Vec<String>>> {
    let direct: Vec<&str> = candidates
        .iter()
        .filter(|(_, object)| object.relation(relation).is_some())
        .map(|(name, _)| *name)
        .collect();
    match direct[..] {
        [] => {}
        [name] => return Ok(Some(vec![name.to_owned(), relation.to_owned()])),
        _ => return Err(err_ambiguous(relation, level, &direct)),
    }

    let mut found = None;
    let mut colliding = Vec::new();
    for &(name, object) in candidates {
        let derived: Vec<(&str, &Object)> = object
            .relations()
            .filter_map(|(rel, elements)| elements.first().map(|first| (rel, first)))
            .collect();
        if derived.is_empty() {
            continue;
        }
        if let Some(chain) = find_relation_at(&derived, relation, level + 1)? {
            trace!(candidate = name, level, ?chain, "found through descendants");
            colliding.push(name);
            found.get_or_insert_with(|| {
                let mut full = Vec::with_capacity(chain.len() + 1);
                full.push(name.to_owned());
                full.extend(chain);
                full
            });
        }
    }

    if colliding.len() > 1 {
        return Err(err_ambiguous(relation, level + 1, &colliding));
    }
    Ok(found)
}

/// Finds the candidate exposing a singular attribute called `name`.
///
/// This resolves roots such as `{fom.filenames}` when `fom` is a nested
/// object or value of a bound object rather than a relation. Returns the chain
/// `[candidate, name]`, or `Ok(None)` if no candidate has such an attribute.
///
/// # Errors
///
/// If more than one candidate has the attribute.
pub fn find_attribute(candidates: &[(&str, &Object)], name: &str) -> Result<Option<Vec<String>>> {
    let owners: Vec<&str> = candidates
        .iter()
        .filter(|(_, object)| matches!(object.attr(name), Some(Attr::Value(_) | Attr::Object(_))))
        .map(|(owner, _)| *owner)
        .collect();
    debug!(attribute = name, ?owners, "find attribute");
    match owners[..] {
        [] => Ok(None),
        [owner] => Ok(Some(vec![owner.to_owned(), name.to_owned()])),
        _ => Err(Error::ambiguous(
            format!("attribute `{name}` is ambiguous, found on {}", quoted(&owners)),
            owners.iter().map(|s| s.to_string()).collect(),
        )),
    }
}

fn err_ambiguous(relation: &str, level: usize, candidates: &[&str]) -> Error {
    Error::ambiguous(
        format!(
            "relation `{relation}` is ambiguous at level {level}, found on {}",
            quoted(candidates)
        ),
        candidates.iter().map(|s| s.to_string()).collect(),
    )
}

fn quoted(names: &[&str]) -> String {
    names
        .iter()
        .map(|name| format!("`{name}`"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A node reached by [`walk_attribute_chain`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node<'a> {
    /// An object, either a relation element or a nested object.
    Object(&'a Object),
    /// A plain value.
    Value(&'a Value),
}

impl Node<'_> {
    pub(crate) fn human(&self) -> &'static str {
        match self {
            Node::Object(_) => "object",
            Node::Value(value) => value.human(),
        }
    }
}

/// Follows a chain of attribute names from an object.
///
/// Relations fan out: every element is followed through the rest of the chain
/// in declared order, so the output of nested relations is grouped by outer
/// element. A relation named by the last segment yields each of its elements
/// and any other attribute yields itself. A nested object in the middle of the
/// chain is descended into. An empty chain yields the root.
///
/// The walk is lazy. It yields an error and stops if an attribute is missing or
/// a plain value is found where the chain continues.
///
/// ```
/// use relplate::{Node, Object, Value};
///
/// let federate = Object::new().with_relation("interactions", [
///     Object::new().with_relation("parameters", [
///         Object::new().with_value("name", "ScenarioName"),
///         Object::new().with_value("name", "InitialFuelAmount"),
///     ]),
///     Object::new().with_relation("parameters", [
///         Object::new().with_value("name", "TimeScaleFactor"),
///     ]),
/// ]);
///
/// let names: Vec<_> = relplate::walk_attribute_chain(&federate, &["interactions", "parameters", "name"])
///     .map(|node| match node {
///         Ok(Node::Value(Value::String(s))) => s.as_str(),
///         _ => unreachable!(),
///     })
///     .collect();
/// assert_eq!(names, ["ScenarioName", "InitialFuelAmount", "TimeScaleFactor"]);
/// ```
pub fn walk_attribute_chain<'a, 'c, S>(root: &'a Object, chain: &'c [S]) -> AttributeWalker<'a, 'c, S>
where
    S: AsRef<str>,
{
    AttributeWalker {
        chain,
        stack: vec![Frame::One(root, 0)],
    }
}

/// The iterator returned by [`walk_attribute_chain`].
#[derive(Debug)]
pub struct AttributeWalker<'a, 'c, S> {
    chain: &'c [S],
    stack: Vec<Frame<'a>>,
}

/// A pending part of the walk, with the number of chain segments already
/// applied to reach it.
#[derive(Debug)]
enum Frame<'a> {
    One(&'a Object, usize),
    Many(slice::Iter<'a, Object>, usize),
}

impl<'a, S> AttributeWalker<'a, '_, S>
where
    S: AsRef<str>,
{
    fn fail(&mut self, msg: String) -> Option<Result<Node<'a>>> {
        self.stack.clear();
        Some(Err(Error::new(ErrorKind::AttributeResolution, msg)))
    }
}

impl<'a, S> Iterator for AttributeWalker<'a, '_, S>
where
    S: AsRef<str>,
{
    type Item = Result<Node<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (object, depth) = match self.stack.last_mut()? {
                Frame::One(object, depth) => {
                    let next = (*object, *depth);
                    self.stack.pop();
                    next
                }
                Frame::Many(elements, depth) => match elements.next() {
                    Some(object) => (object, *depth),
                    None => {
                        self.stack.pop();
                        continue;
                    }
                },
            };

            let Some(name) = self.chain.get(depth).map(AsRef::as_ref) else {
                return Some(Ok(Node::Object(object)));
            };
            match object.attr(name) {
                Some(Attr::Relation(elements)) => {
                    self.stack.push(Frame::Many(elements.iter(), depth + 1));
                }
                Some(Attr::Object(nested)) => {
                    self.stack.push(Frame::One(nested, depth + 1));
                }
                Some(Attr::Value(value)) => match self.chain.get(depth + 1) {
                    None => return Some(Ok(Node::Value(value))),
                    Some(next) => {
                        let msg = format!(
                            "cannot access attribute `{}` of {}",
                            next.as_ref(),
                            value.human()
                        );
                        return self.fail(msg);
                    }
                },
                None => {
                    let msg = format!("attribute `{name}` not found");
                    return self.fail(msg);
                }
            }
        }
    }
}

impl<S> FusedIterator for AttributeWalker<'_, '_, S> where S: AsRef<str> {}
