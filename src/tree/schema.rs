use std::mem;

use crate::tree::path::{Path, Segment};
use crate::value::Map;
use crate::{Error, ErrorKind, Result, Value};

/// The shape of a tree.
///
/// A schema mirrors the map keys of a tree. Every list is collapsed into a
/// single representative shape, the union of the shapes of all its elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schema {
    /// A leaf value, or a shape about which nothing is known yet.
    Scalar,
    /// A map of shapes.
    Map(Map<String, Schema>),
    /// A list of the contained shape.
    List(Box<Schema>),
}

impl Default for Schema {
    fn default() -> Self {
        Self::Scalar
    }
}

impl Schema {
    /// Infers the schema of a tree.
    ///
    /// ```
    /// use relplate::{value, Schema};
    ///
    /// let tree = value! { items: [{ a: 1 }, { b: 2 }] };
    /// let schema = Schema::infer(&tree);
    /// let items = schema.get("items").unwrap().element().unwrap();
    /// assert!(items.get("a").is_some() && items.get("b").is_some());
    /// ```
    pub fn infer(tree: &Value) -> Self {
        match tree {
            Value::Map(map) => Schema::Map(
                map.iter()
                    .map(|(k, v)| (k.clone(), Schema::infer(v)))
                    .collect(),
            ),
            Value::List(list) => Schema::List(Box::new(
                list.iter()
                    .map(Schema::infer)
                    .fold(Schema::Scalar, Schema::union),
            )),
            _ => Schema::Scalar,
        }
    }

    /// Combines two shapes into one that describes both.
    ///
    /// [`Schema::Scalar`] is the identity. Maps take the union of their keys,
    /// merging shapes under common keys, and lists merge their element shapes.
    /// When a map meets a list the first shape is kept.
    pub fn union(self, other: Schema) -> Schema {
        match (self, other) {
            (Schema::Scalar, other) => other,
            (this, Schema::Scalar) => this,
            (Schema::Map(mut this), Schema::Map(other)) => {
                for (key, shape) in other {
                    match this.get_mut(&key) {
                        Some(existing) => *existing = mem::take(existing).union(shape),
                        None => {
                            this.insert(key, shape);
                        }
                    }
                }
                Schema::Map(this)
            }
            (Schema::List(this), Schema::List(other)) => Schema::List(Box::new(this.union(*other))),
            (this, _) => this,
        }
    }

    /// Returns the shape under the given key if this is a map shape.
    pub fn get(&self, key: &str) -> Option<&Schema> {
        match self {
            Schema::Map(map) => map.get(key),
            _ => None,
        }
    }

    /// Returns the element shape if this is a list shape.
    pub fn element(&self) -> Option<&Schema> {
        match self {
            Schema::List(inner) => Some(inner),
            _ => None,
        }
    }

    /// Enumerates every canonical path of this schema.
    ///
    /// See [`canonical_paths`].
    pub fn paths(&self) -> Vec<Path> {
        canonical_paths(self)
    }

    /// Inserts wildcards into the path wherever this schema has a list.
    ///
    /// See [`canonicalize`].
    pub fn canonicalize(&self, path: &[Segment]) -> Result<Path> {
        canonicalize(self, path)
    }
}

/// Infers the schema of a tree.
///
/// See [`Schema::infer`].
#[inline]
pub fn infer(tree: &Value) -> Schema {
    Schema::infer(tree)
}

/// Enumerates every canonical path of a schema.
///
/// The traversal mirrors [`concrete_paths`][crate::concrete_paths] except that
/// entering a list emits a single [`Segment::Any`] instead of one index per
/// element.
pub fn canonical_paths(schema: &Schema) -> Vec<Path> {
    let mut paths = Vec::new();
    collect_canonical(schema, &Path::new(), &mut paths);
    paths
}

fn collect_canonical(schema: &Schema, parent: &Path, paths: &mut Vec<Path>) {
    match schema {
        Schema::Map(map) => {
            for (key, shape) in map {
                let path = parent.join(key.as_str());
                paths.push(path.clone());
                collect_canonical(shape, &path, paths);
            }
        }
        Schema::List(inner) => {
            let path = parent.join(Segment::Any);
            paths.push(path.clone());
            collect_canonical(inner, &path, paths);
        }
        Schema::Scalar => {}
    }
}

/// Inserts wildcards into a path wherever the schema has a list.
///
/// The path may omit the wildcards at list traversal points, an index given at
/// a list point is replaced by a wildcard, and a path that ends on a list shape
/// gets a trailing wildcard.
///
/// # Errors
///
/// If a key has no corresponding entry in the schema.
///
/// ```
/// use relplate::{value, Path, Schema};
///
/// let tree = value! { federate: { interactions: [{ parameters: [{ name: "speed" }] }] } };
/// let schema = Schema::infer(&tree);
/// let path = schema.canonicalize(&Path::from_keys(["federate", "interactions", "parameters"]))?;
/// assert_eq!(path.to_string(), "federate.interactions.*.parameters.*");
/// # Ok::<(), relplate::Error>(())
/// ```
pub fn canonicalize(schema: &Schema, path: &[Segment]) -> Result<Path> {
    let mut canonical = Path::new();
    let mut shape = schema;
    let mut segments = path.iter().peekable();

    loop {
        if let Schema::List(inner) = shape {
            if let Some(Segment::Any | Segment::Index(_)) = segments.peek() {
                segments.next();
            }
            canonical.push(Segment::Any);
            shape = inner;
            if segments.peek().is_none() {
                return Ok(canonical);
            }
            continue;
        }

        let Some(segment) = segments.next() else {
            return Ok(canonical);
        };
        shape = match segment {
            Segment::Key(key) => shape.get(key).ok_or_else(|| {
                Error::new(
                    ErrorKind::PathSchemaMismatch,
                    format!("path `{canonical}` has no key `{key}` in the schema"),
                )
            })?,
            segment => {
                return Err(Error::new(
                    ErrorKind::PathSchemaMismatch,
                    format!("path `{canonical}` expected a key, found `{segment}`"),
                ));
            }
        };
        canonical.push(segment.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value;

    #[test]
    fn union_merges_sibling_shapes() {
        let tree = value! {
            items: [
                { name: "a", tags: [{ x: 1 }] },
                { name: "b", size: 2, tags: [{ y: 2 }] },
            ],
        };
        let schema = Schema::infer(&tree);
        let item = schema.get("items").and_then(Schema::element).unwrap();
        let Schema::Map(map) = item else {
            panic!("expected map shape")
        };
        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, ["name", "tags", "size"]);
        let tag = item.get("tags").and_then(Schema::element).unwrap();
        assert!(tag.get("x").is_some());
        assert!(tag.get("y").is_some());
    }

    #[test]
    fn union_scalar_is_identity() {
        let map = Schema::infer(&value! { a: 1 });
        assert_eq!(Schema::Scalar.union(map.clone()), map);
        assert_eq!(map.clone().union(Schema::Scalar), map);
    }

    #[test]
    fn union_conflict_keeps_first() {
        let list = Schema::List(Box::new(Schema::Scalar));
        let map = Schema::infer(&value! { a: 1 });
        assert_eq!(map.clone().union(list.clone()), map);
        assert_eq!(list.clone().union(map), list);
    }

    #[test]
    fn infer_empty_list() {
        let schema = Schema::infer(&value! { items: [] });
        assert_eq!(schema.get("items"), Some(&Schema::List(Box::new(Schema::Scalar))));
    }

    #[test]
    fn infer_does_not_alias_siblings() {
        let tree = value! { a: [{ x: 1 }], b: [{ y: 1 }] };
        let schema = Schema::infer(&tree);
        let a = schema.get("a").and_then(Schema::element).unwrap();
        assert!(a.get("y").is_none());
    }
}
