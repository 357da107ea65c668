//! Shape inference and wildcard path matching over [`Value`] trees.
//!
//! This module knows nothing about objects or templates. It answers two
//! questions about a plain tree: what shape does it have, and which concrete
//! locations does a wildcarded path pattern describe.

mod path;
mod schema;

pub use crate::tree::path::{concrete_paths, get, matches, Path, Segment};
pub use crate::tree::schema::{canonical_paths, canonicalize, infer, Schema};

use crate::value::Map;
use crate::{Result, Value};

/// One flattened row produced by [`branches`].
///
/// Maps each key segment of a matched path to the value found at that prefix.
pub type Branch<'a> = Map<String, &'a Value>;

/// Flattens every match of a canonical path into a row.
///
/// For each concrete path in the tree matching `canonical`, one row maps every
/// key along the path to the value at that prefix. When a key is directly
/// followed by an index, the row holds the indexed element instead of the
/// whole list. Rows follow the depth first order of [`concrete_paths`], so they
/// are grouped by outer list element and then by inner list element.
///
/// ```
/// use relplate::{value, Path, Schema};
///
/// let tree = value! {
///     interactions: [
///         { name: "Start", parameters: [{ name: "TimeScaleFactor" }] },
///     ],
/// };
/// let schema = Schema::infer(&tree);
/// let path = schema.canonicalize(&Path::from_keys(["interactions", "parameters"]))?;
/// let rows = relplate::branches(&tree, &path);
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0]["interactions"], &value! { name: "Start", parameters: [{ name: "TimeScaleFactor" }] });
/// assert_eq!(rows[0]["parameters"], &value! { name: "TimeScaleFactor" });
/// # Ok::<(), relplate::Error>(())
/// ```
pub fn branches<'a>(tree: &'a Value, canonical: &[Segment]) -> Vec<Branch<'a>> {
    concrete_paths(tree)
        .into_iter()
        .filter(|concrete| matches(canonical, concrete))
        .filter_map(|concrete| flatten(tree, &concrete))
        .collect()
}

fn flatten<'a>(tree: &'a Value, concrete: &[Segment]) -> Option<Branch<'a>> {
    let mut row = Branch::new();
    for (i, segment) in concrete.iter().enumerate() {
        let Segment::Key(key) = segment else {
            continue;
        };
        let end = match concrete.get(i + 1) {
            Some(Segment::Index(_)) => i + 2,
            _ => i + 1,
        };
        row.insert(key.clone(), get(tree, &concrete[..end])?);
    }
    Some(row)
}

/// A tree together with its inferred schema and path listings.
///
/// Construction does all the work up front, every lookup after that is a
/// query against the cached listings.
#[derive(Debug, Clone)]
pub struct Tree {
    value: Value,
    schema: Schema,
    canonical: Vec<Path>,
    concrete: Vec<Path>,
}

impl Tree {
    /// Index a tree.
    pub fn new(value: Value) -> Self {
        let schema = Schema::infer(&value);
        let canonical = canonical_paths(&schema);
        let concrete = concrete_paths(&value);
        Self {
            value,
            schema,
            canonical,
            concrete,
        }
    }

    /// Returns the underlying tree.
    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Returns the inferred schema.
    #[inline]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns every canonical path of the schema.
    #[inline]
    pub fn canonical_paths(&self) -> &[Path] {
        &self.canonical
    }

    /// Returns every concrete path of the tree.
    #[inline]
    pub fn concrete_paths(&self) -> &[Path] {
        &self.concrete
    }

    /// Returns `true` if the path is one of the canonical paths.
    pub fn is_path(&self, path: &[Segment]) -> bool {
        self.canonical.iter().any(|p| &p[..] == path)
    }

    /// Returns `true` if the path is one of the concrete paths.
    pub fn is_key(&self, path: &[Segment]) -> bool {
        self.concrete.iter().any(|p| &p[..] == path)
    }

    /// Returns the node at the concrete path.
    #[inline]
    pub fn get(&self, path: &[Segment]) -> Option<&Value> {
        get(&self.value, path)
    }

    /// Inserts wildcards into the path wherever the schema has a list.
    ///
    /// See [`canonicalize`].
    #[inline]
    pub fn canonicalize(&self, path: &[Segment]) -> Result<Path> {
        canonicalize(&self.schema, path)
    }

    /// Canonicalizes the path and flattens every match into a row.
    ///
    /// See [`branches`].
    pub fn branches(&self, path: &[Segment]) -> Result<Vec<Branch<'_>>> {
        let canonical = self.canonicalize(path)?;
        Ok(branches(&self.value, &canonical))
    }

    /// Returns every canonical path whose last key is `name`.
    pub fn find<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Path> + 'a {
        self.canonical
            .iter()
            .filter(move |p| p.last_key() == Some(name))
    }

    /// Returns the first canonical path whose last key is `name`.
    pub fn search(&self, name: &str) -> Option<&Path> {
        self.canonical.iter().find(|p| p.last_key() == Some(name))
    }
}

impl From<Value> for Tree {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}
