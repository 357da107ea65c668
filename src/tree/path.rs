use std::fmt;
use std::ops::Deref;

use crate::Value;

/// A single step in a [`Path`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A map key.
    Key(String),
    /// A concrete index into a list.
    Index(usize),
    /// Any index of an enclosing list.
    Any,
}

/// An ordered sequence of segments locating a node in a tree.
///
/// A *concrete* path is made of keys and indexes and points at exactly one
/// node. A *canonical* path is made of keys and wildcards and describes a
/// position in the schema, standing in for every concrete path that differs
/// only in its indexes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Segment {
    /// Returns the key if this is a key segment.
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Segment::Key(key) => Some(key),
            _ => None,
        }
    }
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Segment::Key(key.to_owned())
    }
}

impl From<String> for Segment {
    fn from(key: String) -> Self {
        Segment::Key(key)
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Segment::Index(index)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => f.write_str(key),
            Segment::Index(index) => write!(f, "{index}"),
            Segment::Any => f.write_str("*"),
        }
    }
}

impl Path {
    /// Construct an empty path, pointing at the root.
    pub const fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Construct a path of map keys.
    ///
    /// ```
    /// let path = relplate::Path::from_keys(["federate", "interactions"]);
    /// assert_eq!(path.to_string(), "federate.interactions");
    /// ```
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        keys.into_iter().map(|k| Segment::Key(k.into())).collect()
    }

    /// Returns a new path with the segment appended.
    pub fn join(&self, segment: impl Into<Segment>) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment.into());
        Self { segments }
    }

    pub(crate) fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Returns the key of the last segment, if it is a key.
    pub fn last_key(&self) -> Option<&str> {
        self.segments.last().and_then(Segment::as_key)
    }

    /// Returns the keys of this path, skipping indexes and wildcards.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(Segment::as_key)
    }

    /// Returns `true` if this canonical path matches the concrete path.
    ///
    /// See [`matches`].
    #[inline]
    pub fn matches(&self, concrete: &Path) -> bool {
        matches(self, concrete)
    }
}

impl Deref for Path {
    type Target = [Segment];

    fn deref(&self) -> &Self::Target {
        &self.segments
    }
}

impl FromIterator<Segment> for Path {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Segment>> for Path {
    fn from(segments: Vec<Segment>) -> Self {
        Self { segments }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// Returns `true` if the canonical path matches the concrete path.
///
/// The paths must have the same length. Key segments must be equal and a
/// wildcard in the canonical path absorbs any index in the concrete path.
///
/// ```
/// use relplate::{Path, Segment};
///
/// let canonical: Path = vec!["interactions".into(), Segment::Any].into();
/// let concrete: Path = vec!["interactions".into(), Segment::Index(1)].into();
/// assert!(relplate::matches(&canonical, &concrete));
/// ```
pub fn matches(canonical: &[Segment], concrete: &[Segment]) -> bool {
    canonical.len() == concrete.len()
        && canonical
            .iter()
            .zip(concrete)
            .all(|(p, k)| matches!((p, k), (Segment::Any, Segment::Index(_))) || p == k)
}

/// Enumerates every path reachable from the root of the tree.
///
/// The traversal is depth first and includes intermediate paths, so a map
/// entry is listed before the entries nested inside it. List elements
/// contribute index segments.
pub fn concrete_paths(tree: &Value) -> Vec<Path> {
    let mut paths = Vec::new();
    collect_concrete(tree, &Path::new(), &mut paths);
    paths
}

fn collect_concrete(tree: &Value, parent: &Path, paths: &mut Vec<Path>) {
    match tree {
        Value::Map(map) => {
            for (key, value) in map {
                let path = parent.join(key.as_str());
                paths.push(path.clone());
                collect_concrete(value, &path, paths);
            }
        }
        Value::List(list) => {
            for (i, value) in list.iter().enumerate() {
                let path = parent.join(i);
                paths.push(path.clone());
                collect_concrete(value, &path, paths);
            }
        }
        _ => {}
    }
}

/// Returns the node at the concrete path.
///
/// Returns `None` if a key is missing, an index is out of bounds, or the path
/// contains a wildcard.
pub fn get<'a>(tree: &'a Value, path: &[Segment]) -> Option<&'a Value> {
    path.iter().try_fold(tree, |node, segment| match (node, segment) {
        (Value::Map(map), Segment::Key(key)) => map.get(key),
        (Value::List(list), Segment::Index(i)) => list.get(*i),
        _ => None,
    })
}
