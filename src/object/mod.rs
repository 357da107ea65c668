//! Defines the [`Object`] graph that templates are expanded against.

mod from;

use crate::value::Map;
use crate::Value;

#[cfg(feature = "serde")]
pub use crate::object::from::to_object;

/// A node in the object graph.
///
/// An object is a closed registry of named attributes. Each attribute declares
/// up front whether it is a plain value, a single nested object, or a one to
/// many relation, so resolving a name never needs to guess what an attribute
/// holds. Attributes keep the order in which they were added.
///
/// # Examples
///
/// ```
/// use relplate::Object;
///
/// let federate = Object::new()
///     .with_value("classname", "Federate")
///     .with_object("fom", Object::new().with_value("filenames_literal", "{ L\"Base.xml\" }"))
///     .with_relation("interactions", [
///         Object::new().with_value("varname", "loadScenario"),
///         Object::new().with_value("varname", "start"),
///     ]);
///
/// assert_eq!(federate.relation("interactions").map(<[_]>::len), Some(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object {
    attrs: Map<String, Attr>,
}

/// An attribute of an [`Object`].
#[derive(Debug, Clone, PartialEq)]
pub enum Attr {
    /// A plain value, usually a scalar.
    Value(Value),
    /// A single nested object.
    Object(Object),
    /// An ordered one to many relation.
    Relation(Vec<Object>),
}

impl Object {
    /// Construct an object with no attributes.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value attribute.
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, Attr::Value(value.into()));
        self
    }

    /// Add a nested object attribute.
    pub fn with_object(mut self, name: impl Into<String>, object: Object) -> Self {
        self.insert(name, Attr::Object(object));
        self
    }

    /// Add a relation attribute.
    pub fn with_relation<I>(mut self, name: impl Into<String>, elements: I) -> Self
    where
        I: IntoIterator<Item = Object>,
    {
        self.insert(name, Attr::Relation(elements.into_iter().collect()));
        self
    }

    /// Insert an attribute, returning the previous attribute with that name.
    pub fn insert(&mut self, name: impl Into<String>, attr: Attr) -> Option<Attr> {
        self.attrs.insert(name.into(), attr)
    }

    /// Returns the attribute with the given name.
    #[inline]
    pub fn attr(&self, name: &str) -> Option<&Attr> {
        self.attrs.get(name)
    }

    /// Returns the value attribute with the given name.
    pub fn value(&self, name: &str) -> Option<&Value> {
        match self.attr(name)? {
            Attr::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the nested object attribute with the given name.
    pub fn object(&self, name: &str) -> Option<&Object> {
        match self.attr(name)? {
            Attr::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Returns the elements of the relation with the given name.
    pub fn relation(&self, name: &str) -> Option<&[Object]> {
        match self.attr(name)? {
            Attr::Relation(elements) => Some(elements),
            _ => None,
        }
    }

    /// Returns every relation of this object in declaration order.
    pub fn relations(&self) -> impl Iterator<Item = (&str, &[Object])> {
        self.attrs.iter().filter_map(|(name, attr)| match attr {
            Attr::Relation(elements) => Some((name.as_str(), elements.as_slice())),
            _ => None,
        })
    }

    /// Returns every attribute of this object in declaration order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &Attr)> {
        self.attrs.iter().map(|(name, attr)| (name.as_str(), attr))
    }

    /// Returns the number of attributes.
    #[inline]
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// Returns `true` if the object has no attributes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}

impl Attr {
    pub(crate) fn human(&self) -> &'static str {
        match self {
            Attr::Value(value) => value.human(),
            Attr::Object(_) => "object",
            Attr::Relation(_) => "relation",
        }
    }
}
