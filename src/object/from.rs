use crate::object::{Attr, Object};
use crate::value::Map;
use crate::{Error, ErrorKind, Result, Value};

impl TryFrom<Value> for Object {
    type Error = Error;

    /// Converts a map into an object.
    ///
    /// A nested map becomes [`Attr::Object`], a list that is empty or holds
    /// only maps becomes [`Attr::Relation`], and anything else is kept as
    /// [`Attr::Value`].
    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Map(map) => map
                .into_iter()
                .map(|(name, value)| Attr::try_from(value).map(|attr| (name, attr)))
                .collect(),
            value => Err(Error::new(
                ErrorKind::Data,
                format!("expected map to convert into an object, found {}", value.human()),
            )),
        }
    }
}

impl TryFrom<Value> for Attr {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Map(_) => Ok(Attr::Object(Object::try_from(value)?)),
            Value::List(list) if list.iter().all(|v| matches!(v, Value::Map(_))) => list
                .into_iter()
                .map(Object::try_from)
                .collect::<Result<_>>()
                .map(Attr::Relation),
            value => Ok(Attr::Value(value)),
        }
    }
}

impl<K> FromIterator<(K, Attr)> for Object
where
    K: Into<String>,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, Attr)>,
    {
        Self {
            attrs: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl From<Object> for Value {
    /// Lowers an object back into a plain tree.
    ///
    /// Relations become lists of maps, so the result can be indexed with a
    /// [`Tree`][crate::Tree].
    fn from(object: Object) -> Self {
        Value::Map(
            object
                .attrs
                .into_iter()
                .map(|(name, attr)| (name, Value::from(attr)))
                .collect::<Map<_, _>>(),
        )
    }
}

impl From<Attr> for Value {
    fn from(attr: Attr) -> Self {
        match attr {
            Attr::Value(value) => value,
            Attr::Object(object) => object.into(),
            Attr::Relation(elements) => elements.into_iter().map(Value::from).collect(),
        }
    }
}

/// Convert a `T` to an [`Object`].
///
/// The value is first serialized with [`to_value`][crate::to_value] and then
/// converted with [`Object::try_from`].
///
/// # Errors
///
/// If serialization fails or the value is not a map.
#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
pub fn to_object<T>(value: T) -> Result<Object>
where
    T: serde::Serialize,
{
    Object::try_from(crate::to_value(value)?)
}
