//! Conversions into a [`Value`] for the object builders and the serializer.

use crate::value::Map;
use crate::Value;

macro_rules! impl_from_scalar {
    ($variant:ident($target:ty): $($ty:ty),+) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$variant(<$target>::from(v))
                }
            }
        )+
    };
}

impl_from_scalar!(Bool(bool): bool);
impl_from_scalar!(Integer(i64): u8, u16, u32, i8, i16, i32, i64);
impl_from_scalar!(Float(f64): f32, f64);
impl_from_scalar!(String(String): String, &str);

impl<V: Into<Value>> From<Vec<V>> for Value {
    fn from(list: Vec<V>) -> Self {
        list.into_iter().collect()
    }
}

impl<V: Into<Value>> From<Map<String, V>> for Value {
    fn from(map: Map<String, V>) -> Self {
        Self::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

/// Collects the items into a [`Value::List`].
impl<V: Into<Value>> FromIterator<V> for Value {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self::List(iter.into_iter().map(Into::into).collect())
    }
}
