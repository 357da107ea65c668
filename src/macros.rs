/// Build a [`Value`][crate::Value] map from a data literal.
///
/// The literal is the shape a [`Tree`][crate::Tree] or an
/// [`Object`][crate::Object] is made from: identifier keys in declaration
/// order, nested `{..}` maps, `[..]` lists, `None`, and single-token
/// scalars such as string and integer literals. Anything else can be wrapped
/// in parentheses, `(expr)`, and is converted with `Value::from`.
///
/// # Examples
///
/// ```
/// let federate = relplate::value! {
///     classname: "Federate",
///     interactions: [
///         { varname: "start", parameters: [{ varname: "timeScaleFactor" }] },
///     ],
/// };
/// ```
#[macro_export]
macro_rules! value {
    (@elem None) => {
        $crate::Value::None
    };

    (@elem { $($entries:tt)* }) => {
        $crate::value!($($entries)*)
    };

    (@elem [ $($elem:tt),* $(,)? ]) => {
        $crate::Value::List(::std::vec![$($crate::value!(@elem $elem)),*])
    };

    (@elem $scalar:tt) => {
        $crate::Value::from($scalar)
    };

    ($($key:ident : $elem:tt),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut map = $crate::Map::<::std::string::String, $crate::Value>::new();
        $(
            map.insert(
                ::std::string::String::from(::std::stringify!($key)),
                $crate::value!(@elem $elem),
            );
        )*
        $crate::Value::Map(map)
    }};
}
