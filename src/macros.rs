/// Builds a [`Value`](crate::Value) from JSON-like literal syntax.
///
/// Keys are string literals. Anything that is not `null`, a boolean, an array
/// or a table literal is converted with [`to_value`](crate::to_value); wrap
/// multi-token expressions in parentheses. An expression that fails to
/// serialize (a map with non-string keys, say) becomes `Null`. Call
/// [`to_value`](crate::to_value) directly to see the error instead.
///
/// ```rust
/// use tomldoc::{toml, Value};
///
/// let server = toml!({
///     "host": "localhost",
///     "ports": [8080, 8081],
///     "tls": { "enabled": true }
/// });
/// assert_eq!(server["ports"][1], Value::from(8081));
/// ```
#[macro_export]
macro_rules! toml {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array($crate::Array::new())
    };

    ([ $($elem:tt),* $(,)? ]) => {{
        let mut array = $crate::Array::new();
        $(
            array.push_back($crate::toml!($elem));
        )*
        $crate::Value::Array(array)
    }};

    ({}) => {
        $crate::Value::Table($crate::Table::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut table = $crate::Table::new();
        $(
            table.insert($key, $crate::toml!($value));
        )*
        $crate::Value::Table(table)
    }};

    ($other:expr) => {{
        $crate::to_value(&$other).unwrap_or($crate::Value::Null)
    }};
}
