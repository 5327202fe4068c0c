/// Builds a `Vec<Value>` from anything convertible into a
/// [`Value`](crate::Value).
///
/// ```
/// use logcap::{args, Value};
///
/// let args = args!["World", 42, vec![1, 2]];
/// assert_eq!(args[1], Value::Int(42));
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($arg)),+]
    };
}
