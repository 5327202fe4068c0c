use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// An error object captured alongside a recorded event.
///
/// The concrete error type is retained, so assertions can recover it
/// with [`CapturedError::is`] or [`CapturedError::downcast_ref`] even
/// though the sink only stores a `dyn Error`.
#[derive(Clone)]
pub struct CapturedError {
    inner: Arc<dyn Error + Send + Sync + 'static>,
    type_name: &'static str,
}

impl CapturedError {
    /// Captures `error`, remembering its concrete type name for reporting.
    pub fn new<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(error),
            type_name: std::any::type_name::<E>(),
        }
    }

    /// Whether the captured error is of concrete type `T`.
    #[must_use]
    pub fn is<T: Error + 'static>(&self) -> bool {
        self.inner.downcast_ref::<T>().is_some()
    }

    /// Returns the captured error as `T`, if it is one.
    #[must_use]
    pub fn downcast_ref<T: Error + 'static>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// The error's own message.
    #[must_use]
    pub fn message(&self) -> String {
        self.inner.to_string()
    }

    /// The name of the concrete type this error was captured from.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The next error in the cause chain, if any.
    #[must_use]
    pub fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.inner.source()
    }
}

impl PartialEq for CapturedError {
    // identity, not message equality
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for CapturedError {}

impl fmt::Debug for CapturedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.type_name, self.inner)
    }
}

impl fmt::Display for CapturedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

/// An argument value attached to a recorded event.
///
/// Values compare by content: sequences element-wise and nested, scalars
/// by value, `Null` only against `Null`. Captured errors are the exception
/// and compare by identity.
#[derive(Debug, Clone)]
pub enum Value {
    /// An explicit non-value. Valid on either side of a comparison.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// An ordered sequence, compared by deep element-wise equality.
    Seq(Vec<Value>),
    /// An error object, compared by identity.
    Error(CapturedError),
}

impl Value {
    /// Wraps `error` for use as a recording argument.
    pub fn error<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Value::Error(CapturedError::new(error))
    }

    /// Builds a sequence value from anything convertible.
    pub fn seq<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::Seq(items.into_iter().map(Into::into).collect())
    }

    /// Returns the inner captured error, if this value is one.
    #[must_use]
    pub fn as_error(&self) -> Option<&CapturedError> {
        match self {
            Value::Error(err) => Some(err),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Seq(a), Value::Seq(b)) => a == b,
            (Value::Error(a), Value::Error(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Str(v) => write!(f, "{v}"),
            Value::Seq(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Error(err) => write!(f, "{err}"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<usize> for Value {
    /// Saturates at `i64::MAX` for values that do not fit.
    fn from(v: usize) -> Self {
        Value::Int(i64::try_from(v).unwrap_or(i64::MAX))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<CapturedError> for Value {
    fn from(v: CapturedError) -> Self {
        Value::Error(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Seq(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}
