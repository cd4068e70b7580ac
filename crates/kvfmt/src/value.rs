//! The item type stored in key/value lists.

use std::{
    error::Error as StdError,
    fmt::{self, Debug, Display},
    sync::Arc,
};

use crate::format;

/// A single item of a key/value list.
///
/// Keys and values share this type because a list alternates between them.
/// The variant is the value's declared capability and decides how the
/// formatter renders it: `Str` and `Error` are quoted text, `Bytes` is quoted
/// with byte escapes, `Stringer` is quoted through its `Display` impl, and
/// everything else uses its default unquoted form.
#[derive(Clone)]
pub enum Value {
    /// Absent value, rendered as `<nil>`.
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    Uint(u64),
    /// Floating point number.
    Float(f64),
    /// Text.
    Str(String),
    /// Raw bytes.
    Bytes(Vec<u8>),
    /// An error, rendered through its `Display` impl.
    Error(Arc<dyn StdError + Send + Sync>),
    /// A value with a custom human-readable representation.
    Stringer(Arc<dyn Display + Send + Sync>),
    /// Any other value, rendered through its `Debug` impl.
    Debug(Arc<dyn Debug + Send + Sync>),
}

impl Value {
    /// Wrap an error.
    pub fn error<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Error(Arc::new(err))
    }

    /// Wrap an error that is only available as its message text.
    pub fn error_message(msg: impl Into<String>) -> Self {
        Self::Error(Arc::new(MessageError(msg.into())))
    }

    /// Wrap a value that should be rendered as quoted text via `Display`.
    pub fn stringer<T>(value: T) -> Self
    where
        T: Display + Send + Sync + 'static,
    {
        Self::Stringer(Arc::new(value))
    }

    /// Wrap a value that should be rendered unquoted via `Debug`.
    pub fn debug<T>(value: T) -> Self
    where
        T: Debug + Send + Sync + 'static,
    {
        Self::Debug(Arc::new(value))
    }

    /// Wrap text that was already rendered and should appear verbatim,
    /// unquoted.
    pub fn verbatim(text: impl Into<String>) -> Self {
        Self::Debug(Arc::new(Verbatim(text.into())))
    }

    /// Equality identity used when values act as keys.
    pub(crate) fn identity(&self) -> Identity<'_> {
        match self {
            Self::Null => Identity::Null,
            Self::Bool(b) => Identity::Bool(*b),
            Self::Int(i) => Identity::Int(*i),
            Self::Uint(u) => Identity::Uint(*u),
            Self::Float(f) => Identity::Float(f.to_bits()),
            Self::Str(s) => Identity::Str(s),
            Self::Bytes(b) => Identity::Bytes(b),
            Self::Error(e) => Identity::Error(e.to_string()),
            Self::Stringer(s) => Identity::Stringer(s.to_string()),
            Self::Debug(d) => Identity::Debug(format!("{d:?}")),
        }
    }
}

/// Hashable projection of a [`Value`]. Two values are the same key when
/// they have the same variant and equal content.
#[derive(Debug, PartialEq, Eq, Hash)]
pub(crate) enum Identity<'a> {
    /// See [`Value::Null`].
    Null,
    /// See [`Value::Bool`].
    Bool(bool),
    /// See [`Value::Int`].
    Int(i64),
    /// See [`Value::Uint`].
    Uint(u64),
    /// Bit pattern of a [`Value::Float`].
    Float(u64),
    /// See [`Value::Str`].
    Str(&'a str),
    /// See [`Value::Bytes`].
    Bytes(&'a [u8]),
    /// Rendered [`Value::Error`].
    Error(String),
    /// Rendered [`Value::Stringer`].
    Stringer(String),
    /// Rendered [`Value::Debug`].
    Debug(String),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Self::Uint(u) => f.debug_tuple("Uint").field(u).finish(),
            Self::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Self::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Self::Bytes(b) => f.debug_tuple("Bytes").field(b).finish(),
            Self::Error(e) => f.debug_tuple("Error").field(&e.to_string()).finish(),
            Self::Stringer(s) => f.debug_tuple("Stringer").field(&s.to_string()).finish(),
            Self::Debug(d) => f.debug_tuple("Debug").field(d).finish(),
        }
    }
}

/// Plain, unquoted text form. This is how keys are rendered.
impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("<nil>"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Uint(u) => write!(f, "{u}"),
            Self::Float(x) => f.write_str(&format::float(*x)),
            Self::Str(s) => f.write_str(s),
            Self::Bytes(b) => f.write_str(&String::from_utf8_lossy(b)),
            Self::Error(e) => write!(f, "{e}"),
            Self::Stringer(s) => write!(f, "{s}"),
            Self::Debug(d) => write!(f, "{d:?}"),
        }
    }
}

/// Error carrying only a message.
#[derive(Debug)]
struct MessageError(String);

impl Display for MessageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl StdError for MessageError {}

/// Pre-rendered text whose `Debug` output is the text itself.
struct Verbatim(String);

impl Debug for Verbatim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Self::Bytes(value.to_vec())
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Self>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Lossless integer conversions.
macro_rules! from_int {
    ($variant:ident, $target:ty, $($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(value: $t) -> Self {
                    Self::$variant(<$target>::from(value))
                }
            }
        )*
    };
}

from_int!(Int, i64, i8, i16, i32, i64);
from_int!(Uint, u64, u8, u16, u32, u64);

impl From<isize> for Value {
    fn from(value: isize) -> Self {
        i64::try_from(value).map_or_else(|_| Self::verbatim(value.to_string()), Self::Int)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        u64::try_from(value).map_or_else(|_| Self::verbatim(value.to_string()), Self::Uint)
    }
}

#[cfg(test)]
mod tests {
    use std::{fmt, io};

    use super::*;

    /// Displays as a fixed string.
    struct Pod;

    impl Display for Pod {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("kube-system/nginx")
        }
    }

    #[test]
    fn conversions_pick_variants() {
        assert!(matches!(Value::from("a"), Value::Str(_)));
        assert!(matches!(Value::from(5), Value::Int(5)));
        assert!(matches!(Value::from(5u8), Value::Uint(5)));
        assert!(matches!(Value::from(None::<i32>), Value::Null));
        assert!(matches!(Value::from(Some(2.5)), Value::Float(_)));
        assert!(matches!(Value::from(vec![1u8, 2]), Value::Bytes(_)));
        assert!(matches!(Value::from(7usize), Value::Uint(7)));
    }

    #[test]
    fn equality_is_by_kind_and_content() {
        assert_eq!(Value::from("x"), Value::from(String::from("x")));
        assert_ne!(Value::from("5"), Value::from(5));
        assert_ne!(Value::from(5i64), Value::from(5u64));
        assert_eq!(Value::stringer(Pod), Value::stringer(Pod));
        assert_eq!(
            Value::error(io::Error::other("boom")),
            Value::error_message("boom")
        );
    }

    #[test]
    fn display_is_plain() {
        assert_eq!(Value::from("a b").to_string(), "a b");
        assert_eq!(Value::Null.to_string(), "<nil>");
        assert_eq!(Value::stringer(Pod).to_string(), "kube-system/nginx");
        assert_eq!(Value::verbatim("{x:1}").to_string(), "{x:1}");
    }
}
