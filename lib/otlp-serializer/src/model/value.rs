/// An attribute value, as handed over by the SDK.
///
/// This mirrors the OTLP `AnyValue` shape, plus two variants for values coming from dynamically typed sources:
/// [`Number`][Self::Number] holds a numeric value whose integer-ness is only known at runtime, and
/// [`Empty`][Self::Empty] stands in for null or otherwise unsupported values.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum AttributeValue {
    /// A string.
    String(String),

    /// A boolean.
    Bool(bool),

    /// A signed 64-bit integer.
    Int(i64),

    /// A double-precision floating-point number.
    Double(f64),

    /// An untyped number.
    ///
    /// Encoded as an integer when it holds a safe integer, and as a double otherwise.
    Number(f64),

    /// A raw byte sequence.
    Bytes(Vec<u8>),

    /// An ordered list of values.
    Array(Vec<AttributeValue>),

    /// An ordered list of key/value pairs.
    Map(Vec<KeyValue>),

    /// No value.
    ///
    /// Encoded as an `AnyValue` with no variant set.
    #[default]
    Empty,
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<Vec<u8>> for AttributeValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<Vec<AttributeValue>> for AttributeValue {
    fn from(value: Vec<AttributeValue>) -> Self {
        Self::Array(value)
    }
}

impl From<Vec<KeyValue>> for AttributeValue {
    fn from(value: Vec<KeyValue>) -> Self {
        Self::Map(value)
    }
}

impl<T: Into<AttributeValue>> From<Option<T>> for AttributeValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

/// A key/value pair.
///
/// Keys are not required to be unique within a list of attributes, and their order is preserved on the wire.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyValue {
    /// The key.
    pub key: String,

    /// The value.
    pub value: AttributeValue,
}

impl KeyValue {
    /// Creates a new `KeyValue`.
    pub fn new<K, V>(key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<AttributeValue>,
    {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// An ordered list of attributes.
pub type Attributes = Vec<KeyValue>;
