//! Attribute value encoding.
//!
//! Attribute values are encoded in one of two ways: [`to_any_value`] builds a plain `AnyValue` tree, which is how the
//! JSON form of a request is produced, and [`write_any_value`] streams the value straight into a [`ProtoSink`]
//! without building anything in between.

use protowire::{ProtoSink, WireType};
use serde::{ser::SerializeMap as _, Serialize, Serializer};

use crate::{
    encoding::{EncodedBytes, Encoder},
    model::{AttributeValue, KeyValue},
};

/// Largest integer magnitude that an IEEE-754 double represents exactly, along with every integer below it.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

const ANY_VALUE_STRING: u32 = 1;
const ANY_VALUE_BOOL: u32 = 2;
const ANY_VALUE_INT: u32 = 3;
const ANY_VALUE_DOUBLE: u32 = 4;
const ANY_VALUE_ARRAY: u32 = 5;
const ANY_VALUE_KVLIST: u32 = 6;
const ANY_VALUE_BYTES: u32 = 7;

const VALUES: u32 = 1;

const KEY_VALUE_KEY: u32 = 1;
const KEY_VALUE_VALUE: u32 = 2;

/// Returns `number` as an integer if it is one, and if it lies within the range doubles represent exactly.
///
/// Outside of that range, a double no longer tells apart neighboring integers, so calling it an integer would claim a
/// precision the value does not have. Such numbers, along with NaN, infinities and anything with a fractional part,
/// stay doubles.
pub fn as_safe_integer(number: f64) -> Option<i64> {
    if number.is_finite() && number.fract() == 0.0 && number.abs() <= MAX_SAFE_INTEGER {
        Some(number as i64)
    } else {
        None
    }
}

/// An OTLP `AnyValue`, as a plain tree.
///
/// Serializes to the OTLP/JSON representation: an object with at most one key, named after the populated variant.
/// [`AnyValue::Empty`] serializes to an empty object.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum AnyValue {
    /// No value.
    #[default]
    Empty,

    /// `stringValue`.
    String(String),

    /// `boolValue`.
    Bool(bool),

    /// `intValue`.
    Int(i64),

    /// `doubleValue`.
    Double(f64),

    /// `bytesValue`.
    Bytes(EncodedBytes),

    /// `arrayValue`.
    Array(Vec<AnyValue>),

    /// `kvlistValue`.
    KvList(Vec<EncodedKeyValue>),
}

/// An OTLP `KeyValue`, as a plain tree.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct EncodedKeyValue {
    /// The key.
    pub key: String,

    /// The value.
    pub value: AnyValue,
}

#[derive(Serialize)]
struct Values<'a, T> {
    values: &'a [T],
}

impl Serialize for AnyValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if let AnyValue::Empty = self {
            return serializer.serialize_map(Some(0))?.end();
        }

        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            AnyValue::Empty => {}
            AnyValue::String(value) => map.serialize_entry("stringValue", value)?,
            AnyValue::Bool(value) => map.serialize_entry("boolValue", value)?,
            AnyValue::Int(value) => map.serialize_entry("intValue", value)?,
            AnyValue::Double(value) => map.serialize_entry("doubleValue", value)?,
            AnyValue::Bytes(value) => map.serialize_entry("bytesValue", value)?,
            AnyValue::Array(values) => map.serialize_entry("arrayValue", &Values { values })?,
            AnyValue::KvList(values) => map.serialize_entry("kvlistValue", &Values { values })?,
        }
        map.end()
    }
}

/// Converts an attribute value to a plain `AnyValue` tree.
///
/// Byte sequences are encoded with `encoder`. Arrays and maps are converted recursively, preserving order.
/// [`AttributeValue::Empty`] becomes [`AnyValue::Empty`]: this never fails.
pub fn to_any_value(value: &AttributeValue, encoder: &Encoder) -> AnyValue {
    match value {
        AttributeValue::String(value) => AnyValue::String(value.clone()),
        AttributeValue::Bool(value) => AnyValue::Bool(*value),
        AttributeValue::Int(value) => AnyValue::Int(*value),
        AttributeValue::Double(value) => AnyValue::Double(*value),
        AttributeValue::Number(value) => match as_safe_integer(*value) {
            Some(value) => AnyValue::Int(value),
            None => AnyValue::Double(*value),
        },
        AttributeValue::Bytes(value) => AnyValue::Bytes(encoder.bytes(value)),
        AttributeValue::Array(values) => {
            AnyValue::Array(values.iter().map(|value| to_any_value(value, encoder)).collect())
        }
        AttributeValue::Map(values) => AnyValue::KvList(to_attributes(values, encoder)),
        AttributeValue::Empty => AnyValue::Empty,
    }
}

/// Converts a key/value pair to its plain form.
pub fn to_key_value(kv: &KeyValue, encoder: &Encoder) -> EncodedKeyValue {
    EncodedKeyValue {
        key: kv.key.clone(),
        value: to_any_value(&kv.value, encoder),
    }
}

/// Converts a list of attributes to its plain form.
pub fn to_attributes(attributes: &[KeyValue], encoder: &Encoder) -> Vec<EncodedKeyValue> {
    attributes.iter().map(|kv| to_key_value(kv, encoder)).collect()
}

/// Writes the content of an `AnyValue` message holding `value`.
///
/// Exactly one variant field is written, even when it holds a default value, since the variants form a `oneof`.
/// [`AttributeValue::Empty`] writes nothing, leaving an empty message.
pub fn write_any_value<S: ProtoSink>(sink: &mut S, value: &AttributeValue) {
    match value {
        AttributeValue::String(value) => {
            sink.write_tag(ANY_VALUE_STRING, WireType::LengthDelimited);
            sink.write_string(value);
        }
        AttributeValue::Bool(value) => {
            sink.write_tag(ANY_VALUE_BOOL, WireType::Varint);
            sink.write_bool(*value);
        }
        AttributeValue::Int(value) => write_int_value(sink, *value),
        AttributeValue::Double(value) => write_double_value(sink, *value),
        AttributeValue::Number(value) => match as_safe_integer(*value) {
            Some(value) => write_int_value(sink, value),
            None => write_double_value(sink, *value),
        },
        AttributeValue::Bytes(value) => {
            sink.write_tag(ANY_VALUE_BYTES, WireType::LengthDelimited);
            sink.write_bytes(value);
        }
        AttributeValue::Array(values) => sink.write_message(ANY_VALUE_ARRAY, |sink| {
            for value in values {
                sink.write_message(VALUES, |sink| write_any_value(sink, value));
            }
        }),
        AttributeValue::Map(values) => {
            sink.write_message(ANY_VALUE_KVLIST, |sink| write_attributes(sink, VALUES, values))
        }
        AttributeValue::Empty => {}
    }
}

fn write_int_value<S: ProtoSink>(sink: &mut S, value: i64) {
    sink.write_tag(ANY_VALUE_INT, WireType::Varint);
    sink.write_int64(value);
}

fn write_double_value<S: ProtoSink>(sink: &mut S, value: f64) {
    sink.write_tag(ANY_VALUE_DOUBLE, WireType::Fixed64);
    sink.write_double(value);
}

/// Writes the content of a `KeyValue` message.
///
/// The value submessage is always written, even when empty.
pub fn write_key_value<S: ProtoSink>(sink: &mut S, kv: &KeyValue) {
    sink.write_string_field(KEY_VALUE_KEY, &kv.key);
    sink.write_message(KEY_VALUE_VALUE, |sink| write_any_value(sink, &kv.value));
}

/// Writes each attribute as a `KeyValue` message in the given repeated field.
pub fn write_attributes<S: ProtoSink>(sink: &mut S, field_number: u32, attributes: &[KeyValue]) {
    for kv in attributes {
        sink.write_message(field_number, |sink| write_key_value(sink, kv));
    }
}
