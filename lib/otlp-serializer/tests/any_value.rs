use opentelemetry_proto::tonic::common::v1::{
    any_value::Value, AnyValue as ProtoAnyValue, ArrayValue, KeyValue as ProtoKeyValue, KeyValueList,
};
use otlp_serializer::{
    any_value::{to_any_value, write_any_value, write_attributes, AnyValue},
    model::{AttributeValue, KeyValue},
    EncodedBytes, Encoder,
};
use proptest::prelude::*;
use prost::Message as _;
use protowire::{MessageWrite, ProtoSink};

struct SingleValue<'a>(&'a AttributeValue);

impl MessageWrite for SingleValue<'_> {
    fn write_message<S: ProtoSink>(&self, sink: &mut S) {
        write_any_value(sink, self.0);
    }
}

/// A `KeyValueList` holding the given attributes, which shares its shape with every message carrying attributes in
/// field 1.
struct AttributeList<'a>(&'a [KeyValue]);

impl MessageWrite for AttributeList<'_> {
    fn write_message<S: ProtoSink>(&self, sink: &mut S) {
        write_attributes(sink, 1, self.0);
    }
}

fn round_trip(value: &AttributeValue) -> Option<Value> {
    let encoded = SingleValue(value).encode_to_vec();
    ProtoAnyValue::decode(encoded.as_slice()).expect("should decode").value
}

/// Builds the value a standards-compliant decoder should produce for `value`.
fn expected(value: &AttributeValue) -> Option<Value> {
    match value {
        AttributeValue::String(value) => Some(Value::StringValue(value.clone())),
        AttributeValue::Bool(value) => Some(Value::BoolValue(*value)),
        AttributeValue::Int(value) => Some(Value::IntValue(*value)),
        AttributeValue::Double(value) => Some(Value::DoubleValue(*value)),
        AttributeValue::Number(value) => match otlp_serializer::any_value::as_safe_integer(*value) {
            Some(value) => Some(Value::IntValue(value)),
            None => Some(Value::DoubleValue(*value)),
        },
        AttributeValue::Bytes(value) => Some(Value::BytesValue(value.clone())),
        AttributeValue::Array(values) => Some(Value::ArrayValue(ArrayValue {
            values: values
                .iter()
                .map(|value| ProtoAnyValue { value: expected(value) })
                .collect(),
        })),
        AttributeValue::Map(values) => Some(Value::KvlistValue(KeyValueList {
            values: values.iter().map(expected_key_value).collect(),
        })),
        AttributeValue::Empty => None,
    }
}

fn expected_key_value(kv: &KeyValue) -> ProtoKeyValue {
    ProtoKeyValue {
        key: kv.key.clone(),
        value: Some(ProtoAnyValue {
            value: expected(&kv.value),
        }),
    }
}

#[test]
fn scalars() {
    assert_eq!(
        round_trip(&AttributeValue::from("hello")),
        Some(Value::StringValue("hello".to_string()))
    );
    assert_eq!(
        round_trip(&AttributeValue::from("héllo, 世界 🦀")),
        Some(Value::StringValue("héllo, 世界 🦀".to_string()))
    );
    assert_eq!(round_trip(&AttributeValue::from(true)), Some(Value::BoolValue(true)));
    assert_eq!(round_trip(&AttributeValue::from(false)), Some(Value::BoolValue(false)));
    assert_eq!(round_trip(&AttributeValue::from(1.25)), Some(Value::DoubleValue(1.25)));
    assert_eq!(
        round_trip(&AttributeValue::from(vec![0u8, 1, 2, 255])),
        Some(Value::BytesValue(vec![0, 1, 2, 255]))
    );
}

#[test]
fn defaults_inside_the_oneof_are_still_written() {
    assert_eq!(
        round_trip(&AttributeValue::from("")),
        Some(Value::StringValue(String::new()))
    );
    assert_eq!(round_trip(&AttributeValue::Int(0)), Some(Value::IntValue(0)));
    assert_eq!(round_trip(&AttributeValue::Double(0.0)), Some(Value::DoubleValue(0.0)));
    assert_eq!(round_trip(&AttributeValue::Bytes(Vec::new())), Some(Value::BytesValue(Vec::new())));
}

#[test]
fn integers_of_every_width() {
    for value in [
        0,
        1,
        -1,
        127,
        128,
        -(1 << 32),
        (1 << 32) - 1,
        i64::from(i32::MIN),
        i64::MAX,
        i64::MIN,
    ] {
        assert_eq!(
            round_trip(&AttributeValue::Int(value)),
            Some(Value::IntValue(value)),
            "value {}",
            value
        );
    }
}

#[test]
fn untyped_numbers_follow_the_safe_integer_policy() {
    assert_eq!(round_trip(&AttributeValue::Number(-4_294_967_296.0)), Some(Value::IntValue(-4_294_967_296)));
    assert_eq!(round_trip(&AttributeValue::Number(2.5)), Some(Value::DoubleValue(2.5)));
    assert_eq!(
        round_trip(&AttributeValue::Number(9_007_199_254_740_992.0)),
        Some(Value::DoubleValue(9_007_199_254_740_992.0))
    );

    let nan = round_trip(&AttributeValue::Number(f64::NAN));
    assert!(matches!(nan, Some(Value::DoubleValue(value)) if value.is_nan()));
    assert_eq!(
        round_trip(&AttributeValue::Number(f64::NEG_INFINITY)),
        Some(Value::DoubleValue(f64::NEG_INFINITY))
    );
}

#[test]
fn empty_values_decode_as_absent() {
    assert_eq!(round_trip(&AttributeValue::Empty), None);
    assert_eq!(round_trip(&AttributeValue::from(None::<bool>)), None);
}

#[test]
fn nested_arrays_and_kvlists() {
    let value = AttributeValue::Array(vec![
        AttributeValue::from(1),
        AttributeValue::Array(vec![AttributeValue::from("deep"), AttributeValue::Empty]),
        AttributeValue::Map(vec![
            KeyValue::new("k", "v"),
            KeyValue::new("k", AttributeValue::Map(vec![KeyValue::new("inner", 2.5)])),
            KeyValue::new("nothing", AttributeValue::Empty),
        ]),
    ]);

    let decoded = round_trip(&value);
    assert_eq!(decoded, expected(&value));

    let Some(Value::ArrayValue(array)) = decoded else {
        panic!("expected an array value");
    };
    assert_eq!(array.values.len(), 3);
    let Some(Value::KvlistValue(kvlist)) = &array.values[2].value else {
        panic!("expected a kvlist value");
    };
    let keys: Vec<_> = kvlist.values.iter().map(|kv| kv.key.as_str()).collect();
    assert_eq!(keys, ["k", "k", "nothing"]);
}

#[test]
fn attribute_lists_keep_duplicate_keys_in_order() {
    let attributes = vec![
        KeyValue::new("a", 1),
        KeyValue::new("b", "two"),
        KeyValue::new("a", 3),
    ];

    let encoded = AttributeList(&attributes).encode_to_vec();
    let decoded = KeyValueList::decode(encoded.as_slice()).expect("should decode");
    assert_eq!(decoded.values, attributes.iter().map(expected_key_value).collect::<Vec<_>>());
}

#[test]
fn plain_tree_encodes_bytes_with_the_strategy() {
    let value = AttributeValue::from(b"\x01\x02\x03".to_vec());
    assert_eq!(
        to_any_value(&value, &Encoder::BINARY),
        AnyValue::Bytes(EncodedBytes::Raw(vec![1, 2, 3]))
    );
    assert_eq!(
        to_any_value(&value, &Encoder::TEXT),
        AnyValue::Bytes(EncodedBytes::Base64("AQID".to_string()))
    );
}

fn arb_key() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::char::range('a', 'z'), 0..8).prop_map(|chars| chars.into_iter().collect())
}

fn arb_attribute_value() -> impl Strategy<Value = AttributeValue> {
    let leaf = prop_oneof![
        prop::collection::vec(any::<char>(), 0..24)
            .prop_map(|chars| AttributeValue::String(chars.into_iter().collect())),
        any::<bool>().prop_map(AttributeValue::Bool),
        any::<i64>().prop_map(AttributeValue::Int),
        (-1e15..1e15f64).prop_map(AttributeValue::Double),
        (-1e17..1e17f64).prop_map(|n| AttributeValue::Number(n.trunc())),
        prop::collection::vec(any::<u8>(), 0..200).prop_map(AttributeValue::Bytes),
        Just(AttributeValue::Empty),
    ];

    leaf.prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(AttributeValue::Array),
            prop::collection::vec((arb_key(), inner), 0..6).prop_map(|pairs| {
                AttributeValue::Map(pairs.into_iter().map(|(key, value)| KeyValue { key, value }).collect())
            }),
        ]
    })
}

proptest! {
    #[test]
    fn property_test_round_trip(value in arb_attribute_value()) {
        prop_assert_eq!(round_trip(&value), expected(&value));
        prop_assert_eq!(SingleValue(&value).encode_to_vec().len(), SingleValue(&value).encoded_len());
    }
}
