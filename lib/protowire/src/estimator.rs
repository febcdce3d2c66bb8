//! Exact size estimation for protobuf output.

use crate::{
    helpers::sizeof_varint,
    sink::{LengthMark, ProtoSink},
};

/// Computes the exact number of bytes a sequence of writes would produce, without producing them.
///
/// `SizeEstimator` accepts the same operations as [`ProtobufWriter`] but only advances a cursor. For any sequence of
/// operations, the estimator's final cursor equals the length of the writer's output, which allows encoding a message
/// twice: once to size the buffer, and once to fill it.
///
/// [`ProtobufWriter`]: crate::ProtobufWriter
#[derive(Debug, Default)]
pub struct SizeEstimator {
    cursor: usize,
}

impl SizeEstimator {
    /// Creates a new `SizeEstimator` with a cursor at zero.
    pub const fn new() -> Self {
        Self { cursor: 0 }
    }
}

impl ProtoSink for SizeEstimator {
    fn cursor(&self) -> usize {
        self.cursor
    }

    fn write_varint(&mut self, value: u64) {
        self.cursor += sizeof_varint(value);
    }

    fn write_fixed32(&mut self, _value: u32) {
        self.cursor += 4;
    }

    fn write_fixed64(&mut self, _value: u64) {
        self.cursor += 8;
    }

    fn write_raw(&mut self, bytes: &[u8]) {
        self.cursor += bytes.len();
    }

    fn start_length_delimited(&mut self) -> LengthMark {
        LengthMark::new(self.cursor)
    }

    fn finish_length_delimited(&mut self, _mark: LengthMark, content_length: usize) {
        self.cursor += sizeof_varint(content_length as u64);
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{helpers::WireType, ProtobufWriter};

    #[derive(Clone, Debug)]
    enum Op {
        Varint(u64),
        Int64(i64),
        Int32(i32),
        Sint32(i32),
        Fixed32(u32),
        Fixed64(u64),
        Fixed64Parts(u32, u32),
        Hrtime(u64, u32),
        Double(f64),
        Bytes(Vec<u8>),
        String(String),
        Tag(u32, WireType),
        PackedVarints(u32, Vec<u64>),
        PackedDoubles(u32, Vec<f64>),
        Message(u32, Vec<Op>),
    }

    fn apply<S: ProtoSink>(sink: &mut S, op: &Op) {
        match op {
            Op::Varint(v) => sink.write_varint(*v),
            Op::Int64(v) => sink.write_int64(*v),
            Op::Int32(v) => sink.write_int32(*v),
            Op::Sint32(v) => sink.write_sint32(*v),
            Op::Fixed32(v) => sink.write_fixed32(*v),
            Op::Fixed64(v) => sink.write_fixed64(*v),
            Op::Fixed64Parts(low, high) => sink.write_fixed64_parts(*low, *high),
            Op::Hrtime(seconds, nanos) => sink.write_fixed64_hrtime(*seconds, *nanos),
            Op::Double(v) => sink.write_double(*v),
            Op::Bytes(v) => sink.write_bytes(v),
            Op::String(v) => sink.write_string(v),
            Op::Tag(field_number, wire_type) => sink.write_tag(*field_number, *wire_type),
            Op::PackedVarints(field_number, values) => sink.write_packed_varint_field(*field_number, values),
            Op::PackedDoubles(field_number, values) => sink.write_packed_double_field(*field_number, values),
            Op::Message(field_number, ops) => sink.write_message(*field_number, |sink| {
                for op in ops {
                    apply(sink, op);
                }
            }),
        }
    }

    /// Runs `ops` through an estimator and two writers (one starting empty, one presized from the estimate), and
    /// asserts that they all agree on the output length.
    fn assert_estimate_matches(ops: &[Op]) {
        let mut estimator = SizeEstimator::new();
        let mut growing = ProtobufWriter::with_capacity(0);
        for op in ops {
            apply(&mut estimator, op);
            apply(&mut growing, op);
        }

        let estimate = estimator.cursor();
        assert_eq!(estimate, growing.finish().len(), "ops: {:?}", ops);

        let mut presized = ProtobufWriter::with_capacity(estimate);
        for op in ops {
            apply(&mut presized, op);
        }
        assert_eq!(presized.capacity(), estimate, "presized writer should never grow");
        assert_eq!(presized.finish(), growing.finish());
    }

    #[test]
    fn varint_edge_values() {
        for value in [
            0,
            1,
            127,
            128,
            16383,
            16384,
            (1 << 21) - 1,
            1 << 21,
            (1 << 28) - 1,
            1 << 28,
            u64::from(u32::MAX),
            u64::MAX,
        ] {
            assert_estimate_matches(&[Op::Varint(value)]);
        }

        for value in [-1, i64::MIN, i64::MAX, -(1 << 32)] {
            assert_estimate_matches(&[Op::Int64(value)]);
        }

        for value in [-1, i32::MIN, i32::MAX] {
            assert_estimate_matches(&[Op::Int32(value), Op::Sint32(value)]);
        }
    }

    #[test]
    fn fixed_width_values() {
        assert_estimate_matches(&[Op::Fixed32(0), Op::Fixed32(u32::MAX)]);
        assert_estimate_matches(&[Op::Fixed64(0), Op::Fixed64(u64::MAX)]);
        assert_estimate_matches(&[Op::Fixed64Parts(u32::MAX, 1), Op::Hrtime(1_700_000_000, 999_999_999)]);
    }

    #[test]
    fn doubles() {
        for value in [0.0, -0.0, 1.5, f64::NAN, f64::INFINITY, f64::NEG_INFINITY, f64::MIN_POSITIVE] {
            assert_estimate_matches(&[Op::Double(value)]);
        }
    }

    #[test]
    fn bytes_of_various_lengths() {
        for len in [0, 1, 127, 128, 255] {
            assert_estimate_matches(&[Op::Bytes(vec![0xAB; len])]);
        }
    }

    #[test]
    fn strings() {
        assert_estimate_matches(&[Op::String(String::new())]);
        assert_estimate_matches(&[Op::String("service.name".to_string())]);
        assert_estimate_matches(&[Op::String("héllo wörld".to_string())]);
        assert_estimate_matches(&[Op::String("日本語のテキスト".to_string())]);
        assert_estimate_matches(&[Op::String("🦀".repeat(40))]);
    }

    #[test]
    fn tags_of_one_two_and_three_bytes() {
        for field_number in [1, 15, 16, 2047, 2048] {
            assert_estimate_matches(&[Op::Tag(field_number, WireType::LengthDelimited)]);
        }
    }

    #[test]
    fn nested_messages_with_long_content() {
        let inner = Op::Message(2, vec![Op::Bytes(vec![7; 200])]);
        assert_estimate_matches(&[Op::Message(1, vec![inner.clone(), inner]), Op::Message(3, vec![])]);
    }

    fn arb_wire_type() -> impl Strategy<Value = WireType> {
        prop_oneof![
            Just(WireType::Varint),
            Just(WireType::Fixed64),
            Just(WireType::LengthDelimited),
            Just(WireType::Fixed32),
        ]
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        let leaf = prop_oneof![
            any::<u64>().prop_map(Op::Varint),
            any::<i64>().prop_map(Op::Int64),
            any::<i32>().prop_map(Op::Int32),
            any::<i32>().prop_map(Op::Sint32),
            any::<u32>().prop_map(Op::Fixed32),
            any::<u64>().prop_map(Op::Fixed64),
            (any::<u32>(), any::<u32>()).prop_map(|(low, high)| Op::Fixed64Parts(low, high)),
            (any::<u64>(), 0..1_000_000_000u32).prop_map(|(seconds, nanos)| Op::Hrtime(seconds, nanos)),
            any::<f64>().prop_map(Op::Double),
            prop::collection::vec(any::<u8>(), 0..300).prop_map(Op::Bytes),
            prop::collection::vec(any::<char>(), 0..64).prop_map(|chars| Op::String(chars.into_iter().collect())),
            (1..=536_870_911u32, arb_wire_type()).prop_map(|(field_number, wire_type)| Op::Tag(field_number, wire_type)),
            (1..=2047u32, prop::collection::vec(any::<u64>(), 0..40))
                .prop_map(|(field_number, values)| Op::PackedVarints(field_number, values)),
            (1..=2047u32, prop::collection::vec(any::<f64>(), 0..40))
                .prop_map(|(field_number, values)| Op::PackedDoubles(field_number, values)),
        ];

        leaf.prop_recursive(4, 96, 8, |inner| {
            (1..=2047u32, prop::collection::vec(inner, 0..8))
                .prop_map(|(field_number, ops)| Op::Message(field_number, ops))
        })
    }

    proptest! {
        #[test]
        fn property_test_estimate_matches_writer(ops in prop::collection::vec(arb_op(), 0..16)) {
            assert_estimate_matches(&ops);
        }
    }
}
