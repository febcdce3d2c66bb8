//! Wire-level constants and size computations.
//!
//! Everything here is a pure function of its inputs, and is shared by both [`ProtobufWriter`][crate::ProtobufWriter]
//! and [`SizeEstimator`][crate::SizeEstimator] so that the two can never disagree on how many bytes a value occupies.

/// Wire type.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WireType {
    /// Variable-width integer.
    ///
    /// Encodes integers using a variable number of bytes, depending on the magnitude of the value,
    /// consuming between one and ten bytes on the wire.
    ///
    /// See https://protobuf.dev/programming-guides/encoding/#varints for more information.
    Varint,

    /// Fixed 64-bit integer or double-precision floating-point number.
    ///
    /// Consumes eight bytes (64-bit) on the wire.
    Fixed64,

    /// Length-delimiter field.
    ///
    /// Used for fields with variable length, such as strings, bytes, embedded messages, and packed
    /// repeated fields.
    LengthDelimited,

    /// Fixed 32-bit integer or single-precision floating-point number.
    ///
    /// Consumes four bytes (32-bit) on the wire.
    Fixed32,
}

impl WireType {
    /// Gets the integer representation of the wire type.
    pub const fn as_u32(&self) -> u32 {
        match self {
            WireType::Varint => 0,
            WireType::Fixed64 => 1,
            WireType::LengthDelimited => 2,
            WireType::Fixed32 => 5,
        }
    }
}

/// Computes the tag for the given field number and wire type.
pub const fn tag(field_number: u32, wire_type: WireType) -> u32 {
    (field_number << 3) | wire_type.as_u32()
}

/// Computes the binary size of the varint encoded u64.
pub const fn sizeof_varint(v: u64) -> usize {
    match v {
        0x0..=0x7F => 1,
        0x80..=0x3FFF => 2,
        0x4000..=0x1FFFFF => 3,
        0x200000..=0xFFFFFFF => 4,
        0x10000000..=0x7FFFFFFFF => 5,
        0x0800000000..=0x3FFFFFFFFFF => 6,
        0x040000000000..=0x1FFFFFFFFFFFF => 7,
        0x02000000000000..=0xFFFFFFFFFFFFFF => 8,
        0x0100000000000000..=0x7FFFFFFFFFFFFFFF => 9,
        _ => 10,
    }
}

/// Computes the binary size of a tag for the given field number.
///
/// The wire type occupies the low three bits, so it never changes the size of the tag.
pub const fn sizeof_tag(field_number: u32) -> usize {
    sizeof_varint(tag(field_number, WireType::Varint) as u64)
}

/// Computes the binary size of a variable length chunk of data (wire type 2), including its length prefix.
pub const fn sizeof_len(len: usize) -> usize {
    sizeof_varint(len as u64) + len
}

/// Encodes a `sint32` with ZigZag encoding, so that small negative numbers stay small on the wire.
pub const fn zigzag32(v: i32) -> u32 {
    ((v << 1) ^ (v >> 31)) as u32
}

/// Encodes a `sint64` with ZigZag encoding, so that small negative numbers stay small on the wire.
pub const fn zigzag64(v: i64) -> u64 {
    ((v << 1) ^ (v >> 63)) as u64
}

/// Computes the total number of nanoseconds represented by a `(seconds, nanoseconds)` pair.
///
/// Arithmetic wraps at 64 bits, matching how a `fixed64` field truncates any value that does not fit.
pub const fn hrtime_to_nanos(seconds: u64, nanos: u32) -> u64 {
    seconds.wrapping_mul(1_000_000_000).wrapping_add(nanos as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn varint_sizes_at_group_boundaries() {
        let cases: &[(u64, usize)] = &[
            (0, 1),
            (127, 1),
            (128, 2),
            (16383, 2),
            (16384, 3),
            ((1 << 21) - 1, 3),
            (1 << 21, 4),
            ((1 << 28) - 1, 4),
            (1 << 28, 5),
            (0xFFFF_FFFF, 5),
            (u64::MAX, 10),
        ];

        for (value, expected) in cases {
            assert_eq!(sizeof_varint(*value), *expected, "value {}", value);
        }
    }

    #[test]
    fn tag_sizes() {
        assert_eq!(sizeof_tag(1), 1);
        assert_eq!(sizeof_tag(15), 1);
        assert_eq!(sizeof_tag(16), 2);
        assert_eq!(sizeof_tag(2047), 2);
        assert_eq!(sizeof_tag(2048), 3);
    }

    #[test]
    fn zigzag() {
        assert_eq!(zigzag32(0), 0);
        assert_eq!(zigzag32(-1), 1);
        assert_eq!(zigzag32(1), 2);
        assert_eq!(zigzag32(i32::MIN), u32::MAX);
        assert_eq!(zigzag64(-2), 3);
        assert_eq!(zigzag64(i64::MIN), u64::MAX);
    }

    #[test]
    fn hrtime_carries_into_high_word() {
        // 4.294967296 seconds is exactly 2^32 nanoseconds.
        assert_eq!(hrtime_to_nanos(4, 294_967_296), 1 << 32);
        assert_eq!(hrtime_to_nanos(1_700_000_000, 123_456_789), 1_700_000_000_123_456_789);
    }
}
