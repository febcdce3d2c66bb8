//! The operation set shared by every protobuf output target.

use crate::helpers::{hrtime_to_nanos, tag, zigzag32, WireType};

/// Position of a length-delimited value whose length prefix has not been written yet.
///
/// Returned by [`ProtoSink::start_length_delimited`] and consumed by [`ProtoSink::finish_length_delimited`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[must_use = "a length-delimited value must be finished"]
pub struct LengthMark {
    content_start: usize,
}

impl LengthMark {
    pub(crate) const fn new(content_start: usize) -> Self {
        Self { content_start }
    }

    /// Returns the cursor position at which the content of the length-delimited value begins.
    pub const fn content_start(&self) -> usize {
        self.content_start
    }
}

/// A destination for Protocol Buffers wire primitives.
///
/// The required methods are the primitives that an implementation must provide, while everything else is derived from
/// them. Deriving the composite operations from the same primitives is what keeps [`ProtobufWriter`] and
/// [`SizeEstimator`] in lockstep: for any sequence of calls, both end up with the same cursor.
///
/// Field-level helpers (`write_*_field`) follow proto3 presence rules: scalar fields holding their default value are
/// not written at all. Members of a `oneof`, and `optional` fields, must use the unconditional variants instead.
///
/// [`ProtobufWriter`]: crate::ProtobufWriter
/// [`SizeEstimator`]: crate::SizeEstimator
pub trait ProtoSink {
    /// Returns the number of bytes written so far.
    fn cursor(&self) -> usize;

    /// Writes a `varint`.
    fn write_varint(&mut self, value: u64);

    /// Writes a `fixed32`, which is a little-endian `u32`.
    fn write_fixed32(&mut self, value: u32);

    /// Writes a `fixed64`, which is a little-endian `u64`.
    fn write_fixed64(&mut self, value: u64);

    /// Writes raw bytes, without any length prefix.
    fn write_raw(&mut self, bytes: &[u8]);

    /// Starts a length-delimited value.
    ///
    /// Everything written until the matching call to [`finish_length_delimited`][Self::finish_length_delimited] is
    /// the content of the value.
    fn start_length_delimited(&mut self) -> LengthMark;

    /// Finishes a length-delimited value, writing its length prefix.
    ///
    /// `content_length` must be the number of bytes written since `mark` was created.
    fn finish_length_delimited(&mut self, mark: LengthMark, content_length: usize);

    /// Writes a `double`, which is a little-endian IEEE-754 binary64.
    fn write_double(&mut self, value: f64) {
        self.write_fixed64(value.to_bits());
    }

    /// Writes a `fixed64` from its low and high 32-bit words.
    fn write_fixed64_parts(&mut self, low: u32, high: u32) {
        self.write_fixed64((u64::from(high) << 32) | u64::from(low));
    }

    /// Writes a `fixed64` holding the total nanoseconds of a `(seconds, nanoseconds)` pair.
    fn write_fixed64_hrtime(&mut self, seconds: u64, nanos: u32) {
        self.write_fixed64(hrtime_to_nanos(seconds, nanos));
    }

    /// Writes a tag, which represents both the field number and the wire type.
    fn write_tag(&mut self, field_number: u32, wire_type: WireType) {
        self.write_varint(u64::from(tag(field_number, wire_type)));
    }

    /// Writes `bytes`: length first, then the data.
    fn write_bytes(&mut self, bytes: &[u8]) {
        self.write_varint(bytes.len() as u64);
        self.write_raw(bytes);
    }

    /// Writes `string`: length first, then the UTF-8 data.
    fn write_string(&mut self, value: &str) {
        self.write_bytes(value.as_bytes());
    }

    /// Writes an `int64`, as the varint of its two's complement representation.
    fn write_int64(&mut self, value: i64) {
        self.write_varint(value as u64);
    }

    /// Writes an `int32` or an enum value.
    ///
    /// Negative values are sign-extended to 64 bits, as required by the wire format, and so always take ten bytes.
    fn write_int32(&mut self, value: i32) {
        self.write_varint(i64::from(value) as u64);
    }

    /// Writes a `sint32` using ZigZag encoding.
    fn write_sint32(&mut self, value: i32) {
        self.write_varint(u64::from(zigzag32(value)));
    }

    /// Writes a `bool`.
    fn write_bool(&mut self, value: bool) {
        self.write_varint(u64::from(value));
    }

    /// Writes an embedded message, tagged with the given field number.
    ///
    /// The message is always written, even when `write` produces no content.
    fn write_message<F>(&mut self, field_number: u32, write: F)
    where
        Self: Sized,
        F: FnOnce(&mut Self),
    {
        self.write_tag(field_number, WireType::LengthDelimited);
        let mark = self.start_length_delimited();
        write(self);
        let content_length = self.cursor() - mark.content_start();
        self.finish_length_delimited(mark, content_length);
    }

    /// Writes a `string` field, unless the value is empty.
    fn write_string_field(&mut self, field_number: u32, value: &str) {
        if !value.is_empty() {
            self.write_tag(field_number, WireType::LengthDelimited);
            self.write_string(value);
        }
    }

    /// Writes a `bytes` field, unless the value is empty.
    fn write_bytes_field(&mut self, field_number: u32, value: &[u8]) {
        if !value.is_empty() {
            self.write_tag(field_number, WireType::LengthDelimited);
            self.write_bytes(value);
        }
    }

    /// Writes a `uint32` or `uint64` field, unless the value is zero.
    fn write_uint_field(&mut self, field_number: u32, value: u64) {
        if value != 0 {
            self.write_tag(field_number, WireType::Varint);
            self.write_varint(value);
        }
    }

    /// Writes an enum field, unless the value is zero.
    fn write_enum_field(&mut self, field_number: u32, value: i32) {
        if value != 0 {
            self.write_tag(field_number, WireType::Varint);
            self.write_int32(value);
        }
    }

    /// Writes a `sint32` field, unless the value is zero.
    fn write_sint32_field(&mut self, field_number: u32, value: i32) {
        if value != 0 {
            self.write_tag(field_number, WireType::Varint);
            self.write_sint32(value);
        }
    }

    /// Writes a `bool` field, unless the value is `false`.
    fn write_bool_field(&mut self, field_number: u32, value: bool) {
        if value {
            self.write_tag(field_number, WireType::Varint);
            self.write_bool(value);
        }
    }

    /// Writes a `fixed32` field, unless the value is zero.
    fn write_fixed32_field(&mut self, field_number: u32, value: u32) {
        if value != 0 {
            self.write_tag(field_number, WireType::Fixed32);
            self.write_fixed32(value);
        }
    }

    /// Writes a `fixed64` field, unless the value is zero.
    fn write_fixed64_field(&mut self, field_number: u32, value: u64) {
        if value != 0 {
            self.write_tag(field_number, WireType::Fixed64);
            self.write_fixed64(value);
        }
    }

    /// Writes a `double` field, unless the value is exactly `0.0`.
    ///
    /// Negative zero is written, since it does not compare bitwise equal to the default.
    fn write_double_field(&mut self, field_number: u32, value: f64) {
        if value.to_bits() != 0 {
            self.write_tag(field_number, WireType::Fixed64);
            self.write_double(value);
        }
    }

    /// Writes a packed repeated `fixed64` field, unless there are no values.
    fn write_packed_fixed64_field(&mut self, field_number: u32, values: &[u64]) {
        if values.is_empty() {
            return;
        }

        self.write_tag(field_number, WireType::LengthDelimited);
        self.write_varint((values.len() * 8) as u64);
        for value in values {
            self.write_fixed64(*value);
        }
    }

    /// Writes a packed repeated `double` field, unless there are no values.
    fn write_packed_double_field(&mut self, field_number: u32, values: &[f64]) {
        if values.is_empty() {
            return;
        }

        self.write_tag(field_number, WireType::LengthDelimited);
        self.write_varint((values.len() * 8) as u64);
        for value in values {
            self.write_double(*value);
        }
    }

    /// Writes a packed repeated `uint64` field, unless there are no values.
    fn write_packed_varint_field(&mut self, field_number: u32, values: &[u64])
    where
        Self: Sized,
    {
        if values.is_empty() {
            return;
        }

        self.write_tag(field_number, WireType::LengthDelimited);
        let mark = self.start_length_delimited();
        for value in values {
            self.write_varint(*value);
        }
        let content_length = self.cursor() - mark.content_start();
        self.finish_length_delimited(mark, content_length);
    }
}
