//! Buffer-backed protobuf writer.

use crate::{
    diagnostics::{Diagnostics, NoopDiagnostics},
    helpers::sizeof_varint,
    sink::{LengthMark, ProtoSink},
};

static NOOP_DIAGNOSTICS: NoopDiagnostics = NoopDiagnostics;

/// A Protocol Buffers writer backed by a single, exclusively-owned byte arena.
///
/// The arena is allocated up front with the requested capacity and written to by advancing a cursor. Callers are
/// expected to size it accurately, typically by running the same writes through a [`SizeEstimator`] first. Writes
/// that do not fit still succeed: the arena grows to the next power of two that can hold them, and the configured
/// [`Diagnostics`] is notified, since growth means the initial capacity was wrong.
///
/// ## Length-delimited values
///
/// Embedded messages need their length written before their content. Rather than encoding each submessage into its
/// own buffer and concatenating, the writer reserves a single byte for the length prefix, writes the content directly
/// after it, and fixes up the prefix once the content length is known. Most submessages are shorter than 128 bytes, so
/// the reserved byte is usually enough. When it is not, the content is shifted forward in one contiguous move to make
/// room for the longer prefix.
///
/// [`SizeEstimator`]: crate::SizeEstimator
pub struct ProtobufWriter<'d> {
    buf: Vec<u8>,
    cursor: usize,
    diagnostics: &'d dyn Diagnostics,
}

impl ProtobufWriter<'static> {
    /// Creates a new `ProtobufWriter` with the given capacity, and no diagnostics.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_diagnostics(capacity, &NOOP_DIAGNOSTICS)
    }
}

impl<'d> ProtobufWriter<'d> {
    /// Creates a new `ProtobufWriter` with the given capacity, reporting buffer growth to `diagnostics`.
    pub fn with_diagnostics(capacity: usize, diagnostics: &'d dyn Diagnostics) -> Self {
        Self {
            buf: vec![0; capacity],
            cursor: 0,
            diagnostics,
        }
    }

    /// Returns the current capacity of the buffer.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Returns the bytes written so far.
    pub fn finish(&self) -> &[u8] {
        &self.buf[..self.cursor]
    }

    /// Consumes the writer, returning the bytes written.
    pub fn into_vec(mut self) -> Vec<u8> {
        self.buf.truncate(self.cursor);
        self.buf
    }

    fn ensure_capacity(&mut self, additional: usize) {
        let required = self.cursor + additional;
        if required > self.buf.len() {
            self.grow(required);
        }
    }

    #[cold]
    fn grow(&mut self, required: usize) {
        let previous_capacity = self.buf.len();
        let new_capacity = required.next_power_of_two();
        self.buf.resize(new_capacity, 0);
        self.diagnostics.buffer_grown(previous_capacity, new_capacity);
    }

    /// Encodes `value` as a varint starting at `offset`, returning the number of bytes written.
    ///
    /// Capacity must already be ensured by the caller.
    fn put_varint(&mut self, mut offset: usize, mut value: u64) -> usize {
        let start = offset;
        while value > 0x7F {
            self.buf[offset] = ((value as u8) & 0x7F) | 0x80;
            value >>= 7;
            offset += 1;
        }
        self.buf[offset] = value as u8;
        offset + 1 - start
    }
}

impl ProtoSink for ProtobufWriter<'_> {
    fn cursor(&self) -> usize {
        self.cursor
    }

    fn write_varint(&mut self, value: u64) {
        if value < 0x80 {
            self.ensure_capacity(1);
            self.buf[self.cursor] = value as u8;
            self.cursor += 1;
            return;
        }

        self.ensure_capacity(sizeof_varint(value));
        let written = self.put_varint(self.cursor, value);
        self.cursor += written;
    }

    fn write_fixed32(&mut self, value: u32) {
        self.write_raw(&value.to_le_bytes());
    }

    fn write_fixed64(&mut self, value: u64) {
        self.write_raw(&value.to_le_bytes());
    }

    fn write_raw(&mut self, bytes: &[u8]) {
        self.ensure_capacity(bytes.len());
        self.buf[self.cursor..self.cursor + bytes.len()].copy_from_slice(bytes);
        self.cursor += bytes.len();
    }

    fn start_length_delimited(&mut self) -> LengthMark {
        // Optimistically reserve a single byte for the length prefix.
        self.ensure_capacity(1);
        self.cursor += 1;
        LengthMark::new(self.cursor)
    }

    fn finish_length_delimited(&mut self, mark: LengthMark, content_length: usize) {
        debug_assert_eq!(self.cursor - mark.content_start(), content_length);

        let content_start = mark.content_start();
        let prefix_len = sizeof_varint(content_length as u64);
        if prefix_len > 1 {
            let extra = prefix_len - 1;
            self.ensure_capacity(extra);
            self.buf
                .copy_within(content_start..content_start + content_length, content_start + extra);
            self.cursor += extra;
        }

        self.put_varint(content_start - 1, content_length as u64);
    }
}
