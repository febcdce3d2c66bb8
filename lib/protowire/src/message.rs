//! Messages that know how to write themselves.

use crate::{diagnostics::Diagnostics, estimator::SizeEstimator, sink::ProtoSink, writer::ProtobufWriter};

/// A message that can be written to any [`ProtoSink`].
///
/// Implementations describe the message once, in terms of sink operations, and get both exact sizing and encoding
/// from that single description.
pub trait MessageWrite {
    /// Writes the fields of `self` into `sink`.
    ///
    /// Only the message content is written: no tag and no length prefix. Use [`ProtoSink::write_message`] to embed a
    /// message as a field of another.
    fn write_message<S: ProtoSink>(&self, sink: &mut S);

    /// Computes the exact number of bytes `self` occupies once encoded.
    fn encoded_len(&self) -> usize {
        let mut estimator = SizeEstimator::new();
        self.write_message(&mut estimator);
        estimator.cursor()
    }

    /// Encodes `self` into a buffer sized exactly to fit.
    fn encode_to_vec(&self) -> Vec<u8> {
        let mut writer = ProtobufWriter::with_capacity(self.encoded_len());
        self.write_message(&mut writer);
        writer.into_vec()
    }

    /// Encodes `self` into a buffer that starts at `capacity` bytes, reporting any growth to `diagnostics`.
    fn encode_with_capacity(&self, capacity: usize, diagnostics: &dyn Diagnostics) -> Vec<u8> {
        let mut writer = ProtobufWriter::with_diagnostics(capacity, diagnostics);
        self.write_message(&mut writer);
        writer.into_vec()
    }
}
