//! Encoding strategies for the plain structure form of export requests.
//!
//! The plain structure form is the same logical tree as the protobuf form, built out of ordinary values rather than
//! written to the wire directly. A handful of fields do not have a single natural representation in that form:
//! timestamps, trace and span identifiers, and raw bytes. An [`Encoder`] decides how to represent each of them.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;

use crate::model::HrTime;

/// A timestamp in the plain structure form.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EncodedTimestamp {
    /// Total nanoseconds, split into low and high 32-bit words.
    LongBits {
        /// Low 32 bits.
        low: u32,

        /// High 32 bits.
        high: u32,
    },

    /// Total nanoseconds, as a decimal string.
    Text(String),
}

/// A trace or span identifier in the plain structure form.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EncodedIdentifier {
    /// Raw identifier bytes.
    Bytes(Vec<u8>),

    /// Lowercase hexadecimal.
    Hex(String),
}

/// A byte sequence in the plain structure form.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EncodedBytes {
    /// Raw bytes.
    Raw(Vec<u8>),

    /// Standard base64, with padding.
    Base64(String),
}

/// A set of encoding functions for the fields with more than one plain representation.
///
/// Two canonical strategies exist: [`Encoder::BINARY`], which keeps everything in its binary form, and
/// [`Encoder::TEXT`], which produces the text representations required by OTLP/JSON.
#[derive(Clone, Copy, Debug)]
pub struct Encoder {
    /// Encodes a timestamp.
    pub encode_timestamp: fn(HrTime) -> EncodedTimestamp,

    /// Encodes a required identifier.
    pub encode_identifier: fn(&[u8]) -> EncodedIdentifier,

    /// Encodes an optional identifier.
    pub encode_optional_identifier: fn(Option<&[u8]>) -> Option<EncodedIdentifier>,

    /// Encodes a byte sequence.
    pub encode_bytes: fn(&[u8]) -> EncodedBytes,
}

impl Encoder {
    /// Binary strategy: timestamps as low/high word pairs, identifiers as raw bytes, and byte sequences unchanged.
    pub const BINARY: Self = Self {
        encode_timestamp: timestamp_to_long_bits,
        encode_identifier: identifier_to_bytes,
        encode_optional_identifier: optional_identifier_to_bytes,
        encode_bytes: bytes_to_raw,
    };

    /// Text strategy: timestamps as decimal strings, identifiers as lowercase hexadecimal, and byte sequences as base64.
    pub const TEXT: Self = Self {
        encode_timestamp: timestamp_to_text,
        encode_identifier: identifier_to_hex,
        encode_optional_identifier: optional_identifier_to_hex,
        encode_bytes: bytes_to_base64,
    };

    /// Encodes a timestamp.
    pub fn timestamp(&self, time: HrTime) -> EncodedTimestamp {
        (self.encode_timestamp)(time)
    }

    /// Encodes a required identifier.
    pub fn identifier(&self, id: &[u8]) -> EncodedIdentifier {
        (self.encode_identifier)(id)
    }

    /// Encodes an optional identifier.
    pub fn optional_identifier(&self, id: Option<&[u8]>) -> Option<EncodedIdentifier> {
        (self.encode_optional_identifier)(id)
    }

    /// Encodes a byte sequence.
    pub fn bytes(&self, bytes: &[u8]) -> EncodedBytes {
        (self.encode_bytes)(bytes)
    }
}

fn timestamp_to_long_bits(time: HrTime) -> EncodedTimestamp {
    let nanos = time.to_nanos();
    EncodedTimestamp::LongBits {
        low: nanos as u32,
        high: (nanos >> 32) as u32,
    }
}

fn timestamp_to_text(time: HrTime) -> EncodedTimestamp {
    EncodedTimestamp::Text(time.to_nanos().to_string())
}

fn identifier_to_bytes(id: &[u8]) -> EncodedIdentifier {
    EncodedIdentifier::Bytes(id.to_vec())
}

fn optional_identifier_to_bytes(id: Option<&[u8]>) -> Option<EncodedIdentifier> {
    id.map(identifier_to_bytes)
}

fn identifier_to_hex(id: &[u8]) -> EncodedIdentifier {
    EncodedIdentifier::Hex(hex::encode(id))
}

fn optional_identifier_to_hex(id: Option<&[u8]>) -> Option<EncodedIdentifier> {
    id.map(identifier_to_hex)
}

fn bytes_to_raw(bytes: &[u8]) -> EncodedBytes {
    EncodedBytes::Raw(bytes.to_vec())
}

fn bytes_to_base64(bytes: &[u8]) -> EncodedBytes {
    EncodedBytes::Base64(STANDARD.encode(bytes))
}
