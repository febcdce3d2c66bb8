use snafu::Snafu;

/// A serializer error.
#[derive(Debug, Snafu)]
#[snafu(context(suffix(false)), visibility(pub(crate)))]
pub enum SerializerError {
    /// Serializer configuration could not be loaded.
    #[snafu(display("Failed to load serializer configuration."))]
    Configuration {
        /// Error source.
        source: figment::Error,
    },

    /// A trace or span identifier was not valid hexadecimal of the expected length.
    #[snafu(display(
        "Invalid identifier '{}': expected {} hexadecimal characters.",
        value,
        expected_len * 2
    ))]
    InvalidIdentifier {
        /// The rejected input.
        value: String,

        /// Expected length of the identifier, in bytes.
        expected_len: usize,
    },

    /// The export request could not be encoded as JSON.
    #[snafu(display("Failed to encode export request as JSON."))]
    JsonEncode {
        /// Error source.
        source: serde_json::Error,
    },

    /// The export response could not be decoded as protobuf.
    #[snafu(display("Failed to decode protobuf export response."))]
    ProtobufDecode {
        /// Error source.
        source: prost::DecodeError,
    },

    /// The export response could not be decoded as JSON.
    #[snafu(display("Failed to decode JSON export response."))]
    JsonDecode {
        /// Error source.
        source: serde_json::Error,
    },
}
