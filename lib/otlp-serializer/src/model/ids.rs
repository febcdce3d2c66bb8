use std::{fmt, str::FromStr};

use crate::error::{InvalidIdentifier, SerializerError};

fn decode_hex<const N: usize>(value: &str) -> Result<[u8; N], SerializerError> {
    let mut bytes = [0; N];
    match hex::decode_to_slice(value, &mut bytes) {
        Ok(()) => Ok(bytes),
        Err(_) => InvalidIdentifier {
            value,
            expected_len: N,
        }
        .fail(),
    }
}

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident, $len:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
        pub struct $name([u8; $len]);

        impl $name {
            /// The all-zero identifier, which is never valid on the wire.
            pub const INVALID: Self = Self([0; $len]);

            /// Creates an identifier from its raw bytes.
            pub const fn from_bytes(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            /// Parses an identifier from hexadecimal, in either case.
            ///
            /// # Errors
            ///
            /// If `value` is not exactly
            #[doc = concat!(stringify!($len), " bytes")]
            /// of hexadecimal, an error is returned.
            pub fn from_hex(value: &str) -> Result<Self, SerializerError> {
                decode_hex(value).map(Self)
            }

            /// Returns the raw bytes of the identifier.
            pub const fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            /// Returns `true` if the identifier is not all zeroes.
            pub fn is_valid(&self) -> bool {
                *self != Self::INVALID
            }
        }

        impl FromStr for $name {
            type Err = SerializerError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_hex(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&hex::encode(self.0))
            }
        }
    };
}

identifier!(
    /// A 16-byte trace identifier.
    TraceId,
    16
);

identifier!(
    /// An 8-byte span identifier.
    SpanId,
    8
);

/// Trace flags set on a span context.
pub mod trace_flags {
    /// The trace was sampled.
    pub const SAMPLED: u8 = 0x01;
}

/// The propagated part of a span: everything another process needs to know to continue its trace.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SpanContext {
    /// Trace identifier.
    pub trace_id: TraceId,

    /// Span identifier.
    pub span_id: SpanId,

    /// W3C trace flags.
    pub trace_flags: u8,

    /// W3C trace state.
    pub trace_state: Option<String>,

    /// Whether this context was propagated from a remote parent.
    pub is_remote: bool,
}

impl SpanContext {
    /// Creates a new, local `SpanContext`.
    pub fn new(trace_id: TraceId, span_id: SpanId, trace_flags: u8) -> Self {
        Self {
            trace_id,
            span_id,
            trace_flags,
            trace_state: None,
            is_remote: false,
        }
    }

    /// Marks the context as propagated from a remote parent.
    pub fn with_remote(mut self, is_remote: bool) -> Self {
        self.is_remote = is_remote;
        self
    }

    /// Sets the trace state.
    pub fn with_trace_state(mut self, trace_state: impl Into<String>) -> Self {
        self.trace_state = Some(trace_state.into());
        self
    }
}
