//! OTLP serialization engine.
//!
//! Converts batches of spans, log records and metrics into OTLP export requests, either as protobuf or as OTLP/JSON,
//! and decodes the matching export responses.
//!
//! Protobuf requests are written by hand on top of [`protowire`]: records are grouped by resource and instrumentation
//! scope, sized exactly, and then written into a single buffer. JSON requests go through plain structure types that
//! mirror the OTLP messages, rendered with `serde_json`.
//!
//! The entry points are the per-signal serializers implementing [`Serializer`]: [`TraceSerializer`],
//! [`LogsSerializer`] and [`MetricsSerializer`].
#![deny(missing_docs)]

pub mod any_value;

mod config;
pub use self::config::{ExportFormat, SerializerConfiguration};

mod encoding;
pub use self::encoding::{EncodedBytes, EncodedIdentifier, EncodedTimestamp, Encoder};

mod error;
pub use self::error::SerializerError;

pub mod grouping;
pub mod json;
pub mod model;
pub mod proto;
pub mod response;

mod serializer;
pub use self::serializer::{LogsSerializer, MetricsSerializer, Serializer, TraceSerializer};
