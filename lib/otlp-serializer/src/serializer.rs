//! Per-signal serializers.

use std::sync::Arc;

use bytes::Bytes;
use metrics::{counter, Counter};
use protowire::{Diagnostics, LogDiagnostics, MessageWrite, NoopDiagnostics};
use serde::{de::DeserializeOwned, Serialize};
use snafu::ResultExt as _;
use tracing::debug;

use crate::{
    config::{ExportFormat, SerializerConfiguration},
    encoding::Encoder,
    error::{JsonDecode, JsonEncode, ProtobufDecode, SerializerError},
    json::{ExportLogsServiceRequest, ExportMetricsServiceRequest, ExportTraceServiceRequest},
    model::{LogRecordData, ResourceMetrics, SpanData},
    proto::{LogsRequest, MetricsRequest, TraceRequest},
    response::{ExportLogsServiceResponse, ExportMetricsServiceResponse, ExportTraceServiceResponse},
};

/// Serializes export requests and deserializes export responses for a single signal.
///
/// This is the contract between the serialization engine and a transport: the transport hands over a batch of
/// records, sends the resulting payload as-is, and passes the response body back for decoding.
pub trait Serializer: Send + Sync {
    /// Records accepted in a single request.
    type Request: ?Sized;

    /// Decoded export response.
    type Response;

    /// Serializes `request` into an export request payload.
    ///
    /// An empty batch produces a request with no resource groups, not an error.
    ///
    /// # Errors
    ///
    /// If the request cannot be encoded, an error is returned. Protobuf encoding never fails.
    fn serialize_request(&self, request: &Self::Request) -> Result<Bytes, SerializerError>;

    /// Deserializes an export response payload.
    ///
    /// An empty payload decodes to the default response, since some transports answer successful requests with an
    /// empty body.
    ///
    /// # Errors
    ///
    /// If `data` is not a valid response in the configured format, an error is returned.
    fn deserialize_response(&self, data: &[u8]) -> Result<Self::Response, SerializerError>;
}

/// The signal-independent half of a serializer.
struct PayloadCodec {
    signal: &'static str,
    config: SerializerConfiguration,
    diagnostics: Arc<dyn Diagnostics>,
    payload_bytes_total: Counter,
}

impl PayloadCodec {
    fn new(signal: &'static str, config: SerializerConfiguration, diagnostics: Arc<dyn Diagnostics>) -> Self {
        let payload_bytes_total = counter!(
            "otlp_serializer_payload_bytes_total",
            "signal" => signal,
            "format" => config.format().as_str()
        );

        Self {
            signal,
            config,
            diagnostics,
            payload_bytes_total,
        }
    }

    fn from_config(signal: &'static str, config: SerializerConfiguration) -> Self {
        let diagnostics: Arc<dyn Diagnostics> = if config.log_buffer_growth() {
            Arc::new(LogDiagnostics::new())
        } else {
            Arc::new(NoopDiagnostics)
        };
        Self::new(signal, config, diagnostics)
    }

    fn format(&self) -> ExportFormat {
        self.config.format()
    }

    fn encode_protobuf<M: MessageWrite>(&self, message: &M, records: usize) -> Bytes {
        let capacity = if self.config.presize_buffers() {
            message.encoded_len()
        } else {
            self.config.initial_buffer_capacity()
        };
        let payload = message.encode_with_capacity(capacity, self.diagnostics.as_ref());
        self.finish(payload, records)
    }

    fn encode_json<T: Serialize>(&self, request: &T, records: usize) -> Result<Bytes, SerializerError> {
        let payload = serde_json::to_vec(request).context(JsonEncode)?;
        Ok(self.finish(payload, records))
    }

    fn finish(&self, payload: Vec<u8>, records: usize) -> Bytes {
        debug!(
            signal = self.signal,
            format = self.format().as_str(),
            records,
            payload_len = payload.len(),
            "Serialized export request."
        );
        self.payload_bytes_total.increment(payload.len() as u64);
        Bytes::from(payload)
    }

    fn decode<R>(&self, data: &[u8]) -> Result<R, SerializerError>
    where
        R: prost::Message + Default + DeserializeOwned,
    {
        if data.is_empty() {
            return Ok(R::default());
        }

        match self.format() {
            ExportFormat::Protobuf => R::decode(data).context(ProtobufDecode),
            ExportFormat::Json => serde_json::from_slice(data).context(JsonDecode),
        }
    }
}

macro_rules! signal_serializer {
    ($(#[$meta:meta])* $name:ident, $signal:literal) => {
        $(#[$meta])*
        pub struct $name {
            codec: PayloadCodec,
        }

        impl $name {
            /// Creates a new serializer from the given configuration.
            ///
            /// Buffer growth is logged, and counted, if enabled in the configuration.
            pub fn new(config: SerializerConfiguration) -> Self {
                Self {
                    codec: PayloadCodec::from_config($signal, config),
                }
            }

            /// Creates a new serializer from the given configuration, reporting buffer growth to `diagnostics`.
            pub fn with_diagnostics(config: SerializerConfiguration, diagnostics: Arc<dyn Diagnostics>) -> Self {
                Self {
                    codec: PayloadCodec::new($signal, config, diagnostics),
                }
            }

            /// Returns the wire format of this serializer.
            pub fn format(&self) -> ExportFormat {
                self.codec.format()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new(SerializerConfiguration::default())
            }
        }
    };
}

signal_serializer!(
    /// Serializer for trace export requests.
    TraceSerializer,
    "traces"
);

signal_serializer!(
    /// Serializer for log export requests.
    LogsSerializer,
    "logs"
);

signal_serializer!(
    /// Serializer for metric export requests.
    MetricsSerializer,
    "metrics"
);

impl Serializer for TraceSerializer {
    type Request = [SpanData];
    type Response = ExportTraceServiceResponse;

    fn serialize_request(&self, spans: &[SpanData]) -> Result<Bytes, SerializerError> {
        match self.codec.format() {
            ExportFormat::Protobuf => Ok(self.codec.encode_protobuf(&TraceRequest::new(spans), spans.len())),
            ExportFormat::Json => self.codec.encode_json(
                &ExportTraceServiceRequest::from_spans(spans, &Encoder::TEXT),
                spans.len(),
            ),
        }
    }

    fn deserialize_response(&self, data: &[u8]) -> Result<Self::Response, SerializerError> {
        self.codec.decode(data)
    }
}

impl Serializer for LogsSerializer {
    type Request = [LogRecordData];
    type Response = ExportLogsServiceResponse;

    fn serialize_request(&self, records: &[LogRecordData]) -> Result<Bytes, SerializerError> {
        match self.codec.format() {
            ExportFormat::Protobuf => Ok(self.codec.encode_protobuf(&LogsRequest::new(records), records.len())),
            ExportFormat::Json => self.codec.encode_json(
                &ExportLogsServiceRequest::from_records(records, &Encoder::TEXT),
                records.len(),
            ),
        }
    }

    fn deserialize_response(&self, data: &[u8]) -> Result<Self::Response, SerializerError> {
        self.codec.decode(data)
    }
}

impl Serializer for MetricsSerializer {
    type Request = [ResourceMetrics];
    type Response = ExportMetricsServiceResponse;

    fn serialize_request(&self, batches: &[ResourceMetrics]) -> Result<Bytes, SerializerError> {
        let points = data_point_count(batches);
        match self.codec.format() {
            ExportFormat::Protobuf => Ok(self.codec.encode_protobuf(&MetricsRequest::new(batches), points)),
            ExportFormat::Json => self.codec.encode_json(
                &ExportMetricsServiceRequest::from_batches(batches, &Encoder::TEXT),
                points,
            ),
        }
    }

    fn deserialize_response(&self, data: &[u8]) -> Result<Self::Response, SerializerError> {
        self.codec.decode(data)
    }
}

fn data_point_count(batches: &[ResourceMetrics]) -> usize {
    batches
        .iter()
        .flat_map(|batch| &batch.scope_metrics)
        .flat_map(|scope_metrics| &scope_metrics.metrics)
        .map(|metric| metric.points.len())
        .sum()
}
