//! Plain structure export requests, serialized as OTLP/JSON.
//!
//! These types mirror the OTLP message tree field for field, using the OTLP/JSON field names. They are built from the
//! same grouping as the protobuf requests, with an [`Encoder`][crate::Encoder] deciding how timestamps, identifiers
//! and bytes are represented. Built with [`Encoder::TEXT`][crate::Encoder::TEXT], they serialize to valid OTLP/JSON.

mod common;
pub use self::common::{InstrumentationScope, Resource};

mod logs;
pub use self::logs::{ExportLogsServiceRequest, LogRecord, ResourceLogs, ScopeLogs};

mod metrics;
pub use self::metrics::{
    Buckets, ExponentialHistogram, ExponentialHistogramDataPoint, ExportMetricsServiceRequest, Gauge, Histogram,
    HistogramDataPoint, Metric, MetricPayload, NumberDataPoint, NumberValue, ResourceMetrics, ScopeMetrics, Sum,
    Summary, SummaryDataPoint, ValueAtQuantile,
};

mod trace;
pub use self::trace::{Event, ExportTraceServiceRequest, Link, ResourceSpans, ScopeSpans, Span, Status};
