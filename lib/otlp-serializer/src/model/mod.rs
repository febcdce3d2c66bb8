//! Telemetry records, as handed over by the SDK.

mod ids;
pub use self::ids::{trace_flags, SpanContext, SpanId, TraceId};

mod logs;
pub use self::logs::{LogRecordData, SeverityNumber};

mod metrics;
pub use self::metrics::{
    AggregationTemporality, ExponentialBuckets, ExponentialHistogramDataPoint, HistogramDataPoint, MetricData,
    MetricDescriptor, MetricPoints, NumberDataPoint, NumberValue, ResourceMetrics, ScopeMetrics, SummaryDataPoint,
    ValueAtQuantile,
};

mod resource;
pub use self::resource::{InstrumentationScope, Resource};

mod time;
pub use self::time::HrTime;

mod trace;
pub use self::trace::{SpanData, SpanEvent, SpanKind, SpanLink, SpanStatus, StatusCode};

mod value;
pub use self::value::{AttributeValue, Attributes, KeyValue};
