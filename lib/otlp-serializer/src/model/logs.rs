use std::sync::Arc;

use super::{AttributeValue, Attributes, HrTime, InstrumentationScope, Resource, SpanContext};

/// Severity of a log record, as defined by the OpenTelemetry log data model.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(i32)]
#[allow(missing_docs)]
pub enum SeverityNumber {
    #[default]
    Unspecified = 0,
    Trace = 1,
    Trace2 = 2,
    Trace3 = 3,
    Trace4 = 4,
    Debug = 5,
    Debug2 = 6,
    Debug3 = 7,
    Debug4 = 8,
    Info = 9,
    Info2 = 10,
    Info3 = 11,
    Info4 = 12,
    Warn = 13,
    Warn2 = 14,
    Warn3 = 15,
    Warn4 = 16,
    Error = 17,
    Error2 = 18,
    Error3 = 19,
    Error4 = 20,
    Fatal = 21,
    Fatal2 = 22,
    Fatal3 = 23,
    Fatal4 = 24,
}

impl SeverityNumber {
    /// Returns the OTLP `SeverityNumber` enum value.
    pub const fn as_otlp(&self) -> i32 {
        *self as i32
    }
}

/// A log record.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LogRecordData {
    /// Resource that produced the record.
    pub resource: Arc<Resource>,

    /// Instrumentation scope that produced the record.
    pub scope: InstrumentationScope,

    /// Time at which the event occurred.
    pub time: HrTime,

    /// Time at which the event was observed by the SDK.
    pub observed_time: HrTime,

    /// Numerical severity.
    pub severity_number: Option<SeverityNumber>,

    /// Severity as it appeared at the source.
    pub severity_text: Option<String>,

    /// Record body.
    pub body: Option<AttributeValue>,

    /// Record attributes.
    pub attributes: Attributes,

    /// Number of attributes dropped by the SDK.
    pub dropped_attributes_count: u32,

    /// Context of the span that was active when the record was emitted, if any.
    pub span_context: Option<SpanContext>,

    /// Name of the event, for records that represent events.
    pub event_name: Option<String>,
}
