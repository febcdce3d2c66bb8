use std::sync::Arc;

use super::{Attributes, HrTime, InstrumentationScope, Resource, SpanContext};

/// The role a span plays in a trace.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum SpanKind {
    /// An internal operation within an application.
    #[default]
    Internal,

    /// The server side of a synchronous remote call.
    Server,

    /// The client side of a synchronous remote call.
    Client,

    /// The initiator of an asynchronous request.
    Producer,

    /// The handler of an asynchronous request.
    Consumer,
}

impl SpanKind {
    /// Returns the OTLP `SpanKind` enum value.
    pub const fn as_otlp(&self) -> i32 {
        match self {
            Self::Internal => 1,
            Self::Server => 2,
            Self::Client => 3,
            Self::Producer => 4,
            Self::Consumer => 5,
        }
    }
}

/// The outcome of a span.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum StatusCode {
    /// The default status.
    #[default]
    Unset,

    /// The operation completed successfully.
    Ok,

    /// The operation contains an error.
    Error,
}

impl StatusCode {
    /// Returns the OTLP `Status.StatusCode` enum value.
    pub const fn as_otlp(&self) -> i32 {
        match self {
            Self::Unset => 0,
            Self::Ok => 1,
            Self::Error => 2,
        }
    }
}

/// Status of a span.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SpanStatus {
    /// Status code.
    pub code: StatusCode,

    /// Developer-facing description of the status.
    pub message: Option<String>,
}

/// A timestamped annotation on a span.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpanEvent {
    /// Event name.
    pub name: String,

    /// Time at which the event occurred.
    pub time: HrTime,

    /// Event attributes.
    pub attributes: Attributes,

    /// Number of attributes dropped by the SDK.
    pub dropped_attributes_count: u32,
}

/// A reference from a span to another span, possibly in a different trace.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpanLink {
    /// Context of the linked span.
    pub context: SpanContext,

    /// Link attributes.
    pub attributes: Attributes,

    /// Number of attributes dropped by the SDK.
    pub dropped_attributes_count: u32,
}

/// A finished span.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpanData {
    /// Resource that produced the span.
    pub resource: Arc<Resource>,

    /// Instrumentation scope that produced the span.
    pub scope: InstrumentationScope,

    /// Context of the span itself.
    pub context: SpanContext,

    /// Context of the parent span, if any.
    pub parent_context: Option<SpanContext>,

    /// Span name.
    pub name: String,

    /// Span kind.
    pub kind: SpanKind,

    /// Start time.
    pub start_time: HrTime,

    /// End time.
    pub end_time: HrTime,

    /// Span attributes.
    pub attributes: Attributes,

    /// Number of attributes dropped by the SDK.
    pub dropped_attributes_count: u32,

    /// Span events.
    pub events: Vec<SpanEvent>,

    /// Number of events dropped by the SDK.
    pub dropped_events_count: u32,

    /// Span links.
    pub links: Vec<SpanLink>,

    /// Number of links dropped by the SDK.
    pub dropped_links_count: u32,

    /// Span status.
    pub status: SpanStatus,
}
