use serde::Serialize;

use super::common::{InstrumentationScope, Resource};
use crate::{
    any_value::{to_attributes, EncodedKeyValue},
    encoding::{EncodedIdentifier, EncodedTimestamp, Encoder},
    grouping::{group_records, ResourceGroup, ScopeGroup},
    model,
    proto::span_flags,
};

/// An `ExportTraceServiceRequest`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportTraceServiceRequest {
    /// Spans, by resource.
    pub resource_spans: Vec<ResourceSpans>,
}

impl ExportTraceServiceRequest {
    /// Builds a request from `spans`, encoding timestamps, identifiers and bytes with `encoder`.
    pub fn from_spans(spans: &[model::SpanData], encoder: &Encoder) -> Self {
        Self {
            resource_spans: group_records(spans)
                .iter()
                .map(|group| ResourceSpans::new(group, encoder))
                .collect(),
        }
    }
}

/// A `ResourceSpans`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSpans {
    /// The resource.
    pub resource: Resource,

    /// Spans, by scope.
    pub scope_spans: Vec<ScopeSpans>,

    /// Schema URL of the resource.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_url: Option<String>,
}

impl ResourceSpans {
    fn new(group: &ResourceGroup<'_, model::SpanData>, encoder: &Encoder) -> Self {
        Self {
            resource: Resource::new(group.resource, encoder),
            scope_spans: group.scopes.iter().map(|scope| ScopeSpans::new(scope, encoder)).collect(),
            schema_url: group.resource.schema_url.clone(),
        }
    }
}

/// A `ScopeSpans`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeSpans {
    /// The scope.
    pub scope: InstrumentationScope,

    /// The spans.
    pub spans: Vec<Span>,

    /// Schema URL of the scope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_url: Option<String>,
}

impl ScopeSpans {
    fn new(group: &ScopeGroup<'_, model::SpanData>, encoder: &Encoder) -> Self {
        Self {
            scope: InstrumentationScope::new(group.scope),
            spans: group.records.iter().map(|span| Span::new(span, encoder)).collect(),
            schema_url: group.scope.schema_url.clone(),
        }
    }
}

/// A `Span`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Span {
    /// Trace identifier.
    pub trace_id: EncodedIdentifier,

    /// Span identifier.
    pub span_id: EncodedIdentifier,

    /// W3C trace state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_state: Option<String>,

    /// Parent span identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_span_id: Option<EncodedIdentifier>,

    /// Span name.
    pub name: String,

    /// OTLP span kind.
    pub kind: i32,

    /// Start time.
    pub start_time_unix_nano: EncodedTimestamp,

    /// End time.
    pub end_time_unix_nano: EncodedTimestamp,

    /// Span attributes.
    pub attributes: Vec<EncodedKeyValue>,

    /// Number of attributes dropped by the SDK.
    pub dropped_attributes_count: u32,

    /// Span events.
    pub events: Vec<Event>,

    /// Number of events dropped by the SDK.
    pub dropped_events_count: u32,

    /// Span status.
    pub status: Status,

    /// Span links.
    pub links: Vec<Link>,

    /// Number of links dropped by the SDK.
    pub dropped_links_count: u32,

    /// Trace flags and remoteness.
    pub flags: u32,
}

impl Span {
    fn new(span: &model::SpanData, encoder: &Encoder) -> Self {
        let parent_is_remote = span.parent_context.as_ref().is_some_and(|parent| parent.is_remote);
        Self {
            trace_id: encoder.identifier(span.context.trace_id.as_bytes()),
            span_id: encoder.identifier(span.context.span_id.as_bytes()),
            trace_state: span.context.trace_state.clone(),
            parent_span_id: encoder.optional_identifier(
                span.parent_context
                    .as_ref()
                    .map(|parent| parent.span_id.as_bytes().as_slice()),
            ),
            name: span.name.clone(),
            kind: span.kind.as_otlp(),
            start_time_unix_nano: encoder.timestamp(span.start_time),
            end_time_unix_nano: encoder.timestamp(span.end_time),
            attributes: to_attributes(&span.attributes, encoder),
            dropped_attributes_count: span.dropped_attributes_count,
            events: span.events.iter().map(|event| Event::new(event, encoder)).collect(),
            dropped_events_count: span.dropped_events_count,
            status: Status::new(&span.status),
            links: span.links.iter().map(|link| Link::new(link, encoder)).collect(),
            dropped_links_count: span.dropped_links_count,
            flags: span_flags(span.context.trace_flags, parent_is_remote),
        }
    }
}

/// A `Span.Event`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Time at which the event occurred.
    pub time_unix_nano: EncodedTimestamp,

    /// Event name.
    pub name: String,

    /// Event attributes.
    pub attributes: Vec<EncodedKeyValue>,

    /// Number of attributes dropped by the SDK.
    pub dropped_attributes_count: u32,
}

impl Event {
    fn new(event: &model::SpanEvent, encoder: &Encoder) -> Self {
        Self {
            time_unix_nano: encoder.timestamp(event.time),
            name: event.name.clone(),
            attributes: to_attributes(&event.attributes, encoder),
            dropped_attributes_count: event.dropped_attributes_count,
        }
    }
}

/// A `Span.Link`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    /// Trace identifier of the linked span.
    pub trace_id: EncodedIdentifier,

    /// Span identifier of the linked span.
    pub span_id: EncodedIdentifier,

    /// W3C trace state of the linked span.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_state: Option<String>,

    /// Link attributes.
    pub attributes: Vec<EncodedKeyValue>,

    /// Number of attributes dropped by the SDK.
    pub dropped_attributes_count: u32,

    /// Trace flags and remoteness of the linked span.
    pub flags: u32,
}

impl Link {
    fn new(link: &model::SpanLink, encoder: &Encoder) -> Self {
        Self {
            trace_id: encoder.identifier(link.context.trace_id.as_bytes()),
            span_id: encoder.identifier(link.context.span_id.as_bytes()),
            trace_state: link.context.trace_state.clone(),
            attributes: to_attributes(&link.attributes, encoder),
            dropped_attributes_count: link.dropped_attributes_count,
            flags: span_flags(link.context.trace_flags, link.context.is_remote),
        }
    }
}

/// A `Status`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    /// OTLP status code.
    pub code: i32,

    /// Developer-facing description of the status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Status {
    fn new(status: &model::SpanStatus) -> Self {
        Self {
            code: status.code.as_otlp(),
            message: status.message.clone(),
        }
    }
}
