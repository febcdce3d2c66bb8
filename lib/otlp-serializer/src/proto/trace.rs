use protowire::{MessageWrite, ProtoSink};

use super::common::{span_flags, write_count_field, write_resource, write_scope, write_time_field};
use crate::{
    any_value::write_attributes,
    grouping::{group_records, ResourceGroup, ScopeGroup},
    model::{SpanData, SpanEvent, SpanLink, SpanStatus},
};

// ExportTraceServiceRequest
const REQUEST_RESOURCE_SPANS: u32 = 1;

// ResourceSpans
const RESOURCE_SPANS_RESOURCE: u32 = 1;
const RESOURCE_SPANS_SCOPE_SPANS: u32 = 2;
const RESOURCE_SPANS_SCHEMA_URL: u32 = 3;

// ScopeSpans
const SCOPE_SPANS_SCOPE: u32 = 1;
const SCOPE_SPANS_SPANS: u32 = 2;
const SCOPE_SPANS_SCHEMA_URL: u32 = 3;

// Span
const SPAN_TRACE_ID: u32 = 1;
const SPAN_SPAN_ID: u32 = 2;
const SPAN_TRACE_STATE: u32 = 3;
const SPAN_PARENT_SPAN_ID: u32 = 4;
const SPAN_NAME: u32 = 5;
const SPAN_KIND: u32 = 6;
const SPAN_START_TIME_UNIX_NANO: u32 = 7;
const SPAN_END_TIME_UNIX_NANO: u32 = 8;
const SPAN_ATTRIBUTES: u32 = 9;
const SPAN_DROPPED_ATTRIBUTES_COUNT: u32 = 10;
const SPAN_EVENTS: u32 = 11;
const SPAN_DROPPED_EVENTS_COUNT: u32 = 12;
const SPAN_LINKS: u32 = 13;
const SPAN_DROPPED_LINKS_COUNT: u32 = 14;
const SPAN_STATUS: u32 = 15;
const SPAN_FLAGS: u32 = 16;

// Span.Event
const EVENT_TIME_UNIX_NANO: u32 = 1;
const EVENT_NAME: u32 = 2;
const EVENT_ATTRIBUTES: u32 = 3;
const EVENT_DROPPED_ATTRIBUTES_COUNT: u32 = 4;

// Span.Link
const LINK_TRACE_ID: u32 = 1;
const LINK_SPAN_ID: u32 = 2;
const LINK_TRACE_STATE: u32 = 3;
const LINK_ATTRIBUTES: u32 = 4;
const LINK_DROPPED_ATTRIBUTES_COUNT: u32 = 5;
const LINK_FLAGS: u32 = 6;

// Status
const STATUS_MESSAGE: u32 = 2;
const STATUS_CODE: u32 = 3;

/// An `ExportTraceServiceRequest`, ready to be written.
pub struct TraceRequest<'a> {
    groups: Vec<ResourceGroup<'a, SpanData>>,
}

impl<'a> TraceRequest<'a> {
    /// Groups `spans` into a request.
    pub fn new(spans: &'a [SpanData]) -> Self {
        Self {
            groups: group_records(spans),
        }
    }
}

impl MessageWrite for TraceRequest<'_> {
    fn write_message<S: ProtoSink>(&self, sink: &mut S) {
        for group in &self.groups {
            sink.write_message(REQUEST_RESOURCE_SPANS, |sink| write_resource_spans(sink, group));
        }
    }
}

fn write_resource_spans<S: ProtoSink>(sink: &mut S, group: &ResourceGroup<'_, SpanData>) {
    sink.write_message(RESOURCE_SPANS_RESOURCE, |sink| write_resource(sink, group.resource));
    for scope in &group.scopes {
        sink.write_message(RESOURCE_SPANS_SCOPE_SPANS, |sink| write_scope_spans(sink, scope));
    }
    sink.write_string_field(
        RESOURCE_SPANS_SCHEMA_URL,
        group.resource.schema_url.as_deref().unwrap_or_default(),
    );
}

fn write_scope_spans<S: ProtoSink>(sink: &mut S, group: &ScopeGroup<'_, SpanData>) {
    sink.write_message(SCOPE_SPANS_SCOPE, |sink| write_scope(sink, group.scope));
    for span in &group.records {
        sink.write_message(SCOPE_SPANS_SPANS, |sink| write_span(sink, span));
    }
    sink.write_string_field(
        SCOPE_SPANS_SCHEMA_URL,
        group.scope.schema_url.as_deref().unwrap_or_default(),
    );
}

fn write_span<S: ProtoSink>(sink: &mut S, span: &SpanData) {
    sink.write_bytes_field(SPAN_TRACE_ID, span.context.trace_id.as_bytes());
    sink.write_bytes_field(SPAN_SPAN_ID, span.context.span_id.as_bytes());
    sink.write_string_field(SPAN_TRACE_STATE, span.context.trace_state.as_deref().unwrap_or_default());
    if let Some(parent) = &span.parent_context {
        sink.write_bytes_field(SPAN_PARENT_SPAN_ID, parent.span_id.as_bytes());
    }
    sink.write_string_field(SPAN_NAME, &span.name);
    sink.write_enum_field(SPAN_KIND, span.kind.as_otlp());
    write_time_field(sink, SPAN_START_TIME_UNIX_NANO, span.start_time);
    write_time_field(sink, SPAN_END_TIME_UNIX_NANO, span.end_time);
    write_attributes(sink, SPAN_ATTRIBUTES, &span.attributes);
    write_count_field(sink, SPAN_DROPPED_ATTRIBUTES_COUNT, span.dropped_attributes_count);
    for event in &span.events {
        sink.write_message(SPAN_EVENTS, |sink| write_event(sink, event));
    }
    write_count_field(sink, SPAN_DROPPED_EVENTS_COUNT, span.dropped_events_count);
    for link in &span.links {
        sink.write_message(SPAN_LINKS, |sink| write_link(sink, link));
    }
    write_count_field(sink, SPAN_DROPPED_LINKS_COUNT, span.dropped_links_count);
    sink.write_message(SPAN_STATUS, |sink| write_status(sink, &span.status));

    let parent_is_remote = span.parent_context.as_ref().is_some_and(|parent| parent.is_remote);
    sink.write_fixed32_field(SPAN_FLAGS, span_flags(span.context.trace_flags, parent_is_remote));
}

fn write_event<S: ProtoSink>(sink: &mut S, event: &SpanEvent) {
    write_time_field(sink, EVENT_TIME_UNIX_NANO, event.time);
    sink.write_string_field(EVENT_NAME, &event.name);
    write_attributes(sink, EVENT_ATTRIBUTES, &event.attributes);
    write_count_field(sink, EVENT_DROPPED_ATTRIBUTES_COUNT, event.dropped_attributes_count);
}

fn write_link<S: ProtoSink>(sink: &mut S, link: &SpanLink) {
    sink.write_bytes_field(LINK_TRACE_ID, link.context.trace_id.as_bytes());
    sink.write_bytes_field(LINK_SPAN_ID, link.context.span_id.as_bytes());
    sink.write_string_field(LINK_TRACE_STATE, link.context.trace_state.as_deref().unwrap_or_default());
    write_attributes(sink, LINK_ATTRIBUTES, &link.attributes);
    write_count_field(sink, LINK_DROPPED_ATTRIBUTES_COUNT, link.dropped_attributes_count);
    sink.write_fixed32_field(
        LINK_FLAGS,
        span_flags(link.context.trace_flags, link.context.is_remote),
    );
}

fn write_status<S: ProtoSink>(sink: &mut S, status: &SpanStatus) {
    sink.write_string_field(STATUS_MESSAGE, status.message.as_deref().unwrap_or_default());
    sink.write_enum_field(STATUS_CODE, status.code.as_otlp());
}
