use protowire::{MessageWrite, ProtoSink};

use super::common::{write_count_field, write_resource, write_scope, write_time_field};
use crate::{
    any_value::{write_any_value, write_attributes},
    grouping::{group_records, ResourceGroup, ScopeGroup},
    model::LogRecordData,
};

// ExportLogsServiceRequest
const REQUEST_RESOURCE_LOGS: u32 = 1;

// ResourceLogs
const RESOURCE_LOGS_RESOURCE: u32 = 1;
const RESOURCE_LOGS_SCOPE_LOGS: u32 = 2;
const RESOURCE_LOGS_SCHEMA_URL: u32 = 3;

// ScopeLogs
const SCOPE_LOGS_SCOPE: u32 = 1;
const SCOPE_LOGS_LOG_RECORDS: u32 = 2;
const SCOPE_LOGS_SCHEMA_URL: u32 = 3;

// LogRecord
const LOG_RECORD_TIME_UNIX_NANO: u32 = 1;
const LOG_RECORD_SEVERITY_NUMBER: u32 = 2;
const LOG_RECORD_SEVERITY_TEXT: u32 = 3;
const LOG_RECORD_BODY: u32 = 5;
const LOG_RECORD_ATTRIBUTES: u32 = 6;
const LOG_RECORD_DROPPED_ATTRIBUTES_COUNT: u32 = 7;
const LOG_RECORD_FLAGS: u32 = 8;
const LOG_RECORD_TRACE_ID: u32 = 9;
const LOG_RECORD_SPAN_ID: u32 = 10;
const LOG_RECORD_OBSERVED_TIME_UNIX_NANO: u32 = 11;
const LOG_RECORD_EVENT_NAME: u32 = 12;

/// An `ExportLogsServiceRequest`, ready to be written.
pub struct LogsRequest<'a> {
    groups: Vec<ResourceGroup<'a, LogRecordData>>,
}

impl<'a> LogsRequest<'a> {
    /// Groups `records` into a request.
    pub fn new(records: &'a [LogRecordData]) -> Self {
        Self {
            groups: group_records(records),
        }
    }
}

impl MessageWrite for LogsRequest<'_> {
    fn write_message<S: ProtoSink>(&self, sink: &mut S) {
        for group in &self.groups {
            sink.write_message(REQUEST_RESOURCE_LOGS, |sink| write_resource_logs(sink, group));
        }
    }
}

fn write_resource_logs<S: ProtoSink>(sink: &mut S, group: &ResourceGroup<'_, LogRecordData>) {
    sink.write_message(RESOURCE_LOGS_RESOURCE, |sink| write_resource(sink, group.resource));
    for scope in &group.scopes {
        sink.write_message(RESOURCE_LOGS_SCOPE_LOGS, |sink| write_scope_logs(sink, scope));
    }
    sink.write_string_field(
        RESOURCE_LOGS_SCHEMA_URL,
        group.resource.schema_url.as_deref().unwrap_or_default(),
    );
}

fn write_scope_logs<S: ProtoSink>(sink: &mut S, group: &ScopeGroup<'_, LogRecordData>) {
    sink.write_message(SCOPE_LOGS_SCOPE, |sink| write_scope(sink, group.scope));
    for record in &group.records {
        sink.write_message(SCOPE_LOGS_LOG_RECORDS, |sink| write_log_record(sink, record));
    }
    sink.write_string_field(
        SCOPE_LOGS_SCHEMA_URL,
        group.scope.schema_url.as_deref().unwrap_or_default(),
    );
}

fn write_log_record<S: ProtoSink>(sink: &mut S, record: &LogRecordData) {
    write_time_field(sink, LOG_RECORD_TIME_UNIX_NANO, record.time);
    if let Some(severity_number) = record.severity_number {
        sink.write_enum_field(LOG_RECORD_SEVERITY_NUMBER, severity_number.as_otlp());
    }
    sink.write_string_field(LOG_RECORD_SEVERITY_TEXT, record.severity_text.as_deref().unwrap_or_default());
    if let Some(body) = &record.body {
        sink.write_message(LOG_RECORD_BODY, |sink| write_any_value(sink, body));
    }
    write_attributes(sink, LOG_RECORD_ATTRIBUTES, &record.attributes);
    write_count_field(sink, LOG_RECORD_DROPPED_ATTRIBUTES_COUNT, record.dropped_attributes_count);
    if let Some(context) = &record.span_context {
        sink.write_fixed32_field(LOG_RECORD_FLAGS, u32::from(context.trace_flags));
        sink.write_bytes_field(LOG_RECORD_TRACE_ID, context.trace_id.as_bytes());
        sink.write_bytes_field(LOG_RECORD_SPAN_ID, context.span_id.as_bytes());
    }
    write_time_field(sink, LOG_RECORD_OBSERVED_TIME_UNIX_NANO, record.observed_time);
    sink.write_string_field(LOG_RECORD_EVENT_NAME, record.event_name.as_deref().unwrap_or_default());
}
