use serde::Serialize;

use super::common::{InstrumentationScope, Resource};
use crate::{
    any_value::{to_any_value, to_attributes, AnyValue, EncodedKeyValue},
    encoding::{EncodedIdentifier, EncodedTimestamp, Encoder},
    grouping::{group_records, ResourceGroup, ScopeGroup},
    model,
};

/// An `ExportLogsServiceRequest`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportLogsServiceRequest {
    /// Log records, by resource.
    pub resource_logs: Vec<ResourceLogs>,
}

impl ExportLogsServiceRequest {
    /// Builds a request from `records`, encoding timestamps, identifiers and bytes with `encoder`.
    pub fn from_records(records: &[model::LogRecordData], encoder: &Encoder) -> Self {
        Self {
            resource_logs: group_records(records)
                .iter()
                .map(|group| ResourceLogs::new(group, encoder))
                .collect(),
        }
    }
}

/// A `ResourceLogs`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceLogs {
    /// The resource.
    pub resource: Resource,

    /// Log records, by scope.
    pub scope_logs: Vec<ScopeLogs>,

    /// Schema URL of the resource.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_url: Option<String>,
}

impl ResourceLogs {
    fn new(group: &ResourceGroup<'_, model::LogRecordData>, encoder: &Encoder) -> Self {
        Self {
            resource: Resource::new(group.resource, encoder),
            scope_logs: group.scopes.iter().map(|scope| ScopeLogs::new(scope, encoder)).collect(),
            schema_url: group.resource.schema_url.clone(),
        }
    }
}

/// A `ScopeLogs`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeLogs {
    /// The scope.
    pub scope: InstrumentationScope,

    /// The log records.
    pub log_records: Vec<LogRecord>,

    /// Schema URL of the scope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_url: Option<String>,
}

impl ScopeLogs {
    fn new(group: &ScopeGroup<'_, model::LogRecordData>, encoder: &Encoder) -> Self {
        Self {
            scope: InstrumentationScope::new(group.scope),
            log_records: group.records.iter().map(|record| LogRecord::new(record, encoder)).collect(),
            schema_url: group.scope.schema_url.clone(),
        }
    }
}

/// A `LogRecord`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    /// Time at which the event occurred.
    pub time_unix_nano: EncodedTimestamp,

    /// Time at which the event was observed.
    pub observed_time_unix_nano: EncodedTimestamp,

    /// OTLP severity number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity_number: Option<i32>,

    /// Severity as it appeared at the source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity_text: Option<String>,

    /// Record body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<AnyValue>,

    /// Record attributes.
    pub attributes: Vec<EncodedKeyValue>,

    /// Number of attributes dropped by the SDK.
    pub dropped_attributes_count: u32,

    /// W3C trace flags of the active span.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<u32>,

    /// Trace identifier of the active span.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<EncodedIdentifier>,

    /// Span identifier of the active span.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span_id: Option<EncodedIdentifier>,

    /// Event name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
}

impl LogRecord {
    fn new(record: &model::LogRecordData, encoder: &Encoder) -> Self {
        let context = record.span_context.as_ref();
        Self {
            time_unix_nano: encoder.timestamp(record.time),
            observed_time_unix_nano: encoder.timestamp(record.observed_time),
            severity_number: record.severity_number.map(|severity| severity.as_otlp()),
            severity_text: record.severity_text.clone(),
            body: record.body.as_ref().map(|body| to_any_value(body, encoder)),
            attributes: to_attributes(&record.attributes, encoder),
            dropped_attributes_count: record.dropped_attributes_count,
            flags: context.map(|context| u32::from(context.trace_flags)),
            trace_id: encoder.optional_identifier(context.map(|context| context.trace_id.as_bytes().as_slice())),
            span_id: encoder.optional_identifier(context.map(|context| context.span_id.as_bytes().as_slice())),
            event_name: record.event_name.clone(),
        }
    }
}
