//! Export responses.
//!
//! Collectors answer every export request with a response that may report a partial success: some of the records were
//! rejected, with an explanation. Responses are small and fixed in shape, so they are decoded with `prost` from
//! protobuf, and with `serde` from OTLP/JSON, where 64-bit counters may arrive either as numbers or as strings.

use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr, PickFirst};

/// Partial success details of an `ExportTraceServiceResponse`.
#[serde_as]
#[derive(Clone, PartialEq, ::prost::Message, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportTracePartialSuccess {
    /// Number of rejected spans.
    #[prost(int64, tag = "1")]
    #[serde(default)]
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub rejected_spans: i64,

    /// Explanation of the rejection, or a warning.
    #[prost(string, tag = "2")]
    #[serde(default)]
    pub error_message: String,
}

/// Response to an `ExportTraceServiceRequest`.
#[derive(Clone, PartialEq, ::prost::Message, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportTraceServiceResponse {
    /// Partial success details, if the request was only partially accepted.
    #[prost(message, optional, tag = "1")]
    #[serde(default)]
    pub partial_success: Option<ExportTracePartialSuccess>,
}

/// Partial success details of an `ExportMetricsServiceResponse`.
#[serde_as]
#[derive(Clone, PartialEq, ::prost::Message, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetricsPartialSuccess {
    /// Number of rejected data points.
    #[prost(int64, tag = "1")]
    #[serde(default)]
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub rejected_data_points: i64,

    /// Explanation of the rejection, or a warning.
    #[prost(string, tag = "2")]
    #[serde(default)]
    pub error_message: String,
}

/// Response to an `ExportMetricsServiceRequest`.
#[derive(Clone, PartialEq, ::prost::Message, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetricsServiceResponse {
    /// Partial success details, if the request was only partially accepted.
    #[prost(message, optional, tag = "1")]
    #[serde(default)]
    pub partial_success: Option<ExportMetricsPartialSuccess>,
}

/// Partial success details of an `ExportLogsServiceResponse`.
#[serde_as]
#[derive(Clone, PartialEq, ::prost::Message, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportLogsPartialSuccess {
    /// Number of rejected log records.
    #[prost(int64, tag = "1")]
    #[serde(default)]
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub rejected_log_records: i64,

    /// Explanation of the rejection, or a warning.
    #[prost(string, tag = "2")]
    #[serde(default)]
    pub error_message: String,
}

/// Response to an `ExportLogsServiceRequest`.
#[derive(Clone, PartialEq, ::prost::Message, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportLogsServiceResponse {
    /// Partial success details, if the request was only partially accepted.
    #[prost(message, optional, tag = "1")]
    #[serde(default)]
    pub partial_success: Option<ExportLogsPartialSuccess>,
}
