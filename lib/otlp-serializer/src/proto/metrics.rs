use protowire::{MessageWrite, ProtoSink, WireType};

use super::common::{write_optional_double_field, write_resource, write_scope, write_time_field};
use crate::{
    any_value::write_attributes,
    grouping::{group_metrics, ResourceGroup, ScopeGroup},
    model::{
        ExponentialBuckets, ExponentialHistogramDataPoint, HistogramDataPoint, MetricData, MetricPoints,
        NumberDataPoint, NumberValue, ResourceMetrics, SummaryDataPoint, ValueAtQuantile,
    },
};

// ExportMetricsServiceRequest
const REQUEST_RESOURCE_METRICS: u32 = 1;

// ResourceMetrics
const RESOURCE_METRICS_RESOURCE: u32 = 1;
const RESOURCE_METRICS_SCOPE_METRICS: u32 = 2;
const RESOURCE_METRICS_SCHEMA_URL: u32 = 3;

// ScopeMetrics
const SCOPE_METRICS_SCOPE: u32 = 1;
const SCOPE_METRICS_METRICS: u32 = 2;
const SCOPE_METRICS_SCHEMA_URL: u32 = 3;

// Metric
const METRIC_NAME: u32 = 1;
const METRIC_DESCRIPTION: u32 = 2;
const METRIC_UNIT: u32 = 3;
const METRIC_GAUGE: u32 = 5;
const METRIC_SUM: u32 = 7;
const METRIC_HISTOGRAM: u32 = 9;
const METRIC_EXPONENTIAL_HISTOGRAM: u32 = 10;
const METRIC_SUMMARY: u32 = 11;

// Gauge, Sum, Histogram, ExponentialHistogram, Summary
const DATA_POINTS: u32 = 1;
const AGGREGATION_TEMPORALITY: u32 = 2;
const SUM_IS_MONOTONIC: u32 = 3;

// NumberDataPoint
const NUMBER_START_TIME_UNIX_NANO: u32 = 2;
const NUMBER_TIME_UNIX_NANO: u32 = 3;
const NUMBER_AS_DOUBLE: u32 = 4;
const NUMBER_AS_INT: u32 = 6;
const NUMBER_ATTRIBUTES: u32 = 7;

// HistogramDataPoint
const HISTOGRAM_START_TIME_UNIX_NANO: u32 = 2;
const HISTOGRAM_TIME_UNIX_NANO: u32 = 3;
const HISTOGRAM_COUNT: u32 = 4;
const HISTOGRAM_SUM: u32 = 5;
const HISTOGRAM_BUCKET_COUNTS: u32 = 6;
const HISTOGRAM_EXPLICIT_BOUNDS: u32 = 7;
const HISTOGRAM_ATTRIBUTES: u32 = 9;
const HISTOGRAM_MIN: u32 = 11;
const HISTOGRAM_MAX: u32 = 12;

// ExponentialHistogramDataPoint
const EXP_HISTOGRAM_ATTRIBUTES: u32 = 1;
const EXP_HISTOGRAM_START_TIME_UNIX_NANO: u32 = 2;
const EXP_HISTOGRAM_TIME_UNIX_NANO: u32 = 3;
const EXP_HISTOGRAM_COUNT: u32 = 4;
const EXP_HISTOGRAM_SUM: u32 = 5;
const EXP_HISTOGRAM_SCALE: u32 = 6;
const EXP_HISTOGRAM_ZERO_COUNT: u32 = 7;
const EXP_HISTOGRAM_POSITIVE: u32 = 8;
const EXP_HISTOGRAM_NEGATIVE: u32 = 9;
const EXP_HISTOGRAM_MIN: u32 = 12;
const EXP_HISTOGRAM_MAX: u32 = 13;
const EXP_HISTOGRAM_ZERO_THRESHOLD: u32 = 14;

// ExponentialHistogramDataPoint.Buckets
const BUCKETS_OFFSET: u32 = 1;
const BUCKETS_BUCKET_COUNTS: u32 = 2;

// SummaryDataPoint
const SUMMARY_START_TIME_UNIX_NANO: u32 = 2;
const SUMMARY_TIME_UNIX_NANO: u32 = 3;
const SUMMARY_COUNT: u32 = 4;
const SUMMARY_SUM: u32 = 5;
const SUMMARY_QUANTILE_VALUES: u32 = 6;
const SUMMARY_ATTRIBUTES: u32 = 7;

// SummaryDataPoint.ValueAtQuantile
const QUANTILE_QUANTILE: u32 = 1;
const QUANTILE_VALUE: u32 = 2;

/// An `ExportMetricsServiceRequest`, ready to be written.
pub struct MetricsRequest<'a> {
    groups: Vec<ResourceGroup<'a, MetricData>>,
}

impl<'a> MetricsRequest<'a> {
    /// Groups `batches` into a request.
    pub fn new(batches: &'a [ResourceMetrics]) -> Self {
        Self {
            groups: group_metrics(batches),
        }
    }
}

impl MessageWrite for MetricsRequest<'_> {
    fn write_message<S: ProtoSink>(&self, sink: &mut S) {
        for group in &self.groups {
            sink.write_message(REQUEST_RESOURCE_METRICS, |sink| write_resource_metrics(sink, group));
        }
    }
}

fn write_resource_metrics<S: ProtoSink>(sink: &mut S, group: &ResourceGroup<'_, MetricData>) {
    sink.write_message(RESOURCE_METRICS_RESOURCE, |sink| write_resource(sink, group.resource));
    for scope in &group.scopes {
        sink.write_message(RESOURCE_METRICS_SCOPE_METRICS, |sink| write_scope_metrics(sink, scope));
    }
    sink.write_string_field(
        RESOURCE_METRICS_SCHEMA_URL,
        group.resource.schema_url.as_deref().unwrap_or_default(),
    );
}

fn write_scope_metrics<S: ProtoSink>(sink: &mut S, group: &ScopeGroup<'_, MetricData>) {
    sink.write_message(SCOPE_METRICS_SCOPE, |sink| write_scope(sink, group.scope));
    for metric in &group.records {
        sink.write_message(SCOPE_METRICS_METRICS, |sink| write_metric(sink, metric));
    }
    sink.write_string_field(
        SCOPE_METRICS_SCHEMA_URL,
        group.scope.schema_url.as_deref().unwrap_or_default(),
    );
}

fn write_metric<S: ProtoSink>(sink: &mut S, metric: &MetricData) {
    sink.write_string_field(METRIC_NAME, &metric.descriptor.name);
    sink.write_string_field(METRIC_DESCRIPTION, &metric.descriptor.description);
    sink.write_string_field(METRIC_UNIT, &metric.descriptor.unit);

    let temporality = metric.temporality.as_otlp();
    match &metric.points {
        MetricPoints::Gauge(points) => sink.write_message(METRIC_GAUGE, |sink| {
            for point in points {
                sink.write_message(DATA_POINTS, |sink| write_number_point(sink, point));
            }
        }),
        MetricPoints::Sum { points, is_monotonic } => sink.write_message(METRIC_SUM, |sink| {
            for point in points {
                sink.write_message(DATA_POINTS, |sink| write_number_point(sink, point));
            }
            sink.write_enum_field(AGGREGATION_TEMPORALITY, temporality);
            sink.write_bool_field(SUM_IS_MONOTONIC, *is_monotonic);
        }),
        MetricPoints::Histogram(points) => sink.write_message(METRIC_HISTOGRAM, |sink| {
            for point in points {
                sink.write_message(DATA_POINTS, |sink| write_histogram_point(sink, point));
            }
            sink.write_enum_field(AGGREGATION_TEMPORALITY, temporality);
        }),
        MetricPoints::ExponentialHistogram(points) => sink.write_message(METRIC_EXPONENTIAL_HISTOGRAM, |sink| {
            for point in points {
                sink.write_message(DATA_POINTS, |sink| write_exponential_histogram_point(sink, point));
            }
            sink.write_enum_field(AGGREGATION_TEMPORALITY, temporality);
        }),
        MetricPoints::Summary(points) => sink.write_message(METRIC_SUMMARY, |sink| {
            for point in points {
                sink.write_message(DATA_POINTS, |sink| write_summary_point(sink, point));
            }
        }),
    }
}

fn write_number_point<S: ProtoSink>(sink: &mut S, point: &NumberDataPoint) {
    write_time_field(sink, NUMBER_START_TIME_UNIX_NANO, point.start_time);
    write_time_field(sink, NUMBER_TIME_UNIX_NANO, point.time);
    match point.value {
        NumberValue::Double(value) => {
            sink.write_tag(NUMBER_AS_DOUBLE, WireType::Fixed64);
            sink.write_double(value);
        }
        NumberValue::Int(value) => {
            // `sfixed64`: the two's complement bit pattern, little-endian.
            sink.write_tag(NUMBER_AS_INT, WireType::Fixed64);
            sink.write_fixed64(value as u64);
        }
    }
    write_attributes(sink, NUMBER_ATTRIBUTES, &point.attributes);
}

fn write_histogram_point<S: ProtoSink>(sink: &mut S, point: &HistogramDataPoint) {
    write_time_field(sink, HISTOGRAM_START_TIME_UNIX_NANO, point.start_time);
    write_time_field(sink, HISTOGRAM_TIME_UNIX_NANO, point.time);
    sink.write_fixed64_field(HISTOGRAM_COUNT, point.count);
    write_optional_double_field(sink, HISTOGRAM_SUM, point.sum);
    sink.write_packed_fixed64_field(HISTOGRAM_BUCKET_COUNTS, &point.bucket_counts);
    sink.write_packed_double_field(HISTOGRAM_EXPLICIT_BOUNDS, &point.explicit_bounds);
    write_attributes(sink, HISTOGRAM_ATTRIBUTES, &point.attributes);
    write_optional_double_field(sink, HISTOGRAM_MIN, point.min);
    write_optional_double_field(sink, HISTOGRAM_MAX, point.max);
}

fn write_exponential_histogram_point<S: ProtoSink>(sink: &mut S, point: &ExponentialHistogramDataPoint) {
    write_attributes(sink, EXP_HISTOGRAM_ATTRIBUTES, &point.attributes);
    write_time_field(sink, EXP_HISTOGRAM_START_TIME_UNIX_NANO, point.start_time);
    write_time_field(sink, EXP_HISTOGRAM_TIME_UNIX_NANO, point.time);
    sink.write_fixed64_field(EXP_HISTOGRAM_COUNT, point.count);
    write_optional_double_field(sink, EXP_HISTOGRAM_SUM, point.sum);
    sink.write_sint32_field(EXP_HISTOGRAM_SCALE, point.scale);
    sink.write_fixed64_field(EXP_HISTOGRAM_ZERO_COUNT, point.zero_count);
    sink.write_message(EXP_HISTOGRAM_POSITIVE, |sink| write_buckets(sink, &point.positive));
    sink.write_message(EXP_HISTOGRAM_NEGATIVE, |sink| write_buckets(sink, &point.negative));
    write_optional_double_field(sink, EXP_HISTOGRAM_MIN, point.min);
    write_optional_double_field(sink, EXP_HISTOGRAM_MAX, point.max);
    sink.write_double_field(EXP_HISTOGRAM_ZERO_THRESHOLD, point.zero_threshold);
}

fn write_buckets<S: ProtoSink>(sink: &mut S, buckets: &ExponentialBuckets) {
    sink.write_sint32_field(BUCKETS_OFFSET, buckets.offset);
    sink.write_packed_varint_field(BUCKETS_BUCKET_COUNTS, &buckets.bucket_counts);
}

fn write_summary_point<S: ProtoSink>(sink: &mut S, point: &SummaryDataPoint) {
    write_time_field(sink, SUMMARY_START_TIME_UNIX_NANO, point.start_time);
    write_time_field(sink, SUMMARY_TIME_UNIX_NANO, point.time);
    sink.write_fixed64_field(SUMMARY_COUNT, point.count);
    sink.write_double_field(SUMMARY_SUM, point.sum);
    for quantile in &point.quantile_values {
        sink.write_message(SUMMARY_QUANTILE_VALUES, |sink| write_quantile(sink, quantile));
    }
    write_attributes(sink, SUMMARY_ATTRIBUTES, &point.attributes);
}

fn write_quantile<S: ProtoSink>(sink: &mut S, quantile: &ValueAtQuantile) {
    sink.write_double_field(QUANTILE_QUANTILE, quantile.quantile);
    sink.write_double_field(QUANTILE_VALUE, quantile.value);
}
