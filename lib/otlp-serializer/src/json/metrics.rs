use serde::Serialize;

use super::common::{InstrumentationScope, Resource};
use crate::{
    any_value::{to_attributes, EncodedKeyValue},
    encoding::{EncodedTimestamp, Encoder},
    grouping::{group_metrics, ResourceGroup, ScopeGroup},
    model::{self, MetricPoints},
};

/// An `ExportMetricsServiceRequest`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetricsServiceRequest {
    /// Metrics, by resource.
    pub resource_metrics: Vec<ResourceMetrics>,
}

impl ExportMetricsServiceRequest {
    /// Builds a request from `batches`, encoding timestamps and bytes with `encoder`.
    pub fn from_batches(batches: &[model::ResourceMetrics], encoder: &Encoder) -> Self {
        Self {
            resource_metrics: group_metrics(batches)
                .iter()
                .map(|group| ResourceMetrics::new(group, encoder))
                .collect(),
        }
    }
}

/// A `ResourceMetrics`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceMetrics {
    /// The resource.
    pub resource: Resource,

    /// Metrics, by scope.
    pub scope_metrics: Vec<ScopeMetrics>,

    /// Schema URL of the resource.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_url: Option<String>,
}

impl ResourceMetrics {
    fn new(group: &ResourceGroup<'_, model::MetricData>, encoder: &Encoder) -> Self {
        Self {
            resource: Resource::new(group.resource, encoder),
            scope_metrics: group
                .scopes
                .iter()
                .map(|scope| ScopeMetrics::new(scope, encoder))
                .collect(),
            schema_url: group.resource.schema_url.clone(),
        }
    }
}

/// A `ScopeMetrics`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeMetrics {
    /// The scope.
    pub scope: InstrumentationScope,

    /// The metrics.
    pub metrics: Vec<Metric>,

    /// Schema URL of the scope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_url: Option<String>,
}

impl ScopeMetrics {
    fn new(group: &ScopeGroup<'_, model::MetricData>, encoder: &Encoder) -> Self {
        Self {
            scope: InstrumentationScope::new(group.scope),
            metrics: group.records.iter().map(|metric| Metric::new(metric, encoder)).collect(),
            schema_url: group.scope.schema_url.clone(),
        }
    }
}

/// A `Metric`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    /// Metric name.
    pub name: String,

    /// Metric description.
    pub description: String,

    /// Unit of the metric values.
    pub unit: String,

    /// Data points, keyed by metric type.
    #[serde(flatten)]
    pub data: MetricPayload,
}

impl Metric {
    fn new(metric: &model::MetricData, encoder: &Encoder) -> Self {
        let temporality = metric.temporality.as_otlp();
        let data = match &metric.points {
            MetricPoints::Gauge(points) => MetricPayload::Gauge(Gauge {
                data_points: number_points(points, encoder),
            }),
            MetricPoints::Sum { points, is_monotonic } => MetricPayload::Sum(Sum {
                data_points: number_points(points, encoder),
                aggregation_temporality: temporality,
                is_monotonic: *is_monotonic,
            }),
            MetricPoints::Histogram(points) => MetricPayload::Histogram(Histogram {
                data_points: points
                    .iter()
                    .map(|point| HistogramDataPoint::new(point, encoder))
                    .collect(),
                aggregation_temporality: temporality,
            }),
            MetricPoints::ExponentialHistogram(points) => MetricPayload::ExponentialHistogram(ExponentialHistogram {
                data_points: points
                    .iter()
                    .map(|point| ExponentialHistogramDataPoint::new(point, encoder))
                    .collect(),
                aggregation_temporality: temporality,
            }),
            MetricPoints::Summary(points) => MetricPayload::Summary(Summary {
                data_points: points
                    .iter()
                    .map(|point| SummaryDataPoint::new(point, encoder))
                    .collect(),
            }),
        };

        Self {
            name: metric.descriptor.name.clone(),
            description: metric.descriptor.description.clone(),
            unit: metric.descriptor.unit.clone(),
            data,
        }
    }
}

/// The data of a metric, by metric type.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricPayload {
    /// `gauge`.
    Gauge(Gauge),

    /// `sum`.
    Sum(Sum),

    /// `histogram`.
    Histogram(Histogram),

    /// `exponentialHistogram`.
    ExponentialHistogram(ExponentialHistogram),

    /// `summary`.
    Summary(Summary),
}

/// A `Gauge`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Gauge {
    /// Data points.
    pub data_points: Vec<NumberDataPoint>,
}

/// A `Sum`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sum {
    /// Data points.
    pub data_points: Vec<NumberDataPoint>,

    /// OTLP aggregation temporality.
    pub aggregation_temporality: i32,

    /// Whether the sum only ever increases.
    pub is_monotonic: bool,
}

/// A `Histogram`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Histogram {
    /// Data points.
    pub data_points: Vec<HistogramDataPoint>,

    /// OTLP aggregation temporality.
    pub aggregation_temporality: i32,
}

/// An `ExponentialHistogram`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExponentialHistogram {
    /// Data points.
    pub data_points: Vec<ExponentialHistogramDataPoint>,

    /// OTLP aggregation temporality.
    pub aggregation_temporality: i32,
}

/// A `Summary`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Data points.
    pub data_points: Vec<SummaryDataPoint>,
}

fn number_points(points: &[model::NumberDataPoint], encoder: &Encoder) -> Vec<NumberDataPoint> {
    points.iter().map(|point| NumberDataPoint::new(point, encoder)).collect()
}

/// The value of a `NumberDataPoint`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NumberValue {
    /// `asInt`.
    AsInt(i64),

    /// `asDouble`.
    AsDouble(f64),
}

/// A `NumberDataPoint`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberDataPoint {
    /// Point attributes.
    pub attributes: Vec<EncodedKeyValue>,

    /// Start of the aggregation window.
    pub start_time_unix_nano: EncodedTimestamp,

    /// End of the aggregation window.
    pub time_unix_nano: EncodedTimestamp,

    /// Value.
    #[serde(flatten)]
    pub value: NumberValue,
}

impl NumberDataPoint {
    fn new(point: &model::NumberDataPoint, encoder: &Encoder) -> Self {
        Self {
            attributes: to_attributes(&point.attributes, encoder),
            start_time_unix_nano: encoder.timestamp(point.start_time),
            time_unix_nano: encoder.timestamp(point.time),
            value: match point.value {
                model::NumberValue::Int(value) => NumberValue::AsInt(value),
                model::NumberValue::Double(value) => NumberValue::AsDouble(value),
            },
        }
    }
}

/// A `HistogramDataPoint`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramDataPoint {
    /// Point attributes.
    pub attributes: Vec<EncodedKeyValue>,

    /// Start of the aggregation window.
    pub start_time_unix_nano: EncodedTimestamp,

    /// End of the aggregation window.
    pub time_unix_nano: EncodedTimestamp,

    /// Number of recorded values.
    pub count: u64,

    /// Sum of recorded values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sum: Option<f64>,

    /// Per-bucket counts.
    pub bucket_counts: Vec<u64>,

    /// Bucket boundaries.
    pub explicit_bounds: Vec<f64>,

    /// Minimum recorded value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    /// Maximum recorded value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl HistogramDataPoint {
    fn new(point: &model::HistogramDataPoint, encoder: &Encoder) -> Self {
        Self {
            attributes: to_attributes(&point.attributes, encoder),
            start_time_unix_nano: encoder.timestamp(point.start_time),
            time_unix_nano: encoder.timestamp(point.time),
            count: point.count,
            sum: point.sum,
            bucket_counts: point.bucket_counts.clone(),
            explicit_bounds: point.explicit_bounds.clone(),
            min: point.min,
            max: point.max,
        }
    }
}

/// An `ExponentialHistogramDataPoint.Buckets`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Buckets {
    /// Index of the first bucket.
    pub offset: i32,

    /// Per-bucket counts.
    pub bucket_counts: Vec<u64>,
}

impl Buckets {
    fn new(buckets: &model::ExponentialBuckets) -> Self {
        Self {
            offset: buckets.offset,
            bucket_counts: buckets.bucket_counts.clone(),
        }
    }
}

/// An `ExponentialHistogramDataPoint`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExponentialHistogramDataPoint {
    /// Point attributes.
    pub attributes: Vec<EncodedKeyValue>,

    /// Start of the aggregation window.
    pub start_time_unix_nano: EncodedTimestamp,

    /// End of the aggregation window.
    pub time_unix_nano: EncodedTimestamp,

    /// Number of recorded values.
    pub count: u64,

    /// Sum of recorded values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sum: Option<f64>,

    /// Resolution of the buckets.
    pub scale: i32,

    /// Number of values in the zero bucket.
    pub zero_count: u64,

    /// Buckets for positive values.
    pub positive: Buckets,

    /// Buckets for negative values.
    pub negative: Buckets,

    /// Minimum recorded value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    /// Maximum recorded value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    /// Width of the zero bucket.
    pub zero_threshold: f64,
}

impl ExponentialHistogramDataPoint {
    fn new(point: &model::ExponentialHistogramDataPoint, encoder: &Encoder) -> Self {
        Self {
            attributes: to_attributes(&point.attributes, encoder),
            start_time_unix_nano: encoder.timestamp(point.start_time),
            time_unix_nano: encoder.timestamp(point.time),
            count: point.count,
            sum: point.sum,
            scale: point.scale,
            zero_count: point.zero_count,
            positive: Buckets::new(&point.positive),
            negative: Buckets::new(&point.negative),
            min: point.min,
            max: point.max,
            zero_threshold: point.zero_threshold,
        }
    }
}

/// A `SummaryDataPoint.ValueAtQuantile`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueAtQuantile {
    /// Quantile.
    pub quantile: f64,

    /// Value at the quantile.
    pub value: f64,
}

/// A `SummaryDataPoint`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDataPoint {
    /// Point attributes.
    pub attributes: Vec<EncodedKeyValue>,

    /// Start of the aggregation window.
    pub start_time_unix_nano: EncodedTimestamp,

    /// End of the aggregation window.
    pub time_unix_nano: EncodedTimestamp,

    /// Number of recorded values.
    pub count: u64,

    /// Sum of recorded values.
    pub sum: f64,

    /// Values at specific quantiles.
    pub quantile_values: Vec<ValueAtQuantile>,
}

impl SummaryDataPoint {
    fn new(point: &model::SummaryDataPoint, encoder: &Encoder) -> Self {
        Self {
            attributes: to_attributes(&point.attributes, encoder),
            start_time_unix_nano: encoder.timestamp(point.start_time),
            time_unix_nano: encoder.timestamp(point.time),
            count: point.count,
            sum: point.sum,
            quantile_values: point
                .quantile_values
                .iter()
                .map(|quantile| ValueAtQuantile {
                    quantile: quantile.quantile,
                    value: quantile.value,
                })
                .collect(),
        }
    }
}
