use std::sync::Arc;

use super::{Attributes, HrTime, InstrumentationScope, Resource};

/// Aggregation temporality of a sum or histogram.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum AggregationTemporality {
    /// Values are aggregated since the previous export.
    Delta,

    /// Values are aggregated since the start time.
    #[default]
    Cumulative,
}

impl AggregationTemporality {
    /// Returns the OTLP `AggregationTemporality` enum value.
    pub const fn as_otlp(&self) -> i32 {
        match self {
            Self::Delta => 1,
            Self::Cumulative => 2,
        }
    }
}

/// The value of a number data point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NumberValue {
    /// An integer value.
    Int(i64),

    /// A floating-point value.
    Double(f64),
}

impl Default for NumberValue {
    fn default() -> Self {
        Self::Int(0)
    }
}

/// A single value of a gauge or sum.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NumberDataPoint {
    /// Point attributes.
    pub attributes: Attributes,

    /// Start of the aggregation window.
    pub start_time: HrTime,

    /// End of the aggregation window.
    pub time: HrTime,

    /// Value.
    pub value: NumberValue,
}

/// A single histogram with explicit bucket boundaries.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HistogramDataPoint {
    /// Point attributes.
    pub attributes: Attributes,

    /// Start of the aggregation window.
    pub start_time: HrTime,

    /// End of the aggregation window.
    pub time: HrTime,

    /// Number of recorded values.
    pub count: u64,

    /// Sum of recorded values, if tracked.
    pub sum: Option<f64>,

    /// Minimum recorded value, if tracked.
    pub min: Option<f64>,

    /// Maximum recorded value, if tracked.
    pub max: Option<f64>,

    /// Bucket boundaries, in increasing order.
    pub explicit_bounds: Vec<f64>,

    /// Per-bucket counts. Has one more entry than `explicit_bounds`.
    pub bucket_counts: Vec<u64>,
}

/// A contiguous range of exponential histogram buckets.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExponentialBuckets {
    /// Index of the first bucket.
    pub offset: i32,

    /// Per-bucket counts.
    pub bucket_counts: Vec<u64>,
}

/// A single histogram with exponentially-sized buckets.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExponentialHistogramDataPoint {
    /// Point attributes.
    pub attributes: Attributes,

    /// Start of the aggregation window.
    pub start_time: HrTime,

    /// End of the aggregation window.
    pub time: HrTime,

    /// Number of recorded values.
    pub count: u64,

    /// Sum of recorded values, if tracked.
    pub sum: Option<f64>,

    /// Minimum recorded value, if tracked.
    pub min: Option<f64>,

    /// Maximum recorded value, if tracked.
    pub max: Option<f64>,

    /// Resolution of the buckets.
    pub scale: i32,

    /// Number of values in the zero bucket.
    pub zero_count: u64,

    /// Width of the zero bucket.
    pub zero_threshold: f64,

    /// Buckets for positive values.
    pub positive: ExponentialBuckets,

    /// Buckets for negative values.
    pub negative: ExponentialBuckets,
}

/// A value at a given quantile of a summary.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ValueAtQuantile {
    /// Quantile, between 0.0 and 1.0 inclusive.
    pub quantile: f64,

    /// Value at the quantile.
    pub value: f64,
}

/// A single summary.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SummaryDataPoint {
    /// Point attributes.
    pub attributes: Attributes,

    /// Start of the aggregation window.
    pub start_time: HrTime,

    /// End of the aggregation window.
    pub time: HrTime,

    /// Number of recorded values.
    pub count: u64,

    /// Sum of recorded values.
    pub sum: f64,

    /// Values at specific quantiles.
    pub quantile_values: Vec<ValueAtQuantile>,
}

/// The data points of a metric, by metric type.
#[derive(Clone, Debug, PartialEq)]
pub enum MetricPoints {
    /// Last-value points.
    Gauge(Vec<NumberDataPoint>),

    /// Sum points.
    Sum {
        /// The points.
        points: Vec<NumberDataPoint>,

        /// Whether the sum only ever increases.
        is_monotonic: bool,
    },

    /// Explicit-bucket histogram points.
    Histogram(Vec<HistogramDataPoint>),

    /// Exponential histogram points.
    ExponentialHistogram(Vec<ExponentialHistogramDataPoint>),

    /// Summary points.
    Summary(Vec<SummaryDataPoint>),
}

impl MetricPoints {
    /// Returns the number of data points.
    pub fn len(&self) -> usize {
        match self {
            Self::Gauge(points) | Self::Sum { points, .. } => points.len(),
            Self::Histogram(points) => points.len(),
            Self::ExponentialHistogram(points) => points.len(),
            Self::Summary(points) => points.len(),
        }
    }

    /// Returns `true` if there are no data points.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Identifying information about a metric.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MetricDescriptor {
    /// Metric name.
    pub name: String,

    /// Metric description.
    pub description: String,

    /// Unit of the metric values.
    pub unit: String,
}

impl MetricDescriptor {
    /// Creates a new `MetricDescriptor` with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A metric and all of its data points collected in one export cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricData {
    /// Metric descriptor.
    pub descriptor: MetricDescriptor,

    /// Aggregation temporality of sums and histograms. Ignored for other metric types.
    pub temporality: AggregationTemporality,

    /// Data points.
    pub points: MetricPoints,
}

/// Metrics collected from one instrumentation scope.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScopeMetrics {
    /// Instrumentation scope.
    pub scope: InstrumentationScope,

    /// Metrics.
    pub metrics: Vec<MetricData>,
}

/// Metrics collected from one resource, as produced by a metric reader.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResourceMetrics {
    /// Resource that produced the metrics.
    pub resource: Arc<Resource>,

    /// Metrics, by scope.
    pub scope_metrics: Vec<ScopeMetrics>,
}
