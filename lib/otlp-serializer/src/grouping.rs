//! Grouping of records by resource and instrumentation scope.
//!
//! OTLP requests are trees: resources at the top, scopes below them, records at the leaves. SDKs hand over flat lists
//! instead, with every record pointing at its resource and scope. The functions here rebuild the tree in a single
//! pass over the input.
//!
//! Resources are told apart by instance, not by content, while scopes are told apart by their
//! [key][InstrumentationScope::key]. Groups keep the order in which their first record was seen, and records keep
//! their input order within a group.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::model::{InstrumentationScope, LogRecordData, MetricData, Resource, ResourceMetrics, SpanData};

type FastIndexMap<K, V> = IndexMap<K, V, foldhash::quality::RandomState>;

/// A record that belongs to a resource and an instrumentation scope.
pub trait ScopedRecord {
    /// Returns the resource that produced the record.
    fn resource(&self) -> &Arc<Resource>;

    /// Returns the instrumentation scope that produced the record.
    fn scope(&self) -> &InstrumentationScope;
}

impl ScopedRecord for SpanData {
    fn resource(&self) -> &Arc<Resource> {
        &self.resource
    }

    fn scope(&self) -> &InstrumentationScope {
        &self.scope
    }
}

impl ScopedRecord for LogRecordData {
    fn resource(&self) -> &Arc<Resource> {
        &self.resource
    }

    fn scope(&self) -> &InstrumentationScope {
        &self.scope
    }
}

/// Records sharing a resource and an instrumentation scope.
#[derive(Debug)]
pub struct ScopeGroup<'a, T> {
    /// The scope, as given by the first record of the group.
    pub scope: &'a InstrumentationScope,

    /// The records, in input order.
    pub records: Vec<&'a T>,
}

/// Records sharing a resource, split by instrumentation scope.
#[derive(Debug)]
pub struct ResourceGroup<'a, T> {
    /// The resource.
    pub resource: &'a Resource,

    /// The scope groups, in first-seen order.
    pub scopes: Vec<ScopeGroup<'a, T>>,
}

struct Grouper<'a, T> {
    resources: FastIndexMap<*const Resource, (&'a Resource, FastIndexMap<String, ScopeGroup<'a, T>>)>,
}

impl<'a, T> Grouper<'a, T> {
    fn new() -> Self {
        Self {
            resources: FastIndexMap::default(),
        }
    }

    fn scope_bucket(
        &mut self, resource: &'a Arc<Resource>, scope: &'a InstrumentationScope,
    ) -> &mut ScopeGroup<'a, T> {
        let (_, scopes) = self
            .resources
            .entry(Arc::as_ptr(resource))
            .or_insert_with(|| (resource.as_ref(), FastIndexMap::default()));

        scopes.entry(scope.key()).or_insert_with(|| ScopeGroup {
            scope,
            records: Vec::new(),
        })
    }

    fn push(&mut self, resource: &'a Arc<Resource>, scope: &'a InstrumentationScope, record: &'a T) {
        self.scope_bucket(resource, scope).records.push(record);
    }

    fn finish(self) -> Vec<ResourceGroup<'a, T>> {
        self.resources
            .into_values()
            .map(|(resource, scopes)| ResourceGroup {
                resource,
                scopes: scopes.into_values().collect(),
            })
            .collect()
    }
}

/// Groups records by resource instance and scope key.
pub fn group_records<T: ScopedRecord>(records: &[T]) -> Vec<ResourceGroup<'_, T>> {
    let mut grouper = Grouper::new();
    for record in records {
        grouper.push(record.resource(), record.scope(), record);
    }
    grouper.finish()
}

/// Groups metrics by resource instance and scope key.
///
/// Metric readers hand over metrics already grouped, but nothing prevents two batches from sharing a resource or a
/// scope. Such batches are merged, concatenating their metrics in input order.
pub fn group_metrics(batches: &[ResourceMetrics]) -> Vec<ResourceGroup<'_, MetricData>> {
    let mut grouper = Grouper::new();
    for batch in batches {
        for scope_metrics in &batch.scope_metrics {
            // Create the bucket even for scopes without metrics, so that they still show up in the output.
            let bucket = grouper.scope_bucket(&batch.resource, &scope_metrics.scope);
            bucket.records.extend(scope_metrics.metrics.iter());
        }
    }
    grouper.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{KeyValue, ScopeMetrics};

    fn span(resource: &Arc<Resource>, scope: &InstrumentationScope, name: &str) -> SpanData {
        SpanData {
            resource: Arc::clone(resource),
            scope: scope.clone(),
            name: name.to_string(),
            ..SpanData::default()
        }
    }

    fn names<'a>(group: &ScopeGroup<'a, SpanData>) -> Vec<&'a str> {
        group.records.iter().map(|span| span.name.as_str()).collect()
    }

    #[test]
    fn groups_in_first_seen_order() {
        let resource_a = Arc::new(Resource::new(vec![KeyValue::new("service.name", "a")]));
        let resource_b = Arc::new(Resource::new(vec![KeyValue::new("service.name", "b")]));
        let scope_1 = InstrumentationScope::new("one");
        let scope_2 = InstrumentationScope::new("two").with_version("2.0");

        let spans = vec![
            span(&resource_b, &scope_2, "b2-first"),
            span(&resource_a, &scope_1, "a1-first"),
            span(&resource_b, &scope_1, "b1-first"),
            span(&resource_b, &scope_2, "b2-second"),
            span(&resource_a, &scope_1, "a1-second"),
        ];

        let groups = group_records(&spans);
        assert_eq!(groups.len(), 2);

        assert!(std::ptr::eq(groups[0].resource, resource_b.as_ref()));
        assert_eq!(groups[0].scopes.len(), 2);
        assert_eq!(groups[0].scopes[0].scope, &scope_2);
        assert_eq!(names(&groups[0].scopes[0]), ["b2-first", "b2-second"]);
        assert_eq!(groups[0].scopes[1].scope, &scope_1);
        assert_eq!(names(&groups[0].scopes[1]), ["b1-first"]);

        assert!(std::ptr::eq(groups[1].resource, resource_a.as_ref()));
        assert_eq!(groups[1].scopes.len(), 1);
        assert_eq!(names(&groups[1].scopes[0]), ["a1-first", "a1-second"]);

        let grouped = groups
            .iter()
            .flat_map(|group| &group.scopes)
            .map(|scope| scope.records.len())
            .sum::<usize>();
        assert_eq!(grouped, spans.len());
    }

    #[test]
    fn identical_resources_stay_separate() {
        let resource_a = Arc::new(Resource::new(vec![KeyValue::new("service.name", "same")]));
        let resource_b = Arc::new(Resource::new(vec![KeyValue::new("service.name", "same")]));
        assert_eq!(resource_a, resource_b);

        let scope = InstrumentationScope::new("scope");
        let spans = vec![span(&resource_a, &scope, "a"), span(&resource_b, &scope, "b")];

        let groups = group_records(&spans);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn scopes_differing_only_in_version_stay_separate() {
        let resource = Arc::new(Resource::default());
        let spans = vec![
            span(&resource, &InstrumentationScope::new("lib"), "unversioned"),
            span(&resource, &InstrumentationScope::new("lib").with_version("1"), "versioned"),
            span(&resource, &InstrumentationScope::new("lib"), "unversioned-again"),
        ];

        let groups = group_records(&spans);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].scopes.len(), 2);
        assert_eq!(names(&groups[0].scopes[0]), ["unversioned", "unversioned-again"]);
    }

    #[test]
    fn empty_input_yields_no_groups() {
        assert!(group_records::<SpanData>(&[]).is_empty());
        assert!(group_metrics(&[]).is_empty());
    }

    #[test]
    fn metric_batches_sharing_a_group_are_merged() {
        use crate::model::{MetricDescriptor, MetricPoints};

        fn metric(name: &str) -> MetricData {
            MetricData {
                descriptor: MetricDescriptor::new(name),
                temporality: Default::default(),
                points: MetricPoints::Gauge(Vec::new()),
            }
        }

        let resource = Arc::new(Resource::default());
        let scope = InstrumentationScope::new("meter");
        let batches = vec![
            ResourceMetrics {
                resource: Arc::clone(&resource),
                scope_metrics: vec![ScopeMetrics {
                    scope: scope.clone(),
                    metrics: vec![metric("first")],
                }],
            },
            ResourceMetrics {
                resource: Arc::clone(&resource),
                scope_metrics: vec![
                    ScopeMetrics {
                        scope: scope.clone(),
                        metrics: vec![metric("second")],
                    },
                    ScopeMetrics {
                        scope: InstrumentationScope::new("empty"),
                        metrics: Vec::new(),
                    },
                ],
            },
        ];

        let groups = group_metrics(&batches);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].scopes.len(), 2);

        let merged: Vec<_> = groups[0].scopes[0]
            .records
            .iter()
            .map(|metric| metric.descriptor.name.as_str())
            .collect();
        assert_eq!(merged, ["first", "second"]);
        assert!(groups[0].scopes[1].records.is_empty());
    }
}
