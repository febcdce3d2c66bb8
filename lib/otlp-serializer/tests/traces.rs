use std::sync::Arc;

use opentelemetry_proto::tonic::{
    collector::trace::v1::ExportTraceServiceRequest as ProtoRequest,
    common::v1::any_value::Value,
    trace::v1::{span::SpanKind as ProtoSpanKind, status::StatusCode as ProtoStatusCode},
};
use otlp_serializer::{
    model::{
        trace_flags, HrTime, InstrumentationScope, KeyValue, Resource, SpanContext, SpanData, SpanEvent, SpanId,
        SpanKind, SpanLink, SpanStatus, StatusCode, TraceId,
    },
    ExportFormat, Serializer as _, SerializerConfiguration, TraceSerializer,
};
use prost::Message as _;
use serde_json::json;

const TRACE_ID: &str = "4bf92f3577b34da6a3ce929d0e0e4736";
const SPAN_ID: &str = "00f067aa0ba902b7";
const PARENT_SPAN_ID: &str = "53995c3f42cd8ad8";
const LINKED_TRACE_ID: &str = "0af7651916cd43dd8448eb211c80319c";
const LINKED_SPAN_ID: &str = "b7ad6b7169203331";

fn context(trace_id: &str, span_id: &str) -> SpanContext {
    SpanContext::new(
        TraceId::from_hex(trace_id).unwrap(),
        SpanId::from_hex(span_id).unwrap(),
        trace_flags::SAMPLED,
    )
}

fn checkout_span(resource: &Arc<Resource>) -> SpanData {
    SpanData {
        resource: Arc::clone(resource),
        scope: InstrumentationScope::new("checkout-instrumentation").with_version("1.2.0"),
        context: context(TRACE_ID, SPAN_ID).with_trace_state("vendor=value"),
        parent_context: Some(context(TRACE_ID, PARENT_SPAN_ID).with_remote(true)),
        name: "GET /cart".to_string(),
        kind: SpanKind::Server,
        start_time: HrTime::new(1_700_000_000, 5),
        end_time: HrTime::new(1_700_000_001, 0),
        attributes: vec![
            KeyValue::new("http.method", "GET"),
            KeyValue::new("http.status_code", 200),
        ],
        dropped_attributes_count: 2,
        events: vec![SpanEvent {
            name: "cache.miss".to_string(),
            time: HrTime::new(1_700_000_000, 500),
            attributes: vec![KeyValue::new("cache.key", "cart:42")],
            dropped_attributes_count: 0,
        }],
        dropped_events_count: 1,
        links: vec![SpanLink {
            context: context(LINKED_TRACE_ID, LINKED_SPAN_ID),
            attributes: vec![KeyValue::new("link.kind", "follows")],
            dropped_attributes_count: 0,
        }],
        dropped_links_count: 0,
        status: SpanStatus {
            code: StatusCode::Error,
            message: Some("upstream timeout".to_string()),
        },
    }
}

fn serializer(format: ExportFormat) -> TraceSerializer {
    TraceSerializer::new(SerializerConfiguration::default().with_format(format))
}

fn decode(spans: &[SpanData]) -> ProtoRequest {
    let payload = serializer(ExportFormat::Protobuf).serialize_request(spans).unwrap();
    ProtoRequest::decode(payload).expect("should decode")
}

#[test]
fn protobuf_span_fields() {
    let resource = Arc::new(
        Resource::new(vec![KeyValue::new("service.name", "checkout")])
            .with_schema_url("https://opentelemetry.io/schemas/1.21.0"),
    );
    let request = decode(&[checkout_span(&resource)]);

    assert_eq!(request.resource_spans.len(), 1);
    let resource_spans = &request.resource_spans[0];
    assert_eq!(resource_spans.schema_url, "https://opentelemetry.io/schemas/1.21.0");
    let decoded_resource = resource_spans.resource.as_ref().expect("resource should be present");
    assert_eq!(decoded_resource.attributes.len(), 1);
    assert_eq!(decoded_resource.attributes[0].key, "service.name");

    assert_eq!(resource_spans.scope_spans.len(), 1);
    let scope_spans = &resource_spans.scope_spans[0];
    let scope = scope_spans.scope.as_ref().expect("scope should be present");
    assert_eq!(scope.name, "checkout-instrumentation");
    assert_eq!(scope.version, "1.2.0");

    assert_eq!(scope_spans.spans.len(), 1);
    let span = &scope_spans.spans[0];
    assert_eq!(hex::encode(&span.trace_id), TRACE_ID);
    assert_eq!(hex::encode(&span.span_id), SPAN_ID);
    assert_eq!(hex::encode(&span.parent_span_id), PARENT_SPAN_ID);
    assert_eq!(span.trace_state, "vendor=value");
    assert_eq!(span.name, "GET /cart");
    assert_eq!(span.kind, ProtoSpanKind::Server as i32);
    assert_eq!(span.start_time_unix_nano, 1_700_000_000_000_000_005);
    assert_eq!(span.end_time_unix_nano, 1_700_000_001_000_000_000);
    assert_eq!(span.dropped_attributes_count, 2);
    assert_eq!(span.dropped_events_count, 1);
    assert_eq!(span.dropped_links_count, 0);

    let attributes: Vec<_> = span
        .attributes
        .iter()
        .map(|kv| (kv.key.as_str(), kv.value.as_ref().and_then(|value| value.value.clone())))
        .collect();
    assert_eq!(
        attributes,
        [
            ("http.method", Some(Value::StringValue("GET".to_string()))),
            ("http.status_code", Some(Value::IntValue(200))),
        ]
    );

    assert_eq!(span.events.len(), 1);
    assert_eq!(span.events[0].name, "cache.miss");
    assert_eq!(span.events[0].time_unix_nano, 1_700_000_000_000_000_500);
    assert_eq!(span.events[0].attributes[0].key, "cache.key");

    assert_eq!(span.links.len(), 1);
    assert_eq!(hex::encode(&span.links[0].trace_id), LINKED_TRACE_ID);
    assert_eq!(hex::encode(&span.links[0].span_id), LINKED_SPAN_ID);
    assert_eq!(span.links[0].attributes[0].key, "link.kind");

    let status = span.status.as_ref().expect("status should be present");
    assert_eq!(status.code, ProtoStatusCode::Error as i32);
    assert_eq!(status.message, "upstream timeout");
}

#[test]
fn flags_carry_sampling_and_remoteness() {
    let resource = Arc::new(Resource::default());
    let mut span = checkout_span(&resource);
    span.links.push(SpanLink {
        context: SpanContext::new(
            TraceId::from_hex(LINKED_TRACE_ID).unwrap(),
            SpanId::from_hex(SPAN_ID).unwrap(),
            0,
        )
        .with_remote(true),
        ..SpanLink::default()
    });

    let mut local_root = checkout_span(&resource);
    local_root.parent_context = None;
    local_root.context.trace_flags = 0;

    let request = decode(&[span, local_root]);
    let spans = &request.resource_spans[0].scope_spans[0].spans;

    // Remote parent, sampled.
    assert_eq!(spans[0].flags, 0x301);
    assert_eq!(spans[0].links[0].flags, 0x101);
    assert_eq!(spans[0].links[1].flags, 0x300);

    // No parent, not sampled.
    assert_eq!(spans[1].flags, 0x100);
    assert!(spans[1].parent_span_id.is_empty());
}

#[test]
fn unset_status_is_still_present() {
    let resource = Arc::new(Resource::default());
    let span = SpanData {
        resource,
        context: context(TRACE_ID, SPAN_ID),
        name: "minimal".to_string(),
        ..SpanData::default()
    };

    let request = decode(&[span]);
    let span = &request.resource_spans[0].scope_spans[0].spans[0];
    assert_eq!(span.kind, ProtoSpanKind::Internal as i32);
    assert_eq!(span.start_time_unix_nano, 0);
    assert!(span.events.is_empty());
    assert!(span.links.is_empty());

    let status = span.status.as_ref().expect("status should be present");
    assert_eq!(status.code, ProtoStatusCode::Unset as i32);
    assert!(status.message.is_empty());
}

#[test]
fn protobuf_groups_by_resource_and_scope() {
    let frontend = Arc::new(Resource::new(vec![KeyValue::new("service.name", "frontend")]));
    let backend = Arc::new(Resource::new(vec![KeyValue::new("service.name", "backend")]));
    let http = InstrumentationScope::new("http");
    let db = InstrumentationScope::new("db").with_version("0.9");

    let span = |resource: &Arc<Resource>, scope: &InstrumentationScope, name: &str| SpanData {
        resource: Arc::clone(resource),
        scope: scope.clone(),
        context: context(TRACE_ID, SPAN_ID),
        name: name.to_string(),
        ..SpanData::default()
    };

    let spans = vec![
        span(&frontend, &http, "frontend-http-1"),
        span(&backend, &db, "backend-db-1"),
        span(&frontend, &db, "frontend-db-1"),
        span(&frontend, &http, "frontend-http-2"),
        span(&backend, &db, "backend-db-2"),
    ];

    let request = decode(&spans);
    let layout: Vec<Vec<(String, Vec<String>)>> = request
        .resource_spans
        .iter()
        .map(|resource_spans| {
            resource_spans
                .scope_spans
                .iter()
                .map(|scope_spans| {
                    (
                        scope_spans.scope.as_ref().map(|scope| scope.name.clone()).unwrap_or_default(),
                        scope_spans.spans.iter().map(|span| span.name.clone()).collect(),
                    )
                })
                .collect()
        })
        .collect();

    let owned = |scope: &str, names: &[&str]| -> (String, Vec<String>) {
        (scope.to_string(), names.iter().map(|name| name.to_string()).collect())
    };
    assert_eq!(
        layout,
        vec![
            vec![
                owned("http", &["frontend-http-1", "frontend-http-2"]),
                owned("db", &["frontend-db-1"]),
            ],
            vec![owned("db", &["backend-db-1", "backend-db-2"])],
        ]
    );
}

#[test]
fn json_request_shape() {
    let resource = Arc::new(Resource::new(vec![KeyValue::new("service.name", "checkout")]));
    let payload = serializer(ExportFormat::Json)
        .serialize_request(&[checkout_span(&resource)])
        .unwrap();
    let actual: serde_json::Value = serde_json::from_slice(&payload).unwrap();

    let expected = json!({
        "resourceSpans": [{
            "resource": {
                "attributes": [{ "key": "service.name", "value": { "stringValue": "checkout" } }],
                "droppedAttributesCount": 0
            },
            "scopeSpans": [{
                "scope": { "name": "checkout-instrumentation", "version": "1.2.0" },
                "spans": [{
                    "traceId": TRACE_ID,
                    "spanId": SPAN_ID,
                    "traceState": "vendor=value",
                    "parentSpanId": PARENT_SPAN_ID,
                    "name": "GET /cart",
                    "kind": 2,
                    "startTimeUnixNano": "1700000000000000005",
                    "endTimeUnixNano": "1700000001000000000",
                    "attributes": [
                        { "key": "http.method", "value": { "stringValue": "GET" } },
                        { "key": "http.status_code", "value": { "intValue": 200 } }
                    ],
                    "droppedAttributesCount": 2,
                    "events": [{
                        "timeUnixNano": "1700000000000000500",
                        "name": "cache.miss",
                        "attributes": [{ "key": "cache.key", "value": { "stringValue": "cart:42" } }],
                        "droppedAttributesCount": 0
                    }],
                    "droppedEventsCount": 1,
                    "status": { "code": 2, "message": "upstream timeout" },
                    "links": [{
                        "traceId": LINKED_TRACE_ID,
                        "spanId": LINKED_SPAN_ID,
                        "attributes": [{ "key": "link.kind", "value": { "stringValue": "follows" } }],
                        "droppedAttributesCount": 0,
                        "flags": 0x101
                    }],
                    "droppedLinksCount": 0,
                    "flags": 0x301
                }]
            }]
        }]
    });

    similar_asserts::assert_eq!(actual, expected);
}
