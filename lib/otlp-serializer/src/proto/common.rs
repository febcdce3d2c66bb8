use protowire::{ProtoSink, WireType};

use crate::{
    any_value::write_attributes,
    model::{HrTime, InstrumentationScope, Resource},
};

// Resource
const RESOURCE_ATTRIBUTES: u32 = 1;
const RESOURCE_DROPPED_ATTRIBUTES_COUNT: u32 = 2;

// InstrumentationScope
const SCOPE_NAME: u32 = 1;
const SCOPE_VERSION: u32 = 2;

// Span and link flags.
const FLAGS_TRACE_FLAGS_MASK: u32 = 0xFF;
const FLAGS_CONTEXT_HAS_IS_REMOTE: u32 = 0x100;
const FLAGS_CONTEXT_IS_REMOTE: u32 = 0x200;

pub(super) fn write_resource<S: ProtoSink>(sink: &mut S, resource: &Resource) {
    write_attributes(sink, RESOURCE_ATTRIBUTES, &resource.attributes);
    sink.write_uint_field(
        RESOURCE_DROPPED_ATTRIBUTES_COUNT,
        u64::from(resource.dropped_attributes_count),
    );
}

pub(super) fn write_scope<S: ProtoSink>(sink: &mut S, scope: &InstrumentationScope) {
    sink.write_string_field(SCOPE_NAME, &scope.name);
    sink.write_string_field(SCOPE_VERSION, scope.version.as_deref().unwrap_or_default());
}

/// Writes a `fixed64` timestamp field, unless the time is the epoch itself.
pub(super) fn write_time_field<S: ProtoSink>(sink: &mut S, field_number: u32, time: HrTime) {
    if time.to_nanos() != 0 {
        sink.write_tag(field_number, WireType::Fixed64);
        sink.write_fixed64_hrtime(time.seconds, time.nanos);
    }
}

/// Writes a field of an `optional double`, if it is set.
pub(super) fn write_optional_double_field<S: ProtoSink>(sink: &mut S, field_number: u32, value: Option<f64>) {
    if let Some(value) = value {
        sink.write_tag(field_number, WireType::Fixed64);
        sink.write_double(value);
    }
}

/// Writes a dropped-count field, unless the count is zero.
pub(super) fn write_count_field<S: ProtoSink>(sink: &mut S, field_number: u32, count: u32) {
    sink.write_uint_field(field_number, u64::from(count));
}

/// Computes the `flags` field of a span or link.
///
/// The low byte carries the W3C trace flags. The remaining bits record that remoteness is known, and whether the
/// relevant context is remote.
pub fn span_flags(trace_flags: u8, is_remote: bool) -> u32 {
    let mut flags = (u32::from(trace_flags) & FLAGS_TRACE_FLAGS_MASK) | FLAGS_CONTEXT_HAS_IS_REMOTE;
    if is_remote {
        flags |= FLAGS_CONTEXT_IS_REMOTE;
    }
    flags
}
