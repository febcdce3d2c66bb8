//! Protobuf export requests.
//!
//! Each request type groups its input once, on construction, and then implements [`MessageWrite`] so that it can be
//! sized and written without any intermediate message tree.
//!
//! [`MessageWrite`]: protowire::MessageWrite

mod common;
pub use self::common::span_flags;

mod logs;
pub use self::logs::LogsRequest;

mod metrics;
pub use self::metrics::MetricsRequest;

mod trace;
pub use self::trace::TraceRequest;
