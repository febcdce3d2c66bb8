//! Low-level building blocks for writing Protocol Buffers messages by hand.
//!
//! This crate provides a buffer-backed [`ProtobufWriter`] and a [`SizeEstimator`] that share a single operation set,
//! [`ProtoSink`]. Messages implement [`MessageWrite`] once, against the operation set, and can then be sized exactly
//! before being written into a buffer that never needs to grow.
#![deny(missing_docs)]

mod diagnostics;
pub use self::diagnostics::{Diagnostics, LogDiagnostics, NoopDiagnostics};

mod estimator;
pub use self::estimator::SizeEstimator;

pub mod helpers;
pub use self::helpers::WireType;

mod message;
pub use self::message::MessageWrite;

mod sink;
pub use self::sink::{LengthMark, ProtoSink};

mod writer;
pub use self::writer::ProtobufWriter;
