//! Advisory notifications from the encoding path.

use metrics::{counter, Counter};
use tracing::warn;

/// Receives advisory notifications while encoding.
///
/// Nothing reported here is an error: encoding always completes. Notifications exist so that operators can spot
/// misconfigured buffer sizes, which cost an extra allocation and copy per occurrence.
pub trait Diagnostics: Send + Sync {
    /// Called when a writer had to grow its buffer because the data did not fit in the current capacity.
    fn buffer_grown(&self, previous_capacity: usize, new_capacity: usize);
}

/// A [`Diagnostics`] implementation that discards every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopDiagnostics;

impl Diagnostics for NoopDiagnostics {
    fn buffer_grown(&self, _previous_capacity: usize, _new_capacity: usize) {}
}

/// A [`Diagnostics`] implementation that logs a warning and increments a counter for every notification.
///
/// Buffer growth is tracked by the `otlp_serializer_buffer_growths_total` counter.
#[derive(Clone)]
pub struct LogDiagnostics {
    buffer_growths_total: Counter,
}

impl LogDiagnostics {
    /// Creates a new `LogDiagnostics`, registering its counter with the global metrics recorder.
    pub fn new() -> Self {
        Self {
            buffer_growths_total: counter!("otlp_serializer_buffer_growths_total"),
        }
    }
}

impl Diagnostics for LogDiagnostics {
    fn buffer_grown(&self, previous_capacity: usize, new_capacity: usize) {
        warn!(
            previous_capacity,
            new_capacity, "Protobuf writer buffer was undersized and had to grow. Initial capacity may be too small."
        );
        self.buffer_growths_total.increment(1);
    }
}
