use std::time::{Duration, SystemTime, UNIX_EPOCH};

use protowire::helpers::hrtime_to_nanos;

/// A high-resolution point in time, as seconds and nanoseconds since the Unix epoch.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct HrTime {
    /// Whole seconds since the Unix epoch.
    pub seconds: u64,

    /// Nanoseconds within the second.
    pub nanos: u32,
}

impl HrTime {
    /// Creates a new `HrTime`.
    pub const fn new(seconds: u64, nanos: u32) -> Self {
        Self { seconds, nanos }
    }

    /// Returns the total number of nanoseconds since the Unix epoch.
    ///
    /// Wraps on overflow, which only happens for times far beyond the year 2554.
    pub const fn to_nanos(&self) -> u64 {
        hrtime_to_nanos(self.seconds, self.nanos)
    }
}

impl From<SystemTime> for HrTime {
    fn from(time: SystemTime) -> Self {
        // Times before the epoch clamp to the epoch itself.
        let since_epoch = time.duration_since(UNIX_EPOCH).unwrap_or(Duration::ZERO);
        Self::new(since_epoch.as_secs(), since_epoch.subsec_nanos())
    }
}
