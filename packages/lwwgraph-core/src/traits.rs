use crate::ids::Timestamp;

/// Pluggable timestamp source for callers that do not track time themselves.
///
/// `LwwGraphState` never reads a clock; callers pass `clock.now()` into each mutation.
pub trait Clock {
    fn now(&mut self) -> Timestamp;
    /// Advance past a timestamp seen on another replica so later local writes win.
    fn observe(&mut self, external: Timestamp);
}

/// Counter clock for tests and deterministic replicas.
#[derive(Clone, Debug)]
pub struct ManualClock {
    current: Timestamp,
    step: Timestamp,
}

impl ManualClock {
    pub fn new(start: Timestamp, step: Timestamp) -> Self {
        Self {
            current: start,
            step,
        }
    }

    /// Last timestamp handed out, without advancing.
    pub fn peek(&self) -> Timestamp {
        self.current
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}

impl Clock for ManualClock {
    fn now(&mut self) -> Timestamp {
        self.current += self.step;
        self.current
    }

    fn observe(&mut self, external: Timestamp) {
        if external > self.current {
            self.current = external;
        }
    }
}

/// Seconds since the UNIX epoch, with sub-second precision.
#[cfg(feature = "wall-clock")]
#[derive(Clone, Debug, Default)]
pub struct WallClock {
    floor: Timestamp,
}

#[cfg(feature = "wall-clock")]
impl Clock for WallClock {
    fn now(&mut self) -> Timestamp {
        let now = chrono::Utc::now();
        let secs = now.timestamp() as f64 + f64::from(now.timestamp_subsec_nanos()) / 1e9;
        // Never hand out a timestamp at or below one already observed.
        if secs <= self.floor {
            self.floor = next_after(self.floor);
        } else {
            self.floor = secs;
        }
        self.floor
    }

    fn observe(&mut self, external: Timestamp) {
        if external > self.floor {
            self.floor = external;
        }
    }
}

#[cfg(feature = "wall-clock")]
fn next_after(ts: Timestamp) -> Timestamp {
    if ts.is_finite() && ts >= 0.0 {
        f64::from_bits(ts.to_bits() + 1)
    } else {
        ts
    }
}
