//! Tick timing for the control loop.

/// Decides when the next control-loop tick is due.
///
/// A tick fires once a full period has elapsed since the last one, so the
/// loop renders one block per block period of clock. A late tick rebases
/// the schedule on the time it actually fired.
#[derive(Debug, Clone, Copy)]
pub struct Scheduler {
    period_ms: u64,
    last_ms: Option<u64>,
}

impl Scheduler {
    /// Creates a scheduler whose first call to [`due`](Self::due) fires.
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms: u64::from(period_ms),
            last_ms: None,
        }
    }

    /// Block period in milliseconds.
    #[inline]
    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    /// Time of the last tick, if any has fired.
    #[inline]
    pub fn last_tick_ms(&self) -> Option<u64> {
        self.last_ms
    }

    /// Earliest time the next tick may fire.
    pub fn next_deadline(&self) -> u64 {
        match self.last_ms {
            Some(last) => last + self.period_ms,
            None => 0,
        }
    }

    /// Returns `true` and records the tick if one is due at `now_ms`.
    pub fn due(&mut self, now_ms: u64) -> bool {
        if self.last_ms.is_some() && now_ms < self.next_deadline() {
            return false;
        }
        self.last_ms = Some(now_ms);
        true
    }
}
