/// Cumulative kernel tick counters for the four CPU states.
///
/// Counters are monotonically non-decreasing while the machine is up and are
/// only ever used as a difference source, never displayed directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CpuTicks {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
}

impl CpuTicks {
    pub fn busy(&self) -> u64 {
        self.user + self.system + self.nice
    }

    pub fn total(&self) -> u64 {
        self.busy() + self.idle
    }

    /// Per-state deltas against an earlier reading. Saturating, so a counter
    /// wraparound degrades to a zero delta instead of a panic.
    fn delta(&self, earlier: &CpuTicks) -> CpuTicks {
        CpuTicks {
            user: self.user.saturating_sub(earlier.user),
            nice: self.nice.saturating_sub(earlier.nice),
            system: self.system.saturating_sub(earlier.system),
            idle: self.idle.saturating_sub(earlier.idle),
        }
    }
}

/// Carries the previous tick snapshot between sampling calls.
///
/// This is the only mutable state in the sampler: each call measures the
/// interval since the previous call, not since startup.
#[derive(Debug, Default)]
pub struct CpuTracker {
    baseline: Option<CpuTicks>,
}

impl CpuTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one kernel reading and returns busy percent over the interval
    /// since the previous successful reading.
    ///
    /// `None` means the kernel query failed: report 0 and leave the baseline
    /// untouched so the next tick diffs against intact data. The first
    /// successful reading only establishes the baseline and also reports 0.
    pub fn observe(&mut self, sample: Option<CpuTicks>) -> f64 {
        let Some(now) = sample else {
            return 0.0;
        };
        let Some(prev) = self.baseline.replace(now) else {
            return 0.0;
        };
        let delta = now.delta(&prev);
        let total = delta.total();
        if total == 0 {
            return 0.0;
        }
        delta.busy() as f64 / total as f64 * 100.0
    }
}
