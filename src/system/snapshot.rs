/// Bytes per GB as displayed: 2^30.
pub const BYTES_PER_GB: f64 = 1_073_741_824.0;

pub fn bytes_to_gb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_GB
}

/// One sampled view of host resource usage. Immutable once produced; the
/// sampler emits one instance per tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UsageReading {
    pub cpu_percent: f64,
    pub memory_used_gb: f64,
    pub memory_total_gb: f64,
    pub disk_used_gb: f64,
    pub disk_total_gb: f64,
    pub disk_free_gb: f64,
}

impl UsageReading {
    pub fn cpu_ratio(&self) -> f64 {
        (self.cpu_percent / 100.0).clamp(0.0, 1.0)
    }

    pub fn memory_ratio(&self) -> f64 {
        ratio(self.memory_used_gb, self.memory_total_gb)
    }

    pub fn disk_ratio(&self) -> f64 {
        ratio(self.disk_used_gb, self.disk_total_gb)
    }
}

fn ratio(used: f64, total: f64) -> f64 {
    if total > 0.0 {
        (used / total).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_to_gb_matches_display_unit() {
        assert!((bytes_to_gb(17_179_869_184) - 16.0).abs() < 1e-9);
        assert_eq!(bytes_to_gb(0), 0.0);
    }

    #[test]
    fn page_counts_convert_to_expected_gb() {
        // 2M active + 1M wired pages at 4 KiB comes to roughly 11.44 GB.
        let used_bytes = (2_000_000u64 + 1_000_000) * 4096;
        assert!((bytes_to_gb(used_bytes) - 11.444).abs() < 1e-3);
    }

    #[test]
    fn disk_usage_derives_from_total_minus_free() {
        let total_gb = bytes_to_gb(536_870_912_000);
        let free_gb = bytes_to_gb(107_374_182_400);
        let used_gb = total_gb - free_gb;
        assert!((total_gb - 500.0).abs() < 1e-9);
        assert!((free_gb - 100.0).abs() < 1e-9);
        assert!((used_gb - 400.0).abs() < 1e-9);
    }

    #[test]
    fn ratios_clamp_and_survive_zero_totals() {
        let reading = UsageReading {
            cpu_percent: 250.0,
            memory_used_gb: 8.0,
            memory_total_gb: 0.0,
            disk_used_gb: 400.0,
            disk_total_gb: 500.0,
            disk_free_gb: 100.0,
        };
        assert_eq!(reading.cpu_ratio(), 1.0);
        assert_eq!(reading.memory_ratio(), 0.0);
        assert!((reading.disk_ratio() - 0.8).abs() < 1e-9);
    }
}
