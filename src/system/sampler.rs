use std::path::PathBuf;

use sysinfo::System;
use tracing::{debug, warn};

use super::cpu::CpuTracker;
use super::platform;
use super::platform::VmStats;
use super::snapshot::{UsageReading, bytes_to_gb};

/// Samples host CPU, memory, and disk usage on demand. One instance owns the
/// CPU tick baseline; the scheduler (event loop) calls `sample` once per
/// interval. A failed kernel query never surfaces as an error: the affected
/// figure degrades to zero and the next tick retries independently.
pub struct Sampler {
    sys: System,
    cpu: CpuTracker,
    disk_path: PathBuf,
    in_flight: bool,
    last: UsageReading,
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new(PathBuf::from("/"))
    }
}

impl Sampler {
    pub fn new(disk_path: PathBuf) -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        Sampler {
            sys,
            cpu: CpuTracker::new(),
            disk_path,
            in_flight: false,
            last: UsageReading::default(),
        }
    }

    /// Runs the three sub-operations and returns the fresh reading.
    ///
    /// Not designed for concurrent invocation: a reentrant call observes the
    /// `in_flight` flag and returns the previous reading without sampling.
    pub fn sample(&mut self) -> UsageReading {
        if self.in_flight {
            return self.last;
        }
        self.in_flight = true;

        let cpu_percent = self.sample_cpu();
        let (memory_used_gb, memory_total_gb) = self.sample_memory();
        let (disk_used_gb, disk_total_gb, disk_free_gb) = self.sample_disk();

        self.last = UsageReading {
            cpu_percent,
            memory_used_gb,
            memory_total_gb,
            disk_used_gb,
            disk_total_gb,
            disk_free_gb,
        };
        self.in_flight = false;
        self.last
    }

    /// Busy percent over the interval since the previous call. The first
    /// call establishes the baseline and reports 0; a failed tick query
    /// reports 0 and leaves the baseline untouched.
    fn sample_cpu(&mut self) -> f64 {
        let ticks = platform::cpu_ticks();
        if ticks.is_none() {
            debug!("cpu tick query failed; reporting 0");
        }
        self.cpu.observe(ticks)
    }

    fn sample_memory(&mut self) -> (f64, f64) {
        self.sys.refresh_memory();
        memory_figures(self.sys.total_memory(), platform::vm_stats())
    }

    /// Used space is derived as total minus free, not queried separately.
    fn sample_disk(&self) -> (f64, f64, f64) {
        match platform::disk_space(&self.disk_path) {
            Ok(space) => {
                let total_gb = bytes_to_gb(space.total_bytes);
                let free_gb = bytes_to_gb(space.avail_bytes);
                (total_gb - free_gb, total_gb, free_gb)
            }
            Err(err) => {
                warn!(path = %self.disk_path.display(), %err, "disk space query failed");
                (0.0, 0.0, 0.0)
            }
        }
    }
}

/// Used = active + wired pages; inactive and free pages are reclaimable and
/// excluded. Total comes from sysinfo and does not share the VM query's
/// failure mode: a failed query reports used = 0 with total intact.
fn memory_figures(total_bytes: u64, vm: Option<VmStats>) -> (f64, f64) {
    let total_gb = bytes_to_gb(total_bytes);
    let used_gb = match vm {
        Some(vm) => bytes_to_gb(vm.used_bytes()),
        None => {
            debug!("vm statistics query failed; reporting used=0");
            0.0
        }
    };
    (used_gb, total_gb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_reports_zero_cpu() {
        let mut sampler = Sampler::default();
        let reading = sampler.sample();
        assert_eq!(reading.cpu_percent, 0.0);
    }

    #[test]
    fn readings_respect_value_invariants() {
        let mut sampler = Sampler::default();
        sampler.sample();
        let reading = sampler.sample();

        assert!((0.0..=100.0).contains(&reading.cpu_percent));
        assert!(reading.memory_used_gb >= 0.0);
        assert!(reading.memory_total_gb > 0.0);
        assert!(reading.memory_used_gb <= reading.memory_total_gb);
        assert!(reading.disk_used_gb >= 0.0);
        assert!(reading.disk_used_gb <= reading.disk_total_gb);
        let diff =
            (reading.disk_used_gb + reading.disk_free_gb - reading.disk_total_gb).abs();
        assert!(diff < 1e-6);
    }

    #[test]
    fn bad_disk_path_degrades_to_zero_triple() {
        let mut sampler = Sampler::new(PathBuf::from("/definitely/not/a/mount"));
        let reading = sampler.sample();
        assert_eq!(reading.disk_used_gb, 0.0);
        assert_eq!(reading.disk_total_gb, 0.0);
        assert_eq!(reading.disk_free_gb, 0.0);
        // Memory total still comes from its own source.
        assert!(reading.memory_total_gb > 0.0);
    }

    #[test]
    fn memory_query_failure_keeps_independent_total() {
        // 16 GiB of physical memory, VM statistics query failed.
        let (used_gb, total_gb) = memory_figures(17_179_869_184, None);
        assert_eq!(used_gb, 0.0);
        assert!((total_gb - 16.0).abs() < 1e-9);
    }

    #[test]
    fn memory_figures_from_page_counts() {
        let vm = VmStats {
            active_pages: 2_000_000,
            wired_pages: 1_000_000,
            page_size: 4096,
        };
        let (used_gb, total_gb) = memory_figures(17_179_869_184, Some(vm));
        assert!((used_gb - 11.444).abs() < 1e-3);
        assert!((total_gb - 16.0).abs() < 1e-9);
        assert!(used_gb <= total_gb);
    }
}
