use std::io;
use std::path::Path;

use super::{DiskSpace, KernelStats, VmStats};
use crate::system::cpu::CpuTicks;

pub struct Platform;

impl KernelStats for Platform {
    fn cpu_ticks() -> Option<CpuTicks> {
        let contents = std::fs::read_to_string("/proc/stat").ok()?;
        parse_stat_cpu_line(contents.lines().next()?)
    }

    fn vm_stats() -> Option<VmStats> {
        let contents = std::fs::read_to_string("/proc/meminfo").ok()?;
        parse_meminfo(&contents, super::page_size())
    }

    fn disk_space(path: &Path) -> io::Result<DiskSpace> {
        super::statvfs(path)
    }
}

/// Parses the aggregate line of /proc/stat:
/// `cpu  user nice system idle iowait irq softirq steal guest guest_nice`.
/// Only the first four counters feed the usage calculation.
pub fn parse_stat_cpu_line(line: &str) -> Option<CpuTicks> {
    let mut fields = line.split_whitespace();
    if fields.next()? != "cpu" {
        return None;
    }
    let user = fields.next()?.parse().ok()?;
    let nice = fields.next()?.parse().ok()?;
    let system = fields.next()?.parse().ok()?;
    let idle = fields.next()?.parse().ok()?;
    Some(CpuTicks {
        user,
        nice,
        system,
        idle,
    })
}

/// Maps /proc/meminfo onto the sampler's page-based model: `Active:` for
/// active pages, `Unevictable:` for wired (kernel-pinned) pages. Values are
/// reported in kB regardless of the actual page size.
fn parse_meminfo(contents: &str, page_size: u64) -> Option<VmStats> {
    let mut active_kb = None;
    let mut unevictable_kb = None;
    for line in contents.lines() {
        if let Some(rest) = line.strip_prefix("Active:") {
            active_kb = parse_kb_field(rest);
        } else if let Some(rest) = line.strip_prefix("Unevictable:") {
            unevictable_kb = parse_kb_field(rest);
        }
        if active_kb.is_some() && unevictable_kb.is_some() {
            break;
        }
    }
    let to_pages = |kb: u64| kb.saturating_mul(1024) / page_size.max(1);
    Some(VmStats {
        active_pages: to_pages(active_kb?),
        wired_pages: to_pages(unevictable_kb?),
        page_size,
    })
}

fn parse_kb_field(rest: &str) -> Option<u64> {
    rest.split_whitespace().next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_aggregate_cpu_line() {
        let ticks =
            parse_stat_cpu_line("cpu  100 50 50 800 12 0 3 0 0 0").unwrap();
        assert_eq!(ticks.user, 100);
        assert_eq!(ticks.nice, 50);
        assert_eq!(ticks.system, 50);
        assert_eq!(ticks.idle, 800);
    }

    #[test]
    fn rejects_per_core_and_malformed_lines() {
        assert!(parse_stat_cpu_line("cpu0 100 50 50 800").is_none());
        assert!(parse_stat_cpu_line("cpu 100 fifty 50 800").is_none());
        assert!(parse_stat_cpu_line("intr 12345").is_none());
        assert!(parse_stat_cpu_line("").is_none());
    }

    #[test]
    fn meminfo_kb_values_convert_to_pages() {
        let contents = "MemTotal:       16384000 kB\n\
                        Active:          8192000 kB\n\
                        Inactive:        2048000 kB\n\
                        Unevictable:       64000 kB\n";
        let vm = parse_meminfo(contents, 4096).unwrap();
        assert_eq!(vm.active_pages, 8_192_000 * 1024 / 4096);
        assert_eq!(vm.wired_pages, 64_000 * 1024 / 4096);
        assert_eq!(vm.page_size, 4096);
    }

    #[test]
    fn meminfo_missing_fields_yields_none() {
        assert!(parse_meminfo("MemTotal: 1 kB\n", 4096).is_none());
    }
}
