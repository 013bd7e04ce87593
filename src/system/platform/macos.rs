use std::io;
use std::path::Path;

use super::{DiskSpace, KernelStats, VmStats};
use crate::system::cpu::CpuTicks;

// Minimal mach bindings for the host statistics calls; libc does not carry
// these. Raw counter arrays stay inside this module as typed structs.

type KernReturn = libc::c_int;
type MachPort = libc::c_uint;

const KERN_SUCCESS: KernReturn = 0;
const HOST_CPU_LOAD_INFO: libc::c_int = 3;
const HOST_VM_INFO64: libc::c_int = 4;

const CPU_STATE_USER: usize = 0;
const CPU_STATE_SYSTEM: usize = 1;
const CPU_STATE_IDLE: usize = 2;
const CPU_STATE_NICE: usize = 3;

#[repr(C)]
#[derive(Default)]
struct HostCpuLoadInfo {
    cpu_ticks: [u32; 4],
}

// Layout per mach/vm_statistics.h (vm_statistics64, 8-byte aligned).
#[repr(C, align(8))]
#[derive(Default)]
struct VmStatistics64 {
    free_count: u32,
    active_count: u32,
    inactive_count: u32,
    wire_count: u32,
    zero_fill_count: u64,
    reactivations: u64,
    pageins: u64,
    pageouts: u64,
    faults: u64,
    cow_faults: u64,
    lookups: u64,
    hits: u64,
    purges: u64,
    purgeable_count: u32,
    speculative_count: u32,
    decompressions: u64,
    compressions: u64,
    swapins: u64,
    swapouts: u64,
    compressor_page_count: u32,
    throttled_count: u32,
    external_page_count: u32,
    internal_page_count: u32,
    total_uncompressed_pages_in_compressor: u64,
}

unsafe extern "C" {
    fn mach_host_self() -> MachPort;
    fn host_statistics(
        host: MachPort,
        flavor: libc::c_int,
        info: *mut libc::c_int,
        count: *mut u32,
    ) -> KernReturn;
    fn host_statistics64(
        host: MachPort,
        flavor: libc::c_int,
        info: *mut libc::c_int,
        count: *mut u32,
    ) -> KernReturn;
}

pub struct Platform;

impl KernelStats for Platform {
    fn cpu_ticks() -> Option<CpuTicks> {
        let mut info = HostCpuLoadInfo::default();
        let mut count = (size_of::<HostCpuLoadInfo>() / size_of::<u32>()) as u32;
        let rc = unsafe {
            host_statistics(
                mach_host_self(),
                HOST_CPU_LOAD_INFO,
                (&raw mut info).cast(),
                &mut count,
            )
        };
        if rc != KERN_SUCCESS {
            return None;
        }
        Some(CpuTicks {
            user: info.cpu_ticks[CPU_STATE_USER] as u64,
            nice: info.cpu_ticks[CPU_STATE_NICE] as u64,
            system: info.cpu_ticks[CPU_STATE_SYSTEM] as u64,
            idle: info.cpu_ticks[CPU_STATE_IDLE] as u64,
        })
    }

    fn vm_stats() -> Option<VmStats> {
        let mut info = VmStatistics64::default();
        let mut count = (size_of::<VmStatistics64>() / size_of::<u32>()) as u32;
        let rc = unsafe {
            host_statistics64(
                mach_host_self(),
                HOST_VM_INFO64,
                (&raw mut info).cast(),
                &mut count,
            )
        };
        if rc != KERN_SUCCESS {
            return None;
        }
        Some(VmStats {
            active_pages: info.active_count as u64,
            wired_pages: info.wire_count as u64,
            page_size: super::page_size(),
        })
    }

    fn disk_space(path: &Path) -> io::Result<DiskSpace> {
        super::statvfs(path)
    }
}
