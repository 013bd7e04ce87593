use std::io;
use std::path::Path;

use crate::system::cpu::CpuTicks;

/// Typed VM counters from the kernel. The sampler's "used" figure is
/// active + wired pages; inactive and free pages count as reclaimable.
#[derive(Clone, Copy, Debug)]
pub struct VmStats {
    pub active_pages: u64,
    pub wired_pages: u64,
    pub page_size: u64,
}

impl VmStats {
    pub fn used_bytes(&self) -> u64 {
        self.active_pages
            .saturating_add(self.wired_pages)
            .saturating_mul(self.page_size)
    }
}

/// Capacity of a mounted volume. `avail_bytes` is what an unprivileged
/// caller could still write, matching what file managers report as free.
#[derive(Clone, Copy, Debug)]
pub struct DiskSpace {
    pub total_bytes: u64,
    pub avail_bytes: u64,
}

/// Narrow adapter over the per-OS kernel interfaces. All unsafe FFI lives
/// behind these three accessors; the rest of the sampler deals only in
/// typed values.
pub trait KernelStats {
    fn cpu_ticks() -> Option<CpuTicks>;
    fn vm_stats() -> Option<VmStats>;
    fn disk_space(path: &Path) -> io::Result<DiskSpace>;
}

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "windows")]
mod windows;

#[cfg(target_os = "linux")]
use linux as platform_impl;
#[cfg(target_os = "macos")]
use macos as platform_impl;
#[cfg(target_os = "windows")]
use windows as platform_impl;

pub fn cpu_ticks() -> Option<CpuTicks> {
    platform_impl::Platform::cpu_ticks()
}

pub fn vm_stats() -> Option<VmStats> {
    platform_impl::Platform::vm_stats()
}

pub fn disk_space(path: &Path) -> io::Result<DiskSpace> {
    platform_impl::Platform::disk_space(path)
}

#[cfg(unix)]
fn page_size() -> u64 {
    let raw = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    if raw > 0 { raw as u64 } else { 4096 }
}

#[cfg(unix)]
fn statvfs(path: &Path) -> io::Result<DiskSpace> {
    use std::os::unix::ffi::OsStrExt;

    let c_path = std::ffi::CString::new(path.as_os_str().as_bytes())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let mut stats: libc::statvfs = unsafe { std::mem::zeroed() };
    if unsafe { libc::statvfs(c_path.as_ptr(), &mut stats) } != 0 {
        return Err(io::Error::last_os_error());
    }
    let frag_size = stats.f_frsize as u64;
    Ok(DiskSpace {
        total_bytes: (stats.f_blocks as u64).saturating_mul(frag_size),
        avail_bytes: (stats.f_bavail as u64).saturating_mul(frag_size),
    })
}
