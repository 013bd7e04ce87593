use std::io;
use std::path::Path;

use windows_sys::Win32::Foundation::FILETIME;
use windows_sys::Win32::Storage::FileSystem::GetDiskFreeSpaceExW;
use windows_sys::Win32::System::SystemInformation::{GlobalMemoryStatusEx, MEMORYSTATUSEX};
use windows_sys::Win32::System::Threading::GetSystemTimes;

use super::{DiskSpace, KernelStats, VmStats};
use crate::system::cpu::CpuTicks;

// Windows has no page-classified VM counters matching active/wired, so the
// adapter reports committed physical memory as active pages at a nominal
// 4 KiB page size.
const NOMINAL_PAGE_SIZE: u64 = 4096;

pub struct Platform;

impl KernelStats for Platform {
    fn cpu_ticks() -> Option<CpuTicks> {
        let mut idle = zero_filetime();
        let mut kernel = zero_filetime();
        let mut user = zero_filetime();
        let ok = unsafe { GetSystemTimes(&mut idle, &mut kernel, &mut user) };
        if ok == 0 {
            return None;
        }
        let idle = filetime_u64(&idle);
        let kernel = filetime_u64(&kernel);
        let user = filetime_u64(&user);
        // Kernel time includes idle time.
        Some(CpuTicks {
            user,
            nice: 0,
            system: kernel.saturating_sub(idle),
            idle,
        })
    }

    fn vm_stats() -> Option<VmStats> {
        let mut status: MEMORYSTATUSEX = unsafe { std::mem::zeroed() };
        status.dwLength = size_of::<MEMORYSTATUSEX>() as u32;
        let ok = unsafe { GlobalMemoryStatusEx(&mut status) };
        if ok == 0 {
            return None;
        }
        let used = status.ullTotalPhys.saturating_sub(status.ullAvailPhys);
        Some(VmStats {
            active_pages: used / NOMINAL_PAGE_SIZE,
            wired_pages: 0,
            page_size: NOMINAL_PAGE_SIZE,
        })
    }

    fn disk_space(path: &Path) -> io::Result<DiskSpace> {
        use std::os::windows::ffi::OsStrExt;

        let wide: Vec<u16> = path
            .as_os_str()
            .encode_wide()
            .chain(std::iter::once(0))
            .collect();
        let mut avail: u64 = 0;
        let mut total: u64 = 0;
        let mut free: u64 = 0;
        let ok = unsafe {
            GetDiskFreeSpaceExW(wide.as_ptr(), &mut avail, &mut total, &mut free)
        };
        if ok == 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(DiskSpace {
            total_bytes: total,
            avail_bytes: avail,
        })
    }
}

fn zero_filetime() -> FILETIME {
    FILETIME {
        dwLowDateTime: 0,
        dwHighDateTime: 0,
    }
}

fn filetime_u64(ft: &FILETIME) -> u64 {
    ((ft.dwHighDateTime as u64) << 32) | ft.dwLowDateTime as u64
}
