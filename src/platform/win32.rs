use std::mem;

use windows_sys::Win32::Foundation::S_OK;
use windows_sys::Win32::Graphics::Gdi::{MonitorFromWindow, MONITOR_DEFAULTTONEAREST};
use windows_sys::Win32::System::SystemInformation::{
    VerSetConditionMask, VerifyVersionInfoW, OSVERSIONINFOEXW,
};
use windows_sys::Win32::UI::HiDpi::{
    GetDpiForMonitor, GetProcessDpiAwareness, SetProcessDpiAwareness, MDT_EFFECTIVE_DPI,
    PROCESS_DPI_AWARENESS, PROCESS_DPI_UNAWARE, PROCESS_PER_MONITOR_DPI_AWARE,
    PROCESS_SYSTEM_DPI_AWARE,
};
use windows_sys::Win32::UI::WindowsAndMessaging::{IsProcessDPIAware, SetProcessDPIAware};

use super::{DpiPlatform, WindowHandle};
use crate::awareness::ProcessDpiAwareness;
use crate::dpi::Dpi;
use crate::error::NativeError;
use crate::os_version::OsVersion;

// winnt.h
const VER_MINORVERSION: u32 = 0x0000001;
const VER_MAJORVERSION: u32 = 0x0000002;
const VER_SERVICEPACKMAJOR: u32 = 0x0000020;
const VER_GREATER_EQUAL: u8 = 3;

#[derive(Debug, Default, Clone, Copy)]
pub struct NativePlatform;

impl NativePlatform {
    pub fn new() -> Self {
        Self
    }
}

fn check(api: &'static str, code: i32) -> Result<(), NativeError> {
    if code == S_OK {
        Ok(())
    } else {
        Err(NativeError::Call { api, code })
    }
}

impl DpiPlatform for NativePlatform {
    fn is_os_at_least(&self, version: OsVersion) -> bool {
        unsafe {
            let mut info: OSVERSIONINFOEXW = mem::zeroed();
            info.dwOSVersionInfoSize = mem::size_of::<OSVERSIONINFOEXW>() as u32;
            info.dwMajorVersion = version.major;
            info.dwMinorVersion = version.minor;
            info.wServicePackMajor = version.service_pack;

            let mask = VerSetConditionMask(
                VerSetConditionMask(
                    VerSetConditionMask(0, VER_MAJORVERSION, VER_GREATER_EQUAL),
                    VER_MINORVERSION,
                    VER_GREATER_EQUAL,
                ),
                VER_SERVICEPACKMAJOR,
                VER_GREATER_EQUAL,
            );
            VerifyVersionInfoW(
                &mut info,
                VER_MAJORVERSION | VER_MINORVERSION | VER_SERVICEPACKMAJOR,
                mask,
            ) != 0
        }
    }

    fn process_dpi_awareness(&self) -> Result<ProcessDpiAwareness, NativeError> {
        let mut value: PROCESS_DPI_AWARENESS = PROCESS_DPI_UNAWARE;
        // 句柄为 0 表示当前进程
        check("GetProcessDpiAwareness", unsafe {
            GetProcessDpiAwareness(0, &mut value)
        })?;
        Ok(match value {
            PROCESS_PER_MONITOR_DPI_AWARE => ProcessDpiAwareness::PerMonitorAware,
            PROCESS_SYSTEM_DPI_AWARE => ProcessDpiAwareness::SystemAware,
            _ => ProcessDpiAwareness::Unaware,
        })
    }

    fn is_process_dpi_aware(&self) -> bool {
        unsafe { IsProcessDPIAware() != 0 }
    }

    fn set_process_dpi_awareness(
        &self,
        awareness: ProcessDpiAwareness,
    ) -> Result<(), NativeError> {
        let value = match awareness {
            ProcessDpiAwareness::Unaware => PROCESS_DPI_UNAWARE,
            ProcessDpiAwareness::SystemAware => PROCESS_SYSTEM_DPI_AWARE,
            ProcessDpiAwareness::PerMonitorAware => PROCESS_PER_MONITOR_DPI_AWARE,
        };
        check("SetProcessDpiAwareness", unsafe {
            SetProcessDpiAwareness(value)
        })
    }

    fn set_process_dpi_aware(&self) -> Result<(), NativeError> {
        if unsafe { SetProcessDPIAware() } != 0 {
            Ok(())
        } else {
            Err(NativeError::Call {
                api: "SetProcessDPIAware",
                code: 0,
            })
        }
    }

    fn monitor_dpi(&self, window: WindowHandle) -> Result<Dpi, NativeError> {
        if window.0 == 0 {
            return Err(NativeError::NoHandle);
        }
        let monitor = unsafe { MonitorFromWindow(window.0, MONITOR_DEFAULTTONEAREST) };
        let mut x = 0u32;
        let mut y = 0u32;
        check("GetDpiForMonitor", unsafe {
            GetDpiForMonitor(monitor, MDT_EFFECTIVE_DPI, &mut x, &mut y)
        })?;
        Ok(Dpi::new(x as f64, y as f64))
    }
}
