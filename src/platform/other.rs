use super::{DpiPlatform, WindowHandle};
use crate::awareness::ProcessDpiAwareness;
use crate::dpi::Dpi;
use crate::error::NativeError;
use crate::os_version::OsVersion;

/// 非 Windows 平台：没有进程级 DPI 感知接口，协调器保持停用
#[derive(Debug, Default, Clone, Copy)]
pub struct NativePlatform;

impl NativePlatform {
    pub fn new() -> Self {
        Self
    }
}

impl DpiPlatform for NativePlatform {
    fn is_os_at_least(&self, _version: OsVersion) -> bool {
        false
    }

    fn process_dpi_awareness(&self) -> Result<ProcessDpiAwareness, NativeError> {
        Err(NativeError::Unsupported("GetProcessDpiAwareness"))
    }

    fn is_process_dpi_aware(&self) -> bool {
        false
    }

    fn set_process_dpi_awareness(
        &self,
        _awareness: ProcessDpiAwareness,
    ) -> Result<(), NativeError> {
        Err(NativeError::Unsupported("SetProcessDpiAwareness"))
    }

    fn set_process_dpi_aware(&self) -> Result<(), NativeError> {
        Err(NativeError::Unsupported("SetProcessDPIAware"))
    }

    fn monitor_dpi(&self, _window: WindowHandle) -> Result<Dpi, NativeError> {
        Err(NativeError::Unsupported("GetDpiForMonitor"))
    }
}
