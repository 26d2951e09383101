use crate::awareness::ProcessDpiAwareness;
use crate::dpi::Dpi;
use crate::error::NativeError;
use crate::os_version::OsVersion;

#[cfg(not(windows))]
mod other;
#[cfg(windows)]
mod win32;

#[cfg(not(windows))]
pub use other::NativePlatform;
#[cfg(windows)]
pub use win32::NativePlatform;

/// 原生窗口句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub isize);

/// DPI 相关的原生接口
pub trait DpiPlatform {
    fn is_os_at_least(&self, version: OsVersion) -> bool;

    /// shcore 查询进程 DPI 感知级别（8.1+）
    fn process_dpi_awareness(&self) -> Result<ProcessDpiAwareness, NativeError>;

    /// user32 旧接口（Vista+）
    fn is_process_dpi_aware(&self) -> bool;

    /// 只在任何窗口显示之前调用才有效
    fn set_process_dpi_awareness(&self, awareness: ProcessDpiAwareness)
        -> Result<(), NativeError>;

    fn set_process_dpi_aware(&self) -> Result<(), NativeError>;

    /// 离窗口最近的显示器的有效 DPI
    fn monitor_dpi(&self, window: WindowHandle) -> Result<Dpi, NativeError>;
}
