use tracing::{info, warn};

use crate::os_version::{self, PER_MONITOR_MIN, VISTA};
use crate::platform::DpiPlatform;

/// 进程 DPI 感知级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessDpiAwareness {
    Unaware,
    /// 系统 DPI 感知（框架默认）
    SystemAware,
    /// per-monitor DPI 感知（8.1+）
    PerMonitorAware,
}

/// 查询当前进程的 DPI 感知级别，失败时按系统感知处理
pub fn current_awareness(platform: &impl DpiPlatform) -> ProcessDpiAwareness {
    if platform.is_os_at_least(PER_MONITOR_MIN) {
        return platform.process_dpi_awareness().unwrap_or_else(|e| {
            warn!("查询DPI感知级别失败，按系统感知处理: {e}");
            ProcessDpiAwareness::SystemAware
        });
    }
    if platform.is_os_at_least(VISTA) {
        return if platform.is_process_dpi_aware() {
            ProcessDpiAwareness::SystemAware
        } else {
            ProcessDpiAwareness::Unaware
        };
    }
    ProcessDpiAwareness::SystemAware
}

/// 启动时探测一次的 DPI 能力，作为配置传给每个窗口
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DpiCapability {
    mode: ProcessDpiAwareness,
}

impl DpiCapability {
    pub fn new(mode: ProcessDpiAwareness) -> Self {
        Self { mode }
    }

    /// 尝试把进程升级为 per-monitor 感知，必须在创建任何窗口之前调用。
    /// 只有原本完全不感知 DPI 时升级才会生效。
    pub fn detect(platform: &impl DpiPlatform) -> Self {
        let release = os_version::release_name(|v| platform.is_os_at_least(v));
        let current = current_awareness(platform);
        info!("系统版本: {}, 当前DPI感知: {current:?}", release.unwrap_or("未知"));

        let mode = match current {
            ProcessDpiAwareness::Unaware if platform.is_os_at_least(PER_MONITOR_MIN) => {
                match platform.set_process_dpi_awareness(ProcessDpiAwareness::PerMonitorAware) {
                    Ok(()) => ProcessDpiAwareness::PerMonitorAware,
                    Err(e) => {
                        warn!("设置per-monitor DPI感知失败: {e}");
                        ProcessDpiAwareness::Unaware
                    }
                }
            }
            // 旧系统退回系统感知，缩放固定为 1
            ProcessDpiAwareness::Unaware => match platform.set_process_dpi_aware() {
                Ok(()) => ProcessDpiAwareness::SystemAware,
                Err(e) => {
                    warn!("设置系统DPI感知失败: {e}");
                    ProcessDpiAwareness::Unaware
                }
            },
            other => other,
        };

        Self::new(mode)
    }

    pub fn mode(&self) -> ProcessDpiAwareness {
        self.mode
    }

    pub fn per_monitor(&self) -> bool {
        self.mode == ProcessDpiAwareness::PerMonitorAware
    }
}
