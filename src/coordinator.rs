use tracing::{debug, info, warn};

use crate::awareness::DpiCapability;
use crate::dpi::{Dpi, DpiInfo, Vector, DEFAULT_DPI};
use crate::error::NativeError;
use crate::platform::DpiPlatform;
use crate::surface::{Geometry, WindowSurface};

/// WM_DPICHANGED 建议的窗口矩形（设备像素）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviceRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl DeviceRect {
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Refresh {
    /// 未启用或窗口尚未初始化
    Skipped,
    Unchanged,
    Rescaled(Vector),
}

type Listener = Box<dyn FnMut(&DpiInfo)>;

/// 让窗口尺寸和布局缩放跟随所在显示器的 DPI
pub struct DpiCoordinator {
    capability: DpiCapability,
    info: Option<DpiInfo>,
    listeners: Vec<Listener>,
}

impl DpiCoordinator {
    pub fn new(capability: DpiCapability) -> Self {
        Self {
            capability,
            info: None,
            listeners: Vec::new(),
        }
    }

    pub fn is_per_monitor_aware(&self) -> bool {
        self.capability.per_monitor()
    }

    /// 窗口句柄创建后才有值
    pub fn info(&self) -> Option<&DpiInfo> {
        self.info.as_ref()
    }

    pub fn scale(&self) -> Vector {
        self.info
            .as_ref()
            .map(DpiInfo::scale)
            .unwrap_or(Vector::IDENTITY)
    }

    /// DPI 真正变化时回调
    pub fn subscribe(&mut self, listener: impl FnMut(&DpiInfo) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// 窗口句柄创建后调用一次，基准 DPI 从此不变
    pub fn initialize(&mut self, surface: &mut impl WindowSurface, platform: &impl DpiPlatform) {
        if self.info.is_some() {
            return;
        }
        let matrix = surface.transform_to_device();
        let baseline = Dpi::new(DEFAULT_DPI * matrix.x, DEFAULT_DPI * matrix.y);
        debug!("基准DPI: {baseline:?}");
        self.info = Some(DpiInfo::new(baseline));

        if self.is_per_monitor_aware() {
            self.refresh(surface, platform);
        }
    }

    /// 窗口关闭后丢弃
    pub fn reset(&mut self) {
        self.info = None;
        self.listeners.clear();
    }

    /// 重新查询窗口所在显示器的 DPI，并调整窗口尺寸和布局缩放
    pub fn refresh(
        &mut self,
        surface: &mut impl WindowSurface,
        platform: &impl DpiPlatform,
    ) -> Refresh {
        if !self.is_per_monitor_aware() {
            return Refresh::Skipped;
        }
        let Some(info) = self.info.as_mut() else {
            return Refresh::Skipped;
        };
        // 没有可用尺寸时不记录新 DPI，留给下一次刷新按比例调整
        let geometry = surface.geometry();
        if !has_area(&geometry) {
            warn!("窗口尺寸为零，跳过DPI刷新: {geometry:?}");
            return Refresh::Skipped;
        }

        let dpi = surface
            .native_handle()
            .ok_or(NativeError::NoHandle)
            .and_then(|handle| platform.monitor_dpi(handle))
            .and_then(|dpi| {
                if dpi.is_valid() {
                    Ok(dpi)
                } else {
                    Err(NativeError::InvalidDpi { x: dpi.x, y: dpi.y })
                }
            })
            .unwrap_or_else(|e| {
                warn!("查询显示器DPI失败，按 {DEFAULT_DPI} 处理: {e}");
                Dpi::BASELINE
            });

        let previous = info.scale();
        let ratio = info.update_monitor_dpi(dpi);
        let scale = info.scale();
        let baseline = info.baseline();

        update_window_size(surface, geometry.width * ratio.x, geometry.height * ratio.y);
        self.update_layout_transform(surface);

        if scale != previous {
            info!("显示器DPI: {dpi:?}, 基准DPI: {baseline:?}, 缩放: {scale:?}");
            self.notify();
            Refresh::Rescaled(scale)
        } else {
            Refresh::Unchanged
        }
    }

    /// 处理 WM_DPICHANGED，DPI 直接由消息给出，不再查询显示器
    pub fn dpi_changed(
        &mut self,
        surface: &mut impl WindowSurface,
        suggested: DeviceRect,
        packed: u32,
    ) -> bool {
        if !self.is_per_monitor_aware() || self.info.is_none() {
            return false;
        }

        let matrix = surface.transform_to_device();
        surface.set_position(
            suggested.left as f64 / matrix.x,
            suggested.top as f64 / matrix.y,
        );
        update_window_size(
            surface,
            suggested.width() as f64 / matrix.x,
            suggested.height() as f64 / matrix.y,
        );

        let dpi = Dpi::unpack(packed);
        if !dpi.is_valid() {
            warn!("WM_DPICHANGED 携带无效DPI: 0x{packed:08X}");
            return true;
        }
        let Some(info) = self.info.as_mut() else {
            return true;
        };
        if info.monitor() != Some(dpi) {
            let previous = info.scale();
            info.update_monitor_dpi(dpi);
            let scale = info.scale();
            info!("收到DPI变更: {dpi:?}, 缩放: {scale:?}");
            self.update_layout_transform(surface);
            if scale != previous {
                self.notify();
            }
        }
        true
    }

    /// 最小化时收不到 WM_DPICHANGED，靠全局显示设置变更补上
    pub fn display_settings_changed(
        &mut self,
        surface: &mut impl WindowSurface,
        platform: &impl DpiPlatform,
    ) -> Refresh {
        if self.info.is_some() && surface.is_minimized() {
            self.refresh(surface, platform)
        } else {
            Refresh::Skipped
        }
    }

    fn update_layout_transform(&self, surface: &mut impl WindowSurface) {
        if !self.is_per_monitor_aware() {
            return;
        }
        let scale = self.scale();
        if scale.is_identity() {
            surface.set_layout_scale(None);
        } else {
            surface.set_layout_scale(Some(scale));
        }
    }

    fn notify(&mut self) {
        let Some(info) = self.info.as_ref() else {
            return;
        };
        for listener in self.listeners.iter_mut() {
            listener(info);
        }
    }
}

fn has_area(geometry: &Geometry) -> bool {
    geometry.width > 0.0 && geometry.height > 0.0
}

/// 按新旧尺寸的比例同时调整尺寸约束，之后手动缩放时保持一致
fn update_window_size(surface: &mut impl WindowSurface, width: f64, height: f64) {
    let current = surface.geometry();
    if !has_area(&current) {
        if width > 0.0 && height > 0.0 {
            surface.set_size(width, height);
        }
        return;
    }
    let relative = Vector::new(width / current.width, height / current.height);
    if !relative.is_identity() {
        surface.set_constraints(surface.constraints().scaled(relative));
        surface.set_size(width, height);
    }
}
