use tracing::debug;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::window::Window;

use crate::dpi::Vector;
use crate::platform::WindowHandle;

/// 窗口位置和尺寸（逻辑单位）
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Geometry {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// 最小/最大尺寸约束，最大值默认无限
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeConstraints {
    pub min_width: f64,
    pub min_height: f64,
    pub max_width: f64,
    pub max_height: f64,
}

impl Default for SizeConstraints {
    fn default() -> Self {
        Self {
            min_width: 0.0,
            min_height: 0.0,
            max_width: f64::INFINITY,
            max_height: f64::INFINITY,
        }
    }
}

impl SizeConstraints {
    pub fn scaled(&self, ratio: Vector) -> Self {
        Self {
            min_width: self.min_width * ratio.x,
            min_height: self.min_height * ratio.y,
            max_width: self.max_width * ratio.x,
            max_height: self.max_height * ratio.y,
        }
    }
}

/// 协调器操作的窗口
pub trait WindowSurface {
    fn geometry(&self) -> Geometry;
    fn set_position(&mut self, left: f64, top: f64);
    fn set_size(&mut self, width: f64, height: f64);
    fn constraints(&self) -> SizeConstraints;
    fn set_constraints(&mut self, constraints: SizeConstraints);
    /// 逻辑单位到设备像素的变换
    fn transform_to_device(&self) -> Vector;
    /// `None` 表示清除布局缩放
    fn set_layout_scale(&mut self, scale: Option<Vector>);
    fn is_minimized(&self) -> bool;
    fn native_handle(&self) -> Option<WindowHandle>;
}

/// 最小化的窗口报告 0x0，此时保留还原后的几何
fn synced_geometry(
    current: Geometry,
    size: PhysicalSize<u32>,
    position: Option<PhysicalPosition<i32>>,
    minimized: bool,
) -> Geometry {
    if minimized || size.width == 0 || size.height == 0 {
        return current;
    }
    let mut geometry = Geometry {
        width: size.width as f64,
        height: size.height as f64,
        ..current
    };
    if let Some(position) = position {
        geometry.left = position.x as f64;
        geometry.top = position.y as f64;
    }
    geometry
}

/// winit 窗口。内容按设备像素绘制，自己负责缩放，所以逻辑单位等于设备像素
pub struct WinitSurface {
    window: Window,
    geometry: Geometry,
    constraints: SizeConstraints,
    layout_scale: Option<Vector>,
    /// 最小化期间设置的尺寸，还原后再应用
    pending_size: bool,
}

impl WinitSurface {
    pub fn new(window: Window, constraints: SizeConstraints) -> Self {
        let mut surface = Self {
            window,
            geometry: Geometry::default(),
            constraints,
            layout_scale: None,
            pending_size: false,
        };
        surface.sync_from_window();
        surface.set_constraints(constraints);
        surface
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn layout_scale(&self) -> Option<Vector> {
        self.layout_scale
    }

    pub fn inner_size(&self) -> PhysicalSize<u32> {
        PhysicalSize::new(
            self.geometry.width.round() as u32,
            self.geometry.height.round() as u32,
        )
    }

    /// 用户拖动或缩放窗口后同步实际几何
    pub fn sync_from_window(&mut self) {
        let minimized = self.is_minimized();
        let synced = synced_geometry(
            self.geometry,
            self.window.inner_size(),
            self.window.outer_position().ok(),
            minimized,
        );
        if self.pending_size && !minimized {
            self.pending_size = false;
            self.geometry = Geometry {
                width: self.geometry.width,
                height: self.geometry.height,
                ..synced
            };
            debug!("窗口还原，应用最小化期间的尺寸: {:?}", self.geometry);
            self.window.set_inner_size(self.inner_size());
        } else {
            self.geometry = synced;
        }
    }

    pub fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }
}

impl WindowSurface for WinitSurface {
    fn geometry(&self) -> Geometry {
        self.geometry
    }

    fn set_position(&mut self, left: f64, top: f64) {
        self.geometry.left = left;
        self.geometry.top = top;
        self.window
            .set_outer_position(PhysicalPosition::new(left.round() as i32, top.round() as i32));
    }

    fn set_size(&mut self, width: f64, height: f64) {
        self.geometry.width = width;
        self.geometry.height = height;
        if self.is_minimized() {
            self.pending_size = true;
        } else {
            self.window.set_inner_size(self.inner_size());
        }
    }

    fn constraints(&self) -> SizeConstraints {
        self.constraints
    }

    fn set_constraints(&mut self, constraints: SizeConstraints) {
        self.constraints = constraints;
        let min = (constraints.min_width > 0.0 || constraints.min_height > 0.0).then(|| {
            PhysicalSize::new(
                constraints.min_width.round() as u32,
                constraints.min_height.round() as u32,
            )
        });
        let max = (constraints.max_width.is_finite() && constraints.max_height.is_finite())
            .then(|| {
                PhysicalSize::new(
                    constraints.max_width.round() as u32,
                    constraints.max_height.round() as u32,
                )
            });
        self.window.set_min_inner_size(min);
        self.window.set_max_inner_size(max);
    }

    fn transform_to_device(&self) -> Vector {
        Vector::IDENTITY
    }

    fn set_layout_scale(&mut self, scale: Option<Vector>) {
        self.layout_scale = scale;
        self.window.request_redraw();
    }

    fn is_minimized(&self) -> bool {
        self.window.is_minimized().unwrap_or(false)
    }

    #[cfg(windows)]
    fn native_handle(&self) -> Option<WindowHandle> {
        use winit::platform::windows::WindowExtWindows;
        Some(WindowHandle(self.window.hwnd()))
    }

    #[cfg(not(windows))]
    fn native_handle(&self) -> Option<WindowHandle> {
        Some(WindowHandle(u64::from(self.window.id()) as isize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restored() -> Geometry {
        Geometry {
            left: 100.0,
            top: 50.0,
            width: 400.0,
            height: 300.0,
        }
    }

    #[test]
    fn minimized_window_keeps_restored_geometry() {
        let geometry = synced_geometry(
            restored(),
            PhysicalSize::new(0, 0),
            Some(PhysicalPosition::new(-32000, -32000)),
            true,
        );
        assert_eq!(geometry, restored());
    }

    #[test]
    fn zero_size_is_ignored_even_if_not_reported_minimized() {
        let geometry = synced_geometry(restored(), PhysicalSize::new(0, 0), None, false);
        assert_eq!(geometry, restored());
    }

    #[test]
    fn visible_window_takes_actual_geometry() {
        let geometry = synced_geometry(
            restored(),
            PhysicalSize::new(600, 450),
            Some(PhysicalPosition::new(10, 20)),
            false,
        );
        assert_eq!(
            geometry,
            Geometry {
                left: 10.0,
                top: 20.0,
                width: 600.0,
                height: 450.0,
            }
        );

        let geometry = synced_geometry(restored(), PhysicalSize::new(600, 450), None, false);
        assert_eq!(geometry.left, 100.0);
        assert_eq!(geometry.width, 600.0);
    }
}
