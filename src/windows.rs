use std::collections::HashMap;
use std::time::Instant;

use anyhow::Result;
use log_error::LogError;
use tracing::{debug, info};
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event_loop::{EventLoopProxy, EventLoopWindowTarget};
use winit::monitor::MonitorHandle;
use winit::window::{WindowBuilder, WindowId};

use crate::awareness::DpiCapability;
use crate::config::WindowConfig;
use crate::coordinator::DeviceRect;
use crate::dpi::{Dpi, Vector};
use crate::event::Event;
use crate::hooks::{NativeMessage, WM_DPICHANGED};
use crate::monitor::{DisplayWatcher, MonitorLayout};
use crate::platform::NativePlatform;
use crate::registry::WindowRegistry;
use crate::surface::WinitSurface;
use crate::window::DpiAwareWindow;

/// winit 把 WM_DPICHANGED 转成了缩放系数，这里还原成原始消息
pub fn dpi_changed_message(
    scale_factor: f64,
    position: PhysicalPosition<i32>,
    size: PhysicalSize<u32>,
) -> NativeMessage {
    NativeMessage {
        id: WM_DPICHANGED,
        wparam: Dpi::from_scale_factor(scale_factor).pack() as usize,
        rect: Some(DeviceRect {
            left: position.x,
            top: position.y,
            right: position.x + size.width as i32,
            bottom: position.y + size.height as i32,
        }),
    }
}

pub struct Windows {
    registry: WindowRegistry<WindowId, WinitSurface, NativePlatform>,
    monitors: HashMap<WindowId, Option<MonitorHandle>>,
    watcher: DisplayWatcher,
    capability: DpiCapability,
    config: WindowConfig,
    event_loop: EventLoopProxy<Event>,
}

impl Windows {
    pub fn new(
        event_loop: EventLoopProxy<Event>,
        capability: DpiCapability,
        config: WindowConfig,
        watcher: DisplayWatcher,
    ) -> Self {
        Self {
            registry: WindowRegistry::new(),
            monitors: HashMap::new(),
            watcher,
            capability,
            config,
            event_loop,
        }
    }

    pub fn create(&mut self, event_loop: &EventLoopWindowTarget<Event>) -> Result<WindowId> {
        let window = WindowBuilder::new()
            .with_title(&self.config.title)
            .with_visible(false)
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height))
            .build(event_loop)?;
        let window_id = window.id();
        let monitor = window.current_monitor();

        let surface = WinitSurface::new(window, self.config.constraints);
        let mut window = DpiAwareWindow::new(surface, NativePlatform::new(), self.capability);
        let event_tx = self.event_loop.clone();
        window.subscribe(move |dpi| {
            event_tx
                .send_event(Event::DpiChanged(window_id, dpi.scale()))
                .log_error("发送DPI变更事件失败");
        });
        window.source_initialized();
        window.surface().window().set_visible(true);

        let scale = window
            .dpi_info()
            .map(|dpi| dpi.scale())
            .unwrap_or(Vector::IDENTITY);
        // 窗口关闭时必须取消订阅
        self.registry.insert(window_id, window);
        self.monitors.insert(window_id, monitor);
        self.show_scale(&window_id, scale);
        Ok(window_id)
    }

    pub fn scale_factor_changed(
        &mut self,
        window_id: &WindowId,
        scale_factor: f64,
        new_inner_size: &mut PhysicalSize<u32>,
    ) {
        let Some(window) = self.registry.get_mut(*window_id) else {
            return;
        };
        let position = window.surface().window().outer_position().unwrap_or_default();
        let message = dpi_changed_message(scale_factor, position, *new_inner_size);
        if window.dispatch(&message) {
            *new_inner_size = window.surface().inner_size();
        }
    }

    pub fn moved(&mut self, window_id: &WindowId) {
        let Some(window) = self.registry.get_mut(*window_id) else {
            return;
        };
        window.surface_mut().sync_from_window();
        let monitor = window.surface().window().current_monitor();
        let known = self.monitors.entry(*window_id).or_default();
        if monitor != *known {
            *known = monitor;
            self.event_loop
                .send_event(Event::Refresh(*window_id))
                .log_error("发送刷新事件失败");
        }
    }

    pub fn resized(&mut self, window_id: &WindowId) {
        if let Some(window) = self.registry.get_mut(*window_id) {
            window.surface_mut().sync_from_window();
        }
    }

    pub fn refresh(&mut self, window_id: &WindowId) {
        if let Some(window) = self.registry.get_mut(*window_id) {
            window.refresh();
        }
    }

    pub fn show_scale(&self, window_id: &WindowId, scale: Vector) {
        if let Some(window) = self.registry.get(*window_id) {
            let surface = window.surface();
            info!("窗口缩放: {scale:?}");
            debug!("布局缩放: {:?}", surface.layout_scale());
            surface.set_title(&scale_title(&self.config.title, scale));
        }
    }

    pub fn next_poll(&self) -> Instant {
        self.watcher.next_poll()
    }

    /// 最小化的窗口收不到 WM_DPICHANGED，显示设置变化时补一次刷新
    pub fn poll_displays(&mut self, event_loop: &EventLoopWindowTarget<Event>) {
        let now = Instant::now();
        if !self.watcher.due(now) {
            return;
        }
        let layout = MonitorLayout::capture(event_loop.available_monitors());
        let count = layout.len();
        if self.watcher.observe(layout, now) {
            info!("显示设置变更，显示器数量: {count}");
            for (window_id, refresh) in self.registry.display_settings_changed() {
                debug!("{window_id:?}: {refresh:?}");
            }
        }
    }

    pub fn destroy(&mut self, window_id: &WindowId) {
        self.monitors.remove(window_id);
        self.registry.remove(*window_id);
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}

fn scale_title(title: &str, scale: Vector) -> String {
    format!("{title} ({:.0}%)", scale.x * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_factor_becomes_packed_dpi_message() {
        let message =
            dpi_changed_message(1.5, PhysicalPosition::new(100, 50), PhysicalSize::new(600, 450));
        assert_eq!(message.id, WM_DPICHANGED);
        assert_eq!(message.wparam, (144 << 16) | 144);
        assert_eq!(
            message.rect,
            Some(DeviceRect {
                left: 100,
                top: 50,
                right: 700,
                bottom: 500,
            })
        );
    }

    #[test]
    fn fractional_scale_factor_rounds_to_nearest_dpi() {
        let message =
            dpi_changed_message(1.25, PhysicalPosition::new(-1920, 0), PhysicalSize::new(500, 375));
        assert_eq!(Dpi::unpack(message.wparam as u32), Dpi::new(120.0, 120.0));
        assert_eq!(message.rect.unwrap().left, -1920);
        assert_eq!(message.rect.unwrap().width(), 500);
    }

    #[test]
    fn title_shows_event_scale() {
        assert_eq!(scale_title("截图", Vector::new(1.5, 1.5)), "截图 (150%)");
        assert_eq!(scale_title("截图", Vector::IDENTITY), "截图 (100%)");
    }
}
