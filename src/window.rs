use tracing::debug;

use crate::awareness::DpiCapability;
use crate::coordinator::{DpiCoordinator, Refresh};
use crate::dpi::DpiInfo;
use crate::hooks::{MessageHooks, NativeMessage, WM_DPICHANGED};
use crate::platform::DpiPlatform;
use crate::surface::WindowSurface;

pub struct WindowState<S, P> {
    surface: S,
    platform: P,
    coordinator: DpiCoordinator,
}

fn on_dpi_changed<S: WindowSurface, P>(
    state: &mut WindowState<S, P>,
    message: &NativeMessage,
) -> bool {
    let Some(rect) = message.rect else {
        return false;
    };
    state
        .coordinator
        .dpi_changed(&mut state.surface, rect, message.wparam as u32)
}

/// 支持 per-monitor DPI 感知的窗口
pub struct DpiAwareWindow<S, P> {
    state: WindowState<S, P>,
    hooks: MessageHooks<WindowState<S, P>>,
    closed: bool,
}

impl<S: WindowSurface, P: DpiPlatform> DpiAwareWindow<S, P> {
    pub fn new(surface: S, platform: P, capability: DpiCapability) -> Self {
        Self {
            state: WindowState {
                surface,
                platform,
                coordinator: DpiCoordinator::new(capability),
            },
            hooks: MessageHooks::new(),
            closed: false,
        }
    }

    pub fn surface(&self) -> &S {
        &self.state.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.state.surface
    }

    #[cfg(test)]
    pub fn platform(&self) -> &P {
        &self.state.platform
    }

    pub fn dpi_info(&self) -> Option<&DpiInfo> {
        self.state.coordinator.info()
    }

    #[cfg(test)]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&DpiInfo) + 'static) {
        self.state.coordinator.subscribe(listener);
    }

    /// 原生窗口创建完成
    pub fn source_initialized(&mut self) {
        if self.closed {
            return;
        }
        let WindowState {
            surface,
            platform,
            coordinator,
        } = &mut self.state;
        if coordinator.is_per_monitor_aware() {
            self.hooks.register(WM_DPICHANGED, on_dpi_changed::<S, P>);
        }
        coordinator.initialize(surface, &*platform);
    }

    pub fn dispatch(&mut self, message: &NativeMessage) -> bool {
        if self.closed {
            return false;
        }
        self.hooks.dispatch(&mut self.state, message)
    }

    pub fn refresh(&mut self) -> Refresh {
        if self.closed {
            return Refresh::Skipped;
        }
        let WindowState {
            surface,
            platform,
            coordinator,
        } = &mut self.state;
        coordinator.refresh(surface, &*platform)
    }

    pub fn display_settings_changed(&mut self) -> Refresh {
        if self.closed {
            return Refresh::Skipped;
        }
        let WindowState {
            surface,
            platform,
            coordinator,
        } = &mut self.state;
        coordinator.display_settings_changed(surface, &*platform)
    }

    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        if self.hooks.unregister(WM_DPICHANGED) {
            debug!("窗口关闭，移除消息钩子");
        }
        self.state.coordinator.reset();
        self.closed = true;
    }
}
