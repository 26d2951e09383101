#![windows_subsystem = "windows"]
use anyhow::Result;
use event::Event;
use time::{macros::format_description, UtcOffset};
use tracing::info;
use tracing_subscriber::fmt::time::OffsetTime;
use winit::{
    event::{ElementState, KeyboardInput, StartCause, VirtualKeyCode, WindowEvent},
    event_loop::EventLoopBuilder,
};

use crate::awareness::DpiCapability;
use crate::config::Config;
use crate::monitor::{DisplayWatcher, MonitorLayout};
use crate::platform::NativePlatform;
use crate::windows::Windows;

mod awareness;
mod config;
mod coordinator;
mod dpi;
mod error;
mod event;
mod hooks;
mod monitor;
mod os_version;
mod platform;
mod registry;
mod surface;
#[cfg(test)]
mod testing;
mod window;
mod windows;

fn main() -> Result<()> {
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::never(&config.log_dir, &config.log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    let timer = OffsetTime::new(
        offset,
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    );
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_timer(timer)
        .with_ansi(false)
        .init();

    // 必须在创建任何窗口之前
    let capability = DpiCapability::detect(&NativePlatform::new());
    info!("DPI感知模式: {:?}", capability.mode());

    let event_loop = EventLoopBuilder::<Event>::with_user_event().build();
    let watcher = DisplayWatcher::new(
        MonitorLayout::capture(event_loop.available_monitors()),
        config.monitor_poll,
    );
    let mut windows = Windows::new(
        event_loop.create_proxy(),
        capability,
        config.window.clone(),
        watcher,
    );
    windows.create(&event_loop)?;
    info!("启动完成");

    event_loop.run(move |event, event_loop, control_flow| {
        control_flow.set_wait_until(windows.next_poll());

        match event {
            winit::event::Event::NewEvents(StartCause::ResumeTimeReached { .. }) => {
                windows.poll_displays(event_loop);
            }
            winit::event::Event::WindowEvent {
                window_id,
                event: WindowEvent::CloseRequested,
            } => {
                windows.destroy(&window_id);
            }
            winit::event::Event::WindowEvent {
                window_id,
                event:
                    WindowEvent::KeyboardInput {
                        input:
                            KeyboardInput {
                                state: ElementState::Released,
                                virtual_keycode: Some(VirtualKeyCode::Escape),
                                ..
                            },
                        ..
                    },
            } => {
                windows.destroy(&window_id);
            }
            winit::event::Event::WindowEvent {
                window_id,
                event:
                    WindowEvent::ScaleFactorChanged {
                        scale_factor,
                        new_inner_size,
                    },
            } => {
                windows.scale_factor_changed(&window_id, scale_factor, new_inner_size);
            }
            winit::event::Event::WindowEvent {
                window_id,
                event: WindowEvent::Moved(_),
            } => {
                windows.moved(&window_id);
            }
            winit::event::Event::WindowEvent {
                window_id,
                event: WindowEvent::Resized(_),
            } => {
                windows.resized(&window_id);
            }
            winit::event::Event::UserEvent(event) => match event {
                Event::Refresh(window_id) => {
                    windows.refresh(&window_id);
                }
                Event::DpiChanged(window_id, scale) => {
                    windows.show_scale(&window_id, scale);
                }
            },
            _ => (),
        }

        if windows.is_empty() {
            info!("所有窗口已关闭");
            control_flow.set_exit();
        }
    })
}
