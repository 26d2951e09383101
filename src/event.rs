use winit::window::WindowId;

use crate::dpi::Vector;

#[derive(Debug, PartialEq)]
pub enum Event {
    /// 窗口换了显示器，重新查询 DPI
    Refresh(WindowId),
    DpiChanged(WindowId, Vector),
}
