use thiserror::Error;

/// 原生接口调用失败
#[derive(Debug, Error, PartialEq)]
pub enum NativeError {
    #[cfg_attr(not(windows), allow(dead_code))]
    #[error("{api} 调用失败: 0x{code:08X}")]
    Call { api: &'static str, code: i32 },

    #[error("{0} 在当前系统不可用")]
    Unsupported(&'static str),

    #[error("窗口句柄尚未创建")]
    NoHandle,

    #[error("无效的DPI: {x}x{y}")]
    InvalidDpi { x: f64, y: f64 },
}
