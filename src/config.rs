use std::path::PathBuf;
use std::time::Duration;

use crate::surface::SizeConstraints;

const LOG_FILE: &str = "capture-dpi.log";
const TITLE: &str = "屏幕截图";
const WIDTH: u32 = 640;
const HEIGHT: u32 = 420;
const MIN_WIDTH: f64 = 320.0;
const MIN_HEIGHT: f64 = 240.0;
const MONITOR_POLL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub constraints: SizeConstraints,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: TITLE.to_string(),
            width: WIDTH,
            height: HEIGHT,
            constraints: SizeConstraints {
                min_width: MIN_WIDTH,
                min_height: MIN_HEIGHT,
                ..SizeConstraints::default()
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub log_dir: PathBuf,
    pub log_file: String,
    pub window: WindowConfig,
    /// 轮询显示器布局的间隔，用于发现显示设置变更
    pub monitor_poll: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("."),
            log_file: LOG_FILE.to_string(),
            window: WindowConfig::default(),
            monitor_poll: MONITOR_POLL,
        }
    }
}

impl Config {
    /// 环境变量 CAPTURE_DPI_LOG_DIR / CAPTURE_DPI_POLL_MS 可覆盖默认值
    pub fn from_env() -> Self {
        Self::default().with_overrides(
            std::env::var("CAPTURE_DPI_LOG_DIR").ok(),
            std::env::var("CAPTURE_DPI_POLL_MS").ok(),
        )
    }

    fn with_overrides(mut self, log_dir: Option<String>, poll_ms: Option<String>) -> Self {
        if let Some(dir) = log_dir.filter(|d| !d.trim().is_empty()) {
            self.log_dir = PathBuf::from(dir);
        }
        if let Some(ms) = poll_ms.and_then(|ms| ms.trim().parse::<u64>().ok()) {
            if ms > 0 {
                self.monitor_poll = Duration::from_millis(ms);
            }
        }
        self
    }
}
