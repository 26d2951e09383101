/// 100% 缩放时的标准 DPI
pub const DEFAULT_DPI: f64 = 96.0;

/// 横纵两个方向的比例（DPI 变化比例或布局缩放）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub const IDENTITY: Vector = Vector { x: 1.0, y: 1.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_identity(&self) -> bool {
        self.x == 1.0 && self.y == 1.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dpi {
    pub x: f64,
    pub y: f64,
}

impl Dpi {
    pub const BASELINE: Dpi = Dpi {
        x: DEFAULT_DPI,
        y: DEFAULT_DPI,
    };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// WM_DPICHANGED 的 wParam：高 16 位为 X DPI，低 16 位为 Y DPI
    pub fn unpack(packed: u32) -> Self {
        Self {
            x: (packed >> 16) as f64,
            y: (packed & 0x0000_FFFF) as f64,
        }
    }

    pub fn pack(&self) -> u32 {
        let x = self.x.round().clamp(0.0, u16::MAX as f64) as u32;
        let y = self.y.round().clamp(0.0, u16::MAX as f64) as u32;
        (x << 16) | y
    }

    /// 两个方向都是正的有限值
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.x > 0.0 && self.y > 0.0
    }

    /// 由窗口框架给出的缩放系数还原 DPI
    pub fn from_scale_factor(scale_factor: f64) -> Self {
        let dpi = (scale_factor * DEFAULT_DPI).round();
        Self { x: dpi, y: dpi }
    }

    fn ratio(&self, other: &Dpi) -> Vector {
        Vector::new(self.x / other.x, self.y / other.y)
    }
}

/// 窗口的 DPI 信息，窗口句柄创建后才有
#[derive(Debug, Clone, PartialEq)]
pub struct DpiInfo {
    baseline: Dpi,
    monitor: Option<Dpi>,
    scale: Vector,
}

impl DpiInfo {
    pub fn new(baseline: Dpi) -> Self {
        Self {
            baseline,
            monitor: None,
            scale: Vector::IDENTITY,
        }
    }

    /// 渲染使用的 DPI，即系统 DPI
    pub fn baseline(&self) -> Dpi {
        self.baseline
    }

    /// 当前显示器 DPI；进程不是 per-monitor 感知时为空
    pub fn monitor(&self) -> Option<Dpi> {
        self.monitor
    }

    pub fn scale(&self) -> Vector {
        self.scale
    }

    /// 记录新的显示器 DPI，返回旧 DPI 到新 DPI 的比例
    pub fn update_monitor_dpi(&mut self, dpi: Dpi) -> Vector {
        let old = self.monitor.unwrap_or(self.baseline);
        self.monitor = Some(dpi);
        self.scale = dpi.ratio(&self.baseline);
        dpi.ratio(&old)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpack_splits_high_and_low_words() {
        let dpi = Dpi::unpack((144 << 16) | 120);
        assert_eq!(dpi, Dpi::new(144.0, 120.0));
        assert_eq!(dpi.pack(), (144 << 16) | 120);
    }

    #[test]
    fn zero_axis_is_not_valid() {
        assert!(Dpi::BASELINE.is_valid());
        assert!(!Dpi::unpack(144 << 16).is_valid());
        assert!(!Dpi::unpack(144).is_valid());
        assert!(!Dpi::new(f64::INFINITY, 96.0).is_valid());
    }

    #[test]
    fn scale_factor_maps_to_dpi() {
        assert_eq!(Dpi::from_scale_factor(1.5), Dpi::new(144.0, 144.0));
        assert_eq!(Dpi::from_scale_factor(1.25), Dpi::new(120.0, 120.0));
    }

    #[test]
    fn first_update_is_relative_to_baseline() {
        let mut info = DpiInfo::new(Dpi::BASELINE);
        assert_eq!(info.monitor(), None);
        assert_eq!(info.scale(), Vector::IDENTITY);

        let ratio = info.update_monitor_dpi(Dpi::new(144.0, 144.0));
        assert_eq!(ratio, Vector::new(1.5, 1.5));
        assert_eq!(info.scale(), Vector::new(1.5, 1.5));
        assert_eq!(info.monitor(), Some(Dpi::new(144.0, 144.0)));
    }

    #[test]
    fn later_updates_are_relative_to_previous_monitor() {
        let mut info = DpiInfo::new(Dpi::BASELINE);
        info.update_monitor_dpi(Dpi::new(192.0, 192.0));
        let ratio = info.update_monitor_dpi(Dpi::new(144.0, 96.0));
        assert_eq!(ratio, Vector::new(0.75, 0.5));
        assert_eq!(info.scale(), Vector::new(1.5, 1.0));
        assert_eq!(info.baseline(), Dpi::BASELINE);
    }

    #[test]
    fn scale_uses_non_default_baseline() {
        let mut info = DpiInfo::new(Dpi::new(120.0, 120.0));
        info.update_monitor_dpi(Dpi::new(180.0, 240.0));
        assert_eq!(info.scale(), Vector::new(1.5, 2.0));
    }
}
