use std::time::{Duration, Instant};

use winit::monitor::MonitorHandle;

#[derive(Debug, Clone, PartialEq)]
pub struct MonitorInfo {
    pub name: Option<String>,
    pub position: (i32, i32),
    pub size: (u32, u32),
    pub scale_factor: f64,
}

impl From<&MonitorHandle> for MonitorInfo {
    fn from(monitor: &MonitorHandle) -> Self {
        let position = monitor.position();
        let size = monitor.size();
        Self {
            name: monitor.name(),
            position: (position.x, position.y),
            size: (size.width, size.height),
            scale_factor: monitor.scale_factor(),
        }
    }
}

/// 显示器布局快照
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MonitorLayout(Vec<MonitorInfo>);

impl MonitorLayout {
    pub fn new(mut monitors: Vec<MonitorInfo>) -> Self {
        monitors.sort_by(|a, b| a.position.cmp(&b.position).then(a.name.cmp(&b.name)));
        Self(monitors)
    }

    pub fn capture(monitors: impl Iterator<Item = MonitorHandle>) -> Self {
        Self::new(monitors.map(|m| MonitorInfo::from(&m)).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// 在界面线程上定时比较显示器布局，代替系统的显示设置变更广播
pub struct DisplayWatcher {
    layout: MonitorLayout,
    interval: Duration,
    next: Instant,
}

impl DisplayWatcher {
    pub fn new(layout: MonitorLayout, interval: Duration) -> Self {
        Self {
            layout,
            interval,
            next: Instant::now() + interval,
        }
    }

    pub fn next_poll(&self) -> Instant {
        self.next
    }

    pub fn due(&self, now: Instant) -> bool {
        now >= self.next
    }

    /// 记录新的布局，返回是否有变化
    pub fn observe(&mut self, layout: MonitorLayout, now: Instant) -> bool {
        self.next = now + self.interval;
        if layout == self.layout {
            return false;
        }
        self.layout = layout;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor(name: &str, x: i32, scale_factor: f64) -> MonitorInfo {
        MonitorInfo {
            name: Some(name.to_string()),
            position: (x, 0),
            size: (1920, 1080),
            scale_factor,
        }
    }

    #[test]
    fn layout_ignores_enumeration_order() {
        let a = MonitorLayout::new(vec![monitor("A", 0, 1.0), monitor("B", 1920, 1.5)]);
        let b = MonitorLayout::new(vec![monitor("B", 1920, 1.5), monitor("A", 0, 1.0)]);
        assert_eq!(a, b);
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn watcher_reports_only_changes() {
        let start = Instant::now();
        let layout = MonitorLayout::new(vec![monitor("A", 0, 1.0)]);
        let mut watcher = DisplayWatcher::new(layout.clone(), Duration::from_secs(1));

        assert!(!watcher.observe(layout, start));
        assert_eq!(watcher.next_poll(), start + Duration::from_secs(1));

        let added = MonitorLayout::new(vec![monitor("A", 0, 1.0), monitor("B", 1920, 1.0)]);
        assert!(watcher.observe(added.clone(), start));
        assert!(!watcher.observe(added, start));

        let rescaled = MonitorLayout::new(vec![monitor("A", 0, 1.0), monitor("B", 1920, 1.5)]);
        assert!(watcher.observe(rescaled, start));
    }

    #[test]
    fn watcher_is_due_after_interval() {
        let start = Instant::now();
        let mut watcher = DisplayWatcher::new(MonitorLayout::default(), Duration::from_secs(1));
        watcher.observe(MonitorLayout::default(), start);
        assert!(!watcher.due(start));
        assert!(watcher.due(start + Duration::from_secs(1)));
    }
}
