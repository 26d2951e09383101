/// 按 (主版本, 次版本, Service Pack) 字典序比较的系统版本
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OsVersion {
    pub major: u32,
    pub minor: u32,
    pub service_pack: u16,
}

impl OsVersion {
    pub const fn new(major: u32, minor: u32, service_pack: u16) -> Self {
        Self {
            major,
            minor,
            service_pack,
        }
    }
}

pub const VISTA: OsVersion = OsVersion::new(6, 0, 0);

/// 支持 per-monitor DPI 感知的最低版本（Windows 8.1）
pub const PER_MONITOR_MIN: OsVersion = OsVersion::new(6, 3, 0);

/// 已知版本，按从旧到新排列
pub const RELEASES: &[(&str, OsVersion)] = &[
    ("Windows XP", OsVersion::new(5, 1, 0)),
    ("Windows XP SP1", OsVersion::new(5, 1, 1)),
    ("Windows XP SP2", OsVersion::new(5, 1, 2)),
    ("Windows XP SP3", OsVersion::new(5, 1, 3)),
    ("Windows Vista", VISTA),
    ("Windows Vista SP1", OsVersion::new(6, 0, 1)),
    ("Windows Vista SP2", OsVersion::new(6, 0, 2)),
    ("Windows 7", OsVersion::new(6, 1, 0)),
    ("Windows 7 SP1", OsVersion::new(6, 1, 1)),
    ("Windows 8", OsVersion::new(6, 2, 0)),
    ("Windows 8.1", PER_MONITOR_MIN),
    ("Windows 10", OsVersion::new(10, 0, 0)),
];

/// 满足 `is_at_least` 的最新已知版本名
pub fn release_name(is_at_least: impl Fn(OsVersion) -> bool) -> Option<&'static str> {
    RELEASES
        .iter()
        .rev()
        .find(|(_, version)| is_at_least(*version))
        .map(|(name, _)| *name)
}
