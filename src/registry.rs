use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use tracing::debug;

use crate::coordinator::Refresh;
use crate::hooks::DisplaySettingsHub;
use crate::platform::DpiPlatform;
use crate::surface::WindowSurface;
use crate::window::DpiAwareWindow;

/// 打开的窗口和显示设置变更的订阅关系
pub struct WindowRegistry<K, S, P> {
    windows: HashMap<K, DpiAwareWindow<S, P>>,
    display_settings: DisplaySettingsHub<K>,
}

impl<K, S, P> Default for WindowRegistry<K, S, P> {
    fn default() -> Self {
        Self {
            windows: HashMap::new(),
            display_settings: DisplaySettingsHub::default(),
        }
    }
}

impl<K, S, P> WindowRegistry<K, S, P>
where
    K: Copy + Eq + Hash + Debug,
    S: WindowSurface,
    P: DpiPlatform,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: K, window: DpiAwareWindow<S, P>) {
        self.display_settings.attach(key);
        if let Some(mut replaced) = self.windows.insert(key, window) {
            replaced.close();
        }
    }

    /// 无论窗口是否还在都先取消订阅，再关闭窗口
    pub fn remove(&mut self, key: K) -> Option<DpiAwareWindow<S, P>> {
        self.display_settings.detach(key);
        let mut window = self.windows.remove(&key)?;
        window.close();
        debug!("窗口已移除: {key:?}");
        Some(window)
    }

    pub fn get(&self, key: K) -> Option<&DpiAwareWindow<S, P>> {
        self.windows.get(&key)
    }

    pub fn get_mut(&mut self, key: K) -> Option<&mut DpiAwareWindow<S, P>> {
        self.windows.get_mut(&key)
    }

    /// 广播给所有订阅者，返回每个窗口的刷新结果
    pub fn display_settings_changed(&mut self) -> Vec<(K, Refresh)> {
        self.display_settings
            .listeners()
            .into_iter()
            .filter_map(|key| {
                let window = self.windows.get_mut(&key)?;
                Some((key, window.display_settings_changed()))
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}
