use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use tracing::debug;

use crate::coordinator::DeviceRect;

pub const WM_DPICHANGED: u32 = 0x02E0;

/// 从事件分发入口转进来的窗口消息
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NativeMessage {
    pub id: u32,
    pub wparam: usize,
    /// WM_DPICHANGED 的 lParam 指向的矩形
    pub rect: Option<DeviceRect>,
}

pub type Handler<T> = fn(&mut T, &NativeMessage) -> bool;

/// 按消息 ID 注册的处理函数表
pub struct MessageHooks<T> {
    handlers: HashMap<u32, Handler<T>>,
}

impl<T> Default for MessageHooks<T> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }
}

impl<T> MessageHooks<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: u32, handler: Handler<T>) {
        self.handlers.insert(id, handler);
    }

    pub fn unregister(&mut self, id: u32) -> bool {
        self.handlers.remove(&id).is_some()
    }

    /// 返回消息是否已处理
    pub fn dispatch(&self, target: &mut T, message: &NativeMessage) -> bool {
        match self.handlers.get(&message.id) {
            Some(handler) => handler(target, message),
            None => false,
        }
    }
}

/// 全局显示设置变更（显示器增减、分辨率变化）的订阅者
#[derive(Debug)]
pub struct DisplaySettingsHub<K> {
    listeners: HashSet<K>,
}

impl<K> Default for DisplaySettingsHub<K> {
    fn default() -> Self {
        Self {
            listeners: HashSet::new(),
        }
    }
}

impl<K: Copy + Eq + Hash + std::fmt::Debug> DisplaySettingsHub<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, key: K) {
        debug!("订阅显示设置变更: {key:?}");
        self.listeners.insert(key);
    }

    pub fn detach(&mut self, key: K) {
        if self.listeners.remove(&key) {
            debug!("取消订阅显示设置变更: {key:?}");
        }
    }

    /// 广播时的接收者快照
    pub fn listeners(&self) -> Vec<K> {
        self.listeners.iter().copied().collect()
    }
}
