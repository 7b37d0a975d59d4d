use crate::log::severity::Severity;
use std::sync::atomic::{AtomicU64, Ordering};

/// 按类别统计的出现次数
///
/// 每个 sink 各持有一份，只增不减；多线程并发递增不会丢失更新。
#[derive(Debug, Default)]
pub struct Counters {
    slots: [AtomicU64; 3],
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    /// 计数加一，返回递增后的值
    pub fn increment(&self, severity: Severity) -> u64 {
        self.slots[severity.index()].fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn get(&self, severity: Severity) -> u64 {
        self.slots[severity.index()].load(Ordering::Relaxed)
    }
}
