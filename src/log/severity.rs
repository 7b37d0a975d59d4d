use serde::{Deserialize, Serialize};
use std::fmt;

/// 日志条目的类别，用于计数、格式化和着色
///
/// 不要求有序；`index` 仅作为计数数组的下标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Info,
    Warn,
    Error,
}

impl Severity {
    /// 全部类别，顺序与 `index` 一致
    pub const ALL: [Severity; 3] = [Severity::Info, Severity::Warn, Severity::Error];

    /// 在计数数组中的位置
    pub const fn index(self) -> usize {
        match self {
            Severity::Info => 0,
            Severity::Warn => 1,
            Severity::Error => 2,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
