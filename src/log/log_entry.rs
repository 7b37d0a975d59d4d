use crate::log::severity::Severity;
use chrono::{DateTime, Utc};

/// 一条日志记录
///
/// 由 sink 在接受调用的瞬间创建，之后不可变；格式化输出后即被丢弃。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    severity: Severity,
    text: String,
    timestamp: DateTime<Utc>,
    name: Option<String>,
}

impl LogEntry {
    /// 以当前 UTC 时间创建记录
    pub fn new(severity: Severity, text: impl Into<String>, name: Option<&str>) -> Self {
        Self::with_timestamp(severity, text, Utc::now(), name)
    }

    /// 使用指定时间创建记录
    pub fn with_timestamp(
        severity: Severity,
        text: impl Into<String>,
        timestamp: DateTime<Utc>,
        name: Option<&str>,
    ) -> Self {
        Self {
            severity,
            text: text.into(),
            timestamp,
            name: name.map(str::to_string),
        }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// 取出正文，用于在写入失败时上报丢失的条目
    pub fn into_text(self) -> String {
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_entry_uses_current_utc_time() {
        let before = Utc::now();
        let entry = LogEntry::new(Severity::Info, "started", None);
        let after = Utc::now();

        assert_eq!(entry.severity(), Severity::Info);
        assert_eq!(entry.text(), "started");
        assert_eq!(entry.name(), None);
        assert!(entry.timestamp() >= before && entry.timestamp() <= after);
    }

    #[test]
    fn test_entry_with_name_and_timestamp() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        let entry = LogEntry::with_timestamp(Severity::Error, "boom", ts, Some("db"));

        assert_eq!(entry.timestamp(), ts);
        assert_eq!(entry.name(), Some("db"));
        assert_eq!(entry.into_text(), "boom");
    }
}
