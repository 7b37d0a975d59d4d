//! 单行文本格式
//!
//! `DD.MM.YYYY HH:MM:SS.mmm [SEVERITY] [NAME] TEXT`，没有名称时省略整个
//! `[NAME]` 段（包括方括号）。文件和终端输出共用这一格式。

use crate::log::log_entry::LogEntry;
use crate::log::severity::Severity;
use colored::{ColoredString, Colorize};
use std::fmt::Write;

/// 时间戳格式，精确到毫秒
const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M:%S%.3f";

/// 将一条记录追加到缓冲区，不带换行
pub fn format_entry_to(buffer: &mut String, entry: &LogEntry) {
    // 写入 String 不会失败
    let _ = write!(
        buffer,
        "{} [{}] ",
        entry.timestamp().format(TIMESTAMP_FORMAT),
        entry.severity()
    );
    if let Some(name) = entry.name() {
        buffer.push('[');
        buffer.push_str(name);
        buffer.push_str("] ");
    }
    buffer.push_str(entry.text());
}

/// 格式化为一行（不带换行）
pub fn format_entry(entry: &LogEntry) -> String {
    let mut line = String::with_capacity(32 + entry.text().len());
    format_entry_to(&mut line, entry);
    line
}

/// 将整批记录格式化为一段文本，每条一行
pub fn format_batch(buffer: &mut String, entries: &[LogEntry]) {
    for entry in entries {
        format_entry_to(buffer, entry);
        buffer.push('\n');
    }
}

/// 按类别着色：INFO 白色，WARN 黄色，ERROR 红色
pub fn colorize(line: &str, severity: Severity) -> ColoredString {
    match severity {
        Severity::Info => line.white(),
        Severity::Warn => line.yellow(),
        Severity::Error => line.red(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry_at(severity: Severity, text: &str, name: Option<&str>) -> LogEntry {
        let ts = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_milli_opt(7, 5, 1, 42)
            .unwrap()
            .and_utc();
        LogEntry::with_timestamp(severity, text, ts, name)
    }

    #[test]
    fn test_format_without_name() {
        let entry = entry_at(Severity::Info, "service started", None);
        assert_eq!(format_entry(&entry), "09.03.2024 07:05:01.042 [INFO] service started");
    }

    #[test]
    fn test_format_with_name() {
        let entry = entry_at(Severity::Error, "connection refused", Some("db"));
        assert_eq!(
            format_entry(&entry),
            "09.03.2024 07:05:01.042 [ERROR] [db] connection refused"
        );
    }

    #[test]
    fn test_format_batch_one_line_per_entry() {
        let entries = vec![
            entry_at(Severity::Info, "a", None),
            entry_at(Severity::Warn, "b", Some("x")),
        ];
        let mut buffer = String::new();
        format_batch(&mut buffer, &entries);

        assert_eq!(
            buffer,
            "09.03.2024 07:05:01.042 [INFO] a\n09.03.2024 07:05:01.042 [WARN] [x] b\n"
        );
    }

    #[test]
    fn test_colorize_keeps_text() {
        colored::control::set_override(false);
        assert_eq!(colorize("line", Severity::Warn).to_string(), "line");
        colored::control::unset_override();
    }
}
