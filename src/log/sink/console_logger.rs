use crate::log::counters::Counters;
use crate::log::error::{LogError, Result};
use crate::log::formatter::{colorize, format_entry};
use crate::log::log_entry::LogEntry;
use crate::log::logger::Logger;
use crate::log::severity::Severity;
use serde::Deserialize;
use smart_default::SmartDefault;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

/// ConsoleLogger 配置
#[derive(Debug, Clone, Deserialize, SmartDefault)]
#[serde(default)]
pub struct ConsoleLoggerConfig {
    /// 是否按类别着色
    #[default = true]
    pub use_colors: bool,
}

/// 终端输出器
///
/// 同步写入标准输出，每条一行
pub struct ConsoleLogger {
    config: ConsoleLoggerConfig,
    counters: Counters,
    closed: AtomicBool,
}

impl ConsoleLogger {
    pub fn new(config: ConsoleLoggerConfig) -> Self {
        Self {
            config,
            counters: Counters::new(),
            closed: AtomicBool::new(false),
        }
    }

    fn render(&self, entry: &LogEntry) -> String {
        let line = format_entry(entry);
        if self.config.use_colors {
            colorize(&line, entry.severity()).to_string()
        } else {
            line
        }
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new(ConsoleLoggerConfig::default())
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, severity: Severity, text: &str, name: Option<&str>) -> Result<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(LogError::Closed);
        }
        self.counters.increment(severity);
        let line = self.render(&LogEntry::new(severity, text, name));

        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", line)?;
        Ok(())
    }

    fn get_entries_count(&self, severity: Severity) -> u64 {
        self.counters.get(severity)
    }

    fn flush(&self) -> Result<()> {
        io::stdout().lock().flush()?;
        Ok(())
    }

    fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        self.flush()
    }
}

impl TryFrom<ConsoleLoggerConfig> for ConsoleLogger {
    type Error = LogError;

    fn try_from(config: ConsoleLoggerConfig) -> Result<Self> {
        Ok(Self::new(config))
    }
}

crate::impl_box_from!(ConsoleLogger => dyn Logger);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_logger_counts() -> Result<()> {
        let logger = ConsoleLogger::new(ConsoleLoggerConfig { use_colors: false });
        logger.info("console info", None)?;
        logger.warn("console warn", Some("ui"))?;
        logger.new_event(Severity::Error, "console error")?;

        for severity in Severity::ALL {
            assert_eq!(logger.get_entries_count(severity), 1);
        }
        logger.flush()?;
        Ok(())
    }

    #[test]
    fn test_render_plain_line() {
        let logger = ConsoleLogger::new(ConsoleLoggerConfig { use_colors: false });
        let entry = LogEntry::new(Severity::Warn, "disk almost full", Some("fs"));
        assert!(logger.render(&entry).ends_with(" [WARN] [fs] disk almost full"));
    }

    #[test]
    fn test_close_rejects_later_calls() -> Result<()> {
        let logger = ConsoleLogger::default();
        logger.info("before", None)?;
        logger.close()?;
        logger.close()?;

        assert!(matches!(logger.info("after", None), Err(LogError::Closed)));
        assert_eq!(logger.get_entries_count(Severity::Info), 1);
        Ok(())
    }

    #[test]
    fn test_default_config_uses_colors() {
        assert!(ConsoleLoggerConfig::default().use_colors);
        let config: ConsoleLoggerConfig = json5::from_str("{}").unwrap();
        assert!(config.use_colors);
    }
}
