use crate::log::error::{LogError, Result};
use crate::log::logger::Logger;
use crate::log::severity::Severity;
use std::sync::Arc;

/// 命名装饰器
///
/// 给被包装 logger 的每次调用补上默认名称，调用方显式传入的名称优先。
/// 不持有计数，也不拥有被包装的 logger。
#[derive(Clone)]
pub struct NamedLogger {
    logger: Arc<dyn Logger>,
    name: String,
}

impl NamedLogger {
    /// 名称不能为空
    pub fn new(logger: Arc<dyn Logger>, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(LogError::invalid_argument("name cannot be empty"));
        }
        Ok(Self { logger, name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Logger for NamedLogger {
    fn log(&self, severity: Severity, text: &str, name: Option<&str>) -> Result<()> {
        let name = name.unwrap_or(self.name.as_str());
        self.logger.log(severity, text, Some(name))
    }

    fn get_entries_count(&self, severity: Severity) -> u64 {
        self.logger.get_entries_count(severity)
    }

    fn flush(&self) -> Result<()> {
        self.logger.flush()
    }

    // 被包装的 logger 由创建者负责关闭
    fn close(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::logger::testing::RecordingLogger;
    use std::sync::atomic::Ordering;

    #[test]
    fn test_rejects_empty_name() {
        let inner: Arc<dyn Logger> = Arc::new(RecordingLogger::default());
        assert!(matches!(
            NamedLogger::new(inner, ""),
            Err(LogError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_bound_name_and_override() -> Result<()> {
        let recorder = Arc::new(RecordingLogger::default());
        let named = NamedLogger::new(recorder.clone(), "X")?;

        named.info("a", None)?;
        named.info("a", Some("Y"))?;
        named.error("b", None)?;
        named.new_event(Severity::Warn, "c")?;

        assert_eq!(
            recorder.names(),
            vec![
                Some("X".to_string()),
                Some("Y".to_string()),
                Some("X".to_string()),
                Some("X".to_string()),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_counts_and_flush_forward() -> Result<()> {
        let recorder = Arc::new(RecordingLogger::default());
        let named = NamedLogger::new(recorder.clone(), "X")?;

        named.warn("w", None)?;
        recorder.warn("direct", None)?;
        named.flush()?;

        assert_eq!(named.get_entries_count(Severity::Warn), 2);
        assert_eq!(recorder.flushes.load(Ordering::SeqCst), 1);
        Ok(())
    }

    #[test]
    fn test_close_leaves_inner_open() -> Result<()> {
        let recorder = Arc::new(RecordingLogger::default());
        let named = NamedLogger::new(recorder.clone(), "X")?;
        named.close()?;

        assert_eq!(recorder.closes.load(Ordering::SeqCst), 0);
        named.info("still works", None)?;
        assert_eq!(recorder.get_entries_count(Severity::Info), 1);
        Ok(())
    }
}
