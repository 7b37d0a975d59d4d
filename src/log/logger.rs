use crate::log::error::Result;
use crate::log::severity::Severity;
use crate::log::sink::NamedLogger;
use std::sync::Arc;

/// 日志能力契约
///
/// 所有 sink（终端、文件、组合）和装饰器（命名）都实现这个 trait，
/// 调用方只依赖 `Arc<dyn Logger>`。
///
/// 只有 [`Logger::log`] 需要实现，`info` / `warn` / `error` / `new_event`
/// 都转发到它。
pub trait Logger: Send + Sync {
    /// 记录一条日志
    ///
    /// `name` 为可选的来源名称，输出时显示为 `[name]`
    fn log(&self, severity: Severity, text: &str, name: Option<&str>) -> Result<()>;

    /// 记录 INFO 级别日志
    fn info(&self, text: &str, name: Option<&str>) -> Result<()> {
        self.log(Severity::Info, text, name)
    }

    /// 记录 WARN 级别日志
    fn warn(&self, text: &str, name: Option<&str>) -> Result<()> {
        self.log(Severity::Warn, text, name)
    }

    /// 记录 ERROR 级别日志
    fn error(&self, text: &str, name: Option<&str>) -> Result<()> {
        self.log(Severity::Error, text, name)
    }

    /// 按类别分派到 `info` / `warn` / `error`，不带名称
    fn new_event(&self, severity: Severity, text: &str) -> Result<()> {
        match severity {
            Severity::Info => self.info(text, None),
            Severity::Warn => self.warn(text, None),
            Severity::Error => self.error(text, None),
        }
    }

    /// 某类别已接受的条目数，未出现过的类别返回 0
    fn get_entries_count(&self, severity: Severity) -> u64;

    /// 将缓冲中的条目同步写出
    fn flush(&self) -> Result<()>;

    /// 释放持有的资源；重复调用是空操作
    fn close(&self) -> Result<()>;
}

/// `Arc<dyn Logger>` 的便捷扩展
pub trait LoggerExt {
    /// 获取一个带默认名称的视图，可以对同一个 sink 创建任意多个
    fn named(&self, name: &str) -> Result<NamedLogger>;
}

impl LoggerExt for Arc<dyn Logger> {
    fn named(&self, name: &str) -> Result<NamedLogger> {
        NamedLogger::new(Arc::clone(self), name)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::log::counters::Counters;
    use crate::log::error::LogError;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// 记录所有调用的内存 sink，供各模块测试使用
    #[derive(Default)]
    pub struct RecordingLogger {
        pub calls: Mutex<Vec<(Severity, String, Option<String>)>>,
        pub counters: Counters,
        pub flushes: AtomicUsize,
        pub closes: AtomicUsize,
        pub fail_close: AtomicBool,
    }

    impl RecordingLogger {
        pub fn names(&self) -> Vec<Option<String>> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .map(|(_, _, name)| name.clone())
                .collect()
        }
    }

    impl Logger for RecordingLogger {
        fn log(&self, severity: Severity, text: &str, name: Option<&str>) -> Result<()> {
            self.counters.increment(severity);
            self.calls
                .lock()
                .unwrap()
                .push((severity, text.to_string(), name.map(str::to_string)));
            Ok(())
        }

        fn get_entries_count(&self, severity: Severity) -> u64 {
            self.counters.get(severity)
        }

        fn flush(&self) -> Result<()> {
            self.flushes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn close(&self) -> Result<()> {
            self.closes.fetch_add(1, Ordering::SeqCst);
            if self.fail_close.load(Ordering::SeqCst) {
                return Err(LogError::invalid_argument("close failed"));
            }
            Ok(())
        }
    }
}
