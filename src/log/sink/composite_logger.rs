use crate::cfg::TypeOptions;
use crate::log::counters::Counters;
use crate::log::error::{LogError, Result};
use crate::log::logger::Logger;
use crate::log::severity::Severity;
use crate::log::sink::registry::create_logger_from_options;
use serde::Deserialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// CompositeLogger 配置：按顺序列出子 logger
#[derive(Debug, Clone, Deserialize)]
pub struct CompositeLoggerConfig {
    pub loggers: Vec<TypeOptions>,
}

/// 扇出组合
///
/// 每次调用先累加自己的计数，再按顺序同步转发给所有子 logger。
/// 子 logger 之间没有隔离：前一个阻塞，后面的都会被推迟。
pub struct CompositeLogger {
    loggers: Vec<Arc<dyn Logger>>,
    counters: Counters,
    closed: AtomicBool,
}

impl CompositeLogger {
    /// 子 logger 列表不能为空
    pub fn new(loggers: Vec<Arc<dyn Logger>>) -> Result<Self> {
        if loggers.is_empty() {
            return Err(LogError::invalid_argument(
                "composite logger needs at least one logger",
            ));
        }
        Ok(Self {
            loggers,
            counters: Counters::new(),
            closed: AtomicBool::new(false),
        })
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(LogError::Closed);
        }
        Ok(())
    }

    /// 对每个子 logger 执行 `op`，全部尝试完，返回第一个错误
    fn for_each(&self, op: impl Fn(&dyn Logger) -> Result<()>) -> Result<()> {
        let mut first_error = None;
        for logger in &self.loggers {
            if let Err(err) = op(logger.as_ref()) {
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

impl Logger for CompositeLogger {
    fn log(&self, severity: Severity, text: &str, name: Option<&str>) -> Result<()> {
        self.ensure_open()?;
        self.counters.increment(severity);
        self.for_each(|logger| logger.log(severity, text, name))
    }

    fn new_event(&self, severity: Severity, text: &str) -> Result<()> {
        self.ensure_open()?;
        self.counters.increment(severity);
        self.for_each(|logger| logger.new_event(severity, text))
    }

    fn get_entries_count(&self, severity: Severity) -> u64 {
        self.counters.get(severity)
    }

    fn flush(&self) -> Result<()> {
        self.for_each(|logger| logger.flush())
    }

    fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        self.for_each(|logger| logger.close())
    }
}

impl TryFrom<CompositeLoggerConfig> for CompositeLogger {
    type Error = anyhow::Error;

    fn try_from(config: CompositeLoggerConfig) -> anyhow::Result<Self> {
        let loggers = config
            .loggers
            .iter()
            .map(create_logger_from_options)
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Self::new(loggers)?)
    }
}

crate::impl_box_from!(CompositeLogger => dyn Logger);
