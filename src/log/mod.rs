//! 日志模块
//!
//! 一组可互换的 sink，实现同一个 [`Logger`] 能力契约：
//!
//! - [`ConsoleLogger`]：同步写终端，按类别着色
//! - [`FileLogger`]：内存缓冲，后台线程定时整批追加到文件
//! - [`CompositeLogger`]：按顺序扇出到多个 logger
//! - [`NamedLogger`]：为被包装的 logger 补上默认名称
//!
//! # 快速开始
//!
//! ```rust,no_run
//! use sinklog::log::*;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! fn main() -> anyhow::Result<()> {
//!     let console: Arc<dyn Logger> = Arc::new(ConsoleLogger::default());
//!     let file: Arc<dyn Logger> = Arc::new(FileLogger::with_error_handler(
//!         FileLoggerConfig::new("/tmp/app.log", Duration::from_millis(50)),
//!         |err, lost| eprintln!("dropped {} entries: {}", lost.len(), err),
//!     )?);
//!     let logger: Arc<dyn Logger> = Arc::new(CompositeLogger::new(vec![console, file])?);
//!
//!     let db = logger.named("db")?;
//!     db.info("connected", None)?;
//!     db.warn("slow query", Some("db.query"))?;
//!
//!     logger.close()?;
//!     Ok(())
//! }
//! ```

pub mod counters;
pub mod error;
pub mod formatter;
pub mod log_entry;
pub mod logger;
pub mod severity;
pub mod sink;

pub use counters::Counters;
pub use error::{LogError, Result};
pub use log_entry::LogEntry;
pub use logger::{Logger, LoggerExt};
pub use severity::Severity;
pub use sink::{
    create_logger_from_options, register_loggers, CompositeLogger, CompositeLoggerConfig,
    ConsoleLogger, ConsoleLoggerConfig, ErrorHandler, FileLogger, FileLoggerConfig, NamedLogger,
};
