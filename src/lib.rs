//! sinklog - 多 sink 日志库
//!
//! ## 模块
//!
//! - **cfg**: 配置管理（`TypeOptions` + 按 trait 注册的构造器）
//! - **log**: 日志能力契约与终端、文件、组合、命名四种实现
//!
//! 核心是带缓冲的文件 sink：生产者只做无锁入队，后台线程定时整批追加写入，
//! 关闭时保证最后一次刷新，写入失败通过回调上报丢失的条目。

pub mod cfg;
pub mod log;

pub use cfg::TypeOptions;
pub use log::{
    CompositeLogger, ConsoleLogger, FileLogger, FileLoggerConfig, LogEntry, LogError, Logger,
    LoggerExt, NamedLogger, Severity,
};
