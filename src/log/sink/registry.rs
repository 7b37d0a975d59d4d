use crate::cfg::{create_trait_from_type_options, register_trait, TypeOptions};
use crate::log::logger::Logger;
use crate::log::sink::{
    composite_logger::{CompositeLogger, CompositeLoggerConfig},
    console_logger::{ConsoleLogger, ConsoleLoggerConfig},
    file_logger::{FileLogger, FileLoggerConfig},
};
use anyhow::Result;
use std::sync::{Arc, Once};

static REGISTER_ONCE: Once = Once::new();

/// 注册所有 Logger 实现
pub fn register_loggers() -> Result<()> {
    register_trait::<ConsoleLogger, dyn Logger, ConsoleLoggerConfig>("ConsoleLogger")?;
    register_trait::<FileLogger, dyn Logger, FileLoggerConfig>("FileLogger")?;
    register_trait::<CompositeLogger, dyn Logger, CompositeLoggerConfig>("CompositeLogger")?;
    Ok(())
}

/// 从 TypeOptions 创建 Logger
///
/// 第一次调用时自动注册内置实现；`CompositeLogger` 的子配置递归经过这里。
///
/// # 示例
///
/// ```no_run
/// use sinklog::cfg::TypeOptions;
/// use sinklog::log::create_logger_from_options;
///
/// let opts = TypeOptions::from_json(r#"
///     {
///         type: "CompositeLogger",
///         options: {
///             loggers: [
///                 { type: "ConsoleLogger", options: { use_colors: true } },
///                 { type: "FileLogger", options: { file_path: "/tmp/app.log", flush_interval: "50ms" } },
///             ]
///         }
///     }
/// "#)?;
/// let logger = create_logger_from_options(&opts)?;
/// logger.info("hello", None)?;
/// logger.close()?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn create_logger_from_options(options: &TypeOptions) -> Result<Arc<dyn Logger>> {
    let mut registered = Ok(());
    REGISTER_ONCE.call_once(|| registered = register_loggers());
    registered?;

    let logger: Box<dyn Logger> = create_trait_from_type_options(options)?;
    Ok(Arc::from(logger))
}
