mod composite_logger;
mod console_logger;
mod file_logger;
mod named_logger;
mod registry;

pub use composite_logger::{CompositeLogger, CompositeLoggerConfig};
pub use console_logger::{ConsoleLogger, ConsoleLoggerConfig};
pub use file_logger::{ErrorHandler, FileLogger, FileLoggerConfig};
pub use named_logger::NamedLogger;
pub use registry::{create_logger_from_options, register_loggers};
