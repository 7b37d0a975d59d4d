//! cfg 模块 - 配置管理
//!
//! 以 `TypeOptions` 描述"类型 + 选项"，通过按 trait 分组的注册表在运行时构造实现

#[macro_use]
pub mod macros;
pub mod registry;
pub mod serde_duration;
pub mod type_options;

pub use registry::{create_trait_from_type_options, is_registered, register_trait};
pub use serde_duration::{format_duration, parse_duration, HumanDur};
pub use type_options::TypeOptions;
