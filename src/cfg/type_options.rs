// TypeOptions：带类型名的配置节点

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// 类型选项结构
///
/// `type` 选择注册表中的实现，`options` 原样交给该实现的配置类型反序列化
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeOptions {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default = "empty_options")]
    pub options: JsonValue,
}

fn empty_options() -> JsonValue {
    JsonValue::Object(serde_json::Map::new())
}

impl TypeOptions {
    /// 构造一个 TypeOptions
    pub fn new(type_name: impl Into<String>, options: JsonValue) -> Self {
        Self {
            type_name: type_name.into(),
            options,
        }
    }

    /// 从 JSON 字符串创建（支持 JSON5：注释、尾随逗号、未加引号的键）
    pub fn from_json(json_str: &str) -> Result<Self> {
        Ok(json5::from_str(json_str)?)
    }

    /// 从 YAML 字符串创建
    pub fn from_yaml(yaml_str: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml_str)?)
    }

    /// 从 TOML 字符串创建
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// 导出为 JSON 字符串
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
