// 按 trait 分组的类型注册表和工厂函数

use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::type_options::TypeOptions;

// 返回的 Box<dyn Any> 内部实际装的是 Box<dyn Trait>
type TraitConstructor = Arc<dyn Fn(JsonValue) -> Result<Box<dyn Any + Send + Sync>> + Send + Sync>;

// 外层 key 是 Trait 的 TypeId，内层 key 是类型名称
static TRAIT_REGISTRY: Lazy<RwLock<HashMap<TypeId, HashMap<String, TraitConstructor>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// 为实现特定 Trait 的类型注册构造函数
///
/// 构造可能失败（例如文件无法打开），因此要求 `T: TryFrom<Config>`，
/// 错误会原样从 [`create_trait_from_type_options`] 返回。
///
/// # 示例
/// ```ignore
/// register_trait::<FileLogger, dyn Logger, FileLoggerConfig>("FileLogger")?;
///
/// let logger: Box<dyn Logger> = create_trait_from_type_options(&type_options)?;
/// ```
pub fn register_trait<T, Trait, Config>(type_name: &str) -> Result<()>
where
    T: TryFrom<Config> + Send + Sync + 'static,
    <T as TryFrom<Config>>::Error: Into<anyhow::Error>,
    Trait: ?Sized + Send + Sync + 'static,
    Config: DeserializeOwned + Send + Sync + 'static,
    Box<T>: Into<Box<Trait>>,
{
    let constructor: TraitConstructor = Arc::new(|value: JsonValue| -> Result<Box<dyn Any + Send + Sync>> {
        let config: Config = serde_json::from_value(value)?;
        let instance = T::try_from(config).map_err(Into::<anyhow::Error>::into)?;
        let trait_object: Box<Trait> = Box::new(instance).into();
        Ok(Box::new(trait_object) as Box<dyn Any + Send + Sync>)
    });

    let mut registry = TRAIT_REGISTRY
        .write()
        .map_err(|_| anyhow!("Failed to acquire write lock"))?;
    registry
        .entry(TypeId::of::<Trait>())
        .or_default()
        .insert(type_name.to_string(), constructor);

    Ok(())
}

/// 检查某个类型名是否已为 Trait 注册
pub fn is_registered<Trait>(type_name: &str) -> bool
where
    Trait: ?Sized + 'static,
{
    TRAIT_REGISTRY
        .read()
        .map(|registry| {
            registry
                .get(&TypeId::of::<Trait>())
                .is_some_and(|types| types.contains_key(type_name))
        })
        .unwrap_or(false)
}

/// 根据 TypeOptions 创建 trait object
///
/// 构造函数在释放读锁之后执行，嵌套配置（如组合 logger）可以递归调用本函数。
pub fn create_trait_from_type_options<Trait>(type_options: &TypeOptions) -> Result<Box<Trait>>
where
    Trait: ?Sized + Send + Sync + 'static,
{
    let constructor = {
        let registry = TRAIT_REGISTRY
            .read()
            .map_err(|_| anyhow!("Failed to acquire read lock"))?;
        let types = registry
            .get(&TypeId::of::<Trait>())
            .ok_or_else(|| anyhow!("No implementations registered for trait"))?;
        let constructor = types.get(&type_options.type_name).ok_or_else(|| {
            anyhow!(
                "Type '{}' not registered for this trait",
                type_options.type_name
            )
        })?;
        Arc::clone(constructor)
    };

    constructor(type_options.options.clone())?
        .downcast::<Box<Trait>>()
        .map(|boxed| *boxed)
        .map_err(|_| anyhow!("Failed to downcast to target trait type"))
}
