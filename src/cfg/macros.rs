//! 配置注册相关的宏定义

/// 为 Box<T> 实现到 Box<dyn Trait> 的转换，供 `register_trait` 使用
///
/// 用法：`impl_box_from!(Type => dyn TraitName)`
#[macro_export]
macro_rules! impl_box_from {
    ($source_type:ty => dyn $trait_name:path) => {
        impl From<Box<$source_type>> for Box<dyn $trait_name> {
            fn from(source: Box<$source_type>) -> Self {
                source as Box<dyn $trait_name>
            }
        }
    };
}
