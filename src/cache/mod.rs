//! 缓存层
//!
//! 通过 `ObjectCache` trait 抽象缓存后端，内置 Moka（进程内）与 Redis 两种实现。
//! 后端通过 `declare_object_cache_plugin!` 在进程启动时注册到插件注册表，
//! 运行时按配置选择。

pub mod object_cache;
pub mod register;
mod traits;

pub use traits::{CacheResult, ObjectCache};

/// 注册缓存插件的宏
///
/// 在实现文件中调用一次，进程启动时自动把构造函数注册到插件注册表。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $wrapper:ident) => {
        #[ctor::ctor]
        fn __register_object_cache_plugin() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                std::sync::Arc::new(|| {
                    Box::pin(async {
                        let cache = $wrapper::new()
                            .map_err($crate::errors::EvalSystemError::cache_connection)?;
                        Ok(Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                    }) as $crate::cache::register::BoxedObjectCacheFuture
                }),
            );
        }
    };
}
