//! rat_micromodels - 声明式模型编解码库
//!
//! 通过显式声明的字段元数据，在原始映射/JSON文本与类型化模型实例之间双向转换。
//! 支持嵌套模型、模型列表、同类字段列表与按实例添加的动态字段

// 导出所有公共模块
pub mod codec;
pub mod config;
pub mod error;
pub mod i18n;
pub mod model;
pub mod serializer;
pub mod types;

// 重新导出常用类型和函数
pub use codec::{decode, encode, encode_pretty};
pub use config::{
    GlobalConfig, GlobalConfigBuilder, LogLevel, LoggingConfig, LoggingConfigBuilder,
    SerializerConfigBuilder,
};
pub use error::{MicroModelError, MicroResult};
pub use model::{
    DynamicField, FieldDefinition, FieldType, Model, ModelInstance, ModelSchema,
    ModelSchemaBuilder, boolean_field, char_field, date_field, datetime_field, decimal_field,
    field_collection_field, float_field, integer_field, json_field, model_collection_field,
    model_field, time_field, uuid_field,
};
pub use serializer::{DataSerializer, OutputFormat, SerializerConfig, UuidFormat};
pub use types::{DataMap, DataValue, JsonMap, json_value_to_data_value};

// 宏展开后使用
#[doc(hidden)]
pub use once_cell;
#[doc(hidden)]
pub use rat_logger;

// 日志系统导入
use rat_logger::info;

// 条件编译调试宏 - 只有在 debug 模式下才输出调试信息
#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        $crate::rat_logger::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        // 在 release 模式下不输出调试信息
    };
}

/// 初始化rat_micromodels库
///
/// 初始化多语言错误消息系统
///
/// 注意：日志系统由调用者自行初始化，本库不会自动初始化日志
pub fn init() {
    i18n::ErrorMessageI18n::init();
}

/// 按全局配置初始化rat_micromodels库
///
/// 在 `init()` 的基础上按 `config.logging` 安装终端日志
pub fn init_with_config(config: &GlobalConfig) -> MicroResult<()> {
    init();
    config.logging.init_logger()?;
    info!("{} 初始化完成", get_info());
    Ok(())
}

/// 库版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 库名称
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// 获取库信息
pub fn get_info() -> String {
    format!("{} v{}", NAME, VERSION)
}
