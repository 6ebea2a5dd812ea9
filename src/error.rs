//! 错误类型定义模块
//!
//! 定义模型转换、JSON解析、模型定义与配置相关的统一错误类型

use thiserror::Error;

/// rat_micromodels 统一错误类型
///
/// 需要实现 `Clone`：模型元数据缓存会保存构建失败的错误并在每次访问时返回
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MicroModelError {
    /// 原始值无法转换为字段声明的类型
    #[error("字段 '{field}' 转换失败 (原始值: {value}): {message}")]
    ConversionError {
        field: String,
        value: String,
        message: String,
    },

    /// JSON 文本格式错误
    #[error("JSON解析失败: {message}")]
    ParseError { message: String },

    /// 模型定义错误（字段重名、格式字符串无效等）
    #[error("模型 '{model}' 定义错误: {message}")]
    SchemaError { model: String, message: String },

    /// 访问了模型中不存在的字段
    #[error("模型 '{model}' 中不存在字段 '{field}'")]
    UnknownField { model: String, field: String },

    /// 配置错误
    #[error("配置错误: {message}")]
    ConfigError { message: String },

    /// 文件读写错误
    #[error("IO错误: {message}")]
    IoError { message: String },
}

/// rat_micromodels 结果类型
pub type MicroResult<T> = Result<T, MicroModelError>;

impl MicroModelError {
    /// 为转换错误的字段路径添加父级前缀
    ///
    /// 嵌套模型中的转换错误会被逐层包装，最终得到类似 `user.created_at`
    /// 或 `photos[2].url` 的完整路径。其他错误原样返回。
    pub fn nested_under(self, parent: &str) -> Self {
        match self {
            MicroModelError::ConversionError { field, value, message } => {
                let field = if field.starts_with('[') {
                    format!("{}{}", parent, field)
                } else {
                    format!("{}.{}", parent, field)
                };
                MicroModelError::ConversionError { field, value, message }
            }
            other => other,
        }
    }

    /// 错误所指向的字段路径（仅转换错误和未知字段错误）
    pub fn field(&self) -> Option<&str> {
        match self {
            MicroModelError::ConversionError { field, .. } => Some(field),
            MicroModelError::UnknownField { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MicroModelError {
    fn from(err: std::io::Error) -> Self {
        MicroModelError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for MicroModelError {
    fn from(err: serde_json::Error) -> Self {
        MicroModelError::ParseError {
            message: err.to_string(),
        }
    }
}

/// 便捷宏：构造 MicroModelError
#[macro_export]
macro_rules! quick_error {
    (conversion, $field:expr, $value:expr, $message:expr) => {
        $crate::error::MicroModelError::ConversionError {
            field: $field.to_string(),
            value: $value.to_string(),
            message: $message.to_string(),
        }
    };
    (parse, $message:expr) => {
        $crate::error::MicroModelError::ParseError {
            message: $message.to_string(),
        }
    };
    (schema, $model:expr, $message:expr) => {
        $crate::error::MicroModelError::SchemaError {
            model: $model.to_string(),
            message: $message.to_string(),
        }
    };
    (unknown_field, $model:expr, $field:expr) => {
        $crate::error::MicroModelError::UnknownField {
            model: $model.to_string(),
            field: $field.to_string(),
        }
    };
    (config, $message:expr) => {
        $crate::error::MicroModelError::ConfigError {
            message: $message.to_string(),
        }
    };
}
