//! # 全局配置构建器模块
//!
//! 提供全局配置的构建器实现，支持链式调用和严格验证

use rat_logger::info;

use crate::config::core::{GlobalConfig, LoggingConfig};
use crate::error::MicroResult;
use crate::serializer::SerializerConfig;

/// 全局配置构建器
///
/// 提供链式配置接口，支持流畅的API调用
#[derive(Debug)]
pub struct GlobalConfigBuilder {
    logging: Option<LoggingConfig>,
    serializer: Option<SerializerConfig>,
}

impl GlobalConfigBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self {
            logging: None,
            serializer: None,
        }
    }

    /// 设置日志配置
    ///
    /// # 参数
    ///
    /// * `logging` - 日志配置
    pub fn logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = Some(logging);
        self
    }

    /// 设置序列化器配置
    ///
    /// # 参数
    ///
    /// * `serializer` - 序列化器配置
    pub fn serializer(mut self, serializer: SerializerConfig) -> Self {
        self.serializer = Some(serializer);
        self
    }

    /// 构建全局配置
    ///
    /// # 错误
    ///
    /// 如果任何必需的配置项未设置，将返回错误
    pub fn build(self) -> MicroResult<GlobalConfig> {
        let logging = self
            .logging
            .ok_or_else(|| crate::quick_error!(config, "日志配置必须设置"))?;

        let serializer = self
            .serializer
            .ok_or_else(|| crate::quick_error!(config, "序列化器配置必须设置"))?;

        info!(
            "创建全局配置: 日志级别={:?}, 输出格式={:?}",
            logging.level, serializer.output_format
        );

        Ok(GlobalConfig { logging, serializer })
    }
}

impl Default for GlobalConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
