//! 数据序列化器模块
//!
//! 控制模型实例导出为JSON时的输出格式与UUID文本形式

use rat_logger::info;
use serde::{Deserialize, Serialize};

use crate::error::MicroResult;
use crate::model::ModelInstance;
use crate::types::JsonMap;

/// JSON文本输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// 紧凑输出，无多余空白
    Compact,
    /// 带缩进的美化输出
    Pretty,
}

/// UUID文本形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UuidFormat {
    /// 带连字符的标准形式 `67e55044-10b1-426f-9247-bb680e5fe0c8`
    Hyphenated,
    /// 32位十六进制形式 `67e5504410b1426f9247bb680e5fe0c8`
    Simple,
}

/// 序列化器配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializerConfig {
    /// JSON文本输出格式
    pub output_format: OutputFormat,
    /// UUID字段的输出形式
    pub uuid_format: UuidFormat,
}

impl SerializerConfig {
    /// 创建序列化器配置构建器
    pub fn builder() -> SerializerConfigBuilder {
        SerializerConfigBuilder::new()
    }
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::Compact,
            uuid_format: UuidFormat::Hyphenated,
        }
    }
}

/// 序列化器配置构建器
#[derive(Debug)]
pub struct SerializerConfigBuilder {
    output_format: Option<OutputFormat>,
    uuid_format: Option<UuidFormat>,
}

impl SerializerConfigBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self {
            output_format: None,
            uuid_format: None,
        }
    }

    /// 设置输出格式
    ///
    /// # 参数
    ///
    /// * `format` - JSON文本输出格式
    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    /// 设置UUID输出形式
    ///
    /// # 参数
    ///
    /// * `format` - UUID文本形式
    pub fn uuid_format(mut self, format: UuidFormat) -> Self {
        self.uuid_format = Some(format);
        self
    }

    /// 构建序列化器配置
    ///
    /// # 错误
    ///
    /// 如果任何必需的配置项未设置，将返回错误
    pub fn build(self) -> MicroResult<SerializerConfig> {
        let output_format = self
            .output_format
            .ok_or_else(|| crate::quick_error!(config, "输出格式必须设置"))?;

        let uuid_format = self
            .uuid_format
            .ok_or_else(|| crate::quick_error!(config, "UUID输出形式必须设置"))?;

        info!("创建序列化器配置: 输出格式={:?}, UUID形式={:?}", output_format, uuid_format);

        Ok(SerializerConfig {
            output_format,
            uuid_format,
        })
    }
}

impl Default for SerializerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// 数据序列化器
#[derive(Debug, Clone, Default)]
pub struct DataSerializer {
    config: SerializerConfig,
}

impl DataSerializer {
    pub fn new(config: SerializerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SerializerConfig {
        &self.config
    }

    /// 导出JSON安全的映射
    pub fn serialize(&self, instance: &ModelInstance) -> JsonMap {
        instance.to_serial_dict_with(&self.config)
    }

    /// 按配置的输出格式导出JSON文本
    pub fn to_json(&self, instance: &ModelInstance) -> String {
        instance.to_json_with(&self.config)
    }
}
