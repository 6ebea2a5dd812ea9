//! # 配置管理模块
//!
//! 提供统一的配置管理系统，支持构建器模式和链式配置
//! 构建器要求所有配置项显式设置，未设置的项返回配置错误

pub mod builders;
pub mod core;

pub use builders::{GlobalConfigBuilder, LoggingConfigBuilder, SerializerConfigBuilder};
pub use core::{GlobalConfig, LogLevel, LoggingConfig};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MicroModelError;
    use crate::serializer::{OutputFormat, SerializerConfig, UuidFormat};

    fn sample_config() -> GlobalConfig {
        GlobalConfig::builder()
            .logging(
                LoggingConfig::builder()
                    .level(LogLevel::Debug)
                    .console(false)
                    .build()
                    .unwrap(),
            )
            .serializer(
                SerializerConfig::builder()
                    .output_format(OutputFormat::Pretty)
                    .uuid_format(UuidFormat::Simple)
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_builders_reject_missing_items() {
        let err = LoggingConfig::builder().level(LogLevel::Info).build().unwrap_err();
        assert!(matches!(err, MicroModelError::ConfigError { .. }));

        let err = GlobalConfig::builder().build().unwrap_err();
        assert!(matches!(err, MicroModelError::ConfigError { .. }));
    }

    #[test]
    fn test_toml_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("micromodels.toml");
        let config = sample_config();

        config.save_to_file(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("[logging]"));
        assert_eq!(GlobalConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_json_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("micromodels.json");
        let config = sample_config();

        config.save_to_file(&path).unwrap();
        assert_eq!(GlobalConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = GlobalConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, MicroModelError::IoError { .. }));
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{\"logging\": ").unwrap();
        let err = GlobalConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, MicroModelError::ConfigError { .. }));
    }
}
