use crate::config::TsdeadConfig;
use crate::error::{ConfigError, Result};

impl TsdeadConfig {
    /// Validate configuration values that deserialize fine but cannot work.
    pub fn validate(&self) -> Result<()> {
        if self.extensions.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "extensions".to_string(),
                value: "[]".to_string(),
                hint: "List at least one file extension, e.g. [\"ts\", \"tsx\"]".to_string(),
            }
            .into());
        }

        for ext in &self.extensions {
            if ext.is_empty() || ext.starts_with('.') {
                return Err(ConfigError::InvalidValue {
                    field: "extensions".to_string(),
                    value: format!("{ext:?}"),
                    hint: "Extensions are written without the leading dot, e.g. \"ts\"".to_string(),
                }
                .into());
            }
        }

        if self.ignore.iter().any(|ignored| ignored.is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "ignore".to_string(),
                value: "\"\"".to_string(),
                hint: "Ignore entries name whole path components and cannot be empty".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;

    #[test]
    fn default_config_is_valid() {
        assert!(TsdeadConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_empty_extension_list() {
        let config = TsdeadConfig {
            extensions: Vec::new(),
            ..TsdeadConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            CliError::Config(ConfigError::InvalidValue { ref field, .. }) if field == "extensions"
        ));
    }

    #[test]
    fn rejects_dotted_extensions() {
        let config = TsdeadConfig {
            extensions: vec![".ts".to_string()],
            ..TsdeadConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("without the leading dot"));
    }

    #[test]
    fn rejects_empty_ignore_entries() {
        let config = TsdeadConfig {
            ignore: vec![String::new()],
            ..TsdeadConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
