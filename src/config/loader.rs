//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Values supplied on the command line, applied on top of the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub bind_address: Option<String>,
    pub database_url: Option<String>,
}

impl ConfigOverrides {
    fn apply(&self, config: &mut ServiceConfig) {
        if let Some(bind) = &self.bind_address {
            config.listener.bind_address = bind.clone();
        }
        if let Some(url) = &self.database_url {
            config.database.url = url.clone();
        }
    }
}

/// Parse a TOML file without validating it.
pub fn read_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Load the file (or defaults), apply overrides, then validate once.
pub fn load_config(
    path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<ServiceConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => ServiceConfig::default(),
    };
    overrides.apply(&mut config);

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[listener]\nbind_address = \"0.0.0.0:8000\"").unwrap();

        let config = load_config(Some(file.path()), &ConfigOverrides::default()).unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8000");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config(Some(Path::new("/definitely/not/here.toml")), &ConfigOverrides::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[listener\nbind_address = 5").unwrap();

        let err = load_config(Some(file.path()), &ConfigOverrides::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[timeouts]\nrequest_secs = 0").unwrap();

        let err = load_config(Some(file.path()), &ConfigOverrides::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("timeouts.request_secs"));
    }

    #[test]
    fn test_override_replaces_invalid_file_value() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[listener]\nbind_address = \"not-an-address\"").unwrap();

        let err = load_config(Some(file.path()), &ConfigOverrides::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        let overrides = ConfigOverrides {
            bind_address: Some("127.0.0.1:7000".into()),
            database_url: Some("sqlite://data/climate.sqlite".into()),
        };
        let config = load_config(Some(file.path()), &overrides).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:7000");
        assert_eq!(config.database.url, "sqlite://data/climate.sqlite");
    }

    #[test]
    fn test_invalid_override_rejected() {
        let overrides = ConfigOverrides {
            bind_address: Some("nowhere".into()),
            database_url: None,
        };
        let err = load_config(None, &overrides).unwrap_err();
        assert!(err.to_string().contains("listener.bind_address"));
    }
}
