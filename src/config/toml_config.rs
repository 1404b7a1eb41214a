use crate::adapters::record::DEFAULT_TABLE_NAME;
use crate::core::ConfigProvider;
use crate::utils::error::{CustomerError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_table_name, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("Invalid env var regex pattern"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub store: StoreConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_table_name")]
    pub table_name: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
}

fn default_table_name() -> String {
    DEFAULT_TABLE_NAME.to_string()
}

fn default_data_dir() -> String {
    "./data".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            table_name: default_table_name(),
            data_dir: default_data_dir(),
        }
    }
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| CustomerError::ConfigError {
            message: format!("Cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| CustomerError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value. Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_PATTERN
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|logging| logging.verbose)
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn table_name(&self) -> &str {
        &self.store.table_name
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_table_name("store.table_name", self.table_name())?;
        validate_non_empty_string("store.data_dir", &self.store.data_dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_to_empty_file() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.table_name(), "Customers");
        assert_eq!(config.store.data_dir, "./data");
        assert!(!config.verbose());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let config = TomlConfig::from_toml_str(
            r#"
            [store]
            table_name = "customers-dev"
            data_dir = "/tmp/customers"

            [logging]
            verbose = true
            "#,
        )
        .unwrap();

        assert_eq!(config.table_name(), "customers-dev");
        assert_eq!(config.store.data_dir, "/tmp/customers");
        assert!(config.verbose());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CUSTOMER_CRUD_TEST_TABLE", "CustomersFromEnv");
        let config = TomlConfig::from_toml_str(
            r#"
            [store]
            table_name = "${CUSTOMER_CRUD_TEST_TABLE}"
            "#,
        )
        .unwrap();
        assert_eq!(config.table_name(), "CustomersFromEnv");

        let unset = TomlConfig::substitute_env_vars("x = \"${CUSTOMER_CRUD_SURELY_UNSET}\"");
        assert_eq!(unset, "x = \"${CUSTOMER_CRUD_SURELY_UNSET}\"");
    }

    #[test]
    fn test_invalid_table_name_fails_validation() {
        let config = TomlConfig::from_toml_str("[store]\ntable_name = \"a/b\"").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[store\n").unwrap_err();
        assert!(matches!(err, CustomerError::ConfigError { .. }));
    }
}
