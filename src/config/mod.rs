pub mod cli;
#[cfg(feature = "lambda")]
pub mod lambda;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use args::{CliConfig, Command, PayloadArgs};

#[cfg(feature = "cli")]
mod args {
    use crate::adapters::record::DEFAULT_TABLE_NAME;
    use crate::config::toml_config::TomlConfig;
    use crate::core::handlers::{ApiRequest, Operation};
    use crate::core::ConfigProvider;
    use crate::utils::error::{CustomerError, Result};
    use crate::utils::validation::{validate_non_empty_string, validate_table_name, Validate};
    use clap::{Args, Parser, Subcommand};
    use std::path::PathBuf;

    const DEFAULT_DATA_DIR: &str = "./data";

    #[derive(Debug, Clone, Parser)]
    #[command(name = "customer-crud")]
    #[command(about = "Create, read, update and delete customers in a local store")]
    pub struct CliConfig {
        #[arg(long, global = true, help = "Directory holding the customer tables [default: ./data]")]
        pub data_dir: Option<String>,

        #[arg(long, global = true, help = "Table name [default: Customers]")]
        pub table: Option<String>,

        #[arg(long, global = true, help = "TOML file with [store] and [logging] sections")]
        pub config: Option<PathBuf>,

        #[arg(long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Create a customer from a JSON payload
        Create(PayloadArgs),
        /// Print one customer
        Get { id: String },
        /// Change the fields present in a JSON payload
        Update {
            id: String,
            #[command(flatten)]
            payload: PayloadArgs,
        },
        /// Remove a customer
        Delete { id: String },
    }

    #[derive(Debug, Clone, Args)]
    pub struct PayloadArgs {
        #[arg(long, conflicts_with = "file", help = "Inline JSON body")]
        pub payload: Option<String>,

        #[arg(long, help = "Path to a JSON body")]
        pub file: Option<PathBuf>,
    }

    impl PayloadArgs {
        fn read(&self) -> Result<Option<String>> {
            match (&self.payload, &self.file) {
                (Some(payload), _) => Ok(Some(payload.clone())),
                (None, Some(path)) => std::fs::read_to_string(path).map(Some).map_err(|e| {
                    CustomerError::ConfigError {
                        message: format!("Cannot read payload file {}: {}", path.display(), e),
                    }
                }),
                (None, None) => Ok(None),
            }
        }
    }

    impl CliConfig {
        /// Fills options not given on the command line from the `--config` file.
        pub fn apply_file_config(&mut self) -> Result<()> {
            let Some(path) = &self.config else {
                return Ok(());
            };

            let file = TomlConfig::from_file(path)?;
            file.validate()?;

            self.verbose |= file.verbose();
            self.table.get_or_insert_with(|| file.table_name().to_string());
            self.data_dir.get_or_insert(file.store.data_dir);
            Ok(())
        }

        pub fn data_dir(&self) -> &str {
            self.data_dir.as_deref().unwrap_or(DEFAULT_DATA_DIR)
        }

        /// Translates the subcommand into the request the handlers expect.
        pub fn to_request(&self) -> Result<(Operation, ApiRequest)> {
            let request = match &self.command {
                Command::Create(payload) => {
                    let mut request = ApiRequest::default().method("POST");
                    request.body = payload.read()?;
                    (Operation::Create, request)
                }
                Command::Get { id } => (Operation::Get, ApiRequest::with_id(id).method("GET")),
                Command::Update { id, payload } => {
                    let mut request = ApiRequest::with_id(id).method("PATCH");
                    request.body = payload.read()?;
                    (Operation::Update, request)
                }
                Command::Delete { id } => {
                    (Operation::Delete, ApiRequest::with_id(id).method("DELETE"))
                }
            };
            Ok(request)
        }
    }

    impl ConfigProvider for CliConfig {
        fn table_name(&self) -> &str {
            self.table.as_deref().unwrap_or(DEFAULT_TABLE_NAME)
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_table_name("table", self.table_name())?;
            validate_non_empty_string("data_dir", self.data_dir())?;
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_create_with_inline_payload() {
            let config =
                CliConfig::try_parse_from(["customer-crud", "create", "--payload", "{}"]).unwrap();
            let (operation, request) = config.to_request().unwrap();

            assert_eq!(operation, Operation::Create);
            assert_eq!(request.body.as_deref(), Some("{}"));
            assert_eq!(config.table_name(), "Customers");
            assert_eq!(config.data_dir(), "./data");
        }

        #[test]
        fn test_global_options_after_subcommand() {
            let config = CliConfig::try_parse_from([
                "customer-crud",
                "get",
                "abc",
                "--table",
                "CustomersDev",
                "--data-dir",
                "/tmp/x",
            ])
            .unwrap();

            let (operation, request) = config.to_request().unwrap();
            assert_eq!(operation, Operation::Get);
            assert_eq!(request.path_parameters.unwrap()["id"], "abc");
            assert_eq!(config.table_name(), "CustomersDev");
            assert_eq!(config.data_dir(), "/tmp/x");
        }

        #[test]
        fn test_payload_and_file_conflict() {
            let result = CliConfig::try_parse_from([
                "customer-crud",
                "update",
                "abc",
                "--payload",
                "{}",
                "--file",
                "body.json",
            ]);
            assert!(result.is_err());
        }

        #[test]
        fn test_file_config_fills_unset_options_only() {
            let temp_dir = tempfile::TempDir::new().unwrap();
            let path = temp_dir.path().join("customers.toml");
            std::fs::write(
                &path,
                "[store]\ntable_name = \"FromFile\"\ndata_dir = \"/srv/data\"\n[logging]\nverbose = true\n",
            )
            .unwrap();

            let mut config = CliConfig::try_parse_from([
                "customer-crud",
                "delete",
                "abc",
                "--table",
                "FromFlag",
                "--config",
                path.to_str().unwrap(),
            ])
            .unwrap();
            config.apply_file_config().unwrap();

            assert_eq!(config.table_name(), "FromFlag");
            assert_eq!(config.data_dir(), "/srv/data");
            assert!(config.verbose);
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_file_config_supplies_table_when_flag_absent() {
            let temp_dir = tempfile::TempDir::new().unwrap();
            let path = temp_dir.path().join("customers.toml");
            std::fs::write(&path, "[store]\ntable_name = \"CustomersDev\"\n").unwrap();

            let mut config = CliConfig::try_parse_from([
                "customer-crud",
                "get",
                "abc",
                "--config",
                path.to_str().unwrap(),
            ])
            .unwrap();
            config.apply_file_config().unwrap();

            assert_eq!(config.table_name(), "CustomersDev");
            assert_eq!(config.data_dir(), "./data");
            assert!(!config.verbose);
        }

        #[test]
        fn test_missing_payload_file_is_config_error() {
            let config = CliConfig::try_parse_from([
                "customer-crud",
                "create",
                "--file",
                "/definitely/not/here.json",
            ])
            .unwrap();
            let err = config.to_request().unwrap_err();
            assert!(matches!(err, CustomerError::ConfigError { .. }));
        }
    }
}
