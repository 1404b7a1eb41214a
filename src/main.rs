use anyhow::Context;
use clap::Parser;
use customer_crud::core::handlers::dispatch;
use customer_crud::utils::{logger, validation::Validate};
use customer_crud::{CliConfig, CustomerService, FileCustomerRepository};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = CliConfig::parse();
    config
        .apply_file_config()
        .context("failed to load configuration file")?;

    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let (operation, request) = config.to_request().context("failed to build request")?;

    let repository = FileCustomerRepository::from_config(config.data_dir(), &config);
    let service = CustomerService::new(Arc::new(repository));

    tracing::info!("Running {} against {}", operation, config.data_dir());
    let response = dispatch(&service, Some(operation), request).await;

    println!("{}", response.status_code);
    match response.body_json() {
        Ok(body) => println!("{}", serde_json::to_string_pretty(&body)?),
        Err(_) => println!("{}", response.body),
    }

    if response.status_code >= 400 {
        std::process::exit(1);
    }
    Ok(())
}
