pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

#[cfg(feature = "lambda")]
pub use crate::config::lambda::{DynamoCustomerRepository, LambdaConfig};

pub use crate::adapters::memory::InMemoryCustomerRepository;
pub use crate::config::cli::FileCustomerRepository;
pub use crate::core::handlers::{ApiRequest, ApiResponse, Operation};
pub use crate::core::service::CustomerService;
pub use crate::domain::model::{Contact, Customer, CustomerPatch, NewCustomer};
pub use crate::utils::error::{CustomerError, Result};
