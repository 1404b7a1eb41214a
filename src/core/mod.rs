pub mod handlers;
pub mod service;

pub use crate::domain::model::{Contact, Customer, CustomerPatch, NewCustomer};
pub use crate::domain::ports::{ConfigProvider, CustomerRepository};
pub use crate::utils::error::Result;
