use crate::domain::model::{address_set, Contact, Customer};
use crate::utils::error::{CustomerError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TABLE_NAME: &str = "Customers";

/// Persisted shape of a customer, keyed by `id`.
///
/// `addresses` follows string-set semantics (no duplicates, order not guaranteed by the
/// store) and `contacts` is an opaque JSON-encoded array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRecord {
    pub id: String,
    pub name: String,
    pub birth_date: String,
    pub is_active: bool,
    pub addresses: Vec<String>,
    pub contacts: String,
}

impl CustomerRecord {
    pub fn from_customer(customer: &Customer) -> Result<Self> {
        let contacts = serde_json::to_string(&customer.contacts).map_err(|e| {
            CustomerError::application(format!("Failed to encode customer contacts: {}", e))
        })?;

        Ok(Self {
            id: customer.id().to_string(),
            name: customer.name.clone(),
            birth_date: customer.birth_date.clone(),
            is_active: customer.is_active,
            addresses: address_set(&customer.addresses),
            contacts,
        })
    }

    pub fn into_customer(self) -> Result<Customer> {
        let contacts: Vec<Contact> = serde_json::from_str(&self.contacts).map_err(|e| {
            CustomerError::application(format!(
                "Failed to decode contacts of customer {}: {}",
                self.id, e
            ))
        })?;

        Customer::new(
            self.id.clone(),
            self.name,
            self.birth_date,
            self.is_active,
            self.addresses,
            contacts,
        )
        .map_err(|e| {
            CustomerError::application(format!("Stored customer {} is invalid: {}", self.id, e))
        })
    }
}
