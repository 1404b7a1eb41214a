use crate::domain::model::{Contact, Customer, NewCustomer};
use crate::utils::error::Result;
use uuid::Uuid;

/// Builds new customers with a freshly generated id. Field validation happens upstream.
pub struct CustomerFactory;

impl CustomerFactory {
    pub fn create(
        name: String,
        birth_date: String,
        is_active: bool,
        addresses: Vec<String>,
        contacts: Vec<Contact>,
    ) -> Result<Customer> {
        Customer::new(
            Uuid::new_v4().to_string(),
            name,
            birth_date,
            is_active,
            addresses,
            contacts,
        )
    }

    pub fn from_payload(payload: NewCustomer) -> Result<Customer> {
        Self::create(
            payload.name,
            payload.birth_date,
            payload.is_active,
            payload.addresses,
            payload.contacts,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn contacts() -> Vec<Contact> {
        vec![Contact::new("jose@example.com", "11987654321", true)]
    }

    #[test]
    fn test_create_assigns_unique_uuid_ids() {
        let ids: HashSet<String> = (0..50)
            .map(|_| {
                CustomerFactory::create(
                    "José".to_string(),
                    "1985-04-23".to_string(),
                    true,
                    vec!["Rua A, 123".to_string()],
                    contacts(),
                )
                .unwrap()
                .id()
                .to_string()
            })
            .collect();

        assert_eq!(ids.len(), 50);
        for id in &ids {
            assert!(Uuid::parse_str(id).is_ok());
        }
    }

    #[test]
    fn test_create_still_enforces_primary_contact() {
        let result = CustomerFactory::create(
            "José".to_string(),
            "1985-04-23".to_string(),
            true,
            vec!["Rua A, 123".to_string()],
            vec![Contact::new("jose@example.com", "1198", false)],
        );
        assert!(result.is_err());
    }
}
