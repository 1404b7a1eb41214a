use crate::utils::error::{CustomerError, Result};
use serde::{Deserialize, Serialize};

pub const PRIMARY_CONTACT_REQUIRED: &str = "At least one contact must be marked as primary.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub email: String,
    pub phone: String,
    pub is_primary: bool,
}

impl Contact {
    pub fn new(email: impl Into<String>, phone: impl Into<String>, is_primary: bool) -> Self {
        Self {
            email: email.into(),
            phone: phone.into(),
            is_primary,
        }
    }
}

/// A customer with at least one primary contact.
///
/// The invariant is checked by [`Customer::new`] and can be re-checked after in-place
/// mutation with [`Customer::ensure_invariants`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    id: String,
    pub name: String,
    pub birth_date: String,
    pub is_active: bool,
    pub addresses: Vec<String>,
    pub contacts: Vec<Contact>,
}

impl Customer {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        birth_date: impl Into<String>,
        is_active: bool,
        addresses: Vec<String>,
        contacts: Vec<Contact>,
    ) -> Result<Self> {
        let customer = Self {
            id: id.into(),
            name: name.into(),
            birth_date: birth_date.into(),
            is_active,
            addresses,
            contacts,
        };
        customer.ensure_invariants()?;
        Ok(customer)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn ensure_invariants(&self) -> Result<()> {
        if !self.contacts.iter().any(|contact| contact.is_primary) {
            return Err(CustomerError::validation(PRIMARY_CONTACT_REQUIRED));
        }
        Ok(())
    }

    pub fn toggle_active_status(&mut self) {
        self.is_active = !self.is_active;
    }

    /// Overwrites each field the patch carries and leaves the rest untouched.
    pub fn apply_patch(&mut self, patch: CustomerPatch) {
        let CustomerPatch {
            name,
            birth_date,
            is_active,
            addresses,
            contacts,
        } = patch;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(birth_date) = birth_date {
            self.birth_date = birth_date;
        }
        if let Some(is_active) = is_active {
            self.is_active = is_active;
        }
        if let Some(addresses) = addresses {
            self.addresses = address_set(&addresses);
        }
        if let Some(contacts) = contacts {
            self.contacts = contacts;
        }
    }
}

/// Drops repeated addresses, keeping the first occurrence of each.
pub fn address_set(addresses: &[String]) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(addresses.len());
    for address in addresses {
        if !unique.contains(address) {
            unique.push(address.clone());
        }
    }
    unique
}

/// Complete creation payload, produced by the full-payload validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub birth_date: String,
    pub is_active: bool,
    pub addresses: Vec<String>,
    pub contacts: Vec<Contact>,
}

/// Request payload where every field is optional. `None` means the caller did not send it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addresses: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contacts: Option<Vec<Contact>>,
}

impl CustomerPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.birth_date.is_none()
            && self.is_active.is_none()
            && self.addresses.is_none()
            && self.contacts.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn primary() -> Contact {
        Contact::new("jose@example.com", "11987654321", true)
    }

    fn sample() -> Customer {
        Customer::new(
            "123",
            "José da Silva",
            "1985-04-23",
            true,
            vec!["Rua A, 123".to_string()],
            vec![primary()],
        )
        .unwrap()
    }

    #[test]
    fn test_new_rejects_missing_primary_contact() {
        let result = Customer::new(
            "123",
            "José",
            "1985-04-23",
            true,
            vec!["Rua A, 123".to_string()],
            vec![Contact::new("jose@example.com", "1198", false)],
        );
        let err = result.unwrap_err();
        assert!(matches!(err, CustomerError::ValidationError { .. }));
        assert_eq!(err.to_string(), PRIMARY_CONTACT_REQUIRED);
    }

    #[test]
    fn test_new_rejects_empty_contacts() {
        let result = Customer::new("1", "José", "1985-04-23", true, vec![], vec![]);
        assert!(result.is_err());
    }

    #[test]
    fn test_toggle_active_status() {
        let mut customer = sample();
        customer.toggle_active_status();
        assert!(!customer.is_active);
        customer.toggle_active_status();
        assert!(customer.is_active);
    }

    #[test]
    fn test_apply_patch_only_touches_supplied_fields() {
        let mut customer = sample();
        let before = customer.clone();

        customer.apply_patch(CustomerPatch {
            name: Some("José Santos".to_string()),
            ..Default::default()
        });

        assert_eq!(customer.name, "José Santos");
        assert_eq!(customer.id(), before.id());
        assert_eq!(customer.birth_date, before.birth_date);
        assert_eq!(customer.is_active, before.is_active);
        assert_eq!(customer.addresses, before.addresses);
        assert_eq!(customer.contacts, before.contacts);
    }

    #[test]
    fn test_apply_patch_accepts_false_is_active() {
        let mut customer = sample();
        customer.apply_patch(CustomerPatch {
            is_active: Some(false),
            ..Default::default()
        });
        assert!(!customer.is_active);
    }

    #[test]
    fn test_apply_patch_drops_repeated_addresses() {
        let mut customer = sample();
        customer.apply_patch(CustomerPatch {
            addresses: Some(vec![
                "Rua B, 7".to_string(),
                "Rua A, 123".to_string(),
                "Rua B, 7".to_string(),
            ]),
            ..Default::default()
        });
        assert_eq!(customer.addresses, vec!["Rua B, 7", "Rua A, 123"]);
    }

    #[test]
    fn test_patch_deserializes_absent_and_null_as_none() {
        let patch: CustomerPatch =
            serde_json::from_str(r#"{"name":"X","birthDate":null}"#).unwrap();
        assert_eq!(patch.name.as_deref(), Some("X"));
        assert!(patch.birth_date.is_none());
        assert!(patch.is_active.is_none());
        assert!(!patch.is_empty());
        assert!(CustomerPatch::default().is_empty());
    }

    #[test]
    fn test_customer_serializes_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["id"], "123");
        assert_eq!(json["birthDate"], "1985-04-23");
        assert_eq!(json["isActive"], true);
        assert_eq!(json["contacts"][0]["isPrimary"], true);
    }
}
