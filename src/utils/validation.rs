use crate::domain::model::{Contact, CustomerPatch, NewCustomer, PRIMARY_CONTACT_REQUIRED};
use crate::utils::error::{CustomerError, Result};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

pub const NAME_REQUIRED: &str = "Name is required and must be a non-empty string.";
pub const INVALID_BIRTH_DATE: &str = "Birth date must be in the format YYYY-MM-DD.";
pub const IS_ACTIVE_REQUIRED: &str = "isActive is required and must be a boolean.";
pub const ADDRESS_REQUIRED: &str = "At least one address is required.";

static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("Invalid date regex pattern")
});

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .expect("Invalid email regex pattern")
});

static TABLE_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_.-]{3,255}$").expect("Invalid table name regex pattern")
});

/// A request body before any field has been type-checked.
pub type JsonObject = serde_json::Map<String, Value>;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn is_valid_string(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Shape check only: `2024-02-31` passes.
pub fn is_valid_date(value: &str) -> bool {
    DATE_PATTERN.is_match(value)
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

pub fn has_primary_contact(contacts: &[Contact]) -> bool {
    contacts.iter().any(|contact| contact.is_primary)
}

fn check_name(name: &str) -> Result<()> {
    if !is_valid_string(name) {
        return Err(CustomerError::validation(NAME_REQUIRED));
    }
    Ok(())
}

fn check_birth_date(birth_date: &str) -> Result<()> {
    if !is_valid_date(birth_date) {
        return Err(CustomerError::validation(INVALID_BIRTH_DATE));
    }
    Ok(())
}

fn check_primary_contact(contacts: &[Contact]) -> Result<()> {
    if !has_primary_contact(contacts) {
        return Err(CustomerError::validation(PRIMARY_CONTACT_REQUIRED));
    }
    Ok(())
}

fn check_addresses(addresses: &[String]) -> Result<()> {
    if addresses.is_empty() {
        return Err(CustomerError::validation(ADDRESS_REQUIRED));
    }
    Ok(())
}

fn check_emails(contacts: &[Contact]) -> Result<()> {
    match contacts.iter().find(|contact| !is_valid_email(&contact.email)) {
        Some(contact) => Err(CustomerError::validation(format!(
            "Invalid email format: {}",
            contact.email
        ))),
        None => Ok(()),
    }
}

/// Validates the fields present in `patch`, reporting the first violated rule.
pub fn validate_customer_patch(patch: &CustomerPatch) -> Result<()> {
    if let Some(name) = &patch.name {
        check_name(name)?;
    }
    if let Some(birth_date) = &patch.birth_date {
        check_birth_date(birth_date)?;
    }
    if let Some(contacts) = &patch.contacts {
        check_primary_contact(contacts)?;
    }
    if let Some(addresses) = &patch.addresses {
        check_addresses(addresses)?;
    }
    if let Some(contacts) = &patch.contacts {
        check_emails(contacts)?;
    }
    Ok(())
}

/// Full-payload entry point: every field is required and a missing field fails its rule.
pub fn validate_new_customer(patch: CustomerPatch) -> Result<NewCustomer> {
    let CustomerPatch {
        name,
        birth_date,
        is_active,
        addresses,
        contacts,
    } = patch;

    let name = name.ok_or_else(|| CustomerError::validation(NAME_REQUIRED))?;
    check_name(&name)?;

    let birth_date = birth_date.ok_or_else(|| CustomerError::validation(INVALID_BIRTH_DATE))?;
    check_birth_date(&birth_date)?;

    let is_active = is_active.ok_or_else(|| CustomerError::validation(IS_ACTIVE_REQUIRED))?;

    let contacts = contacts.ok_or_else(|| CustomerError::validation(PRIMARY_CONTACT_REQUIRED))?;
    check_primary_contact(&contacts)?;

    let addresses = addresses.ok_or_else(|| CustomerError::validation(ADDRESS_REQUIRED))?;
    check_addresses(&addresses)?;

    check_emails(&contacts)?;

    Ok(NewCustomer {
        name,
        birth_date,
        is_active,
        addresses,
        contacts,
    })
}

/// Reads a creation body. Missing or wrongly typed fields fail their rule, in the same
/// order as [`validate_new_customer`].
pub fn read_new_customer(object: &JsonObject) -> Result<CustomerPatch> {
    read_payload(object, true)
}

/// Reads an update body. Absent and `null` fields stay out of the patch.
pub fn read_customer_patch(object: &JsonObject) -> Result<CustomerPatch> {
    read_payload(object, false)
}

fn read_payload(object: &JsonObject, required: bool) -> Result<CustomerPatch> {
    let name = read_string(object, "name", required, NAME_REQUIRED)?;
    if let Some(name) = &name {
        check_name(name)?;
    }

    let birth_date = read_string(object, "birthDate", required, INVALID_BIRTH_DATE)?;
    if let Some(birth_date) = &birth_date {
        check_birth_date(birth_date)?;
    }

    let is_active = match field(object, "isActive") {
        Some(Value::Bool(flag)) => Some(*flag),
        None if !required => None,
        _ => return Err(CustomerError::validation(IS_ACTIVE_REQUIRED)),
    };

    let contacts = match field(object, "contacts") {
        Some(Value::Array(items)) => Some(
            items
                .iter()
                .map(read_contact)
                .collect::<Result<Vec<_>>>()?,
        ),
        None if !required => None,
        _ => return Err(CustomerError::validation(PRIMARY_CONTACT_REQUIRED)),
    };
    if let Some(contacts) = &contacts {
        check_primary_contact(contacts)?;
    }

    let addresses = match field(object, "addresses").map(read_addresses) {
        Some(Some(addresses)) => Some(addresses),
        None if !required => None,
        _ => return Err(CustomerError::validation(ADDRESS_REQUIRED)),
    };
    if let Some(addresses) = &addresses {
        check_addresses(addresses)?;
    }

    if let Some(contacts) = &contacts {
        check_emails(contacts)?;
    }

    Ok(CustomerPatch {
        name,
        birth_date,
        is_active,
        addresses,
        contacts,
    })
}

/// `null` reads as absent.
fn field<'a>(object: &'a JsonObject, key: &str) -> Option<&'a Value> {
    object.get(key).filter(|value| !value.is_null())
}

fn read_string(
    object: &JsonObject,
    key: &str,
    required: bool,
    rule: &'static str,
) -> Result<Option<String>> {
    match field(object, key) {
        Some(Value::String(value)) => Ok(Some(value.clone())),
        None if !required => Ok(None),
        _ => Err(CustomerError::validation(rule)),
    }
}

fn read_addresses(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|address| address.as_str().map(str::to_string))
        .collect()
}

fn read_contact(value: &Value) -> Result<Contact> {
    let Value::Object(contact) = value else {
        return Err(CustomerError::validation(PRIMARY_CONTACT_REQUIRED));
    };
    let is_primary = match field(contact, "isPrimary") {
        None => false,
        Some(Value::Bool(flag)) => *flag,
        Some(_) => return Err(CustomerError::validation(PRIMARY_CONTACT_REQUIRED)),
    };
    Ok(Contact::new(
        text(contact, "email"),
        text(contact, "phone"),
        is_primary,
    ))
}

/// Non-string values keep their JSON text, so a numeric email fails the email rule.
fn text(object: &JsonObject, key: &str) -> String {
    match field(object, key) {
        None => String::new(),
        Some(Value::String(value)) => value.clone(),
        Some(other) => other.to_string(),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CustomerError::ConfigError {
            message: format!("{} cannot be empty or whitespace-only", field_name),
        });
    }
    Ok(())
}

/// Table names: 3 to 255 characters drawn from letters, digits, `_`, `-` and `.`.
pub fn validate_table_name(field_name: &str, table_name: &str) -> Result<()> {
    validate_non_empty_string(field_name, table_name)?;

    if !TABLE_NAME_PATTERN.is_match(table_name) {
        return Err(CustomerError::ConfigError {
            message: format!(
                "{} '{}' must be 3-255 characters of letters, digits, '_', '-' or '.'",
                field_name, table_name
            ),
        });
    }
    Ok(())
}
