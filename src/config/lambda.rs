use crate::adapters::record::{CustomerRecord, DEFAULT_TABLE_NAME};
use crate::core::handlers::Operation;
use crate::core::{ConfigProvider, Customer, CustomerRepository};
use crate::utils::error::{CustomerError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_table_name, Validate};
use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoClient;
use std::collections::HashMap;
use std::env;

#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub table_name: String,
    pub region: Option<String>,
    pub endpoint_url: Option<String>,
    /// Fixed operation for this deployment; `None` routes on the HTTP method.
    pub operation: Option<Operation>,
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        let operation = match env::var("CUSTOMER_OPERATION") {
            Ok(value) if !value.trim().is_empty() => Some(value.parse()?),
            _ => None,
        };

        Ok(Self {
            table_name: env::var("CUSTOMERS_TABLE")
                .unwrap_or_else(|_| DEFAULT_TABLE_NAME.to_string()),
            region: env::var("DYNAMODB_REGION").ok(),
            endpoint_url: env::var("DYNAMODB_ENDPOINT").ok(),
            operation,
        })
    }

    /// Builds the DynamoDB client once per cold start.
    pub async fn dynamo_client(&self) -> DynamoClient {
        let shared = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let mut builder = aws_sdk_dynamodb::config::Builder::from(&shared);
        if let Some(region) = &self.region {
            builder = builder.region(aws_sdk_dynamodb::config::Region::new(region.clone()));
        }
        if let Some(endpoint_url) = &self.endpoint_url {
            builder = builder.endpoint_url(endpoint_url);
        }
        DynamoClient::from_conf(builder.build())
    }
}

impl ConfigProvider for LambdaConfig {
    fn table_name(&self) -> &str {
        &self.table_name
    }
}

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        validate_table_name("CUSTOMERS_TABLE", &self.table_name)?;
        if let Some(region) = &self.region {
            validate_aws_region("DYNAMODB_REGION", region)?;
        }
        if let Some(endpoint_url) = &self.endpoint_url {
            validate_non_empty_string("DYNAMODB_ENDPOINT", endpoint_url)?;
        }

        tracing::debug!("Lambda configuration validation passed");
        Ok(())
    }
}

fn validate_aws_region(field_name: &str, region: &str) -> Result<()> {
    validate_non_empty_string(field_name, region)?;

    if !region
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(CustomerError::ConfigError {
            message: format!(
                "{} '{}' can only contain lowercase letters, numbers, and hyphens",
                field_name, region
            ),
        });
    }

    Ok(())
}

/// Customer table in DynamoDB, keyed by the string attribute `id`.
#[derive(Debug, Clone)]
pub struct DynamoCustomerRepository {
    client: DynamoClient,
    table_name: String,
}

impl DynamoCustomerRepository {
    pub fn new(client: DynamoClient, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    pub fn from_config(client: DynamoClient, config: &impl ConfigProvider) -> Self {
        Self::new(client, config.table_name())
    }
}

#[async_trait]
impl CustomerRepository for DynamoCustomerRepository {
    async fn save(&self, customer: &Customer) -> Result<()> {
        let item = to_item(CustomerRecord::from_customer(customer)?);

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| {
                CustomerError::application(format!(
                    "Failed to save customer: {}",
                    DisplayErrorContext(&e)
                ))
            })?;
        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Customer>> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| {
                CustomerError::application(format!(
                    "Failed to get customer: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        match output.item() {
            Some(item) => from_item(item)?.into_customer().map(Some),
            None => Ok(None),
        }
    }

    async fn delete_by_id(&self, id: &str) -> Result<()> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| {
                CustomerError::application(format!(
                    "Failed to delete customer: {}",
                    DisplayErrorContext(&e)
                ))
            })?;
        Ok(())
    }
}

pub fn to_item(record: CustomerRecord) -> HashMap<String, AttributeValue> {
    HashMap::from([
        ("id".to_string(), AttributeValue::S(record.id)),
        ("name".to_string(), AttributeValue::S(record.name)),
        ("birthDate".to_string(), AttributeValue::S(record.birth_date)),
        ("isActive".to_string(), AttributeValue::Bool(record.is_active)),
        ("addresses".to_string(), AttributeValue::Ss(record.addresses)),
        ("contacts".to_string(), AttributeValue::S(record.contacts)),
    ])
}

pub fn from_item(item: &HashMap<String, AttributeValue>) -> Result<CustomerRecord> {
    let string = |key: &str| -> Result<String> {
        item.get(key)
            .and_then(|value| value.as_s().ok())
            .cloned()
            .ok_or_else(|| malformed(key))
    };

    Ok(CustomerRecord {
        id: string("id")?,
        name: string("name")?,
        birth_date: string("birthDate")?,
        is_active: item
            .get("isActive")
            .and_then(|value| value.as_bool().ok())
            .copied()
            .ok_or_else(|| malformed("isActive"))?,
        addresses: item
            .get("addresses")
            .and_then(|value| value.as_ss().ok())
            .cloned()
            .ok_or_else(|| malformed("addresses"))?,
        contacts: string("contacts")?,
    })
}

fn malformed(attribute: &str) -> CustomerError {
    CustomerError::application(format!(
        "Failed to get customer: attribute '{}' is missing or has the wrong type",
        attribute
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Contact;

    fn record() -> CustomerRecord {
        let customer = Customer::new(
            "c-1",
            "Jose",
            "1985-04-23",
            true,
            vec!["Rua A, 123".to_string()],
            vec![Contact::new("jose@example.com", "11987654321", true)],
        )
        .unwrap();
        CustomerRecord::from_customer(&customer).unwrap()
    }

    #[test]
    fn test_item_attribute_types() {
        let item = to_item(record());

        assert_eq!(item["id"], AttributeValue::S("c-1".to_string()));
        assert_eq!(item["isActive"], AttributeValue::Bool(true));
        assert_eq!(
            item["addresses"],
            AttributeValue::Ss(vec!["Rua A, 123".to_string()])
        );
        assert!(item["contacts"].as_s().unwrap().contains("\"isPrimary\":true"));
    }

    #[test]
    fn test_item_round_trip() {
        let original = record();
        let restored = from_item(&to_item(original.clone())).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn test_item_with_wrong_type_is_application_error() {
        let mut item = to_item(record());
        item.insert("isActive".to_string(), AttributeValue::S("yes".to_string()));

        let err = from_item(&item).unwrap_err();
        assert!(matches!(err, CustomerError::ApplicationError { .. }));
        assert!(err.to_string().contains("isActive"));
    }

    #[test]
    fn test_repository_uses_configured_table() {
        let config = LambdaConfig {
            table_name: "CustomersDev".to_string(),
            region: None,
            endpoint_url: None,
            operation: None,
        };
        let client = DynamoClient::from_conf(
            aws_sdk_dynamodb::Config::builder()
                .behavior_version(aws_sdk_dynamodb::config::BehaviorVersion::latest())
                .region(aws_sdk_dynamodb::config::Region::new("sa-east-1"))
                .build(),
        );

        let repository = DynamoCustomerRepository::from_config(client, &config);
        assert_eq!(repository.table_name, "CustomersDev");
    }

    #[test]
    fn test_validate_region() {
        let mut config = LambdaConfig {
            table_name: "Customers".to_string(),
            region: Some("sa-east-1".to_string()),
            endpoint_url: None,
            operation: None,
        };
        assert!(config.validate().is_ok());

        config.region = Some("SA East".to_string());
        assert!(config.validate().is_err());
    }
}
