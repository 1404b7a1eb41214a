use crate::domain::factory::CustomerFactory;
use crate::domain::model::{Customer, CustomerPatch};
use crate::domain::ports::CustomerRepository;
use crate::utils::error::{CustomerError, Result};
use crate::utils::validation::{validate_customer_patch, validate_new_customer};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Validates, builds or merges customers and hands them to the repository.
pub struct CustomerService<R: CustomerRepository> {
    repository: Arc<R>,
}

impl<R: CustomerRepository> CustomerService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    #[instrument(skip_all)]
    pub async fn create_customer(&self, data: CustomerPatch) -> Result<String> {
        let payload = validate_new_customer(data)?;
        let customer = CustomerFactory::from_payload(payload)?;

        self.repository.save(&customer).await?;
        info!(customer_id = %customer.id(), "customer created");
        Ok(customer.id().to_string())
    }

    #[instrument(skip(self))]
    pub async fn get_customer(&self, id: &str) -> Result<Option<Customer>> {
        self.repository.get_by_id(id).await
    }

    /// Read-modify-write: only the fields present in `data` change. Not atomic, the last
    /// writer wins.
    #[instrument(skip(self, data))]
    pub async fn update_customer(&self, id: &str, data: CustomerPatch) -> Result<Customer> {
        validate_customer_patch(&data)?;
        if data.is_empty() {
            debug!(customer_id = %id, "update carries no fields");
        }

        let mut customer = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| CustomerError::not_found("Customer"))?;

        customer.apply_patch(data);
        customer.ensure_invariants()?;

        self.repository.save(&customer).await?;
        info!(customer_id = %id, "customer updated");
        Ok(customer)
    }

    #[instrument(skip(self))]
    pub async fn delete_customer(&self, id: &str) -> Result<()> {
        self.repository.delete_by_id(id).await?;
        debug!(customer_id = %id, "customer delete issued");
        Ok(())
    }
}
