use crate::domain::model::Customer;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Persistence port for customers. Implementations are pure I/O adapters.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Upserts the full record keyed by the customer id.
    async fn save(&self, customer: &Customer) -> Result<()>;

    /// Returns `None` when no record exists for `id`.
    async fn get_by_id(&self, id: &str) -> Result<Option<Customer>>;

    /// Removing an id that does not exist is not an error.
    async fn delete_by_id(&self, id: &str) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    /// Name of the table (or collection) customer records live in.
    fn table_name(&self) -> &str;
}
