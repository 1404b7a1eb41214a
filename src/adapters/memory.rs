use crate::adapters::record::CustomerRecord;
use crate::domain::model::Customer;
use crate::domain::ports::CustomerRepository;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Process-local store holding encoded records. Nothing survives the process.
#[derive(Default)]
pub struct InMemoryCustomerRepository {
    records: RwLock<HashMap<String, CustomerRecord>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Raw access for tests that need to look at what was persisted.
    pub async fn record(&self, id: &str) -> Option<CustomerRecord> {
        self.records.read().await.get(id).cloned()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn save(&self, customer: &Customer) -> Result<()> {
        let record = CustomerRecord::from_customer(customer)?;
        let mut records = self.records.write().await;
        records.insert(record.id.clone(), record);
        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Customer>> {
        let record = self.records.read().await.get(id).cloned();
        record.map(CustomerRecord::into_customer).transpose()
    }

    async fn delete_by_id(&self, id: &str) -> Result<()> {
        self.records.write().await.remove(id);
        Ok(())
    }
}
