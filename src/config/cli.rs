use crate::adapters::record::CustomerRecord;
use crate::core::{ConfigProvider, Customer, CustomerRepository};
use crate::utils::error::{CustomerError, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Customer store on the local filesystem: one JSON record per id under
/// `<base_path>/<table>/`.
#[derive(Debug, Clone)]
pub struct FileCustomerRepository {
    table_path: PathBuf,
}

impl FileCustomerRepository {
    pub fn new(base_path: impl AsRef<Path>, table_name: &str) -> Self {
        Self {
            table_path: base_path.as_ref().join(table_name),
        }
    }

    pub fn from_config(base_path: impl AsRef<Path>, config: &impl ConfigProvider) -> Self {
        Self::new(base_path, config.table_name())
    }

    fn record_path(&self, id: &str) -> Result<PathBuf> {
        let well_formed = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !well_formed {
            return Err(CustomerError::validation(format!(
                "Customer ID contains invalid characters: {}",
                id
            )));
        }
        Ok(self.table_path.join(format!("{}.json", id)))
    }
}

#[async_trait]
impl CustomerRepository for FileCustomerRepository {
    async fn save(&self, customer: &Customer) -> Result<()> {
        let path = self.record_path(customer.id())?;
        let record = CustomerRecord::from_customer(customer)?;
        let data = serde_json::to_vec_pretty(&record)
            .map_err(|e| CustomerError::application(format!("Failed to save customer: {}", e)))?;

        tokio::fs::create_dir_all(&self.table_path)
            .await
            .map_err(|e| CustomerError::application(format!("Failed to save customer: {}", e)))?;

        // Write-then-rename keeps a reader from seeing half a record.
        let tmp_path = path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, data)
            .await
            .map_err(|e| CustomerError::application(format!("Failed to save customer: {}", e)))?;
        tokio::fs::rename(&tmp_path, &path)
            .await
            .map_err(|e| CustomerError::application(format!("Failed to save customer: {}", e)))?;

        tracing::debug!("Saved customer record to {}", path.display());
        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Customer>> {
        let path = self.record_path(id)?;
        let data = match tokio::fs::read(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(CustomerError::application(format!(
                    "Failed to get customer: {}",
                    e
                )))
            }
        };

        let record: CustomerRecord = serde_json::from_slice(&data)
            .map_err(|e| CustomerError::application(format!("Failed to get customer: {}", e)))?;
        record.into_customer().map(Some)
    }

    async fn delete_by_id(&self, id: &str) -> Result<()> {
        let path = self.record_path(id)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CustomerError::application(format!(
                "Failed to delete customer: {}",
                e
            ))),
        }
    }
}
