use std::sync::Arc;

use mechanic_shop_infra::{CustomerStore, InMemoryCustomerStore, SqliteCustomerStore, StoreResult};

use crate::config::StoreConfig;

/// Open the store selected by configuration.
pub async fn build_store(config: &StoreConfig) -> StoreResult<Arc<dyn CustomerStore>> {
    match config {
        StoreConfig::Sqlite {
            url,
            max_connections,
        } => {
            let store = SqliteCustomerStore::connect(url, *max_connections).await?;
            Ok(Arc::new(store))
        }
        StoreConfig::InMemory => {
            tracing::warn!("using in-memory customer store; data is lost on restart");
            Ok(Arc::new(InMemoryCustomerStore::new()))
        }
    }
}
