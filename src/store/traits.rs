use crate::model::{Id, Page, Parcel, ParcelStats, QueryParams, User};
use std::sync::Arc;
use thiserror::Error;

/// Owner of the URL query string a table view reads and writes.
///
/// Writes replace the whole query in one step so observers never see a
/// partially applied update.
pub trait History: Send + Sync {
    /// Current query as decoded key/value pairs, in URL order
    fn query(&self) -> Vec<(String, String)>;
    fn replace_query(&self, pairs: Vec<(String, String)>);
}

impl<H: History + ?Sized> History for Arc<H> {
    fn query(&self) -> Vec<(String, String)> {
        (**self).query()
    }

    fn replace_query(&self, pairs: Vec<(String, String)>) {
        (**self).replace_query(pairs)
    }
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// Which parcels a view is allowed to see
#[derive(Debug, Clone, PartialEq)]
pub enum ParcelScope {
    All,
    SentBy(Id),
    ReceivedBy(Id),
}

/// Data-fetch layer the table views call through.
///
/// Backends over the courier REST API report missing records as
/// `GatewayError::NotFound` and transport failures as `Unavailable`.
#[async_trait::async_trait]
pub trait ParcelGateway: Send + Sync {
    async fn list_users(&self, query: &QueryParams) -> Result<Page<User>, GatewayError>;
    async fn list_parcels(
        &self,
        scope: ParcelScope,
        query: &QueryParams,
    ) -> Result<Page<Parcel>, GatewayError>;
    async fn parcel_stats(&self, scope: ParcelScope) -> Result<ParcelStats, GatewayError>;
}
