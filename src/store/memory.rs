use itertools::Itertools;
use parking_lot::RwLock;

use crate::logic::{apply_query, Searchable};
use crate::model::{Page, Parcel, ParcelStats, QueryParams, User};
use crate::seed::{seed_parcels, seed_users};
use crate::store::traits::{GatewayError, ParcelGateway, ParcelScope};

impl Searchable for User {
    fn search_text(&self) -> String {
        format!("{} {}", self.name, self.email)
    }
}

impl Searchable for Parcel {
    fn search_text(&self) -> String {
        format!(
            "{} {} {}",
            self.tracking_id, self.pickup_address, self.delivery_address
        )
    }
}

impl ParcelScope {
    pub fn includes(&self, parcel: &Parcel) -> bool {
        match self {
            ParcelScope::All => true,
            ParcelScope::SentBy(user_id) => &parcel.sender_id == user_id,
            ParcelScope::ReceivedBy(user_id) => &parcel.receiver_id == user_id,
        }
    }
}

/// Gateway backed by in-process records instead of the courier REST API
#[derive(Debug, Default)]
pub struct MemoryGateway {
    users: RwLock<Vec<User>>,
    parcels: RwLock<Vec<Parcel>>,
}

impl MemoryGateway {
    pub fn new(users: Vec<User>, parcels: Vec<Parcel>) -> Self {
        Self {
            users: RwLock::new(users),
            parcels: RwLock::new(parcels),
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed_users(), seed_parcels())
    }

    fn scoped_parcels(&self, scope: &ParcelScope) -> Vec<Parcel> {
        self.parcels
            .read()
            .iter()
            .filter(|parcel| scope.includes(parcel))
            .cloned()
            .collect()
    }
}

#[async_trait::async_trait]
impl ParcelGateway for MemoryGateway {
    async fn list_users(&self, query: &QueryParams) -> Result<Page<User>, GatewayError> {
        let users = self.users.read();
        Ok(apply_query(users.as_slice(), query))
    }

    async fn list_parcels(
        &self,
        scope: ParcelScope,
        query: &QueryParams,
    ) -> Result<Page<Parcel>, GatewayError> {
        let parcels = self.scoped_parcels(&scope);
        log::debug!("listing {} parcels in scope {:?}", parcels.len(), scope);
        Ok(apply_query(&parcels, query))
    }

    async fn parcel_stats(&self, scope: ParcelScope) -> Result<ParcelStats, GatewayError> {
        let parcels = self.scoped_parcels(&scope);
        let by_status = parcels
            .iter()
            .counts_by(|parcel| {
                serde_json::to_value(parcel.status)
                    .ok()
                    .and_then(|value| value.as_str().map(str::to_string))
                    .unwrap_or_default()
            })
            .into_iter()
            .collect();

        Ok(ParcelStats {
            total: parcels.len(),
            by_status,
            total_fee: parcels.iter().map(|parcel| parcel.fee).sum(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FilterValue, ParcelStatus, QueryDefaults};
    use crate::logic::QueryStateStore;
    use crate::store::MemoryHistory;

    fn params(query: &str, defaults: QueryDefaults) -> QueryParams {
        QueryStateStore::new(MemoryHistory::from_query_string(query), defaults).query_params()
    }

    #[tokio::test]
    async fn test_users_filtered_by_role_and_status() {
        let gateway = MemoryGateway::seeded();
        let defaults = QueryDefaults::default()
            .with_filter("role", "all")
            .with_filter("status", "all");

        let page = gateway
            .list_users(&params("role=sender&status=active", defaults.clone()))
            .await
            .unwrap();
        assert_eq!(page.meta.total, 2);

        let page = gateway.list_users(&params("", defaults)).await.unwrap();
        assert_eq!(page.meta.total, 7);
    }

    #[tokio::test]
    async fn test_user_search_and_boolean_filter() {
        let gateway = MemoryGateway::seeded();

        let page = gateway
            .list_users(&params("search=BOB", QueryDefaults::default()))
            .await
            .unwrap();
        assert_eq!(page.meta.total, 2);

        let page = gateway
            .list_users(&params("verified=false", QueryDefaults::default()))
            .await
            .unwrap();
        assert!(page.data.iter().all(|user| !user.verified));
        assert_eq!(page.meta.total, 2);
    }

    #[tokio::test]
    async fn test_parcels_scoped_to_sender() {
        let gateway = MemoryGateway::seeded();
        let query = params("limit=4&sort=-fee", QueryDefaults::default());

        let page = gateway
            .list_parcels(ParcelScope::SentBy("u-sender-1".to_string()), &query)
            .await
            .unwrap();

        assert_eq!(page.meta.total, 6);
        assert_eq!(page.meta.total_page, 2);
        assert_eq!(page.data.len(), 4);
        assert_eq!(page.data[0].fee, 150.0);
        assert!(page.data.iter().all(|parcel| parcel.sender_id == "u-sender-1"));
    }

    #[tokio::test]
    async fn test_received_delivered_parcels() {
        let gateway = MemoryGateway::seeded();
        let query = params(
            "",
            QueryDefaults::default().with_filter("status", "delivered"),
        );

        let page = gateway
            .list_parcels(ParcelScope::ReceivedBy("u-receiver-1".to_string()), &query)
            .await
            .unwrap();

        assert_eq!(page.meta.total, 2);
        assert!(page
            .data
            .iter()
            .all(|parcel| parcel.status == ParcelStatus::Delivered));
        assert_eq!(query.filter("status"), Some(&FilterValue::from("delivered")));
    }

    #[tokio::test]
    async fn test_stats_count_by_status() {
        let gateway = MemoryGateway::seeded();
        let stats = gateway.parcel_stats(ParcelScope::All).await.unwrap();

        assert_eq!(stats.total, 12);
        assert_eq!(stats.by_status["delivered"], 4);
        assert_eq!(stats.by_status["in_transit"], 2);
    }
}
