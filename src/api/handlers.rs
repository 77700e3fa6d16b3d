use axum::{
    extract::{RawQuery, State},
    response::Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::api::sidebar::DashboardView;
use crate::config::TableConfig;
use crate::logic::QueryStateStore;
use crate::model::{Page, PageMeta, Parcel, ParcelStats, QueryParams, User, UserContext};
use crate::store::{MemoryHistory, ParcelGateway, ParcelScope};

/// Shared state handed to every handler
pub struct AppState<G> {
    pub gateway: Arc<G>,
    pub tables: TableConfig,
}

impl<G> AppState<G> {
    pub fn new(gateway: Arc<G>, tables: TableConfig) -> Self {
        Self { gateway, tables }
    }

    /// Project the request's query string through the view's defaults
    pub fn table_query(&self, view: DashboardView, raw: Option<&str>) -> QueryParams {
        let defaults = view.table_defaults(&self.tables).unwrap_or_default();
        let history = MemoryHistory::from_query_string(raw.unwrap_or_default());
        QueryStateStore::new(history, defaults).query_params()
    }
}

impl<G> Clone for AppState<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            tables: self.tables.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Rows for one table page plus the query state that produced them
#[derive(Debug, Serialize)]
pub struct TableResponse<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
    pub query: QueryParams,
}

impl<T> TableResponse<T> {
    fn new(page: Page<T>, query: QueryParams) -> Self {
        Self {
            data: page.data,
            meta: page.meta,
            query,
        }
    }
}

pub type TableResult<T> = Result<Json<TableResponse<T>>, ApiError>;

async fn parcel_table<G: ParcelGateway>(
    state: &AppState<G>,
    view: DashboardView,
    scope: ParcelScope,
    raw: Option<String>,
) -> TableResult<Parcel> {
    let query = state.table_query(view, raw.as_deref());
    log::info!("{:?} -> {}", view, query.to_query_string());
    let page = state.gateway.list_parcels(scope, &query).await?;
    Ok(Json(TableResponse::new(page, query)))
}

pub async fn admin_analytics<G: ParcelGateway>(
    State(state): State<AppState<G>>,
) -> Result<Json<ParcelStats>, ApiError> {
    let stats = state.gateway.parcel_stats(ParcelScope::All).await?;
    Ok(Json(stats))
}

pub async fn admin_users<G: ParcelGateway>(
    State(state): State<AppState<G>>,
    RawQuery(raw): RawQuery,
) -> TableResult<User> {
    let query = state.table_query(DashboardView::AdminUsers, raw.as_deref());
    log::info!("AdminUsers -> {}", query.to_query_string());
    let page = state.gateway.list_users(&query).await?;
    Ok(Json(TableResponse::new(page, query)))
}

pub async fn admin_parcels<G: ParcelGateway>(
    State(state): State<AppState<G>>,
    RawQuery(raw): RawQuery,
) -> TableResult<Parcel> {
    parcel_table(&state, DashboardView::AdminParcels, ParcelScope::All, raw).await
}

pub async fn sender_analytics<G: ParcelGateway>(
    State(state): State<AppState<G>>,
    user: UserContext,
) -> Result<Json<ParcelStats>, ApiError> {
    let stats = state
        .gateway
        .parcel_stats(ParcelScope::SentBy(user.user_id))
        .await?;
    Ok(Json(stats))
}

pub async fn sender_parcels<G: ParcelGateway>(
    State(state): State<AppState<G>>,
    user: UserContext,
    RawQuery(raw): RawQuery,
) -> TableResult<Parcel> {
    let scope = ParcelScope::SentBy(user.user_id);
    parcel_table(&state, DashboardView::SenderParcels, scope, raw).await
}

pub async fn receiver_incoming<G: ParcelGateway>(
    State(state): State<AppState<G>>,
    user: UserContext,
    RawQuery(raw): RawQuery,
) -> TableResult<Parcel> {
    let scope = ParcelScope::ReceivedBy(user.user_id);
    parcel_table(&state, DashboardView::ReceiverIncoming, scope, raw).await
}

pub async fn receiver_history<G: ParcelGateway>(
    State(state): State<AppState<G>>,
    user: UserContext,
    RawQuery(raw): RawQuery,
) -> TableResult<Parcel> {
    let scope = ParcelScope::ReceivedBy(user.user_id);
    parcel_table(&state, DashboardView::ReceiverHistory, scope, raw).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FilterValue;
    use crate::store::MemoryGateway;

    fn state() -> AppState<MemoryGateway> {
        AppState::new(
            Arc::new(MemoryGateway::seeded()),
            TableConfig { default_limit: 5 },
        )
    }

    #[test]
    fn test_table_query_uses_view_defaults() {
        let query = state().table_query(DashboardView::AdminUsers, Some("page=2&role=sender"));

        assert_eq!(query.page, 2);
        assert_eq!(query.limit, 5);
        assert_eq!(query.filter("role"), Some(&FilterValue::from("sender")));
        assert_eq!(query.filter("status"), Some(&FilterValue::from("all")));
    }

    #[tokio::test]
    async fn test_admin_users_page() {
        let Json(response) = admin_users(State(state()), RawQuery(Some("status=active".into())))
            .await
            .unwrap();

        assert_eq!(response.meta.total, 5);
        assert_eq!(response.meta.total_page, 1);
        assert_eq!(response.query.page, 1);
    }

    #[tokio::test]
    async fn test_receiver_history_defaults_to_delivered() {
        let user = UserContext::new("u-receiver-1");
        let Json(response) = receiver_history(State(state()), user, RawQuery(None))
            .await
            .unwrap();

        assert_eq!(response.meta.total, 2);
        assert_eq!(response.query.sort.as_deref(), Some("-created_at"));
        assert_eq!(response.data[0].id, "p-8");
    }
}
