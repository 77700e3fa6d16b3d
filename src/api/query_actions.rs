use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::handlers::AppState;
use crate::logic::QueryStateStore;
use crate::model::{FilterValue, QueryDefaults, QueryParams, QueryUpdate};
use crate::store::{MemoryHistory, ParcelGateway};

/// One table interaction, mirroring the mutators on `QueryStateStore`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueryAction {
    SetPage { page: u32 },
    SetSearch { search: String },
    SetSort { sort: String },
    SetFilter { key: String, value: FilterValue },
    RemoveFilter { key: String },
    Update { updates: QueryUpdate },
    Reset,
}

#[derive(Debug, Deserialize)]
pub struct QueryActionRequest {
    /// Current query string of the table view
    #[serde(default)]
    pub query: String,
    /// Falls back to the configured table defaults
    pub defaults: Option<QueryDefaults>,
    pub action: QueryAction,
}

#[derive(Debug, Serialize)]
pub struct QueryActionResponse {
    /// Query string to navigate to
    pub query: String,
    pub params: QueryParams,
}

/// Apply an action to a query string and return the resulting one
pub fn apply_action(
    query: &str,
    defaults: QueryDefaults,
    action: QueryAction,
) -> Result<QueryActionResponse, ApiError> {
    let store = QueryStateStore::new(MemoryHistory::from_query_string(query), defaults);

    match action {
        QueryAction::SetPage { page: 0 } => {
            return Err(ApiError::BadRequest("page must be positive".to_string()))
        }
        QueryAction::SetPage { page } => store.set_page(page),
        QueryAction::SetSearch { search } => store.set_search(&search),
        QueryAction::SetSort { sort } => store.set_sort(&sort),
        QueryAction::SetFilter { key, value } => store.set_filter(&key, value),
        QueryAction::RemoveFilter { key } => store.remove_filter(&key),
        QueryAction::Update { updates } => store.update_query(updates),
        QueryAction::Reset => store.reset_query(),
    }

    Ok(QueryActionResponse {
        query: store.history().query_string(),
        params: store.query_params(),
    })
}

pub async fn apply_query_action<G: ParcelGateway>(
    State(state): State<AppState<G>>,
    Json(request): Json<QueryActionRequest>,
) -> Result<Json<QueryActionResponse>, ApiError> {
    let defaults = request.defaults.unwrap_or_else(|| {
        QueryDefaults::default().with_limit(state.tables.default_limit)
    });
    log::debug!("query action {:?} on '{}'", request.action, request.query);

    apply_action(&request.query, defaults, request.action).map(Json)
}
