use axum::{
    response::Json,
    routing::{get, post, MethodRouter},
    Router,
};

use crate::api::sidebar::{sidebar_for, DashboardView, SidebarItems};
use crate::api::{handlers, query_actions, AppState};
use crate::logic::RouteTableBuilder;
use crate::model::Role;
use crate::store::ParcelGateway;

pub fn create_router<G: ParcelGateway + 'static>() -> Router<AppState<G>> {
    let builder = RouteTableBuilder::default();

    let mut router = Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Table state transitions
        .route("/query", post(query_actions::apply_query_action::<G>));

    for role in Role::ALL {
        router = router.nest(role.mount_point(), role_router::<G>(&builder, role));
    }

    router
}

/// Mount every page of a role's sidebar under that role's prefix
fn role_router<G: ParcelGateway + 'static>(
    builder: &RouteTableBuilder,
    role: Role,
) -> Router<AppState<G>> {
    let mut router = Router::new().route("/sidebar", get(move || role_sidebar(role)));

    for route in builder.build(&sidebar_for(role)) {
        let path = route.router_path();
        log::debug!("mounting {}{} -> {:?}", role.mount_point(), path, route.view);
        router = router.route(&path, view_handler::<G>(route.view));
    }

    router
}

async fn role_sidebar(role: Role) -> Json<SidebarItems> {
    Json(sidebar_for(role))
}

fn view_handler<G: ParcelGateway + 'static>(view: DashboardView) -> MethodRouter<AppState<G>> {
    match view {
        DashboardView::AdminAnalytics => get(handlers::admin_analytics::<G>),
        DashboardView::AdminUsers => get(handlers::admin_users::<G>),
        DashboardView::AdminParcels => get(handlers::admin_parcels::<G>),
        DashboardView::SenderAnalytics => get(handlers::sender_analytics::<G>),
        DashboardView::SenderParcels => get(handlers::sender_parcels::<G>),
        DashboardView::ReceiverIncoming => get(handlers::receiver_incoming::<G>),
        DashboardView::ReceiverHistory => get(handlers::receiver_history::<G>),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TableConfig;
    use crate::store::MemoryGateway;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        create_router().with_state(AppState::new(
            Arc::new(MemoryGateway::seeded()),
            TableConfig::default(),
        ))
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = app()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_sidebar_pages_are_mounted() {
        for uri in [
            "/admin/analytics",
            "/admin/users",
            "/admin/parcels",
            "/sender/analytics",
            "/sender/parcels",
            "/receiver/incoming",
            "/receiver/history",
        ] {
            let (status, _) = get_json(uri).await;
            assert_eq!(status, StatusCode::OK, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_unknown_page_is_not_found() {
        let (status, _) = get_json("/sender/users").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_sidebar_endpoint() {
        let (status, body) = get_json("/receiver/sidebar").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["url"], "#");
        assert_eq!(body[0]["children"][1]["url"], "/receiver/history");
    }

    #[tokio::test]
    async fn test_table_echoes_query_state() {
        let (_, body) = get_json("/admin/users?page=abc&role=receiver&verified=true").await;

        assert_eq!(body["query"]["page"], 1);
        assert_eq!(body["query"]["limit"], 10);
        assert_eq!(body["query"]["verified"], true);
        assert_eq!(body["query"]["status"], "all");
        assert_eq!(body["meta"]["total"], 2);
    }
}
