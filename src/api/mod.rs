use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post, put},
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::Config;
use crate::db::Store;
use crate::services::{AuthService, ReferenceService, ReportService};
use crate::state::SharedState;

pub mod auth;
mod error;
mod event_titles;
mod observability;
mod reports;
mod shift_hours;
mod system;
mod types;
mod users;
mod validation;

pub use error::ApiError;
pub use observability::REQUEST_ID_HEADER;
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &Store {
        &self.shared.store
    }

    #[must_use]
    pub fn auth_service(&self) -> &Arc<dyn AuthService> {
        &self.shared.auth_service
    }

    #[must_use]
    pub fn reference_service(&self) -> &Arc<dyn ReferenceService> {
        &self.shared.reference_service
    }

    #[must_use]
    pub fn report_service(&self) -> &Arc<dyn ReportService> {
        &self.shared.report_service
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub fn router(state: Arc<AppState>) -> Router {
    let server = state.config().server.clone();

    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(server.secure_cookies)
        .with_http_only(true)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            server.session_idle_minutes,
        )));

    let api_router = Router::new()
        .merge(create_protected_router())
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/system/health/live", get(system::health_live))
        .route("/system/health/ready", get(system::health_ready))
        .layer(session_layer)
        .with_state(state);

    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let cors_layer = if server.cors_allowed_origins.iter().any(|o| o == "*") {
        cors_layer.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = server
            .cors_allowed_origins
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        cors_layer.allow_origin(origins).allow_credentials(true)
    };

    Router::new()
        .nest("/api", api_router)
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}

/// Routes that need a session. Reads are open to every logged-in user;
/// reference data mutations and metrics additionally require the admin role.
/// Report mutations do their own owner-or-admin check.
fn create_protected_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/me", get(auth::current_user))
        .route("/check-auth", get(auth::current_user))
        .route(
            "/reports",
            get(reports::list_reports).post(reports::create_report),
        )
        .route(
            "/reports/{id}",
            get(reports::get_report)
                .put(reports::update_report)
                .delete(reports::delete_report),
        )
        .route(
            "/users",
            get(users::list_users).merge(
                post(users::create_user)
                    .route_layer(middleware::from_fn(auth::require_admin)),
            ),
        )
        .route(
            "/users/{id}",
            put(users::update_user)
                .delete(users::delete_user)
                .route_layer(middleware::from_fn(auth::require_admin)),
        )
        .route(
            "/shift-hours",
            get(shift_hours::list_shift_hours).merge(
                post(shift_hours::create_shift_hours)
                    .route_layer(middleware::from_fn(auth::require_admin)),
            ),
        )
        .route(
            "/shift-hours/{id}",
            put(shift_hours::update_shift_hours)
                .delete(shift_hours::delete_shift_hours)
                .route_layer(middleware::from_fn(auth::require_admin)),
        )
        .route(
            "/event-titles",
            get(event_titles::list_event_titles).merge(
                post(event_titles::create_event_title)
                    .route_layer(middleware::from_fn(auth::require_admin)),
            ),
        )
        .route(
            "/event-titles/{id}",
            put(event_titles::update_event_title)
                .delete(event_titles::delete_event_title)
                .route_layer(middleware::from_fn(auth::require_admin)),
        )
        .route(
            "/metrics",
            get(observability::get_metrics)
                .route_layer(middleware::from_fn(auth::require_admin)),
        )
        .route_layer(middleware::from_fn(auth::auth_middleware))
}
