use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, post},
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::clients::TextGenerator;
use crate::config::Config;
use crate::state::SharedState;

mod ai;
pub mod auth;
mod error;
mod extract;
mod observability;
mod projects;
mod tasks;
pub mod types;
mod users;
mod validation;

pub use error::ApiError;
pub use extract::{ValidJson, ValidPath, ValidQuery};
pub use types::*;

use crate::services::{ProjectService, TaskService, UserService};

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
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn user_service(&self) -> &Arc<dyn UserService> {
        &self.shared.user_service
    }

    #[must_use]
    pub fn project_service(&self) -> &Arc<dyn ProjectService> {
        &self.shared.project_service
    }

    #[must_use]
    pub fn task_service(&self) -> &Arc<dyn TaskService> {
        &self.shared.task_service
    }

    #[must_use]
    pub fn story_generator(&self) -> &Arc<dyn TextGenerator> {
        &self.shared.story_generator
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

/// Builds the state around a caller-supplied text generator instead of the
/// Groq client configured in `config.ai`.
pub async fn create_app_state_with_generator(
    config: Config,
    story_generator: Arc<dyn TextGenerator>,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::with_generator(config, story_generator).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config().server.cors_allowed_origins.clone();

    let api_router = Router::new()
        .route("/api/login", post(auth::login))
        .route("/api/ai/generate-user-stories", post(ai::generate_user_stories))
        .route("/users", post(users::create_user).get(users::list_users))
        .route("/users/", post(users::create_user).get(users::list_users))
        .route(
            "/projects",
            post(projects::create_project).get(projects::list_projects),
        )
        .route(
            "/projects/",
            post(projects::create_project).get(projects::list_projects),
        )
        .route(
            "/projects/{id}",
            get(projects::get_project).delete(projects::delete_project),
        )
        .route("/tasks", post(tasks::create_task))
        .route("/tasks/", post(tasks::create_task))
        .route(
            "/tasks/{id}",
            get(tasks::get_task).delete(tasks::delete_task),
        )
        .route("/health", get(observability::health))
        .route("/metrics", get(observability::get_metrics))
        .with_state(state);

    let cors_layer = if cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    api_router
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}
