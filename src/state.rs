use std::sync::Arc;

use crate::clients::{GroqClient, TextGenerator};
use crate::config::Config;
use crate::db::Store;
use crate::services::{
    ProjectService, SeaOrmProjectService, SeaOrmTaskService, SeaOrmUserService, TaskService,
    UserService,
};

/// Everything a request handler may touch, built once at startup and passed
/// down explicitly. There is no process-wide database handle.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub user_service: Arc<dyn UserService>,

    pub project_service: Arc<dyn ProjectService>,

    pub task_service: Arc<dyn TaskService>,

    pub story_generator: Arc<dyn TextGenerator>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let generator = Arc::new(GroqClient::from_config(&config.ai)?);
        if config.ai.api_key().is_none() {
            tracing::warn!(
                "{} is not set; user story generation will fail until it is",
                config.ai.api_key_env
            );
        }
        Self::with_generator(config, generator).await
    }

    /// Builds the state around a caller-supplied text generator.
    pub async fn with_generator(
        config: Config,
        story_generator: Arc<dyn TextGenerator>,
    ) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let user_service = Arc::new(SeaOrmUserService::new(
            store.clone(),
            config.security.clone(),
        )) as Arc<dyn UserService>;
        let project_service =
            Arc::new(SeaOrmProjectService::new(store.clone())) as Arc<dyn ProjectService>;
        let task_service = Arc::new(SeaOrmTaskService::new(store.clone())) as Arc<dyn TaskService>;

        Ok(Self {
            config: Arc::new(config),
            store,
            user_service,
            project_service,
            task_service,
            story_generator,
        })
    }
}
