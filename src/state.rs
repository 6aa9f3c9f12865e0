use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AuthService, ReferenceService, ReportService, SeaOrmAuthService, SeaOrmReferenceService,
    SeaOrmReportService,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub auth_service: Arc<dyn AuthService>,

    pub reference_service: Arc<dyn ReferenceService>,

    pub report_service: Arc<dyn ReportService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Ok(Self::with_store(config, store))
    }

    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let auth_service = Arc::new(SeaOrmAuthService::new(store.clone()))
            as Arc<dyn AuthService>;

        let reference_service = Arc::new(SeaOrmReferenceService::new(
            store.clone(),
            config.security.clone(),
        )) as Arc<dyn ReferenceService>;

        let report_service = Arc::new(SeaOrmReportService::new(store.clone()))
            as Arc<dyn ReportService>;

        Self {
            config: Arc::new(config),
            store,
            auth_service,
            reference_service,
            report_service,
        }
    }
}
