use std::sync::Arc;
use std::time::{Duration, Instant};

use sea_orm::DatabaseConnection;

use crate::config::ApiConfig;
use crate::profile::assembler::ProfileResponseAssembler;
use crate::profile::badges::BadgeCatalogSource;
use crate::profile::credential::{CredentialIssuanceService, CredentialOracle};
use crate::profile::store::{AccountStore, VersionedProfileStore};
use crate::storage::{
    CachingProfileStore, DbAccountStore, DbBadgeCatalog, DbVersionedProfileStore,
};

#[derive(Clone)]
pub struct AppState {
    /// Absent when the stores are not database backed.
    pub database: Option<DatabaseConnection>,
    pub accounts: Arc<dyn AccountStore>,
    pub profiles: ProfileResponseAssembler,
    pub credentials: CredentialIssuanceService,
    pub oracle_timeout: Duration,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        database: DatabaseConnection,
        config: &ApiConfig,
        oracle: Arc<dyn CredentialOracle>,
    ) -> Self {
        let accounts: Arc<dyn AccountStore> = Arc::new(DbAccountStore::new(database.clone()));
        let profiles: Arc<dyn VersionedProfileStore> = Arc::new(CachingProfileStore::new(
            DbVersionedProfileStore::new(database.clone()),
            &config.cache,
        ));
        let badges: Arc<dyn BadgeCatalogSource> = Arc::new(DbBadgeCatalog::new(
            database.clone(),
            config.cache.badge_catalog_refresh(),
        ));

        let mut state = Self::from_parts(
            accounts,
            profiles,
            badges,
            oracle,
            config.oracle.request_timeout(),
        );
        state.database = Some(database);
        state
    }

    pub fn from_parts(
        accounts: Arc<dyn AccountStore>,
        profiles: Arc<dyn VersionedProfileStore>,
        badges: Arc<dyn BadgeCatalogSource>,
        oracle: Arc<dyn CredentialOracle>,
        oracle_timeout: Duration,
    ) -> Self {
        assert!(
            oracle_timeout >= Duration::from_millis(100),
            "Oracle timeout must be configured"
        );
        Self {
            database: None,
            accounts,
            profiles: ProfileResponseAssembler::new(Arc::clone(&profiles), badges),
            credentials: CredentialIssuanceService::new(profiles, oracle),
            oracle_timeout,
            start_time: Instant::now(),
        }
    }
}
