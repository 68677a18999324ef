use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use sea_orm::{DatabaseConnection, EntityTrait};
use tracing::debug;
use uuid::Uuid;

use crate::config::CacheConfig;
use crate::entities::versioned_profile;
use crate::profile::error::StoreError;
use crate::profile::store::{VersionedProfile, VersionedProfileStore};

#[derive(Clone)]
pub struct DbVersionedProfileStore {
    database: DatabaseConnection,
}

impl DbVersionedProfileStore {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

#[async_trait]
impl VersionedProfileStore for DbVersionedProfileStore {
    async fn get(
        &self,
        account: Uuid,
        version: &str,
    ) -> Result<Option<VersionedProfile>, StoreError> {
        let model = versioned_profile::Entity::find_by_id((
            account.as_bytes().to_vec(),
            version.to_string(),
        ))
        .one(&self.database)
        .await?;
        Ok(model.map(VersionedProfile::from))
    }
}

/// Versioned profiles never change once written, so hits are cached; misses are not.
pub struct CachingProfileStore<S> {
    inner: S,
    cache: Cache<(Uuid, String), Arc<VersionedProfile>>,
}

impl<S> CachingProfileStore<S>
where
    S: VersionedProfileStore,
{
    pub fn new(inner: S, config: &CacheConfig) -> Self {
        assert!(
            config.profiles_max_capacity >= 100,
            "Profile cache capacity threshold"
        );
        let cache = Cache::builder()
            .max_capacity(config.profiles_max_capacity)
            .time_to_live(Duration::from_secs(config.profiles_ttl_seconds))
            .time_to_idle(Duration::from_secs(config.profiles_ttl_seconds / 2 + 1))
            .build();
        Self { inner, cache }
    }
}

#[async_trait]
impl<S> VersionedProfileStore for CachingProfileStore<S>
where
    S: VersionedProfileStore,
{
    async fn get(
        &self,
        account: Uuid,
        version: &str,
    ) -> Result<Option<VersionedProfile>, StoreError> {
        let cache_key = (account, version.to_string());
        if let Some(cached) = self.cache.get(&cache_key).await {
            return Ok(Some((*cached).clone()));
        }

        let Some(profile) = self.inner.get(account, version).await? else {
            debug!(%account, version, "Versioned profile not found");
            return Ok(None);
        };

        self.cache
            .insert(cache_key, Arc::new(profile.clone()))
            .await;
        Ok(Some(profile))
    }
}

impl From<versioned_profile::Model> for VersionedProfile {
    fn from(model: versioned_profile::Model) -> Self {
        Self {
            version: model.version,
            name: model.name,
            about: model.about,
            about_emoji: model.about_emoji,
            avatar: model.avatar,
            phone_number_sharing: model.phone_number_sharing,
            payment_address: model.payment_address,
            commitment: model.commitment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::testing::{InMemoryProfiles, profile_at};

    fn cache_config() -> CacheConfig {
        CacheConfig {
            profiles_max_capacity: 1_000,
            profiles_ttl_seconds: 600,
            badge_catalog_refresh_seconds: 10,
        }
    }

    #[tokio::test]
    async fn hits_are_served_from_cache() {
        let account = Uuid::new_v4();
        let inner = Arc::new(InMemoryProfiles::default());
        inner.insert(account, profile_at("v1"));
        let store = CachingProfileStore::new(Arc::clone(&inner), &cache_config());

        let first = store.get(account, "v1").await.unwrap();
        let second = store.get(account, "v1").await.unwrap();
        assert_eq!(first, Some(profile_at("v1")));
        assert_eq!(first, second);
        assert_eq!(inner.lookups(), 1);
    }

    #[tokio::test]
    async fn absence_is_not_cached() {
        let account = Uuid::new_v4();
        let inner = Arc::new(InMemoryProfiles::default());
        let store = CachingProfileStore::new(Arc::clone(&inner), &cache_config());

        assert_eq!(store.get(account, "v2").await.unwrap(), None);
        inner.insert(account, profile_at("v2"));
        assert_eq!(store.get(account, "v2").await.unwrap(), Some(profile_at("v2")));
        assert_eq!(inner.lookups(), 2);
    }

    #[tokio::test]
    async fn versions_are_cached_independently() {
        let account = Uuid::new_v4();
        let inner = Arc::new(InMemoryProfiles::default());
        inner.insert(account, profile_at("v1"));
        inner.insert(account, profile_at("v2"));
        let store = CachingProfileStore::new(Arc::clone(&inner), &cache_config());

        assert_eq!(store.get(account, "v1").await.unwrap().unwrap().version, "v1");
        assert_eq!(store.get(account, "v2").await.unwrap().unwrap().version, "v2");
        assert_eq!(inner.lookups(), 2);
    }
}
