use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::account::Account;
use super::error::StoreError;
use super::namespace::ServiceIdentifier;

/// Immutable snapshot of an account's encrypted profile at one profile-key version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedProfile {
    pub version: String,
    pub name: Option<Vec<u8>>,
    pub about: Option<Vec<u8>>,
    pub about_emoji: Option<Vec<u8>>,
    pub avatar: Option<String>,
    pub phone_number_sharing: Option<Vec<u8>>,
    pub payment_address: Option<Vec<u8>>,
    pub commitment: Vec<u8>,
}

#[async_trait]
pub trait VersionedProfileStore: Send + Sync {
    async fn get(&self, account: Uuid, version: &str)
    -> Result<Option<VersionedProfile>, StoreError>;
}

#[async_trait]
impl<S> VersionedProfileStore for Arc<S>
where
    S: VersionedProfileStore + ?Sized,
{
    async fn get(
        &self,
        account: Uuid,
        version: &str,
    ) -> Result<Option<VersionedProfile>, StoreError> {
        (**self).get(account, version).await
    }
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn get_by_service_identifier(
        &self,
        identifier: &ServiceIdentifier,
    ) -> Result<Option<Account>, StoreError>;
}
