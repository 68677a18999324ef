use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use super::account::{Account, unidentified_access_checksum};
use super::badges::{BadgeCatalogSource, project_badges};
use super::capability::project_capabilities;
use super::disclosure::{payment_address_visible, unversioned_disclosure};
use super::error::ProfileError;
use super::namespace::IdentityNamespace;
use super::store::VersionedProfileStore;
use crate::models::profile::{UnversionedProfileView, VersionedProfileView};

/// Who is asking for an unversioned profile, and in which language.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub requester: Option<Uuid>,
    pub locales: Vec<String>,
}

#[derive(Clone)]
pub struct ProfileResponseAssembler {
    profiles: Arc<dyn VersionedProfileStore>,
    badges: Arc<dyn BadgeCatalogSource>,
}

impl ProfileResponseAssembler {
    pub fn new(
        profiles: Arc<dyn VersionedProfileStore>,
        badges: Arc<dyn BadgeCatalogSource>,
    ) -> Self {
        Self { profiles, badges }
    }

    pub async fn versioned_profile(
        &self,
        account: &Account,
        version: &str,
    ) -> Result<VersionedProfileView, ProfileError> {
        let profile = self
            .profiles
            .get(account.uuid, version)
            .await?
            .ok_or(ProfileError::NotFound("profile version"))?;

        // Compare against the requested version: a stale snapshot is still
        // fetchable by its own version string.
        let payment_address = if payment_address_visible(account, version) {
            profile.payment_address
        } else {
            debug!(account = %account.uuid, "Withholding payment address for non-current version");
            None
        };

        Ok(VersionedProfileView {
            name: profile.name,
            about: profile.about,
            about_emoji: profile.about_emoji,
            avatar: profile.avatar,
            phone_number_sharing: profile.phone_number_sharing,
            payment_address,
        })
    }

    pub async fn unversioned_profile(
        &self,
        target: &Account,
        namespace: IdentityNamespace,
        context: &RequestContext,
        now: DateTime<Utc>,
    ) -> Result<UnversionedProfileView, ProfileError> {
        let is_self = context.requester == Some(target.uuid);
        let disclosure = unversioned_disclosure(namespace, is_self);

        let badges = match disclosure.badges {
            Some(audience) => {
                let catalog = self.badges.catalog().await?;
                project_badges(
                    catalog.as_ref(),
                    &target.badges,
                    &context.locales,
                    audience,
                    now,
                )
            }
            None => Vec::new(),
        };

        let unidentified_access = if disclosure.unidentified_access_token {
            target
                .unidentified_access_key
                .as_ref()
                .map(|key| unidentified_access_checksum(key).to_vec())
        } else {
            None
        };

        Ok(UnversionedProfileView {
            identity_key: target.identity_key(namespace).map(<[u8]>::to_vec),
            unidentified_access,
            unrestricted_unidentified_access: disclosure
                .unrestricted_unidentified_access
                .resolve(target),
            capabilities: project_capabilities(target),
            badges,
        })
    }
}
