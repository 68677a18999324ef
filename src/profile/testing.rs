//! In-memory collaborators shared by the unit tests.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use super::account::{Account, AccountBadge, Device};
use super::badges::{
    BADGE_SPRITE_COUNT, BadgeCatalogSnapshot, BadgeCatalogSource, BadgeDefinition, BadgeSvg,
    BadgeText,
};
use super::capability::DeviceCapability;
use super::credential::{CredentialOracle, CredentialOracleError};
use super::error::StoreError;
use super::namespace::{IdentityNamespace, ServiceIdentifier};
use super::store::{AccountStore, VersionedProfile, VersionedProfileStore};

pub fn account_with_devices(devices: Vec<Device>) -> Account {
    Account {
        uuid: Uuid::new_v4(),
        phone_number_identifier: Uuid::new_v4(),
        primary_identity_key: Some(vec![0x05, 0xa1, 0xa2]),
        pseudonymous_identity_key: Some(vec![0x05, 0xb1, 0xb2]),
        current_profile_version: None,
        unidentified_access_key: None,
        unrestricted_unidentified_access: false,
        devices,
        badges: Vec::new(),
    }
}

pub fn account_with_version(version: Option<&str>) -> Account {
    let mut account = account_with_devices(vec![Device {
        id: 1,
        primary: true,
        capabilities: BTreeSet::from([
            DeviceCapability::Storage,
            DeviceCapability::Transfer,
            DeviceCapability::DeleteSync,
        ]),
    }]);
    account.current_profile_version = version.map(str::to_string);
    account
}

pub fn profile_at(version: &str) -> VersionedProfile {
    VersionedProfile {
        version: version.to_string(),
        name: Some(format!("name-{version}").into_bytes()),
        about: Some(format!("about-{version}").into_bytes()),
        about_emoji: Some(format!("emoji-{version}").into_bytes()),
        avatar: Some(format!("profiles/{version}")),
        phone_number_sharing: Some(vec![1]),
        payment_address: Some(format!("pay-{version}").into_bytes()),
        commitment: format!("commitment-{version}").into_bytes(),
    }
}

pub fn badge(id: &str, visible: bool, now: DateTime<Utc>) -> AccountBadge {
    AccountBadge {
        id: id.to_string(),
        expiration: now + Duration::days(30),
        visible,
    }
}

fn sprites(id: &str) -> Vec<String> {
    (1..=BADGE_SPRITE_COUNT)
        .map(|density| format!("{id}-{density}.png"))
        .collect()
}

pub fn sample_catalog() -> BadgeCatalogSnapshot {
    let boost = BadgeDefinition {
        id: "boost".to_string(),
        category: "donor".to_string(),
        sprites: sprites("boost"),
        svg: "boost.svg".to_string(),
        svgs: vec![BadgeSvg {
            light: "boost-light.svg".to_string(),
            dark: "boost-dark.svg".to_string(),
        }],
        translations: BTreeMap::from([
            (
                "en".to_string(),
                BadgeText {
                    name: "Boost".to_string(),
                    description: "{short_name} supports the network".to_string(),
                },
            ),
            (
                "de".to_string(),
                BadgeText {
                    name: "Verstärkung".to_string(),
                    description: "{short_name} unterstützt das Netzwerk".to_string(),
                },
            ),
        ]),
    };
    let gift = BadgeDefinition {
        id: "gift".to_string(),
        category: "donor".to_string(),
        sprites: sprites("gift"),
        svg: "gift.svg".to_string(),
        svgs: Vec::new(),
        translations: BTreeMap::from([(
            "en".to_string(),
            BadgeText {
                name: "Gift".to_string(),
                description: "A gift".to_string(),
            },
        )]),
    };
    BadgeCatalogSnapshot::new([boost, gift])
}

pub struct StaticCatalog(Arc<BadgeCatalogSnapshot>);

impl StaticCatalog {
    pub fn sample() -> Self {
        Self(Arc::new(sample_catalog()))
    }
}

#[async_trait]
impl BadgeCatalogSource for StaticCatalog {
    async fn catalog(&self) -> Result<Arc<BadgeCatalogSnapshot>, StoreError> {
        Ok(Arc::clone(&self.0))
    }
}

pub struct FailingCatalog;

#[async_trait]
impl BadgeCatalogSource for FailingCatalog {
    async fn catalog(&self) -> Result<Arc<BadgeCatalogSnapshot>, StoreError> {
        Err(StoreError::Database(sea_orm::DbErr::Custom(
            "badge table unreachable".to_string(),
        )))
    }
}

#[derive(Default)]
pub struct InMemoryProfiles {
    profiles: Mutex<HashMap<(Uuid, String), VersionedProfile>>,
    lookups: AtomicUsize,
}

impl InMemoryProfiles {
    pub fn insert(&self, account: Uuid, profile: VersionedProfile) {
        self.profiles
            .lock()
            .unwrap()
            .insert((account, profile.version.clone()), profile);
    }

    /// Number of `get` calls that reached this store.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VersionedProfileStore for InMemoryProfiles {
    async fn get(
        &self,
        account: Uuid,
        version: &str,
    ) -> Result<Option<VersionedProfile>, StoreError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .get(&(account, version.to_string()))
            .cloned())
    }
}

pub struct FailingProfiles;

#[async_trait]
impl VersionedProfileStore for FailingProfiles {
    async fn get(&self, _: Uuid, _: &str) -> Result<Option<VersionedProfile>, StoreError> {
        Err(StoreError::Database(sea_orm::DbErr::Custom(
            "connection refused".to_string(),
        )))
    }
}

#[derive(Default)]
pub struct InMemoryAccounts {
    accounts: Mutex<Vec<Account>>,
}

impl InMemoryAccounts {
    pub fn insert(&self, account: Account) {
        self.accounts.lock().unwrap().push(account);
    }
}

#[async_trait]
impl AccountStore for InMemoryAccounts {
    async fn get_by_service_identifier(
        &self,
        identifier: &ServiceIdentifier,
    ) -> Result<Option<Account>, StoreError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|account| account.is_identified_by(identifier))
            .cloned())
    }
}

#[derive(Debug, Clone)]
pub enum ScriptedOutcome {
    Issue(Vec<u8>),
    Malformed,
    VerificationFailed,
    Unavailable,
}

#[derive(Debug, Clone)]
pub struct OracleCall {
    pub request: Vec<u8>,
    pub commitment: Vec<u8>,
    pub identifier: ServiceIdentifier,
}

pub struct ScriptedOracle {
    outcome: ScriptedOutcome,
    calls: Mutex<Vec<OracleCall>>,
}

impl ScriptedOracle {
    pub fn new(outcome: ScriptedOutcome) -> Self {
        Self {
            outcome,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<OracleCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CredentialOracle for ScriptedOracle {
    async fn issue(
        &self,
        request: &[u8],
        commitment: &[u8],
        primary_identifier: &ServiceIdentifier,
        _expiration: DateTime<Utc>,
    ) -> Result<Vec<u8>, CredentialOracleError> {
        assert_eq!(primary_identifier.namespace, IdentityNamespace::Primary);
        self.calls.lock().unwrap().push(OracleCall {
            request: request.to_vec(),
            commitment: commitment.to_vec(),
            identifier: *primary_identifier,
        });
        match &self.outcome {
            ScriptedOutcome::Issue(credential) => Ok(credential.clone()),
            ScriptedOutcome::Malformed => Err(CredentialOracleError::Malformed),
            ScriptedOutcome::VerificationFailed => Err(CredentialOracleError::VerificationFailed),
            ScriptedOutcome::Unavailable => Err(CredentialOracleError::Unavailable(
                "connection reset".to_string(),
            )),
        }
    }
}
