use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use uuid::Uuid;

use super::capability::{AccountCapabilityMode, DeviceCapability};
use super::namespace::{IdentityNamespace, ServiceIdentifier};

type HmacSha256 = Hmac<Sha256>;

pub const UNIDENTIFIED_ACCESS_KEY_BYTES: usize = 16;
pub const UNIDENTIFIED_ACCESS_CHECKSUM_BYTES: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: u32,
    pub primary: bool,
    pub capabilities: BTreeSet<DeviceCapability>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBadge {
    pub id: String,
    pub expiration: DateTime<Utc>,
    pub visible: bool,
}

impl AccountBadge {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiration <= now
    }
}

/// Read-only view of an account as seen by the profile subsystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub uuid: Uuid,
    pub phone_number_identifier: Uuid,
    pub primary_identity_key: Option<Vec<u8>>,
    pub pseudonymous_identity_key: Option<Vec<u8>>,
    pub current_profile_version: Option<String>,
    pub unidentified_access_key: Option<[u8; UNIDENTIFIED_ACCESS_KEY_BYTES]>,
    pub unrestricted_unidentified_access: bool,
    pub devices: Vec<Device>,
    pub badges: Vec<AccountBadge>,
}

impl Account {
    pub fn identity_key(&self, namespace: IdentityNamespace) -> Option<&[u8]> {
        match namespace {
            IdentityNamespace::Primary => self.primary_identity_key.as_deref(),
            IdentityNamespace::Pseudonymous => self.pseudonymous_identity_key.as_deref(),
        }
    }

    pub fn is_identified_by(&self, identifier: &ServiceIdentifier) -> bool {
        match identifier.namespace {
            IdentityNamespace::Primary => identifier.uuid == self.uuid,
            IdentityNamespace::Pseudonymous => identifier.uuid == self.phone_number_identifier,
        }
    }

    pub fn has_capability(&self, capability: DeviceCapability) -> bool {
        let held_by = |device: &Device| device.capabilities.contains(&capability);
        match capability.account_mode() {
            AccountCapabilityMode::AnyDevice => self.devices.iter().any(held_by),
            AccountCapabilityMode::PrimaryDevice => self
                .devices
                .iter()
                .find(|device| device.primary)
                .is_some_and(held_by),
            AccountCapabilityMode::AllDevices => {
                !self.devices.is_empty() && self.devices.iter().all(held_by)
            }
        }
    }
}

/// Derives the token a sealed sender presents to prove knowledge of the
/// recipient's unidentified-access key.
pub fn unidentified_access_checksum(
    key: &[u8; UNIDENTIFIED_ACCESS_KEY_BYTES],
) -> [u8; UNIDENTIFIED_ACCESS_CHECKSUM_BYTES] {
    let mut mac =
        HmacSha256::new_from_slice(key).expect("HMAC-SHA256 accepts keys of any length");
    mac.update(&[0u8; UNIDENTIFIED_ACCESS_CHECKSUM_BYTES]);
    mac.finalize().into_bytes().into()
}
