use serde::{Deserialize, Serialize};

use super::account::Account;

/// How a per-device capability rolls up into an account-level capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountCapabilityMode {
    AnyDevice,
    PrimaryDevice,
    AllDevices,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceCapability {
    Storage,
    Transfer,
    DeleteSync,
    StorageServiceRecordKeyRotation,
    AttachmentBackfill,
}

impl DeviceCapability {
    pub const ALL: [DeviceCapability; 5] = [
        DeviceCapability::Storage,
        DeviceCapability::Transfer,
        DeviceCapability::DeleteSync,
        DeviceCapability::StorageServiceRecordKeyRotation,
        DeviceCapability::AttachmentBackfill,
    ];

    pub const fn account_mode(self) -> AccountCapabilityMode {
        match self {
            DeviceCapability::Storage => AccountCapabilityMode::AnyDevice,
            DeviceCapability::Transfer => AccountCapabilityMode::PrimaryDevice,
            DeviceCapability::DeleteSync
            | DeviceCapability::StorageServiceRecordKeyRotation
            | DeviceCapability::AttachmentBackfill => AccountCapabilityMode::AllDevices,
        }
    }

    /// Whether other users may learn that the account holds this capability.
    pub const fn include_in_profile(self) -> bool {
        match self {
            DeviceCapability::Transfer => false,
            DeviceCapability::Storage
            | DeviceCapability::DeleteSync
            | DeviceCapability::StorageServiceRecordKeyRotation
            | DeviceCapability::AttachmentBackfill => true,
        }
    }
}

/// Capabilities advertised on the account's profile, in declaration order.
///
/// The result depends only on the account and static capability metadata.
pub fn project_capabilities(account: &Account) -> Vec<DeviceCapability> {
    DeviceCapability::ALL
        .into_iter()
        .filter(|capability| capability.include_in_profile())
        .filter(|capability| account.has_capability(*capability))
        .collect()
}
