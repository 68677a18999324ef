mod accounts;
mod badges;
mod profiles;

pub use accounts::DbAccountStore;
pub use badges::DbBadgeCatalog;
pub use profiles::{CachingProfileStore, DbVersionedProfileStore};

use uuid::Uuid;

use crate::profile::error::StoreError;

fn decode_uuid(bytes: &[u8], record: &str) -> Result<Uuid, StoreError> {
    Uuid::from_slice(bytes).map_err(|err| StoreError::Malformed {
        record: record.to_string(),
        reason: err.to_string(),
    })
}

fn decode_json<T: serde::de::DeserializeOwned>(
    value: &serde_json::Value,
    record: &str,
    field: &str,
) -> Result<T, StoreError> {
    serde_json::from_value(value.clone()).map_err(|err| StoreError::Malformed {
        record: record.to_string(),
        reason: format!("{field}: {err}"),
    })
}
