use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tracing::warn;

use super::{decode_json, decode_uuid};
use crate::entities::account;
use crate::profile::account::{Account, UNIDENTIFIED_ACCESS_KEY_BYTES};
use crate::profile::error::StoreError;
use crate::profile::namespace::{IdentityNamespace, ServiceIdentifier};
use crate::profile::store::AccountStore;

#[derive(Clone)]
pub struct DbAccountStore {
    database: DatabaseConnection,
}

impl DbAccountStore {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

#[async_trait]
impl AccountStore for DbAccountStore {
    async fn get_by_service_identifier(
        &self,
        identifier: &ServiceIdentifier,
    ) -> Result<Option<Account>, StoreError> {
        let key = identifier.uuid.as_bytes().to_vec();
        let query = match identifier.namespace {
            IdentityNamespace::Primary => account::Entity::find_by_id(key),
            IdentityNamespace::Pseudonymous => {
                account::Entity::find().filter(account::Column::PhoneNumberIdentifier.eq(key))
            }
        };

        let Some(model) = query.one(&self.database).await? else {
            return Ok(None);
        };
        let account = Account::try_from(&model).inspect_err(|err| {
            warn!(%identifier, "Stored account failed to decode: {err}");
        })?;
        debug_assert!(account.is_identified_by(identifier));
        Ok(Some(account))
    }
}

impl TryFrom<&account::Model> for Account {
    type Error = StoreError;

    fn try_from(model: &account::Model) -> Result<Self, Self::Error> {
        let uuid = decode_uuid(&model.account_id, "account")?;
        let record = format!("account {uuid}");
        let phone_number_identifier = decode_uuid(&model.phone_number_identifier, &record)?;

        let unidentified_access_key = model
            .unidentified_access_key
            .as_deref()
            .map(|bytes| {
                <[u8; UNIDENTIFIED_ACCESS_KEY_BYTES]>::try_from(bytes).map_err(|_| {
                    StoreError::Malformed {
                        record: record.clone(),
                        reason: format!(
                            "unidentified access key must be {UNIDENTIFIED_ACCESS_KEY_BYTES} bytes, got {}",
                            bytes.len()
                        ),
                    }
                })
            })
            .transpose()?;

        Ok(Self {
            uuid,
            phone_number_identifier,
            primary_identity_key: model.primary_identity_key.clone(),
            pseudonymous_identity_key: model.pseudonymous_identity_key.clone(),
            current_profile_version: model.current_profile_version.clone(),
            unidentified_access_key,
            unrestricted_unidentified_access: model.unrestricted_unidentified_access,
            devices: decode_json(&model.devices, &record, "devices")?,
            badges: decode_json(&model.badges, &record, "badges")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use uuid::Uuid;

    use super::*;
    use crate::profile::capability::DeviceCapability;

    fn model() -> account::Model {
        account::Model {
            account_id: Uuid::new_v4().as_bytes().to_vec(),
            phone_number_identifier: Uuid::new_v4().as_bytes().to_vec(),
            primary_identity_key: Some(vec![5, 1]),
            pseudonymous_identity_key: Some(vec![5, 2]),
            current_profile_version: Some("v1".to_string()),
            unidentified_access_key: Some(vec![9; UNIDENTIFIED_ACCESS_KEY_BYTES]),
            unrestricted_unidentified_access: true,
            devices: json!([
                {"id": 1, "primary": true, "capabilities": ["storage", "delete_sync"]}
            ]),
            badges: json!([
                {"id": "boost", "expiration": "2030-01-01T00:00:00Z", "visible": false}
            ]),
            updated_at: 0,
        }
    }

    #[test]
    fn decodes_stored_account() {
        let model = model();
        let account = Account::try_from(&model).expect("decodes");
        assert_eq!(account.uuid.as_bytes().as_slice(), model.account_id.as_slice());
        assert_eq!(account.unidentified_access_key, Some([9; UNIDENTIFIED_ACCESS_KEY_BYTES]));
        assert!(account.has_capability(DeviceCapability::DeleteSync));
        assert_eq!(account.badges.len(), 1);
        assert!(!account.badges[0].visible);
    }

    #[test]
    fn rejects_short_access_key() {
        let mut model = model();
        model.unidentified_access_key = Some(vec![1, 2, 3]);
        assert!(matches!(
            Account::try_from(&model),
            Err(StoreError::Malformed { .. })
        ));
    }

    #[test]
    fn rejects_unknown_capability() {
        let mut model = model();
        model.devices = json!([{"id": 1, "primary": true, "capabilities": ["teleport"]}]);
        assert!(Account::try_from(&model).is_err());
    }
}
