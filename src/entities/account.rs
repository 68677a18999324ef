use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub account_id: Vec<u8>,
    #[sea_orm(unique)]
    pub phone_number_identifier: Vec<u8>,
    pub primary_identity_key: Option<Vec<u8>>,
    pub pseudonymous_identity_key: Option<Vec<u8>>,
    pub current_profile_version: Option<String>,
    pub unidentified_access_key: Option<Vec<u8>>,
    pub unrestricted_unidentified_access: bool,
    pub devices: Json,
    pub badges: Json,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::versioned_profile::Entity")]
    VersionedProfile,
}

impl Related<super::versioned_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VersionedProfile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
