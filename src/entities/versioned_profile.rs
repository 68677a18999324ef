use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "versioned_profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub account_id: Vec<u8>,
    #[sea_orm(primary_key, auto_increment = false)]
    pub version: String,
    pub name: Option<Vec<u8>>,
    pub about: Option<Vec<u8>>,
    pub about_emoji: Option<Vec<u8>>,
    pub avatar: Option<String>,
    pub phone_number_sharing: Option<Vec<u8>>,
    pub payment_address: Option<Vec<u8>>,
    pub commitment: Vec<u8>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::AccountId",
        to = "super::account::Column::AccountId"
    )]
    Account,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
