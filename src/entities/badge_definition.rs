use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "badge_definitions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub badge_id: String,
    pub category: String,
    pub sprites: Json,
    pub svg: String,
    pub svgs: Json,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::badge_translation::Entity")]
    BadgeTranslation,
}

impl Related<super::badge_translation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BadgeTranslation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
