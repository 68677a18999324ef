use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "badge_translations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub badge_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub locale: String,
    pub name: String,
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::badge_definition::Entity",
        from = "Column::BadgeId",
        to = "super::badge_definition::Column::BadgeId"
    )]
    BadgeDefinition,
}

impl Related<super::badge_definition::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BadgeDefinition.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
