pub use sea_orm_migration::prelude::*;

mod m20261018_000001_create_accounts;
mod m20261018_000002_add_versioned_profiles;
mod m20261018_000003_add_badge_catalog;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261018_000001_create_accounts::Migration),
            Box::new(m20261018_000002_add_versioned_profiles::Migration),
            Box::new(m20261018_000003_add_badge_catalog::Migration),
        ]
    }
}
