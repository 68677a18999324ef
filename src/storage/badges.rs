use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};
use tracing::{info, warn};

use super::decode_json;
use crate::cache::Memoized;
use crate::entities::{badge_definition, badge_translation};
use crate::profile::badges::{BadgeCatalogSnapshot, BadgeCatalogSource, BadgeDefinition, BadgeText};
use crate::profile::error::StoreError;

/// Badge catalog read from the database and reloaded on a fixed interval.
pub struct DbBadgeCatalog {
    database: DatabaseConnection,
    snapshot: Memoized<BadgeCatalogSnapshot>,
}

impl DbBadgeCatalog {
    pub fn new(database: DatabaseConnection, refresh_after: Duration) -> Self {
        Self {
            database,
            snapshot: Memoized::new(refresh_after),
        }
    }

    async fn load(database: &DatabaseConnection) -> Result<BadgeCatalogSnapshot, StoreError> {
        let definitions = badge_definition::Entity::find()
            .order_by_asc(badge_definition::Column::BadgeId)
            .all(database)
            .await?;
        let translations = badge_translation::Entity::find()
            .order_by_asc(badge_translation::Column::BadgeId)
            .all(database)
            .await?;

        let snapshot = build_snapshot(&definitions, translations);
        info!(
            badges = snapshot.badge_count(),
            "Loaded badge catalog"
        );
        Ok(snapshot)
    }
}

#[async_trait]
impl BadgeCatalogSource for DbBadgeCatalog {
    async fn catalog(&self) -> Result<Arc<BadgeCatalogSnapshot>, StoreError> {
        self.snapshot
            .get_or_load(|| Self::load(&self.database))
            .await
            .map_err(StoreError::Shared)
    }
}

fn build_snapshot(
    definitions: &[badge_definition::Model],
    translations: Vec<badge_translation::Model>,
) -> BadgeCatalogSnapshot {
    let mut texts: HashMap<String, BTreeMap<String, BadgeText>> = HashMap::new();
    for translation in translations {
        texts.entry(translation.badge_id).or_default().insert(
            translation.locale.to_ascii_lowercase(),
            BadgeText {
                name: translation.name,
                description: translation.description,
            },
        );
    }

    let mut entries = Vec::with_capacity(definitions.len());
    for model in definitions {
        match decode_definition(model, &mut texts) {
            Ok(definition) => entries.push(definition),
            Err(err) => warn!(badge_id = %model.badge_id, "Skipping malformed badge: {err}"),
        }
    }
    BadgeCatalogSnapshot::new(entries)
}

fn decode_definition(
    model: &badge_definition::Model,
    texts: &mut HashMap<String, BTreeMap<String, BadgeText>>,
) -> Result<BadgeDefinition, StoreError> {
    let record = format!("badge {}", model.badge_id);
    Ok(BadgeDefinition {
        id: model.badge_id.clone(),
        category: model.category.clone(),
        sprites: decode_json(&model.sprites, &record, "sprites")?,
        svg: model.svg.clone(),
        svgs: decode_json(&model.svgs, &record, "svgs")?,
        translations: texts.remove(&model.badge_id).unwrap_or_default(),
    })
}
