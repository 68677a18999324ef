use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::account::AccountBadge;
use super::disclosure::BadgeAudience;
use super::error::StoreError;
use crate::models::profile::{BadgeDescriptor, BadgeSvgView, SelfBadgeState};

pub const FALLBACK_LOCALE: &str = "en";
pub const BADGE_SPRITE_COUNT: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeSvg {
    pub light: String,
    pub dark: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeText {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeDefinition {
    pub id: String,
    pub category: String,
    pub sprites: Vec<String>,
    pub svg: String,
    pub svgs: Vec<BadgeSvg>,
    /// Keyed by lowercase language tag.
    pub translations: BTreeMap<String, BadgeText>,
}

/// Catalog entry after localization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeMetadata {
    pub id: String,
    pub category: String,
    pub name: String,
    pub description: String,
    pub sprites: Vec<String>,
    pub svg: String,
    pub svgs: Vec<BadgeSvg>,
}

pub trait BadgeCatalog: Send + Sync {
    /// Returns `None` for badge ids the catalog does not know.
    fn enrich(&self, badge_id: &str, locales: &[String]) -> Option<BadgeMetadata>;
}

/// Supplies the badge catalog currently in effect.
#[async_trait]
pub trait BadgeCatalogSource: Send + Sync {
    async fn catalog(&self) -> Result<Arc<BadgeCatalogSnapshot>, StoreError>;
}

#[derive(Debug, Clone, Default)]
pub struct BadgeCatalogSnapshot {
    definitions: HashMap<String, BadgeDefinition>,
}

impl BadgeCatalogSnapshot {
    pub fn new(definitions: impl IntoIterator<Item = BadgeDefinition>) -> Self {
        let definitions = definitions
            .into_iter()
            .map(|definition| (definition.id.clone(), definition))
            .collect();
        Self { definitions }
    }

    pub fn badge_count(&self) -> usize {
        self.definitions.len()
    }
}

impl BadgeCatalog for BadgeCatalogSnapshot {
    fn enrich(&self, badge_id: &str, locales: &[String]) -> Option<BadgeMetadata> {
        let definition = self.definitions.get(badge_id)?;
        let text = select_translation(&definition.translations, locales);
        let (name, description) = match text {
            Some(text) => (text.name.clone(), text.description.clone()),
            None => (definition.id.clone(), String::new()),
        };
        Some(BadgeMetadata {
            id: definition.id.clone(),
            category: definition.category.clone(),
            name,
            description,
            sprites: definition.sprites.clone(),
            svg: definition.svg.clone(),
            svgs: definition.svgs.clone(),
        })
    }
}

fn select_translation<'a>(
    translations: &'a BTreeMap<String, BadgeText>,
    locales: &[String],
) -> Option<&'a BadgeText> {
    for locale in locales {
        let normalized = locale.trim().to_ascii_lowercase();
        if let Some(text) = translations.get(&normalized) {
            return Some(text);
        }
        if let Some((language, _)) = normalized.split_once('-') {
            if let Some(text) = translations.get(language) {
                return Some(text);
            }
        }
    }
    translations
        .get(FALLBACK_LOCALE)
        .or_else(|| translations.values().next())
}

/// Converts an account's badge holdings into descriptors for the given audience,
/// preserving the account's badge order.
pub fn project_badges(
    catalog: &dyn BadgeCatalog,
    holdings: &[AccountBadge],
    locales: &[String],
    audience: BadgeAudience,
    now: DateTime<Utc>,
) -> Vec<BadgeDescriptor> {
    holdings
        .iter()
        .filter(|badge| !badge.is_expired(now))
        .filter(|badge| audience == BadgeAudience::Owner || badge.visible)
        .filter_map(|badge| {
            let metadata = catalog.enrich(&badge.id, locales)?;
            let self_state = match audience {
                BadgeAudience::Owner => Some(SelfBadgeState {
                    expiration: badge.expiration.timestamp(),
                    visible: badge.visible,
                }),
                BadgeAudience::Others => None,
            };
            Some(BadgeDescriptor {
                id: metadata.id,
                category: metadata.category,
                name: metadata.name,
                description: metadata.description,
                sprites6: metadata.sprites,
                svg: metadata.svg,
                svgs: metadata
                    .svgs
                    .into_iter()
                    .map(|pair| BadgeSvgView {
                        light: pair.light,
                        dark: pair.dark,
                    })
                    .collect(),
                self_state,
            })
        })
        .collect()
}
