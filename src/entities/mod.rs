pub mod account;
pub mod badge_definition;
pub mod badge_translation;
pub mod versioned_profile;
