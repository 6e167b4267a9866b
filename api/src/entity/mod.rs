//! SeaORM entity models
//!
//! One module per table, in the layout `sea-orm-cli generate entity` produces.

pub mod prelude;

pub mod activities;
pub mod auth_tokens;
pub mod badges;
pub mod challenge_progress;
pub mod challenges;
pub mod follows;
pub mod meditation_types;
pub mod reminders;
pub mod sessions;
pub mod social_accounts;
pub mod subscriptions;
pub mod users;
