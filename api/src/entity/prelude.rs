#![allow(unused_imports)]

pub use super::activities::Entity as Activities;
pub use super::auth_tokens::Entity as AuthTokens;
pub use super::badges::Entity as Badges;
pub use super::challenge_progress::Entity as ChallengeProgress;
pub use super::challenges::Entity as Challenges;
pub use super::follows::Entity as Follows;
pub use super::meditation_types::Entity as MeditationTypes;
pub use super::reminders::Entity as Reminders;
pub use super::sessions::Entity as Sessions;
pub use super::social_accounts::Entity as SocialAccounts;
pub use super::subscriptions::Entity as Subscriptions;
pub use super::users::Entity as Users;
