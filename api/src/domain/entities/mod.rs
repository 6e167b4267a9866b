//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod activity;
pub mod challenge;
pub mod follow;
pub mod reminder;
pub mod session;
pub mod subscription;
pub mod user;

pub use activity::{Activity, ActivityId, ActivityKind, NewActivity};
pub use challenge::{Badge, Challenge, ChallengeId, ChallengeProgress, NewChallenge};
pub use follow::Follow;
pub use reminder::{parse_reminder_time, NewReminder, Reminder, ReminderId};
pub use session::{
    normalize_type_name, MeditationSession, MeditationType, Mood, NewSession, SessionId,
};
pub use subscription::{Subscription, Tier};
pub use user::{NewUser, SocialIdentity, User, UserId};
