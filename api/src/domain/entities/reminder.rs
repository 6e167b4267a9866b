//! Reminder domain entity
//!
//! A reminder is a user's notification preference: a time of day and a message.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;
use crate::error::DomainError;

/// Maximum length of a reminder message
pub const MAX_REMINDER_MESSAGE_LEN: usize = 200;

/// Unique identifier for a reminder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReminderId(pub Uuid);

impl From<Uuid> for ReminderId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ReminderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A configured reminder
#[derive(Debug, Clone, Serialize)]
pub struct Reminder {
    pub id: ReminderId,
    pub user_id: UserId,
    pub reminder_time: NaiveTime,
    pub message: String,
    pub enabled: bool,
}

/// Data needed to create a reminder
#[derive(Debug, Clone)]
pub struct NewReminder {
    pub reminder_time: NaiveTime,
    pub message: String,
    pub enabled: bool,
}

impl NewReminder {
    pub fn new(reminder_time: NaiveTime, message: &str, enabled: bool) -> Result<Self, DomainError> {
        let message = message.trim();
        if message.is_empty() || message.chars().count() > MAX_REMINDER_MESSAGE_LEN {
            return Err(DomainError::Validation(format!(
                "Reminder message must be between 1 and {} characters",
                MAX_REMINDER_MESSAGE_LEN
            )));
        }
        Ok(Self {
            reminder_time,
            message: message.to_string(),
            enabled,
        })
    }
}

/// Parse a reminder time given as `HH:MM` or `HH:MM:SS`
pub fn parse_reminder_time(value: &str) -> Result<NaiveTime, DomainError> {
    let value = value.trim();
    // Stored values may carry a date prefix, e.g. `2023-01-01 07:00:00`
    let value = value.rsplit(' ').next().unwrap_or(value);
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| DomainError::Validation(format!("Invalid time: {}", value)))
}
