//! Reminder service
//!
//! Per-user notification preferences.

use std::sync::Arc;

use crate::domain::entities::{parse_reminder_time, NewReminder, Reminder, ReminderId, User};
use crate::domain::ports::ReminderRepository;
use crate::error::AppError;

pub struct ReminderService<RR: ReminderRepository> {
    reminders: Arc<RR>,
}

impl<RR: ReminderRepository> ReminderService<RR> {
    pub fn new(reminders: Arc<RR>) -> Self {
        Self { reminders }
    }

    /// Add a reminder at `time` (`HH:MM` or `HH:MM:SS`)
    pub async fn add(
        &self,
        user: &User,
        time: &str,
        message: &str,
        enabled: bool,
    ) -> Result<Reminder, AppError> {
        let reminder = NewReminder::new(parse_reminder_time(time)?, message, enabled)?;
        Ok(self.reminders.create(&user.id, &reminder).await?)
    }

    pub async fn list(&self, user: &User) -> Result<Vec<Reminder>, AppError> {
        Ok(self.reminders.find_by_user(&user.id).await?)
    }

    pub async fn set_enabled(
        &self,
        user: &User,
        id: ReminderId,
        enabled: bool,
    ) -> Result<Reminder, AppError> {
        Ok(self.reminders.set_enabled(&user.id, &id, enabled).await?)
    }

    /// Remove a reminder; reminders of other users are reported as missing
    pub async fn remove(&self, user: &User, id: ReminderId) -> Result<(), AppError> {
        self.reminders.delete(&user.id, &id).await?;
        Ok(())
    }
}
