//! Dashboard service
//!
//! Totals and chart data over a user's own sessions.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::entities::User;
use crate::domain::ports::SessionRepository;
use crate::domain::stats::{self, DashboardStats};
use crate::error::AppError;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DatePoint {
    pub date: NaiveDate,
    pub sessions: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MoodPoint {
    pub before: i32,
    pub after: i32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HourPoint {
    pub hour: u32,
    pub sessions: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LocationPoint {
    pub location: String,
    pub sessions: u32,
}

/// Chart series for the analytics page
#[derive(Debug, Clone, Serialize, Default)]
pub struct SessionAnalytics {
    pub consistency: Vec<DatePoint>,
    pub mood_correlation: Vec<MoodPoint>,
    pub time_of_day: Vec<HourPoint>,
    pub locations: Vec<LocationPoint>,
}

pub struct DashboardService<SR: SessionRepository> {
    sessions: Arc<SR>,
}

impl<SR: SessionRepository> DashboardService<SR> {
    pub fn new(sessions: Arc<SR>) -> Self {
        Self { sessions }
    }

    pub async fn dashboard(&self, user: &User) -> Result<DashboardStats, AppError> {
        let sessions = self.sessions.find_by_user(&user.id).await?;
        Ok(DashboardStats::from_sessions(&sessions))
    }

    pub async fn analytics(&self, user: &User) -> Result<SessionAnalytics, AppError> {
        let mut sessions = self.sessions.find_by_user(&user.id).await?;
        // oldest first so the mood series reads left to right
        sessions.reverse();

        Ok(SessionAnalytics {
            consistency: stats::consistency_over_time(&sessions)
                .into_iter()
                .map(|(date, sessions)| DatePoint { date, sessions })
                .collect(),
            mood_correlation: stats::mood_correlation_points(&sessions)
                .into_iter()
                .map(|(before, after)| MoodPoint { before, after })
                .collect(),
            time_of_day: stats::time_of_day_distribution(&sessions)
                .into_iter()
                .map(|(hour, sessions)| HourPoint { hour, sessions })
                .collect(),
            locations: stats::location_frequency(&sessions)
                .into_iter()
                .map(|(location, sessions)| LocationPoint { location, sessions })
                .collect(),
        })
    }
}
