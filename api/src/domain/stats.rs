//! Session statistics
//!
//! Aggregations behind the dashboard and the analytics charts.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Timelike};
use serde::Serialize;

use crate::domain::entities::MeditationSession;
use crate::domain::streak::current_streak;

/// Headline numbers shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DashboardStats {
    pub total_minutes: i64,
    pub session_count: usize,
    pub current_streak: u32,
}

impl DashboardStats {
    pub fn from_sessions(sessions: &[MeditationSession]) -> Self {
        Self {
            total_minutes: total_minutes(sessions),
            session_count: sessions.len(),
            current_streak: current_streak(sessions.iter().map(|s| s.session_date)),
        }
    }
}

pub fn total_minutes(sessions: &[MeditationSession]) -> i64 {
    sessions.iter().map(|s| i64::from(s.duration_minutes)).sum()
}

/// Sessions per day, oldest day first
pub fn consistency_over_time(sessions: &[MeditationSession]) -> BTreeMap<NaiveDate, u32> {
    let mut counts = BTreeMap::new();
    for session in sessions {
        *counts.entry(session.session_date).or_insert(0) += 1;
    }
    counts
}

/// (before, after) mood pairs for sessions that recorded both
pub fn mood_correlation_points(sessions: &[MeditationSession]) -> Vec<(i32, i32)> {
    sessions
        .iter()
        .filter_map(|s| s.mood_pair())
        .map(|(before, after)| (before.value(), after.value()))
        .collect()
}

/// Sessions per starting hour
pub fn time_of_day_distribution(sessions: &[MeditationSession]) -> BTreeMap<u32, u32> {
    let mut counts = BTreeMap::new();
    for session in sessions {
        *counts.entry(session.time_of_day.hour()).or_insert(0) += 1;
    }
    counts
}

/// Sessions per location name
pub fn location_frequency(sessions: &[MeditationSession]) -> BTreeMap<String, u32> {
    let mut counts = BTreeMap::new();
    for session in sessions {
        *counts.entry(session.location.clone()).or_insert(0) += 1;
    }
    counts
}
