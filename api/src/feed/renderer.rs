//! Feed renderer
//!
//! Renders the social feed and dashboard to markdown.

use crate::app::FeedEntry;
use crate::domain::entities::{ActivityKind, MeditationSession};
use crate::domain::stats::DashboardStats;

/// Render a feed to markdown format
pub fn render_feed(feed: &[FeedEntry]) -> String {
    let mut buf = String::new();

    buf.push_str("# Mindful Feed\n\n");

    if feed.is_empty() {
        buf.push_str("_Nothing here yet. Log a session or follow someone._\n");
        return buf;
    }

    for (index, entry) in feed.iter().enumerate() {
        buf.push_str(&render_entry(index + 1, entry));
        buf.push('\n');
    }

    buf.push_str("\n---\n\n");
    buf.push_str("Reply with `POST /feed/{id}/comments` or `POST /feed/{id}/encouragements`.\n");

    buf
}

fn render_entry(index: usize, entry: &FeedEntry) -> String {
    let activity = &entry.activity;
    let when = activity.occurred_at.format("%Y-%m-%d %H:%M");

    let line = match activity.kind {
        ActivityKind::Session => format!("**{}** meditated: {}", entry.actor_name, activity.message),
        ActivityKind::Comment => format!("**{}** commented: \"{}\"", entry.actor_name, activity.message),
        ActivityKind::Encouragement => {
            format!("**{}** sent encouragement: \"{}\"", entry.actor_name, activity.message)
        }
    };

    let reply_to = activity
        .related_id
        .map(|id| format!(" (re #{})", id))
        .unwrap_or_default();

    format!("{}. {}{} _{}_ [#{}]", index, line, reply_to, when, activity.id)
}

/// Render dashboard totals and the most recent sessions
pub fn render_dashboard(stats: &DashboardStats, recent: &[MeditationSession]) -> String {
    let mut buf = String::new();

    buf.push_str("# Dashboard\n\n");
    buf.push_str(&format!("- Total minutes: {}\n", stats.total_minutes));
    buf.push_str(&format!("- Sessions: {}\n", stats.session_count));

    let days = if stats.current_streak == 1 { "day" } else { "days" };
    buf.push_str(&format!("- Current streak: {} {}\n", stats.current_streak, days));

    if !recent.is_empty() {
        buf.push_str("\n## Recent Sessions\n\n");
        for session in recent {
            buf.push_str(&format!(
                "- {} {} - {} ({}m)",
                session.session_date,
                session.time_of_day.format("%H:%M"),
                session.meditation_type,
                session.duration_minutes
            ));
            if !session.location.is_empty() {
                buf.push_str(&format!(" at {}", session.location));
            }
            buf.push('\n');
        }
    }

    buf
}
