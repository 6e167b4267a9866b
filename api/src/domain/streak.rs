//! Streak calculation
//!
//! A streak is the number of consecutive calendar days, ending at the most
//! recent date seen, on which at least one session was logged. Any history
//! before the first gap is ignored.

use std::collections::BTreeSet;

use chrono::NaiveDate;

/// Length of the run of consecutive days ending at the latest date
///
/// Duplicates and ordering of `dates` do not matter. Empty input yields 0.
pub fn current_streak<I>(dates: I) -> u32
where
    I: IntoIterator<Item = NaiveDate>,
{
    let unique: BTreeSet<NaiveDate> = dates.into_iter().collect();
    let mut newest_first = unique.into_iter().rev();

    let Some(mut prev) = newest_first.next() else {
        return 0;
    };

    let mut streak = 1;
    for curr in newest_first {
        if (prev - curr).num_days() != 1 {
            break;
        }
        streak += 1;
        prev = curr;
    }
    streak
}

/// Sum of durations in minutes
pub fn total_duration<I>(durations: I) -> i32
where
    I: IntoIterator<Item = i32>,
{
    durations.into_iter().sum()
}

/// Goal requiring a run of consecutive days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakGoal {
    pub target_days: i32,
}

impl StreakGoal {
    pub fn is_met(&self, streak: u32) -> bool {
        i64::from(streak) >= i64::from(self.target_days)
    }

    pub fn is_completed<I>(&self, session_dates: I) -> bool
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        self.is_met(current_streak(session_dates))
    }
}

/// Goal requiring a total number of minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationGoal {
    pub target_minutes: i32,
}

impl DurationGoal {
    pub fn is_met(&self, minutes: i32) -> bool {
        minutes >= self.target_minutes
    }

    pub fn is_completed<I>(&self, durations: I) -> bool
    where
        I: IntoIterator<Item = i32>,
    {
        self.is_met(total_duration(durations))
    }
}
