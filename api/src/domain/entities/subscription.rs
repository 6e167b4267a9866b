//! Subscription domain entity

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::UserId;
use crate::error::DomainError;

/// Subscription tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Free,
    Premium,
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::Free => write!(f, "free"),
            Tier::Premium => write!(f, "premium"),
        }
    }
}

impl std::str::FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "free" => Ok(Tier::Free),
            "premium" => Ok(Tier::Premium),
            _ => Err(format!("Unknown tier: {}", s)),
        }
    }
}

/// A user's current subscription
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subscription {
    pub user_id: UserId,
    pub tier: Tier,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl Subscription {
    pub fn new(
        user_id: UserId,
        tier: Tier,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> Result<Self, DomainError> {
        if matches!(end_date, Some(end) if end < start_date) {
            return Err(DomainError::Validation(
                "Subscription end date is before its start date".to_string(),
            ));
        }
        Ok(Self {
            user_id,
            tier,
            start_date,
            end_date,
        })
    }
}
