//! ClickHouse usage-event client
//!
//! Events are inserted over the ClickHouse HTTP interface. Without a
//! configured URL the client only logs each event.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::domain::ports::{AnalyticsClient, UsageEvent};
use crate::error::AnalyticsError;

/// One row of the `events` table
#[derive(Debug, Serialize)]
struct EventRow {
    event_type: &'static str,
    user_id: String,
    event_data: String,
    timestamp: String,
}

impl TryFrom<&UsageEvent> for EventRow {
    type Error = AnalyticsError;

    fn try_from(event: &UsageEvent) -> Result<Self, Self::Error> {
        let event_data =
            serde_json::to_string(event).map_err(|e| AnalyticsError::Query(e.to_string()))?;
        Ok(Self {
            event_type: event.name(),
            user_id: event.user_id().to_string(),
            event_data,
            timestamp: event.timestamp().format("%Y-%m-%d %H:%M:%S").to_string(),
        })
    }
}

/// Build the insert statement for one event
///
/// Rows go in as `JSONEachRow` so payloads never need SQL quoting.
fn insert_statement(event: &UsageEvent) -> Result<String, AnalyticsError> {
    let row = EventRow::try_from(event)?;
    let json = serde_json::to_string(&row).map_err(|e| AnalyticsError::Query(e.to_string()))?;
    Ok(format!("INSERT INTO events FORMAT JSONEachRow\n{}", json))
}

/// Implementation of the ClickHouse analytics client
pub struct ClickHouseClient {
    http: Client,
    base_url: Option<String>,
}

impl ClickHouseClient {
    /// `None` gives a client that only logs events
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.map(|url| url.trim_end_matches('/').to_string()),
        }
    }

    async fn execute_query(&self, base_url: &str, query: String) -> Result<String, AnalyticsError> {
        let resp = self.http.post(base_url).body(query).send().await?;

        if resp.status().is_success() {
            Ok(resp.text().await.unwrap_or_default())
        } else {
            let msg = resp.text().await.unwrap_or_default();
            Err(AnalyticsError::Query(msg))
        }
    }
}

#[async_trait]
impl AnalyticsClient for ClickHouseClient {
    async fn track(&self, event: UsageEvent) -> Result<(), AnalyticsError> {
        let Some(base_url) = &self.base_url else {
            tracing::info!(
                event = event.name(),
                user = %event.user_id(),
                "Usage event"
            );
            return Ok(());
        };

        let query = insert_statement(&event)?;
        self.execute_query(base_url, query).await?;
        Ok(())
    }
}
