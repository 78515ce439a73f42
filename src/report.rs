// src/report.rs
//! One search run: ask the answer client, extract discussions, wrap them in a report.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::client::AnswerClient;
use crate::error::Result;
use crate::extract::{extract_discussions_at, iso_timestamp, ExtractOptions};
use crate::types::{DailyReport, Discussion, ReportStatus};

/// Upstream failures (missing key, transport, bad status) are returned, never swallowed.
pub async fn search_discussions(
    client: &dyn AnswerClient,
    query: &str,
    options: &ExtractOptions,
) -> Result<Vec<Discussion>> {
    let payload = client.answer(query).await?;
    Ok(extract_discussions_at(Utc::now(), &payload, options))
}

impl DailyReport {
    pub fn new(
        now: DateTime<Utc>,
        query: impl Into<String>,
        discussions: Vec<Discussion>,
        status: ReportStatus,
    ) -> Self {
        let ts = iso_timestamp(now);
        Self {
            id: Uuid::new_v4().to_string(),
            date: ts.clone(),
            discussions,
            search_query: query.into(),
            created_at: ts,
            status,
        }
    }

    pub fn completed(now: DateTime<Utc>, query: impl Into<String>, discussions: Vec<Discussion>) -> Self {
        Self::new(now, query, discussions, ReportStatus::Completed)
    }

    /// Envelope a caller can store when the search itself failed.
    pub fn failed(now: DateTime<Utc>, query: impl Into<String>) -> Self {
        Self::new(now, query, Vec::new(), ReportStatus::Failed)
    }
}

pub async fn run_report(
    client: &dyn AnswerClient,
    query: &str,
    options: &ExtractOptions,
) -> Result<DailyReport> {
    let started = std::time::Instant::now();
    let discussions = search_discussions(client, query, options).await?;
    tracing::info!(
        provider = client.provider_name(),
        discussions = discussions.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "report completed"
    );
    Ok(DailyReport::completed(Utc::now(), query, discussions))
}
