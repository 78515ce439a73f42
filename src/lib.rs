// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod classify;
pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod report;
pub mod store;
pub mod topics;
pub mod types;

// ---- Re-exports for stable public API ----
pub use crate::classify::{categorize, platform_for_url};
pub use crate::client::{build_client, AnswerClient, FixedClient, PerplexityClient};
pub use crate::error::SearchError;
pub use crate::extract::{extract_discussions, extract_discussions_at, ExtractOptions};
pub use crate::report::{run_report, search_discussions};
pub use crate::store::ReportStore;
pub use crate::types::{AnswerPayload, Category, Citation, DailyReport, Discussion, ReportStatus};
