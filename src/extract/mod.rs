// src/extract/mod.rs
//! Extraction pipeline: raw answer text -> ordered, deduplicated discussions.
//!
//! Strategies are tried in order (structured JSON first, then heuristic prose);
//! the first one that applies produces the candidates, which then go through
//! [`normalize::normalize_discussions`]. Nothing in here returns an error: an
//! empty list is a normal result.

pub mod heuristic;
pub mod normalize;
pub mod structured;
pub mod title;

use chrono::{DateTime, SecondsFormat, Utc};
use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::types::{AnswerPayload, Discussion};

pub use heuristic::{parse_heuristic, Candidate, LineParser, Step};
pub use normalize::{normalize_discussions, Normalized};
pub use structured::parse_structured;
pub use title::derive_title;

/// Placeholder link for structured items without one; never survives normalization.
pub const NO_LINK: &str = "#";
pub const NO_DESCRIPTION: &str = "No description available";

fn default_min_line_len() -> usize {
    15
}
fn default_min_description_len() -> usize {
    10
}

/// Tunables for the heuristic parser and the validity filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractOptions {
    /// A prose line must be longer than this (chars) to count as description.
    #[serde(default = "default_min_line_len")]
    pub min_line_len: usize,
    /// A record's description must be longer than this (chars) to be kept.
    #[serde(default = "default_min_description_len")]
    pub min_description_len: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            min_line_len: default_min_line_len(),
            min_description_len: default_min_description_len(),
        }
    }
}

/// Result of a single strategy.
#[derive(Debug, PartialEq)]
pub enum Parsed {
    Records(Vec<Discussion>),
    NotApplicable,
}

/// Input shared by all strategies for one extraction call.
#[derive(Debug, Clone, Copy)]
pub struct ExtractInput<'a> {
    pub payload: &'a AnswerPayload,
    pub options: &'a ExtractOptions,
    pub now_iso: &'a str,
}

pub trait ParseStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn parse(&self, input: &ExtractInput<'_>) -> Parsed;
}

pub struct StructuredStrategy;

impl ParseStrategy for StructuredStrategy {
    fn name(&self) -> &'static str {
        "structured"
    }
    fn parse(&self, input: &ExtractInput<'_>) -> Parsed {
        parse_structured(&input.payload.content, input.now_iso)
    }
}

/// Always applies; the end of the chain.
pub struct HeuristicStrategy;

impl ParseStrategy for HeuristicStrategy {
    fn name(&self) -> &'static str {
        "heuristic"
    }
    fn parse(&self, input: &ExtractInput<'_>) -> Parsed {
        Parsed::Records(parse_heuristic(
            &input.payload.content,
            &input.payload.citations,
            input.options.min_line_len,
            input.now_iso,
        ))
    }
}

static DEFAULT_STRATEGIES: [&dyn ParseStrategy; 2] = [&StructuredStrategy, &HeuristicStrategy];

pub fn default_strategies() -> &'static [&'static dyn ParseStrategy] {
    &DEFAULT_STRATEGIES
}

/// One-time metrics registration.
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("extract_runs_total", "Extraction pipeline invocations.");
        describe_counter!(
            "extract_fallback_total",
            "Runs where structured mode did not apply."
        );
        describe_counter!("extract_records_total", "Discussions returned.");
        describe_counter!(
            "extract_filtered_total",
            "Candidates dropped for missing link or short description."
        );
        describe_counter!(
            "extract_dedup_total",
            "Candidates dropped as duplicate links."
        );
    });
}

pub fn iso_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Extract with default options, stamping records with the current time.
pub fn extract_discussions(payload: &AnswerPayload) -> Vec<Discussion> {
    extract_discussions_at(Utc::now(), payload, &ExtractOptions::default())
}

pub fn extract_discussions_at(
    now: DateTime<Utc>,
    payload: &AnswerPayload,
    options: &ExtractOptions,
) -> Vec<Discussion> {
    extract_with(default_strategies(), now, payload, options)
}

/// Run `strategies` in order; the first that applies wins.
pub fn extract_with(
    strategies: &[&dyn ParseStrategy],
    now: DateTime<Utc>,
    payload: &AnswerPayload,
    options: &ExtractOptions,
) -> Vec<Discussion> {
    ensure_metrics_described();
    counter!("extract_runs_total").increment(1);

    let now_iso = iso_timestamp(now);
    let input = ExtractInput {
        payload,
        options,
        now_iso: &now_iso,
    };

    let mut used = None;
    let mut raw = Vec::new();
    for (idx, strategy) in strategies.iter().enumerate() {
        match strategy.parse(&input) {
            Parsed::Records(v) => {
                if idx > 0 {
                    counter!("extract_fallback_total").increment(1);
                }
                used = Some(strategy.name());
                raw = v;
                break;
            }
            Parsed::NotApplicable => {
                tracing::debug!(target: "extract", strategy = strategy.name(), "not applicable");
            }
        }
    }

    let candidates = raw.len();
    let Normalized {
        kept,
        filtered,
        duplicates,
    } = normalize_discussions(raw, options.min_description_len);

    counter!("extract_records_total").increment(kept.len() as u64);
    counter!("extract_filtered_total").increment(filtered as u64);
    counter!("extract_dedup_total").increment(duplicates as u64);

    tracing::info!(
        target: "extract",
        strategy = used.unwrap_or("none"),
        candidates,
        kept = kept.len(),
        filtered,
        duplicates,
        "extraction finished"
    );

    kept
}
