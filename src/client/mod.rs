// src/client/mod.rs
//! Answer-generation clients: a query goes in, raw answer text (plus citations) comes out.

pub mod perplexity;

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::SearchConfig;
use crate::error::Result;
use crate::types::AnswerPayload;

pub use perplexity::PerplexityClient;

pub const ENV_TEST_MODE: &str = "SCOUT_TEST_MODE";

#[async_trait]
pub trait AnswerClient: Send + Sync {
    async fn answer(&self, query: &str) -> Result<AnswerPayload>;
    /// Provider name for logs.
    fn provider_name(&self) -> &'static str;
}

pub type DynAnswerClient = Arc<dyn AnswerClient>;

/// Returns the same payload for every query. Used offline and in tests.
#[derive(Debug, Clone, Default)]
pub struct FixedClient {
    pub payload: AnswerPayload,
}

impl FixedClient {
    pub fn new(payload: AnswerPayload) -> Self {
        Self { payload }
    }

    /// A small mixed payload exercising the prose path and a citation.
    pub fn sample() -> Self {
        Self::new(AnswerPayload {
            content: concat!(
                "Creators on r/NewTubers are comparing revenue splits on independent video hosts.\n",
                "https://www.reddit.com/r/NewTubers/comments/abc123\n",
                "A Hacker News thread asks which platform alternatives handle custom domains well.\n",
                "https://news.ycombinator.com/item?id=4242\n",
            )
            .to_string(),
            citations: vec![crate::types::Citation {
                url: "https://www.producthunt.com/posts/open-video".into(),
                title: Some("Open Video on Product Hunt".into()),
                snippet: Some("Launch discussion about creator-owned video platforms".into()),
                date: None,
            }],
        })
    }
}

#[async_trait]
impl AnswerClient for FixedClient {
    async fn answer(&self, _query: &str) -> Result<AnswerPayload> {
        Ok(self.payload.clone())
    }
    fn provider_name(&self) -> &'static str {
        "fixed"
    }
}

/// Factory:
/// * `SCOUT_TEST_MODE=mock` returns [`FixedClient::sample`].
/// * Otherwise builds the Perplexity client, which needs an API key.
pub fn build_client(cfg: &SearchConfig) -> Result<DynAnswerClient> {
    if std::env::var(ENV_TEST_MODE)
        .map(|v| v == "mock")
        .unwrap_or(false)
    {
        tracing::warn!("{ENV_TEST_MODE}=mock: using fixed answer client");
        return Ok(Arc::new(FixedClient::sample()));
    }
    Ok(Arc::new(PerplexityClient::from_config(cfg)?))
}
