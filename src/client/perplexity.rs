// src/client/perplexity.rs
//! Perplexity chat-completions client. No retries: one request per query.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;

use super::AnswerClient;
use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::types::{AnswerPayload, Citation};

const SYSTEM_PROMPT: &str = "You are a research assistant that finds recent online discussions about video platforms, monetization, creator economy, and social media. Return findings in a structured JSON format with title, description, platform, and link for each discussion found. Focus on recent discussions from Reddit, Hacker News, Product Hunt, Twitter/X, LinkedIn, and Discord.";

/// Upper bound on how much of an error body ends up in the error message.
const ERROR_BODY_CHARS: usize = 300;

pub struct PerplexityClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct Msg<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct Req<'a> {
    model: &'a str,
    messages: Vec<Msg<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct Resp {
    #[serde(default, deserialize_with = "null_as_empty")]
    choices: Vec<Choice>,
    /// Plain URL list (older response shape). Null entries are dropped later.
    #[serde(default, deserialize_with = "null_as_empty")]
    citations: Vec<Option<String>>,
    #[serde(default, deserialize_with = "null_as_empty")]
    search_results: Vec<SearchResult>,
}

/// The API sends `null` for lists it has nothing for; read that as empty.
fn null_as_empty<'de, D, T>(d: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(d)?.unwrap_or_default())
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMsg,
}

#[derive(Deserialize)]
struct ChoiceMsg {
    content: String,
}

#[derive(Deserialize)]
struct SearchResult {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    snippet: Option<String>,
    #[serde(default)]
    date: Option<String>,
}

impl PerplexityClient {
    /// Fails with [`SearchError::Config`] when no API key is available.
    pub fn from_config(cfg: &SearchConfig) -> Result<Self> {
        let api_key = cfg.resolve_api_key()?;
        let http = reqwest::Client::builder()
            .user_agent(concat!("discussion-scout/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            api_url: cfg.api_url.clone(),
            api_key,
            model: cfg.model.clone(),
            temperature: cfg.temperature,
            max_tokens: cfg.max_tokens,
        })
    }
}

pub fn user_prompt(query: &str) -> String {
    format!(
        "Find recent online discussions about: {query}. Please return results in JSON format with an array of discussions, each containing: title, description, platform, link, and date."
    )
}

/// Prefer rich `search_results`; fall back to the bare `citations` URL list.
/// Entries without a usable URL are dropped from either source.
fn collect_citations(
    search_results: Vec<SearchResult>,
    urls: Vec<Option<String>>,
) -> Vec<Citation> {
    let rich: Vec<Citation> = search_results
        .into_iter()
        .filter_map(|r| {
            let url = r.url.filter(|u| !u.trim().is_empty())?;
            Some(Citation {
                url,
                title: r.title,
                snippet: r.snippet,
                date: r.date,
            })
        })
        .collect();
    if !rich.is_empty() {
        return rich;
    }
    urls.into_iter()
        .flatten()
        .filter(|u| !u.trim().is_empty())
        .map(Citation::from_url)
        .collect()
}

#[async_trait]
impl AnswerClient for PerplexityClient {
    async fn answer(&self, query: &str) -> Result<AnswerPayload> {
        let prompt = user_prompt(query);
        let req = Req {
            model: &self.model,
            messages: vec![
                Msg {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                Msg {
                    role: "user",
                    content: &prompt,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let resp = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&req)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = ?e, provider = "perplexity", "answer request failed");
                SearchError::Http(e)
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let body: String = body.chars().take(ERROR_BODY_CHARS).collect();
            tracing::warn!(status = status.as_u16(), provider = "perplexity", "answer API error");
            return Err(SearchError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let body: Resp = resp
            .json()
            .await
            .map_err(|e| SearchError::Decode(e.to_string()))?;
        let content = body
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| SearchError::Decode("response has no choices".into()))?;
        let citations = collect_citations(body.search_results, body.citations);

        tracing::debug!(
            provider = "perplexity",
            content_len = content.len(),
            citations = citations.len(),
            "answer received"
        );
        Ok(AnswerPayload { content, citations })
    }

    fn provider_name(&self) -> &'static str {
        "perplexity"
    }
}
