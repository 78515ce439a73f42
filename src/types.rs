// src/types.rs
//! Records produced by the extraction pipeline and the envelopes around them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One extracted discussion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Discussion {
    /// Empty until the normalizer assigns one.
    #[serde(default)]
    pub id: String,
    pub link: String,
    pub title: String,
    pub description: String,
    pub platform: String,
    pub category: Category,
    /// ISO-8601, taken verbatim from the source when it carries one.
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance_score: Option<f64>,
}

/// Topical bucket assigned by the category classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Monetization")]
    Monetization,
    #[serde(rename = "Platform Alternatives")]
    PlatformAlternatives,
    #[serde(rename = "Creator Economy")]
    CreatorEconomy,
    #[serde(rename = "Growth & SEO")]
    GrowthSeo,
    #[serde(rename = "Technical")]
    Technical,
    #[serde(rename = "General Discussion")]
    GeneralDiscussion,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Monetization => "Monetization",
            Category::PlatformAlternatives => "Platform Alternatives",
            Category::CreatorEconomy => "Creator Economy",
            Category::GrowthSeo => "Growth & SEO",
            Category::Technical => "Technical",
            Category::GeneralDiscussion => "General Discussion",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Source metadata the answer API may return next to its text.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Citation {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl Citation {
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

/// Raw answer as handed over by the answer client.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnswerPayload {
    pub content: String,
    #[serde(default)]
    pub citations: Vec<Citation>,
}

impl AnswerPayload {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            citations: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Completed,
    Failed,
}

impl ReportStatus {
    /// Same lowercase word the status has on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::Completed => "completed",
            ReportStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Envelope stored and served per search run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyReport {
    pub id: String,
    pub date: String,
    pub discussions: Vec<Discussion>,
    pub search_query: String,
    pub created_at: String,
    pub status: ReportStatus,
}

/// Editorial grouping of a search topic. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopicCategory {
    Business,
    Audience,
    Competitors,
    Technology,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchTopic {
    pub keyword: &'static str,
    pub category: TopicCategory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discussion_uses_camel_case_and_category_labels() {
        let d = Discussion {
            id: "abc".into(),
            link: "https://reddit.com/r/x".into(),
            title: "t".into(),
            description: "d".into(),
            platform: "Reddit".into(),
            category: Category::GrowthSeo,
            date: "2025-01-01T00:00:00.000Z".into(),
            relevance_score: Some(42.0),
        };
        let v = serde_json::to_value(&d).unwrap();
        assert_eq!(v["category"], "Growth & SEO");
        assert_eq!(v["relevanceScore"], 42.0);

        let back: Discussion = serde_json::from_value(v).unwrap();
        assert_eq!(back, d);
    }

    #[test]
    fn missing_relevance_is_omitted() {
        let d = Discussion {
            id: String::new(),
            link: "l".into(),
            title: "t".into(),
            description: "d".into(),
            platform: "p".into(),
            category: Category::GeneralDiscussion,
            date: "now".into(),
            relevance_score: None,
        };
        let v = serde_json::to_value(&d).unwrap();
        assert!(v.get("relevanceScore").is_none());
    }

    #[test]
    fn report_status_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&ReportStatus::Completed).unwrap(),
            "\"completed\""
        );
    }

    #[test]
    fn report_status_displays_like_the_wire_form() {
        for s in [ReportStatus::Pending, ReportStatus::Completed, ReportStatus::Failed] {
            assert_eq!(serde_json::to_string(&s).unwrap(), format!("\"{s}\""));
        }
        assert_eq!(ReportStatus::Failed.to_string(), "failed");
    }
}
