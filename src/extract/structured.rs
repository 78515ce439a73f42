// src/extract/structured.rs
//! Structured mode: the payload is a JSON object with a `discussions` array.

use serde_json::Value;

use crate::classify::{categorize, platform_for_url};
use crate::types::Discussion;

use super::{Parsed, NO_DESCRIPTION, NO_LINK};

const DISCUSSIONS_FIELD: &str = "discussions";
const FALLBACK_TITLE: &str = "Discussion";

/// Decode `content` as `{ "discussions": [...] }` and map every element to a record.
///
/// Returns `Parsed::NotApplicable` when the text is not JSON, is not an object,
/// or lacks an array under `discussions`. No filtering happens here.
pub fn parse_structured(content: &str, now_iso: &str) -> Parsed {
    let body = strip_code_fence(content);
    let value: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) => {
            tracing::debug!(target: "extract", error = %e, "payload is not json");
            return Parsed::NotApplicable;
        }
    };

    let Some(items) = value.get(DISCUSSIONS_FIELD).and_then(Value::as_array) else {
        tracing::debug!(target: "extract", "json payload has no discussions array");
        return Parsed::NotApplicable;
    };

    Parsed::Records(items.iter().map(|it| map_item(it, now_iso)).collect())
}

fn map_item(item: &Value, now_iso: &str) -> Discussion {
    let raw_link = str_field(item, "link");
    let raw_title = str_field(item, "title");
    let raw_description = str_field(item, "description");

    let link = raw_link.unwrap_or(NO_LINK).to_string();
    let platform = match str_field(item, "platform") {
        Some(p) => p.to_string(),
        None => platform_for_url(raw_link.unwrap_or_default()),
    };
    // Always recomputed; a category supplied by the model is ignored.
    let category = categorize(raw_description.or(raw_title).unwrap_or_default());

    Discussion {
        id: String::new(),
        link,
        title: raw_title.unwrap_or(FALLBACK_TITLE).to_string(),
        description: raw_description.unwrap_or(NO_DESCRIPTION).to_string(),
        platform,
        category,
        date: str_field(item, "date").unwrap_or(now_iso).to_string(),
        relevance_score: relevance_field(item),
    }
}

/// Non-empty string field; empty strings count as absent.
fn str_field<'a>(item: &'a Value, key: &str) -> Option<&'a str> {
    item.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn relevance_field(item: &Value) -> Option<f64> {
    item.get("relevanceScore")
        .or_else(|| item.get("relevance_score"))
        .and_then(Value::as_f64)
}

/// Models like to wrap JSON in a Markdown fence; peel exactly one.
fn strip_code_fence(content: &str) -> &str {
    let t = content.trim();
    let Some(rest) = t.strip_prefix("```") else {
        return t;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return t;
    };
    // Drop the info string ("json"), which may sit on the same line as the body.
    let inner = inner.trim_start_matches([' ', '\t']);
    let info_len = inner
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(inner.len());
    inner[info_len..].trim()
}
