// src/classify/category.rs
//! Keyword-based topical bucketing (case-insensitive substring match).

use crate::types::Category;

/// Ordered rules; first match wins, so "creators discussing monetization"
/// lands in Monetization even though "creator" also matches further down.
const CATEGORY_RULES: &[(&[&str], Category)] = &[
    (&["monetiz", "revenue", "earning"], Category::Monetization),
    (&["alternative", "platform"], Category::PlatformAlternatives),
    (&["creator", "content"], Category::CreatorEconomy),
    (&["seo", "traffic", "growth"], Category::GrowthSeo),
    (&["technical", "api", "integration"], Category::Technical),
];

pub fn categorize(text: &str) -> Category {
    let lower = text.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| lower.contains(n)))
        .map(|(_, cat)| *cat)
        .unwrap_or(Category::GeneralDiscussion)
}
