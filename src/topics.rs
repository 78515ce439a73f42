// src/topics.rs
//! Rotating topic list and the research brief sent as the daily query.

use crate::types::SearchTopic;
use crate::types::TopicCategory::{Audience, Business, Competitors, Technology};

/// Keywords in rotation order. The categories are editorial groupings for
/// readers of this list; nothing in the query or the ranking reads them.
pub const SEARCH_TOPICS: &[SearchTopic] = &[
    // Direct company mentions
    SearchTopic { keyword: "Open Video platform", category: Competitors },
    SearchTopic { keyword: "open.video alternative YouTube", category: Competitors },
    // Creator ownership
    SearchTopic { keyword: "creator owned video platforms", category: Audience },
    SearchTopic { keyword: "own your video content", category: Audience },
    SearchTopic { keyword: "YouTube alternatives for creators", category: Competitors },
    SearchTopic { keyword: "video platform 100% revenue", category: Business },
    SearchTopic { keyword: "creator monetization platforms", category: Business },
    // Pain points
    SearchTopic { keyword: "YouTube demonetization problems", category: Audience },
    SearchTopic { keyword: "content creator platform control", category: Audience },
    SearchTopic { keyword: "video hosting own domain", category: Technology },
    SearchTopic { keyword: "building creator brand online", category: Audience },
    SearchTopic { keyword: "independent video platforms", category: Competitors },
    // Business models
    SearchTopic { keyword: "content creator business models", category: Business },
    SearchTopic { keyword: "video content monetization strategies", category: Business },
    SearchTopic { keyword: "building online video business", category: Business },
    SearchTopic { keyword: "creator economy platforms", category: Business },
    SearchTopic { keyword: "video channel website builder", category: Technology },
    // Technical / SEO
    SearchTopic { keyword: "video SEO optimization", category: Technology },
    SearchTopic { keyword: "custom domain video hosting", category: Technology },
    SearchTopic { keyword: "video platform migration", category: Technology },
    SearchTopic { keyword: "import YouTube videos platform", category: Technology },
    // Community
    SearchTopic { keyword: "best YouTube alternatives 2025", category: Competitors },
    SearchTopic { keyword: "video platform recommendations creators", category: Audience },
    SearchTopic { keyword: "leaving YouTube for", category: Audience },
    SearchTopic { keyword: "video hosting control revenue", category: Business },
    SearchTopic { keyword: "creator platform independence", category: Audience },
];

/// Topics embedded in each brief.
pub const TOPICS_PER_QUERY: usize = 10;

/// `n` consecutive topics starting at `day * n`, wrapping around the list.
pub fn topics_for_day(day: u64, n: usize) -> Vec<&'static str> {
    let len = SEARCH_TOPICS.len();
    if len == 0 || n == 0 {
        return Vec::new();
    }
    let start = ((day as usize).wrapping_mul(n)) % len;
    (0..n.min(len))
        .map(|i| SEARCH_TOPICS[(start + i) % len].keyword)
        .collect()
}

fn brief(focus: &[&str]) -> String {
    format!(
        "Find recent discussions (past 2 weeks) in online forums, Reddit, Discord servers, \
Twitter/X threads, Facebook groups, LinkedIn discussions, Hacker News, \
ProductHunt comments, and creator community forums about:

1. Content creators seeking alternatives to YouTube
2. Discussions about platform revenue sharing and creator monetization
3. Video hosting with custom domains and full control
4. Creator economy and building independent brands
5. Open Video platform mentions or similar services
6. Problems with traditional video platforms (demonetization, algorithm changes)
7. Success stories of creators going independent

Focus on: {}

For each relevant discussion found, provide:
- Direct link to the discussion
- Brief description of what's being discussed
- Platform where discussion is happening
- Number of participants/engagement level if available",
        focus.join(", ")
    )
}

/// The standard brief, focused on the first ten topics.
pub fn generate_daily_query() -> String {
    brief(&topics_for_day(0, TOPICS_PER_QUERY))
}

/// Same brief with the focus window rotated by `day`.
pub fn generate_query_for_day(day: u64) -> String {
    brief(&topics_for_day(day, TOPICS_PER_QUERY))
}
