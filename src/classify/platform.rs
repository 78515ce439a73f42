// src/classify/platform.rs
//! Maps a link to the human-readable name of the site hosting it.

use url::Url;

pub const UNKNOWN_PLATFORM: &str = "Unknown";

/// Ordered host rules; the first entry with a matching needle wins.
const PLATFORM_RULES: &[(&[&str], &str)] = &[
    (&["reddit.com"], "Reddit"),
    (&["twitter.com", "x.com"], "Twitter/X"),
    (&["linkedin.com"], "LinkedIn"),
    (&["facebook.com"], "Facebook"),
    (&["discord.com"], "Discord"),
    (&["news.ycombinator.com"], "Hacker News"),
    (&["producthunt.com"], "Product Hunt"),
    (&["youtube.com"], "YouTube"),
];

/// Never fails: unparsable input (or a URL without a host) yields `"Unknown"`.
pub fn platform_for_url(link: &str) -> String {
    let Ok(parsed) = Url::parse(link.trim()) else {
        return UNKNOWN_PLATFORM.to_string();
    };
    let Some(host) = parsed.host_str() else {
        return UNKNOWN_PLATFORM.to_string();
    };
    let host = host.to_ascii_lowercase();

    for (needles, label) in PLATFORM_RULES {
        if needles.iter().any(|n| host.contains(n)) {
            return (*label).to_string();
        }
    }

    // Fallback: first label of the host, minus a leading "www."
    let bare = host.strip_prefix("www.").unwrap_or(&host);
    bare.split('.').next().unwrap_or(bare).to_string()
}
