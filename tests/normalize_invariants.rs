// tests/normalize_invariants.rs
use std::collections::HashSet;

use discussion_scout::extract::{extract_discussions_at, normalize_discussions, ExtractOptions};
use discussion_scout::{AnswerPayload, Citation};

fn noisy_payload() -> AnswerPayload {
    AnswerPayload {
        content: "\
Lots of talk about creator revenue on alternative hosts this week
https://www.reddit.com/r/NewTubers/1
Same thread cross-posted with additional commentary from mods
https://www.reddit.com/r/NewTubers/1
tiny
https://news.ycombinator.com/item?id=5 short
"
        .into(),
        citations: vec![
            Citation::from_url("https://www.reddit.com/r/NewTubers/1"),
            Citation::from_url("https://x.com/creator/status/9"),
            Citation::from_url(""),
        ],
    }
}

#[test]
fn links_unique_and_descriptions_long_enough() {
    let opts = ExtractOptions::default();
    let out = extract_discussions_at(chrono::Utc::now(), &noisy_payload(), &opts);

    let links: HashSet<_> = out.iter().map(|d| d.link.as_str()).collect();
    assert_eq!(links.len(), out.len(), "duplicate links in {out:#?}");
    assert!(out
        .iter()
        .all(|d| d.description.chars().count() > opts.min_description_len));
    assert!(out.iter().all(|d| !d.link.is_empty() && d.link != "#"));
}

#[test]
fn normalizer_is_idempotent() {
    let out = extract_discussions_at(
        chrono::Utc::now(),
        &noisy_payload(),
        &ExtractOptions::default(),
    );
    assert!(!out.is_empty());

    let again = normalize_discussions(out.clone(), 10);
    assert_eq!(again.kept, out);
    assert_eq!(again.filtered, 0);
    assert_eq!(again.duplicates, 0);
}

#[test]
fn ids_are_unique_across_calls() {
    let a = extract_discussions_at(chrono::Utc::now(), &noisy_payload(), &ExtractOptions::default());
    let b = extract_discussions_at(chrono::Utc::now(), &noisy_payload(), &ExtractOptions::default());
    let ids: HashSet<_> = a.iter().chain(b.iter()).map(|d| d.id.clone()).collect();
    assert_eq!(ids.len(), a.len() + b.len());
}
