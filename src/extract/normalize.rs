// src/extract/normalize.rs
//! Final pass over parsed candidates: validity filter, link dedup, id assignment.

use std::collections::HashSet;

use uuid::Uuid;

use crate::types::Discussion;

use super::NO_LINK;

/// Outcome of [`normalize_discussions`].
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub kept: Vec<Discussion>,
    pub filtered: usize,
    pub duplicates: usize,
}

pub fn is_valid(d: &Discussion, min_description_len: usize) -> bool {
    let link = d.link.trim();
    !link.is_empty() && link != NO_LINK && d.description.chars().count() > min_description_len
}

/// Drop invalid records, keep the first record per exact `link`, and give
/// every survivor an id if it lacks one. Order is preserved, and running it
/// again on its own output changes nothing.
pub fn normalize_discussions(raw: Vec<Discussion>, min_description_len: usize) -> Normalized {
    let mut filtered = 0usize;
    let mut duplicates = 0usize;
    let mut seen_links: HashSet<String> = HashSet::with_capacity(raw.len());
    let mut kept = Vec::with_capacity(raw.len());

    for mut d in raw {
        if !is_valid(&d, min_description_len) {
            filtered += 1;
            continue;
        }
        if !seen_links.insert(d.link.clone()) {
            duplicates += 1;
            continue;
        }
        if d.id.is_empty() {
            d.id = Uuid::new_v4().to_string();
        }
        kept.push(d);
    }

    Normalized {
        kept,
        filtered,
        duplicates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    fn disc(link: &str, description: &str) -> Discussion {
        Discussion {
            id: String::new(),
            link: link.into(),
            title: "t".into(),
            description: description.into(),
            platform: "p".into(),
            category: Category::GeneralDiscussion,
            date: "2025-01-01T00:00:00.000Z".into(),
            relevance_score: None,
        }
    }

    #[test]
    fn filters_placeholder_links_and_short_descriptions() {
        let raw = vec![
            disc("#", "long enough description"),
            disc("", "long enough description"),
            disc("https://a.io/1", "ten chars!"),
            disc("https://a.io/2", "eleven chars"),
        ];
        let n = normalize_discussions(raw, 10);
        assert_eq!(n.filtered, 3);
        assert_eq!(n.kept.len(), 1);
        assert_eq!(n.kept[0].link, "https://a.io/2");
    }

    #[test]
    fn first_link_wins_and_case_matters() {
        let raw = vec![
            disc("https://a.io/x", "first description here"),
            disc("https://a.io/x", "second description here"),
            disc("https://a.io/X", "third description here"),
        ];
        let n = normalize_discussions(raw, 10);
        assert_eq!(n.duplicates, 1);
        assert_eq!(n.kept.len(), 2);
        assert_eq!(n.kept[0].description, "first description here");
        assert_eq!(n.kept[1].link, "https://a.io/X");
    }

    #[test]
    fn ids_are_fresh_and_preserved_on_rerun() {
        let raw = vec![
            disc("https://a.io/1", "some description one"),
            disc("https://a.io/2", "some description two"),
        ];
        let first = normalize_discussions(raw, 10);
        assert!(first.kept.iter().all(|d| !d.id.is_empty()));
        assert_ne!(first.kept[0].id, first.kept[1].id);

        let again = normalize_discussions(first.kept.clone(), 10);
        assert_eq!(again.kept, first.kept);
        assert_eq!(again.filtered + again.duplicates, 0);
    }
}
