// src/extract/heuristic.rs
//! Heuristic mode: rebuild records from free prose, one line at a time.
//!
//! A single candidate is accumulated until the next line carrying a URL closes
//! it. The closing URL becomes the emitted record's link, and the same line
//! (URL removed) seeds the next candidate. Citations, when present, are an
//! independent source and are appended after the line-derived records.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::classify::{categorize, platform_for_url};
use crate::types::{Citation, Discussion};

use super::title::derive_title;
use super::NO_DESCRIPTION;

static RE_URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://[^\s)]+").expect("url regex"));
static RE_LIST_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+\.|\*|-)").expect("list marker regex"));

/// Parser state between lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    None,
    Accumulating {
        description: String,
        link: Option<String>,
    },
}

impl Candidate {
    fn append(self, text: &str) -> Candidate {
        match self {
            Candidate::None => Candidate::Accumulating {
                description: text.to_string(),
                link: None,
            },
            Candidate::Accumulating {
                mut description,
                link,
            } => {
                if !description.is_empty() {
                    description.push(' ');
                }
                description.push_str(text);
                Candidate::Accumulating { description, link }
            }
        }
    }

    fn description(&self) -> Option<&str> {
        match self {
            Candidate::Accumulating { description, .. } if !description.is_empty() => {
                Some(description)
            }
            _ => None,
        }
    }
}

/// What one line did to the state machine.
#[derive(Debug, PartialEq)]
pub enum Step {
    Skipped,
    Appended,
    /// A URL line; carries the record closed by it, if any.
    Linked(Option<Discussion>),
}

/// Line-by-line extractor. `min_line_len` is the exclusive length a non-URL
/// line must exceed (in chars) to count as description text.
#[derive(Debug)]
pub struct LineParser<'a> {
    state: Candidate,
    min_line_len: usize,
    now_iso: &'a str,
    out: Vec<Discussion>,
}

impl<'a> LineParser<'a> {
    pub fn new(min_line_len: usize, now_iso: &'a str) -> Self {
        Self {
            state: Candidate::None,
            min_line_len,
            now_iso,
            out: Vec::new(),
        }
    }

    pub fn state(&self) -> &Candidate {
        &self.state
    }

    pub fn feed(&mut self, line: &str) -> Step {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Step::Skipped;
        }

        if let Some(m) = RE_URL.find(trimmed) {
            let url = m.as_str();
            let closed = self
                .state
                .description()
                .map(|desc| build_record(url, desc, self.now_iso));
            if let Some(rec) = &closed {
                self.out.push(rec.clone());
            }
            self.state = Candidate::Accumulating {
                description: trimmed.replacen(url, "", 1).trim().to_string(),
                link: Some(url.to_string()),
            };
            return Step::Linked(closed);
        }

        if trimmed.chars().count() > self.min_line_len && !RE_LIST_MARKER.is_match(trimmed) {
            let prev = std::mem::replace(&mut self.state, Candidate::None);
            self.state = prev.append(trimmed);
            return Step::Appended;
        }

        Step::Skipped
    }

    /// Emit the open candidate if it has both a link and text, and return all records.
    pub fn finish(mut self) -> Vec<Discussion> {
        if let Candidate::Accumulating {
            description,
            link: Some(link),
        } = &self.state
        {
            if !description.is_empty() {
                let rec = build_record(link, description, self.now_iso);
                self.out.push(rec);
            }
        }
        self.out
    }
}

/// Run the line parser over `content`, then append one record per citation with a URL.
pub fn parse_heuristic(
    content: &str,
    citations: &[Citation],
    min_line_len: usize,
    now_iso: &str,
) -> Vec<Discussion> {
    let mut parser = LineParser::new(min_line_len, now_iso);
    for line in content.lines() {
        parser.feed(line);
    }
    let mut out = parser.finish();
    let from_lines = out.len();

    out.extend(
        citations
            .iter()
            .filter_map(|c| citation_record(c, now_iso)),
    );

    tracing::debug!(
        target: "extract",
        from_lines,
        from_citations = out.len() - from_lines,
        "heuristic parse done"
    );
    out
}

fn build_record(link: &str, description: &str, now_iso: &str) -> Discussion {
    Discussion {
        id: String::new(),
        link: link.to_string(),
        title: derive_title(description),
        description: description.to_string(),
        platform: platform_for_url(link),
        category: categorize(description),
        date: now_iso.to_string(),
        relevance_score: None,
    }
}

fn citation_record(c: &Citation, now_iso: &str) -> Option<Discussion> {
    let url = c.url.trim();
    if url.is_empty() {
        return None;
    }
    let snippet = c.snippet.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let description = snippet.unwrap_or(NO_DESCRIPTION);
    let title = c
        .title
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| derive_title(description));

    Some(Discussion {
        id: String::new(),
        link: url.to_string(),
        title,
        description: description.to_string(),
        platform: platform_for_url(url),
        category: categorize(description),
        date: c.date.clone().unwrap_or_else(|| now_iso.to_string()),
        relevance_score: None,
    })
}
