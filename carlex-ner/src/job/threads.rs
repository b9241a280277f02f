// Discussion Thread Records - Raw Input and Preprocessed Output
//
// Raw threads come from forum scrapes: Reddit-style with nested `replies`,
// or flat comment lists. Comments are flattened depth-first.

use crate::types::SectionOutput;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Moderation placeholders removed before processing
static REMOVED_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\[(?:deleted|removed)\]").unwrap());

/// Thread as scraped
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawThread {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub selftext: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(default)]
    pub created_utc: Option<f64>,
    #[serde(default)]
    pub comments: Vec<RawComment>,
}

/// Comment as scraped, possibly with nested replies
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawComment {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(default)]
    pub created_utc: Option<f64>,
    #[serde(default)]
    pub replies: Vec<RawComment>,
}

/// Comment with a cleaned, non-empty body
#[derive(Debug, Clone, PartialEq)]
pub struct FlatComment {
    pub id: String,
    pub body: String,
    pub author: Option<String>,
    pub score: Option<i64>,
    pub created_utc: Option<f64>,
}

/// Preprocessed thread as written to disk
///
/// A `None` section means the tagger failed on it and the job skipped it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedThread {
    pub id: String,
    pub title: String,
    pub selftext: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_utc: Option<f64>,
    pub comments: Vec<ProcessedComment>,
    pub preprocessed_title: Option<SectionOutput>,
    pub preprocessed_selftext: Option<SectionOutput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedComment {
    pub id: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_utc: Option<f64>,
    pub preprocessed_body: SectionOutput,
}

impl ProcessedThread {
    /// Every section output in the thread
    pub fn sections(&self) -> impl Iterator<Item = &SectionOutput> {
        self.preprocessed_title
            .iter()
            .chain(self.preprocessed_selftext.iter())
            .chain(self.comments.iter().map(|c| &c.preprocessed_body))
    }
}

/// Strip moderation markers and collapse whitespace
pub fn clean_raw_text(text: &str) -> String {
    REMOVED_MARKER_RE
        .replace_all(text, " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Depth-first flattening; a comment empty after cleanup is dropped together
/// with its replies
pub fn flatten_comments(comments: &[RawComment]) -> Vec<FlatComment> {
    let mut flat = Vec::new();
    collect_comments(comments, &mut flat);
    flat
}

fn collect_comments(comments: &[RawComment], flat: &mut Vec<FlatComment>) {
    for comment in comments {
        let body = clean_raw_text(comment.body.as_deref().unwrap_or_default());
        if body.is_empty() {
            continue;
        }
        flat.push(FlatComment {
            id: comment.id.clone(),
            body,
            author: comment.author.clone(),
            score: comment.score,
            created_utc: comment.created_utc,
        });
        collect_comments(&comment.replies, flat);
    }
}
