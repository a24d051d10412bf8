use serde::Serialize;

use crate::pipeline::{Blog, RunStats};
use crate::post::ExtractedPost;
use crate::{ChronicleError, Result};

/// Complete JSON output structure
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput<'a> {
    /// Run summary
    pub stats: JsonStats<'a>,
    /// Posts in page order
    pub posts: &'a [ExtractedPost],
}

/// Run counters plus the derived totals the page header shows
#[derive(Debug, Clone, Serialize)]
pub struct JsonStats<'a> {
    #[serde(flatten)]
    pub counts: &'a RunStats,
    pub total: usize,
    pub with_text: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_date: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_date: Option<&'a str>,
}

/// Configuration for JSON output
#[derive(Debug, Clone, Default)]
pub struct JsonConfig {
    /// Pretty print JSON output
    pub pretty: bool,
}

/// Convert the blog to a JSON listing of its posts
pub fn convert_to_json(blog: &Blog, config: &JsonConfig) -> Result<String> {
    let range = blog.date_range();
    let output = JsonOutput {
        stats: JsonStats {
            counts: &blog.stats,
            total: blog.stats.total(),
            with_text: blog.stats.with_text(),
            first_date: range.map(|(first, _)| first),
            last_date: range.map(|(_, last)| last),
        },
        posts: &blog.posts,
    };

    let serialized =
        if config.pretty { serde_json::to_string_pretty(&output) } else { serde_json::to_string(&output) };

    serialized.map_err(|e| ChronicleError::SerializeError(e.to_string()))
}
