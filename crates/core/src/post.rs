//! Post output type.
//!
//! [`ExtractedPost`] is the fully normalized form of one accepted export item:
//! parsed date, derived title and slug, and the cleaned markup fragment the
//! renderer embeds verbatim.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::classify::PostKind;
use crate::config::BlogConfig;
use crate::extract::ExtractedContent;
use crate::normalize::{derive_title, format_date, parse_timestamp, slugify};
use crate::postprocess::{PostProcessConfig, postprocess_html};
use crate::Result;

/// One accepted, normalized post.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedPost {
    /// Classification of the container.
    pub kind: PostKind,

    /// Footer date exactly as exported.
    pub timestamp_raw: String,

    /// Parsed footer date.
    pub timestamp: NaiveDateTime,

    /// `YYYY-MM-DD` form of the timestamp.
    pub date: String,

    /// Body text, empty for photo and video posts without one.
    pub body_text: String,

    /// Fallback caption, only set when the body is empty.
    pub caption_text: String,

    /// Display title, boilerplate-stripped and length-capped.
    pub title: String,

    /// `{date}-{title}`, never empty.
    pub slug: String,

    /// Cleaned, path-repaired container markup.
    #[serde(skip_serializing)]
    pub fragment: String,
}

impl ExtractedPost {
    /// Normalizes extracted content into a post.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ChronicleError::UnparseableTimestamp`] when the
    /// footer date cannot be parsed; the caller drops the post.
    pub fn build(kind: PostKind, content: ExtractedContent, container_html: &str, config: &BlogConfig) -> Result<Self> {
        let timestamp = parse_timestamp(&content.timestamp_raw)?;
        let date = format_date(&timestamp);
        let title = derive_title(&content.body_text, &content.caption_text, config.max_title_length);
        let slug = slugify(&date, &title);
        let fragment = postprocess_html(container_html, &PostProcessConfig::from(config));

        Ok(Self {
            kind,
            timestamp_raw: content.timestamp_raw,
            timestamp,
            date,
            body_text: content.body_text,
            caption_text: content.caption_text,
            title,
            slug,
            fragment,
        })
    }

    /// No body text and no usable caption.
    pub fn is_photo_only(&self) -> bool {
        self.body_text.is_empty() && self.caption_text.is_empty()
    }
}
