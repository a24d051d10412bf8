//! Date, title, and slug normalization.
//!
//! Export dates look like `Aug 09, 2025 9:48:19 am`. Titles are derived from
//! the post body (or caption), cut to the first sentence, and scrubbed of the
//! album names the platform prefixes onto photo posts.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

use crate::parse::fragment_text;
use crate::{ChronicleError, Result};

/// Export date format, with seconds
const TIMESTAMP_FORMAT: &str = "%b %d, %Y %I:%M:%S %p";
/// Older exports drop the seconds
const TIMESTAMP_FORMAT_NO_SECONDS: &str = "%b %d, %Y %I:%M %p";

/// Title used when a post has neither body text nor caption
pub const FALLBACK_TITLE: &str = "photos";

const ELLIPSIS: &str = "...";

/// Leading album names stripped from titles, longest variants first
pub const BOILERPLATE_PREFIXES: &[&str] = &[
    "Timeline-photos",
    "Timeline photos",
    "Profile-pictures",
    "Profile pictures",
    "Cover-photos",
    "Cover photos",
    "Mobile-uploads",
    "Mobile uploads",
    "Timeline",
    "Cover",
];

static SENTENCE_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]|\n").expect("sentence regex"));
static MOBILE_UPLOADS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)mobile[-\s]*uploads?").expect("mobile uploads regex"));
static EDGE_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-\s_]+|[-\s_]+$").expect("edge separator regex"));
static SEPARATOR_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-\s_]{2,}").expect("separator regex"));
static NON_SLUG_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("slug regex"));
static SLUG_SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-\s]+").expect("slug separator regex"));

/// Parse a footer date.
///
/// # Errors
///
/// Returns [`ChronicleError::UnparseableTimestamp`] when neither the format
/// with seconds nor the one without matches.
///
/// # Example
///
/// ```rust
/// use chronicle_core::normalize::{format_date, parse_timestamp};
///
/// let ts = parse_timestamp("Aug 09, 2025 9:48:19 am").unwrap();
/// assert_eq!(format_date(&ts), "2025-08-09");
/// ```
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    let raw = raw.trim();

    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT_NO_SECONDS))
        .map_err(|_| ChronicleError::UnparseableTimestamp(raw.to_string()))
}

/// `YYYY-MM-DD`
pub fn format_date(timestamp: &NaiveDateTime) -> String {
    timestamp.format("%Y-%m-%d").to_string()
}

/// Build the display title for a post.
///
/// Body text wins over the caption; a post with neither gets
/// [`FALLBACK_TITLE`].
pub fn derive_title(body_text: &str, caption_text: &str, max_len: usize) -> String {
    let source = if !body_text.is_empty() {
        body_text
    } else if !caption_text.is_empty() {
        caption_text
    } else {
        FALLBACK_TITLE
    };

    clean_title(&first_sentence(source, max_len))
}

/// First sentence of a text, cut to `max_len` characters.
///
/// Markup is stripped and entities decoded first. Longer sentences keep
/// `max_len - 3` characters followed by `...`.
pub fn first_sentence(text: &str, max_len: usize) -> String {
    let text = fragment_text(text);
    let text = text.trim();
    if text.is_empty() {
        return String::new();
    }

    let sentence = SENTENCE_BREAK.split(text).next().unwrap_or(text).trim();
    truncate_chars(sentence, max_len)
}

fn truncate_chars(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }

    let keep = max_len.saturating_sub(ELLIPSIS.len());
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Remove album-name boilerplate from a title.
///
/// # Example
///
/// ```rust
/// use chronicle_core::normalize::clean_title;
///
/// assert_eq!(clean_title("Timeline photos - Sunset"), "Sunset");
/// assert_eq!(clean_title("Mobile uploads"), "");
/// ```
pub fn clean_title(title: &str) -> String {
    if title.is_empty() {
        return String::new();
    }

    let stripped = strip_boilerplate_prefix(title);
    let without_uploads = MOBILE_UPLOADS.replace_all(stripped, "");
    let trimmed = EDGE_SEPARATORS.replace_all(&without_uploads, "");
    SEPARATOR_RUNS.replace_all(&trimmed, "-").to_string()
}

/// Strip at most one leading prefix and the separators after it.
///
/// A prefix only counts as a whole word: "Coverage" keeps its "Cover".
fn strip_boilerplate_prefix(title: &str) -> &str {
    for prefix in BOILERPLATE_PREFIXES {
        let Some(head) = title.get(..prefix.len()) else {
            continue;
        };
        if !head.eq_ignore_ascii_case(prefix) {
            continue;
        }

        let rest = &title[prefix.len()..];
        if rest.chars().next().is_some_and(char::is_alphanumeric) {
            continue;
        }

        return rest.trim_start_matches(|c: char| c == '-' || c == '_' || c.is_whitespace());
    }

    title
}

/// URL- and filename-safe identifier: `{date}-{title}`, or the date alone.
///
/// # Example
///
/// ```rust
/// use chronicle_core::normalize::slugify;
///
/// assert_eq!(slugify("2025-08-09", "Sunset at the lake!"), "2025-08-09-Sunset-at-the-lake");
/// assert_eq!(slugify("2025-08-09", "..."), "2025-08-09");
/// ```
pub fn slugify(date: &str, title: &str) -> String {
    let safe = NON_SLUG_CHARS.replace_all(title, "");
    let safe = SLUG_SEPARATORS.replace_all(safe.trim(), "-");
    let safe = safe.trim_matches('-');

    if safe.is_empty() { date.to_string() } else { format!("{}-{}", date, safe) }
}
