use crate::parse::Element;
use crate::{ChronicleError, Result};

/// Footer node carrying the post date
const DATE_SELECTOR: &str = "footer div._a72d";
/// Post body container
const CONTENT_SELECTOR: &str = "div._2pin";
/// Photo gallery caption nodes
const CAPTION_SELECTOR: &str = "div._3-95";

/// Album names the platform prints under photos
pub const PLATFORM_LABELS: &[&str] = &["Timeline photos", "Mobile uploads", "Profile pictures", "Cover photos"];

/// Body lines that echo metadata rather than content
const UPDATED_PREFIX: &str = "Updated ";
/// Video play prompt
const CLICK_PREFIX: &str = "Click for";

const MIN_CAPTION_CHARS: usize = 5;
const MAX_CAPTION_CHARS: usize = 100;

/// Raw text pulled out of an accepted container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedContent {
    /// Footer date text, trimmed
    pub timestamp_raw: String,
    /// First qualifying body line, empty when the post has none
    pub body_text: String,
    /// Fallback gallery caption, only looked for when the body is empty
    pub caption_text: String,
}

impl ExtractedContent {
    /// Neither body text nor a usable caption
    pub fn is_photo_only(&self) -> bool {
        self.body_text.is_empty() && self.caption_text.is_empty()
    }
}

/// Extract timestamp, body, and caption text from a post container
///
/// # Errors
///
/// Returns [`ChronicleError::MissingSubNode`] when the container has no
/// footer date; such a post can be neither ordered nor titled.
pub fn extract_content(container: &Element) -> Result<ExtractedContent> {
    let date = container
        .select_first(DATE_SELECTOR)?
        .ok_or(ChronicleError::MissingSubNode("footer date"))?;
    let timestamp_raw = date.text().trim().to_string();

    let body_text = extract_body(container)?;
    let caption_text = if body_text.is_empty() { extract_caption(container)? } else { String::new() };

    Ok(ExtractedContent { timestamp_raw, body_text, caption_text })
}

/// First direct child of the content container with real text
///
/// Platform labels count as empty: the fragment cleaner blanks them, so they
/// never read as the user's words.
fn extract_body(container: &Element) -> Result<String> {
    let Some(content) = container.select_first(CONTENT_SELECTOR)? else {
        return Ok(String::new());
    };

    let body = content
        .child_elements("div")
        .iter()
        .map(|div| div.text().trim().to_string())
        .find(|text| {
            !text.is_empty() && !text.starts_with(UPDATED_PREFIX) && !PLATFORM_LABELS.contains(&text.as_str())
        })
        .unwrap_or_default();

    Ok(body)
}

/// First gallery caption that reads like something the user wrote
fn extract_caption(container: &Element) -> Result<String> {
    let caption = container
        .select(CAPTION_SELECTOR)?
        .iter()
        .map(|div| div.text().trim().to_string())
        .find(|text| is_meaningful_caption(text))
        .unwrap_or_default();

    Ok(caption)
}

/// Whether a trimmed caption is worth using as a title source
pub fn is_meaningful_caption(text: &str) -> bool {
    let len = text.chars().count();

    !text.is_empty()
        && len > MIN_CAPTION_CHARS
        && len < MAX_CAPTION_CHARS
        && !PLATFORM_LABELS.contains(&text)
        && !text.starts_with(CLICK_PREFIX)
        && !text.starts_with(UPDATED_PREFIX)
}
