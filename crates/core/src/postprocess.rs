use scraper::{Html, Selector};
use url::Url;

use crate::config::{BlogConfig, DEFAULT_MEDIA_MARKER};
use crate::extract::PLATFORM_LABELS;

/// Elements a label blank must never take with it
const MEDIA_SELECTOR: &str = "img, video, source";

/// Configuration for cleaning a post fragment before it is embedded
#[derive(Debug, Clone)]
pub struct PostProcessConfig {
    /// Whether to blank platform label nodes ("Mobile uploads", ...)
    pub blank_labels: bool,
    /// Whether to rewrite media references
    pub fix_media_paths: bool,
    /// Media folder as seen from the output page
    pub media_prefix: String,
    /// Path segment after which export media paths are kept verbatim
    pub media_marker: String,
}

impl Default for PostProcessConfig {
    fn default() -> Self {
        Self {
            blank_labels: true,
            fix_media_paths: true,
            media_prefix: "../input/media".to_string(),
            media_marker: DEFAULT_MEDIA_MARKER.to_string(),
        }
    }
}

impl From<&BlogConfig> for PostProcessConfig {
    fn from(config: &BlogConfig) -> Self {
        Self {
            blank_labels: true,
            fix_media_paths: config.fix_media_paths,
            media_prefix: config.relative_media_path.clone(),
            media_marker: config.media_marker.clone(),
        }
    }
}

/// Clean a post fragment for embedding
///
/// Every step takes the previous fragment and returns a new one.
pub fn postprocess_html(html: &str, config: &PostProcessConfig) -> String {
    let mut processed = html.to_string();

    if config.blank_labels {
        processed = blank_label_nodes(&processed);
    }

    if config.fix_media_paths {
        processed = fix_media_paths(&processed, config);
    }

    processed
}

/// Empty every div whose whole text is a platform label
///
/// The element stays in place so gallery layout does not shift; only its
/// children go. An outer div wrapping nothing but a label is emptied too,
/// but a div holding media next to the label keeps its media.
fn blank_label_nodes(html: &str) -> String {
    let mut fragment = Html::parse_fragment(html);
    let (Ok(selector), Ok(media)) = (Selector::parse("div"), Selector::parse(MEDIA_SELECTOR)) else {
        return html.to_string();
    };

    let label_ids: Vec<ego_tree::NodeId> = fragment
        .select(&selector)
        .filter(|div| {
            let text = div.text().collect::<String>();
            PLATFORM_LABELS.contains(&text.trim()) && div.select(&media).next().is_none()
        })
        .map(|div| div.id())
        .collect();

    if label_ids.is_empty() {
        return html.to_string();
    }

    for id in label_ids {
        let child_ids: Vec<_> = match fragment.tree.get(id) {
            Some(node) => node.children().map(|child| child.id()).collect(),
            None => continue,
        };

        for child_id in child_ids {
            if let Some(mut child) = fragment.tree.get_mut(child_id) {
                child.detach();
            }
        }
    }

    fragment.root_element().inner_html()
}

/// Point media references at the local media folder
fn fix_media_paths(html: &str, config: &PostProcessConfig) -> String {
    let mut output = String::new();
    let mut rewriter = lol_html::HtmlRewriter::new(
        lol_html::Settings {
            element_content_handlers: vec![
                lol_html::element!("img[src]", |el| {
                    if let Some(src) = el.get_attribute("src")
                        && let Some(local) = local_media_path(&src, config)
                    {
                        el.set_attribute("src", &local).ok();
                    }
                    Ok(())
                }),
                lol_html::element!("video[src]", |el| {
                    if let Some(src) = el.get_attribute("src")
                        && let Some(local) = local_media_path(&src, config)
                    {
                        el.set_attribute("src", &local).ok();
                    }
                    Ok(())
                }),
                lol_html::element!("source[src]", |el| {
                    if let Some(src) = el.get_attribute("src")
                        && let Some(local) = local_media_path(&src, config)
                    {
                        el.set_attribute("src", &local).ok();
                    }
                    Ok(())
                }),
                lol_html::element!("a[href]", |el| {
                    if let Some(href) = el.get_attribute("href")
                        && let Some(local) = local_media_path(&href, config)
                    {
                        el.set_attribute("href", &local).ok();
                    }
                    Ok(())
                }),
            ],
            ..Default::default()
        },
        |c: &[u8]| {
            output.push_str(&String::from_utf8_lossy(c));
        },
    );

    match rewriter.write(html.as_bytes()) {
        Ok(_) => {}
        Err(_) => return html.to_string(),
    }

    match rewriter.end() {
        Ok(_) => {}
        Err(_) => return html.to_string(),
    }

    if output.is_empty() { html.to_string() } else { output }
}

/// Rewritten reference, or `None` when the value should stay as it is
///
/// Absolute URLs, bare fragments, and paths already under the media folder
/// are left alone.
pub fn local_media_path(value: &str, config: &PostProcessConfig) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || value.starts_with('#') || Url::parse(value).is_ok() {
        return None;
    }

    let prefix = config.media_prefix.trim_end_matches('/');
    if value.starts_with(&format!("{}/", prefix)) {
        return None;
    }

    let relative = match value.rfind(config.media_marker.as_str()) {
        Some(pos) if !config.media_marker.is_empty() => &value[pos + config.media_marker.len()..],
        _ => value.rsplit('/').next().unwrap_or(value),
    };

    Some(format!("{}/{}", prefix, relative))
}
