//! Post classification.
//!
//! An export intermixes the owner's activity with other people's comments,
//! reactions, and shares. A container is only accepted when one of its
//! headings names the configured user in one of a few fixed phrase shapes;
//! anything else is [`PostKind::Rejected`].

use serde::Serialize;

use crate::parse::Element;

/// Heading elements that describe what a container is
pub const HEADING_SELECTOR: &str = "h2._2ph_, h2._a6-h, h2._a6-i";

const STATUS_TEMPLATES: &[&str] = &[
    "{username} updated her status",
    "{username} updated his status",
    "{username} updated their status",
];

const PHOTO_TEMPLATES: &[&str] = &["{username} added a new photo", "{username} added new photos", "{username} added"];

const VIDEO_TEMPLATES: &[&str] = &["{username} added a new video", "{username} added new videos"];

/// What an exported activity item is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PostKind {
    StatusUpdate,
    PhotoPost,
    VideoPost,
    Rejected,
}

impl PostKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::StatusUpdate => "status",
            Self::PhotoPost => "photo",
            Self::VideoPost => "video",
            Self::Rejected => "rejected",
        }
    }
}

/// The outcome of classifying one container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedPost {
    pub kind: PostKind,
    /// Lower-cased heading text the decision was made on
    pub heading_text: String,
}

/// Username-specific phrases, lower-cased
#[derive(Debug, Clone)]
pub struct PhrasePatterns {
    pub status: Vec<String>,
    pub photo: Vec<String>,
    pub video: Vec<String>,
}

impl PhrasePatterns {
    pub fn for_username(username: &str) -> Self {
        let username = normalize_heading(username);
        let expand = |templates: &[&str]| -> Vec<String> {
            templates
                .iter()
                .map(|t| t.replace("{username}", &username))
                .collect()
        };

        Self { status: expand(STATUS_TEMPLATES), photo: expand(PHOTO_TEMPLATES), video: expand(VIDEO_TEMPLATES) }
    }
}

type Rule = (fn(&PhrasePatterns, &str) -> bool, PostKind);

/// Evaluated in order, first match wins
const RULES: &[Rule] = &[
    (mentions_status, PostKind::StatusUpdate),
    (mentions_video, PostKind::VideoPost),
    (mentions_photo_with_video, PostKind::VideoPost),
    (mentions_photo, PostKind::PhotoPost),
];

fn contains_any(phrases: &[String], heading: &str) -> bool {
    phrases.iter().any(|p| heading.contains(p.as_str()))
}

fn mentions_status(patterns: &PhrasePatterns, heading: &str) -> bool {
    contains_any(&patterns.status, heading)
}

fn mentions_video(patterns: &PhrasePatterns, heading: &str) -> bool {
    contains_any(&patterns.video, heading)
}

fn mentions_photo_with_video(patterns: &PhrasePatterns, heading: &str) -> bool {
    mentions_photo(patterns, heading) && heading.contains("video")
}

fn mentions_photo(patterns: &PhrasePatterns, heading: &str) -> bool {
    contains_any(&patterns.photo, heading)
}

/// Lower-case and collapse whitespace runs
fn normalize_heading(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Assigns a [`PostKind`] to post containers for one username.
#[derive(Debug, Clone)]
pub struct Classifier {
    patterns: PhrasePatterns,
    enabled: bool,
}

impl Classifier {
    pub fn new(username: &str) -> Self {
        Self { patterns: PhrasePatterns::for_username(username), enabled: !username.trim().is_empty() }
    }

    /// Classify a container from its heading nodes.
    ///
    /// A container without heading nodes is rejected. Without a username every
    /// container is rejected: the bare phrases would match anyone's activity.
    pub fn classify(&self, container: &Element) -> ClassifiedPost {
        let headings = container.select(HEADING_SELECTOR).unwrap_or_default();
        let joined = headings
            .iter()
            .map(|h| h.text())
            .collect::<Vec<_>>()
            .join(" ");
        let heading_text = normalize_heading(&joined);

        let kind = if headings.is_empty() || !self.enabled {
            PostKind::Rejected
        } else {
            self.classify_heading(&heading_text)
        };

        ClassifiedPost { kind, heading_text }
    }

    /// Classify already-joined heading text.
    pub fn classify_heading(&self, heading_text: &str) -> PostKind {
        if !self.enabled {
            return PostKind::Rejected;
        }

        let heading = normalize_heading(heading_text);
        RULES
            .iter()
            .find(|(matches, _)| matches(&self.patterns, &heading))
            .map(|(_, kind)| *kind)
            .unwrap_or(PostKind::Rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::Document;
    use rstest::rstest;

    fn classify_html(html: &str, username: &str) -> PostKind {
        let doc = Document::parse(html).unwrap();
        let section = &doc.select("section").unwrap()[0];
        Classifier::new(username).classify(section).kind
    }

    #[test]
    fn test_status_update_for_configured_user() {
        let html = r#"<section class="_a6-g"><h2 class="_a6-h">Jane Doe updated her status.</h2></section>"#;
        assert_eq!(classify_html(html, "Jane Doe"), PostKind::StatusUpdate);
        assert_eq!(classify_html(html, "Someone Else"), PostKind::Rejected);
    }

    #[test]
    fn test_no_heading_nodes_rejected() {
        let html = r#"<section class="_a6-g"><div>Ellie Ellie added a new photo.</div></section>"#;
        assert_eq!(classify_html(html, "Ellie Ellie"), PostKind::Rejected);
    }

    #[test]
    fn test_heading_without_marker_class_ignored() {
        let html = r#"<section class="_a6-g"><h2 class="other">Ellie Ellie added a new photo.</h2></section>"#;
        assert_eq!(classify_html(html, "Ellie Ellie"), PostKind::Rejected);
    }

    #[test]
    fn test_multiple_headings_joined() {
        let html = r#"
            <section class="_a6-g">
                <h2 class="_2ph_">Ellie Ellie added</h2>
                <h2 class="_a6-i">a new video to her timeline</h2>
            </section>
        "#;
        let doc = Document::parse(html).unwrap();
        let section = &doc.select("section").unwrap()[0];
        let classified = Classifier::new("Ellie Ellie").classify(section);

        assert_eq!(classified.heading_text, "ellie ellie added a new video to her timeline");
        assert_eq!(classified.kind, PostKind::VideoPost);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let html = r#"<section class="_a6-g"><h2 class="_a6-h">Ellie Ellie added new photos.</h2></section>"#;
        let doc = Document::parse(html).unwrap();
        let section = &doc.select("section").unwrap()[0];
        let classifier = Classifier::new("Ellie Ellie");

        let first = classifier.classify(section);
        let second = classifier.classify(section);
        assert_eq!(first, second);
        assert_eq!(first.kind, PostKind::PhotoPost);
    }

    #[test]
    fn test_empty_username_rejects_everything() {
        let classifier = Classifier::new("   ");
        assert_eq!(classifier.classify_heading(" updated her status"), PostKind::Rejected);
        assert_eq!(classifier.classify_heading("bob added a new photo"), PostKind::Rejected);
    }

    #[rstest]
    #[case("Ellie Ellie updated her status.", PostKind::StatusUpdate)]
    #[case("Ellie Ellie updated his status.", PostKind::StatusUpdate)]
    #[case("ELLIE ELLIE UPDATED THEIR STATUS", PostKind::StatusUpdate)]
    #[case("Ellie Ellie added a new photo.", PostKind::PhotoPost)]
    #[case("Ellie Ellie added new photos to the album Summer.", PostKind::PhotoPost)]
    #[case("Ellie Ellie added 3 photos.", PostKind::PhotoPost)]
    #[case("Ellie Ellie added a new video.", PostKind::VideoPost)]
    #[case("Ellie Ellie added new videos.", PostKind::VideoPost)]
    #[case("Ellie Ellie added a photo and a video.", PostKind::VideoPost)]
    #[case("Ellie  Ellie added a new photo.", PostKind::PhotoPost)]
    #[case("Bob Smith added a new photo to Ellie Ellie's timeline.", PostKind::Rejected)]
    #[case("Ellie Ellie commented on Bob's post.", PostKind::Rejected)]
    #[case("Ellie Ellie shared a link.", PostKind::Rejected)]
    #[case("", PostKind::Rejected)]
    fn test_classify_heading(#[case] heading: &str, #[case] expected: PostKind) {
        assert_eq!(Classifier::new("Ellie Ellie").classify_heading(heading), expected);
    }

    #[test]
    fn test_status_wins_over_added() {
        let classifier = Classifier::new("Ellie Ellie");
        let heading = "ellie ellie updated her status. ellie ellie added a new video.";
        assert_eq!(classifier.classify_heading(heading), PostKind::StatusUpdate);
    }

    #[test]
    fn test_phrase_patterns() {
        let patterns = PhrasePatterns::for_username("Jane Doe");
        assert_eq!(patterns.status[0], "jane doe updated her status");
        assert_eq!(patterns.photo.len(), 3);
        assert_eq!(patterns.video[1], "jane doe added new videos");
    }
}
