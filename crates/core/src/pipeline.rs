//! Main conversion API.
//!
//! [`Converter`] runs the whole pipeline over one export document: locate
//! post containers, classify them, extract and normalize the accepted ones,
//! and order the result. Per-post failures are counted in [`RunStats`] and
//! never abort the run.
//!
//! # Example
//!
//! ```rust
//! use chronicle_core::{BlogConfig, Converter};
//!
//! let html = r#"
//!     <html><body>
//!         <section class="_a6-g">
//!             <h2 class="_a6-h">Jane Doe added a new photo.</h2>
//!             <div class="_3-95">Sunset at the lake</div>
//!             <footer><div class="_a72d">Aug 09, 2025 9:48:19 am</div></footer>
//!         </section>
//!     </body></html>
//! "#;
//!
//! let config = BlogConfig::builder().username("Jane Doe").build();
//! let blog = Converter::new(config).convert(html).unwrap();
//! assert_eq!(blog.posts[0].slug, "2025-08-09-Sunset-at-the-lake");
//! ```

use serde::Serialize;

use crate::classify::{Classifier, PostKind};
use crate::config::BlogConfig;
use crate::extract::extract_content;
use crate::locate::locate_posts;
use crate::order::{disambiguate_slugs, sort_posts};
use crate::parse::{Document, Element};
use crate::post::ExtractedPost;
use crate::{ChronicleError, Result};

/// Counters collected over one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Post containers found in the export.
    pub sections: usize,
    /// Accepted status updates.
    pub status_updates: usize,
    /// Accepted photo posts.
    pub photo_posts: usize,
    /// Accepted video posts.
    pub video_posts: usize,
    /// Containers that are not the user's own post.
    pub rejected: usize,
    /// Posts of a kind the config turns off.
    pub excluded: usize,
    /// Posts dropped for a missing footer date.
    pub missing_date: usize,
    /// Posts dropped for an unparseable footer date.
    pub unparseable_date: usize,
    /// Emitted posts without body text or caption.
    pub photo_only: usize,
}

impl RunStats {
    /// Posts that made it onto the page.
    pub fn total(&self) -> usize {
        self.status_updates + self.photo_posts + self.video_posts
    }

    /// Emitted posts with body text or a caption.
    pub fn with_text(&self) -> usize {
        self.total() - self.photo_only
    }

    /// Posts dropped for a per-post error.
    pub fn skipped(&self) -> usize {
        self.missing_date + self.unparseable_date
    }

    fn record_skip(&mut self, error: &ChronicleError) {
        match error {
            ChronicleError::MissingSubNode(_) => self.missing_date += 1,
            ChronicleError::UnparseableTimestamp(_) => self.unparseable_date += 1,
            _ => {}
        }
    }

    fn record_kind(&mut self, kind: PostKind) {
        match kind {
            PostKind::StatusUpdate => self.status_updates += 1,
            PostKind::PhotoPost => self.photo_posts += 1,
            PostKind::VideoPost => self.video_posts += 1,
            PostKind::Rejected => self.rejected += 1,
        }
    }
}

/// The ordered posts of one export plus the run summary.
#[derive(Debug, Clone, Serialize)]
pub struct Blog {
    pub posts: Vec<ExtractedPost>,
    pub stats: RunStats,
    /// The export's own stylesheet, when it has one.
    #[serde(skip_serializing)]
    pub stylesheet: Option<String>,
}

impl Blog {
    /// Earliest and latest post dates.
    pub fn date_range(&self) -> Option<(&str, &str)> {
        let first = self.posts.iter().min_by_key(|p| p.timestamp)?;
        let last = self.posts.iter().max_by_key(|p| p.timestamp)?;
        Some((first.date.as_str(), last.date.as_str()))
    }
}

/// One line of the section inspection report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionReport {
    /// 1-based position among the post containers.
    pub index: usize,
    pub kind: PostKind,
    pub heading: String,
}

/// Runs the export-to-blog pipeline with one configuration.
#[derive(Debug, Clone)]
pub struct Converter {
    config: BlogConfig,
    classifier: Classifier,
}

impl Converter {
    pub fn new(config: BlogConfig) -> Self {
        let classifier = Classifier::new(&config.username);
        Self { config, classifier }
    }

    pub fn config(&self) -> &BlogConfig {
        &self.config
    }

    /// Parses and converts an export document.
    ///
    /// # Errors
    ///
    /// Only run-level errors are returned: a malformed document or an
    /// invalid selector. Per-post failures end up in [`RunStats`].
    pub fn convert(&self, html: &str) -> Result<Blog> {
        let doc = Document::parse(html)?;
        self.convert_document(&doc)
    }

    /// Converts an already parsed export document.
    pub fn convert_document(&self, doc: &Document) -> Result<Blog> {
        let mut stats = RunStats::default();
        let mut posts = Vec::new();

        let containers = locate_posts(doc)?;
        stats.sections = containers.len();

        for (index, container) in containers.iter().enumerate() {
            let classified = self.classifier.classify(container);
            tracing::debug!(
                index = index + 1,
                kind = classified.kind.label(),
                heading = %classified.heading_text,
                "classified section"
            );

            if classified.kind == PostKind::Rejected {
                stats.rejected += 1;
                continue;
            }

            if !self.is_included(classified.kind) {
                stats.excluded += 1;
                continue;
            }

            match self.build_post(classified.kind, container) {
                Ok(post) => {
                    stats.record_kind(post.kind);
                    if post.is_photo_only() {
                        stats.photo_only += 1;
                    }
                    posts.push(post);
                }
                Err(e) if e.is_post_level() => {
                    tracing::warn!(index = index + 1, error = %e, "skipping post");
                    stats.record_skip(&e);
                }
                Err(e) => return Err(e),
            }
        }

        sort_posts(&mut posts, self.config.sort_order);
        disambiguate_slugs(&mut posts);

        tracing::info!(
            sections = stats.sections,
            posts = stats.total(),
            rejected = stats.rejected,
            skipped = stats.skipped(),
            "conversion finished"
        );

        let stylesheet = if self.config.include_original_css { doc.stylesheet() } else { None };

        Ok(Blog { posts, stats, stylesheet })
    }

    /// Classification of every post container, for debugging a username or
    /// an unfamiliar export.
    pub fn inspect(&self, html: &str) -> Result<Vec<SectionReport>> {
        let doc = Document::parse(html)?;
        let reports = locate_posts(&doc)?
            .iter()
            .enumerate()
            .map(|(i, container)| {
                let classified = self.classifier.classify(container);
                SectionReport { index: i + 1, kind: classified.kind, heading: classified.heading_text }
            })
            .collect();

        Ok(reports)
    }

    fn is_included(&self, kind: PostKind) -> bool {
        match kind {
            PostKind::StatusUpdate => self.config.include_status_updates,
            PostKind::PhotoPost => self.config.include_photos,
            PostKind::VideoPost => self.config.include_videos,
            PostKind::Rejected => false,
        }
    }

    fn build_post(&self, kind: PostKind, container: &Element) -> Result<ExtractedPost> {
        let content = extract_content(container)?;
        ExtractedPost::build(kind, content, &container.outer_html(), &self.config)
    }
}

/// Converts an export document with the given configuration.
pub fn convert(html: &str, config: &BlogConfig) -> Result<Blog> {
    Converter::new(config.clone()).convert(html)
}

/// Lists the classification of every post container.
pub fn inspect_sections(html: &str, config: &BlogConfig) -> Result<Vec<SectionReport>> {
    Converter::new(config.clone()).inspect(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SortOrder;

    fn section(heading: &str, body: &str, date: &str) -> String {
        format!(
            r#"<section class="_a6-g">
                <h2 class="_2ph_ _a6-h">{}</h2>
                <div class="_2pin"><div>{}</div></div>
                <footer><div class="_a72d">{}</div></footer>
            </section>"#,
            heading, body, date
        )
    }

    fn export(sections: &[String]) -> String {
        format!("<html><head><style>body {{ margin: 0; }}</style></head><body>{}</body></html>", sections.concat())
    }

    fn all_kinds() -> BlogConfig {
        BlogConfig::builder().include_status_updates(true).build()
    }

    #[test]
    fn test_convert_counts_and_orders() {
        let html = export(&[
            section("Ellie Ellie updated her status.", "Morning run done. Legs hurt.", "Jan 05, 2024 7:00:00 am"),
            section("Ellie Ellie added a new photo.", "", "Mar 10, 2024 6:30:00 pm"),
            section("Bob Smith added a new photo.", "Not mine", "Feb 01, 2024 1:00:00 pm"),
            section("Ellie Ellie added a new video.", "Clip", "Feb 11, 2024 1:00:00 pm"),
        ]);

        let blog = convert(&html, &all_kinds()).unwrap();
        let slugs: Vec<&str> = blog.posts.iter().map(|p| p.slug.as_str()).collect();

        assert_eq!(slugs, vec!["2024-03-10-photos", "2024-02-11-Clip", "2024-01-05-Morning-run-done"]);
        assert_eq!(blog.stats.sections, 4);
        assert_eq!(blog.stats.status_updates, 1);
        assert_eq!(blog.stats.photo_posts, 1);
        assert_eq!(blog.stats.video_posts, 1);
        assert_eq!(blog.stats.rejected, 1);
        assert_eq!(blog.stats.photo_only, 1);
        assert_eq!(blog.stats.with_text(), 2);
        assert_eq!(blog.date_range(), Some(("2024-01-05", "2024-03-10")));
        assert!(blog.stylesheet.unwrap().contains("margin: 0"));
    }

    #[test]
    fn test_status_updates_excluded_by_default() {
        let html = export(&[section("Ellie Ellie updated her status.", "Hello", "Jan 05, 2024 7:00:00 am")]);
        let blog = convert(&html, &BlogConfig::default()).unwrap();

        assert!(blog.posts.is_empty());
        assert_eq!(blog.stats.excluded, 1);
        assert_eq!(blog.date_range(), None);
    }

    #[test]
    fn test_bad_posts_are_skipped() {
        let html = export(&[
            section("Ellie Ellie added a new photo.", "Good", "Jan 05, 2024 7:00:00 am"),
            section("Ellie Ellie added a new photo.", "Bad date", "someday"),
            r#"<section class="_a6-g"><h2 class="_a6-h">Ellie Ellie added a new photo.</h2></section>"#.to_string(),
        ]);

        let blog = convert(&html, &BlogConfig::default()).unwrap();
        assert_eq!(blog.posts.len(), 1);
        assert_eq!(blog.stats.unparseable_date, 1);
        assert_eq!(blog.stats.missing_date, 1);
        assert_eq!(blog.stats.skipped(), 2);
    }

    #[test]
    fn test_label_body_uses_caption_title() {
        let html = export(&[r#"<section class="_a6-g">
                <h2 class="_a6-h">Ellie Ellie added a new photo.</h2>
                <div class="_2pin"><div>Mobile uploads</div></div>
                <div class="_3-95">Sunset at the lake</div>
                <footer><div class="_a72d">Aug 09, 2025 9:48:19 am</div></footer>
            </section>"#
            .to_string()]);

        let blog = convert(&html, &BlogConfig::default()).unwrap();
        assert_eq!(blog.posts[0].slug, "2025-08-09-Sunset-at-the-lake");
        assert_eq!(blog.stats.photo_only, 0);
        assert_eq!(blog.stats.with_text(), 1);
    }

    #[test]
    fn test_repeated_slugs_are_unique() {
        let html = export(&[
            section("Ellie Ellie added a new photo.", "Sunset", "Aug 09, 2025 9:00:00 pm"),
            section("Ellie Ellie added a new photo.", "Sunset", "Aug 09, 2025 8:00:00 am"),
        ]);

        let blog = convert(&html, &BlogConfig::default()).unwrap();
        let slugs: Vec<&str> = blog.posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["2025-08-09-Sunset", "2025-08-09-Sunset-2"]);
    }

    #[test]
    fn test_oldest_first() {
        let html = export(&[
            section("Ellie Ellie added a new photo.", "Second", "Feb 05, 2024 7:00:00 am"),
            section("Ellie Ellie added a new photo.", "First", "Jan 05, 2024 7:00:00 am"),
        ]);
        let config = BlogConfig::builder().sort_order(SortOrder::OldestFirst).build();

        let blog = convert(&html, &config).unwrap();
        assert_eq!(blog.posts[0].title, "First");
        assert_eq!(blog.posts[1].title, "Second");
    }

    #[test]
    fn test_no_containers() {
        let blog = convert("<html><body><p>empty export</p></body></html>", &BlogConfig::default()).unwrap();
        assert!(blog.posts.is_empty());
        assert_eq!(blog.stats, RunStats::default());
    }

    #[test]
    fn test_malformed_document() {
        let result = convert("", &BlogConfig::default());
        assert!(matches!(result, Err(ChronicleError::MalformedDocument(_))));
    }

    #[test]
    fn test_original_css_disabled() {
        let html = export(&[]);
        let config = BlogConfig::builder().include_original_css(false).build();
        assert!(convert(&html, &config).unwrap().stylesheet.is_none());
    }

    #[test]
    fn test_inspect_sections() {
        let html = export(&[
            section("Ellie Ellie added a new photo.", "", "Jan 05, 2024 7:00:00 am"),
            section("Bob Smith shared a link.", "", "Jan 06, 2024 7:00:00 am"),
        ]);

        let reports = inspect_sections(&html, &BlogConfig::default()).unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].kind, PostKind::PhotoPost);
        assert_eq!(reports[1].index, 2);
        assert_eq!(reports[1].kind, PostKind::Rejected);
        assert_eq!(reports[1].heading, "bob smith shared a link.");
    }
}
