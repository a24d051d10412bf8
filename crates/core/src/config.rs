//! Conversion settings.
//!
//! [`BlogConfig`] is an explicit value passed into every pipeline stage; there
//! is no global state. It can be built in code with [`BlogConfig::builder`] or
//! loaded from a TOML file where every key is optional:
//!
//! ```toml
//! username = "Ellie Ellie"
//! blog_title = "The Ellie Edition"
//! include_status_updates = true
//! max_title_length = 60
//! sort_order = "oldest-first"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{ChronicleError, Result};

/// Folder prefix the export uses for post media.
pub const DEFAULT_MEDIA_MARKER: &str = "your_facebook_activity/posts/media/";

/// File name looked up in the user's config directory.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Order in which posts appear on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

/// Settings for one conversion run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    /// Display name as it appears in post headings.
    pub username: String,

    /// Page title shown in the header.
    pub blog_title: String,

    /// Line shown under the page title.
    pub blog_description: String,

    /// Keep text-only status updates (default: false).
    pub include_status_updates: bool,

    /// Keep photo posts (default: true).
    pub include_photos: bool,

    /// Keep video posts (default: true).
    pub include_videos: bool,

    /// Maximum title length in characters, ellipsis included (default: 40).
    pub max_title_length: usize,

    /// Post ordering (default: newest first).
    pub sort_order: SortOrder,

    /// Rewrite media references to point at the local media folder (default: true).
    pub fix_media_paths: bool,

    /// Media folder as seen from the output page (default: "../input/media").
    pub relative_media_path: String,

    /// Path segment after which export media paths are kept verbatim.
    pub media_marker: String,

    /// Directory the page is written to.
    pub output_dir: PathBuf,

    /// Output file name prefix.
    pub output_prefix: String,

    /// Append a `YYYYmmdd-HHMMSS` stamp to the output file name (default: true).
    pub include_timestamp: bool,

    /// Embed the export's own stylesheet in the page (default: true).
    pub include_original_css: bool,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            username: "Ellie Ellie".to_string(),
            blog_title: "The Ellie Edition".to_string(),
            blog_description: "A curated archive of everyday thoughts and snapshots beyond Facebook.".to_string(),
            include_status_updates: false,
            include_photos: true,
            include_videos: true,
            max_title_length: 40,
            sort_order: SortOrder::NewestFirst,
            fix_media_paths: true,
            relative_media_path: "../input/media".to_string(),
            media_marker: DEFAULT_MEDIA_MARKER.to_string(),
            output_dir: PathBuf::from("processing/output"),
            output_prefix: "fb-posts".to_string(),
            include_timestamp: true,
            include_original_css: true,
        }
    }
}

impl BlogConfig {
    /// Creates a new builder for BlogConfig.
    pub fn builder() -> BlogConfigBuilder {
        BlogConfigBuilder::new()
    }

    /// Parses a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| ChronicleError::ConfigError(e.to_string()))
    }

    /// Loads a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .map_err(|e| ChronicleError::ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&source)
    }

    /// Loads `path` when given, else the file in the user config directory
    /// when it exists, else the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match default_config_path() {
            Some(path) if path.is_file() => {
                tracing::debug!(path = %path.display(), "loading user config");
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Returns human-readable warnings about settings that will produce an
    /// empty or surprising page.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.username.trim().is_empty() {
            warnings.push("username is not set; no post can be attributed to you".to_string());
        }

        if !self.include_photos && !self.include_videos && !self.include_status_updates {
            warnings.push("all post types are disabled; no posts will be included in output".to_string());
        }

        if self.max_title_length < 4 {
            warnings.push(format!(
                "max_title_length {} leaves no room for a title before the ellipsis",
                self.max_title_length
            ));
        }

        warnings
    }
}

/// `$CONFIG_DIR/chronicle/config.toml`, when the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("chronicle").join(CONFIG_FILE_NAME))
}

/// Builder for BlogConfig.
///
/// # Example
///
/// ```rust
/// use chronicle_core::{BlogConfig, SortOrder};
///
/// let config = BlogConfig::builder()
///     .username("Jane Doe")
///     .include_status_updates(true)
///     .sort_order(SortOrder::OldestFirst)
///     .build();
/// assert_eq!(config.username, "Jane Doe");
/// ```
pub struct BlogConfigBuilder {
    config: BlogConfig,
}

impl BlogConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: BlogConfig::default() }
    }

    pub fn username(mut self, value: impl Into<String>) -> Self {
        self.config.username = value.into();
        self
    }

    pub fn blog_title(mut self, value: impl Into<String>) -> Self {
        self.config.blog_title = value.into();
        self
    }

    pub fn blog_description(mut self, value: impl Into<String>) -> Self {
        self.config.blog_description = value.into();
        self
    }

    pub fn include_status_updates(mut self, value: bool) -> Self {
        self.config.include_status_updates = value;
        self
    }

    pub fn include_photos(mut self, value: bool) -> Self {
        self.config.include_photos = value;
        self
    }

    pub fn include_videos(mut self, value: bool) -> Self {
        self.config.include_videos = value;
        self
    }

    pub fn max_title_length(mut self, value: usize) -> Self {
        self.config.max_title_length = value;
        self
    }

    pub fn sort_order(mut self, value: SortOrder) -> Self {
        self.config.sort_order = value;
        self
    }

    pub fn fix_media_paths(mut self, value: bool) -> Self {
        self.config.fix_media_paths = value;
        self
    }

    pub fn relative_media_path(mut self, value: impl Into<String>) -> Self {
        self.config.relative_media_path = value.into();
        self
    }

    pub fn output_dir(mut self, value: impl Into<PathBuf>) -> Self {
        self.config.output_dir = value.into();
        self
    }

    pub fn output_prefix(mut self, value: impl Into<String>) -> Self {
        self.config.output_prefix = value.into();
        self
    }

    pub fn include_timestamp(mut self, value: bool) -> Self {
        self.config.include_timestamp = value;
        self
    }

    pub fn include_original_css(mut self, value: bool) -> Self {
        self.config.include_original_css = value;
        self
    }

    /// Builds the BlogConfig.
    pub fn build(self) -> BlogConfig {
        self.config
    }
}

impl Default for BlogConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
