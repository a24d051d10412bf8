pub mod classify;
pub mod config;
pub mod error;
pub mod extract;
pub mod formatters;
pub mod load;
pub mod locate;
pub mod normalize;
pub mod order;
pub mod parse;
pub mod pipeline;
pub mod post;
pub mod postprocess;

pub use classify::{ClassifiedPost, Classifier, PostKind};
pub use config::{BlogConfig, BlogConfigBuilder, SortOrder, default_config_path};
pub use error::{ChronicleError, Result};
#[doc(hidden)]
pub use extract::ExtractedContent;
pub use extract::extract_content;
pub use formatters::{BlogRenderer, render_blog};
#[cfg(feature = "json")]
pub use formatters::{JsonConfig, JsonOutput, convert_to_json};
pub use load::{output_path, read_export, read_stdin, write_output};
pub use locate::locate_posts;
pub use normalize::{derive_title, parse_timestamp, slugify};
pub use order::{disambiguate_slugs, sort_posts};
pub use parse::Document;
pub use pipeline::{Blog, Converter, RunStats, SectionReport, convert, inspect_sections};
pub use post::ExtractedPost;
#[doc(hidden)]
pub use postprocess::PostProcessConfig;
pub use postprocess::postprocess_html;
