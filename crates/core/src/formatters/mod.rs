pub mod html;
#[cfg(feature = "json")]
pub mod json;

pub use html::{BlogRenderer, render_blog};
#[cfg(feature = "json")]
pub use json::{JsonConfig, JsonOutput, convert_to_json};
