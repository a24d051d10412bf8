use crate::Result;
use crate::parse::{Document, Element};

/// Structural marker of one exported activity item
pub const POST_CONTAINER_SELECTOR: &str = "section._a6-g";

/// Collect every post container in document order
///
/// No filtering by content happens here; a document without any container
/// yields an empty list.
pub fn locate_posts(doc: &Document) -> Result<Vec<Element<'_>>> {
    let containers = doc.select(POST_CONTAINER_SELECTOR)?;
    tracing::debug!(count = containers.len(), "located post containers");
    Ok(containers)
}
