//! HTML parsing and DOM querying.
//!
//! This module provides the [`Document`] and [`Element`] types the pipeline
//! stages query with CSS selectors. Both are thin wrappers over `scraper`,
//! exposing only what the converter needs: select by selector, walk direct
//! children, collect text.
//!
//! # Example
//!
//! ```rust
//! use chronicle_core::parse::Document;
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <section class="_a6-g"><h2 class="_a6-h">Heading</h2></section>
//!         </body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html).unwrap();
//! let sections = doc.select("section._a6-g").unwrap();
//! assert_eq!(sections[0].text().trim(), "Heading");
//! ```

use scraper::{ElementRef, Html, Selector};

use crate::{ChronicleError, Result};

/// Represents a parsed export document.
///
/// # Example
///
/// ```rust
/// use chronicle_core::parse::Document;
///
/// let html = "<html><head><title>Export</title></head><body><p>Hello</p></body></html>";
/// let doc = Document::parse(html).unwrap();
/// assert_eq!(doc.title(), Some("Export".to_string()));
/// ```
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses an export document.
    ///
    /// html5ever recovers from almost anything, so the only input rejected
    /// here is input with no markup at all.
    ///
    /// # Errors
    ///
    /// Returns [`ChronicleError::MalformedDocument`] for empty input or input
    /// without a single tag.
    pub fn parse(html: &str) -> Result<Self> {
        if html.trim().is_empty() {
            return Err(ChronicleError::MalformedDocument("document is empty".to_string()));
        }
        if !html.contains('<') {
            return Err(ChronicleError::MalformedDocument("document contains no markup".to_string()));
        }

        Ok(Self { html: Html::parse_document(html) })
    }

    /// Selects elements using a CSS selector, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`ChronicleError::HtmlParseError`] if the selector is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chronicle_core::parse::Document;
    ///
    /// let html = r#"<div class="_3-95">First</div><div class="_3-95">Second</div>"#;
    /// let doc = Document::parse(html).unwrap();
    /// let elements = doc.select("div._3-95").unwrap();
    /// assert_eq!(elements.len(), 2);
    /// ```
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = compile_selector(selector)?;
        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Gets the content of the `<title>` element, if present.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>())
    }

    /// Gets the contents of the first `<style>` block.
    ///
    /// Export pages carry their own stylesheet; the renderer can embed it so
    /// the copied post markup keeps its look.
    pub fn stylesheet(&self) -> Option<String> {
        let selector = Selector::parse("style").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>())
    }
}

/// A wrapper around scraper's ElementRef.
///
/// # Example
///
/// ```rust
/// use chronicle_core::parse::Document;
///
/// let html = r#"<div class="_2pin"><div>First</div><div>Second</div></div>"#;
/// let doc = Document::parse(html).unwrap();
/// let content = &doc.select("div._2pin").unwrap()[0];
///
/// assert_eq!(content.text(), "FirstSecond");
/// assert_eq!(content.child_elements("div").len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the outer HTML of this element.
    pub fn outer_html(&self) -> String {
        self.element.html()
    }

    /// Gets the concatenated text of all descendant text nodes.
    ///
    /// Entities are already decoded by the parser.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the direct child elements with the given tag name.
    ///
    /// Text nodes and comments between children are skipped.
    pub fn child_elements(&self, tag: &str) -> Vec<Element<'a>> {
        self.element
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|el| el.value().name().eq_ignore_ascii_case(tag))
            .map(|el| Element { element: el })
            .collect()
    }

    /// Selects descendant elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`ChronicleError::HtmlParseError`] if the selector is invalid.
    pub fn select(&self, selector: &str) -> Result<Vec<Element<'a>>> {
        let sel = compile_selector(selector)?;
        Ok(self.element.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Selects the first descendant matching a CSS selector.
    pub fn select_first(&self, selector: &str) -> Result<Option<Element<'a>>> {
        let sel = compile_selector(selector)?;
        Ok(self.element.select(&sel).next().map(|el| Element { element: el }))
    }
}

fn compile_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ChronicleError::HtmlParseError(format!("Invalid selector: {}", e)))
}

/// Strip tags and decode entities, returning the text content of a snippet.
pub fn fragment_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    fragment.root_element().text().collect()
}
