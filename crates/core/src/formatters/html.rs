use serde::Serialize;
use tera::{Context, Tera};

use crate::Result;
use crate::config::BlogConfig;
use crate::pipeline::Blog;
use crate::post::ExtractedPost;

const PAGE_TEMPLATE: &str = include_str!("../../templates/blog.html");
const STYLE_TEMPLATE: &str = include_str!("../../templates/style.css");

/// One article as the page template sees it
#[derive(Debug, Serialize)]
struct PostView<'a> {
    slug: &'a str,
    /// Title, or the date when the title is empty
    heading: &'a str,
    date: &'a str,
    datetime: String,
    fragment: &'a str,
}

impl<'a> From<&'a ExtractedPost> for PostView<'a> {
    fn from(post: &'a ExtractedPost) -> Self {
        let heading = if post.title.is_empty() { &post.date } else { &post.title };
        Self {
            slug: &post.slug,
            heading,
            date: &post.date,
            datetime: post.timestamp.format("%Y-%m-%dT%H:%M:%S").to_string(),
            fragment: &post.fragment,
        }
    }
}

/// The blog page renderer, wrapping Tera.
///
/// Text from the export and the config is autoescaped; only post fragments
/// and the export stylesheet are embedded as they are.
pub struct BlogRenderer {
    tera: Tera,
}

impl BlogRenderer {
    /// Create a renderer with the built-in page template.
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![("style.css", STYLE_TEMPLATE), ("blog.html", PAGE_TEMPLATE)])?;
        Ok(Self { tera })
    }

    /// Render the blog as one standalone HTML page.
    pub fn render(&self, blog: &Blog, config: &BlogConfig) -> Result<String> {
        let posts: Vec<PostView> = blog.posts.iter().map(PostView::from).collect();
        let range = blog.date_range();

        let mut context = Context::new();
        context.insert("config", config);
        context.insert("stats", &blog.stats);
        context.insert("total", &blog.stats.total());
        context.insert("with_text", &blog.stats.with_text());
        context.insert("first_date", &range.map(|(first, _)| first));
        context.insert("last_date", &range.map(|(_, last)| last));
        context.insert("stylesheet", &blog.stylesheet.as_deref().map(sanitize_stylesheet));
        context.insert("posts", &posts);

        Ok(self.tera.render("blog.html", &context)?)
    }
}

/// Render the blog with the built-in page template
pub fn render_blog(blog: &Blog, config: &BlogConfig) -> Result<String> {
    BlogRenderer::new()?.render(blog, config)
}

/// Keep an embedded stylesheet from closing the style element early
fn sanitize_stylesheet(css: &str) -> String {
    css.replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::PostKind;
    use crate::normalize::parse_timestamp;
    use crate::pipeline::RunStats;

    fn post(timestamp: &str, title: &str, slug: &str, fragment: &str) -> ExtractedPost {
        let timestamp = parse_timestamp(timestamp).unwrap();
        ExtractedPost {
            kind: PostKind::PhotoPost,
            timestamp_raw: String::new(),
            timestamp,
            date: timestamp.format("%Y-%m-%d").to_string(),
            body_text: title.to_string(),
            caption_text: String::new(),
            title: title.to_string(),
            slug: slug.to_string(),
            fragment: fragment.to_string(),
        }
    }

    fn blog(posts: Vec<ExtractedPost>) -> Blog {
        let stats = RunStats { photo_posts: posts.len(), ..Default::default() };
        Blog { posts, stats, stylesheet: None }
    }

    fn render(blog: &Blog) -> String {
        render_blog(blog, &BlogConfig::default()).unwrap()
    }

    #[test]
    fn test_render_empty_blog() {
        let html = render(&blog(Vec::new()));

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Total posts: 0"));
        assert!(html.contains("Date range: N/A"));
        assert!(html.contains(".blog-post {"));
        assert!(!html.contains("<article"));
        assert!(!html.contains("<script"));
    }

    #[test]
    fn test_render_posts() {
        let posts = vec![
            post("Mar 10, 2024 6:30:00 pm", "Fish & <chips>", "2024-03-10-Fish-chips", "<section>one</section>"),
            post("Jan 05, 2024 7:00:00 am", "Morning run", "2024-01-05-Morning-run", "<section>two</section>"),
        ];
        let html = render(&blog(posts));

        assert!(html.contains(r#"<article class="blog-post" id="2024-03-10-Fish-chips">"#));
        assert!(html.contains("Fish &amp; &lt;chips&gt;"));
        assert!(html.contains("<section>one</section>"));
        assert!(html.contains("Date range: 2024-01-05 to 2024-03-10"));
        assert!(html.contains(r#"<time datetime="2024-03-10T18:30:00">2024-03-10</time>"#));

        let first = html.find("<section>one</section>").unwrap();
        let second = html.find("<section>two</section>").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_empty_title_uses_date() {
        let posts = vec![post("Mar 10, 2024 6:30:00 pm", "", "2024-03-10", "<section></section>")];
        let html = render(&blog(posts));
        assert!(html.contains(r#"<h2 class="post-title">2024-03-10</h2>"#));
    }

    #[test]
    fn test_header_escapes_config_text() {
        let config = BlogConfig::builder()
            .blog_title("Tom & Jerry's <Blog>")
            .blog_description("Cats <b>and</b> mice")
            .build();
        let html = render_blog(&blog(Vec::new()), &config).unwrap();

        assert!(html.contains("<h1>Tom &amp; Jerry&#x27;s &lt;Blog&gt;</h1>"));
        assert!(html.contains("Cats &lt;b&gt;and&lt;&#x2F;b&gt; mice &bull; 0 posts total"));
        assert!(!html.contains("<b>and</b>"));
    }

    #[test]
    fn test_empty_description() {
        let config = BlogConfig::builder().blog_description("").build();
        let html = render_blog(&blog(Vec::new()), &config).unwrap();
        assert!(html.contains("<p>0 posts total</p>"));
    }

    #[test]
    fn test_embedded_stylesheet() {
        let mut page = blog(Vec::new());
        page.stylesheet = Some("._a6-g { color: red; } </style><script>".to_string());
        let html = render(&page);

        assert!(html.contains("/* Export styles */"));
        assert!(html.contains("._a6-g { color: red; }"));
        assert!(!html.contains("</style><script>"));
    }

    #[test]
    fn test_no_export_stylesheet() {
        let html = render(&blog(Vec::new()));
        assert!(!html.contains("/* Export styles */"));
    }
}
