mod echo;

use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context;
use chronicle_core::{
    BlogConfig, Converter, Document, JsonConfig, SortOrder, convert_to_json, output_path, read_export, read_stdin,
    render_blog, write_output,
};
use clap::Parser;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_INPUT: &str = "processing/input/your_posts__check_ins__photos_and_videos_1.html";

/// Output format for the converted export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Html,
    Json,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" | "htm" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: html, json", s)),
        }
    }
}

/// Turn a Facebook activity export into a static blog page
#[derive(Parser, Debug)]
#[command(name = "chronicle")]
#[command(author = "Chronicle Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Turn a Facebook activity export into a static blog page", long_about = None)]
struct Args {
    /// Export HTML file, or "-" for stdin
    #[arg(value_name = "INPUT", default_value = DEFAULT_INPUT)]
    input: String,

    /// Output file, or "-" for stdout (default: timestamped file in the output dir)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// TOML config file (default: user config dir, when present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format (html, json)
    #[arg(short, long, default_value = "html", value_name = "FORMAT")]
    format: OutputFormat,

    /// Account display name used in post headings
    #[arg(long, value_name = "NAME")]
    username: Option<String>,

    /// Relative path media references are rewritten to
    #[arg(long, value_name = "PATH")]
    media_path: Option<String>,

    /// Maximum title length before truncation
    #[arg(long, value_name = "NUM")]
    max_title_length: Option<usize>,

    /// List the oldest posts first
    #[arg(long)]
    oldest_first: bool,

    /// Keep media references as exported
    #[arg(long)]
    no_fix_paths: bool,

    /// Include status updates
    #[arg(long)]
    include_status: bool,

    /// Leave out photo posts
    #[arg(long)]
    no_photos: bool,

    /// Leave out video posts
    #[arg(long)]
    no_videos: bool,

    /// Omit the timestamp from the generated file name
    #[arg(long)]
    no_timestamp: bool,

    /// Print the classification of every post section and exit
    #[arg(long)]
    inspect: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Loads the config file and applies the flag overrides
    fn blog_config(&self) -> anyhow::Result<BlogConfig> {
        let mut config = BlogConfig::load_or_default(self.config.as_deref()).context("Failed to load config")?;

        if let Some(username) = &self.username {
            config.username = username.clone();
        }
        if let Some(media_path) = &self.media_path {
            config.relative_media_path = media_path.clone();
        }
        if let Some(max) = self.max_title_length {
            config.max_title_length = max;
        }
        if self.oldest_first {
            config.sort_order = SortOrder::OldestFirst;
        }
        if self.no_fix_paths {
            config.fix_media_paths = false;
        }
        if self.include_status {
            config.include_status_updates = true;
        }
        if self.no_photos {
            config.include_photos = false;
        }
        if self.no_videos {
            config.include_videos = false;
        }
        if self.no_timestamp {
            config.include_timestamp = false;
        }

        Ok(config)
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.verbose {
        echo::print_banner();
    }

    let config = args.blog_config()?;
    tracing::debug!(username = %config.username, sort_order = ?config.sort_order, "configuration loaded");
    for warning in config.validate() {
        echo::print_warning(&warning);
    }

    let html = if args.input == "-" {
        if args.verbose {
            echo::print_step(1, 3, "Reading from stdin");
        }
        read_stdin().context("Failed to read from stdin")?
    } else {
        if args.verbose {
            echo::print_step(1, 3, &format!("Reading from file {}", args.input.bright_white()));
        }
        read_export(Path::new(&args.input)).with_context(|| format!("Failed to read export: {}", args.input))?
    };

    if args.verbose {
        eprintln!("  {} {}\n", "Size:".dimmed(), echo::format_size(html.len()).bright_white());
    }

    let converter = Converter::new(config);

    if args.inspect {
        let reports = converter.inspect(&html).context("Failed to inspect export")?;
        echo::print_sections(&reports);
        return Ok(());
    }

    if args.verbose {
        echo::print_step(2, 3, "Converting posts");
    }

    let doc = Document::parse(&html).context("Failed to parse export")?;
    if args.verbose
        && let Some(title) = doc.title()
    {
        eprintln!("  {} {}", "Title:".dimmed(), title.trim().bright_white());
    }

    let blog = converter.convert_document(&doc).context("Failed to convert export")?;

    if args.verbose {
        echo::print_summary(&blog);
    }

    let output = match args.format {
        OutputFormat::Html => render_blog(&blog, converter.config()).context("Failed to render page")?,
        OutputFormat::Json => {
            convert_to_json(&blog, &JsonConfig { pretty: true }).context("Failed to convert to JSON")?
        }
    };

    if args.verbose {
        echo::print_step(3, 3, "Writing output");
    }

    let path = match args.output {
        Some(path) if path.as_os_str() == "-" => {
            print!("{}", output);
            return Ok(());
        }
        Some(path) => path,
        None => {
            let now = chrono::Local::now().naive_local();
            output_path(converter.config(), now, args.format.extension())
        }
    };

    write_output(&path, &output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = output.len(), "output written");
    echo::print_success(&format!(
        "{} posts written to {}",
        blog.stats.total(),
        path.display().bright_white()
    ));

    Ok(())
}
