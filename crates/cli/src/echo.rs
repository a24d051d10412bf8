use chronicle_core::{Blog, PostKind, SectionReport};
use owo_colors::OwoColorize;

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!(
        "\n{} {} {}",
        "Chronicle".bold().bright_blue(),
        "v".dimmed(),
        VERSION.dimmed()
    );
    eprintln!("{}", "Turn a Facebook activity export into a blog page\n".dimmed());
}

/// Print a styled step message
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message.bright_yellow());
}

/// Print the run summary
pub fn print_summary(blog: &Blog) {
    let stats = &blog.stats;

    eprintln!("\n{}", "═".repeat(60).dimmed());
    eprintln!("{}", "Conversion Summary".bold().cyan());
    eprintln!("{}", "═".repeat(60).dimmed());
    summary_line("Sections", stats.sections);
    summary_line("Status updates", stats.status_updates);
    summary_line("Photo posts", stats.photo_posts);
    summary_line("Video posts", stats.video_posts);
    summary_line("Photo only", stats.photo_only);
    summary_line("Rejected", stats.rejected);
    summary_line("Excluded", stats.excluded);

    if stats.skipped() > 0 {
        eprintln!(
            "  {} {}",
            format!("{:<16}", "Skipped:").dimmed(),
            stats.skipped().to_string().bright_yellow()
        );
    }

    if let Some((first, last)) = blog.date_range() {
        eprintln!(
            "  {} {} to {}",
            format!("{:<16}", "Date range:").dimmed(),
            first.bright_white(),
            last.bright_white()
        );
    }
    eprintln!();
}

fn summary_line(label: &str, count: usize) {
    eprintln!(
        "  {} {}",
        format!("{:<16}", format!("{}:", label)).dimmed(),
        count.to_string().bright_white()
    );
}

/// Print one line per located post container
pub fn print_sections(reports: &[SectionReport]) {
    for report in reports {
        let label = format!("{:<13}", report.kind.label());
        let label = match report.kind {
            PostKind::Rejected => label.dimmed().to_string(),
            PostKind::StatusUpdate => label.bright_blue().to_string(),
            PostKind::PhotoPost => label.bright_green().to_string(),
            PostKind::VideoPost => label.bright_magenta().to_string(),
        };
        println!("{:>4}  {}  {}", report.index, label, report.heading);
    }
}

/// Format file size for display
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
