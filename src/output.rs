//! CLI output formatting for the pipeline stages and the slideshow preview.
//!
//! Output is **information-centric, not file-centric**: every entity leads
//! with its positional index and title, and the markdown it came from is shown
//! as an indented `Source:` line underneath.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Hero
//!     Precision die casting since 1968
//!
//! About (3 slides, rotates every 6000ms)
//!     001 Since 1968
//!         Source: about/010-since-1968.md
//!
//! Products (4 slides)
//!     001 Gearbox Housing
//!         Source: products/010-gearbox-housing.md
//!         Image: products/010-gearbox-housing.svg
//!
//! News (6 articles, 2 pages of 4)
//!     Page 1
//!         001 New press line
//!             Source: news/060-new-press-line.md
//!
//! Pages
//!     001 Our History
//!         Source: 010-history.md
//!     002 catalog (link)
//!
//! Config
//!     config.toml
//!     assets/
//! ```
//!
//! ## Generate
//!
//! ```text
//! Home → index.html
//! Products → products/index.html
//!     001 Gearbox Housing → products/gearbox-housing.html
//! News page 1 → news/index.html
//!     001 New press line → news/new-press-line.html
//!
//! Generated 1 home page, 4 products, 2 news pages, 6 articles, 2 pages, 5 assets
//! ```
//!
//! ## Preview
//!
//! ```text
//! tick  → 002/003 Our Foundry
//! next  → 003/003 Quality First
//! ```
//!
//! Each concern has a `format_*` function (returns `Vec<String>` or `String`)
//! for testability and a `print_*` wrapper that writes to stdout.

use crate::autoplay::SlideshowEvent;
use crate::config::CarouselConfig;
use crate::generate::{GenerateReport, PageKind};
use crate::pager::Pager;
use crate::types::{Manifest, Slide};
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `1 slide` / `3 slides`.
fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{cut}...")
    }
}

fn section_header(label: &str, slides: &[Slide], settings: &CarouselConfig) -> String {
    let count = plural(slides.len(), "slide", "slides");
    match settings.autoplay_interval() {
        Some(interval) => format!(
            "{label} ({count}, rotates every {}ms)",
            interval.as_millis()
        ),
        None => format!("{label} ({count})"),
    }
}

fn slide_lines(slides: &[Slide], depth: usize, lines: &mut Vec<String>) {
    let pad = indent(depth);
    for (i, slide) in slides.iter().enumerate() {
        lines.push(format!("{pad}{} {}", format_index(i + 1), slide.title));
        lines.push(format!("{pad}    Source: {}", slide.source_path));
        if let Some(image) = &slide.image {
            lines.push(format!("{pad}    Image: {image}"));
        }
    }
}

// ============================================================================
// Scan output
// ============================================================================

/// Format the scan manifest as a content inventory.
pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    let carousels = &manifest.config.carousels;

    if let Some(hero) = &manifest.hero {
        lines.push("Hero".to_string());
        lines.push(format!("    {}", hero.title));
        if let Some(tagline) = &hero.tagline {
            lines.push(format!("    {}", truncate(tagline, 60)));
        }
        if let Some(cta) = &hero.call_to_action {
            lines.push(format!("    Button: {} → {}", cta.label, cta.href));
        }
    }

    for (name, settings) in carousels.named() {
        let Some(slides) = manifest.section(name) else {
            continue;
        };
        if slides.is_empty() {
            continue;
        }
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(section_header(&section_label(name), slides, settings));
        slide_lines(slides, 1, &mut lines);
    }

    if !manifest.news.is_empty() {
        let pager = Pager::new(manifest.news.iter().collect::<Vec<_>>(), manifest.config.news.page_size);
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(format!(
            "News ({}, {} of {})",
            plural(pager.len(), "article", "articles"),
            plural(pager.total_pages(), "page", "pages"),
            pager.page_size()
        ));
        let mut position = 0;
        for (page, items) in pager.pages() {
            lines.push(format!("    Page {}", page + 1));
            for item in items {
                position += 1;
                lines.push(format!("        {} {}", format_index(position), item.title));
                lines.push(format!("            Source: {}", item.source_path));
            }
        }
    }

    if !manifest.pages.is_empty() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push("Pages".to_string());
        for (i, page) in manifest.pages.iter().enumerate() {
            if page.is_link {
                lines.push(format!(
                    "    {} {} (link)",
                    format_index(i + 1),
                    page.link_title
                ));
                lines.push(format!("        {}", page.href()));
            } else {
                lines.push(format!("    {} {}", format_index(i + 1), page.title));
                lines.push(format!("        Source: {}", page.source_path));
            }
        }
    }

    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push("Config".to_string());
    if source_root.join("config.toml").exists() {
        lines.push("    config.toml".to_string());
    }
    if source_root.join("assets").is_dir() {
        lines.push("    assets/".to_string());
    }

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

fn section_label(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ============================================================================
// Generate output
// ============================================================================

/// Format the files a generate run wrote, grouped by page kind.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = Vec::new();
    let mut product = 0;
    let mut article = 0;
    let mut page = 0;

    for file in &report.files {
        match file.kind {
            PageKind::Home | PageKind::ProductIndex | PageKind::NewsPage => {
                lines.push(format!("{} → {}", file.title, file.path));
            }
            PageKind::Product => {
                product += 1;
                lines.push(format!(
                    "    {} {} → {}",
                    format_index(product),
                    file.title,
                    file.path
                ));
            }
            PageKind::Article => {
                article += 1;
                lines.push(format!(
                    "    {} {} → {}",
                    format_index(article),
                    file.title,
                    file.path
                ));
            }
            PageKind::Page => {
                if page == 0 {
                    lines.push(String::new());
                    lines.push("Pages".to_string());
                }
                page += 1;
                lines.push(format!(
                    "    {} {} → {}",
                    format_index(page),
                    file.title,
                    file.path
                ));
            }
            PageKind::Asset => {}
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {}, {}, {}, {}, {}",
        plural(report.count(PageKind::Home), "home page", "home pages"),
        plural(report.count(PageKind::Product), "product", "products"),
        plural(report.count(PageKind::NewsPage), "news page", "news pages"),
        plural(report.count(PageKind::Article), "article", "articles"),
        plural(report.count(PageKind::Page), "page", "pages"),
        plural(report.count(PageKind::Asset), "asset", "assets"),
    ));
    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Slideshow preview
// ============================================================================

/// One line per applied slideshow event: what happened and where it landed.
pub fn format_slideshow_event(
    event: SlideshowEvent,
    position: usize,
    len: usize,
    title: &str,
) -> String {
    let label = match event {
        SlideshowEvent::Tick => "tick".to_string(),
        SlideshowEvent::Next => "next".to_string(),
        SlideshowEvent::Previous => "prev".to_string(),
        SlideshowEvent::GoTo(target) => format!("go {}", target + 1),
    };
    format!(
        "{label:<5} → {}/{} {}",
        format_index(position + 1),
        format_index(len),
        title
    )
}

/// Print one slideshow event line to stdout.
pub fn print_slideshow_event(event: SlideshowEvent, position: usize, len: usize, title: &str) {
    println!("{}", format_slideshow_event(event, position, len, title));
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::generate::GeneratedFile;
    use crate::types::{NewsItem, Page};

    fn slide(n: u32, title: &str) -> Slide {
        Slide {
            number: n,
            title: title.to_string(),
            slug: title.to_lowercase(),
            summary: None,
            body: String::new(),
            image: None,
            source_path: format!("about/{n:03}-{}.md", title.to_lowercase()),
        }
    }

    fn news(n: u32) -> NewsItem {
        NewsItem {
            number: n,
            title: format!("Story {n}"),
            slug: format!("story-{n}"),
            summary: None,
            body: String::new(),
            source_path: format!("news/{n:03}-story.md"),
        }
    }

    fn manifest() -> Manifest {
        Manifest {
            navigation: vec![],
            hero: None,
            about: vec![slide(10, "Since 1968"), slide(20, "Our Foundry")],
            products: vec![],
            industries: vec![],
            news: (1..=6).rev().map(news).collect(),
            pages: vec![],
            config: SiteConfig::default(),
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1000), "1000");
    }

    #[test]
    fn indent_levels() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "        ");
    }

    #[test]
    fn truncate_counts_chars() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("äöüäöü", 3), "äöü...");
    }

    #[test]
    fn plural_forms() {
        assert_eq!(plural(1, "slide", "slides"), "1 slide");
        assert_eq!(plural(0, "slide", "slides"), "0 slides");
    }

    #[test]
    fn section_label_capitalizes() {
        assert_eq!(section_label("industries"), "Industries");
        assert_eq!(section_label(""), "");
    }

    // =========================================================================
    // Scan
    // =========================================================================

    #[test]
    fn scan_output_lists_rotating_about() {
        let lines = format_scan_output(&manifest(), Path::new("/nonexistent"));
        assert_eq!(lines[0], "About (2 slides, rotates every 6000ms)");
        assert_eq!(lines[1], "    001 Since 1968");
        assert_eq!(lines[2], "        Source: about/010-since 1968.md");
    }

    #[test]
    fn scan_output_splits_news_into_pages() {
        let lines = format_scan_output(&manifest(), Path::new("/nonexistent"));
        assert!(lines.contains(&"News (6 articles, 2 pages of 4)".to_string()));
        assert!(lines.contains(&"    Page 2".to_string()));
        assert!(lines.contains(&"        005 Story 2".to_string()));
    }

    #[test]
    fn scan_output_marks_link_pages() {
        let mut m = manifest();
        m.pages.push(Page {
            title: "catalog".into(),
            link_title: "catalog".into(),
            slug: "catalog".into(),
            body: "https://example.com/catalog.pdf".into(),
            in_nav: true,
            sort_key: 30,
            is_link: true,
            source_path: "030-catalog.md".into(),
        });
        let lines = format_scan_output(&m, Path::new("/nonexistent"));
        assert!(lines.contains(&"    001 catalog (link)".to_string()));
        assert!(lines.contains(&"        https://example.com/catalog.pdf".to_string()));
    }

    #[test]
    fn scan_output_always_ends_with_config() {
        let lines = format_scan_output(&manifest(), Path::new("/nonexistent"));
        assert_eq!(lines.last().map(String::as_str), Some("Config"));
    }

    // =========================================================================
    // Generate
    // =========================================================================

    #[test]
    fn generate_output_groups_and_counts() {
        let file = |kind, title: &str, path: &str| GeneratedFile {
            kind,
            title: title.into(),
            path: path.into(),
        };
        let report = GenerateReport {
            files: vec![
                file(PageKind::Asset, "Stylesheet", "site-abc.css"),
                file(PageKind::Home, "Home", "index.html"),
                file(PageKind::NewsPage, "News page 1", "news/index.html"),
                file(PageKind::Article, "Story 1", "news/story-1.html"),
                file(PageKind::Page, "Contact", "contact.html"),
            ],
        };
        let lines = format_generate_output(&report);
        assert_eq!(lines[0], "Home → index.html");
        assert_eq!(lines[2], "    001 Story 1 → news/story-1.html");
        assert!(lines.contains(&"Pages".to_string()));
        assert_eq!(
            lines.last().unwrap(),
            "Generated 1 home page, 0 products, 1 news page, 1 article, 1 page, 1 asset"
        );
    }

    // =========================================================================
    // Preview
    // =========================================================================

    #[test]
    fn slideshow_event_lines() {
        assert_eq!(
            format_slideshow_event(SlideshowEvent::Tick, 1, 3, "Our Foundry"),
            "tick  → 002/003 Our Foundry"
        );
        assert_eq!(
            format_slideshow_event(SlideshowEvent::GoTo(0), 0, 3, "Since 1968"),
            "go 1  → 001/003 Since 1968"
        );
    }
}
