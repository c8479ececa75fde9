//! Content scanning and manifest generation.
//!
//! Stage 1 of the build pipeline. Walks the content directory and produces a
//! [`Manifest`] that the generate stage consumes.
//!
//! ## Directory Structure
//!
//! ```text
//! content/
//! ├── config.toml              # Site configuration (optional)
//! ├── hero.md                  # Home page banner (optional)
//! ├── 010-history.md           # Page (numbered = appears in nav)
//! ├── 020-contact.md           # Contact page (form appended by generate)
//! ├── 030-catalog.md           # URL-only content = external nav link
//! ├── about/                   # Rotating about panel
//! │   ├── 010-since-1968.md
//! │   └── 020-our-foundry.md
//! ├── products/                # Product carousel + catalog
//! │   ├── 010-gearbox-housing.md
//! │   └── 010-gearbox-housing.jpg   # Optional image, same stem
//! ├── industries/              # Industries carousel
//! ├── news/                    # News feed, higher number = newer
//! └── assets/                  # Copied to the output root as-is
//! ```
//!
//! ## Markdown Conventions
//!
//! - **Title**: first `# heading`, else the filename's display title.
//! - **Summary**: first plain paragraph after the title.
//! - **Body**: everything except the title heading.
//!
//! ## Validation
//!
//! - No duplicate numbers within one section.
//! - No duplicate slugs among products, news or pages, and none that would
//!   overwrite a generated file (`index`, news `page-N`).
//! - File names must be valid UTF-8.

use crate::config::{self, SiteConfig};
use crate::naming::{ParsedName, parse_entry_name};
use crate::types::{Hero, Link, Manifest, NavItem, NewsItem, Page, Slide};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Duplicate number {0} in {1}")]
    DuplicateNumber(u32, PathBuf),
    #[error("File name is not valid UTF-8: {0}")]
    InvalidUtf8Name(PathBuf),
    #[error("Duplicate slug '{0}' in {1}")]
    DuplicateSlug(String, PathBuf),
    #[error("Slug '{0}' in {1} is taken by a generated page")]
    ReservedSlug(String, PathBuf),
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "avif", "svg"];

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    let config = config::load_config(root)?;

    let hero = parse_hero(root)?;
    let about = scan_slides(root, "about")?;
    let products = scan_slides(root, "products")?;
    let industries = scan_slides(root, "industries")?;
    let news = scan_news(root)?;
    let pages = parse_pages(root)?;

    // Each of these becomes `{slug}.html` next to generated index/pager files
    check_slugs(
        &root.join("products"),
        products.iter().map(|p| p.slug.as_str()),
        is_index_slug,
    )?;
    check_slugs(
        &root.join("news"),
        news.iter().map(|n| n.slug.as_str()),
        is_news_page_slug,
    )?;
    check_slugs(
        root,
        pages.iter().filter(|p| !p.is_link).map(|p| p.slug.as_str()),
        is_index_slug,
    )?;

    let navigation = build_navigation(&config, &about, &products, &news, &pages);

    Ok(Manifest {
        navigation,
        hero,
        about,
        products,
        industries,
        news,
        pages,
        config,
    })
}

/// Markdown split into its parts.
#[derive(Debug, Default, PartialEq)]
struct MarkdownParts {
    title: Option<String>,
    summary: Option<String>,
    body: String,
}

fn split_markdown(content: &str) -> MarkdownParts {
    let mut title = None;
    let mut body_lines = Vec::new();
    for line in content.lines() {
        if title.is_none()
            && let Some(heading) = line.strip_prefix("# ")
        {
            title = Some(heading.trim().to_string());
            continue;
        }
        body_lines.push(line);
    }
    let body = body_lines.join("\n").trim().to_string();
    let summary = first_paragraph(&body);
    MarkdownParts {
        title,
        summary,
        body,
    }
}

/// First paragraph made only of plain text lines (no headings, images,
/// lists, quotes).
fn first_paragraph(body: &str) -> Option<String> {
    body.split("\n\n")
        .map(str::trim)
        .find(|para| {
            !para.is_empty()
                && !para.starts_with('#')
                && !para.starts_with("![")
                && !para.starts_with("- ")
                && !para.starts_with("* ")
                && !para.starts_with('>')
                && parse_link_line(para).is_none()
        })
        .map(|para| para.lines().map(str::trim).collect::<Vec<_>>().join(" "))
}

/// Parse `[label](href)` occupying a whole line.
fn parse_link_line(line: &str) -> Option<Link> {
    let rest = line.trim().strip_prefix('[')?;
    let (label, rest) = rest.split_once("](")?;
    let href = rest.strip_suffix(')')?;
    if label.is_empty() || href.is_empty() || href.contains(' ') {
        return None;
    }
    Some(Link {
        label: label.to_string(),
        href: href.to_string(),
    })
}

fn parse_hero(root: &Path) -> Result<Option<Hero>, ScanError> {
    let path = root.join("hero.md");
    if !path.is_file() {
        return Ok(None);
    }
    let content = fs::read_to_string(&path)?;
    let parts = split_markdown(&content);

    let mut call_to_action = None;
    let mut tagline_seen = false;
    let mut remaining = Vec::new();
    for para in parts.body.split("\n\n").map(str::trim) {
        if call_to_action.is_none()
            && let Some(link) = parse_link_line(para)
        {
            call_to_action = Some(link);
            continue;
        }
        // The tagline is the summary paragraph, shown on its own
        if !tagline_seen && first_paragraph(para).is_some() {
            tagline_seen = true;
            continue;
        }
        if !para.is_empty() {
            remaining.push(para);
        }
    }

    Ok(Some(Hero {
        title: parts.title.unwrap_or_default(),
        tagline: parts.summary,
        body: remaining.join("\n\n"),
        call_to_action,
    }))
}

/// Markdown files of a section directory, sorted by number then filename.
/// Unnumbered files sort last.
fn numbered_markdown(dir: &Path) -> Result<Vec<(PathBuf, ParsedName)>, ScanError> {
    if !dir.is_dir() {
        return Ok(vec![]);
    }
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || !has_extension(&path, &["md"]) {
            continue;
        }
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ScanError::InvalidUtf8Name(path.clone()))?;
        if stem.starts_with('.') {
            continue;
        }
        let parsed = parse_entry_name(stem);
        entries.push((path, parsed));
    }

    let mut seen = BTreeSet::new();
    for (_, parsed) in &entries {
        if let Some(n) = parsed.number
            && !seen.insert(n)
        {
            return Err(ScanError::DuplicateNumber(n, dir.to_path_buf()));
        }
    }

    entries.sort_by(|(a_path, a), (b_path, b)| {
        (a.number.unwrap_or(u32::MAX), a_path).cmp(&(b.number.unwrap_or(u32::MAX), b_path))
    });
    Ok(entries)
}

/// Reject slugs that repeat within `dir` or that `reserved` claims.
fn check_slugs<'a>(
    dir: &Path,
    slugs: impl IntoIterator<Item = &'a str>,
    reserved: fn(&str) -> bool,
) -> Result<(), ScanError> {
    let mut seen = BTreeSet::new();
    for slug in slugs {
        if reserved(slug) {
            return Err(ScanError::ReservedSlug(slug.to_string(), dir.to_path_buf()));
        }
        if !seen.insert(slug) {
            return Err(ScanError::DuplicateSlug(slug.to_string(), dir.to_path_buf()));
        }
    }
    Ok(())
}

fn is_index_slug(slug: &str) -> bool {
    slug == "index"
}

/// `index` and `page-N`, the names of the paged news files.
fn is_news_page_slug(slug: &str) -> bool {
    is_index_slug(slug)
        || slug
            .strip_prefix("page-")
            .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

fn has_extension(path: &Path, exts: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| exts.iter().any(|x| e.eq_ignore_ascii_case(x)))
        .unwrap_or(false)
}

fn relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// Image next to a markdown file with the same stem, if any.
fn sidecar_image(md_path: &Path) -> Option<PathBuf> {
    IMAGE_EXTENSIONS
        .iter()
        .map(|ext| md_path.with_extension(ext))
        .find(|p| p.is_file())
}

fn scan_slides(root: &Path, section: &str) -> Result<Vec<Slide>, ScanError> {
    let mut slides = Vec::new();
    for (path, parsed) in numbered_markdown(&root.join(section))? {
        let content = fs::read_to_string(&path)?;
        let parts = split_markdown(&content);
        slides.push(Slide {
            number: parsed.number.unwrap_or(u32::MAX),
            title: parts
                .title
                .unwrap_or_else(|| parsed.display_title.clone()),
            slug: parsed.slug(),
            summary: parts.summary,
            body: parts.body,
            image: sidecar_image(&path).map(|p| relative(&p, root)),
            source_path: relative(&path, root),
        });
    }
    Ok(slides)
}

fn scan_news(root: &Path) -> Result<Vec<NewsItem>, ScanError> {
    let mut news = Vec::new();
    for (path, parsed) in numbered_markdown(&root.join("news"))? {
        let content = fs::read_to_string(&path)?;
        let parts = split_markdown(&content);
        news.push(NewsItem {
            number: parsed.number.unwrap_or(0),
            title: parts
                .title
                .unwrap_or_else(|| parsed.display_title.clone()),
            slug: parsed.slug(),
            summary: parts.summary,
            body: parts.body,
            source_path: relative(&path, root),
        });
    }
    // Newest first; the sort is stable so unnumbered items keep filename order
    news.sort_by(|a, b| b.number.cmp(&a.number));
    Ok(news)
}

/// Parse markdown files in the content root into pages. `hero.md` is
/// excluded because it feeds the home page banner.
fn parse_pages(root: &Path) -> Result<Vec<Page>, ScanError> {
    let mut pages = Vec::new();
    for (md_path, parsed) in numbered_markdown(root)? {
        if parsed.number.is_none() && parsed.name == "hero" {
            continue;
        }
        let content = fs::read_to_string(&md_path)?;
        let trimmed = content.trim();

        let is_link = !trimmed.contains('\n')
            && (trimmed.starts_with("http://") || trimmed.starts_with("https://"));

        let link_title = parsed.display_title.clone();
        let title = if is_link {
            link_title.clone()
        } else {
            split_markdown(&content)
                .title
                .unwrap_or_else(|| link_title.clone())
        };

        pages.push(Page {
            title,
            link_title,
            slug: parsed.slug(),
            body: content,
            in_nav: parsed.in_nav(),
            sort_key: parsed.number.unwrap_or(u32::MAX),
            is_link,
            source_path: relative(&md_path, root),
        });
    }
    Ok(pages)
}

fn build_navigation(
    config: &SiteConfig,
    about: &[Slide],
    products: &[Slide],
    news: &[NewsItem],
    pages: &[Page],
) -> Vec<NavItem> {
    let mut nav = vec![NavItem::link("Home", "/")];
    if !about.is_empty() {
        nav.push(NavItem::link("About", "/#about"));
    }
    if !products.is_empty() {
        let mut item = NavItem::link("Products", "/products/");
        item.children = products
            .iter()
            .map(|p| NavItem::link(p.title.clone(), format!("/products/{}.html", p.slug)))
            .collect();
        nav.push(item);
    }
    if !news.is_empty() {
        nav.push(NavItem::link("News", "/news/"));
    }
    for page in pages.iter().filter(|p| p.in_nav) {
        let mut item = NavItem::link(page.link_title.clone(), page.href());
        item.external = page.is_link;
        nav.push(item);
    }
    if config.contact.email.is_some() && !pages.iter().any(|p| p.slug == "contact") {
        // No contact page: fall back to a mailto link
        if let Some(email) = &config.contact.email {
            let mut item = NavItem::link("Contact", format!("mailto:{email}"));
            item.external = true;
            nav.push(item);
        }
    }
    nav
}
