//! HTML site generation.
//!
//! Stage 2 of the build pipeline. Takes the scan manifest and renders the
//! static site.
//!
//! ## Generated Pages
//!
//! - **Home** (`/index.html`): hero banner, rotating about panel, product and
//!   industries carousels, latest news
//! - **Product catalog** (`/products/index.html`) and one page per product
//! - **News feed** (`/news/index.html`, `/news/page-2.html`, ...): one file per
//!   page of the [`Pager`], with previous/next links disabled at the ends
//! - **Articles** (`/news/{slug}.html`), rendered in parallel
//! - **Content pages** (`/{slug}.html`); the `contact` page gets the contact form
//!
//! ## Carousels Without a Server
//!
//! Each carousel is rendered in the state its [`Carousel`] is in at build time
//! (the configured start index): the strip is already translated, the active
//! dot already marked. `data-*` attributes carry the length, boundary policy
//! and auto-advance interval so the bundled script can keep navigating from
//! there.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── history.html
//! ├── contact.html
//! ├── site-1a2b3c4d.css          # Fingerprinted bundle
//! ├── carousel-5e6f7a8b.js
//! ├── products/
//! │   ├── index.html
//! │   ├── gearbox-housing.html
//! │   └── 010-gearbox-housing.jpg
//! └── news/
//!     ├── index.html             # Page 1
//!     ├── page-2.html
//!     └── new-press-line.html
//! ```

use crate::assets;
use crate::carousel::Carousel;
use crate::config::{self, CarouselConfig, SiteConfig};
use crate::forms::{ContactSubmission, FieldSpec, NewsletterSubscription};
use crate::pager::Pager;
use crate::types::{Hero, Manifest, NavItem, NewsItem, Page, Slide};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Options, Parser, html as md_html};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/carousel.js");

/// What kind of page a generated file is, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Home,
    ProductIndex,
    Product,
    NewsPage,
    Article,
    Page,
    Asset,
}

#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub kind: PageKind,
    pub title: String,
    /// Path relative to the output directory.
    pub path: String,
}

/// Files written by one generate run, in write order.
#[derive(Debug, Default)]
pub struct GenerateReport {
    pub files: Vec<GeneratedFile>,
}

impl GenerateReport {
    pub fn count(&self, kind: PageKind) -> usize {
        self.files.iter().filter(|f| f.kind == kind).count()
    }

    fn record(&mut self, kind: PageKind, title: impl Into<String>, path: impl Into<String>) {
        self.files.push(GeneratedFile {
            kind,
            title: title.into(),
            path: path.into(),
        });
    }
}

/// Read the manifest at `manifest_path` and render the site into `output_dir`.
pub fn generate(
    manifest_path: &Path,
    source_root: &Path,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    let manifest_content = fs::read_to_string(manifest_path)?;
    let manifest: Manifest = serde_json::from_str(&manifest_content)?;
    generate_site(&manifest, source_root, output_dir)
}

/// Render `manifest` into `output_dir`, copying images and assets from
/// `source_root`.
pub fn generate_site(
    manifest: &Manifest,
    source_root: &Path,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    let mut report = GenerateReport::default();
    fs::create_dir_all(output_dir)?;

    let css = format!(
        "{}\n\n{}\n\n{}",
        config::generate_color_css(&manifest.config.colors),
        config::generate_theme_css(&manifest.config.theme),
        CSS_STATIC
    );
    let stylesheet = assets::write_fingerprinted(output_dir, "site", "css", &css)?;
    report.record(PageKind::Asset, "Stylesheet", stylesheet.clone());
    let script = assets::write_fingerprinted(output_dir, "carousel", "js", JS)?;
    report.record(PageKind::Asset, "Carousel script", script.clone());

    for rel in assets::copy_tree(&source_root.join("assets"), output_dir)? {
        report.record(PageKind::Asset, "Asset", rel.to_string_lossy());
    }
    let slides = manifest
        .about
        .iter()
        .chain(&manifest.products)
        .chain(&manifest.industries);
    for image in slides.filter_map(|s| s.image.as_deref()) {
        assets::copy_relative(source_root, output_dir, image)?;
        report.record(PageKind::Asset, "Image", image);
    }

    let layout = Layout {
        config: &manifest.config,
        navigation: &manifest.navigation,
        stylesheet: format!("/{stylesheet}"),
        script: format!("/{script}"),
    };

    write_page(output_dir, "index.html", render_index(manifest, &layout))?;
    report.record(PageKind::Home, "Home", "index.html");

    if !manifest.products.is_empty() {
        let products_dir = output_dir.join("products");
        fs::create_dir_all(&products_dir)?;
        write_page(
            &products_dir,
            "index.html",
            render_product_index(&manifest.products, &layout),
        )?;
        report.record(PageKind::ProductIndex, "Products", "products/index.html");

        let mut catalog = Carousel::new(manifest.products.iter().collect::<Vec<_>>());
        for index in 0..catalog.len() {
            catalog.go_to(index);
            let Some(product) = catalog.current().copied() else {
                continue;
            };
            let filename = format!("{}.html", product.slug);
            write_page(
                &products_dir,
                &filename,
                render_product_page(&catalog, &layout),
            )?;
            report.record(
                PageKind::Product,
                product.title.clone(),
                format!("products/{filename}"),
            );
        }
    }

    if !manifest.news.is_empty() {
        let news_dir = output_dir.join("news");
        fs::create_dir_all(&news_dir)?;

        let news = &manifest.config.news;
        let mut pager = Pager::with_boundary(
            manifest.news.iter().collect::<Vec<_>>(),
            news.page_size,
            news.boundary,
        );
        for page in 0..pager.total_pages() {
            pager.go_to_page(page);
            let filename = news_page_file(page);
            write_page(&news_dir, &filename, render_news_page(&pager, &layout))?;
            report.record(
                PageKind::NewsPage,
                format!("News page {}", page + 1),
                format!("news/{filename}"),
            );
        }

        let articles: Vec<(PathBuf, &NewsItem, String)> = manifest
            .news
            .par_iter()
            .map(|item| {
                let html = render_article(item, &layout).into_string();
                (news_dir.join(format!("{}.html", item.slug)), item, html)
            })
            .collect();
        for (path, item, html) in articles {
            fs::write(&path, html)?;
            report.record(
                PageKind::Article,
                item.title.clone(),
                format!("news/{}.html", item.slug),
            );
        }
    }

    for page in manifest.pages.iter().filter(|p| !p.is_link) {
        let filename = format!("{}.html", page.slug);
        write_page(output_dir, &filename, render_page(page, &layout))?;
        report.record(PageKind::Page, page.title.clone(), filename);
    }

    Ok(report)
}

fn write_page(dir: &Path, filename: &str, markup: Markup) -> std::io::Result<()> {
    fs::write(dir.join(filename), markup.into_string())
}

/// File name of a zero-based news page. The first page is the section index.
pub fn news_page_file(page: usize) -> String {
    if page == 0 {
        "index.html".to_string()
    } else {
        format!("page-{}.html", page + 1)
    }
}

fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::ENABLE_TABLES);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    out
}

// ============================================================================
// HTML Components
// ============================================================================

/// Pieces shared by every page.
struct Layout<'a> {
    config: &'a SiteConfig,
    navigation: &'a [NavItem],
    stylesheet: String,
    script: String,
}

impl Layout<'_> {
    fn document(&self, title: &str, current_path: &str, content: Markup) -> Markup {
        let site = &self.config.site;
        let full_title = if title == site.name {
            title.to_string()
        } else {
            format!("{title} | {}", site.name)
        };
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    meta name="description" content=(site.tagline);
                    title { (full_title) }
                    link rel="stylesheet" href=(self.stylesheet);
                }
                body {
                    (site_header(&site.name, render_nav(self.navigation, current_path)))
                    main { (content) }
                    (render_footer(self.config))
                    script src=(self.script) defer {}
                }
            }
        }
    }
}

fn site_header(site_name: &str, nav: Markup) -> Markup {
    html! {
        header.site-header {
            div.site-header-inner {
                a.site-name href="/" { (site_name) }
                nav.site-nav aria-label="Main" { (nav) }
            }
        }
    }
}

/// Navigation menu. Products get a dropdown of individual product pages.
pub fn render_nav(items: &[NavItem], current_path: &str) -> Markup {
    html! {
        ul {
            @for item in items {
                (render_nav_item(item, current_path))
            }
        }
    }
}

fn render_nav_item(item: &NavItem, current_path: &str) -> Markup {
    let is_current = item.path == current_path
        || (item.path.len() > 1 && item.path.ends_with('/') && current_path.starts_with(&item.path));
    html! {
        li class=[is_current.then_some("current")] {
            @if item.external {
                a href=(item.path) target="_blank" rel="noopener" { (item.title) }
            } @else {
                a href=(item.path) { (item.title) }
            }
            @if !item.children.is_empty() {
                ul {
                    @for child in &item.children {
                        (render_nav_item(child, current_path))
                    }
                }
            }
        }
    }
}

fn render_footer(config: &SiteConfig) -> Markup {
    let contact = &config.contact;
    html! {
        footer.site-footer {
            div.site-footer-inner {
                div {
                    strong { (config.site.name) }
                    @if let Some(address) = &contact.address { p { (address) } }
                    @if let Some(phone) = &contact.phone {
                        p { a href={ "tel:" (phone.replace(' ', "")) } { (phone) } }
                    }
                    @if let Some(email) = &contact.email {
                        p { a href={ "mailto:" (email) } { (email) } }
                    }
                    p { "© " (config.site.name) ". " (config.site.footer) }
                }
                div {
                    p { "Get our newsletter" }
                    (render_form(
                        &config.newsletter.endpoint,
                        "newsletter-form",
                        NewsletterSubscription::FIELDS,
                        "Subscribe",
                    ))
                }
            }
        }
    }
}

/// A POST form to an external endpoint, one control per field.
fn render_form(action: &str, class: &str, fields: &[FieldSpec], submit_label: &str) -> Markup {
    html! {
        form class={ "site-form " (class) } method="post" action=(action) {
            @for field in fields {
                label {
                    span { (field.label) @if field.required { " *" } }
                    @match field.kind.input_type() {
                        Some(kind) => {
                            input type=(kind) name=(field.name) required[field.required];
                        },
                        None => {
                            textarea name=(field.name) rows="6" required[field.required] {}
                        },
                    }
                }
            }
            button.button type="submit" { (submit_label) }
        }
    }
}

/// A carousel in the state `carousel` is in.
///
/// `link_base` turns each slide into a link to `{link_base}{slug}.html`.
fn render_carousel(
    id: &str,
    heading: &str,
    carousel: &Carousel<&Slide>,
    settings: &CarouselConfig,
    link_base: Option<&str>,
) -> Markup {
    let interval = settings
        .autoplay_interval()
        .map(|d| d.as_millis().to_string());
    let strip_style = format!("transform: translateX({}%)", carousel.translate_percent());
    let show_controls = carousel.len() > 1;

    html! {
        section.carousel-section id=(id) {
            h2 { (heading) }
            div.carousel
                data-carousel
                data-length=(carousel.len())
                data-index=(carousel.current_index())
                data-boundary=(carousel.boundary().as_str())
                data-interval=[interval]
                aria-roledescription="carousel" {
                @if show_controls {
                    button.carousel-prev type="button" aria-label="Previous slide"
                        disabled[!carousel.can_go_previous()] { "‹" }
                }
                div.carousel-strip style=(strip_style) {
                    @for (index, slide, active) in carousel.iter_with_state() {
                        article.carousel-slide
                            aria-roledescription="slide"
                            aria-label={ (index + 1) " of " (carousel.len()) }
                            aria-hidden=(if active { "false" } else { "true" }) {
                            @if let Some(image) = &slide.image {
                                img src={ "/" (image) } alt=(slide.title) loading="lazy";
                            }
                            h3 { (slide.title) }
                            @if let Some(summary) = &slide.summary {
                                p { (summary) }
                            }
                            @if let Some(base) = link_base {
                                a href={ (base) (slide.slug) ".html" } { "Learn more" }
                            }
                        }
                    }
                }
                @if show_controls {
                    button.carousel-next type="button" aria-label="Next slide"
                        disabled[!carousel.can_go_next()] { "›" }
                    ol.carousel-dots {
                        @for (index, _, active) in carousel.iter_with_state() {
                            li {
                                button.carousel-dot type="button"
                                    aria-label={ "Go to slide " (index + 1) }
                                    aria-current=[active.then_some("true")] {}
                            }
                        }
                    }
                }
            }
        }
    }
}

fn carousel_for<'a>(slides: &'a [Slide], settings: &CarouselConfig) -> Carousel<&'a Slide> {
    Carousel::with_boundary(slides.iter().collect(), settings.boundary)
        .starting_at(settings.start_index)
}

fn render_hero(hero: &Hero) -> Markup {
    html! {
        section.hero {
            h1 { (hero.title) }
            @if let Some(tagline) = &hero.tagline {
                p.hero-tagline { (tagline) }
            }
            @if !hero.body.is_empty() {
                div.hero-body { (PreEscaped(markdown_to_html(&hero.body))) }
            }
            @if let Some(cta) = &hero.call_to_action {
                p { a.button href=(cta.href) { (cta.label) } }
            }
        }
    }
}

fn news_card(item: &NewsItem) -> Markup {
    html! {
        article.card {
            h3 { a href={ "/news/" (item.slug) ".html" } { (item.title) } }
            @if let Some(summary) = &item.summary {
                p { (summary) }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

fn render_index(manifest: &Manifest, layout: &Layout) -> Markup {
    let carousels = &manifest.config.carousels;
    let latest = manifest.news.iter().take(manifest.config.news.home_count);

    let content = html! {
        @if let Some(hero) = &manifest.hero {
            (render_hero(hero))
        } @else {
            section.hero {
                h1 { (manifest.config.site.name) }
                p.hero-tagline { (manifest.config.site.tagline) }
            }
        }
        @if !manifest.about.is_empty() {
            (render_carousel("about", "About us", &carousel_for(&manifest.about, &carousels.about), &carousels.about, None))
        }
        @if !manifest.products.is_empty() {
            (render_carousel("products", "Products", &carousel_for(&manifest.products, &carousels.products), &carousels.products, Some("/products/")))
        }
        @if !manifest.industries.is_empty() {
            (render_carousel("industries", "Industries we serve", &carousel_for(&manifest.industries, &carousels.industries), &carousels.industries, None))
        }
        @if !manifest.news.is_empty() {
            section.latest-news {
                h2 { "Latest news" }
                div.card-grid {
                    @for item in latest {
                        (news_card(item))
                    }
                }
                p { a href="/news/" { "All news" } }
            }
        }
    };

    layout.document(&manifest.config.site.name, "/", content)
}

fn render_product_index(products: &[Slide], layout: &Layout) -> Markup {
    let content = html! {
        h1 { "Products" }
        div.card-grid {
            @for product in products {
                article.card {
                    @if let Some(image) = &product.image {
                        img src={ "/" (image) } alt=(product.title) loading="lazy";
                    }
                    h3 { a href={ (product.slug) ".html" } { (product.title) } }
                    @if let Some(summary) = &product.summary {
                        p { (summary) }
                    }
                }
            }
        }
    };
    layout.document("Products", "/products/", content)
}

/// Product detail page for the carousel's current product, with cyclic
/// previous/next links.
fn render_product_page(catalog: &Carousel<&Slide>, layout: &Layout) -> Markup {
    let Some(product) = catalog.current().copied() else {
        return layout.document("Products", "/products/", html! {});
    };
    let mut probe = catalog.clone();
    probe.previous();
    let previous = probe.current().copied().filter(|p| p.slug != product.slug);
    let mut probe = catalog.clone();
    probe.next();
    let next = probe.current().copied().filter(|p| p.slug != product.slug);

    let current_path = format!("/products/{}.html", product.slug);
    let content = html! {
        article.product {
            p { a href="/products/" { "← All products" } }
            h1 { (product.title) }
            @if let Some(image) = &product.image {
                img src={ "/" (image) } alt=(product.title);
            }
            (PreEscaped(markdown_to_html(&product.body)))
        }
        nav.pagination aria-label="Products" {
            @if let Some(prev) = previous {
                a rel="prev" href={ (prev.slug) ".html" } { "‹ " (prev.title) }
            }
            @if let Some(next) = next {
                a rel="next" href={ (next.slug) ".html" } { (next.title) " ›" }
            }
        }
    };
    layout.document(&product.title, &current_path, content)
}

/// One page of the news feed, in the pager's current state.
fn render_news_page(pager: &Pager<&NewsItem>, layout: &Layout) -> Markup {
    let current = pager.current_page();

    let previous = pager.has_previous().then(|| {
        let mut probe = pager.clone();
        probe.previous_page()
    });
    let next = pager.has_next().then(|| {
        let mut probe = pager.clone();
        probe.next_page()
    });

    let title = if current == 0 {
        "News".to_string()
    } else {
        format!("News, page {}", current + 1)
    };

    let content = html! {
        h1 { "News" }
        div.card-grid {
            @for item in pager.page_items() {
                (news_card(item))
            }
        }
        @if pager.total_pages() > 1 {
            nav.pagination aria-label="News pages" {
                @match previous {
                    Some(page) => a rel="prev" href=(news_page_file(page)) { "‹ Previous" },
                    None => span.disabled aria-disabled="true" { "‹ Previous" },
                }
                @for number in pager.page_numbers() {
                    @if number == current + 1 {
                        span aria-current="page" { (number) }
                    } @else {
                        a href=(news_page_file(number - 1)) { (number) }
                    }
                }
                @match next {
                    Some(page) => a rel="next" href=(news_page_file(page)) { "Next ›" },
                    None => span.disabled aria-disabled="true" { "Next ›" },
                }
            }
        }
    };

    layout.document(&title, "/news/", content)
}

fn render_article(item: &NewsItem, layout: &Layout) -> Markup {
    let content = html! {
        article.news-article {
            p { a href="/news/" { "← All news" } }
            h1 { (item.title) }
            (PreEscaped(markdown_to_html(&item.body)))
        }
    };
    layout.document(&item.title, "/news/", content)
}

fn render_page(page: &Page, layout: &Layout) -> Markup {
    let is_contact = page.slug == "contact";
    let content = html! {
        article.content-page {
            (PreEscaped(markdown_to_html(&page.body)))
        }
        @if is_contact {
            section.contact-form {
                (render_form(
                    &layout.config.contact.endpoint,
                    "contact",
                    ContactSubmission::FIELDS,
                    "Send message",
                ))
            }
        }
    };
    layout.document(&page.title, &page.href(), content)
}

// ============================================================================
// Tests
// ============================================================================
