//! Manifest types shared by the scan and generate stages.
//!
//! The scan stage serializes a [`Manifest`] to JSON; the generate stage reads
//! it back. Both sides use these definitions so the format cannot drift.

use crate::config::SiteConfig;
use serde::{Deserialize, Serialize};

/// Everything the generator needs, produced by [`scan`](crate::scan::scan).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub navigation: Vec<NavItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero: Option<Hero>,
    /// Slides of the rotating about panel, in display order.
    #[serde(default)]
    pub about: Vec<Slide>,
    #[serde(default)]
    pub products: Vec<Slide>,
    #[serde(default)]
    pub industries: Vec<Slide>,
    /// News articles, newest first.
    #[serde(default)]
    pub news: Vec<NewsItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pages: Vec<Page>,
    pub config: SiteConfig,
}

impl Manifest {
    /// Slides of a named carousel section (`about`, `products`, `industries`).
    pub fn section(&self, name: &str) -> Option<&[Slide]> {
        match name {
            "about" => Some(&self.about),
            "products" => Some(&self.products),
            "industries" => Some(&self.industries),
            _ => None,
        }
    }
}

/// Banner at the top of the home page, from `hero.md`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hero {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    /// Remaining markdown after title, tagline and call to action.
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_to_action: Option<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub href: String,
}

/// One item of a carousel: an about slide, a product, or an industry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slide {
    /// Sort key from the number prefix (`u32::MAX` when unnumbered).
    pub number: u32,
    pub title: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Markdown body without the title heading.
    pub body: String,
    /// Image path relative to the output root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Markdown source, relative to the content root.
    pub source_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    pub number: u32,
    pub title: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub body: String,
    pub source_path: String,
}

/// A page generated from a markdown file in the content root.
///
/// Numbered files (`NNN-name.md`) appear in navigation, sorted by number.
/// A file whose only content is a URL becomes an external nav link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Title from the first `# heading`, or `link_title` as fallback.
    pub title: String,
    /// Nav label (filename with number stripped, dashes → spaces).
    pub link_title: String,
    pub slug: String,
    /// Raw markdown content (or the URL for link pages).
    pub body: String,
    pub in_nav: bool,
    pub sort_key: u32,
    pub is_link: bool,
    pub source_path: String,
}

impl Page {
    pub fn href(&self) -> String {
        if self.is_link {
            self.body.trim().to_string()
        } else {
            format!("/{}.html", self.slug)
        }
    }
}

/// Navigation entry. `path` is a site-absolute href or an external URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavItem {
    pub title: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub external: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

impl NavItem {
    pub fn link(title: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            path: path.into(),
            external: false,
            children: vec![],
        }
    }
}
