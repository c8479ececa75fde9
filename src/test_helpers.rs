//! Shared test utilities.
//!
//! Lookup helpers and navigation assertions for scan-stage data.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(tmp.path()).unwrap();
//!
//! let history = find_page(&manifest, "history");
//! assert_eq!(history.title, "Our History");
//!
//! assert_nav_shape(&manifest, &[
//!     ("Home", 0),
//!     ("Products", 4),
//! ]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::types::{Manifest, NavItem, Page, Slide};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    crate::assets::copy_tree(&fixtures, tmp.path()).unwrap();
    tmp
}

// =========================================================================
// Manifest lookups, panicking with a clear message on miss
// =========================================================================

/// Find a page by slug. Panics if not found.
pub fn find_page<'a>(manifest: &'a Manifest, slug: &str) -> &'a Page {
    manifest
        .pages
        .iter()
        .find(|p| p.slug == slug)
        .unwrap_or_else(|| {
            let slugs: Vec<&str> = manifest.pages.iter().map(|p| p.slug.as_str()).collect();
            panic!("page '{slug}' not found. Available: {slugs:?}")
        })
}

/// Find a top-level nav item by title. Panics if not found.
pub fn find_nav<'a>(manifest: &'a Manifest, title: &str) -> &'a NavItem {
    manifest
        .navigation
        .iter()
        .find(|n| n.title == title)
        .unwrap_or_else(|| panic!("nav item '{title}' not found. Available: {:?}", nav_titles(manifest)))
}

// =========================================================================
// Bulk extractors
// =========================================================================

pub fn slide_titles(slides: &[Slide]) -> Vec<&str> {
    slides.iter().map(|s| s.title.as_str()).collect()
}

pub fn nav_titles(manifest: &Manifest) -> Vec<&str> {
    manifest.navigation.iter().map(|n| n.title.as_str()).collect()
}

pub fn nav_children_titles<'a>(manifest: &'a Manifest, title: &str) -> Vec<&'a str> {
    find_nav(manifest, title)
        .children
        .iter()
        .map(|c| c.title.as_str())
        .collect()
}

// =========================================================================
// Navigation assertions
// =========================================================================

/// Assert the top-level nav titles and each item's child count, in order.
pub fn assert_nav_shape(manifest: &Manifest, expected: &[(&str, usize)]) {
    let actual: Vec<(&str, usize)> = manifest
        .navigation
        .iter()
        .map(|n| (n.title.as_str(), n.children.len()))
        .collect();
    assert_eq!(actual, expected, "navigation shape mismatch");
}
