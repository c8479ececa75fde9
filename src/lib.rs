//! # Diecast Site
//!
//! A static marketing site generator for a die-casting manufacturer. The
//! content directory is the data source: section directories become
//! carousels, news articles are paged, and numbered markdown files become
//! pages.
//!
//! At its core are two small navigation state machines that every interactive
//! part of the site runs on:
//!
//! - [`carousel::Carousel`]: a slide index over a fixed collection with
//!   next/previous/go-to, wrapping around the ends by default.
//! - [`pager::Pager`]: a page index over a list split into fixed-size pages,
//!   clamped at the ends by default.
//!
//! Both share a [`cursor::Cursor`], so the boundary policy ([`cursor::Boundary`])
//! is a per-instance choice rather than a property of the type.
//! [`autoplay::Slideshow`] adds the auto-advance timer on top of a carousel.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Scan      content/  →  manifest.json    (filesystem → structured data)
//! 2. Generate  manifest  →  dist/            (final HTML site)
//! ```
//!
//! The manifest is human-readable JSON, so what the generator will see can be
//! inspected before anything is rendered.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`cursor`] | Bounded position with wrap/clamp policy shared by both controllers |
//! | [`carousel`] | Slide carousel controller |
//! | [`pager`] | Paginated list controller |
//! | [`autoplay`] | Auto-advance timer and the event queue that serializes it with user input |
//! | [`scan`] | Stage 1: walks the content directory and produces the manifest |
//! | [`generate`] | Stage 2: renders the HTML site from the manifest using Maud |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`types`] | Shared types serialized between stages |
//! | [`naming`] | `NNN-name` filename convention parser |
//! | [`forms`] | Contact and newsletter payloads and the submission seam |
//! | [`assets`] | Fingerprinted bundles and asset copying |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Render the State, Script the Transitions
//!
//! The generated pages are complete without JavaScript: each carousel is
//! rendered at its start slide and each news page is its own file with real
//! links. The bundled script replays the same next/previous/go-to rules in the
//! browser and drives the timer there.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/). Templates are Rust
//! expressions checked at compile time and all interpolation is auto-escaped.
//!
//! ## NNN-Prefix Ordering
//!
//! Slides, news and pages use a numeric prefix (`010-`, `020-`, etc.) for
//! explicit ordering, parsed by [`naming::parse_entry_name`]. News is shown
//! highest number first.

pub mod assets;
pub mod autoplay;
pub mod carousel;
pub mod config;
pub mod cursor;
pub mod forms;
pub mod generate;
pub mod naming;
pub mod output;
pub mod pager;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
