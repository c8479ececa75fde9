//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. User values are
//! layered on top of stock defaults, so a config file only needs the keys it
//! wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! name = "Diecast Works"
//! tagline = "Precision aluminium and zinc die casting"
//! footer = "All rights reserved."
//!
//! [carousels.about]
//! auto_advance = true       # Rotate slides on a timer
//! interval_ms = 6000        # Time between automatic advances
//! boundary = "wrap"         # "wrap" or "clamp" at either end
//! start_index = 0
//!
//! [carousels.products]
//! auto_advance = false
//!
//! [carousels.industries]
//! auto_advance = false
//!
//! [news]
//! page_size = 4             # Articles per news page
//! boundary = "clamp"        # Pager behavior at first/last page
//! home_count = 3            # Latest articles shown on the home page
//!
//! [contact]
//! endpoint = "/api/contact" # Form POST target (external service)
//!
//! [newsletter]
//! endpoint = "/api/newsletter"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::cursor::Boundary;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Shortest auto-advance interval accepted. Anything faster is unreadable.
pub const MIN_INTERVAL_MS: u64 = 1000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Company name, tagline and footer text.
    pub site: SiteInfo,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
    /// Layout settings.
    pub theme: ThemeConfig,
    /// Per-section carousel behavior.
    pub carousels: CarouselsConfig,
    /// News feed pagination.
    pub news: NewsConfig,
    /// Contact form target and company contact details.
    pub contact: ContactConfig,
    /// Newsletter signup target.
    pub newsletter: NewsletterConfig,
    /// Parallel rendering settings.
    pub processing: ProcessingConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, carousel) in self.carousels.named() {
            if carousel.auto_advance {
                check_interval(&format!("carousels.{name}.interval_ms"), carousel.interval_ms)?;
            }
        }
        if self.news.page_size == 0 {
            return Err(ConfigError::Validation(
                "news.page_size must be at least 1".into(),
            ));
        }
        if self.contact.endpoint.trim().is_empty() {
            return Err(ConfigError::Validation(
                "contact.endpoint must not be empty".into(),
            ));
        }
        if self.newsletter.endpoint.trim().is_empty() {
            return Err(ConfigError::Validation(
                "newsletter.endpoint must not be empty".into(),
            ));
        }
        if self.site.name.trim().is_empty() {
            return Err(ConfigError::Validation("site.name must not be empty".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    pub name: String,
    pub tagline: String,
    pub footer: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            name: "Diecast Works".to_string(),
            tagline: "Precision aluminium and zinc die casting".to_string(),
            footer: "All rights reserved.".to_string(),
        }
    }
}

/// Behavior of one carousel on the site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    /// Rotate to the next slide on a timer.
    pub auto_advance: bool,
    /// Milliseconds between automatic advances.
    pub interval_ms: u64,
    /// What next/previous do at the ends.
    pub boundary: Boundary,
    /// Slide shown first. Clamped to the last slide.
    pub start_index: usize,
}

impl CarouselConfig {
    /// Timer interval when auto-advance is on.
    pub fn autoplay_interval(&self) -> Option<Duration> {
        self.auto_advance
            .then(|| Duration::from_millis(self.interval_ms))
    }

    fn rotating(interval_ms: u64) -> Self {
        Self {
            auto_advance: true,
            interval_ms,
            ..Self::default()
        }
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            auto_advance: false,
            interval_ms: 5000,
            boundary: Boundary::Wrap,
            start_index: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselsConfig {
    /// Multi-slide about panel (auto-advances by default).
    pub about: CarouselConfig,
    pub products: CarouselConfig,
    pub industries: CarouselConfig,
}

impl CarouselsConfig {
    pub fn named(&self) -> [(&'static str, &CarouselConfig); 3] {
        [
            ("about", &self.about),
            ("products", &self.products),
            ("industries", &self.industries),
        ]
    }

    pub fn get(&self, name: &str) -> Option<&CarouselConfig> {
        self.named()
            .into_iter()
            .find(|(n, _)| *n == name)
            .map(|(_, c)| c)
    }
}

impl Default for CarouselsConfig {
    fn default() -> Self {
        Self {
            about: CarouselConfig::rotating(6000),
            products: CarouselConfig::default(),
            industries: CarouselConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NewsConfig {
    /// Articles per news page.
    pub page_size: usize,
    /// Pager behavior at the first and last page.
    pub boundary: Boundary,
    /// Latest articles featured on the home page.
    pub home_count: usize,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            page_size: 4,
            boundary: Boundary::Clamp,
            home_count: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    /// URL the contact form posts to.
    pub endpoint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            endpoint: "/api/contact".to_string(),
            email: None,
            phone: None,
            address: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NewsletterConfig {
    /// URL the newsletter signup form posts to.
    pub endpoint: String,
}

impl Default for NewsletterConfig {
    fn default() -> Self {
        Self {
            endpoint: "/api/newsletter".to_string(),
        }
    }
}

/// Parallel rendering settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of render threads. Defaults to the number of cores;
    /// larger values are clamped down.
    pub max_threads: Option<usize>,
}

/// Resolve the effective thread count from config.
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_threads.map(|n| n.clamp(1, cores)).unwrap_or(cores)
}

/// Layout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Maximum width of the main content column (CSS value).
    pub content_width: String,
    /// Height of the hero banner (CSS value).
    pub hero_height: String,
    /// Gap between cards in product and news grids (CSS value).
    pub card_gap: String,
    /// Slide transition duration (CSS time).
    pub slide_transition: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            content_width: "72rem".to_string(),
            hero_height: "60vh".to_string(),
            card_gap: "1.5rem".to_string(),
            slide_transition: "450ms".to_string(),
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Secondary text (dates, captions, footer).
    pub text_muted: String,
    /// Buttons, active dots, links.
    pub accent: String,
    pub border: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#1b1f24".to_string(),
            text_muted: "#5f6b7a".to_string(),
            accent: "#c2410c".to_string(),
            border: "#dde2e8".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#111418".to_string(),
            text: "#eef1f4".to_string(),
            text_muted: "#9aa6b2".to_string(),
            accent: "#fb923c".to_string(),
            border: "#2a3139".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

/// Auto-advance interval in milliseconds, rejected below [`MIN_INTERVAL_MS`].
/// `key` names the setting in the error.
pub fn check_interval(key: &str, interval_ms: u64) -> Result<Duration, ConfigError> {
    if interval_ms < MIN_INTERVAL_MS {
        return Err(ConfigError::Validation(format!(
            "{key} must be at least {MIN_INTERVAL_MS}"
        )));
    }
    Ok(Duration::from_millis(interval_ms))
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Stock default config as a `toml::Value::Table`, the base layer for merges.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config does not serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key by key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read `config.toml` from a directory as a raw TOML value, if present.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    Ok(Some(toml::from_str(&content)?))
}

/// Merge an optional overlay onto `base`, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the content root.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    resolve_config(stock_defaults_value()?, load_raw_config(root)?)
}

/// Fully commented stock `config.toml`, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# Diecast Site Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Company
# ---------------------------------------------------------------------------
[site]
name = "Diecast Works"
tagline = "Precision aluminium and zinc die casting"
footer = "All rights reserved."

# ---------------------------------------------------------------------------
# Carousels
# ---------------------------------------------------------------------------
# boundary: "wrap" cycles from the last slide back to the first,
#           "clamp" stops at either end.
# interval_ms must be at least 1000 when auto_advance is on.
[carousels.about]
auto_advance = true
interval_ms = 6000
boundary = "wrap"
start_index = 0

[carousels.products]
auto_advance = false
interval_ms = 5000
boundary = "wrap"
start_index = 0

[carousels.industries]
auto_advance = false
interval_ms = 5000
boundary = "wrap"
start_index = 0

# ---------------------------------------------------------------------------
# News feed
# ---------------------------------------------------------------------------
[news]
# Articles per page on news/index.html, news/page-2.html, ...
page_size = 4
# "clamp" disables previous/next at the ends, "wrap" links around.
boundary = "clamp"
# Latest articles featured on the home page.
home_count = 3

# ---------------------------------------------------------------------------
# Forms (submitted to external services)
# ---------------------------------------------------------------------------
[contact]
endpoint = "/api/contact"
# email = "sales@example.com"
# phone = "+1 555 0100"
# address = "1 Foundry Road"

[newsletter]
endpoint = "/api/newsletter"

# ---------------------------------------------------------------------------
# Layout
# ---------------------------------------------------------------------------
[theme]
content_width = "72rem"
hero_height = "60vh"
card_gap = "1.5rem"
slide_transition = "450ms"

# ---------------------------------------------------------------------------
# Colors
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
text = "#1b1f24"
text_muted = "#5f6b7a"
accent = "#c2410c"
border = "#dde2e8"

[colors.dark]
background = "#111418"
text = "#eef1f4"
text_muted = "#9aa6b2"
accent = "#fb923c"
border = "#2a3139"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel render threads. Omit to use every core.
# max_threads = 4
"##
}

/// CSS custom properties for both color schemes.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    let scheme = |s: &ColorScheme| {
        format!(
            "--color-bg: {};\n    --color-text: {};\n    --color-text-muted: {};\n    --color-accent: {};\n    --color-border: {};",
            s.background, s.text, s.text_muted, s.accent, s.border
        )
    };
    format!(
        ":root {{\n    {light}\n}}\n\n@media (prefers-color-scheme: dark) {{\n    :root {{\n    {dark}\n    }}\n}}",
        light = scheme(&colors.light),
        dark = scheme(&colors.dark),
    )
}

/// CSS custom properties for layout.
pub fn generate_theme_css(theme: &ThemeConfig) -> String {
    format!(
        r#":root {{
    --content-width: {content_width};
    --hero-height: {hero_height};
    --card-gap: {card_gap};
    --slide-transition: {slide_transition};
}}"#,
        content_width = theme.content_width,
        hero_height = theme.hero_height,
        card_gap = theme.card_gap,
        slide_transition = theme.slide_transition,
    )
}
