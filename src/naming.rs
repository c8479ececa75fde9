//! Filename parsing for the `NNN-name` ordering convention.
//!
//! Every content entry (pages, slides, products, news articles) may carry a
//! numeric prefix that fixes its display order. This is the only ordering
//! mechanism: there is no front-matter and no separate index file.
//!
//! - `020-High-Pressure-Casting` → number 20, title "High Pressure Casting",
//!   slug `high-pressure-casting`
//! - `careers` → unnumbered, title "careers", slug `careers`

/// A parsed entry name.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// Number prefix if present.
    pub number: Option<u32>,
    /// Name after `NNN-`, dashes preserved. Empty for number-only names.
    pub name: String,
    /// Name with dashes turned into spaces.
    pub display_title: String,
}

impl ParsedName {
    /// URL slug: lowercase, ASCII alphanumerics and single dashes only.
    ///
    /// Number-only names fall back to the number itself so every entry gets
    /// a stable, non-empty slug.
    pub fn slug(&self) -> String {
        let slug = slugify(&self.name);
        match (slug.is_empty(), self.number) {
            (true, Some(n)) => n.to_string(),
            _ => slug,
        }
    }

    pub fn in_nav(&self) -> bool {
        self.number.is_some()
    }
}

/// Parse an entry name following the `NNN-name` convention.
pub fn parse_entry_name(name: &str) -> ParsedName {
    if let Some((prefix, rest)) = name.split_once('-')
        && let Ok(num) = prefix.parse::<u32>()
    {
        return ParsedName {
            number: Some(num),
            name: rest.to_string(),
            display_title: rest.replace('-', " "),
        };
    }
    if let Ok(num) = name.parse::<u32>() {
        return ParsedName {
            number: Some(num),
            name: String::new(),
            display_title: String::new(),
        };
    }
    ParsedName {
        number: None,
        name: name.to_string(),
        display_title: name.replace('-', " "),
    }
}

/// Lowercase `text` and collapse every run of non-alphanumerics into one dash.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_multi_word() {
        let p = parse_entry_name("020-High-Pressure-Casting");
        assert_eq!(p.number, Some(20));
        assert_eq!(p.name, "High-Pressure-Casting");
        assert_eq!(p.display_title, "High Pressure Casting");
        assert_eq!(p.slug(), "high-pressure-casting");
        assert!(p.in_nav());
    }

    #[test]
    fn number_only() {
        let p = parse_entry_name("007");
        assert_eq!(p.number, Some(7));
        assert_eq!(p.display_title, "");
        assert_eq!(p.slug(), "7");
    }

    #[test]
    fn trailing_dash_is_number_only() {
        let p = parse_entry_name("001-");
        assert_eq!(p.number, Some(1));
        assert_eq!(p.name, "");
    }

    #[test]
    fn unnumbered_with_dashes() {
        let p = parse_entry_name("press-kit");
        assert_eq!(p.number, None);
        assert_eq!(p.display_title, "press kit");
        assert!(!p.in_nav());
    }

    #[test]
    fn zero_prefix() {
        let p = parse_entry_name("000-Overview");
        assert_eq!(p.number, Some(0));
        assert_eq!(p.display_title, "Overview");
    }

    #[test]
    fn slugify_collapses_punctuation() {
        assert_eq!(slugify("ISO 9001:2015 & IATF"), "iso-9001-2015-iatf");
        assert_eq!(slugify("--Zinc--Alloys--"), "zinc-alloys");
        assert_eq!(slugify("Aluminium A380"), "aluminium-a380");
    }
}
