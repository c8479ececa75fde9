//! Static asset handling for the generate stage.
//!
//! Bundled CSS and JavaScript are written under content-hashed names
//! (`site-1a2b3c4d.css`) so a deploy never serves a stale stylesheet from a
//! browser cache. User assets from `content/assets/` and section images are
//! copied unchanged.

use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Hex characters of the content hash kept in fingerprinted names.
const FINGERPRINT_LEN: usize = 8;

/// Short SHA-256 fingerprint of `content`.
pub fn fingerprint(content: &[u8]) -> String {
    let digest = Sha256::digest(content);
    let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
    hex[..FINGERPRINT_LEN].to_string()
}

/// `stem-<hash>.ext` for `content`.
pub fn fingerprinted_name(stem: &str, ext: &str, content: &[u8]) -> String {
    format!("{stem}-{}.{ext}", fingerprint(content))
}

/// Write `content` under a fingerprinted name in `dir`. Returns the file name.
pub fn write_fingerprinted(dir: &Path, stem: &str, ext: &str, content: &str) -> io::Result<String> {
    let name = fingerprinted_name(stem, ext, content.as_bytes());
    fs::write(dir.join(&name), content)?;
    Ok(name)
}

/// Recursively copy `src` into `dst`, skipping hidden entries. Returns the
/// copied files relative to `dst`. A missing `src` copies nothing.
pub fn copy_tree(src: &Path, dst: &Path) -> io::Result<Vec<PathBuf>> {
    let mut copied = Vec::new();
    if !src.is_dir() {
        return Ok(copied);
    }
    let walker = WalkDir::new(src)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'));
    for entry in walker {
        let entry = entry.map_err(io::Error::other)?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(io::Error::other)?
            .to_path_buf();
        let target = dst.join(&rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied.push(rel);
        }
    }
    Ok(copied)
}

/// Copy one file given relative to `src_root` to the same relative path
/// under `dst_root`.
pub fn copy_relative(src_root: &Path, dst_root: &Path, rel: &str) -> io::Result<()> {
    let target = dst_root.join(rel);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(src_root.join(rel), target)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn fingerprint_is_stable_and_short() {
        let a = fingerprint(b"body { color: red }");
        assert_eq!(a.len(), FINGERPRINT_LEN);
        assert_eq!(a, fingerprint(b"body { color: red }"));
        assert_ne!(a, fingerprint(b"body { color: blue }"));
    }

    #[test]
    fn fingerprinted_name_shape() {
        let name = fingerprinted_name("site", "css", b"x");
        assert!(name.starts_with("site-"));
        assert!(name.ends_with(".css"));
        assert_eq!(name.len(), "site-".len() + FINGERPRINT_LEN + ".css".len());
    }

    #[test]
    fn copy_tree_skips_hidden_and_nests() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        fs::create_dir_all(src.path().join("fonts")).unwrap();
        fs::write(src.path().join("favicon.svg"), "<svg/>").unwrap();
        fs::write(src.path().join("fonts/inter.woff2"), "font").unwrap();
        fs::write(src.path().join(".DS_Store"), "junk").unwrap();

        let copied = copy_tree(src.path(), dst.path()).unwrap();
        assert_eq!(copied.len(), 2);
        assert!(dst.path().join("fonts/inter.woff2").exists());
        assert!(!dst.path().join(".DS_Store").exists());
    }

    #[test]
    fn copy_tree_missing_source_is_empty() {
        let dst = TempDir::new().unwrap();
        let copied = copy_tree(&dst.path().join("nope"), dst.path()).unwrap();
        assert!(copied.is_empty());
    }

    #[test]
    fn copy_relative_creates_parents() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        fs::create_dir_all(src.path().join("products")).unwrap();
        fs::write(src.path().join("products/010-a.svg"), "<svg/>").unwrap();
        copy_relative(src.path(), dst.path(), "products/010-a.svg").unwrap();
        assert!(dst.path().join("products/010-a.svg").exists());
    }
}
