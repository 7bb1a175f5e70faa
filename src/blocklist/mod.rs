//! Local category blocklists.
//!
//! A blocklist directory holds flat `.txt` files, one category per file and
//! one entry per line. The category name is the uppercased file stem, so
//! `tor_exit.txt` yields `TOR_EXIT`.

use std::collections::HashSet;
use std::path::Path;

use crate::config::{BLOCKLIST_EXTENSION, NOT_AVAILABLE};

/// One category file, loaded into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Category {
    name: String,
    entries: HashSet<String>,
}

/// All categories found in a blocklist directory, ordered by file name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blocklist {
    categories: Vec<Category>,
}

impl Blocklist {
    /// Loads every `.txt` file in `dir`.
    ///
    /// A missing directory or unreadable file is reported and skipped; the
    /// result is then simply a blocklist that matches less (or nothing).
    pub fn load(dir: &Path) -> Self {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Blocklist directory {} unavailable: {}", dir.display(), e);
                return Self::default();
            }
        };

        let mut files: Vec<_> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.is_file()
                    && path.extension().and_then(|s| s.to_str()) == Some(BLOCKLIST_EXTENSION)
            })
            .collect();
        files.sort();

        let mut categories = Vec::with_capacity(files.len());
        for path in files {
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            // Stray non-UTF-8 bytes only spoil their own line
            match std::fs::read(&path) {
                Ok(bytes) => categories.push(Category {
                    name: stem.to_uppercase(),
                    entries: String::from_utf8_lossy(&bytes)
                        .lines()
                        .map(str::trim)
                        .filter(|line| !line.is_empty())
                        .map(str::to_string)
                        .collect(),
                }),
                Err(e) => log::warn!("Failed to read blocklist {}: {}", path.display(), e),
            }
        }

        log::debug!(
            "Loaded {} blocklist categories from {}",
            categories.len(),
            dir.display()
        );
        Self { categories }
    }

    /// Number of loaded categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Returns true if no category was loaded.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Comma-joined names of every category listing `token` verbatim.
    ///
    /// Returns `None` when no category matches.
    pub fn categories_for(&self, token: &str) -> Option<String> {
        let matched: Vec<&str> = self
            .categories
            .iter()
            .filter(|category| category.entries.contains(token))
            .map(|category| category.name.as_str())
            .collect();
        (!matched.is_empty()).then(|| matched.join(", "))
    }

    /// Category label for a resolved address and its associated domain.
    ///
    /// The address is checked first; the domain is only consulted when the
    /// address matches nothing. Returns "N/A" if neither matches.
    pub fn label(&self, ip: &str, domain: Option<&str>) -> String {
        self.categories_for(ip)
            .or_else(|| domain.and_then(|d| self.categories_for(d)))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn blocklist_dir() -> TempDir {
        let dir = TempDir::new().expect("Failed to create temp directory");
        std::fs::write(dir.path().join("tor.txt"), "1.2.3.4\n5.6.7.8\n").unwrap();
        std::fs::write(dir.path().join("botnet.txt"), "  1.2.3.4  \nevil.example\n\n").unwrap();
        std::fs::write(dir.path().join("notes.md"), "1.2.3.4\n").unwrap();
        dir
    }

    #[test]
    fn test_load_only_txt_files_sorted() {
        let dir = blocklist_dir();
        let blocklist = Blocklist::load(dir.path());
        assert_eq!(blocklist.len(), 2);
        assert_eq!(
            blocklist.categories_for("1.2.3.4"),
            Some("BOTNET, TOR".to_string())
        );
    }

    #[test]
    fn test_exact_line_match_only() {
        let dir = blocklist_dir();
        let blocklist = Blocklist::load(dir.path());
        assert_eq!(blocklist.categories_for("1.2.3.45"), None);
        assert_eq!(blocklist.categories_for("1.2.3"), None);
        assert_eq!(blocklist.categories_for("EVIL.EXAMPLE"), None);
    }

    #[test]
    fn test_label_falls_back_to_domain() {
        let dir = blocklist_dir();
        let blocklist = Blocklist::load(dir.path());
        assert_eq!(blocklist.label("5.6.7.8", Some("evil.example")), "TOR");
        assert_eq!(blocklist.label("9.9.9.9", Some("evil.example")), "BOTNET");
        assert_eq!(blocklist.label("9.9.9.9", None), "N/A");
        assert_eq!(blocklist.label("9.9.9.9", Some("good.example")), "N/A");
    }

    #[test]
    fn test_invalid_utf8_keeps_category() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        std::fs::write(
            dir.path().join("tor.txt"),
            b"1.2.3.4\n# caf\xe9 list\n5.6.7.8\n",
        )
        .unwrap();
        let blocklist = Blocklist::load(dir.path());
        assert_eq!(blocklist.len(), 1);
        assert_eq!(blocklist.label("1.2.3.4", None), "TOR");
        assert_eq!(blocklist.label("5.6.7.8", None), "TOR");
    }

    #[test]
    fn test_missing_directory_matches_nothing() {
        let blocklist = Blocklist::load(Path::new("/nonexistent/outsource_db"));
        assert!(blocklist.is_empty());
        assert_eq!(blocklist.label("1.2.3.4", Some("evil.example")), "N/A");
    }
}
