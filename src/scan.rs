//! Discovery of rendered diagram images.
//!
//! The renderer writes one image per grammar rule into the output directory,
//! named after the rule:
//!
//! ```text
//! target/antlrdiagrams/
//! ├── atom.png        → rule "atom"
//! ├── Expr.png        → rule "Expr"
//! ├── term.png        → rule "term"
//! └── index.html      (ignored, wrong suffix)
//! ```
//!
//! Only the top level of the directory is scanned. Results are sorted
//! case-insensitively so `Expr` lands between `atom` and `term`.

use std::cmp::Ordering;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A rendered diagram found in the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagram {
    /// File name relative to the output directory, e.g. `expr.png`.
    pub filename: String,
    /// Grammar rule the image depicts: the filename minus `.<format>`.
    pub rule: String,
}

impl Diagram {
    /// Build a diagram entry, or `None` if `filename` is not a `.<format>` image.
    pub fn from_filename(filename: &str, format: &str) -> Option<Self> {
        rule_name(filename, format).map(|rule| Self {
            filename: filename.to_string(),
            rule: rule.to_string(),
        })
    }
}

/// Rule name for an image file: everything before the `.<format>` suffix.
///
/// - `"expr.png"`, `"png"` → `Some("expr")`
/// - `"Expr.PNG"`, `"png"` → `Some("Expr")`
/// - `"a.b.png"`, `"png"` → `Some("a.b")`
/// - `".png"`, `"png"` → `None` (no rule name)
/// - `"notpng"`, `"png"` → `None` (no dot before the suffix)
pub fn rule_name<'a>(filename: &'a str, format: &str) -> Option<&'a str> {
    let split = filename.len().checked_sub(format.len() + 1)?;
    if !filename.is_char_boundary(split) {
        return None;
    }
    let (stem, suffix) = filename.split_at(split);
    let ext = suffix.strip_prefix('.')?;
    if stem.is_empty() || !ext.eq_ignore_ascii_case(format) {
        return None;
    }
    Some(stem)
}

/// Whether `filename` looks like a diagram image of the given format.
pub fn is_diagram_file(filename: &str, format: &str) -> bool {
    rule_name(filename, format).is_some()
}

/// Case-insensitive filename order; byte-wise order breaks ties.
pub fn compare_filenames(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Sort diagrams by filename, case-insensitively.
pub fn sort_diagrams(diagrams: &mut [Diagram]) {
    diagrams.sort_by(|a, b| compare_filenames(&a.filename, &b.filename));
}

/// List the diagram images in `dir`, sorted case-insensitively.
///
/// Subdirectories and files with other suffixes are ignored. File names that
/// are not valid UTF-8 cannot be linked from the index and are skipped.
pub fn scan_diagrams(dir: &Path, format: &str) -> Result<Vec<Diagram>, ScanError> {
    let mut diagrams = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            warn!("skipping non UTF-8 file name: {}", entry.path().display());
            continue;
        };
        if let Some(diagram) = Diagram::from_filename(name, format) {
            diagrams.push(diagram);
        }
    }
    sort_diagrams(&mut diagrams);
    debug!(count = diagrams.len(), dir = %dir.display(), "scanned diagrams");
    Ok(diagrams)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn rule_name_strips_suffix() {
        assert_eq!(rule_name("expr.png", "png"), Some("expr"));
    }

    #[test]
    fn rule_name_suffix_case_insensitive() {
        assert_eq!(rule_name("Expr.PNG", "png"), Some("Expr"));
    }

    #[test]
    fn rule_name_keeps_inner_dots() {
        assert_eq!(rule_name("a.b.png", "png"), Some("a.b"));
    }

    #[test]
    fn rule_name_rejects_bare_suffix() {
        assert_eq!(rule_name(".png", "png"), None);
        assert_eq!(rule_name("png", "png"), None);
    }

    #[test]
    fn rule_name_requires_dot() {
        assert_eq!(rule_name("notpng", "png"), None);
    }

    #[test]
    fn rule_name_other_format() {
        assert_eq!(rule_name("expr.svg", "png"), None);
        assert_eq!(rule_name("expr.svg", "svg"), Some("expr"));
    }

    #[test]
    fn rule_name_multibyte_does_not_panic() {
        assert_eq!(rule_name("é.png", "png"), Some("é"));
        assert_eq!(rule_name("éé", "png"), None);
    }

    #[test]
    fn index_page_is_not_a_diagram() {
        assert!(!is_diagram_file("index.html", "png"));
    }

    #[test]
    fn sort_is_case_insensitive() {
        let mut diagrams: Vec<Diagram> = ["term.png", "Expr.png", "atom.png", "Block.png"]
            .iter()
            .filter_map(|f| Diagram::from_filename(f, "png"))
            .collect();
        sort_diagrams(&mut diagrams);
        assert_eq!(
            rules(&diagrams),
            vec!["atom", "Block", "Expr", "term"]
        );
    }

    #[test]
    fn sort_breaks_case_ties_deterministically() {
        let mut diagrams: Vec<Diagram> = ["expr.png", "Expr.png"]
            .iter()
            .filter_map(|f| Diagram::from_filename(f, "png"))
            .collect();
        sort_diagrams(&mut diagrams);
        assert_eq!(rules(&diagrams), vec!["Expr", "expr"]);
    }

    #[test]
    fn scan_lists_only_matching_files_sorted() {
        let tmp = output_dir_with(&["term.png", "Expr.png", "atom.png", "notes.txt", "index.html"]);
        std::fs::create_dir(tmp.path().join("nested.png")).unwrap();

        let diagrams = scan_diagrams(tmp.path(), "png").unwrap();
        assert_eq!(filenames(&diagrams), vec!["atom.png", "Expr.png", "term.png"]);
    }

    #[test]
    fn scan_empty_dir_is_empty() {
        let tmp = output_dir_with(&[]);
        assert!(scan_diagrams(tmp.path(), "png").unwrap().is_empty());
    }

    #[test]
    fn scan_missing_dir_is_io_error() {
        let tmp = output_dir_with(&[]);
        let result = scan_diagrams(&tmp.path().join("missing"), "png");
        assert!(matches!(result, Err(ScanError::Io(_))));
    }

    #[cfg(unix)]
    #[test]
    fn scan_skips_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let tmp = output_dir_with(&["expr.png", "Atom.png"]);
        std::fs::write(tmp.path().join(OsStr::from_bytes(b"\xff.png")), b"").unwrap();

        let diagrams = scan_diagrams(tmp.path(), "png").unwrap();
        assert_eq!(filenames(&diagrams), vec!["Atom.png", "expr.png"]);
    }
}
