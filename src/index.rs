//! HTML index page for the rendered diagrams.
//!
//! ## Page Layout
//!
//! ```text
//! <a id="__top">
//! <h1>Syntax Diagrams</h1>
//! <ol>                              table of contents, one entry per rule
//!   <li><a href="#atom">atom</a></li>
//!   ...
//! </ol>
//! <h2>atom</h2>                     one section per rule, same order
//! <a name="atom">
//! <img src="atom.png">
//! <br><a href="#__top">up</a>
//! ...
//! ```
//!
//! The page-top anchor lives in the `id` namespace under a name no grammar
//! rule can take, so a rule called `top` still gets its own section link.
//!
//! Uses [maud](https://maud.lambda.xyz/); rule names are escaped on output.

use crate::scan::Diagram;
use maud::{DOCTYPE, Markup, html};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Fragment id of the page-top anchor targeted by every "up" link.
pub const TOP_ANCHOR: &str = "__top";

const CSS: &str = "\
body { font-family: sans-serif; margin: 2rem; }
h2 { margin-top: 2.5rem; }
img { max-width: 100%; }
";

/// Render the complete index document.
pub fn render_index(title: &str, diagrams: &[Diagram]) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                title { (title) }
                style { (CSS) }
            }
            body {
                a id=(TOP_ANCHOR) {}
                h1 { (title) }
                (table_of_contents(diagrams))
                @for diagram in diagrams {
                    (diagram_section(diagram))
                }
            }
        }
    }
}

fn table_of_contents(diagrams: &[Diagram]) -> Markup {
    html! {
        ol.toc {
            @for diagram in diagrams {
                li {
                    a href={ "#" (diagram.rule) } { (diagram.rule) }
                }
            }
        }
    }
}

fn diagram_section(diagram: &Diagram) -> Markup {
    html! {
        h2 { (diagram.rule) }
        a name=(diagram.rule) {}
        img src=(diagram.filename) alt=(diagram.rule);
        br;
        a href={ "#" (TOP_ANCHOR) } { "up" }
    }
}

/// Write the index into `dir/filename` and return its path.
///
/// The page is written to a hidden sibling file first and renamed into place,
/// so a failed write never leaves a truncated index behind.
pub fn write_index(dir: &Path, filename: &str, page: Markup) -> io::Result<PathBuf> {
    let path = dir.join(filename);
    let staging = dir.join(format!(".{filename}.partial"));
    if let Err(e) = fs::write(&staging, page.into_string()) {
        let _ = fs::remove_file(&staging);
        return Err(e);
    }
    if let Err(e) = fs::rename(&staging, &path) {
        let _ = fs::remove_file(&staging);
        return Err(e);
    }
    Ok(path)
}
