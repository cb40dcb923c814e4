//! # Syntax
//!
//! The syntax-highlighting rule catalog. Unlike the teacher this catalog is not loaded from INI
//! files on disk: it is a fixed, hardcoded table with a single entry, matching the one rule this
//! editor ships with.

use std::fmt::{self, Display, Formatter};

/// Type of syntax highlighting for a single rendered byte.
///
/// Each `HlType` is associated with a color, via its discriminant: the SGR code is the
/// discriminant itself. See <https://en.wikipedia.org/wiki/ANSI_escape_code#Colors>.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HlType {
    /// Default foreground color.
    Normal = 39,
    /// Red.
    Number = 31,
    /// Blue; used to paint the current incremental-search match.
    Match = 34,
}

impl Display for HlType {
    /// Write the ANSI color escape sequence for the `HlType`.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result { write!(f, "\x1b[{}m", *self as u32) }
}

/// A syntax highlighting rule: a filetype name, the filename patterns that select it, and a set
/// of highlighting flags.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Conf {
    /// The name of the language, e.g. "c". Shown in the status bar.
    pub name: &'static str,
    /// Filename patterns. An entry starting with `.` matches by extension; any other entry
    /// matches as a substring of the filename.
    patterns: &'static [&'static str],
    /// Whether to highlight numbers.
    pub highlight_numbers: bool,
}

impl Default for Conf {
    /// The "no syntax selected" configuration: no filetype name, no highlighting.
    fn default() -> Self { Self { name: "no ft", patterns: &[], highlight_numbers: false } }
}

/// The built-in rule catalog. Extending it beyond this single rule is out of scope.
const CATALOG: &[Conf] =
    &[Conf { name: "c", patterns: &[".c", ".h", ".cpp"], highlight_numbers: true }];

impl Conf {
    /// Select a syntax configuration for the given filename, by scanning the catalog in order and
    /// returning the first rule whose pattern matches. If no rule matches, returns `None` and the
    /// caller should clear any previously selected syntax.
    pub fn select(filename: &str) -> Option<&'static Self> {
        CATALOG.iter().find(|conf| {
            conf.patterns.iter().any(|pat| {
                if let Some(ext) = pat.strip_prefix('.') {
                    filename.rsplit_once('.').is_some_and(|(_, e)| e == ext)
                } else {
                    filename.contains(pat)
                }
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_matches_by_extension() {
        let conf = Conf::select("main.c").expect("should match the c rule");
        assert_eq!(conf.name, "c");
        assert!(conf.highlight_numbers);

        assert!(Conf::select("header.h").is_some());
        assert!(Conf::select("lib.cpp").is_some());
    }

    #[test]
    fn select_requires_extension_boundary() {
        // "foo.cpp" has extension "cpp" but "foo.ccpp" does not end in ".c"/".h"/".cpp" as a
        // whole extension.
        assert!(Conf::select("foo.rs").is_none());
        assert!(Conf::select("Makefile").is_none());
    }

    #[test]
    fn hl_type_display_emits_sgr() {
        assert_eq!(HlType::Normal.to_string(), "\x1b[39m");
        assert_eq!(HlType::Number.to_string(), "\x1b[31m");
        assert_eq!(HlType::Match.to_string(), "\x1b[34m");
    }
}
