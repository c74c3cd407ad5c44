//! Sample sanitization before learning and extraction.
//!
//! ## Why Clean?
//!
//! Scraped pages carry blocks that differ on every request but carry no
//! data: inline scripts with session tokens, generated styles, tracking
//! `<noscript>` pixels. Left in, they punch extra holes into the template:
//!
//! ```text
//! Page 1: "<script>var t=81723;</script><h1>Alice</h1>"
//! Page 2: "<script>var t=10456;</script><h1>Bob</h1>"
//!
//! Raw:     "<script>var t={{ HOLE }};</script><h1>{{ HOLE }}</h1>"
//! Cleaned: "<h1>{{ HOLE }}</h1>"
//! ```
//!
//! Cleaning also normalizes `\r\n` to `\n`, so pages served with different
//! line endings still align.
//!
//! The same sanitizer runs on training samples and on documents being
//! extracted from, so both sides see the same text.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::Result;

/// Tags whose whole blocks are removed by default.
pub const DEFAULT_DENYLIST: &[&str] = &["script", "style", "noscript"];

static DEFAULT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&denylist_pattern(DEFAULT_DENYLIST)).expect("default denylist pattern is valid")
});

/// A preprocessing filter applied to every sample and document.
///
/// Implementations must be deterministic and should be idempotent: cleaning
/// already-clean text returns it unchanged.
///
/// ```rust
/// use std::borrow::Cow;
/// use templatemaker::{Aligner, Sanitizer, Template};
///
/// #[derive(Debug, Clone)]
/// struct Lowercase;
///
/// impl Sanitizer for Lowercase {
///     fn clean<'a>(&self, text: &'a str) -> Cow<'a, str> {
///         Cow::Owned(text.to_lowercase())
///     }
/// }
///
/// let mut template = Template::with_sanitizer(Aligner::new(0), Lowercase);
/// template.learn("HELLO");
/// assert_eq!(template.render("*").unwrap(), "hello");
/// ```
pub trait Sanitizer: Send + Sync {
    /// Return the cleaned form of `text`, borrowing when nothing changes.
    fn clean<'a>(&self, text: &'a str) -> Cow<'a, str>;
}

/// Leaves text untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Sanitizer for Passthrough {
    fn clean<'a>(&self, text: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(text)
    }
}

/// Strips denylisted markup blocks and normalizes line endings.
///
/// A block runs from an opening tag (`<name`, case-insensitive, optional
/// whitespace after `<`) to the nearest matching closing tag `</name>`.
/// Stripping repeats until no block is left, so the output never contains
/// a block even when the input nests or interleaves them, and cleaning is
/// idempotent.
///
/// ## Example
///
/// ```rust
/// use templatemaker::{HtmlCleaner, Sanitizer};
///
/// let cleaner = HtmlCleaner::default();
/// let cleaned = cleaner.clean("a<SCRIPT src=x>\r\n</script>b\r\nc");
/// assert_eq!(cleaned, "ab\nc");
///
/// let custom = HtmlCleaner::new(&["svg"]).unwrap();
/// assert_eq!(custom.clean("<svg><path/></svg><style></style>"), "<style></style>");
/// ```
#[derive(Debug, Clone)]
pub struct HtmlCleaner {
    blocks: Option<Regex>,
}

impl HtmlCleaner {
    /// Create a cleaner that removes blocks of the given tag names.
    ///
    /// An empty denylist only normalizes line endings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Pattern`](crate::Error::Pattern) if the combined
    /// pattern cannot be compiled (for example, it exceeds the regex size
    /// limit).
    pub fn new(tags: &[&str]) -> Result<Self> {
        let blocks = if tags.is_empty() {
            None
        } else {
            Some(Regex::new(&denylist_pattern(tags))?)
        };
        Ok(Self { blocks })
    }

    /// A cleaner that only normalizes line endings.
    #[must_use]
    pub fn line_endings_only() -> Self {
        Self { blocks: None }
    }
}

impl Default for HtmlCleaner {
    fn default() -> Self {
        Self {
            blocks: Some(DEFAULT_PATTERN.clone()),
        }
    }
}

impl Sanitizer for HtmlCleaner {
    fn clean<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let mut cleaned = Cow::Borrowed(text);
        if let Some(blocks) = &self.blocks {
            // Removing one block can splice the halves of another together.
            loop {
                let stripped = match blocks.replace_all(&cleaned, "") {
                    Cow::Borrowed(_) => break,
                    Cow::Owned(stripped) => stripped,
                };
                cleaned = Cow::Owned(stripped);
            }
        }
        // "\r\r\n" becomes "\r\n" after one pass.
        while cleaned.contains("\r\n") {
            cleaned = Cow::Owned(cleaned.replace("\r\n", "\n"));
        }
        cleaned
    }
}

/// One alternative per tag, since the regex engine has no backreferences.
fn denylist_pattern(tags: &[&str]) -> String {
    let alternatives: Vec<String> = tags
        .iter()
        .map(|tag| {
            let tag = regex::escape(tag);
            format!(r"<\s*{tag}\b.*?</{tag}>")
        })
        .collect();
    format!("(?is){}", alternatives.join("|"))
}
