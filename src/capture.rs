//! The Capture type: the value one hole took in an extracted document.
//!
//! ## What a Hole Captures
//!
//! Captures come out of [`Matcher`](crate::Matcher) in template order, one
//! per hole, and every hole always produces exactly one capture:
//!
//! | Hole position | Captured span |
//! |---------------|---------------|
//! | Between two literals | Shortest span before the next literal |
//! | First segment | From the start of the document to the first literal |
//! | Last segment | From the last literal to the end of the document |
//!
//! A hole whose neighbouring literals touch captures the empty string; the
//! capture still exists, with `start == end`. Two holes are never adjacent
//! in a skeleton, so no capture has to be split between two holes.
//!
//! ```text
//! Template: "<i>{{ HOLE }}</i> {{ HOLE }}"
//! Document: "<i></i> tail text"
//!
//! hole 0: ""           3..3
//! hole 1: "tail text"  8..17   (runs to the end)
//! ```

use std::fmt;
use std::ops::Range;

/// The text that filled one hole of a template, located in the document.
///
/// ## Byte Offsets
///
/// `start` and `end` are byte offsets into the *cleaned* document (see
/// [`Template::clean`](crate::Template::clean)), not into the raw input and
/// not character indices. When the sanitizer strips a `<script>` block
/// before the hole, the offsets shift accordingly:
///
/// ```rust
/// use templatemaker::Template;
///
/// let mut template = Template::new(0);
/// template.learn("<p>Alice</p>");
/// template.learn("<p>Bob</p>");
///
/// let raw = "<script>x</script><p>Carol</p>";
/// let capture = &template.captures(raw).unwrap()[0];
/// let cleaned = template.clean(raw);
///
/// assert_eq!(capture.span(), 3..8);
/// assert_eq!(&cleaned[capture.span()], "Carol");
/// ```
///
/// `index` counts holes only, never literal segments:
///
/// ```text
/// Template: "<h1>{{ HOLE }}</h1><p>{{ HOLE }}</p>"
///                 ^ index 0            ^ index 1
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    /// The captured text.
    pub text: String,
    /// Byte offset where the capture starts in the cleaned document.
    pub start: usize,
    /// Byte offset where the capture ends (exclusive) in the cleaned document.
    pub end: usize,
    /// Zero-based index of the hole this capture fills.
    pub index: usize,
}

impl Capture {
    /// Create a capture from its text and location.
    #[must_use]
    pub fn new(text: impl Into<String>, start: usize, end: usize, index: usize) -> Self {
        Self {
            text: text.into(),
            start,
            end,
            index,
        }
    }

    /// Capture `span` of `document` for hole `index`.
    ///
    /// `span` must lie on character boundaries of `document`.
    pub(crate) fn from_span(document: &str, span: Range<usize>, index: usize) -> Self {
        Self::new(&document[span.clone()], span.start, span.end, index)
    }

    /// The captured text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether the hole matched an empty span.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The byte span of this capture in the cleaned document.
    #[must_use]
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl fmt::Display for Capture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hole {} [{}..{}]: {:?}", self.index, self.start, self.end, self.text)
    }
}

impl From<Capture> for String {
    fn from(capture: Capture) -> Self {
        capture.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_span() {
        let capture = Capture::from_span("<i>é</i>", 3..5, 0);
        assert_eq!(capture.as_str(), "é");
        assert_eq!(capture.span(), 3..5);
        assert!(!capture.is_empty());
    }

    #[test]
    fn test_empty_capture_keeps_position() {
        let capture = Capture::from_span("<i></i>", 3..3, 2);
        assert!(capture.is_empty());
        assert_eq!(capture.start, 3);
        assert_eq!(capture.index, 2);
    }

    #[test]
    fn test_display() {
        let capture = Capture::new("Carol", 7, 12, 0);
        assert_eq!(capture.to_string(), "hole 0 [7..12]: \"Carol\"");
        assert_eq!(String::from(capture), "Carol");
    }
}
