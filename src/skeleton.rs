//! The Skeleton type: literal text interleaved with holes.
//!
//! A skeleton is what a [`Template`](crate::Template) has learned so far.
//! Literal segments are text every sample agreed on; holes mark the spans
//! where samples disagreed.
//!
//! ```text
//! Sample 1: "Hello, Alice! Welcome."
//! Sample 2: "Hello, Bob! Welcome."
//!
//! Skeleton: [Literal("Hello, "), Hole, Literal("! Welcome.")]
//! ```
//!
//! ## Canonical Form
//!
//! A skeleton never holds two adjacent holes, two adjacent literals, or an
//! empty literal. Every constructor canonicalizes, so two skeletons that
//! describe the same pattern compare equal.
//!
//! ## Marked Text
//!
//! For storage, a skeleton can be flattened into a single string with a
//! marker character standing in for each hole ([`Skeleton::to_marked`]).
//! The marker must not occur in the literal text; [`DEFAULT_MARKER`] is the
//! ASCII unit separator, which does not appear in ordinary documents.

use std::fmt;

/// Marker character used by the flattened text form.
pub const DEFAULT_MARKER: char = '\u{1f}';

/// Placeholder used when displaying a skeleton.
pub const DEFAULT_PLACEHOLDER: &str = "{{ HOLE }}";

/// One piece of a skeleton.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Text shared by every sample learned so far.
    Literal(String),
    /// A span that varied between samples.
    Hole,
}

impl Segment {
    /// Whether this segment is a hole.
    #[must_use]
    pub fn is_hole(&self) -> bool {
        matches!(self, Segment::Hole)
    }

    /// The literal text, if this is a literal segment.
    #[must_use]
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Segment::Literal(text) => Some(text),
            Segment::Hole => None,
        }
    }
}

/// An ordered, canonical sequence of literal and hole segments.
///
/// ## Example
///
/// ```rust
/// use templatemaker::{Segment, Skeleton};
///
/// let skeleton = Skeleton::from_segments([
///     Segment::Literal("<b>".into()),
///     Segment::Hole,
///     Segment::Hole,
///     Segment::Literal("</b>".into()),
/// ]);
///
/// // Adjacent holes collapse into one.
/// assert_eq!(skeleton.hole_count(), 1);
/// assert_eq!(skeleton.render("*"), "<b>*</b>");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Skeleton {
    segments: Vec<Segment>,
}

impl Skeleton {
    /// A skeleton made of a single literal (no holes).
    #[must_use]
    pub fn from_literal(text: impl Into<String>) -> Self {
        Self::from_segments([Segment::Literal(text.into())])
    }

    /// Build a skeleton from arbitrary segments, canonicalizing them.
    pub fn from_segments<I>(segments: I) -> Self
    where
        I: IntoIterator<Item = Segment>,
    {
        let mut builder = SkeletonBuilder::default();
        for segment in segments {
            match segment {
                Segment::Literal(text) => builder.push_literal(&text),
                Segment::Hole => builder.push_hole(),
            }
        }
        builder.finish()
    }

    /// Parse the flattened text form, treating every `marker` as a hole.
    ///
    /// ```rust
    /// use templatemaker::Skeleton;
    ///
    /// let skeleton = Skeleton::from_marked("a|b||c", '|');
    /// assert_eq!(skeleton.hole_count(), 2);
    /// assert_eq!(skeleton.to_marked('|'), "a|b|c");
    /// ```
    #[must_use]
    pub fn from_marked(text: &str, marker: char) -> Self {
        let mut builder = SkeletonBuilder::default();
        for (i, part) in text.split(marker).enumerate() {
            if i > 0 {
                builder.push_hole();
            }
            builder.push_literal(part);
        }
        builder.finish()
    }

    /// Flatten into a single string with `marker` standing in for holes.
    #[must_use]
    pub fn to_marked(&self, marker: char) -> String {
        let mut buf = [0u8; 4];
        self.render(marker.encode_utf8(&mut buf))
    }

    /// The segments, in document order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of holes.
    #[must_use]
    pub fn hole_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_hole()).count()
    }

    /// Whether the skeleton has no segments at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Total length in bytes of the literal text.
    #[must_use]
    pub fn literal_len(&self) -> usize {
        self.segments
            .iter()
            .filter_map(Segment::as_literal)
            .map(str::len)
            .sum()
    }

    /// Substitute `placeholder` for every hole and concatenate.
    #[must_use]
    pub fn render(&self, placeholder: &str) -> String {
        let mut out = String::with_capacity(
            self.literal_len() + self.hole_count() * placeholder.len(),
        );
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Hole => out.push_str(placeholder),
            }
        }
        out
    }
}

impl fmt::Display for Skeleton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(DEFAULT_PLACEHOLDER))
    }
}

/// Incremental canonical builder used by constructors and the aligner.
#[derive(Debug, Default)]
pub(crate) struct SkeletonBuilder {
    segments: Vec<Segment>,
}

impl SkeletonBuilder {
    pub(crate) fn push_literal(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.segments.last_mut() {
            Some(Segment::Literal(last)) => last.push_str(text),
            _ => self.segments.push(Segment::Literal(text.to_string())),
        }
    }

    pub(crate) fn push_hole(&mut self) {
        if !matches!(self.segments.last(), Some(Segment::Hole)) {
            self.segments.push(Segment::Hole);
        }
    }

    pub(crate) fn finish(self) -> Skeleton {
        Skeleton {
            segments: self.segments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(s: &str) -> Segment {
        Segment::Literal(s.to_string())
    }

    #[test]
    fn test_canonical_merging() {
        let skeleton = Skeleton::from_segments([
            lit("a"),
            lit(""),
            lit("b"),
            Segment::Hole,
            Segment::Hole,
            lit("c"),
        ]);
        assert_eq!(skeleton.segments(), &[lit("ab"), Segment::Hole, lit("c")]);
    }

    #[test]
    fn test_empty_literal_is_empty_skeleton() {
        let skeleton = Skeleton::from_literal("");
        assert!(skeleton.is_empty());
        assert_eq!(skeleton.hole_count(), 0);
    }

    #[test]
    fn test_render_and_display() {
        let skeleton = Skeleton::from_segments([lit("Hi "), Segment::Hole, lit("!")]);
        assert_eq!(skeleton.render("_"), "Hi _!");
        assert_eq!(skeleton.to_string(), "Hi {{ HOLE }}!");
    }

    #[test]
    fn test_marked_round_trip() {
        let skeleton = Skeleton::from_segments([Segment::Hole, lit("x"), Segment::Hole]);
        let marked = skeleton.to_marked(DEFAULT_MARKER);
        assert_eq!(marked, "\u{1f}x\u{1f}");
        assert_eq!(Skeleton::from_marked(&marked, DEFAULT_MARKER), skeleton);
    }

    #[test]
    fn test_from_marked_without_marker() {
        let skeleton = Skeleton::from_marked("plain", DEFAULT_MARKER);
        assert_eq!(skeleton, Skeleton::from_literal("plain"));
    }

    #[test]
    fn test_literal_len() {
        let skeleton = Skeleton::from_segments([lit("ab"), Segment::Hole, lit("日本")]);
        assert_eq!(skeleton.literal_len(), 2 + 6);
    }
}
