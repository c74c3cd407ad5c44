//! Applying a skeleton to a document: the reverse of learning.
//!
//! Literal segments must appear verbatim and in order; each hole captures
//! whatever lies between its neighbouring literals.
//!
//! ```text
//! Skeleton: "Hello, " HOLE "! Welcome."
//! Document: "Hello, Carol! Welcome."
//!                   ^^^^^
//!                   capture 0
//! ```
//!
//! ## Matching Rules
//!
//! - The match starts at the leftmost place the first literal can occur
//!   (at the document start if the skeleton opens with a hole).
//! - A hole between two literals takes the shortest span that still lets
//!   every later literal match.
//! - A hole at the end of the skeleton runs to the end of the document.
//!
//! [`Matcher::fits`] is the anchored variant: the skeleton must cover the
//! whole document, with no text before the first literal or after the
//! last one.
//!
//! Literals are always separated by holes, so taking the earliest
//! occurrence of each literal is enough: a later occurrence only leaves
//! less room for the literals after it. Matching is a single left-to-right
//! scan with no backtracking.

use std::ops::Range;

use crate::skeleton::{Segment, Skeleton};
use crate::Capture;

/// Matches documents against a skeleton.
///
/// ## Example
///
/// ```rust
/// use templatemaker::{Matcher, Segment, Skeleton};
///
/// let skeleton = Skeleton::from_segments([
///     Segment::Literal("<b>".into()),
///     Segment::Hole,
///     Segment::Literal("</b>".into()),
/// ]);
/// let matcher = Matcher::new(&skeleton);
///
/// let captures = matcher.captures("x <b>bold</b> y").unwrap();
/// assert_eq!(captures[0].text, "bold");
/// assert_eq!(captures[0].span(), 5..9);
///
/// assert!(matcher.captures("no tags here").is_none());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'s> {
    skeleton: &'s Skeleton,
}

impl<'s> Matcher<'s> {
    /// Create a matcher for `skeleton`.
    #[must_use]
    pub fn new(skeleton: &'s Skeleton) -> Self {
        Self { skeleton }
    }

    /// Byte spans of each hole, in order, or `None` if `text` does not match.
    #[must_use]
    pub fn find_spans(&self, text: &str) -> Option<Vec<Range<usize>>> {
        let mut spans = Vec::with_capacity(self.skeleton.hole_count());
        let mut pos = 0;
        let mut open: Option<usize> = None;

        for (i, segment) in self.skeleton.segments().iter().enumerate() {
            match segment {
                Segment::Hole => open = Some(pos),
                Segment::Literal(literal) => {
                    let at = if i == 0 || open.is_some() {
                        pos + text[pos..].find(literal.as_str())?
                    } else if text[pos..].starts_with(literal.as_str()) {
                        pos
                    } else {
                        return None;
                    };
                    if let Some(start) = open.take() {
                        spans.push(start..at);
                    }
                    pos = at + literal.len();
                }
            }
        }

        if let Some(start) = open {
            spans.push(start..text.len());
        }
        Some(spans)
    }

    /// Whether `text` is exactly the skeleton with its holes filled in.
    ///
    /// Unlike [`find_spans`](Self::find_spans), a leading literal must open
    /// the document and a trailing literal must close it.
    ///
    /// ```rust
    /// use templatemaker::{Matcher, Skeleton};
    ///
    /// let skeleton = Skeleton::from_marked("<b>|</b>", '|');
    /// let matcher = Matcher::new(&skeleton);
    /// assert!(matcher.fits("<b>bold</b>"));
    /// assert!(!matcher.fits("x <b>bold</b> y"));
    /// assert!(matcher.find_spans("x <b>bold</b> y").is_some());
    /// ```
    #[must_use]
    pub fn fits(&self, text: &str) -> bool {
        let mut inner = self.skeleton.segments();
        let mut rest = text;

        if let [Segment::Literal(head), tail @ ..] = inner {
            match rest.strip_prefix(head.as_str()) {
                Some(after) => rest = after,
                None => return false,
            }
            inner = tail;
        }
        if let [body @ .., Segment::Literal(last)] = inner {
            match rest.strip_suffix(last.as_str()) {
                Some(before) => rest = before,
                None => return false,
            }
            inner = body;
        }
        if inner.is_empty() {
            return rest.is_empty();
        }

        // Opens and closes with a hole now, so earliest occurrences suffice.
        let mut pos = 0;
        for segment in inner {
            if let Segment::Literal(literal) = segment {
                match rest[pos..].find(literal.as_str()) {
                    Some(at) => pos += at + literal.len(),
                    None => return false,
                }
            }
        }
        true
    }

    /// Captured values with their spans, or `None` if `text` does not match.
    #[must_use]
    pub fn captures(&self, text: &str) -> Option<Vec<Capture>> {
        let spans = self.find_spans(text)?;
        Some(
            spans
                .into_iter()
                .enumerate()
                .map(|(index, span)| Capture::from_span(text, span, index))
                .collect(),
        )
    }
}
