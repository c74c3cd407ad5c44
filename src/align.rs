//! Skeleton/sample alignment: the template induction step.
//!
//! ## The Algorithm
//!
//! The previous skeleton is flattened into tokens, where each hole is one
//! token that never equals sample text. The new sample is split into tokens
//! of the same granularity. Then:
//!
//! ```text
//! 1. Keep the common prefix and common suffix as literal.
//! 2. Align the rest so that as many skeleton tokens as possible are matched,
//!    in order, to equal sample tokens. Everything left unmatched on either
//!    side (old holes included) falls into gaps. Among alignments with the
//!    most matched tokens, pick one with the fewest gaps.
//! 3. Each gap becomes a hole; each run of matched tokens becomes literal
//!    text, unless the Tolerance absorbs it into the holes around it.
//! ```
//!
//! Worked through on two greetings:
//!
//! ```text
//! old: "Hello, Alice! Welcome."      new: "Hello, Bob! Welcome."
//!
//! prefix "Hello, "   suffix "! Welcome."   middle "Alice" vs "Bob"
//! nothing in the middle matches -> one gap -> one hole
//!
//! result: "Hello, {{ HOLE }}! Welcome."
//! ```
//!
//! An old hole is free to swallow any stretch of the sample, so a sample
//! that the skeleton already fits leaves it unchanged, even when the text
//! inside a hole repeats a literal from elsewhere:
//!
//! ```text
//! old: "{{ HOLE }}xy{{ HOLE }}abcd{{ HOLE }}"
//! new: "abcdxy1abcd2"            -> unchanged: holes take "abcd", "1", "2"
//! ```
//!
//! Old holes never match, so each one ends up inside a new hole: the new
//! skeleton accepts every document the old one accepted. When an anchor
//! that separated two old holes is missing from the sample, those holes
//! fuse into one.
//!
//! ## Tie-Breaking
//!
//! Equally good alignments are resolved by walking both token lists from
//! the front and preferring, in order: a match, moving a sample token into
//! a gap, moving a skeleton token into a gap. Matches therefore land on
//! the earliest skeleton tokens that can still be matched. The result is
//! fully deterministic.
//!
//! ## Cost
//!
//! O(n × m) time and O(n × m) bytes for the n skeleton tokens and m sample
//! tokens left after trimming the common prefix and suffix. Only one byte
//! per token pair is kept; scores live in two rolling rows.
//!
//! | Granularity | Tokens for 10 KB of HTML | Precision |
//! |-------------|--------------------------|-----------|
//! | Grapheme | ~10 000 | Highest |
//! | Word | ~2 000-4 000 | Holes snap to word bounds |

use unicode_segmentation::UnicodeSegmentation;

use crate::skeleton::{Segment, Skeleton, SkeletonBuilder};
use crate::Tolerance;

/// The unit of text the aligner compares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Granularity {
    /// Extended grapheme clusters (UAX #29). Combining sequences are never
    /// split across a hole boundary.
    #[default]
    Grapheme,
    /// Word boundaries (UAX #29). Punctuation and whitespace runs form their
    /// own tokens. Much faster on large documents.
    Word,
}

impl Granularity {
    /// Split `text` into tokens. Concatenating the tokens yields `text`.
    #[must_use]
    pub fn tokenize(self, text: &str) -> Vec<&str> {
        match self {
            Granularity::Grapheme => text.graphemes(true).collect(),
            Granularity::Word => text.split_word_bounds().collect(),
        }
    }
}

/// Result of folding one sample into a skeleton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    /// The merged skeleton.
    pub skeleton: Skeleton,
    /// Holes in the skeleton before alignment.
    pub holes_before: usize,
    /// Holes in the merged skeleton.
    pub holes_after: usize,
}

impl Alignment {
    /// Whether the merged skeleton has more holes than before.
    #[must_use]
    pub fn added_holes(&self) -> bool {
        self.holes_after > self.holes_before
    }
}

/// Merges a skeleton with a new literal sample.
///
/// ## Example
///
/// ```rust
/// use templatemaker::{Aligner, Skeleton};
///
/// let aligner = Aligner::new(0);
/// let skeleton = Skeleton::from_literal("<b>red</b>");
/// let alignment = aligner.align(&skeleton, "<b>cyan</b>");
///
/// assert_eq!(alignment.skeleton.render("*"), "<b>*</b>");
/// assert_eq!(alignment.holes_before, 0);
/// assert_eq!(alignment.holes_after, 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Aligner {
    tolerance: Tolerance,
    granularity: Granularity,
}

impl Aligner {
    /// Create an aligner with the given tolerance and grapheme granularity.
    #[must_use]
    pub fn new(tolerance: impl Into<Tolerance>) -> Self {
        Self {
            tolerance: tolerance.into(),
            granularity: Granularity::default(),
        }
    }

    /// Use a different token granularity.
    #[must_use]
    pub fn with_granularity(self, granularity: Granularity) -> Self {
        Self {
            granularity,
            ..self
        }
    }

    /// The anchor tolerance.
    #[must_use]
    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    /// The token granularity.
    #[must_use]
    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Fold `sample` into `previous`, producing a new skeleton.
    ///
    /// Never fails: in the worst case the result is a single hole.
    #[must_use]
    pub fn align(&self, previous: &Skeleton, sample: &str) -> Alignment {
        let old = self.skeleton_tokens(previous);
        let new = self.granularity.tokenize(sample);

        let prefix = old
            .iter()
            .zip(&new)
            .take_while(|(x, y)| x.matches(y))
            .count();
        let suffix = old[prefix..]
            .iter()
            .rev()
            .zip(new[prefix..].iter().rev())
            .take_while(|(x, y)| x.matches(y))
            .count();
        let (old_mid, new_mid) = (prefix..old.len() - suffix, prefix..new.len() - suffix);

        tracing::trace!(
            old_tokens = old.len(),
            new_tokens = new.len(),
            prefix,
            suffix,
            tolerance = self.tolerance.get(),
            "aligning sample against skeleton"
        );

        let mut pieces = align_region(&old[old_mid.clone()], &new[new_mid.clone()]);
        self.absorb_short_runs(&mut pieces, &old, old_mid.start);

        let mut builder = SkeletonBuilder::default();
        for token in &new[..prefix] {
            builder.push_literal(token);
        }
        for piece in pieces {
            match piece {
                Piece::Run { new: j, len, .. } => {
                    let start = new_mid.start + j;
                    for token in &new[start..start + len] {
                        builder.push_literal(token);
                    }
                }
                Piece::Gap => builder.push_hole(),
            }
        }
        for token in &new[new_mid.end..] {
            builder.push_literal(token);
        }

        let skeleton = builder.finish();
        let holes_after = skeleton.hole_count();
        Alignment {
            skeleton,
            holes_before: previous.hole_count(),
            holes_after,
        }
    }

    fn skeleton_tokens<'a>(&self, skeleton: &'a Skeleton) -> Vec<Token<'a>> {
        let mut tokens = Vec::new();
        for segment in skeleton.segments() {
            match segment {
                Segment::Literal(text) => tokens.extend(
                    self.granularity
                        .tokenize(text)
                        .into_iter()
                        .map(Token::Literal),
                ),
                Segment::Hole => tokens.push(Token::Hole),
            }
        }
        tokens
    }

    /// Turn short runs sitting between two gaps into gaps.
    ///
    /// A run that covers a whole literal segment of the old skeleton was
    /// already accepted as an anchor and is kept at any length.
    fn absorb_short_runs(&self, pieces: &mut [Piece], old: &[Token<'_>], offset: usize) {
        let last = pieces.len().saturating_sub(1);
        for k in 1..last {
            if let Piece::Run { old: i, len, .. } = pieces[k] {
                if !self.tolerance.admits(len) && !is_whole_segment(old, offset + i, len) {
                    pieces[k] = Piece::Gap;
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Literal(&'a str),
    Hole,
}

impl Token<'_> {
    fn matches(&self, other: &str) -> bool {
        matches!(self, Token::Literal(text) if *text == other)
    }
}

/// One step of the walk through the alignment table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
enum Op {
    Match = 0,
    SkipNew = 1,
    SkipOld = 2,
}

impl Op {
    fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Op::Match,
            1 => Op::SkipNew,
            _ => Op::SkipOld,
        }
    }
}

/// A stretch of the merged region: matched tokens, or a gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece {
    /// `len` matched tokens starting at `old` and `new` (region offsets).
    Run { old: usize, new: usize, len: usize },
    Gap,
}

/// Align two token lists, maximizing matched tokens, then minimizing gaps.
///
/// Scores are packed as `matched * weight - gaps`, with `weight` larger
/// than any possible gap count. The table is filled from the back so the
/// walk can run front to back, which is where the tie order applies.
/// Every cell keeps the chosen step for both "inside a gap" states.
fn align_region(old: &[Token<'_>], new: &[&str]) -> Vec<Piece> {
    let (n, m) = (old.len(), new.len());
    if n == 0 && m == 0 {
        return Vec::new();
    }

    let width = m + 1;
    let weight = i64::try_from(n + m + 1).unwrap_or(i64::MAX);
    let mut choice = vec![0u8; (n + 1) * width];
    // [not in gap, in gap] scores for row i + 1 and row i.
    let mut below = vec![[0i64; 2]; width];
    let mut row = vec![[0i64; 2]; width];

    for i in (0..=n).rev() {
        for j in (0..=m).rev() {
            if i == n && j == m {
                row[j] = [0, 0];
                continue;
            }
            let mut packed = 0u8;
            for (state, opens) in [(0usize, 1i64), (1, 0)] {
                let mut best = (i64::MIN, Op::Match);
                if i < n && j < m && old[i].matches(new[j]) {
                    best = (weight + below[j + 1][0], Op::Match);
                }
                if j < m && row[j + 1][1] - opens > best.0 {
                    best = (row[j + 1][1] - opens, Op::SkipNew);
                }
                if i < n && below[j][1] - opens > best.0 {
                    best = (below[j][1] - opens, Op::SkipOld);
                }
                row[j][state] = best.0;
                packed |= (best.1 as u8) << (2 * state);
            }
            choice[i * width + j] = packed;
        }
        std::mem::swap(&mut row, &mut below);
    }

    let mut pieces: Vec<Piece> = Vec::new();
    let (mut i, mut j, mut in_gap) = (0, 0, false);
    while i < n || j < m {
        let op = Op::from_bits(choice[i * width + j] >> (2 * usize::from(in_gap)));
        match op {
            Op::Match => {
                match pieces.last_mut() {
                    Some(Piece::Run { len, .. }) if !in_gap => *len += 1,
                    _ => pieces.push(Piece::Run {
                        old: i,
                        new: j,
                        len: 1,
                    }),
                }
                i += 1;
                j += 1;
                in_gap = false;
            }
            Op::SkipNew | Op::SkipOld => {
                if !in_gap {
                    pieces.push(Piece::Gap);
                }
                if op == Op::SkipNew {
                    j += 1;
                } else {
                    i += 1;
                }
                in_gap = true;
            }
        }
    }
    pieces
}

/// Whether `old[start..start + len]` is exactly one literal segment.
fn is_whole_segment(old: &[Token<'_>], start: usize, len: usize) -> bool {
    let end = start + len;
    (start == 0 || old[start - 1] == Token::Hole) && (end == old.len() || old[end] == Token::Hole)
}
