//! Anchor tolerance configuration.
//!
//! ## The Problem
//!
//! Two unrelated values often share a character or two by coincidence:
//!
//! ```text
//! Sample 1: "<td>12-04</td>"
//! Sample 2: "<td>98-37</td>"
//!
//! Tolerance 0: "<td>{{ HOLE }}-{{ HOLE }}</td>"   <- "-" kept as an anchor
//! Tolerance 2: "<td>{{ HOLE }}</td>"              <- "-" absorbed
//! ```
//!
//! With many diverse samples, these coincidental anchors fragment the
//! template into lots of tiny holes. The tolerance sets the minimum number
//! of tokens a literal run needs to survive between two holes.
//!
//! Runs at the edge of a differing region are never subject to tolerance:
//! they extend a neighbouring literal rather than standing alone.

/// Minimum length, in tokens, of a literal anchor standing between holes.
///
/// # Examples
///
/// ```rust
/// use templatemaker::Tolerance;
///
/// let tolerance = Tolerance::new(3);
/// assert!(!tolerance.admits(2));
/// assert!(tolerance.admits(3));
///
/// // Zero keeps any match, however short.
/// assert!(Tolerance::default().admits(1));
/// assert!(!Tolerance::default().admits(0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tolerance(usize);

impl Tolerance {
    /// Create a tolerance of `tokens`.
    #[must_use]
    pub const fn new(tokens: usize) -> Self {
        Self(tokens)
    }

    /// The configured token count.
    #[must_use]
    pub const fn get(&self) -> usize {
        self.0
    }

    /// Whether an anchor of `run_len` tokens may survive between two holes.
    ///
    /// An empty run is never an anchor.
    #[must_use]
    pub fn admits(&self, run_len: usize) -> bool {
        run_len > 0 && run_len >= self.0
    }
}

impl From<usize> for Tolerance {
    fn from(tokens: usize) -> Self {
        Self::new(tokens)
    }
}
