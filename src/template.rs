//! The Template: learns from samples, then extracts from documents.
//!
//! ## Lifecycle
//!
//! ```text
//! Template::new(tolerance)          version 0, no skeleton
//!        │
//!        ▼ learn(sample 1)          skeleton = clean(sample 1)   -> FirstSample
//!        │
//!        ▼ learn(sample n)          skeleton = align(skeleton, clean(sample n))
//!        │                                                       -> HolesAdded | NoChange
//!        ▼ extract(document)        values that filled each hole
//! ```
//!
//! Learning and extraction can be interleaved freely once the first sample
//! is in. Extracting, rendering or counting holes before that is an error
//! ([`Error::Untrained`]), distinct from a document that does not fit
//! ([`Error::NoMatch`]).
//!
//! ## Sample Order
//!
//! Holes are only ever introduced, never filled back in: once two samples
//! disagree on a span, no later sample can prove it constant. Feed the most
//! representative samples first if the document family is noisy.

use std::borrow::Cow;

use crate::align::Aligner;
use crate::clean::{HtmlCleaner, Sanitizer};
use crate::matcher::Matcher;
use crate::skeleton::Skeleton;
use crate::{Capture, Error, Result, Tolerance};

/// What a call to [`Template::learn`] did to the skeleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// First sample: it became the skeleton as-is.
    FirstSample,
    /// The sample disagreed with the skeleton somewhere new.
    HolesAdded,
    /// No new holes.
    NoChange,
}

/// A template induced from sample documents.
///
/// ## Example
///
/// ```rust
/// use templatemaker::{Error, Outcome, Template};
///
/// let mut template = Template::new(0);
/// assert_eq!(template.learn("Hello, Alice! Welcome."), Outcome::FirstSample);
/// assert_eq!(template.learn("Hello, Bob! Welcome."), Outcome::HolesAdded);
///
/// assert_eq!(template.render("{{ HOLE }}")?, "Hello, {{ HOLE }}! Welcome.");
/// assert_eq!(template.extract("Hello, Carol! Welcome.")?, vec!["Carol"]);
/// assert!(matches!(
///     template.extract("Goodbye, Carol! Welcome."),
///     Err(Error::NoMatch)
/// ));
/// # Ok::<(), Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Template<S = HtmlCleaner> {
    skeleton: Option<Skeleton>,
    aligner: Aligner,
    sanitizer: S,
    version: u64,
}

impl Template {
    /// Create an empty template with the default HTML cleaner.
    #[must_use]
    pub fn new(tolerance: impl Into<Tolerance>) -> Self {
        Self::with_aligner(Aligner::new(tolerance))
    }

    /// Create an empty template with a configured aligner.
    #[must_use]
    pub fn with_aligner(aligner: Aligner) -> Self {
        Self::with_sanitizer(aligner, HtmlCleaner::default())
    }

    /// Restore a template from a stored skeleton.
    ///
    /// The restored template is at version 1 and keeps learning normally.
    #[must_use]
    pub fn from_skeleton(skeleton: Skeleton, aligner: Aligner) -> Self {
        let mut template = Self::with_aligner(aligner);
        template.skeleton = Some(skeleton);
        template.version = 1;
        template
    }
}

impl<S: Sanitizer> Template<S> {
    /// Create an empty template with a custom sanitizer.
    #[must_use]
    pub fn with_sanitizer(aligner: Aligner, sanitizer: S) -> Self {
        Self {
            skeleton: None,
            aligner,
            sanitizer,
            version: 0,
        }
    }

    /// Fold one sample into the template.
    pub fn learn(&mut self, sample: &str) -> Outcome {
        let sample = self.sanitizer.clean(sample);
        self.version += 1;

        let Some(previous) = &self.skeleton else {
            self.skeleton = Some(Skeleton::from_literal(sample.into_owned()));
            tracing::debug!(version = self.version, "first sample adopted as skeleton");
            return Outcome::FirstSample;
        };

        let alignment = self.aligner.align(previous, &sample);
        let outcome = if alignment.added_holes() {
            Outcome::HolesAdded
        } else {
            Outcome::NoChange
        };

        tracing::debug!(
            version = self.version,
            holes_before = alignment.holes_before,
            holes_after = alignment.holes_after,
            ?outcome,
            "sample learned"
        );

        self.skeleton = Some(alignment.skeleton);
        outcome
    }

    /// The skeleton with every hole replaced by `placeholder`.
    ///
    /// # Errors
    ///
    /// [`Error::Untrained`] if nothing has been learned yet.
    pub fn render(&self, placeholder: &str) -> Result<String> {
        Ok(self.trained()?.render(placeholder))
    }

    /// Number of holes in the skeleton.
    ///
    /// # Errors
    ///
    /// [`Error::Untrained`] if nothing has been learned yet.
    pub fn hole_count(&self) -> Result<usize> {
        Ok(self.trained()?.hole_count())
    }

    /// Extract the value of each hole from `text`, in template order.
    ///
    /// # Errors
    ///
    /// [`Error::Untrained`] if nothing has been learned yet, or
    /// [`Error::NoMatch`] if `text` does not fit the template.
    pub fn extract(&self, text: &str) -> Result<Vec<String>> {
        Ok(self
            .captures(text)?
            .into_iter()
            .map(|capture| capture.text)
            .collect())
    }

    /// Like [`extract`](Self::extract), with byte spans into the cleaned text.
    ///
    /// # Errors
    ///
    /// Same as [`extract`](Self::extract).
    pub fn captures(&self, text: &str) -> Result<Vec<Capture>> {
        let skeleton = self.trained()?;
        let text = self.sanitizer.clean(text);
        Matcher::new(skeleton).captures(&text).ok_or(Error::NoMatch)
    }

    /// Run the template's sanitizer over `text`.
    pub fn clean<'a>(&self, text: &'a str) -> Cow<'a, str> {
        self.sanitizer.clean(text)
    }

    /// The learned skeleton, if any sample has been learned.
    #[must_use]
    pub fn skeleton(&self) -> Option<&Skeleton> {
        self.skeleton.as_ref()
    }

    /// Whether at least one sample has been learned.
    #[must_use]
    pub fn is_trained(&self) -> bool {
        self.skeleton.is_some()
    }

    /// Number of `learn` calls so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// The aligner used for learning.
    #[must_use]
    pub fn aligner(&self) -> &Aligner {
        &self.aligner
    }

    fn trained(&self) -> Result<&Skeleton> {
        self.skeleton.as_ref().ok_or(Error::Untrained)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Passthrough, Segment};

    #[test]
    fn test_first_sample_is_skeleton() {
        let mut template = Template::new(0);
        assert_eq!(template.learn("a\r\nb"), Outcome::FirstSample);
        assert_eq!(template.skeleton(), Some(&Skeleton::from_literal("a\nb")));
        assert_eq!(template.hole_count().unwrap(), 0);
        assert_eq!(template.version(), 1);
    }

    #[test]
    fn test_untrained_errors() {
        let template = Template::new(0);
        assert!(!template.is_trained());
        assert!(matches!(template.extract("x"), Err(Error::Untrained)));
        assert!(matches!(template.render("x"), Err(Error::Untrained)));
        assert!(matches!(template.hole_count(), Err(Error::Untrained)));
    }

    #[test]
    fn test_same_sample_twice() {
        let mut template = Template::new(0);
        template.learn("<p>stable</p>");
        assert_eq!(template.learn("<p>stable</p>"), Outcome::NoChange);
        assert_eq!(template.hole_count().unwrap(), 0);
        assert_eq!(template.version(), 2);
    }

    #[test]
    fn test_version_counts_every_call() {
        let mut template = Template::new(0);
        for sample in ["a1", "a2", "a2", "a3"] {
            template.learn(sample);
        }
        assert_eq!(template.version(), 4);
        assert_eq!(template.hole_count().unwrap(), 1);
    }

    #[test]
    fn test_scripts_do_not_create_holes() {
        let mut template = Template::new(0);
        template.learn("<script>t=1</script><h1>Alice</h1>");
        template.learn("<script>t=2</script><h1>Bob</h1>");
        assert_eq!(template.render("_").unwrap(), "<h1>_</h1>");
    }

    #[test]
    fn test_extraction_cleans_input() {
        let mut template = Template::new(0);
        template.learn("<h1>Alice</h1>\n<p>x</p>");
        template.learn("<h1>Bob</h1>\n<p>x</p>");

        let values = template
            .extract("<h1><script>1</script>Carol</h1>\r\n<p>x</p>")
            .unwrap();
        assert_eq!(values, vec!["Carol"]);
    }

    #[test]
    fn test_passthrough_sanitizer() {
        let mut template = Template::with_sanitizer(Aligner::new(0), Passthrough);
        template.learn("<script>1</script>");
        template.learn("<script>2</script>");
        assert_eq!(template.render("_").unwrap(), "<script>_</script>");
    }

    #[test]
    fn test_from_skeleton() {
        let skeleton = Skeleton::from_segments([
            Segment::Literal("id=".into()),
            Segment::Hole,
            Segment::Literal(";".into()),
        ]);
        let mut template = Template::from_skeleton(skeleton, Aligner::new(0));
        assert_eq!(template.version(), 1);
        assert_eq!(template.extract("id=42;").unwrap(), vec!["42"]);
        assert_eq!(template.learn("id=7;"), Outcome::NoChange);
    }

    #[test]
    fn test_captures_report_spans() {
        let mut template = Template::new(0);
        template.learn("[a] [b]");
        template.learn("[c] [d]");
        let captures = template.captures("[x] [yz]").unwrap();
        assert_eq!(captures.len(), 2);
        assert_eq!(captures[1].index, 1);
        assert_eq!(captures[1].span(), 5..7);
    }
}
