//! # templatemaker
//!
//! Learn the shared structure of similar documents, then pull the varying
//! data back out of new ones.
//!
//! ## The Problem
//!
//! Pages generated from the same site template look alike: same markup,
//! same labels, same footer. Only the data differs. Writing a scraper by
//! hand means reading the markup and hard-coding where each value lives,
//! and redoing it when the layout changes.
//!
//! Instead, show the library a few pages. Whatever stays the same is
//! structure; whatever changes is data.
//!
//! ```text
//! Sample 1: "<h1>Alice</h1><p>Age: 31</p>"
//! Sample 2: "<h1>Bob</h1><p>Age: 27</p>"
//!
//! Template: "<h1>{{ HOLE }}</h1><p>Age: {{ HOLE }}</p>"
//!
//! New page: "<h1>Carol</h1><p>Age: 45</p>"
//! Extract:  ["Carol", "45"]
//! ```
//!
//! ## How It Works
//!
//! ### Learning
//!
//! The first sample becomes the skeleton verbatim. Each later sample is
//! aligned against the skeleton ([`Aligner`]): common text stays literal,
//! anything that differs becomes a hole. Alignment keeps as much literal
//! text as possible, and existing holes may absorb any stretch of the
//! sample, so a sample the skeleton already fits changes nothing.
//!
//! Holes only accumulate. A span that ever differed is data from then on.
//!
//! ### Tolerance
//!
//! Unrelated values sometimes share a character or two. With many samples
//! those coincidences fragment the template. A [`Tolerance`] of `n` keeps
//! only anchors of at least `n` tokens between holes.
//!
//! ### Extraction
//!
//! A [`Matcher`] walks the document left to right: literal segments must
//! appear verbatim and in order, and each hole captures the shortest span
//! that lets the rest of the template match.
//!
//! ### Cleaning
//!
//! Before learning or extracting, text passes through a [`Sanitizer`]. The
//! default [`HtmlCleaner`] drops `<script>`, `<style>` and `<noscript>`
//! blocks and normalizes `\r\n` line endings.
//!
//! ## Quick Start
//!
//! ```rust
//! use templatemaker::{Outcome, Template};
//!
//! let mut template = Template::new(0);
//! template.learn("<h1>Alice</h1><p>Age: 31</p>");
//! let outcome = template.learn("<h1>Bob</h1><p>Age: 27</p>");
//!
//! assert_eq!(outcome, Outcome::HolesAdded);
//! assert_eq!(
//!     template.render("{{ HOLE }}").unwrap(),
//!     "<h1>{{ HOLE }}</h1><p>Age: {{ HOLE }}</p>"
//! );
//! assert_eq!(
//!     template.extract("<h1>Carol</h1><p>Age: 45</p>").unwrap(),
//!     vec!["Carol", "45"]
//! );
//! ```
//!
//! ## Storing a Template
//!
//! ```rust
//! use templatemaker::{Aligner, Skeleton, Template, DEFAULT_MARKER};
//!
//! let mut template = Template::new(0);
//! template.learn("id=1;");
//! template.learn("id=2;");
//!
//! let stored = template.skeleton().unwrap().to_marked(DEFAULT_MARKER);
//! let restored = Template::from_skeleton(
//!     Skeleton::from_marked(&stored, DEFAULT_MARKER),
//!     Aligner::new(0),
//! );
//! assert_eq!(restored.extract("id=9;").unwrap(), vec!["9"]);
//! ```
//!
//! ## Performance Considerations
//!
//! | Operation | Time | Memory |
//! |-----------|------|--------|
//! | learn | O(n × m) | O(n × m) bytes |
//! | extract | O(d × k) | O(k) |
//!
//! Where n and m are the skeleton and sample token counts, d the document
//! length and k the number of segments. For large pages use
//! [`Granularity::Word`] to cut token counts several-fold.

mod align;
mod capture;
mod clean;
mod error;
mod loader;
mod matcher;
mod skeleton;
mod template;
mod tolerance;

pub use align::{Aligner, Alignment, Granularity};
pub use capture::Capture;
pub use clean::{HtmlCleaner, Passthrough, Sanitizer, DEFAULT_DENYLIST};
pub use error::{Error, Result};
pub use matcher::Matcher;
pub use skeleton::{Segment, Skeleton, DEFAULT_MARKER, DEFAULT_PLACEHOLDER};
pub use template::{Outcome, Template};
pub use tolerance::Tolerance;
