//! Property-based tests for template induction.
//!
//! These tests verify the invariants learning and extraction rely on:
//! - First sample: the skeleton is the cleaned sample, with no holes
//! - Stability: filling a skeleton's holes and learning the result changes nothing,
//!   even when the fillers repeat the skeleton's own literals
//! - Monotonicity: a sample the skeleton matches never costs it a hole
//! - Round-trip: extraction recovers the values used to fill the holes
//! - Generality: a template matches every sample it learned from
//! - Determinism: the same samples in the same order give the same template

use proptest::prelude::*;
use templatemaker::{Aligner, Granularity, Matcher, Outcome, Segment, Skeleton, Template};

// =============================================================================
// Test Generators
// =============================================================================

/// Short page-like samples over a small alphabet, so samples share structure.
fn sample_text() -> impl Strategy<Value = String> {
    prop::string::string_regex("[abcd <>/]{0,40}").unwrap()
}

/// A canonical skeleton whose literals use only `a`-`e`.
fn skeleton() -> impl Strategy<Value = Skeleton> {
    (
        any::<bool>(),
        prop::collection::vec(prop::string::string_regex("[a-e]{1,6}").unwrap(), 1..6),
        any::<bool>(),
    )
        .prop_map(|(leading, literals, trailing)| {
            let mut segments = Vec::new();
            if leading {
                segments.push(Segment::Hole);
            }
            for (i, literal) in literals.into_iter().enumerate() {
                if i > 0 {
                    segments.push(Segment::Hole);
                }
                segments.push(Segment::Literal(literal));
            }
            if trailing {
                segments.push(Segment::Hole);
            }
            Skeleton::from_segments(segments)
        })
}

/// Hole fillers drawn from an alphabet disjoint from the literals.
fn fillers() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::string::string_regex("[x-z]{1,5}").unwrap(), 8)
}

/// Hole fillers over the literal alphabet, possibly empty, so a filler can
/// repeat or extend the literals around it.
fn overlapping_fillers() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::string::string_regex("[a-e]{0,5}").unwrap(), 8)
}

/// Short stray text over the literal alphabet.
fn stray_text() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-e]{0,4}").unwrap()
}

// =============================================================================
// Helpers
// =============================================================================

/// Substitute `fillers` for the holes of `skeleton`, in order.
fn fill(skeleton: &Skeleton, fillers: &[String]) -> String {
    let mut holes = fillers.iter();
    let mut out = String::new();
    for segment in skeleton.segments() {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Hole => out.push_str(holes.next().expect("enough fillers")),
        }
    }
    out
}

// =============================================================================
// Learning
// =============================================================================

proptest! {
    #[test]
    fn first_sample_becomes_skeleton(text in sample_text()) {
        let mut template = Template::new(0);
        prop_assert_eq!(template.learn(&text), Outcome::FirstSample);

        let expected = Skeleton::from_literal(template.clean(&text).into_owned());
        prop_assert_eq!(template.skeleton(), Some(&expected));
        prop_assert_eq!(template.hole_count().unwrap(), 0);
    }

    #[test]
    fn repeating_a_sample_changes_nothing(text in sample_text(), tolerance in 0usize..4) {
        let mut template = Template::new(tolerance);
        template.learn(&text);
        prop_assert_eq!(template.learn(&text), Outcome::NoChange);
        prop_assert_eq!(template.hole_count().unwrap(), 0);
    }

    #[test]
    fn filled_skeleton_is_stable(skeleton in skeleton(), fillers in fillers()) {
        let document = fill(&skeleton, &fillers);
        let alignment = Aligner::new(0).align(&skeleton, &document);

        prop_assert_eq!(alignment.holes_after, alignment.holes_before);
        prop_assert_eq!(&alignment.skeleton, &skeleton);
    }

    #[test]
    fn holes_never_shrink_for_fitting_samples(
        skeleton in skeleton(),
        first in fillers(),
        second in overlapping_fillers(),
    ) {
        let aligner = Aligner::new(0);
        let once = aligner.align(&skeleton, &fill(&skeleton, &first)).skeleton;
        let twice = aligner.align(&once, &fill(&once, &second));
        prop_assert!(twice.holes_after >= skeleton.hole_count());
        prop_assert_eq!(&twice.skeleton, &once);
    }

    #[test]
    fn fillers_repeating_literals_change_nothing(
        skeleton in skeleton(),
        fillers in overlapping_fillers(),
        tolerance in 0usize..4,
    ) {
        let document = fill(&skeleton, &fillers);
        prop_assert!(Matcher::new(&skeleton).fits(&document));

        let alignment = Aligner::new(tolerance).align(&skeleton, &document);
        prop_assert_eq!(alignment.holes_after, alignment.holes_before);
        prop_assert_eq!(&alignment.skeleton, &skeleton);
    }

    #[test]
    fn matched_samples_keep_every_hole(
        skeleton in skeleton(),
        fillers in overlapping_fillers(),
        before in stray_text(),
        after in stray_text(),
    ) {
        let document = format!("{before}{}{after}", fill(&skeleton, &fillers));
        prop_assert!(Matcher::new(&skeleton).captures(&document).is_some());

        let alignment = Aligner::new(0).align(&skeleton, &document);
        prop_assert!(alignment.holes_after >= alignment.holes_before);
        if Matcher::new(&skeleton).fits(&document) {
            prop_assert_eq!(&alignment.skeleton, &skeleton);
        }
        prop_assert!(Matcher::new(&alignment.skeleton).captures(&document).is_some());
    }

    #[test]
    fn learning_is_deterministic(samples in prop::collection::vec(sample_text(), 1..5)) {
        let mut left = Template::new(1);
        let mut right = Template::new(1);
        for sample in &samples {
            prop_assert_eq!(left.learn(sample), right.learn(sample));
        }
        prop_assert_eq!(left.skeleton(), right.skeleton());
        prop_assert_eq!(left.version(), samples.len() as u64);
    }
}

// =============================================================================
// Extraction
// =============================================================================

proptest! {
    #[test]
    fn extraction_round_trips(skeleton in skeleton(), fillers in fillers()) {
        let document = fill(&skeleton, &fillers);
        let captured: Vec<String> = Matcher::new(&skeleton)
            .captures(&document)
            .expect("filled skeleton matches")
            .into_iter()
            .map(|c| c.text)
            .collect();

        prop_assert_eq!(&captured[..], &fillers[..skeleton.hole_count()]);
    }

    #[test]
    fn template_matches_its_samples(
        samples in prop::collection::vec(sample_text(), 2..5),
        tolerance in 0usize..3,
    ) {
        let mut template = Template::new(tolerance);
        for sample in &samples {
            template.learn(sample);
        }
        for sample in &samples {
            let values = template.extract(sample);
            prop_assert!(values.is_ok(), "template failed to match sample {:?}", sample);
            prop_assert_eq!(values.unwrap().len(), template.hole_count().unwrap());
        }
    }

    #[test]
    fn word_templates_match_their_samples(samples in prop::collection::vec(sample_text(), 2..5)) {
        let aligner = Aligner::new(0).with_granularity(Granularity::Word);
        let mut template = Template::with_aligner(aligner);
        for sample in &samples {
            template.learn(sample);
        }
        for sample in &samples {
            prop_assert!(template.extract(sample).is_ok());
        }
    }

    #[test]
    fn capture_spans_index_cleaned_text(skeleton in skeleton(), fillers in fillers()) {
        let document = fill(&skeleton, &fillers);
        let template = Template::from_skeleton(skeleton, Aligner::new(0));
        for capture in template.captures(&document).unwrap() {
            prop_assert_eq!(&document[capture.span()], capture.text.as_str());
        }
    }
}
