//! Property-based tests for input list assembly using proptest.
//!
//! These tests verify key numbering, channel assignment and ordering on
//! arbitrary input lists, and that document validation never panics.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p stageplan-tests --test proptest_assembly
//! ```

use std::collections::BTreeSet;

use proptest::prelude::*;

use stageplan_core::assembly::{assign_channels, disambiguate_input_keys, order_inputs, NumberedInput};
use stageplan_core::format::{format_vocal_label, VocalLabel};
use stageplan_core::{
    build_document, validate_document_with_budget, DocumentBudget, Gender, Group, InputChannel,
    GROUP_ORDER,
};
use stageplan_tests::fixtures::{full_band_library, generic_project};

// ============================================================================
// Strategies
// ============================================================================

const MONO_STEMS: &[&str] = &["gtr", "bass_di", "voc_back", "ac_guitar"];
const STEREO_STEMS: &[&str] = &["keys", "pad", "el_guitar"];

fn arbitrary_group() -> impl Strategy<Value = Group> {
    prop::sample::select(GROUP_ORDER.to_vec())
}

/// Keys drawn from stems that are either always mono or always stereo.
fn arbitrary_key() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(MONO_STEMS.to_vec()).prop_map(str::to_string),
        (prop::sample::select(STEREO_STEMS.to_vec()), prop::bool::ANY)
            .prop_map(|(stem, left)| format!("{}_{}", stem, if left { "l" } else { "r" })),
    ]
}

fn arbitrary_input() -> impl Strategy<Value = InputChannel> {
    (arbitrary_key(), arbitrary_group())
        .prop_map(|(key, group)| InputChannel::new(key.clone(), key.replace('_', " "), group))
}

fn arbitrary_inputs() -> impl Strategy<Value = Vec<InputChannel>> {
    prop::collection::vec(arbitrary_input(), 0..24)
}

fn channels(numbered: &[NumberedInput]) -> Vec<u32> {
    numbered.iter().map(|n| n.ch).collect()
}

// ============================================================================
// 1. Key Disambiguation
// ============================================================================

proptest! {
    /// Repeated keys always come out unique.
    #[test]
    fn disambiguated_keys_are_unique(inputs in arbitrary_inputs()) {
        let out = disambiguate_input_keys(&inputs);
        prop_assert_eq!(out.len(), inputs.len());

        let keys: BTreeSet<&str> = out.iter().map(|i| i.key.as_str()).collect();
        prop_assert_eq!(keys.len(), out.len());
    }

    /// Lists without repeated keys are left untouched.
    #[test]
    fn unique_keys_are_untouched(inputs in arbitrary_inputs()) {
        let mut seen = BTreeSet::new();
        let unique: Vec<InputChannel> = inputs
            .into_iter()
            .filter(|i| seen.insert(i.key.clone()))
            .collect();
        prop_assert_eq!(disambiguate_input_keys(&unique), unique);
    }
}

// ============================================================================
// 2. Channel Assignment
// ============================================================================

proptest! {
    /// Channels run from 1 without gaps, spares included.
    #[test]
    fn channels_are_contiguous(inputs in arbitrary_inputs()) {
        let numbered = assign_channels(&inputs);
        let expected: Vec<u32> = (1..=numbered.len() as u32).collect();
        prop_assert_eq!(channels(&numbered), expected);
    }

    /// Every input is numbered exactly once; only spares are added.
    #[test]
    fn channels_keep_every_input(inputs in arbitrary_inputs()) {
        let numbered = assign_channels(&inputs);
        let real = numbered.iter().filter(|n| !n.is_spare()).count();
        prop_assert_eq!(real, inputs.len());
        prop_assert!(numbered.len() <= inputs.len() * 2);
    }
}

// ============================================================================
// 3. Ordering
// ============================================================================

proptest! {
    /// Ordered inputs never step back in the group order.
    #[test]
    fn ordered_groups_are_monotonic(inputs in arbitrary_inputs()) {
        let ordered = order_inputs(&inputs, None);
        prop_assert_eq!(ordered.len(), inputs.len());

        let ranks: Vec<usize> = ordered
            .iter()
            .map(|i| i.group.map(|g| g.rank()).unwrap_or(usize::MAX))
            .collect();
        prop_assert!(ranks.windows(2).all(|w| w[0] <= w[1]), "ranks: {:?}", ranks);
    }

    /// Ordering is independent of the input order.
    #[test]
    fn ordering_is_stable_under_reversal(inputs in arbitrary_inputs()) {
        let mut unique = BTreeSet::new();
        let inputs: Vec<InputChannel> = inputs
            .into_iter()
            .filter(|i| unique.insert(i.key.clone()))
            .collect();
        let mut reversed = inputs.clone();
        reversed.reverse();
        prop_assert_eq!(order_inputs(&inputs, None), order_inputs(&reversed, None));
    }
}

// ============================================================================
// 4. Vocal Labels
// ============================================================================

proptest! {
    /// A single lead is always plain "Lead vocal".
    #[test]
    fn single_lead_label_is_plain(
        index in 0usize..4,
        gender in prop::sample::select(vec![None, Some(Gender::F), Some(Gender::M), Some(Gender::X)])
    ) {
        let label = format_vocal_label(&VocalLabel::new(index, 1).with_gender(gender));
        prop_assert_eq!(label, "Lead vocal");
    }

    /// Multiple leads are numbered.
    #[test]
    fn multiple_lead_labels_are_numbered(index in 1usize..6, count in 2usize..6) {
        let label = format_vocal_label(&VocalLabel::new(index, count));
        prop_assert!(label.starts_with(&format!("Lead vocal {}", index)), "label: {}", label);
    }
}

// ============================================================================
// 5. Document Validation
// ============================================================================

proptest! {
    /// Arbitrary input lists never panic the document validator.
    #[test]
    fn document_validation_never_panics(
        keys in prop::collection::vec("[a-z_]{0,8}", 0..40),
        max_inputs in 0usize..48
    ) {
        let mut vm = build_document(&generic_project(), &full_band_library()).unwrap();
        vm.inputs = keys
            .iter()
            .enumerate()
            .map(|(i, key)| NumberedInput {
                ch: i as u32 + 1,
                key: key.clone(),
                label: key.clone(),
                group: None,
                note: None,
            })
            .collect();

        let budget = DocumentBudget { max_inputs, ..DocumentBudget::default() };
        let result = validate_document_with_budget(&vm, &budget);

        let distinct: BTreeSet<&String> = keys.iter().collect();
        let valid = !keys.is_empty() && keys.len() <= max_inputs && distinct.len() == keys.len();
        prop_assert_eq!(result.is_ok(), valid);
    }
}
