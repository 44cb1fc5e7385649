//! Property tests for the candidate comparator.
//!
//! The comparator must be a total order for the stable sort and the
//! winner-class cut to be meaningful; these properties pin that down
//! over arbitrary tag combinations.

use std::cmp::Ordering;

use proptest::prelude::*;

use nameres::resolve::{
    ResolveCandidate, ResolveTags, ResultAccumulator, UNIVERSAL_BASE_LEVEL, compare,
};
use nameres::{AccessProblem, DeclId};

// ============================================================================
// PROPTEST STRATEGIES
// ============================================================================

fn arb_tags() -> impl Strategy<Value = ResolveTags> {
    (
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(
            |(
                partial,
                is_assignment,
                current_file,
                context_matches,
                self_definition,
                definition_in_class_not_constructor,
            )| ResolveTags {
                partial,
                is_assignment,
                current_file,
                context_matches,
                self_definition,
                definition_in_class_not_constructor,
            },
        )
}

fn arb_problem() -> impl Strategy<Value = Option<AccessProblem>> {
    prop_oneof![
        3 => Just(None),
        1 => Just(Some(AccessProblem::PrivateMemberNotAccessible)),
        1 => Just(Some(AccessProblem::InstanceMemberInaccessible)),
    ]
}

fn arb_level() -> impl Strategy<Value = i32> {
    prop_oneof![
        4 => 0..5i32,
        1 => Just(UNIVERSAL_BASE_LEVEL),
    ]
}

fn arb_candidate() -> impl Strategy<Value = ResolveCandidate> {
    (any::<u32>(), arb_tags(), arb_level(), arb_problem()).prop_map(
        |(decl, tags, level, problem)| ResolveCandidate {
            decl: DeclId::new(decl),
            tags,
            level,
            problem,
        },
    )
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 512,
        max_global_rejects: 16384,
        ..ProptestConfig::default()
    })]

    #[test]
    fn comparator_is_reflexive(a in arb_candidate()) {
        prop_assert_eq!(compare(&a, &a), Ordering::Equal);
    }

    #[test]
    fn comparator_is_antisymmetric(a in arb_candidate(), b in arb_candidate()) {
        prop_assert_eq!(compare(&a, &b), compare(&b, &a).reverse());
    }

    #[test]
    fn comparator_is_transitive(
        a in arb_candidate(),
        b in arb_candidate(),
        c in arb_candidate(),
    ) {
        if compare(&a, &b) != Ordering::Greater && compare(&b, &c) != Ordering::Greater {
            prop_assert_ne!(compare(&a, &c), Ordering::Greater);
        }
    }

    #[test]
    fn complete_always_outranks_partial(a in arb_candidate(), b in arb_candidate()) {
        prop_assume!(!a.tags.partial && b.tags.partial);
        prop_assert_eq!(compare(&a, &b), Ordering::Less);
    }

    #[test]
    fn valid_outranks_rejected_at_equal_partiality(
        a in arb_candidate(),
        b in arb_candidate(),
    ) {
        prop_assume!(a.tags.partial == b.tags.partial);
        prop_assume!(a.problem.is_none() && b.problem.is_some());
        prop_assert_eq!(compare(&a, &b), Ordering::Less);
    }

    #[test]
    fn current_file_never_overrides_match_quality(
        a in arb_candidate(),
        b in arb_candidate(),
    ) {
        // Once partiality or validity separates two candidates, the
        // current-file tiebreak must never be reached.
        prop_assume!(
            a.tags.partial != b.tags.partial
                || a.problem.is_some() != b.problem.is_some()
        );
        let expected = compare(&a, &b);
        let mut near = a.clone();
        near.tags.current_file = !near.tags.current_file;
        let mut far = b.clone();
        far.tags.current_file = !far.tags.current_file;
        prop_assert_eq!(compare(&near, &far), expected);
        prop_assert_eq!(compare(&near, &b), expected);
        prop_assert_eq!(compare(&a, &far), expected);
    }

    #[test]
    fn winners_are_exactly_the_top_tie_class(
        candidates in prop::collection::vec(arb_candidate(), 1..12),
    ) {
        let mut acc = ResultAccumulator::new();
        for candidate in &candidates {
            acc.add(candidate.clone());
        }
        let winners = acc.into_winners();

        prop_assert!(!winners.is_empty());
        for winner in &winners[1..] {
            prop_assert_eq!(compare(&winners[0], winner), Ordering::Equal);
        }

        let best = candidates
            .iter()
            .min_by(|a, b| compare(a, b))
            .expect("at least one candidate");
        let tied = candidates
            .iter()
            .filter(|candidate| compare(best, candidate) == Ordering::Equal)
            .count();
        prop_assert_eq!(winners.len(), tied);
    }
}
