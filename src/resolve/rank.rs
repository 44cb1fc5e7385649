//! Candidate ranking.
//!
//! Every classified candidate is tagged with a fixed set of quality
//! flags, then ordered by one lexicographic comparator. Rejected
//! candidates keep their problem kind and rank below valid ones instead
//! of disappearing, so "found but private" survives to the caller.

use std::cmp::Ordering;

use crate::base::DeclId;
use crate::model::{Declaration, Reference};
use crate::resolve::classify::MatchType;
use crate::resolve::problems::AccessProblem;

/// Quality flags attached to one candidate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResolveTags {
    /// Accepted only via the relaxed, dynamic-typing fallback.
    pub partial: bool,
    /// The declaration is an assignment-created definition.
    pub is_assignment: bool,
    /// Declared in the same file as the reference.
    pub current_file: bool,
    /// The match agreed on static/instance context.
    pub context_matches: bool,
    /// The declaration is the referenced node itself.
    pub self_definition: bool,
    /// A class-scoped property assignment outside the constructor.
    pub definition_in_class_not_constructor: bool,
}

/// One ranked resolution candidate.
#[derive(Clone, Debug)]
pub struct ResolveCandidate {
    pub decl: DeclId,
    pub tags: ResolveTags,
    /// Nesting distance of the level that matched; 0 when none did.
    pub level: i32,
    /// Why the accessibility rules rejected the candidate, if they did.
    pub problem: Option<AccessProblem>,
}

impl ResolveCandidate {
    /// Tag a classified declaration.
    pub fn new(
        decl: DeclId,
        declaration: &Declaration,
        reference: &Reference,
        matched: MatchType,
        level: i32,
        problem: Option<AccessProblem>,
    ) -> Self {
        Self {
            decl,
            tags: ResolveTags {
                partial: matched.is_partial(),
                is_assignment: declaration.is_assignment_definition,
                current_file: declaration.file == reference.file,
                context_matches: matched.context_matches(),
                self_definition: declaration.node == reference.node,
                definition_in_class_not_constructor: declaration.prototype_member
                    && !declaration.is_constructor(),
            },
            level,
            problem,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.problem.is_none()
    }
}

/// The fixed ranking order; `Less` ranks first. Priority, descending:
/// complete over partial, valid over rejected, not a class-scoped
/// property assignment, closer scope, not an assignment site, the
/// referenced node itself, context agreement, same file.
pub fn compare(a: &ResolveCandidate, b: &ResolveCandidate) -> Ordering {
    (a.tags.partial.cmp(&b.tags.partial))
        .then_with(|| a.problem.is_some().cmp(&b.problem.is_some()))
        .then_with(|| {
            a.tags
                .definition_in_class_not_constructor
                .cmp(&b.tags.definition_in_class_not_constructor)
        })
        .then_with(|| a.level.cmp(&b.level))
        .then_with(|| a.tags.is_assignment.cmp(&b.tags.is_assignment))
        .then_with(|| b.tags.self_definition.cmp(&a.tags.self_definition))
        .then_with(|| b.tags.context_matches.cmp(&a.tags.context_matches))
        .then_with(|| b.tags.current_file.cmp(&a.tags.current_file))
}

/// Collects candidates during one resolution, then hands out the ranked
/// list or the winning equivalence class.
#[derive(Debug, Default)]
pub struct ResultAccumulator {
    results: Vec<ResolveCandidate>,
}

impl ResultAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, candidate: ResolveCandidate) {
        self.results.push(candidate);
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Whether any problem-free candidate was collected.
    pub fn has_valid(&self) -> bool {
        self.results.iter().any(ResolveCandidate::is_valid)
    }

    /// Everything collected so far, in discovery order.
    pub fn collected(&self) -> &[ResolveCandidate] {
        &self.results
    }

    /// All candidates, best first. The sort is stable, so candidates the
    /// comparator cannot separate keep their discovery order.
    pub fn into_ranked(mut self) -> Vec<ResolveCandidate> {
        self.results.sort_by(compare);
        self.results
    }

    /// The candidates tying for the top rank.
    pub fn into_winners(self) -> Vec<ResolveCandidate> {
        let mut ranked = self.into_ranked();
        if let Some(first) = ranked.first().cloned() {
            ranked.retain(|candidate| compare(&first, candidate) == Ordering::Equal);
        }
        ranked
    }
}
