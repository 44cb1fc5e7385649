//! The resolution engine.
//!
//! One call takes a [`Reference`] and answers which declarations it
//! denotes: the scope stack is built ([`builder`]), candidates are
//! enumerated from the lexical walk or the qualifier's namespaces,
//! gated by the accessibility rules ([`access`]), classified against
//! the stack ([`classify`]), and ranked ([`rank`]). The engine holds no
//! state of its own between calls; everything mutable lives inside the
//! call.

mod access;
mod builder;
mod classify;
mod evaluator;
mod problems;
mod rank;
mod type_info;

use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::base::DeclId;
use crate::model::{Qualifier, Reference};
use crate::scope::{
    ImportCache, ImportFallback, OpenNamespaceProvider, ScopeEvent, ScopeGraph, ScopeKind,
    ScopeTransition, ScopeWalk, TypeOracle,
};

pub use access::AccessibilityState;
pub use classify::{MatchType, classify};
pub use problems::AccessProblem;
pub use rank::{ResolveCandidate, ResolveTags, ResultAccumulator, compare};
pub use type_info::{
    ContextLevel, GlobalStatus, MatchStrictness, TypeInfo, UNIVERSAL_BASE_LEVEL,
};

use access::conditional_duplicate;

// ===== Options =====

/// Per-call behavior switches.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResolveOptions {
    /// Admit private members regardless of the reference site. Used by
    /// callers enumerating one exact class.
    pub accept_private: bool,
    /// Demand static members even when the scope stack does not.
    pub process_statics: bool,
    /// Resolution is running during whole-project indexing; checks that
    /// need cross-file directive resolution are deferred.
    pub indexing_mode: bool,
    /// Report no resolution instead of a single low-confidence guess.
    pub require_unique: bool,
    /// Drop partial matches regardless of what the code looks like.
    pub complete_matches_only: bool,
}

/// Language-variant switches, fixed per resolver.
#[derive(Clone, Debug)]
pub struct LanguageOptions {
    /// Instance code may use its own class's statics unqualified.
    pub unqualified_static_from_instance: bool,
    /// The compilation namespace that is always open.
    pub default_namespace: Option<SmolStr>,
}

impl Default for LanguageOptions {
    fn default() -> Self {
        Self {
            unqualified_static_from_instance: true,
            default_namespace: None,
        }
    }
}

// ===== Outcome =====

/// The answer for one reference.
#[derive(Clone, Debug)]
pub enum ResolveOutcome {
    /// One winner. It may still carry an accessibility problem:
    /// "resolved, but not allowed from here".
    Found(ResolveCandidate),
    /// Several candidates tied for the top rank.
    Ambiguous { candidates: Vec<ResolveCandidate> },
    /// Nothing plausible.
    NotFound,
}

impl ResolveOutcome {
    pub fn found(&self) -> Option<&ResolveCandidate> {
        match self {
            Self::Found(candidate) => Some(candidate),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

// ===== Resolver =====

/// The engine. Borrows its collaborators for the duration of each call
/// and owns nothing but the language configuration.
pub struct Resolver<'a> {
    pub(crate) graph: &'a dyn ScopeGraph,
    pub(crate) oracle: &'a dyn TypeOracle,
    pub(crate) namespaces: &'a dyn OpenNamespaceProvider,
    pub(crate) imports: &'a dyn ImportFallback,
    pub(crate) import_cache: &'a ImportCache,
    pub(crate) language: LanguageOptions,
}

/// Mutable state of one enumeration pass.
struct Pass<'p> {
    reference: &'p Reference,
    info: TypeInfo,
    signs: MatchStrictness,
    access: AccessibilityState<'p>,
    results: ResultAccumulator,
    seen: FxHashSet<DeclId>,
    cancel: &'p CancellationToken,
    /// Resolving one name (filter, short-circuit, fall back), as opposed
    /// to listing every visible candidate.
    resolving: bool,
}

impl<'a> Resolver<'a> {
    pub fn new(
        graph: &'a dyn ScopeGraph,
        oracle: &'a dyn TypeOracle,
        namespaces: &'a dyn OpenNamespaceProvider,
        imports: &'a dyn ImportFallback,
        import_cache: &'a ImportCache,
    ) -> Self {
        Self {
            graph,
            oracle,
            namespaces,
            imports,
            import_cache,
            language: LanguageOptions::default(),
        }
    }

    pub fn with_language(mut self, language: LanguageOptions) -> Self {
        self.language = language;
        self
    }

    /// Resolve a reference to its winning declaration(s).
    pub fn resolve(&self, reference: &Reference, options: &ResolveOptions) -> ResolveOutcome {
        let cancel = CancellationToken::new();
        self.resolve_cancellable(reference, options, &cancel)
            .unwrap_or(ResolveOutcome::NotFound)
    }

    /// Like [`resolve`](Self::resolve), stopping early when `cancel`
    /// fires. `None` means the call was abandoned, not that nothing
    /// matched.
    pub fn resolve_cancellable(
        &self,
        reference: &Reference,
        options: &ResolveOptions,
        cancel: &CancellationToken,
    ) -> Option<ResolveOutcome> {
        trace!(name = %reference.name, qualifier = ?reference.qualifier, "resolving");
        let results = self.collect(reference, options, cancel, true)?;
        Some(self.finish(results, options))
    }

    /// Every declaration visible from the reference site, ranked. The
    /// reference's name is ignored; completion callers filter by prefix
    /// themselves.
    pub fn candidates(
        &self,
        reference: &Reference,
        options: &ResolveOptions,
    ) -> Vec<ResolveCandidate> {
        let cancel = CancellationToken::new();
        self.candidates_cancellable(reference, options, &cancel)
            .unwrap_or_default()
    }

    /// Like [`candidates`](Self::candidates), stopping early when
    /// `cancel` fires. `None` means the call was abandoned.
    pub fn candidates_cancellable(
        &self,
        reference: &Reference,
        options: &ResolveOptions,
        cancel: &CancellationToken,
    ) -> Option<Vec<ResolveCandidate>> {
        let results = self.collect(reference, options, cancel, false)?;
        Some(results.into_ranked())
    }

    fn collect(
        &self,
        reference: &Reference,
        options: &ResolveOptions,
        cancel: &CancellationToken,
        resolving: bool,
    ) -> Option<ResultAccumulator> {
        let mut signs = MatchStrictness::default();
        if options.complete_matches_only {
            signs.force_complete();
        }
        if reference.in_dynamic_scope {
            signs.allow_partial();
        }
        let info = self.build_type_info(reference, &mut signs);
        let process_statics = info.demands_statics() || options.process_statics;

        let mut pass = Pass {
            reference,
            info,
            signs,
            access: AccessibilityState::new(
                self.graph,
                self.namespaces,
                &self.language,
                reference,
                options,
                process_statics,
            ),
            results: ResultAccumulator::new(),
            seen: FxHashSet::default(),
            cancel,
            resolving,
        };

        match reference.qualifier {
            Qualifier::None => self.collect_lexical(&mut pass)?,
            _ => self.collect_level_members(&mut pass)?,
        }
        self.project_fallback(&mut pass)?;
        Some(pass.results)
    }

    /// Unqualified references: drive the outward walk. The walk stops at
    /// the first scope boundary past a valid candidate, so closer names
    /// shadow farther ones without ever enumerating them. Imports cut in
    /// when their file's boundary is crossed.
    fn collect_lexical(&self, pass: &mut Pass<'_>) -> Option<()> {
        let mut import_done = false;
        for event in ScopeWalk::new(self.graph, pass.reference.scope) {
            if pass.cancel.is_cancelled() {
                return None;
            }
            match event {
                ScopeEvent::Candidate(decl_id) => self.consider(decl_id, pass),
                ScopeEvent::Transition(transition) => {
                    pass.access.on_transition(&transition);
                    let file_boundary = matches!(
                        transition,
                        ScopeTransition::EnclosingScope {
                            exited: ScopeKind::File
                        } | ScopeTransition::HostScope
                    );
                    if file_boundary && !import_done {
                        import_done = true;
                        if let Some(target) = self.import_hit(pass.reference) {
                            self.consider(target, pass);
                        }
                    }
                    let boundary = file_boundary
                        || matches!(transition, ScopeTransition::EnclosingScope { .. });
                    if pass.resolving && boundary && pass.results.has_valid() {
                        break;
                    }
                }
            }
        }
        Some(())
    }

    /// Qualified references: enumerate the members of every namespace on
    /// the stack, universal-base sentinel included.
    fn collect_level_members(&self, pass: &mut Pass<'_>) -> Option<()> {
        for index in 0..pass.info.levels().len() {
            if pass.cancel.is_cancelled() {
                return None;
            }
            let namespace = pass.info.levels()[index].namespace.clone();
            let Some(scope) = self.graph.scope_of(&namespace) else {
                continue;
            };
            for &decl_id in self.graph.declarations_in(scope) {
                self.consider(decl_id, pass);
            }
        }
        Some(())
    }

    /// Last resort: when nothing valid matched and the signs allow
    /// guessing, scan every declaration with the name project-wide.
    fn project_fallback(&self, pass: &mut Pass<'_>) -> Option<()> {
        if !pass.resolving || pass.results.has_valid() || pass.signs.complete_only() {
            return Some(());
        }
        trace!(name = %pass.reference.name, "project-wide fallback scan");
        for decl_id in self.graph.declarations_named(&pass.reference.name) {
            if pass.cancel.is_cancelled() {
                return None;
            }
            self.consider(decl_id, pass);
        }
        Some(())
    }

    /// Gate, classify and record one candidate.
    fn consider(&self, decl_id: DeclId, pass: &mut Pass<'_>) {
        if !pass.seen.insert(decl_id) {
            return;
        }
        let decl = self.graph.declaration(decl_id);
        if pass.resolving && decl.name != pass.reference.name {
            return;
        }

        let problem = pass.access.check(decl);
        let (matched, level) = classify(decl, pass.reference, &pass.info);
        if problem.is_none() {
            if matched.is_no_match() {
                return;
            }
            if matched.is_partial() && pass.signs.complete_only() {
                return;
            }
            let graph = self.graph;
            let duplicate = pass.results.collected().iter().any(|existing| {
                existing.is_valid() && conditional_duplicate(graph.declaration(existing.decl), decl)
            });
            if duplicate {
                return;
            }
        }
        pass.results.add(ResolveCandidate::new(
            decl_id,
            decl,
            pass.reference,
            matched,
            level,
            problem,
        ));
    }

    /// Rank and reduce to the final outcome. A getter/setter pair tying
    /// for the top is one property, not an ambiguity.
    fn finish(&self, results: ResultAccumulator, options: &ResolveOptions) -> ResolveOutcome {
        let mut winners = results.into_winners();
        if winners.len() == 2 {
            let first = self.graph.declaration(winners[0].decl);
            let second = self.graph.declaration(winners[1].decl);
            if first.name == second.name && first.kind.pairs_with(second.kind) {
                winners.truncate(1);
            }
        }
        match winners.len() {
            0 => ResolveOutcome::NotFound,
            1 => match winners.pop() {
                Some(winner) if options.require_unique && winner.tags.partial => {
                    ResolveOutcome::NotFound
                }
                Some(winner) => ResolveOutcome::Found(winner),
                None => ResolveOutcome::NotFound,
            },
            _ => ResolveOutcome::Ambiguous {
                candidates: winners,
            },
        }
    }
}
