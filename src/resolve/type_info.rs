//! The scope stack built for one resolution.
//!
//! [`TypeInfo`] is the ordered list of namespaces a reference could bind
//! into, each paired with its nesting distance from the reference site.
//! It is built once per resolution call, then read by the match
//! classifier; nothing here outlives the call.

use crate::model::{ContextKind, Namespace};

/// Nesting distance reserved for members of the universal base type.
/// Large enough to lose every same-name tie against a real declared
/// member, while still letting intrinsic members resolve when nothing
/// else matches.
pub const UNIVERSAL_BASE_LEVEL: i32 = 1_000_000;

/// Whether a reference can only mean a top-level symbol, can never mean
/// one, or could mean either.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GlobalStatus {
    /// Only top-level symbols qualify.
    Global,
    /// Top-level symbols never qualify (the reference is qualified).
    NonGlobal,
    /// Either may qualify.
    #[default]
    Unknown,
}

/// One entry of the scope stack: a namespace at a nesting distance.
#[derive(Clone, Debug)]
pub struct ContextLevel {
    pub namespace: Namespace,
    /// 0 = innermost; grows with distance from the reference.
    pub relative_level: i32,
    /// Entry point of a qualifier's type hierarchy (as opposed to a
    /// supertype reached by walking, or a lexical fallback).
    pub top_of_hierarchy: bool,
}

/// Per-resolution scope stack plus the global-status verdict inputs.
#[derive(Debug)]
pub struct TypeInfo {
    levels: Vec<ContextLevel>,
    hint: GlobalStatus,
    forced_unknown: bool,
    type_was_processed: bool,
}

impl TypeInfo {
    /// Start an empty stack with the syntactic hint fixed up front.
    pub fn new(hint: GlobalStatus) -> Self {
        Self {
            levels: Vec::new(),
            hint,
            forced_unknown: false,
            type_was_processed: false,
        }
    }

    pub fn levels(&self) -> &[ContextLevel] {
        &self.levels
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn hint(&self) -> GlobalStatus {
        self.hint
    }

    /// Whether any qualifier type or package scope fed the stack.
    pub fn type_was_processed(&self) -> bool {
        self.type_was_processed
    }

    pub fn mark_type_processed(&mut self) {
        self.type_was_processed = true;
    }

    /// Pin the effective global status to Unknown, whatever the levels
    /// say. Set when a self-qualifier's type cannot be trusted.
    pub fn force_unknown(&mut self) {
        self.forced_unknown = true;
    }

    /// Add a namespace at the level the stack shape dictates: 0 when the
    /// stack is empty or the namespace starts a hierarchy, one past the
    /// farthest real level otherwise. Returns the level used.
    pub fn add_namespace(&mut self, namespace: Namespace, top_of_hierarchy: bool) -> i32 {
        let level = if self.levels.is_empty() || top_of_hierarchy {
            0
        } else {
            self.max_real_level().map_or(0, |max| max + 1)
        };
        self.add_at_level(namespace, level, top_of_hierarchy);
        level
    }

    /// Add a namespace at an explicit level (hierarchy walking assigns
    /// child level + 1 itself).
    pub fn add_at_level(&mut self, namespace: Namespace, relative_level: i32, top_of_hierarchy: bool) {
        if let Some(existing) = self
            .levels
            .iter_mut()
            .find(|level| level.namespace.equivalent_to(&namespace))
        {
            // Closer scope shadows the farther one.
            if relative_level < existing.relative_level {
                existing.namespace = namespace;
                existing.relative_level = relative_level;
                existing.top_of_hierarchy = top_of_hierarchy;
            }
            return;
        }
        self.levels.push(ContextLevel {
            namespace,
            relative_level,
            top_of_hierarchy,
        });
    }

    /// Append the universal base namespace at its reserved distance.
    pub fn add_universal_base(&mut self, namespace: Namespace) {
        self.add_at_level(namespace, UNIVERSAL_BASE_LEVEL, false);
    }

    /// The farthest level, not counting the universal-base sentinel.
    fn max_real_level(&self) -> Option<i32> {
        self.levels
            .iter()
            .filter(|level| level.relative_level != UNIVERSAL_BASE_LEVEL)
            .map(|level| level.relative_level)
            .max()
    }

    /// The hint, narrowed by what the levels turned out to hold: a hint
    /// is kept only while no level of the opposite kind appeared, and a
    /// forced-unknown mark overrides everything.
    pub fn effective_global_status(&self) -> GlobalStatus {
        if self.forced_unknown {
            return GlobalStatus::Unknown;
        }
        let mut saw_global = false;
        let mut saw_non_global = false;
        for level in &self.levels {
            if level.relative_level == UNIVERSAL_BASE_LEVEL {
                continue;
            }
            if level.namespace.is_global(true) {
                saw_global = true;
            } else {
                saw_non_global = true;
            }
        }
        match self.hint {
            GlobalStatus::Global if !saw_non_global => GlobalStatus::Global,
            GlobalStatus::NonGlobal if !saw_global => GlobalStatus::NonGlobal,
            _ => GlobalStatus::Unknown,
        }
    }

    /// Whether the stack demands static members: some qualifier entered
    /// its hierarchy in static context.
    pub fn demands_statics(&self) -> bool {
        self.levels
            .iter()
            .any(|level| level.top_of_hierarchy && level.namespace.context == ContextKind::Static)
    }
}

/// Accumulated strictness signs: how sure the resolution is that only
/// complete matches should count.
///
/// Signs only accumulate; the verdict weighs them at the end. A forced
/// sign wins outright, otherwise one relaxation outweighs any number of
/// strictness signs (dynamic code keeps its fallbacks even when a
/// precise type was seen on the way).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MatchStrictness {
    forced: bool,
    complete_only: bool,
    allow_partial: bool,
}

impl MatchStrictness {
    /// A precise type is known; partial matches stop being useful.
    pub fn require_complete(&mut self) {
        self.complete_only = true;
    }

    /// The caller wants complete matches regardless of what the code
    /// looks like.
    pub fn force_complete(&mut self) {
        self.forced = true;
    }

    /// Loosely-typed or dynamic code was involved; keep partial matches.
    pub fn allow_partial(&mut self) {
        self.allow_partial = true;
    }

    /// Final verdict: drop partial matches?
    pub fn complete_only(&self) -> bool {
        self.forced || self.complete_only_evaluated()
    }

    /// What the qualifier evaluation alone concluded, ignoring a forced
    /// sign. The syntactic fallback consults this: a caller's forcing
    /// should not stop it from seeding an otherwise empty stack.
    pub fn complete_only_evaluated(&self) -> bool {
        self.complete_only && !self.allow_partial
    }
}
