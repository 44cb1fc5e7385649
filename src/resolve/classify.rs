//! Match classification.
//!
//! Decides how well an accepted declaration's namespace fits the scope
//! stack built for the reference: a complete fit (found in the stack,
//! optionally with static/instance context agreement), a partial fit
//! (plausible only under relaxed, dynamic-typing rules), or no fit.

use crate::model::{Declaration, Reference};
use crate::resolve::type_info::{GlobalStatus, TypeInfo};

/// How a candidate's namespace fits the scope stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchType {
    /// Found at the innermost level with static/instance context
    /// agreement (or as a top-level symbol at the global root level).
    CompleteWithContext,
    /// Found somewhere in the stack.
    Complete,
    /// Not in the stack, but plausible under relaxed matching.
    Partial,
    /// Cannot be what the reference means.
    NoMatch,
}

impl MatchType {
    pub fn is_partial(self) -> bool {
        self == MatchType::Partial
    }

    pub fn is_no_match(self) -> bool {
        self == MatchType::NoMatch
    }

    pub fn context_matches(self) -> bool {
        self == MatchType::CompleteWithContext
    }
}

/// Classify one declaration against the stack. Returns the match type
/// and the nesting distance of the level that produced it (0 when no
/// level did).
pub fn classify(decl: &Declaration, reference: &Reference, info: &TypeInfo) -> (MatchType, i32) {
    let ns = &decl.namespace;
    let status = info.effective_global_status();

    // A qualified reference never means a bare top-level symbol.
    if status == GlobalStatus::NonGlobal && decl.namespace_explicit && ns.is_global(false) {
        return (MatchType::NoMatch, 0);
    }

    let mut context_mismatch = false;
    for level in info.levels() {
        if !level.namespace.equivalent_to(ns) {
            continue;
        }
        let level_ctx = level.namespace.context;
        let decl_ctx = ns.context;
        if level_ctx.is_known() && decl_ctx.is_known() && level_ctx != decl_ctx {
            context_mismatch = true;
            continue;
        }
        let with_context = level.relative_level == 0
            && ((level_ctx.is_known() && decl_ctx.is_known()) || level.namespace.is_global(false));
        let matched = if with_context {
            MatchType::CompleteWithContext
        } else {
            MatchType::Complete
        };
        return (matched, level.relative_level);
    }
    if context_mismatch {
        // The name is in scope, but under the wrong static/instance side.
        return (MatchType::NoMatch, 0);
    }

    // In a global-only context, a namespace that names a non-global
    // owner is out; locals stay in play (they reach here whenever the
    // stack holds nothing but the global root).
    if status == GlobalStatus::Global && !ns.is_local && !ns.is_global(true) {
        return (MatchType::NoMatch, 0);
    }

    // A declared namespace that resolved to no qualified name is broken;
    // only documentation references are lenient about it.
    if ns.qualified_name.is_none() && decl.namespace_explicit && !reference.doc_context {
        return (MatchType::NoMatch, 0);
    }

    (MatchType::Partial, 0)
}
