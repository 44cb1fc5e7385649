//! The namespace value type: a declaration's logical binding scope.
//!
//! "Namespace" here is binding-scope identity, not the language's
//! `namespace` keyword: classes, packages, and block-local scopes all have
//! one. A namespace is built on demand from a declaration or an evaluated
//! type, is immutable, and is never kept across resolution calls.

use smol_str::SmolStr;

use crate::base::ScopeId;
use crate::model::QualifiedName;

/// Simple name of the universal base type whose members every object
/// inherits. Its context levels are pinned at a reserved nesting distance
/// so intrinsic members lose same-name tie-breaks against user code.
pub const UNIVERSAL_BASE: &str = "Object";

/// Top-level names that denote runtime-global objects. Members of these
/// count as globally visible when the broad globality check is used.
const GLOBAL_OBJECT_NAMES: &[&str] = &[UNIVERSAL_BASE, "Function", "Class", "global"];

/// Whether a binding lives on the static side of a type, the instance
/// side, or an undetermined side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ContextKind {
    Static,
    Instance,
    #[default]
    Unknown,
}

impl ContextKind {
    /// `Unknown` is compatible with everything; `Static` and `Instance`
    /// only with themselves.
    pub fn is_compatible_with(self, other: ContextKind) -> bool {
        match (self, other) {
            (ContextKind::Unknown, _) | (_, ContextKind::Unknown) => true,
            (a, b) => a == b,
        }
    }

    /// Both sides pinned down (neither is `Unknown`).
    pub fn is_known(self) -> bool {
        self != ContextKind::Unknown
    }
}

/// A declaration's logical binding scope.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Namespace {
    /// Identity of the owning package/class chain. `None` for anonymous
    /// namespaces: block/function locals and the top-level (global) scope.
    pub qualified_name: Option<QualifiedName>,
    /// Static/instance side of the binding.
    pub context: ContextKind,
    /// Block- or function-local namespace.
    pub is_local: bool,
    /// The declaring source is strictly typed (annotated), as opposed to
    /// inferred or loosely typed.
    pub is_source_strict: bool,
    /// The owning scope, for local namespaces only.
    pub local_scope: Option<ScopeId>,
}

impl Namespace {
    /// Namespace of a class, interface, or package.
    pub fn of_type(qualified_name: QualifiedName) -> Self {
        Self {
            qualified_name: Some(qualified_name),
            context: ContextKind::Unknown,
            is_local: false,
            is_source_strict: true,
            local_scope: None,
        }
    }

    /// A block- or function-local namespace.
    pub fn local(scope: ScopeId) -> Self {
        Self {
            qualified_name: None,
            context: ContextKind::Unknown,
            is_local: true,
            is_source_strict: true,
            local_scope: Some(scope),
        }
    }

    /// The anonymous top-level namespace (global visibility).
    pub fn anonymous() -> Self {
        Self {
            qualified_name: None,
            context: ContextKind::Unknown,
            is_local: false,
            is_source_strict: true,
            local_scope: None,
        }
    }

    /// Copy with a different static/instance context.
    pub fn with_context(&self, context: ContextKind) -> Self {
        Self {
            context,
            ..self.clone()
        }
    }

    /// Copy with a different source-strictness flag.
    pub fn with_strict(&self, strict: bool) -> Self {
        Self {
            is_source_strict: strict,
            ..self.clone()
        }
    }

    /// Whether this namespace denotes globally visible (top-level) symbols.
    ///
    /// Locals are never global. A namespace without a qualified name is.
    /// With `include_global_objects`, top-level type names in the
    /// runtime-global set ([`GLOBAL_OBJECT_NAMES`]) also count, so that
    /// members of `Object`/`Function` are treated as reachable from
    /// everywhere.
    pub fn is_global(&self, include_global_objects: bool) -> bool {
        if self.is_local {
            return false;
        }
        let Some(qname) = &self.qualified_name else {
            return true;
        };
        include_global_objects
            && qname.is_top_level()
            && GLOBAL_OBJECT_NAMES.contains(&qname.base_name())
    }

    /// Whether this names the universal base type.
    pub fn is_universal_base(&self) -> bool {
        self.qualified_name
            .as_ref()
            .is_some_and(|q| q.is_top_level() && q.base_name() == UNIVERSAL_BASE)
    }

    /// Structural equivalence: qualified names compared componentwise up
    /// the chain, ignoring static/instance context. Local namespaces are
    /// only equivalent to themselves (same owning scope).
    pub fn equivalent_to(&self, other: &Namespace) -> bool {
        if self.is_local || other.is_local {
            return self.is_local == other.is_local && self.local_scope == other.local_scope;
        }
        match (&self.qualified_name, &other.qualified_name) {
            (Some(a), Some(b)) => a.equivalent_to(b),
            (None, None) => true,
            _ => false,
        }
    }

    /// The simple name of the innermost component, if any.
    pub fn simple_name(&self) -> Option<&SmolStr> {
        self.qualified_name.as_ref().map(|q| q.name())
    }
}
