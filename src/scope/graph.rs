//! Collaborator interfaces the engine resolves against.
//!
//! The engine owns no syntax tree, no index, and no type checker. The
//! host supplies four capabilities:
//!
//! - [`ScopeGraph`] - the scope/declaration graph and type hierarchy
//! - [`TypeOracle`] - static type inference for qualifier expressions
//! - [`OpenNamespaceProvider`] - which custom namespaces are open at a node
//! - [`ImportFallback`] - import/using-directive resolution
//!
//! All methods are read-only; a resolution call holds the collaborators
//! for its whole duration, so they must tolerate concurrent readers if
//! resolutions run in parallel.

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::base::{DeclId, ExprId, FileId, NodeId, ScopeId};
use crate::model::{Declaration, Namespace, QualifiedName};

/// What kind of region a scope is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    /// Top-level scope shared by all unpackaged declarations.
    Global,
    /// A package body.
    Package,
    /// A file root.
    File,
    /// A class body.
    Class,
    /// A function body.
    Function,
    /// A braced block.
    Block,
    /// A `with`-like region whose bindings are not statically knowable.
    Dynamic,
}

/// A type inferred for a qualifier expression.
///
/// The tri-state keeps "the oracle knows the type", "the type is
/// deliberately dynamic", and "the oracle failed" apart, so each degrades
/// resolution differently: `Dynamic` relaxes matching, `Unresolved` is
/// skipped entirely.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InferredType {
    Known {
        /// Namespace of the inferred type, carrying the static/instance
        /// side the qualifier implies.
        namespace: Namespace,
        /// The type came from an annotation in strictly-typed source,
        /// not from loose inference.
        strict_source: bool,
        /// The type is an empty structural record (`{}`), which says
        /// nothing about its members.
        empty_object: bool,
        /// The type is an uninstantiated type parameter.
        type_parameter: bool,
        /// The type's class is declared `dynamic`: members may be added
        /// at runtime, so missing members are not errors.
        dynamic_class: bool,
    },
    /// The `*`/any type.
    Dynamic,
    /// The oracle could not determine a type.
    Unresolved,
}

impl InferredType {
    /// A known, strictly-declared type with no opt-out flags.
    pub fn known(namespace: Namespace) -> Self {
        Self::Known {
            namespace,
            strict_source: true,
            empty_object: false,
            type_parameter: false,
            dynamic_class: false,
        }
    }

    /// Whether this inference is precise enough to stop guessing: once a
    /// strictly-declared, non-universal-base, non-empty, non-parameter
    /// type is known, only complete matches should be accepted.
    pub fn strict_typing_possible(&self) -> bool {
        match self {
            Self::Known {
                namespace,
                strict_source,
                empty_object,
                type_parameter,
                ..
            } => {
                *strict_source
                    && !*empty_object
                    && !*type_parameter
                    && namespace.qualified_name.is_some()
                    && !namespace.is_universal_base()
            }
            _ => false,
        }
    }
}

/// Read-only view of the host's scope and declaration graph.
///
/// Declarations are addressed by [`DeclId`] and fetched individually, so
/// scope contents can be enumerated lazily and results can refer back to
/// host entities.
pub trait ScopeGraph {
    /// The lexically enclosing scope, or `None` at a root.
    fn enclosing_scope(&self, scope: ScopeId) -> Option<ScopeId>;

    /// What kind of region the scope is.
    fn scope_kind(&self, scope: ScopeId) -> ScopeKind;

    /// The file a scope belongs to. `None` for structural scopes such as
    /// the global root and package scopes, which span files.
    fn file_of(&self, scope: ScopeId) -> Option<FileId>;

    /// Declarations directly inside a scope, in declaration order.
    fn declarations_in(&self, scope: ScopeId) -> &[DeclId];

    /// Fetch one declaration.
    fn declaration(&self, decl: DeclId) -> &Declaration;

    /// Immediate supertypes of a type namespace. Must be cycle-safe on
    /// its own (malformed hierarchies terminate); the engine additionally
    /// keeps a visited set while walking.
    fn supertypes_of(&self, namespace: &Namespace) -> Vec<Namespace>;

    /// The scope holding a type's or package's members, if the namespace
    /// names one the graph knows.
    fn scope_of(&self, namespace: &Namespace) -> Option<ScopeId>;

    /// Whether the named class is declared `dynamic`.
    fn class_is_dynamic(&self, namespace: &Namespace) -> bool {
        let _ = namespace;
        false
    }

    /// The qualified name of the class or package a scope is the body of.
    fn owner_of(&self, scope: ScopeId) -> Option<QualifiedName>;

    /// Every declaration with the given simple name, project-wide. Backs
    /// the whole-project fallback scan; order must be stable.
    fn declarations_named(&self, name: &str) -> Vec<DeclId>;

    /// The package a file declares, from its package statement.
    fn package_of(&self, file: FileId) -> Option<QualifiedName>;

    /// The package exported for an embedded file by its host document.
    fn host_package_of(&self, file: FileId) -> Option<QualifiedName> {
        let _ = file;
        None
    }

    /// The synthetic host scope an embedded file's root continues into.
    fn host_scope_of(&self, file: FileId) -> Option<ScopeId> {
        let _ = file;
        None
    }

    /// A namespace readable off the qualifier expression's own syntax
    /// (a package or type reference), when type inference has nothing.
    fn local_namespace_of(&self, expr: ExprId) -> Option<Namespace> {
        let _ = expr;
        None
    }

    /// The nearest enclosing class of a scope.
    fn declaring_class_of(&self, scope: ScopeId) -> Option<QualifiedName> {
        let mut current = Some(scope);
        while let Some(s) = current {
            if self.scope_kind(s) == ScopeKind::Class {
                if let Some(owner) = self.owner_of(s) {
                    return Some(owner);
                }
            }
            current = self.enclosing_scope(s);
        }
        None
    }
}

/// Static type inference for qualifier expressions.
pub trait TypeOracle {
    /// All types inferred for the expression; empty when the oracle has
    /// no opinion. The oracle owns memoization and cycle breaking for
    /// recursive qualifier chains.
    fn infer_type(&self, expr: ExprId) -> Vec<InferredType>;
}

/// Which custom access namespaces are open at a syntax node.
pub trait OpenNamespaceProvider {
    /// Map from namespace value to the alias it was opened under, in
    /// directive order.
    fn open_namespaces_at(&self, node: NodeId) -> IndexMap<SmolStr, SmolStr>;
}

/// Import/using-directive resolution, consulted for unqualified names
/// before the engine falls back to package-scope assumptions.
pub trait ImportFallback {
    /// The declaration an import reachable from `scope` binds `name` to.
    fn resolve_via_import(&self, name: &str, scope: ScopeId) -> Option<DeclId>;
}
