//! Builders for resolution fixtures.
//!
//! Tests assemble a [`ScopeTree`] by hand instead of parsing source: the
//! engine only ever sees graph facts, so fixtures state those facts
//! directly and stay independent of any concrete syntax.

use nameres::{
    ContextKind, FileId, ImportCache, Namespace, QualifiedName, Reference, ResolveCandidate,
    ResolveOptions, ResolveOutcome, Resolver, ScopeId, ScopeKind, ScopeTree,
};

/// Parse a dotted qualified name that is known to be well-formed.
pub fn qn(text: &str) -> QualifiedName {
    QualifiedName::from_dotted(text)
        .unwrap_or_else(|| panic!("'{}' is not a valid qualified name", text))
}

/// Instance-side member namespace of a class.
pub fn instance_ns(class: &str) -> Namespace {
    Namespace::of_type(qn(class)).with_context(ContextKind::Instance)
}

/// Static-side member namespace of a class.
pub fn static_ns(class: &str) -> Namespace {
    Namespace::of_type(qn(class)).with_context(ContextKind::Static)
}

/// A scope tree plus the import cache one resolver call borrows.
pub struct Fixture {
    pub tree: ScopeTree,
    pub cache: ImportCache,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            tree: ScopeTree::new(),
            cache: ImportCache::new(),
        }
    }

    /// A resolver over the current tree state.
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.tree, &self.tree, &self.tree, &self.tree, &self.cache)
    }

    /// Resolve with default options.
    pub fn resolve(&self, reference: &Reference) -> ResolveOutcome {
        self.resolver()
            .resolve(reference, &ResolveOptions::default())
    }

    /// Resolve with explicit options.
    pub fn resolve_with(&self, reference: &Reference, options: &ResolveOptions) -> ResolveOutcome {
        self.resolver().resolve(reference, options)
    }

    /// Every visible candidate from the reference site, ranked.
    pub fn candidates(&self, reference: &Reference) -> Vec<ResolveCandidate> {
        self.resolver()
            .candidates(reference, &ResolveOptions::default())
    }

    /// A reference at a fresh syntax node inside `scope`.
    pub fn reference(&mut self, name: &str, file: FileId, scope: ScopeId) -> Reference {
        let node = self.tree.alloc_node();
        Reference::new(name, file, scope, node)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Scope ids of the shared `class Sub extends Base` skeleton.
pub struct Hierarchy {
    pub file: FileId,
    pub file_scope: ScopeId,
    pub base_scope: ScopeId,
    pub sub_scope: ScopeId,
    /// An empty method body inside `Sub`.
    pub method: ScopeId,
}

/// One file declaring `class Base` and `class Sub extends Base`, with an
/// empty method body inside `Sub` to place references in.
pub fn sub_extends_base(fx: &mut Fixture) -> Hierarchy {
    let file = FileId::new(0);
    let file_scope = fx.tree.add_file(fx.tree.global_scope(), file);
    let base_scope = fx.tree.add_class(file_scope, qn("Base"));
    let sub_scope = fx.tree.add_class(file_scope, qn("Sub"));
    fx.tree.add_supertype(qn("Sub"), qn("Base"));
    let method = fx.tree.add_scope(sub_scope, ScopeKind::Function);
    Hierarchy {
        file,
        file_scope,
        base_scope,
        sub_scope,
        method,
    }
}
