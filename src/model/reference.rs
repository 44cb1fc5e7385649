//! Reference sites: the name uses the engine resolves.

use smol_str::SmolStr;

use crate::base::{ExprId, FileId, NodeId, ScopeId, TextRange};

/// The qualifier shape of a reference, as determined by the host's syntax.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Qualifier {
    /// Unqualified: `name`.
    #[default]
    None,
    /// `this.name`.
    This,
    /// `super.name`.
    Super,
    /// `expr.name`, with the qualifier expression handed to the type
    /// oracle.
    Expr(ExprId),
}

impl Qualifier {
    /// Any qualifier at all, implicit or explicit.
    pub fn is_present(&self) -> bool {
        !matches!(self, Qualifier::None)
    }

    /// `this` or `super`: the qualifier denotes the enclosing
    /// declaration itself.
    pub fn is_self(&self) -> bool {
        matches!(self, Qualifier::This | Qualifier::Super)
    }
}

/// One name use to resolve.
///
/// Everything here is a syntactic fact the host reads off the reference
/// node; the engine derives nothing from the syntax tree itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reference {
    /// The referenced simple name.
    pub name: SmolStr,
    /// File containing the reference.
    pub file: FileId,
    /// Innermost scope containing the reference.
    pub scope: ScopeId,
    /// The reference's own syntax node.
    pub node: NodeId,
    /// Source range of the name.
    pub range: TextRange,
    pub qualifier: Qualifier,
    /// Inside a `with`-like construct whose bindings are not statically
    /// knowable.
    pub in_dynamic_scope: bool,
    /// Inside a static member of the enclosing class.
    pub in_static_member: bool,
    /// A documentation cross-reference site; such sites accept candidates
    /// that ordinary code positions reject (untyped locals).
    pub doc_context: bool,
}

impl Reference {
    /// Create an unqualified reference; flags start false.
    pub fn new(name: impl Into<SmolStr>, file: FileId, scope: ScopeId, node: NodeId) -> Self {
        Self {
            name: name.into(),
            file,
            scope,
            node,
            range: TextRange::empty(0.into()),
            qualifier: Qualifier::None,
            in_dynamic_scope: false,
            in_static_member: false,
            doc_context: false,
        }
    }

    /// Set the qualifier shape.
    pub fn with_qualifier(mut self, qualifier: Qualifier) -> Self {
        self.qualifier = qualifier;
        self
    }

    /// Set the source range of the name.
    pub fn with_range(mut self, range: TextRange) -> Self {
        self.range = range;
        self
    }

    /// Mark as inside a dynamic-scope construct.
    pub fn inside_dynamic_scope(mut self) -> Self {
        self.in_dynamic_scope = true;
        self
    }

    /// Mark as inside a static member.
    pub fn inside_static_member(mut self) -> Self {
        self.in_static_member = true;
        self
    }

    /// Mark as a documentation cross-reference site.
    pub fn in_doc_context(mut self) -> Self {
        self.doc_context = true;
        self
    }
}
