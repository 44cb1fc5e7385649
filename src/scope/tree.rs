//! In-memory scope graph.
//!
//! [`ScopeTree`] is an arena-backed implementation of every collaborator
//! trait at once, suitable for hosts that materialize their scope
//! structure up front and for building resolution fixtures. Scopes form a
//! tree rooted at a single global scope; packages hang off the root,
//! files off packages (or the root), classes and functions off files.

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;

use crate::base::{DeclId, ExprId, FileId, NodeId, ScopeId};
use crate::model::{Declaration, Namespace, QualifiedName};
use crate::scope::{
    ImportFallback, InferredType, OpenNamespaceProvider, ScopeGraph, ScopeKind, TypeOracle,
};

#[derive(Debug)]
struct ScopeData {
    parent: Option<ScopeId>,
    kind: ScopeKind,
    /// Inherited from the parent at creation; `None` above file level.
    file: Option<FileId>,
    /// Qualified name of the class or package this scope is the body of.
    owner: Option<QualifiedName>,
    decls: Vec<DeclId>,
}

/// Arena of scopes and declarations implementing [`ScopeGraph`],
/// [`TypeOracle`], [`OpenNamespaceProvider`] and [`ImportFallback`].
#[derive(Debug)]
pub struct ScopeTree {
    scopes: Vec<ScopeData>,
    decls: Vec<Declaration>,
    by_name: FxHashMap<SmolStr, Vec<DeclId>>,
    supertypes: FxHashMap<QualifiedName, Vec<QualifiedName>>,
    /// Scope holding the members of a class or package.
    member_scopes: FxHashMap<QualifiedName, ScopeId>,
    packages: FxHashMap<FileId, QualifiedName>,
    host_packages: FxHashMap<FileId, QualifiedName>,
    host_scopes: FxHashMap<FileId, ScopeId>,
    expr_types: FxHashMap<ExprId, Vec<InferredType>>,
    expr_namespaces: FxHashMap<ExprId, Namespace>,
    open_namespaces: FxHashMap<NodeId, IndexMap<SmolStr, SmolStr>>,
    imports: FxHashMap<(FileId, SmolStr), DeclId>,
    dynamic_classes: FxHashSet<QualifiedName>,
    next_node: u32,
    next_expr: u32,
}

impl ScopeTree {
    /// An empty tree holding only the global root scope.
    pub fn new() -> Self {
        Self {
            scopes: vec![ScopeData {
                parent: None,
                kind: ScopeKind::Global,
                file: None,
                owner: None,
                decls: Vec::new(),
            }],
            decls: Vec::new(),
            by_name: FxHashMap::default(),
            supertypes: FxHashMap::default(),
            member_scopes: FxHashMap::default(),
            packages: FxHashMap::default(),
            host_packages: FxHashMap::default(),
            host_scopes: FxHashMap::default(),
            expr_types: FxHashMap::default(),
            expr_namespaces: FxHashMap::default(),
            open_namespaces: FxHashMap::default(),
            imports: FxHashMap::default(),
            dynamic_classes: FxHashSet::default(),
            next_node: 0,
            next_expr: 0,
        }
    }

    /// The root scope shared by all unpackaged top-level declarations.
    pub fn global_scope(&self) -> ScopeId {
        ScopeId::new(0)
    }

    fn push_scope(&mut self, data: ScopeData) -> ScopeId {
        let id = ScopeId::new(self.scopes.len() as u32);
        self.scopes.push(data);
        id
    }

    /// Add a scope of the given kind; the file is inherited from the
    /// parent.
    pub fn add_scope(&mut self, parent: ScopeId, kind: ScopeKind) -> ScopeId {
        let file = self.scopes[parent.index() as usize].file;
        self.push_scope(ScopeData {
            parent: Some(parent),
            kind,
            file,
            owner: None,
            decls: Vec::new(),
        })
    }

    /// Add a package body under the global root. The dotted package name
    /// is one scope, not one per segment.
    pub fn add_package(&mut self, name: QualifiedName) -> ScopeId {
        let id = self.push_scope(ScopeData {
            parent: Some(self.global_scope()),
            kind: ScopeKind::Package,
            file: None,
            owner: Some(name.clone()),
            decls: Vec::new(),
        });
        self.member_scopes.insert(name, id);
        id
    }

    /// Add a file root. When the parent is a package scope, the file's
    /// package is recorded from it.
    pub fn add_file(&mut self, parent: ScopeId, file: FileId) -> ScopeId {
        if self.scopes[parent.index() as usize].kind == ScopeKind::Package {
            if let Some(pkg) = self.scopes[parent.index() as usize].owner.clone() {
                self.packages.insert(file, pkg);
            }
        }
        self.push_scope(ScopeData {
            parent: Some(parent),
            kind: ScopeKind::File,
            file: Some(file),
            owner: None,
            decls: Vec::new(),
        })
    }

    /// Add a class body and register it as the member scope of `name`.
    pub fn add_class(&mut self, parent: ScopeId, name: QualifiedName) -> ScopeId {
        let file = self.scopes[parent.index() as usize].file;
        let id = self.push_scope(ScopeData {
            parent: Some(parent),
            kind: ScopeKind::Class,
            file,
            owner: Some(name.clone()),
            decls: Vec::new(),
        });
        self.member_scopes.insert(name, id);
        id
    }

    /// Insert a declaration into a scope. Its scope, node and (when the
    /// scope determines one) file are assigned here.
    pub fn add_decl(&mut self, scope: ScopeId, mut decl: Declaration) -> DeclId {
        decl.scope = scope;
        decl.node = self.alloc_node();
        if let Some(file) = self.scopes[scope.index() as usize].file {
            decl.file = file;
        }
        let id = DeclId::new(self.decls.len() as u32);
        self.by_name.entry(decl.name.clone()).or_default().push(id);
        self.decls.push(decl);
        self.scopes[scope.index() as usize].decls.push(id);
        id
    }

    /// Allocate a fresh syntax-node id. Declarations get one on insert;
    /// reference sites take theirs from here too, so self-reference
    /// detection stays collision-free.
    pub fn alloc_node(&mut self) -> NodeId {
        let id = NodeId::new(self.next_node);
        self.next_node += 1;
        id
    }

    /// Allocate a fresh expression id for use with the type oracle.
    pub fn alloc_expr(&mut self) -> ExprId {
        let id = ExprId::new(self.next_expr);
        self.next_expr += 1;
        id
    }

    /// Record `supertype` as an immediate supertype of `ty`.
    pub fn add_supertype(&mut self, ty: QualifiedName, supertype: QualifiedName) {
        self.supertypes.entry(ty).or_default().push(supertype);
    }

    /// Record the oracle's answer for an expression.
    pub fn set_expr_types(&mut self, expr: ExprId, types: Vec<InferredType>) {
        self.expr_types.insert(expr, types);
    }

    /// Record a namespace readable off an expression's own syntax.
    pub fn set_expr_namespace(&mut self, expr: ExprId, namespace: Namespace) {
        self.expr_namespaces.insert(expr, namespace);
    }

    /// Record a custom namespace as open at a node, under an alias.
    pub fn open_namespace(
        &mut self,
        node: NodeId,
        value: impl Into<SmolStr>,
        alias: impl Into<SmolStr>,
    ) {
        self.open_namespaces
            .entry(node)
            .or_default()
            .insert(value.into(), alias.into());
    }

    /// Record an import directive of `file` binding `name` to `target`.
    pub fn add_import(&mut self, file: FileId, name: impl Into<SmolStr>, target: DeclId) {
        self.imports.insert((file, name.into()), target);
    }

    /// Mark a class as declared `dynamic`.
    pub fn mark_dynamic(&mut self, class: QualifiedName) {
        self.dynamic_classes.insert(class);
    }

    /// Mark `file` as embedded, exporting `package` from its host.
    pub fn set_host_package(&mut self, file: FileId, package: QualifiedName) {
        self.host_packages.insert(file, package);
    }

    /// Record the synthetic host scope an embedded file continues into.
    pub fn set_host_scope(&mut self, file: FileId, scope: ScopeId) {
        self.host_scopes.insert(file, scope);
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeGraph for ScopeTree {
    fn enclosing_scope(&self, scope: ScopeId) -> Option<ScopeId> {
        self.scopes[scope.index() as usize].parent
    }

    fn scope_kind(&self, scope: ScopeId) -> ScopeKind {
        self.scopes[scope.index() as usize].kind
    }

    fn file_of(&self, scope: ScopeId) -> Option<FileId> {
        self.scopes[scope.index() as usize].file
    }

    fn declarations_in(&self, scope: ScopeId) -> &[DeclId] {
        &self.scopes[scope.index() as usize].decls
    }

    fn declaration(&self, decl: DeclId) -> &Declaration {
        &self.decls[decl.index() as usize]
    }

    fn supertypes_of(&self, namespace: &Namespace) -> Vec<Namespace> {
        let Some(qname) = &namespace.qualified_name else {
            return Vec::new();
        };
        self.supertypes
            .get(qname)
            .map(|supers| {
                supers
                    .iter()
                    .map(|q| Namespace::of_type(q.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn scope_of(&self, namespace: &Namespace) -> Option<ScopeId> {
        let qname = namespace.qualified_name.as_ref()?;
        self.member_scopes.get(qname).copied()
    }

    fn class_is_dynamic(&self, namespace: &Namespace) -> bool {
        namespace
            .qualified_name
            .as_ref()
            .is_some_and(|qname| self.dynamic_classes.contains(qname))
    }

    fn owner_of(&self, scope: ScopeId) -> Option<QualifiedName> {
        self.scopes[scope.index() as usize].owner.clone()
    }

    fn declarations_named(&self, name: &str) -> Vec<DeclId> {
        self.by_name.get(name).cloned().unwrap_or_default()
    }

    fn package_of(&self, file: FileId) -> Option<QualifiedName> {
        self.packages.get(&file).cloned()
    }

    fn host_package_of(&self, file: FileId) -> Option<QualifiedName> {
        self.host_packages.get(&file).cloned()
    }

    fn host_scope_of(&self, file: FileId) -> Option<ScopeId> {
        self.host_scopes.get(&file).copied()
    }

    fn local_namespace_of(&self, expr: ExprId) -> Option<Namespace> {
        self.expr_namespaces.get(&expr).cloned()
    }
}

impl TypeOracle for ScopeTree {
    fn infer_type(&self, expr: ExprId) -> Vec<InferredType> {
        self.expr_types.get(&expr).cloned().unwrap_or_default()
    }
}

impl OpenNamespaceProvider for ScopeTree {
    fn open_namespaces_at(&self, node: NodeId) -> IndexMap<SmolStr, SmolStr> {
        self.open_namespaces.get(&node).cloned().unwrap_or_default()
    }
}

impl ImportFallback for ScopeTree {
    fn resolve_via_import(&self, name: &str, scope: ScopeId) -> Option<DeclId> {
        let file = self.scopes[scope.index() as usize].file?;
        self.imports.get(&(file, SmolStr::new(name))).copied()
    }
}
