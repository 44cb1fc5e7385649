//! How the scope stack is assembled for different reference shapes:
//! lexical nesting, self-qualifiers, imports, package fallbacks, host
//! documents, and static sites.

use crate::helpers::fixture_helpers::*;
use crate::helpers::resolve_assertions::*;
use nameres::{
    AccessProblem, DeclKind, Declaration, FileId, Namespace, Qualifier, ScopeKind,
};

// =============================================================================
// LEXICAL NESTING
// =============================================================================

#[test]
fn test_block_local_shadows_file_level_var() {
    let mut fx = Fixture::new();
    let file_scope = fx.tree.add_file(fx.tree.global_scope(), FileId::new(0));
    let outer = fx.tree.add_decl(file_scope, Declaration::new("v", DeclKind::Var));
    let function = fx.tree.add_scope(file_scope, ScopeKind::Function);
    let block = fx.tree.add_scope(function, ScopeKind::Block);
    let local = fx.tree.add_decl(
        block,
        Declaration::new("v", DeclKind::Var).with_synthetic_namespace(Namespace::local(block)),
    );
    let reference = fx.reference("v", FileId::new(0), block);

    // The walk stops at the block boundary; the file-level var is never
    // in the running even though it would rank higher.
    assert_resolves_to(&fx.tree, &fx.resolve(&reference), local);

    let listed = fx.candidates(&reference);
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().any(|c| c.decl == local));
    assert!(listed.iter().any(|c| c.decl == outer));
}

// =============================================================================
// SELF-QUALIFIERS
// =============================================================================

#[test]
fn test_this_qualifier_prefers_own_over_inherited() {
    let mut fx = Fixture::new();
    let h = sub_extends_base(&mut fx);
    fx.tree.add_decl(
        h.base_scope,
        Declaration::new("x", DeclKind::Field).with_namespace(instance_ns("Base")),
    );
    let sub_x = fx.tree.add_decl(
        h.sub_scope,
        Declaration::new("x", DeclKind::Field).with_namespace(instance_ns("Sub")),
    );
    let reference = fx
        .reference("x", h.file, h.method)
        .with_qualifier(Qualifier::This);

    let winner = assert_resolves_to(&fx.tree, &fx.resolve(&reference), sub_x);
    assert_eq!(winner.level, 0);
    assert!(winner.tags.context_matches);
}

#[test]
fn test_super_qualifier_starts_at_the_supertype() {
    let mut fx = Fixture::new();
    let h = sub_extends_base(&mut fx);
    let base_m = fx.tree.add_decl(
        h.base_scope,
        Declaration::new("m", DeclKind::Function).with_namespace(instance_ns("Base")),
    );
    let sub_m = fx.tree.add_decl(
        h.sub_scope,
        Declaration::new("m", DeclKind::Function).with_namespace(instance_ns("Sub")),
    );
    let reference = fx
        .reference("m", h.file, h.method)
        .with_qualifier(Qualifier::Super);

    assert_resolves_to(&fx.tree, &fx.resolve(&reference), base_m);
    // The subclass override is not on the super stack at all.
    assert!(fx.candidates(&reference).iter().all(|c| c.decl != sub_m));
}

// =============================================================================
// IMPORTS
// =============================================================================

#[test]
fn test_import_brings_a_foreign_name_into_scope() {
    let mut fx = Fixture::new();
    let lib_pkg = fx.tree.add_package(qn("lib"));
    let target = fx.tree.add_decl(
        lib_pkg,
        Declaration::new("Util", DeclKind::Class).with_namespace(Namespace::of_type(qn("lib"))),
    );
    let site_file = fx.tree.add_file(fx.tree.global_scope(), FileId::new(1));
    let body = fx.tree.add_scope(site_file, ScopeKind::Function);
    fx.tree.add_import(FileId::new(1), "Util", target);
    let reference = fx.reference("Util", FileId::new(1), body);

    let winner = assert_resolves_to(&fx.tree, &fx.resolve(&reference), target);
    // The imported namespace sits one level out from the site's own.
    assert_eq!(winner.level, 1);
}

#[test]
fn test_without_an_import_the_foreign_name_stays_unknown() {
    let mut fx = Fixture::new();
    let lib_pkg = fx.tree.add_package(qn("lib"));
    fx.tree.add_decl(
        lib_pkg,
        Declaration::new("Util", DeclKind::Class).with_namespace(Namespace::of_type(qn("lib"))),
    );
    let site_file = fx.tree.add_file(fx.tree.global_scope(), FileId::new(1));
    let body = fx.tree.add_scope(site_file, ScopeKind::Function);
    let reference = fx.reference("Util", FileId::new(1), body);

    assert_not_found(&fx.resolve(&reference), "Util");
}

// =============================================================================
// PACKAGE FALLBACK
// =============================================================================

#[test]
fn test_package_members_are_reachable_from_package_files() {
    let mut fx = Fixture::new();
    let pkg_scope = fx.tree.add_package(qn("app"));
    let helper = fx.tree.add_decl(
        pkg_scope,
        Declaration::new("helper", DeclKind::Function)
            .with_namespace(Namespace::of_type(qn("app"))),
    );
    let file_scope = fx.tree.add_file(pkg_scope, FileId::new(0));
    let body = fx.tree.add_scope(file_scope, ScopeKind::Function);
    let reference = fx.reference("helper", FileId::new(0), body);

    let winner = assert_resolves_to(&fx.tree, &fx.resolve(&reference), helper);
    assert_eq!(winner.level, 1);
}

// =============================================================================
// EMBEDDED FILES
// =============================================================================

#[test]
fn test_embedded_script_sees_host_document_symbols() {
    let mut fx = Fixture::new();
    let host_file = fx.tree.add_file(fx.tree.global_scope(), FileId::new(0));
    let host_var = fx
        .tree
        .add_decl(host_file, Declaration::new("hostVar", DeclKind::Var));
    let embedded = fx.tree.add_file(fx.tree.global_scope(), FileId::new(1));
    fx.tree.set_host_scope(FileId::new(1), host_file);
    let body = fx.tree.add_scope(embedded, ScopeKind::Function);
    let reference = fx.reference("hostVar", FileId::new(1), body);

    let winner = assert_resolves_to(&fx.tree, &fx.resolve(&reference), host_var);
    assert!(!winner.tags.current_file);
}

// =============================================================================
// STATIC SITES
// =============================================================================

#[test]
fn test_static_site_demands_the_static_side() {
    let mut fx = Fixture::new();
    let file_scope = fx.tree.add_file(fx.tree.global_scope(), FileId::new(0));
    let class_scope = fx.tree.add_class(file_scope, qn("C"));
    let static_v = fx.tree.add_decl(
        class_scope,
        Declaration::new("v", DeclKind::Field)
            .with_static(true)
            .with_namespace(static_ns("C")),
    );
    let instance_v = fx.tree.add_decl(
        class_scope,
        Declaration::new("v", DeclKind::Field).with_namespace(instance_ns("C")),
    );
    let method = fx.tree.add_scope(class_scope, ScopeKind::Function);
    let reference = fx
        .reference("v", FileId::new(0), method)
        .inside_static_member();

    let winner = assert_resolves_to(&fx.tree, &fx.resolve(&reference), static_v);
    assert!(winner.tags.context_matches);

    let rejected = fx
        .candidates(&reference)
        .into_iter()
        .find(|c| c.decl == instance_v)
        .expect("the instance member should still be listed");
    assert_eq!(
        rejected.problem,
        Some(AccessProblem::InstanceMemberInaccessible)
    );
}
