//! End-to-end reference scenarios.
//!
//! Each test builds a small scope tree, places one reference, and checks
//! the complete outcome: winner, rank order, and problem reporting.

use rstest::rstest;

use crate::helpers::fixture_helpers::*;
use crate::helpers::resolve_assertions::*;
use nameres::{
    Access, AccessProblem, DeclKind, Declaration, FileId, InferredType, Namespace, Qualifier,
    ScopeKind,
};

// =============================================================================
// SHADOWING AND SCOPE DISTANCE
// =============================================================================

#[test]
fn test_own_member_shadows_inherited_member() {
    let mut fx = Fixture::new();
    let h = sub_extends_base(&mut fx);
    let base_x = fx.tree.add_decl(
        h.base_scope,
        Declaration::new("x", DeclKind::Field).with_namespace(instance_ns("Base")),
    );
    let sub_x = fx.tree.add_decl(
        h.sub_scope,
        Declaration::new("x", DeclKind::Field).with_namespace(instance_ns("Sub")),
    );
    let reference = fx.reference("x", h.file, h.method);

    let winner = assert_resolves_to(&fx.tree, &fx.resolve(&reference), sub_x);
    assert_eq!(winner.level, 0);

    // The inherited member survives at the farther level for completion.
    let ranked = fx.candidates(&reference);
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].decl, sub_x);
    assert_eq!(ranked[1].decl, base_x);
    assert_eq!(ranked[1].level, 1);
}

// =============================================================================
// PRIVACY IS REPORTED, NOT HIDDEN
// =============================================================================

#[test]
fn test_private_member_from_outside_is_found_but_flagged() {
    let mut fx = Fixture::new();
    let lib_file = fx.tree.add_file(fx.tree.global_scope(), FileId::new(0));
    let class_scope = fx.tree.add_class(lib_file, qn("D"));
    let m = fx.tree.add_decl(
        class_scope,
        Declaration::new("m", DeclKind::Function)
            .with_access(Access::Private)
            .with_namespace(instance_ns("D")),
    );

    let site_file = fx.tree.add_file(fx.tree.global_scope(), FileId::new(1));
    let body = fx.tree.add_scope(site_file, ScopeKind::Function);
    let expr = fx.tree.alloc_expr();
    fx.tree
        .set_expr_types(expr, vec![InferredType::known(instance_ns("D"))]);
    let reference = fx
        .reference("m", FileId::new(1), body)
        .with_qualifier(Qualifier::Expr(expr));

    let outcome = fx.resolve(&reference);
    assert_found_with_problem(
        &fx.tree,
        &outcome,
        m,
        AccessProblem::PrivateMemberNotAccessible,
    );

    // Nothing the site can see is actually accessible.
    let listed = fx.candidates(&reference);
    assert!(!listed.is_empty());
    assert!(listed.iter().all(|candidate| !candidate.is_valid()));
}

// =============================================================================
// QUALIFIED REFERENCES NEVER MEAN BARE TOP-LEVEL SYMBOLS
// =============================================================================

#[test]
fn test_qualifying_a_top_level_symbol_breaks_resolution() {
    let mut fx = Fixture::new();
    let pkg_scope = fx.tree.add_package(qn("pkg"));
    let file_scope = fx.tree.add_file(pkg_scope, FileId::new(0));
    let top_level = fx.tree.add_decl(
        pkg_scope,
        Declaration::new("topLevelFunc", DeclKind::Function)
            .with_namespace(Namespace::anonymous()),
    );
    let body = fx.tree.add_scope(file_scope, ScopeKind::Function);

    // Unqualified, the name is in scope and resolves.
    let unqualified = fx.reference("topLevelFunc", FileId::new(0), body);
    assert_resolves_to(&fx.tree, &fx.resolve(&unqualified), top_level);

    // Written as `pkg.topLevelFunc`, the same name means a member of
    // `pkg`, which the top-level symbol is not.
    let expr = fx.tree.alloc_expr();
    fx.tree
        .set_expr_namespace(expr, Namespace::of_type(qn("pkg")));
    let qualified = fx
        .reference("topLevelFunc", FileId::new(0), body)
        .with_qualifier(Qualifier::Expr(expr));
    assert_not_found(&fx.resolve(&qualified), "pkg.topLevelFunc");
}

// =============================================================================
// FORMAL DECLARATIONS OUTRANK ASSIGNMENT SITES
// =============================================================================

#[rstest]
#[case::formal_declared_first(true)]
#[case::assignment_declared_first(false)]
fn test_formal_declaration_outranks_assignment_site(#[case] formal_first: bool) {
    let mut fx = Fixture::new();
    let file_scope = fx.tree.add_file(fx.tree.global_scope(), FileId::new(0));

    let formal_decl = Declaration::new("x", DeclKind::Var);
    let assigned_decl = Declaration::new("x", DeclKind::Var).assignment_definition();
    let (formal, _assigned) = if formal_first {
        let formal = fx.tree.add_decl(file_scope, formal_decl);
        let assigned = fx.tree.add_decl(file_scope, assigned_decl);
        (formal, assigned)
    } else {
        let assigned = fx.tree.add_decl(file_scope, assigned_decl);
        let formal = fx.tree.add_decl(file_scope, formal_decl);
        (formal, assigned)
    };

    let body = fx.tree.add_scope(file_scope, ScopeKind::Function);
    let reference = fx.reference("x", FileId::new(0), body);

    let winner = assert_resolves_to(&fx.tree, &fx.resolve(&reference), formal);
    assert!(!winner.tags.is_assignment);
}

// =============================================================================
// DYNAMIC DISPATCH KEEPS GUESSING
// =============================================================================

#[test]
fn test_dynamic_instance_admits_a_missing_member_as_partial() {
    let mut fx = Fixture::new();
    let lib_file = fx.tree.add_file(fx.tree.global_scope(), FileId::new(0));
    let dyn_scope = fx.tree.add_class(lib_file, qn("Dyn"));
    fx.tree.add_decl(
        dyn_scope,
        Declaration::new("known", DeclKind::Field).with_namespace(instance_ns("Dyn")),
    );
    fx.tree.mark_dynamic(qn("Dyn"));
    let other_scope = fx.tree.add_class(lib_file, qn("Other"));
    let missing = fx.tree.add_decl(
        other_scope,
        Declaration::new("missing", DeclKind::Field).with_namespace(instance_ns("Other")),
    );

    let site_file = fx.tree.add_file(fx.tree.global_scope(), FileId::new(1));
    let body = fx.tree.add_scope(site_file, ScopeKind::Function);
    let expr = fx.tree.alloc_expr();
    fx.tree.set_expr_types(
        expr,
        vec![InferredType::Known {
            namespace: instance_ns("Dyn"),
            strict_source: true,
            empty_object: false,
            type_parameter: false,
            dynamic_class: true,
        }],
    );
    let reference = fx
        .reference("missing", FileId::new(1), body)
        .with_qualifier(Qualifier::Expr(expr));

    let winner = assert_resolves_to(&fx.tree, &fx.resolve(&reference), missing);
    assert!(
        winner.tags.partial,
        "a dynamic instance resolves by name, not through its hierarchy"
    );
}

#[test]
fn test_strict_instance_rejects_the_same_missing_member() {
    let mut fx = Fixture::new();
    let lib_file = fx.tree.add_file(fx.tree.global_scope(), FileId::new(0));
    let strict_scope = fx.tree.add_class(lib_file, qn("Strict"));
    fx.tree.add_decl(
        strict_scope,
        Declaration::new("known", DeclKind::Field).with_namespace(instance_ns("Strict")),
    );
    let other_scope = fx.tree.add_class(lib_file, qn("Other"));
    fx.tree.add_decl(
        other_scope,
        Declaration::new("missing", DeclKind::Field).with_namespace(instance_ns("Other")),
    );

    let site_file = fx.tree.add_file(fx.tree.global_scope(), FileId::new(1));
    let body = fx.tree.add_scope(site_file, ScopeKind::Function);
    let expr = fx.tree.alloc_expr();
    fx.tree
        .set_expr_types(expr, vec![InferredType::known(instance_ns("Strict"))]);
    let reference = fx
        .reference("missing", FileId::new(1), body)
        .with_qualifier(Qualifier::Expr(expr));

    assert_not_found(&fx.resolve(&reference), "missing");
}
