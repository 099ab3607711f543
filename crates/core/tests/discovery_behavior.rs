mod common;

use common::{build, class, interface, method, trait_decl};
use docscope_api::models::{RawTraitUse, TypeKind};
use docscope_core::DocscopeError;

#[test]
fn direct_and_indirect_subclasses_are_discovered_and_sorted() {
    let base = class("Base");
    let mut mid = class("Mid");
    mid.parent_name = Some("Base".into());
    let mut leaf = class("Leaf");
    leaf.parent_name = Some("Mid".into());
    let mut zebra = class("zebra");
    zebra.parent_name = Some("Base".into());

    let universe = build(vec![base, mid, leaf, zebra]);
    let base = universe.class("Base").unwrap();

    let direct: Vec<_> = base
        .direct_subclasses()
        .iter()
        .map(|c| c.name().to_string())
        .collect();
    assert_eq!(direct, ["Mid", "zebra"]);

    let indirect: Vec<_> = base
        .indirect_subclasses()
        .iter()
        .map(|c| c.name().to_string())
        .collect();
    assert_eq!(indirect, ["Leaf"]);
}

#[test]
fn subclass_discovery_survives_a_cycle_in_candidates() {
    let base = class("Base");
    let mut a = class("A");
    a.parent_name = Some("B".into());
    let mut b = class("B");
    b.parent_name = Some("A".into());

    let universe = build(vec![base, a, b]);
    let base = universe.class("Base").unwrap();
    assert!(base.direct_subclasses().is_empty());
    assert!(base.indirect_subclasses().is_empty());
}

#[test]
fn implementers_are_split_into_direct_and_transitive() {
    let contract = interface("Contract");
    let mut extended = interface("Extended");
    extended.interface_names = vec!["Contract".into()];

    let mut a = class("A");
    a.interface_names = vec!["Contract".into()];
    let mut b = class("B");
    b.parent_name = Some("A".into());
    let mut c = class("C");
    c.interface_names = vec!["Extended".into()];

    let universe = build(vec![contract, extended, a, b, c]);

    let contract = universe.class("Contract").unwrap();
    let direct: Vec<_> = contract
        .direct_implementers()
        .iter()
        .map(|x| x.name().to_string())
        .collect();
    assert_eq!(direct, ["A"]);

    let indirect: Vec<_> = contract
        .indirect_implementers()
        .iter()
        .map(|x| x.name().to_string())
        .collect();
    assert_eq!(indirect, ["B", "C"]);

    let b = universe.class("B").unwrap();
    assert!(b.implements_interface("Contract"));
    let c = universe.class("C").unwrap();
    assert!(c.implements_interface("Contract"));
    assert!(c.implements_interface("Extended"));
}

#[test]
fn interface_closure_keeps_unresolved_declared_names() {
    let mut c = class("C");
    c.interface_names = vec!["Known".into(), "Unknown".into()];
    let known = interface("Known");

    let universe = build(vec![c, known]);
    let c = universe.class("C").unwrap();

    let names: Vec<_> = c.interface_names().iter().map(|n| n.as_str()).collect();
    assert_eq!(names, ["Known", "Unknown"]);
    assert!(c.implements_interface("Unknown"));
    assert_eq!(c.interfaces().len(), 1);
    assert_eq!(c.own_interface_names().len(), 2);
}

#[test]
fn trait_users_are_discovered_and_sorted() {
    let mut helper = trait_decl("Helper");
    helper.methods = vec![method("help")];
    let mut x = class("X");
    x.trait_uses = vec![RawTraitUse::new("Helper")];
    let mut other = trait_decl("Other");
    other.trait_uses = vec![RawTraitUse::new("Helper")];
    let mut y = class("Y");
    y.parent_name = Some("X".into());

    let universe = build(vec![helper, x, other, y]);

    let helper = universe.class("Helper").unwrap();
    let users: Vec<_> = helper
        .direct_users()
        .iter()
        .map(|u| u.name().to_string())
        .collect();
    assert_eq!(users, ["Other", "X"]);

    // Transitive membership: through the parent and through other traits.
    let y = universe.class("Y").unwrap();
    assert!(y.uses_trait("Helper"));
    assert!(!y.uses_trait("Other"));
}

#[test]
fn find_filters_by_kind_and_caps_results() {
    let mut decls = vec![
        class("App\\Alpha"),
        class("App\\Beta"),
        interface("App\\Gamma"),
    ];
    decls[0].methods = vec![method("run")];

    let universe = build(decls);

    let classes = universe.find("^app\\\\", &[TypeKind::Class], 10).unwrap();
    assert_eq!(classes.len(), 2);

    let capped = universe.find("^app\\\\", &[], 1).unwrap();
    assert_eq!(capped.len(), 1);

    let by_short_name = universe.find("alpha", &[], 10).unwrap();
    assert_eq!(by_short_name.len(), 1);
    assert_eq!(by_short_name[0].name(), "App\\Alpha");

    assert!(matches!(
        universe.find("(", &[], 10),
        Err(DocscopeError::InvalidPattern(_))
    ));
}

#[test]
fn lookups_are_case_insensitive_and_ignore_leading_backslash() {
    let universe = build(vec![class("App\\Entity\\User")]);
    assert!(universe.contains("app\\entity\\user"));
    assert!(universe.contains("\\App\\Entity\\User"));
    let user = universe.class("APP\\ENTITY\\USER").unwrap();
    assert_eq!(user.name(), "App\\Entity\\User");
    assert_eq!(user.short_name(), "User");
    assert_eq!(user.namespace_name(), "App\\Entity");
}
