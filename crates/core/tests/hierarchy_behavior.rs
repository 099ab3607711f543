mod common;

use common::{build, build_with_config, class, constant, method};
use docscope_api::models::Visibility;
use docscope_core::{Diagnostic, ModelConfig, ParentLink};

#[test]
fn class_without_parent_inherits_nothing() {
    let mut root = class("Root");
    root.methods = vec![method("run")];

    let universe = build(vec![root]);
    let root = universe.class("Root").unwrap();

    assert_eq!(root.parent(), ParentLink::None);
    assert!(root.parent_classes().is_empty());
    assert!(root.inherited_methods().is_empty());
    assert!(root.parent_class_name().is_none());
}

#[test]
fn nearest_ancestor_shadows_farther_ones() {
    let mut base = class("Base");
    base.methods = vec![method("shared"), method("base_only")];
    let mut mid = class("Mid");
    mid.parent_name = Some("Base".into());
    mid.methods = vec![method("shared")];
    let mut leaf = class("Leaf");
    leaf.parent_name = Some("Mid".into());

    let universe = build(vec![base, mid, leaf]);
    let leaf = universe.class("Leaf").unwrap();

    let inherited = leaf.inherited_methods();
    assert_eq!(inherited["shared"].declaring_class_name(), "Mid");
    assert_eq!(inherited["base_only"].declaring_class_name(), "Base");

    let parents: Vec<_> = leaf.parent_classes().iter().map(|p| p.name().to_string()).collect();
    assert_eq!(parents, ["Mid", "Base"]);
}

#[test]
fn own_declaration_shadows_every_ancestor() {
    let mut base = class("Base");
    base.methods = vec![method("run")];
    let mut leaf = class("Leaf");
    leaf.parent_name = Some("Base".into());
    leaf.methods = vec![method("run")];

    let universe = build(vec![base, leaf]);
    let leaf = universe.class("Leaf").unwrap();

    assert!(leaf.inherited_methods().is_empty());
    assert_eq!(leaf.method("run").unwrap().declaring_class_name(), "Leaf");
}

#[test]
fn two_class_cycle_terminates_with_partial_chain() {
    let mut a = class("A");
    a.parent_name = Some("B".into());
    let mut b = class("B");
    b.parent_name = Some("A".into());

    let universe = build(vec![a, b]);
    let a = universe.class("A").unwrap();

    let parents: Vec<_> = a.parent_classes().iter().map(|p| p.name().to_string()).collect();
    assert_eq!(parents, ["B"]);
    assert!(a.diagnostics().iter().any(|d| matches!(
        d,
        Diagnostic::HierarchyCycle { class, repeated, .. } if class == "A" && repeated == "A"
    )));
}

#[test]
fn self_parent_terminates_immediately() {
    let mut a = class("A");
    a.parent_name = Some("A".into());

    let universe = build(vec![a]);
    let a = universe.class("A").unwrap();
    assert!(a.parent_classes().is_empty());
    assert!(a
        .diagnostics()
        .iter()
        .any(|d| matches!(d, Diagnostic::HierarchyCycle { .. })));
}

#[test]
fn unresolved_parent_is_flagged_not_failed() {
    let mut c = class("C");
    c.parent_name = Some("Missing".into());

    let universe = build(vec![c]);
    let c = universe.class("C").unwrap();

    assert_eq!(c.parent(), ParentLink::Unresolved("Missing".into()));
    assert!(c.parent_classes().is_empty());
    assert!(c.inherited_methods().is_empty());
    assert!(c.diagnostics().is_empty());

    // The declared name still participates in membership queries.
    assert!(c.is_subclass_of("Missing"));
    assert_eq!(c.inheritance_distance("Missing"), Some(1));
    assert_eq!(c.parent_class_name().as_deref(), Some("Missing"));
}

#[test]
fn inherited_members_keep_their_declaring_class() {
    let mut base = class("App\\Base");
    base.methods = vec![method("run")];
    base.constants = vec![constant("VERSION", "1")];
    let mut leaf = class("App\\Leaf");
    leaf.parent_name = Some("App\\Base".into());

    let universe = build(vec![base, leaf]);
    let leaf = universe.class("App\\Leaf").unwrap();

    assert_eq!(
        leaf.method("run").unwrap().declaring_class_name(),
        "App\\Base"
    );
    assert_eq!(
        leaf.constant("VERSION").unwrap().declaring_class_name(),
        "App\\Base"
    );
}

#[test]
fn constants_follow_the_shadow_rule() {
    let mut base = class("Base");
    base.constants = vec![constant("VERSION", "1")];
    let mut mid = class("Mid");
    mid.parent_name = Some("Base".into());
    mid.constants = vec![constant("VERSION", "2")];
    let mut leaf = class("Leaf");
    leaf.parent_name = Some("Mid".into());

    let universe = build(vec![base, mid, leaf]);
    let leaf = universe.class("Leaf").unwrap();
    assert_eq!(
        leaf.inherited_constants()["VERSION"].declaring_class_name(),
        "Mid"
    );
}

#[test]
fn private_members_stay_out_of_inherited_views_by_default() {
    let mut base = class("Base");
    let mut secret = method("secret");
    secret.visibility = Visibility::Private;
    base.methods = vec![secret, method("open")];
    let mut leaf = class("Leaf");
    leaf.parent_name = Some("Base".into());

    let universe = build(vec![base.clone(), leaf.clone()]);
    let view = universe.class("Leaf").unwrap();
    assert!(!view.inherited_methods().contains_key("secret"));
    assert!(view.inherited_methods().contains_key("open"));

    let permissive = build_with_config(
        ModelConfig {
            inherit_private: true,
            ..ModelConfig::default()
        },
        vec![base, leaf],
    );
    let view = permissive.class("Leaf").unwrap();
    assert!(view.inherited_methods().contains_key("secret"));
}

#[test]
fn inheritance_distance_counts_steps() {
    let mut base = class("Base");
    base.methods = vec![method("run")];
    let mut mid = class("Mid");
    mid.parent_name = Some("Base".into());
    let mut leaf = class("Leaf");
    leaf.parent_name = Some("Mid".into());

    let universe = build(vec![base, mid, leaf]);
    let leaf = universe.class("Leaf").unwrap();

    assert_eq!(leaf.inheritance_distance("Leaf"), Some(0));
    assert_eq!(leaf.inheritance_distance("Mid"), Some(1));
    assert_eq!(leaf.inheritance_distance("base"), Some(2));
    assert_eq!(leaf.inheritance_distance("Other"), None);
}
