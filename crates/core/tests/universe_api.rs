mod common;

use common::{build, build_with_config, class, method};
use docscope_api::models::{DocBlock, RawClassDeclaration, RawTraitAlias, RawTraitUse, TypeKind};
use docscope_api::provider::{DeclarationProvider, StaticDeclarations};
use docscope_core::{Diagnostic, DocscopeError, ModelConfig, Severity, Universe};

#[test]
fn unknown_class_lookup_fails() {
    let universe = build(vec![class("Known")]);
    assert!(universe.get("Unknown").is_none());
    assert!(matches!(
        universe.class("Unknown"),
        Err(DocscopeError::ClassNotFound(name)) if name == "Unknown"
    ));
}

#[test]
fn malformed_declarations_become_diagnostics_not_failures() {
    let mut broken = class("Broken");
    broken.methods = vec![method("")];
    let fine = class("Fine");

    let universe = build(vec![broken, class(""), fine]);

    assert_eq!(universe.len(), 1);
    assert!(universe.contains("Fine"));

    let malformed: Vec<_> = universe
        .diagnostics()
        .iter()
        .filter(|d| matches!(d, Diagnostic::MalformedDeclaration { .. }))
        .collect();
    assert_eq!(malformed.len(), 2);
    assert!(malformed.iter().all(|d| d.severity() == Severity::Error));
}

#[test]
fn duplicate_declarations_keep_the_first() {
    let mut first = class("Thing");
    first.file_name = "a.php".into();
    let mut second = class("thing");
    second.file_name = "b.php".into();

    let universe = build(vec![first, second]);
    assert_eq!(universe.len(), 1);
    assert_eq!(universe.class("Thing").unwrap().file_name(), "a.php");
    assert!(universe
        .diagnostics()
        .iter()
        .any(|d| matches!(d, Diagnostic::DuplicateClass { .. })));
}

#[test]
fn population_from_a_provider_is_one_shot() {
    let provider = StaticDeclarations::new(vec![class("A"), class("B")]);
    let universe = Universe::from_provider(&provider);
    assert_eq!(universe.len(), 2);
    assert!(provider.declaration_for("\\a").is_some());
    assert!(provider.declaration_for("C").is_none());
}

#[test]
fn identity_and_span_accessors_read_the_declaration() {
    let mut decl = RawClassDeclaration::new("App\\Entity\\User", TypeKind::Class);
    decl.is_abstract = true;
    decl.file_name = "src/Entity/User.php".into();
    decl.start_line = 12;
    decl.end_line = 96;

    let universe = build(vec![decl]);
    let user = universe.class("App\\Entity\\User").unwrap();

    assert_eq!(user.name(), "App\\Entity\\User");
    assert_eq!(user.short_name(), "User");
    assert_eq!(user.namespace_name(), "App\\Entity");
    assert_eq!(user.kind(), TypeKind::Class);
    assert!(user.is_abstract());
    assert!(!user.is_final());
    assert_eq!(user.file_name(), "src/Entity/User.php");
    assert_eq!(user.start_line(), 12);
    assert_eq!(user.end_line(), 96);
}

#[test]
fn doc_comment_queries_read_the_attached_block() {
    let mut decl = class("Api");
    decl.doc = DocBlock::new("Short summary.", "Longer description.")
        .with_tag("author", "docs team")
        .with_tag("deprecated", "since 2.0");

    let universe = build(vec![decl]);
    let api = universe.class("Api").unwrap();

    assert!(api.has_annotation("author"));
    assert_eq!(api.annotation("author"), ["docs team"]);
    assert!(api.annotation("license").is_empty());
    assert!(api.is_deprecated());
    assert_eq!(api.summary(), "Short summary.");
    assert_eq!(api.description(), "Short summary.\n\nLonger description.");
}

#[test]
fn deprecated_tag_set_is_configurable() {
    let mut decl = class("Old");
    decl.doc = DocBlock::new("", "").with_tag("obsolete", "");

    let config = ModelConfig {
        deprecated_tags: vec!["obsolete".into()],
        ..ModelConfig::default()
    };
    let universe = build_with_config(config, vec![decl.clone()]);
    assert!(universe.class("Old").unwrap().is_deprecated());

    // With the default tag set the same declaration is not deprecated.
    let universe = build(vec![decl]);
    assert!(!universe.class("Old").unwrap().is_deprecated());
}

#[test]
fn trait_aliases_render_as_trait_colon_colon_method() {
    let mut t = common::trait_decl("T1");
    t.methods = vec![method("run")];
    let mut c = class("C");
    let mut use_t = RawTraitUse::new("T1");
    use_t.aliases = vec![
        RawTraitAlias {
            source_trait: Some("T1".into()),
            method: "run".into(),
            alias: Some("legacyRun".into()),
            visibility: None,
        },
        RawTraitAlias {
            source_trait: None,
            method: "run".into(),
            alias: Some("oldRun".into()),
            visibility: None,
        },
    ];
    c.trait_uses = vec![use_t];

    let universe = build(vec![t, c]);
    let c = universe.class("C").unwrap();
    let aliases = c.trait_aliases();
    assert_eq!(aliases["legacyRun"], "T1::run");
    assert_eq!(aliases["oldRun"], "T1::run");
}

#[test]
fn classes_iterators_respect_kind_filters() {
    let universe = build(vec![
        class("A"),
        common::interface("I"),
        common::trait_decl("T"),
    ]);
    assert_eq!(universe.classes().count(), 3);
    assert_eq!(universe.classes_of_kind(TypeKind::Class).count(), 1);
    assert_eq!(universe.classes_of_kind(TypeKind::Interface).count(), 1);
    assert_eq!(universe.classes_of_kind(TypeKind::Trait).count(), 1);
}

#[test]
fn diagnostics_render_human_readable_lines() {
    let mut a = class("A");
    a.parent_name = Some("B".into());
    let mut b = class("B");
    b.parent_name = Some("A".into());

    let universe = build(vec![a, b]);
    let a = universe.class("A").unwrap();
    let rendered = a
        .diagnostics()
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join("\n");
    assert!(rendered.contains("hierarchy cycle"));
    assert!(rendered.contains("\"A\""));
}
