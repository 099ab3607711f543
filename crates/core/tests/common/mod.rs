#![allow(dead_code)]

use docscope_api::models::{
    RawClassDeclaration, RawConstant, RawMethod, RawProperty, TypeKind,
};
use docscope_core::{ModelConfig, Universe, UniverseBuilder};

pub fn class(name: &str) -> RawClassDeclaration {
    RawClassDeclaration::new(name, TypeKind::Class)
}

pub fn interface(name: &str) -> RawClassDeclaration {
    RawClassDeclaration::new(name, TypeKind::Interface)
}

pub fn trait_decl(name: &str) -> RawClassDeclaration {
    RawClassDeclaration::new(name, TypeKind::Trait)
}

pub fn method(name: &str) -> RawMethod {
    RawMethod::new(name)
}

pub fn property(name: &str) -> RawProperty {
    RawProperty::new(name)
}

pub fn constant(name: &str, value: &str) -> RawConstant {
    RawConstant::new(name, value)
}

pub fn build(decls: Vec<RawClassDeclaration>) -> Universe {
    build_with_config(ModelConfig::default(), decls)
}

pub fn build_with_config(config: ModelConfig, decls: Vec<RawClassDeclaration>) -> Universe {
    let mut builder = UniverseBuilder::with_config(config);
    for decl in decls {
        builder.add_declaration(decl);
    }
    builder.build()
}
