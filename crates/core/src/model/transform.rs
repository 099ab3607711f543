//! Member transform layer: pure mapping from raw declarations to typed
//! reflection entities. No merge logic lives here.

use docscope_api::models::{
    RawClassDeclaration, RawConstant, RawMethod, RawProperty, RawTraitUse,
};
use indexmap::map::Entry;
use smol_str::SmolStr;
use std::sync::Arc;
use tracing::debug;

use crate::error::{DocscopeError, Result};
use crate::model::entity::{
    ClassEntity, EntityCaches, TraitAliasEntity, TraitPrecedenceEntity, TraitUseEntity,
};
use crate::model::member::{MemberDetail, MemberEntity, MemberMap, Parameter};

/// Split a fully qualified name into (namespace, short name).
pub(crate) fn split_name(fqn: &str) -> (&str, &str) {
    match fqn.rfind('\\') {
        Some(i) => (&fqn[..i], &fqn[i + 1..]),
        None => ("", fqn),
    }
}

/// Transform one raw declaration into a class entity, attaching the
/// declaring-class identity to every member. Fails only on missing
/// identity fields; the caller decides whether to skip the class or abort.
pub(crate) fn transform_class(raw: RawClassDeclaration) -> Result<ClassEntity> {
    let display = raw.name.trim_start_matches('\\');
    if display.trim().is_empty() {
        return Err(DocscopeError::MalformedDeclaration {
            class: raw.name.clone(),
            detail: "empty class name".to_string(),
        });
    }
    let fqn = SmolStr::new(display);
    let (namespace, short_name) = split_name(&fqn);
    let (namespace, short_name) = (SmolStr::new(namespace), SmolStr::new(short_name));

    let own_methods = transform_methods(&fqn, raw.methods)?;
    let own_properties = transform_properties(&fqn, raw.properties)?;
    let own_constants = transform_constants(&fqn, raw.constants)?;

    let mut interface_names: Vec<SmolStr> = Vec::with_capacity(raw.interface_names.len());
    for name in &raw.interface_names {
        let name = name.trim_start_matches('\\');
        if interface_names
            .iter()
            .any(|seen| seen.eq_ignore_ascii_case(name))
        {
            debug!(class = %fqn, interface = name, "duplicate interface declaration dropped");
            continue;
        }
        interface_names.push(SmolStr::new(name));
    }

    Ok(ClassEntity {
        fqn: fqn.clone(),
        short_name,
        namespace,
        kind: raw.kind,
        is_abstract: raw.is_abstract,
        is_final: raw.is_final,
        file_name: SmolStr::new(&raw.file_name),
        start_line: raw.start_line,
        end_line: raw.end_line,
        parent_name: raw
            .parent_name
            .as_deref()
            .map(|p| SmolStr::new(p.trim_start_matches('\\'))),
        interface_names,
        trait_uses: raw.trait_uses.into_iter().map(transform_trait_use).collect(),
        doc: raw.doc,
        metadata: raw.metadata,
        own_methods,
        own_properties,
        own_constants,
        caches: EntityCaches::default(),
    })
}

fn transform_methods(class: &SmolStr, raws: Vec<RawMethod>) -> Result<MemberMap> {
    let mut map = MemberMap::new();
    for raw in raws {
        if raw.name.trim().is_empty() {
            return Err(DocscopeError::MalformedDeclaration {
                class: class.to_string(),
                detail: "method with empty name".to_string(),
            });
        }
        let entity = MemberEntity {
            name: SmolStr::new(&raw.name),
            declaring_class: class.clone(),
            visibility: raw.visibility,
            is_static: raw.is_static,
            doc: raw.doc,
            detail: MemberDetail::Method {
                is_abstract: raw.is_abstract,
                is_final: raw.is_final,
                parameters: raw
                    .parameters
                    .into_iter()
                    .map(|p| Parameter {
                        name: SmolStr::new(&p.name),
                        type_hint: p.type_hint.as_deref().map(SmolStr::new),
                        default: p.default,
                        by_reference: p.by_reference,
                        variadic: p.variadic,
                    })
                    .collect(),
                return_type: raw.return_type.as_deref().map(SmolStr::new),
                start_line: raw.start_line,
                end_line: raw.end_line,
            },
        };
        insert_member(&mut map, class, entity);
    }
    Ok(map)
}

fn transform_properties(class: &SmolStr, raws: Vec<RawProperty>) -> Result<MemberMap> {
    let mut map = MemberMap::new();
    for raw in raws {
        if raw.name.trim().is_empty() {
            return Err(DocscopeError::MalformedDeclaration {
                class: class.to_string(),
                detail: "property with empty name".to_string(),
            });
        }
        let entity = MemberEntity {
            name: SmolStr::new(&raw.name),
            declaring_class: class.clone(),
            visibility: raw.visibility,
            is_static: raw.is_static,
            doc: raw.doc,
            detail: MemberDetail::Property {
                type_hint: raw.type_hint.as_deref().map(SmolStr::new),
                default: raw.default,
            },
        };
        insert_member(&mut map, class, entity);
    }
    Ok(map)
}

fn transform_constants(class: &SmolStr, raws: Vec<RawConstant>) -> Result<MemberMap> {
    let mut map = MemberMap::new();
    for raw in raws {
        if raw.name.trim().is_empty() {
            return Err(DocscopeError::MalformedDeclaration {
                class: class.to_string(),
                detail: "constant with empty name".to_string(),
            });
        }
        let entity = MemberEntity {
            name: SmolStr::new(&raw.name),
            declaring_class: class.clone(),
            visibility: raw.visibility,
            is_static: true,
            doc: raw.doc,
            detail: MemberDetail::Constant { value: raw.value },
        };
        insert_member(&mut map, class, entity);
    }
    Ok(map)
}

fn insert_member(map: &mut MemberMap, class: &SmolStr, entity: MemberEntity) {
    match map.entry(entity.name.clone()) {
        Entry::Occupied(_) => {
            debug!(class = %class, member = %entity.name, "duplicate member declaration dropped");
        }
        Entry::Vacant(slot) => {
            slot.insert(Arc::new(entity));
        }
    }
}

fn transform_trait_use(raw: RawTraitUse) -> TraitUseEntity {
    let mut aliases: Vec<TraitAliasEntity> = raw
        .aliases
        .into_iter()
        .map(|a| TraitAliasEntity {
            source_trait: a
                .source_trait
                .as_deref()
                .map(|t| SmolStr::new(t.trim_start_matches('\\'))),
            method: SmolStr::new(&a.method),
            alias: a.alias.as_deref().map(SmolStr::new),
            visibility: a.visibility,
        })
        .collect();
    // Deterministic regardless of source order
    aliases.sort_by(|a, b| a.effective_name().cmp(b.effective_name()));

    TraitUseEntity {
        trait_name: SmolStr::new(raw.trait_name.trim_start_matches('\\')),
        aliases,
        precedences: raw
            .precedences
            .into_iter()
            .map(|p| TraitPrecedenceEntity {
                method: SmolStr::new(&p.method),
                losers: p
                    .losers
                    .iter()
                    .map(|l| SmolStr::new(l.trim_start_matches('\\')))
                    .collect(),
            })
            .collect(),
    }
}
