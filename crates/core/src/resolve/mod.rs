pub mod hierarchy;
pub mod traits;

use std::cmp::Ordering;

use crate::model::member::MemberMap;
use crate::universe::{ClassId, Universe};

/// The fully merged member surface of one class: own over trait-provided
/// over inherited for every name collision.
#[derive(Debug)]
pub(crate) struct MergedMembers {
    pub(crate) methods: MemberMap,
    pub(crate) properties: MemberMap,
    pub(crate) constants: MemberMap,
}

pub(crate) fn resolve_merged(universe: &Universe, id: ClassId) -> MergedMembers {
    let entity = universe.entity(id);
    let used = universe.used_of(id);
    let inherited = universe.inherited_of(id);

    let mut methods = entity.own_methods.clone();
    overlay(&mut methods, &used.flattened_methods);
    overlay(&mut methods, &inherited.methods);

    let mut properties = entity.own_properties.clone();
    overlay(&mut properties, &used.flattened_properties);
    overlay(&mut properties, &inherited.properties);

    // Traits do not carry constants; the constant surface is own + inherited.
    let mut constants = entity.own_constants.clone();
    overlay(&mut constants, &inherited.constants);

    MergedMembers {
        methods,
        properties,
        constants,
    }
}

/// Add `src` entries whose names are not yet present. Existing names win,
/// which is what gives own > used > inherited precedence when layered in
/// that order.
pub(crate) fn overlay(dst: &mut MemberMap, src: &MemberMap) {
    for (name, member) in src {
        if !dst.contains_key(name) {
            dst.insert(name.clone(), member.clone());
        }
    }
}

/// Case-insensitive ordering with a stable case-sensitive tiebreak.
pub(crate) fn ci_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
