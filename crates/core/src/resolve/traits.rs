//! Trait composition: computes, for one class, the effective set of
//! trait-provided methods and properties after alias, visibility-override
//! and precedence ("insteadof") directives. Output ordering is fully
//! deterministic: trait names and member names sort case-insensitively,
//! alias lists sort by alias name.

use docscope_api::models::Visibility;
use indexmap::IndexMap;
use smol_str::SmolStr;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::diagnostics::Diagnostic;
use crate::model::entity::{ClassEntity, TraitAliasEntity};
use crate::model::member::{MemberEntity, MemberMap};
use crate::resolve::{ci_cmp, overlay};
use crate::universe::{ClassId, Universe, normalize};

/// A trait member as exposed to a using class, with the aliases the class
/// declared for it.
#[derive(Debug, Clone)]
pub struct UsedMember {
    pub member: Arc<MemberEntity>,
    pub aliases: Vec<MemberAlias>,
}

/// An additional exposed name, with an optionally narrowed visibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberAlias {
    pub name: SmolStr,
    pub visibility: Option<Visibility>,
}

/// One trait's post-directive contribution to a using class.
#[derive(Debug)]
pub struct TraitContribution {
    pub trait_id: ClassId,
    pub methods: IndexMap<SmolStr, UsedMember>,
    pub properties: IndexMap<SmolStr, UsedMember>,
    /// Methods removed from this trait by a precedence directive; they
    /// stay queryable here instead of vanishing.
    pub excluded: IndexMap<SmolStr, Arc<MemberEntity>>,
}

/// The composed trait surface of one class.
#[derive(Debug, Default)]
pub struct UsedMembers {
    /// Canonical trait name -> contribution, sorted case-insensitively.
    pub traits: IndexMap<SmolStr, TraitContribution>,
    /// Merge views in trait *declaration* order: for a name no precedence
    /// directive settles, the first-declared trait wins.
    pub flattened_methods: MemberMap,
    pub flattened_properties: MemberMap,
    pub diagnostics: Vec<Diagnostic>,
}

pub(crate) fn resolve_used(universe: &Universe, id: ClassId) -> UsedMembers {
    let me = universe.entity(id);
    let mut out = UsedMembers::default();

    // Effective member set per use clause, declaration order.
    let mut contributions: Vec<(SmolStr, ClassId, MemberMap, MemberMap)> = Vec::new();
    let mut seen_traits: HashSet<ClassId> = HashSet::new();
    for trait_use in &me.trait_uses {
        let Some(trait_id) = universe.lookup(&trait_use.trait_name) else {
            debug!(class = %me.fqn, name = %trait_use.trait_name, "used trait not in universe");
            continue;
        };
        if !seen_traits.insert(trait_id) {
            debug!(class = %me.fqn, name = %trait_use.trait_name, "duplicate trait use; first clause wins");
            continue;
        }
        let mut visited = HashSet::new();
        let (methods, properties) = effective_trait_members(universe, trait_id, &mut visited);
        contributions.push((
            universe.entity(trait_id).fqn.clone(),
            trait_id,
            methods,
            properties,
        ));
    }

    // Losing trait -> method names taken away by a precedence directive on
    // some winning trait's use clause.
    let mut excluded_from: HashMap<ClassId, HashSet<SmolStr>> = HashMap::new();
    for trait_use in &me.trait_uses {
        for precedence in &trait_use.precedences {
            for loser in &precedence.losers {
                match universe.lookup(loser) {
                    Some(loser_id) => {
                        excluded_from
                            .entry(loser_id)
                            .or_default()
                            .insert(precedence.method.clone());
                    }
                    None => {
                        debug!(class = %me.fqn, loser = %loser, "precedence directive names unknown trait");
                    }
                }
            }
        }
    }

    for (trait_name, trait_id, methods, properties) in contributions {
        let taken_away = excluded_from.get(&trait_id);
        let mut contribution = TraitContribution {
            trait_id,
            methods: IndexMap::new(),
            properties: IndexMap::new(),
            excluded: IndexMap::new(),
        };
        for (name, member) in methods {
            if taken_away.is_some_and(|set| set.contains(&name)) {
                contribution.excluded.insert(name, member);
            } else {
                contribution.methods.insert(
                    name,
                    UsedMember {
                        member,
                        aliases: Vec::new(),
                    },
                );
            }
        }
        for (name, member) in properties {
            contribution.properties.insert(
                name,
                UsedMember {
                    member,
                    aliases: Vec::new(),
                },
            );
        }
        out.traits.insert(trait_name, contribution);
    }

    for trait_use in &me.trait_uses {
        let owner = universe
            .lookup(&trait_use.trait_name)
            .map(|tid| universe.entity(tid).fqn.clone());
        for alias in &trait_use.aliases {
            apply_alias(universe, &mut out.traits, me, owner.as_ref(), alias);
        }
    }
    for contribution in out.traits.values_mut() {
        for used in contribution.methods.values_mut() {
            used.aliases.sort_by(|a, b| a.name.cmp(&b.name));
            used.aliases.dedup();
        }
    }

    // Flattened merge views + conflict detection, in declaration order
    // (the traits map is not sorted yet at this point).
    let mut method_claims: HashMap<SmolStr, SmolStr> = HashMap::new();
    let mut property_claims: HashMap<SmolStr, SmolStr> = HashMap::new();
    for (trait_name, contribution) in &out.traits {
        flatten(
            &me.fqn,
            trait_name,
            contribution.methods.iter().map(|(n, u)| (n, &u.member)),
            &mut out.flattened_methods,
            &mut method_claims,
            &mut out.diagnostics,
        );
        flatten(
            &me.fqn,
            trait_name,
            contribution.properties.iter().map(|(n, u)| (n, &u.member)),
            &mut out.flattened_properties,
            &mut property_claims,
            &mut out.diagnostics,
        );
    }

    // Deterministic presentation order.
    out.traits.sort_by(|a, _, b, _| ci_cmp(a, b));
    for contribution in out.traits.values_mut() {
        contribution.methods.sort_by(|a, _, b, _| ci_cmp(a, b));
        contribution.properties.sort_by(|a, _, b, _| ci_cmp(a, b));
        contribution.excluded.sort_by(|a, _, b, _| ci_cmp(a, b));
    }

    out
}

/// A trait's effective surface: its own members plus, transitively, the
/// members of traits it uses itself. First occurrence of a name wins; the
/// visited set makes self-referential trait graphs terminate.
fn effective_trait_members(
    universe: &Universe,
    trait_id: ClassId,
    visited: &mut HashSet<ClassId>,
) -> (MemberMap, MemberMap) {
    if !visited.insert(trait_id) {
        return (MemberMap::new(), MemberMap::new());
    }
    let entity = universe.entity(trait_id);
    let mut methods = entity.own_methods.clone();
    let mut properties = entity.own_properties.clone();
    for trait_use in &entity.trait_uses {
        if let Some(inner) = universe.lookup(&trait_use.trait_name) {
            let (inner_methods, inner_properties) =
                effective_trait_members(universe, inner, visited);
            overlay(&mut methods, &inner_methods);
            overlay(&mut properties, &inner_properties);
        }
    }
    (methods, properties)
}

fn apply_alias(
    universe: &Universe,
    traits: &mut IndexMap<SmolStr, TraitContribution>,
    class: &ClassEntity,
    owner: Option<&SmolStr>,
    alias: &TraitAliasEntity,
) {
    // Qualified aliases bind to the named trait. Unqualified ones bind to
    // the owning use clause's trait when it exposes the method, otherwise
    // to the first-declared trait still exposing it.
    let target = match &alias.source_trait {
        Some(source) => universe
            .lookup(source)
            .map(|tid| universe.entity(tid).fqn.clone())
            .filter(|canonical| traits.contains_key(canonical)),
        None => owner
            .filter(|name| {
                traits
                    .get(*name)
                    .is_some_and(|c| c.methods.contains_key(&alias.method))
            })
            .cloned()
            .or_else(|| {
                traits
                    .iter()
                    .find(|(_, c)| c.methods.contains_key(&alias.method))
                    .map(|(name, _)| name.clone())
            }),
    };
    let Some(target) = target else {
        debug!(class = %class.fqn, method = %alias.method, "alias directive matches no used trait");
        return;
    };

    let contribution = &mut traits[&target];
    if let Some(used) = contribution.methods.get_mut(&alias.method) {
        used.aliases.push(MemberAlias {
            name: alias.effective_name().clone(),
            visibility: alias.visibility,
        });
    } else if contribution.excluded.contains_key(&alias.method) {
        // Precedence directives strip a method before aliasing runs; an
        // alias for the stripped copy has nothing to bind to.
        debug!(class = %class.fqn, method = %alias.method, source = %target, "alias names an excluded method");
    } else {
        debug!(class = %class.fqn, method = %alias.method, source = %target, "alias names an unknown method");
    }
}

fn flatten<'a>(
    class: &SmolStr,
    trait_name: &SmolStr,
    members: impl Iterator<Item = (&'a SmolStr, &'a Arc<MemberEntity>)>,
    flattened: &mut MemberMap,
    claims: &mut HashMap<SmolStr, SmolStr>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    for (name, member) in members {
        match flattened.get(name) {
            Some(existing) if Arc::ptr_eq(existing, member) => {
                // Same origin reached through two traits (diamond); not a
                // conflict.
            }
            Some(_) => {
                let kept = claims
                    .get(name)
                    .cloned()
                    .unwrap_or_else(|| SmolStr::new_static("?"));
                warn!(class = %class, member = %name, kept = %kept, dropped = %trait_name, "unresolved trait member conflict");
                diagnostics.push(Diagnostic::TraitConflict {
                    class: class.clone(),
                    member: name.clone(),
                    kept,
                    dropped: trait_name.clone(),
                });
            }
            None => {
                claims.insert(name.clone(), trait_name.clone());
                flattened.insert(name.clone(), member.clone());
            }
        }
    }
}

/// Normalized names of every trait a class effectively uses: declared
/// uses, ancestors' declared uses, and traits reached through traits.
pub(crate) fn resolve_trait_closure(universe: &Universe, id: ClassId) -> HashSet<String> {
    let mut stack: Vec<SmolStr> = universe
        .entity(id)
        .trait_uses
        .iter()
        .map(|tu| tu.trait_name.clone())
        .collect();
    for &ancestor in &universe.ancestors(id).chain {
        stack.extend(
            universe
                .entity(ancestor)
                .trait_uses
                .iter()
                .map(|tu| tu.trait_name.clone()),
        );
    }

    let mut set = HashSet::new();
    while let Some(name) = stack.pop() {
        if !set.insert(normalize(&name)) {
            continue;
        }
        if let Some(trait_id) = universe.lookup(&name) {
            stack.extend(
                universe
                    .entity(trait_id)
                    .trait_uses
                    .iter()
                    .map(|tu| tu.trait_name.clone()),
            );
        }
    }
    set
}
