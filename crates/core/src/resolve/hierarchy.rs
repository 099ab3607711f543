//! Ancestor-chain resolution: the strictly upward walk that produces the
//! parent chain, the inherited member sets and the transitive interface
//! closure. Cycle detection uses a transient visited set; a detected cycle
//! truncates the walk and surfaces a diagnostic, it never loops.

use docscope_api::models::Visibility;
use smol_str::SmolStr;
use std::collections::{HashSet, VecDeque};
use tracing::warn;

use crate::diagnostics::Diagnostic;
use crate::model::entity::{ClassEntity, ParentLink};
use crate::model::member::MemberMap;
use crate::universe::{ClassId, Universe, normalize};

/// Result of one ancestor walk.
#[derive(Debug)]
pub(crate) struct AncestorResolution {
    /// Resolved ancestors, nearest first. Truncated at a cycle or at an
    /// unresolved parent name.
    pub(crate) chain: Vec<ClassId>,
    /// Normalized names of everything on the chain, including an
    /// unresolved tail name; backs `is_subclass_of`.
    pub(crate) names: HashSet<String>,
    pub(crate) cycle: Option<Diagnostic>,
    /// `(declaring class, missing parent name)` when the chain ended on a
    /// parent name not present in the universe. Not an error.
    pub(crate) unresolved_tail: Option<(SmolStr, SmolStr)>,
}

pub(crate) fn resolve_ancestors(universe: &Universe, start: ClassId) -> AncestorResolution {
    let mut chain = Vec::new();
    let mut names = HashSet::new();
    let mut cycle = None;
    let mut unresolved_tail = None;

    let mut visited: HashSet<ClassId> = HashSet::new();
    visited.insert(start);
    let mut current = start;
    loop {
        match universe.parent_link(current) {
            ParentLink::Resolved(parent) => {
                if !visited.insert(parent) {
                    let start_name = universe.entity(start).fqn.clone();
                    let repeated = universe.entity(parent).fqn.clone();
                    warn!(class = %start_name, repeated = %repeated, "hierarchy cycle detected; truncating ancestor walk");
                    cycle = Some(Diagnostic::HierarchyCycle {
                        class: start_name,
                        repeated,
                        chain: chain
                            .iter()
                            .map(|&id| universe.entity(id).fqn.clone())
                            .collect(),
                    });
                    break;
                }
                names.insert(normalize(universe.entity(parent).name()));
                chain.push(parent);
                current = parent;
            }
            ParentLink::Unresolved(parent_name) => {
                names.insert(normalize(&parent_name));
                unresolved_tail = Some((universe.entity(current).fqn.clone(), parent_name));
                break;
            }
            ParentLink::None => break,
        }
    }

    AncestorResolution {
        chain,
        names,
        cycle,
        unresolved_tail,
    }
}

/// Inherited member sets: for each kind, the nearest non-shadowed ancestor
/// declaration of every name the class does not declare itself. The
/// declaring class of each entry stays the ancestor that introduced it.
#[derive(Debug)]
pub(crate) struct InheritedMembers {
    pub(crate) methods: MemberMap,
    pub(crate) properties: MemberMap,
    pub(crate) constants: MemberMap,
}

pub(crate) fn resolve_inherited(universe: &Universe, id: ClassId) -> InheritedMembers {
    let resolution = universe.ancestors(id);
    let entity = universe.entity(id);
    let inherit_private = universe.config().inherit_private;

    InheritedMembers {
        methods: accumulate(
            universe,
            &entity.own_methods,
            &resolution.chain,
            |e| &e.own_methods,
            inherit_private,
        ),
        properties: accumulate(
            universe,
            &entity.own_properties,
            &resolution.chain,
            |e| &e.own_properties,
            inherit_private,
        ),
        constants: accumulate(
            universe,
            &entity.own_constants,
            &resolution.chain,
            |e| &e.own_constants,
            inherit_private,
        ),
    }
}

fn accumulate(
    universe: &Universe,
    own: &MemberMap,
    chain: &[ClassId],
    pick: impl Fn(&ClassEntity) -> &MemberMap,
    inherit_private: bool,
) -> MemberMap {
    let mut seen: HashSet<SmolStr> = own.keys().cloned().collect();
    let mut out = MemberMap::new();
    for &ancestor in chain {
        // Each ancestor contributes its own members only; what it inherits
        // in turn is reached further up the same chain.
        for (name, member) in pick(universe.entity(ancestor)) {
            if seen.contains(name) {
                continue;
            }
            if !inherit_private && member.visibility == Visibility::Private {
                continue;
            }
            seen.insert(name.clone());
            out.insert(name.clone(), member.clone());
        }
    }
    out
}

/// The transitive interface set of a class: declared interfaces, ancestors'
/// declared interfaces, and every interface reachable through an
/// interface's own extends list.
#[derive(Debug)]
pub(crate) struct InterfaceClosure {
    /// Display names in discovery order (canonical entity name when the
    /// interface resolved, the declared spelling otherwise).
    pub(crate) names: Vec<SmolStr>,
    /// Resolved subset, discovery order.
    pub(crate) ids: Vec<ClassId>,
    /// Normalized membership set; backs `implements_interface`.
    pub(crate) name_set: HashSet<String>,
}

pub(crate) fn resolve_interfaces(universe: &Universe, id: ClassId) -> InterfaceClosure {
    let mut queue: VecDeque<SmolStr> = VecDeque::new();
    queue.extend(universe.entity(id).interface_names.iter().cloned());
    for &ancestor in &universe.ancestors(id).chain {
        queue.extend(universe.entity(ancestor).interface_names.iter().cloned());
    }

    let mut closure = InterfaceClosure {
        names: Vec::new(),
        ids: Vec::new(),
        name_set: HashSet::new(),
    };
    while let Some(declared) = queue.pop_front() {
        if !closure.name_set.insert(normalize(&declared)) {
            continue;
        }
        match universe.lookup(&declared) {
            Some(interface_id) => {
                let interface = universe.entity(interface_id);
                closure.names.push(interface.fqn.clone());
                closure.ids.push(interface_id);
                queue.extend(interface.interface_names.iter().cloned());
            }
            None => closure.names.push(declared),
        }
    }
    closure
}
