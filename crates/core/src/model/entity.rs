use docscope_api::models::{DocBlock, TypeKind, Visibility};
use once_cell::sync::OnceCell;
use smol_str::SmolStr;

use crate::model::member::MemberMap;
use crate::resolve::hierarchy::{AncestorResolution, InheritedMembers, InterfaceClosure};
use crate::resolve::traits::UsedMembers;
use crate::resolve::MergedMembers;
use crate::universe::ClassId;

/// Link to a class's declared parent after index resolution. `Unresolved`
/// means a parent name was declared but no class of that name is known to
/// the universe, which callers must be able to tell apart from "no parent".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParentLink {
    None,
    Unresolved(SmolStr),
    Resolved(ClassId),
}

/// One discovered class, interface or trait: the node weight in the
/// universe topology.
///
/// Declared fields are immutable after population; everything derived
/// (ancestors, composed traits, inherited and merged member views) lives in
/// one-shot cells filled on first query.
#[derive(Debug)]
pub struct ClassEntity {
    // --- Identity ---
    pub(crate) fqn: SmolStr,
    pub(crate) short_name: SmolStr,
    pub(crate) namespace: SmolStr,
    pub(crate) kind: TypeKind,
    pub(crate) is_abstract: bool,
    pub(crate) is_final: bool,

    // --- Physical location ---
    pub(crate) file_name: SmolStr,
    pub(crate) start_line: u32,
    pub(crate) end_line: u32,

    // --- Declared relations ---
    pub(crate) parent_name: Option<SmolStr>,
    pub(crate) interface_names: Vec<SmolStr>,
    pub(crate) trait_uses: Vec<TraitUseEntity>,

    pub(crate) doc: DocBlock,

    // --- Provider extension point ---
    pub(crate) metadata: serde_json::Value,

    // --- Own members, declaration order ---
    pub(crate) own_methods: MemberMap,
    pub(crate) own_properties: MemberMap,
    pub(crate) own_constants: MemberMap,

    pub(crate) caches: EntityCaches,
}

impl ClassEntity {
    pub fn name(&self) -> &str {
        &self.fqn
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn namespace_name(&self) -> &str {
        &self.namespace
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }
}

/// Lazily materialized derived state. Each cell is computed at most once
/// per entity, which also makes concurrent readers safe: the compute
/// functions are pure given the frozen universe.
#[derive(Debug, Default)]
pub(crate) struct EntityCaches {
    pub(crate) ancestors: OnceCell<AncestorResolution>,
    pub(crate) interfaces: OnceCell<InterfaceClosure>,
    pub(crate) trait_closure: OnceCell<std::collections::HashSet<String>>,
    pub(crate) used: OnceCell<UsedMembers>,
    pub(crate) inherited: OnceCell<InheritedMembers>,
    pub(crate) merged: OnceCell<MergedMembers>,
}

/// One `use Trait` clause after transformation. Aliases are sorted by their
/// effective name so downstream output is stable regardless of source
/// order.
#[derive(Debug, Clone)]
pub struct TraitUseEntity {
    pub trait_name: SmolStr,
    pub aliases: Vec<TraitAliasEntity>,
    pub precedences: Vec<TraitPrecedenceEntity>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraitAliasEntity {
    pub source_trait: Option<SmolStr>,
    pub method: SmolStr,
    pub alias: Option<SmolStr>,
    pub visibility: Option<Visibility>,
}

impl TraitAliasEntity {
    /// The name the method is exposed under: the alias, or the original
    /// name for visibility-only adaptations.
    pub fn effective_name(&self) -> &SmolStr {
        self.alias.as_ref().unwrap_or(&self.method)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraitPrecedenceEntity {
    pub method: SmolStr,
    pub losers: Vec<SmolStr>,
}
