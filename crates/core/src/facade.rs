//! The read-only query facade over one class entity. A `ClassReflection`
//! is a cheap `(universe, id)` handle; every derived view it serves is
//! memoized on the entity, so repeated queries return the same data
//! without recomputation.

use docscope_api::models::{MemberKind, TypeKind};
use indexmap::IndexMap;
use smol_str::SmolStr;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::Arc;

use crate::diagnostics::Diagnostic;
use crate::error::{DocscopeError, Result};
use crate::model::entity::{ClassEntity, ParentLink};
use crate::model::member::{MemberEntity, MemberMap};
use crate::model::transform::split_name;
use crate::resolve::hierarchy::InterfaceClosure;
use crate::resolve::traits::{UsedMember, UsedMembers, resolve_trait_closure};
use crate::resolve::{MergedMembers, ci_cmp, resolve_merged};
use crate::universe::{ClassId, RelationKind, Universe, normalize};

#[derive(Clone, Copy)]
pub struct ClassReflection<'u> {
    universe: &'u Universe,
    id: ClassId,
}

impl fmt::Debug for ClassReflection<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassReflection")
            .field("name", &self.name())
            .field("kind", &self.kind())
            .finish()
    }
}

impl<'u> ClassReflection<'u> {
    pub(crate) fn new(universe: &'u Universe, id: ClassId) -> Self {
        Self { universe, id }
    }

    pub fn id(&self) -> ClassId {
        self.id
    }

    fn entity(&self) -> &'u ClassEntity {
        self.universe.entity(self.id)
    }

    // ---- Identity & source span ----

    pub fn name(&self) -> &'u str {
        self.entity().name()
    }

    pub fn short_name(&self) -> &'u str {
        self.entity().short_name()
    }

    pub fn namespace_name(&self) -> &'u str {
        self.entity().namespace_name()
    }

    pub fn kind(&self) -> TypeKind {
        self.entity().kind()
    }

    pub fn is_abstract(&self) -> bool {
        self.entity().is_abstract
    }

    pub fn is_final(&self) -> bool {
        self.entity().is_final
    }

    pub fn file_name(&self) -> &'u str {
        &self.entity().file_name
    }

    pub fn start_line(&self) -> u32 {
        self.entity().start_line
    }

    pub fn end_line(&self) -> u32 {
        self.entity().end_line
    }

    /// Opaque provider-attached metadata, passed through untouched.
    pub fn metadata(&self) -> &'u serde_json::Value {
        &self.entity().metadata
    }

    // ---- Doc-comment model ----

    pub fn annotations(&self) -> &'u BTreeMap<String, Vec<String>> {
        &self.entity().doc.tags
    }

    pub fn annotation(&self, name: &str) -> &'u [String] {
        self.entity().doc.tags_by_name(name)
    }

    pub fn has_annotation(&self, name: &str) -> bool {
        self.entity().doc.has_tag(name)
    }

    pub fn is_deprecated(&self) -> bool {
        let doc = &self.entity().doc;
        self.universe
            .config()
            .deprecated_tags
            .iter()
            .any(|tag| doc.has_tag(tag))
    }

    pub fn summary(&self) -> &'u str {
        &self.entity().doc.summary
    }

    /// Summary and long description joined by an empty line, trimmed.
    pub fn description(&self) -> String {
        self.entity().doc.full_description()
    }

    // ---- Own members ----

    pub fn own_methods(&self) -> &'u MemberMap {
        &self.entity().own_methods
    }

    pub fn own_properties(&self) -> &'u MemberMap {
        &self.entity().own_properties
    }

    pub fn own_constants(&self) -> &'u MemberMap {
        &self.entity().own_constants
    }

    // ---- Inherited members ----

    pub fn inherited_methods(&self) -> &'u MemberMap {
        &self.universe.inherited_of(self.id).methods
    }

    pub fn inherited_properties(&self) -> &'u MemberMap {
        &self.universe.inherited_of(self.id).properties
    }

    pub fn inherited_constants(&self) -> &'u MemberMap {
        &self.universe.inherited_of(self.id).constants
    }

    // ---- Trait-provided members ----

    /// The full composition result: per-trait contributions, flattened
    /// merge views and any conflicts recovered from.
    pub fn used(&self) -> &'u UsedMembers {
        self.universe.used_of(self.id)
    }

    /// Trait name -> method name -> member with aliases; both levels sorted
    /// case-insensitively.
    pub fn used_methods(&self) -> IndexMap<SmolStr, &'u IndexMap<SmolStr, UsedMember>> {
        self.used()
            .traits
            .iter()
            .map(|(name, contribution)| (name.clone(), &contribution.methods))
            .collect()
    }

    pub fn used_properties(&self) -> IndexMap<SmolStr, &'u IndexMap<SmolStr, UsedMember>> {
        self.used()
            .traits
            .iter()
            .map(|(name, contribution)| (name.clone(), &contribution.properties))
            .collect()
    }

    // ---- Merged member surface ----

    fn merged(&self) -> &'u MergedMembers {
        self.entity()
            .caches
            .merged
            .get_or_init(|| resolve_merged(self.universe, self.id))
    }

    /// Union of own, trait-provided and inherited methods; own shadows
    /// trait-provided shadows inherited on name collisions.
    pub fn all_methods(&self) -> &'u MemberMap {
        &self.merged().methods
    }

    pub fn all_properties(&self) -> &'u MemberMap {
        &self.merged().properties
    }

    pub fn all_constants(&self) -> &'u MemberMap {
        &self.merged().constants
    }

    pub fn method(&self, name: &str) -> Result<&'u Arc<MemberEntity>> {
        self.all_methods()
            .get(name)
            .ok_or_else(|| self.member_not_found(MemberKind::Method, name))
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.all_methods().contains_key(name)
    }

    pub fn property(&self, name: &str) -> Result<&'u Arc<MemberEntity>> {
        self.all_properties()
            .get(name)
            .ok_or_else(|| self.member_not_found(MemberKind::Property, name))
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.all_properties().contains_key(name)
    }

    pub fn constant(&self, name: &str) -> Result<&'u Arc<MemberEntity>> {
        self.all_constants()
            .get(name)
            .ok_or_else(|| self.member_not_found(MemberKind::Constant, name))
    }

    pub fn has_constant(&self, name: &str) -> bool {
        self.all_constants().contains_key(name)
    }

    fn member_not_found(&self, kind: MemberKind, name: &str) -> DocscopeError {
        DocscopeError::MemberNotFound {
            kind,
            name: name.to_string(),
            class: self.name().to_string(),
        }
    }

    // ---- Hierarchy ----

    /// The declared parent after resolution; callers can tell "no parent"
    /// from "parent name not in the universe".
    pub fn parent(&self) -> ParentLink {
        self.universe.parent_link(self.id)
    }

    pub fn parent_class(&self) -> Option<ClassReflection<'u>> {
        match self.parent() {
            ParentLink::Resolved(id) => Some(ClassReflection::new(self.universe, id)),
            _ => None,
        }
    }

    /// Short name of the declared parent, if any.
    pub fn parent_class_name(&self) -> Option<SmolStr> {
        match self.parent() {
            ParentLink::Resolved(id) => {
                Some(SmolStr::new(self.universe.entity(id).short_name()))
            }
            ParentLink::Unresolved(name) => Some(SmolStr::new(split_name(&name).1)),
            ParentLink::None => None,
        }
    }

    /// Resolved ancestors, nearest first. Truncated, never cyclic.
    pub fn parent_classes(&self) -> Vec<ClassReflection<'u>> {
        self.universe
            .ancestors(self.id)
            .chain
            .iter()
            .map(|&id| ClassReflection::new(self.universe, id))
            .collect()
    }

    pub fn is_subclass_of(&self, name: &str) -> bool {
        self.universe.ancestors(self.id).names.contains(&normalize(name))
    }

    /// Steps up the ancestor chain to reach `name`: 0 for the class
    /// itself, 1 for the declared parent, `None` for a non-ancestor.
    pub fn inheritance_distance(&self, name: &str) -> Option<usize> {
        let key = normalize(name);
        if normalize(self.name()) == key {
            return Some(0);
        }
        let resolution = self.universe.ancestors(self.id);
        for (i, &ancestor) in resolution.chain.iter().enumerate() {
            if normalize(self.universe.entity(ancestor).name()) == key {
                return Some(i + 1);
            }
        }
        match &resolution.unresolved_tail {
            Some((_, parent)) if normalize(parent) == key => Some(resolution.chain.len() + 1),
            _ => None,
        }
    }

    /// Classes whose declared parent resolved to this class, sorted
    /// case-insensitively by name.
    pub fn direct_subclasses(&self) -> Vec<ClassReflection<'u>> {
        let mut subclasses: Vec<_> = self
            .universe
            .incoming(self.id, RelationKind::Extends)
            .into_iter()
            .map(|id| ClassReflection::new(self.universe, id))
            .collect();
        subclasses.sort_by(|a, b| ci_cmp(a.name(), b.name()));
        subclasses
    }

    /// Classes with this class somewhere above their declared parent,
    /// sorted case-insensitively by name.
    pub fn indirect_subclasses(&self) -> Vec<ClassReflection<'u>> {
        let own_key = normalize(self.name());
        let mut subclasses = Vec::new();
        for candidate in self.universe.classes() {
            if candidate.id == self.id {
                continue;
            }
            if matches!(candidate.parent(), ParentLink::Resolved(parent) if parent == self.id) {
                continue;
            }
            if candidate.is_subclass_of(&own_key) {
                subclasses.push(candidate);
            }
        }
        subclasses.sort_by(|a, b| ci_cmp(a.name(), b.name()));
        subclasses
    }

    // ---- Interfaces ----

    fn interface_closure(&self) -> &'u InterfaceClosure {
        self.universe.interfaces_of(self.id)
    }

    /// Interface names declared directly on this class, declaration order.
    pub fn own_interface_names(&self) -> &'u [SmolStr] {
        &self.entity().interface_names
    }

    /// Directly declared interfaces that resolve in the universe.
    pub fn own_interfaces(&self) -> Vec<ClassReflection<'u>> {
        self.entity()
            .interface_names
            .iter()
            .filter_map(|name| self.universe.lookup(name))
            .map(|id| ClassReflection::new(self.universe, id))
            .collect()
    }

    /// The transitive interface set: declared, inherited through ancestors,
    /// and extended through interfaces themselves.
    pub fn interface_names(&self) -> &'u [SmolStr] {
        &self.interface_closure().names
    }

    pub fn interfaces(&self) -> Vec<ClassReflection<'u>> {
        self.interface_closure()
            .ids
            .iter()
            .map(|&id| ClassReflection::new(self.universe, id))
            .collect()
    }

    pub fn implements_interface(&self, name: &str) -> bool {
        self.interface_closure().name_set.contains(&normalize(name))
    }

    /// Classes declaring this interface directly, sorted case-insensitively.
    /// Meaningful when this entity is an interface.
    pub fn direct_implementers(&self) -> Vec<ClassReflection<'u>> {
        let mut implementers: Vec<_> = self
            .universe
            .incoming(self.id, RelationKind::Implements)
            .into_iter()
            .map(|id| ClassReflection::new(self.universe, id))
            .filter(|c| c.kind() == TypeKind::Class)
            .collect();
        implementers.sort_by(|a, b| ci_cmp(a.name(), b.name()));
        implementers
    }

    /// Classes reaching this interface only transitively, sorted
    /// case-insensitively.
    pub fn indirect_implementers(&self) -> Vec<ClassReflection<'u>> {
        let direct: HashSet<ClassId> = self
            .universe
            .incoming(self.id, RelationKind::Implements)
            .into_iter()
            .collect();
        let own_key = normalize(self.name());
        let mut implementers = Vec::new();
        for candidate in self.universe.classes_of_kind(TypeKind::Class) {
            if candidate.id == self.id || direct.contains(&candidate.id) {
                continue;
            }
            if candidate.implements_interface(&own_key) {
                implementers.push(candidate);
            }
        }
        implementers.sort_by(|a, b| ci_cmp(a.name(), b.name()));
        implementers
    }

    // ---- Traits ----

    /// Trait names declared in use clauses on this class, declaration
    /// order.
    pub fn trait_names(&self) -> Vec<&'u str> {
        self.entity()
            .trait_uses
            .iter()
            .map(|tu| tu.trait_name.as_str())
            .collect()
    }

    /// Directly used traits that resolve in the universe.
    pub fn traits(&self) -> Vec<ClassReflection<'u>> {
        self.entity()
            .trait_uses
            .iter()
            .filter_map(|tu| self.universe.lookup(&tu.trait_name))
            .map(|id| ClassReflection::new(self.universe, id))
            .collect()
    }

    /// Alias name -> `Trait::method` for every renaming alias declared in
    /// this class's use clauses.
    pub fn trait_aliases(&self) -> BTreeMap<String, String> {
        let mut aliases = BTreeMap::new();
        for trait_use in &self.entity().trait_uses {
            for alias in &trait_use.aliases {
                if let Some(alias_name) = &alias.alias {
                    let source = alias
                        .source_trait
                        .as_ref()
                        .unwrap_or(&trait_use.trait_name);
                    aliases.insert(
                        alias_name.to_string(),
                        format!("{}::{}", source, alias.method),
                    );
                }
            }
        }
        aliases
    }

    /// Whether this class effectively uses the trait: declared on itself,
    /// on an ancestor, or reached through a trait's own uses.
    pub fn uses_trait(&self, name: &str) -> bool {
        self.entity()
            .caches
            .trait_closure
            .get_or_init(|| resolve_trait_closure(self.universe, self.id))
            .contains(&normalize(name))
    }

    /// Classes and traits with a direct use clause for this trait, sorted
    /// case-insensitively. Meaningful when this entity is a trait.
    pub fn direct_users(&self) -> Vec<ClassReflection<'u>> {
        let mut users: Vec<_> = self
            .universe
            .incoming(self.id, RelationKind::Uses)
            .into_iter()
            .map(|id| ClassReflection::new(self.universe, id))
            .collect();
        users.sort_by(|a, b| ci_cmp(a.name(), b.name()));
        users
    }

    // ---- Diagnostics ----

    /// Findings recovered while resolving this class's hierarchy and trait
    /// composition. Forces both resolutions.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut out = Vec::new();
        if let Some(cycle) = &self.universe.ancestors(self.id).cycle {
            out.push(cycle.clone());
        }
        out.extend(self.used().diagnostics.iter().cloned());
        out
    }
}
