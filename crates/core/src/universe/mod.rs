//! The universe index: the registry of every discovered class, interface
//! and trait, frozen after a single population pass.
//!
//! The topology is a stable graph whose nodes own the class entities and
//! whose edges record resolved Extends/Implements/Uses relations, so
//! cross-class references are plain index lookups and cannot form an
//! ownership cycle. Names are interned; lookups are case-insensitive and
//! ignore a leading backslash.

pub mod builder;

pub use builder::UniverseBuilder;

use docscope_api::models::TypeKind;
use lasso::RodeoReader;
use petgraph::Direction;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use regex::RegexBuilder;
use std::collections::HashMap;

use crate::config::ModelConfig;
use crate::diagnostics::Diagnostic;
use crate::error::{DocscopeError, Result};
use crate::facade::ClassReflection;
use crate::model::entity::{ClassEntity, ParentLink};
use crate::resolve::hierarchy::{
    AncestorResolution, InheritedMembers, InterfaceClosure, resolve_ancestors,
    resolve_inherited, resolve_interfaces,
};
use crate::resolve::traits::{UsedMembers, resolve_used};

/// Stable handle of a class entity within one universe.
pub type ClassId = NodeIndex;

/// Interned normalized class name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol(pub(crate) lasso::Spur);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    Extends,
    Implements,
    Uses,
}

#[derive(Debug, Clone)]
pub struct RelationEdge {
    pub kind: RelationKind,
}

/// Lookup key for a class name: leading backslash stripped, lowercased
/// (class names are case-insensitive in the reflected language).
pub fn normalize(name: &str) -> String {
    name.trim_start_matches('\\').to_lowercase()
}

/// The frozen, read-only class registry. Cheap to share between readers;
/// the only writes after construction are the one-shot cache fills on the
/// entities themselves.
pub struct Universe {
    pub(crate) topology: StableDiGraph<ClassEntity, RelationEdge>,
    pub(crate) symbols: RodeoReader,
    pub(crate) fqn_index: HashMap<Symbol, NodeIndex>,
    pub(crate) config: ModelConfig,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl Universe {
    pub fn builder() -> UniverseBuilder {
        UniverseBuilder::new()
    }

    /// One-shot population from a declaration provider. Structural problems
    /// in individual declarations become diagnostics, never a failure of
    /// the whole universe.
    pub fn from_provider(provider: &dyn docscope_api::provider::DeclarationProvider) -> Self {
        let mut builder = UniverseBuilder::new();
        for raw in provider.declarations() {
            builder.add_declaration(raw);
        }
        builder.build()
    }

    pub fn len(&self) -> usize {
        self.topology.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.topology.node_count() == 0
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Findings collected while the universe was populated.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<ClassReflection<'_>> {
        self.lookup(name).map(|id| ClassReflection::new(self, id))
    }

    pub fn class(&self, name: &str) -> Result<ClassReflection<'_>> {
        self.get(name)
            .ok_or_else(|| DocscopeError::ClassNotFound(name.to_string()))
    }

    /// All registered entities, in registration order.
    pub fn classes(&self) -> impl Iterator<Item = ClassReflection<'_>> {
        self.topology
            .node_indices()
            .map(move |id| ClassReflection::new(self, id))
    }

    pub fn classes_of_kind(&self, kind: TypeKind) -> impl Iterator<Item = ClassReflection<'_>> {
        self.classes().filter(move |c| c.kind() == kind)
    }

    /// Case-insensitive pattern search over qualified and short names,
    /// optionally restricted by kind, capped at `limit` results.
    pub fn find(
        &self,
        pattern: &str,
        kinds: &[TypeKind],
        limit: usize,
    ) -> Result<Vec<ClassReflection<'_>>> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| DocscopeError::InvalidPattern(e.to_string()))?;

        let mut matches = Vec::new();
        for id in self.topology.node_indices() {
            let entity = &self.topology[id];
            if regex.is_match(entity.name()) || regex.is_match(entity.short_name()) {
                if kinds.is_empty() || kinds.contains(&entity.kind()) {
                    matches.push(ClassReflection::new(self, id));
                }
            }
            if matches.len() >= limit {
                break;
            }
        }
        Ok(matches)
    }

    // ---- Internal lookups ----

    pub(crate) fn lookup(&self, name: &str) -> Option<ClassId> {
        let key = self.symbols.get(&normalize(name))?;
        self.fqn_index.get(&Symbol(key)).copied()
    }

    pub(crate) fn entity(&self, id: ClassId) -> &ClassEntity {
        &self.topology[id]
    }

    /// The declared parent after index resolution: a resolved edge, a
    /// declared-but-unknown name, or nothing.
    pub(crate) fn parent_link(&self, id: ClassId) -> ParentLink {
        for edge in self.topology.edges_directed(id, Direction::Outgoing) {
            if edge.weight().kind == RelationKind::Extends {
                return ParentLink::Resolved(edge.target());
            }
        }
        match &self.entity(id).parent_name {
            Some(name) => ParentLink::Unresolved(name.clone()),
            None => ParentLink::None,
        }
    }

    /// Nodes pointing at `id` through an edge of the given kind. Order is
    /// unspecified; callers sort.
    pub(crate) fn incoming(&self, id: ClassId, kind: RelationKind) -> Vec<ClassId> {
        self.topology
            .edges_directed(id, Direction::Incoming)
            .filter(|e| e.weight().kind == kind)
            .map(|e| e.source())
            .collect()
    }

    // ---- Cached per-entity resolutions ----

    pub(crate) fn ancestors(&self, id: ClassId) -> &AncestorResolution {
        self.entity(id)
            .caches
            .ancestors
            .get_or_init(|| resolve_ancestors(self, id))
    }

    pub(crate) fn interfaces_of(&self, id: ClassId) -> &InterfaceClosure {
        self.entity(id)
            .caches
            .interfaces
            .get_or_init(|| resolve_interfaces(self, id))
    }

    pub(crate) fn used_of(&self, id: ClassId) -> &UsedMembers {
        self.entity(id)
            .caches
            .used
            .get_or_init(|| resolve_used(self, id))
    }

    pub(crate) fn inherited_of(&self, id: ClassId) -> &InheritedMembers {
        self.entity(id)
            .caches
            .inherited
            .get_or_init(|| resolve_inherited(self, id))
    }
}
