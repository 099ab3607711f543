use docscope_api::models::RawClassDeclaration;
use lasso::Rodeo;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use std::collections::HashMap;
use tracing::warn;

use crate::config::ModelConfig;
use crate::diagnostics::Diagnostic;
use crate::error::DocscopeError;
use crate::model::entity::ClassEntity;
use crate::model::transform::transform_class;
use crate::universe::{RelationEdge, RelationKind, Symbol, Universe, normalize};

/// Accumulates validated declarations, then freezes them into a
/// [`Universe`] in a second pass that links resolvable relations.
pub struct UniverseBuilder {
    topology: StableDiGraph<ClassEntity, RelationEdge>,
    symbols: Rodeo,
    fqn_index: HashMap<Symbol, NodeIndex>,
    diagnostics: Vec<Diagnostic>,
    config: ModelConfig,
}

impl Default for UniverseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl UniverseBuilder {
    pub fn new() -> Self {
        Self::with_config(ModelConfig::default())
    }

    pub fn with_config(config: ModelConfig) -> Self {
        Self {
            topology: StableDiGraph::new(),
            symbols: Rodeo::default(),
            fqn_index: HashMap::new(),
            diagnostics: Vec::new(),
            config,
        }
    }

    /// Validate and register one declaration. A malformed or duplicate
    /// declaration is recorded as a diagnostic and skipped; population of
    /// the remaining classes continues.
    pub fn add_declaration(&mut self, raw: RawClassDeclaration) {
        let entity = match transform_class(raw) {
            Ok(entity) => entity,
            Err(DocscopeError::MalformedDeclaration { class, detail }) => {
                warn!(class = %class, detail = %detail, "skipping malformed declaration");
                self.diagnostics.push(Diagnostic::MalformedDeclaration {
                    class: class.into(),
                    detail,
                });
                return;
            }
            Err(other) => {
                warn!(error = %other, "skipping declaration");
                return;
            }
        };

        let key = Symbol(self.symbols.get_or_intern(normalize(entity.name())));
        if self.fqn_index.contains_key(&key) {
            warn!(class = %entity.name(), "duplicate class declaration; keeping the first");
            self.diagnostics.push(Diagnostic::DuplicateClass {
                class: entity.fqn.clone(),
            });
            return;
        }

        let id = self.topology.add_node(entity);
        self.fqn_index.insert(key, id);
    }

    /// Freeze the universe: resolve declared parent/interface/trait names
    /// against the registry and materialize them as edges. Names that do
    /// not resolve simply get no edge; they stay observable as declared
    /// strings on the entities.
    pub fn build(mut self) -> Universe {
        let mut edges: Vec<(NodeIndex, NodeIndex, RelationKind)> = Vec::new();
        for id in self.topology.node_indices() {
            let entity = &self.topology[id];
            if let Some(parent) = &entity.parent_name {
                if let Some(target) = self.lookup(parent) {
                    edges.push((id, target, RelationKind::Extends));
                }
            }
            for interface in &entity.interface_names {
                if let Some(target) = self.lookup(interface) {
                    edges.push((id, target, RelationKind::Implements));
                }
            }
            for trait_use in &entity.trait_uses {
                if let Some(target) = self.lookup(&trait_use.trait_name) {
                    edges.push((id, target, RelationKind::Uses));
                }
            }
        }
        for (from, to, kind) in edges {
            self.topology.add_edge(from, to, RelationEdge { kind });
        }

        Universe {
            topology: self.topology,
            symbols: self.symbols.into_reader(),
            fqn_index: self.fqn_index,
            config: self.config,
            diagnostics: self.diagnostics,
        }
    }

    fn lookup(&self, name: &str) -> Option<NodeIndex> {
        let key = self.symbols.get(&normalize(name))?;
        self.fqn_index.get(&Symbol(key)).copied()
    }
}
