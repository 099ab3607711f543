use crate::models::RawClassDeclaration;

/// Source of raw class declarations, typically backed by a source
/// reflector. The universe is populated by draining `declarations()` once;
/// `declaration_for` serves ad-hoc single-class lookups.
pub trait DeclarationProvider: Send + Sync {
    /// All declarations discovered in the project, in discovery order.
    fn declarations(&self) -> Vec<RawClassDeclaration>;

    /// The declaration for one class, matched case-insensitively and
    /// ignoring a leading backslash.
    fn declaration_for(&self, name: &str) -> Option<RawClassDeclaration>;
}

/// Provider over a fixed, in-memory declaration list.
#[derive(Debug, Clone, Default)]
pub struct StaticDeclarations {
    decls: Vec<RawClassDeclaration>,
}

impl StaticDeclarations {
    pub fn new(decls: Vec<RawClassDeclaration>) -> Self {
        Self { decls }
    }

    pub fn push(&mut self, decl: RawClassDeclaration) {
        self.decls.push(decl);
    }
}

impl DeclarationProvider for StaticDeclarations {
    fn declarations(&self) -> Vec<RawClassDeclaration> {
        self.decls.clone()
    }

    fn declaration_for(&self, name: &str) -> Option<RawClassDeclaration> {
        let key = name.trim_start_matches('\\').to_lowercase();
        self.decls
            .iter()
            .find(|d| d.name.trim_start_matches('\\').to_lowercase() == key)
            .cloned()
    }
}
