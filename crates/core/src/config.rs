use smol_str::SmolStr;

/// Knobs for how the model is built and queried. Explicitly constructed and
/// injected into the universe builder; no global state.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Doc-comment tags that mark a declaration as deprecated.
    pub deprecated_tags: Vec<SmolStr>,
    /// Whether ancestors' private members show up in inherited views.
    pub inherit_private: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            deprecated_tags: vec![SmolStr::new_static(docscope_api::models::DEPRECATED_TAG)],
            inherit_private: false,
        }
    }
}
