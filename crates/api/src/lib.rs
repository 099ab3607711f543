pub mod models;
pub mod provider;

// Re-export commonly used types
pub use models::*;
pub use provider::{DeclarationProvider, StaticDeclarations};
