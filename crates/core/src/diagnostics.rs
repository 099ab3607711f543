use serde::Serialize;
use smol_str::SmolStr;
use std::fmt;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// A recovered, per-class finding. Diagnostics never abort population or
/// resolution of other classes; they are collected and exposed so callers
/// can report them.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A raw declaration was missing required identity fields; the class
    /// was skipped.
    MalformedDeclaration { class: SmolStr, detail: String },
    /// A second declaration for an already-registered name; first one wins.
    DuplicateClass { class: SmolStr },
    /// Two traits contribute the same unresolved member name; the
    /// first-declared trait's version was kept.
    TraitConflict {
        class: SmolStr,
        member: SmolStr,
        kept: SmolStr,
        dropped: SmolStr,
    },
    /// The ancestor walk revisited a class; the chain was truncated at the
    /// point of detection.
    HierarchyCycle {
        class: SmolStr,
        repeated: SmolStr,
        chain: Vec<SmolStr>,
    },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::MalformedDeclaration { .. } | Diagnostic::DuplicateClass { .. } => {
                Severity::Error
            }
            Diagnostic::TraitConflict { .. } | Diagnostic::HierarchyCycle { .. } => {
                Severity::Warning
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MalformedDeclaration { class, detail } => {
                write!(f, "malformed declaration in \"{class}\": {detail}")
            }
            Diagnostic::DuplicateClass { class } => {
                write!(f, "duplicate declaration of \"{class}\"; keeping the first")
            }
            Diagnostic::TraitConflict {
                class,
                member,
                kept,
                dropped,
            } => write!(
                f,
                "trait conflict in \"{class}\": \"{member}\" is declared by both \"{kept}\" and \"{dropped}\"; keeping \"{kept}\""
            ),
            Diagnostic::HierarchyCycle {
                class,
                repeated,
                chain,
            } => write!(
                f,
                "hierarchy cycle while resolving \"{class}\": \"{repeated}\" reappears after [{}]",
                chain.join(", ")
            ),
        }
    }
}
