use docscope_api::models::MemberKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocscopeError {
    #[error("malformed declaration in \"{class}\": {detail}")]
    MalformedDeclaration { class: String, detail: String },
    #[error("class not found: {0}")]
    ClassNotFound(String),
    #[error("{kind} \"{name}\" does not exist in class \"{class}\"")]
    MemberNotFound {
        kind: MemberKind,
        name: String,
        class: String,
    },
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
}

pub type Result<T> = std::result::Result<T, DocscopeError>;
