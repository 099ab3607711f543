pub mod declaration;
pub mod docblock;

pub use declaration::{
    MemberKind, RawClassDeclaration, RawConstant, RawMethod, RawParameter, RawProperty,
    RawTraitAlias, RawTraitPrecedence, RawTraitUse, TypeKind, Visibility,
};
pub use docblock::{DEPRECATED_TAG, DocBlock};
