pub mod entity;
pub mod member;
pub mod transform;

pub use entity::{
    ClassEntity, ParentLink, TraitAliasEntity, TraitPrecedenceEntity, TraitUseEntity,
};
pub use member::{MemberDetail, MemberEntity, MemberMap, Parameter};
