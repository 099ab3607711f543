use docscope_api::models::{DocBlock, MemberKind, Visibility};
use indexmap::IndexMap;
use smol_str::SmolStr;
use std::sync::Arc;

/// Member name -> entity, in declaration order. Entities are shared between
/// the own/used/inherited/merged views, so the map holds `Arc`s.
pub type MemberMap = IndexMap<SmolStr, Arc<MemberEntity>>;

/// One reflected member. Methods, properties and constants share the same
/// record with a kind-specific payload so merge logic stays generic across
/// the three kinds.
///
/// `declaring_class` is the class whose own declaration introduced the
/// member; it never changes when the member becomes visible through a
/// subclass or a using class.
#[derive(Debug, Clone)]
pub struct MemberEntity {
    pub name: SmolStr,
    pub declaring_class: SmolStr,
    pub visibility: Visibility,
    pub is_static: bool,
    pub doc: DocBlock,
    pub detail: MemberDetail,
}

#[derive(Debug, Clone)]
pub enum MemberDetail {
    Method {
        is_abstract: bool,
        is_final: bool,
        parameters: Vec<Parameter>,
        return_type: Option<SmolStr>,
        start_line: u32,
        end_line: u32,
    },
    Property {
        type_hint: Option<SmolStr>,
        default: Option<String>,
    },
    Constant {
        value: String,
    },
}

#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: SmolStr,
    pub type_hint: Option<SmolStr>,
    pub default: Option<String>,
    pub by_reference: bool,
    pub variadic: bool,
}

impl MemberEntity {
    pub fn kind(&self) -> MemberKind {
        match self.detail {
            MemberDetail::Method { .. } => MemberKind::Method,
            MemberDetail::Property { .. } => MemberKind::Property,
            MemberDetail::Constant { .. } => MemberKind::Constant,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declaring_class_name(&self) -> &str {
        &self.declaring_class
    }

    pub fn annotation(&self, name: &str) -> &[String] {
        self.doc.tags_by_name(name)
    }

    pub fn has_annotation(&self, name: &str) -> bool {
        self.doc.has_tag(name)
    }

    pub fn is_deprecated(&self) -> bool {
        self.doc.is_deprecated()
    }

    pub fn description(&self) -> String {
        self.doc.full_description()
    }
}
