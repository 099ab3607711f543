use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::docblock::DocBlock;

/// Kind of a declared type in the reflected universe.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Class,
    Interface,
    Trait,
}

impl TypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
            TypeKind::Trait => "trait",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a class member.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Method,
    Property,
    Constant,
}

impl MemberKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberKind::Method => "method",
            MemberKind::Property => "property",
            MemberKind::Constant => "constant",
        }
    }
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One class-like declaration as handed over by a source reflector.
///
/// Names are fully qualified (`App\Entity\User`); a leading backslash is
/// tolerated. Member lists are in declaration order.
#[derive(Serialize, Deserialize, Debug, Clone, JsonSchema)]
pub struct RawClassDeclaration {
    pub name: String,
    pub kind: TypeKind,
    pub is_abstract: bool,
    pub is_final: bool,
    pub parent_name: Option<String>,
    pub interface_names: Vec<String>,
    pub trait_uses: Vec<RawTraitUse>,
    pub methods: Vec<RawMethod>,
    pub properties: Vec<RawProperty>,
    pub constants: Vec<RawConstant>,

    // --- Physical location ---
    pub file_name: String,
    pub start_line: u32,
    pub end_line: u32,

    pub doc: DocBlock,

    // --- Extension point ---
    #[serde(default = "empty_metadata")]
    pub metadata: serde_json::Value,
}

fn empty_metadata() -> serde_json::Value {
    serde_json::Value::Null
}

impl RawClassDeclaration {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            is_abstract: false,
            is_final: false,
            parent_name: None,
            interface_names: Vec::new(),
            trait_uses: Vec::new(),
            methods: Vec::new(),
            properties: Vec::new(),
            constants: Vec::new(),
            file_name: String::new(),
            start_line: 0,
            end_line: 0,
            doc: DocBlock::default(),
            metadata: serde_json::Value::Null,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, JsonSchema)]
pub struct RawMethod {
    pub name: String,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_final: bool,
    pub parameters: Vec<RawParameter>,
    pub return_type: Option<String>,
    pub start_line: u32,
    pub end_line: u32,
    pub doc: DocBlock,
}

impl RawMethod {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            is_static: false,
            is_abstract: false,
            is_final: false,
            parameters: Vec::new(),
            return_type: None,
            start_line: 0,
            end_line: 0,
            doc: DocBlock::default(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, JsonSchema)]
pub struct RawParameter {
    pub name: String,
    pub type_hint: Option<String>,
    pub default: Option<String>,
    pub by_reference: bool,
    pub variadic: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, JsonSchema)]
pub struct RawProperty {
    pub name: String,
    pub visibility: Visibility,
    pub is_static: bool,
    pub type_hint: Option<String>,
    pub default: Option<String>,
    pub doc: DocBlock,
}

impl RawProperty {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            is_static: false,
            type_hint: None,
            default: None,
            doc: DocBlock::default(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, JsonSchema)]
pub struct RawConstant {
    pub name: String,
    pub visibility: Visibility,
    pub value: String,
    pub doc: DocBlock,
}

impl RawConstant {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            value: value.into(),
            doc: DocBlock::default(),
        }
    }
}

/// One `use Trait` clause with the alias/precedence directives that apply
/// to it. Precedence directives hang off the *winning* trait's clause:
/// `Winner::m insteadof LoserA, LoserB`.
#[derive(Serialize, Deserialize, Debug, Clone, JsonSchema)]
pub struct RawTraitUse {
    pub trait_name: String,
    pub aliases: Vec<RawTraitAlias>,
    pub precedences: Vec<RawTraitPrecedence>,
}

impl RawTraitUse {
    pub fn new(trait_name: impl Into<String>) -> Self {
        Self {
            trait_name: trait_name.into(),
            aliases: Vec::new(),
            precedences: Vec::new(),
        }
    }
}

/// `Trait::method as [visibility] alias`. An unqualified source leaves
/// `source_trait` empty; a visibility-only adaptation leaves `alias` empty.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct RawTraitAlias {
    pub source_trait: Option<String>,
    pub method: String,
    pub alias: Option<String>,
    pub visibility: Option<Visibility>,
}

/// `Winner::method insteadof losers...` — the winner is the trait use this
/// directive is attached to.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct RawTraitPrecedence {
    pub method: String,
    pub losers: Vec<String>,
}
