use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tag name marking a declaration as deprecated.
pub const DEPRECATED_TAG: &str = "deprecated";

/// Structured doc-comment attached to a declaration: the summary/description
/// split plus the tag set (tag name -> raw tag bodies, one entry per
/// occurrence). Produced by an external doc-comment parser; the core never
/// sees raw comment text.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, JsonSchema)]
pub struct DocBlock {
    pub summary: String,
    pub description: String,
    pub tags: BTreeMap<String, Vec<String>>,
}

impl DocBlock {
    pub fn new(summary: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            description: description.into(),
            tags: BTreeMap::new(),
        }
    }

    pub fn with_tag(mut self, name: impl Into<String>, body: impl Into<String>) -> Self {
        self.tags.entry(name.into()).or_default().push(body.into());
        self
    }

    /// All bodies recorded for a tag, empty when the tag is absent.
    pub fn tags_by_name(&self, name: &str) -> &[String] {
        self.tags.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.contains_key(name)
    }

    pub fn is_deprecated(&self) -> bool {
        self.has_tag(DEPRECATED_TAG)
    }

    /// Summary and long description joined by an empty line, trimmed.
    pub fn full_description(&self) -> String {
        format!("{}\n\n{}", self.summary, self.description)
            .trim()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_by_name_is_empty_for_unknown_tag() {
        let doc = DocBlock::default();
        assert!(doc.tags_by_name("author").is_empty());
        assert!(!doc.has_tag("author"));
    }

    #[test]
    fn deprecated_tag_is_recognized() {
        let doc = DocBlock::new("Old API.", "").with_tag(DEPRECATED_TAG, "use NewApi instead");
        assert!(doc.is_deprecated());
        assert_eq!(doc.tags_by_name(DEPRECATED_TAG), ["use NewApi instead"]);
    }

    #[test]
    fn full_description_joins_and_trims() {
        let doc = DocBlock::new("Summary.", "Longer text.");
        assert_eq!(doc.full_description(), "Summary.\n\nLonger text.");

        let summary_only = DocBlock::new("Summary.", "");
        assert_eq!(summary_only.full_description(), "Summary.");

        let empty = DocBlock::default();
        assert_eq!(empty.full_description(), "");
    }
}
