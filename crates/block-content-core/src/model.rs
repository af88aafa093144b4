//! Block content document model
//!
//! A document is a flat sequence of [`Block`]s. Text blocks (`_type: "block"`)
//! carry inline [`Child`]ren, which are either text [`Span`]s or inline
//! objects. Every other `_type` is a custom block whose payload lives in
//! [`Block::fields`].

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `_type` of a regular text block
pub const BLOCK_TYPE: &str = "block";

/// `_type` of a text span
pub const SPAN_TYPE: &str = "span";

/// A top-level block, or an inline object nested in a block's children
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Declared type, used for serializer lookup
    #[serde(rename = "_type")]
    pub type_name: String,

    /// Stable identity key
    #[serde(rename = "_key", default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Block style (`normal`, `h1`..`h6`, `blockquote`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,

    /// Inline content
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Child>,

    /// Annotation definitions referenced by key from span marks
    #[serde(rename = "markDefs", default, skip_serializing_if = "Vec::is_empty")]
    pub mark_defs: Vec<MarkDef>,

    /// List type (`bullet`, `number`, ...) when this block is a list item
    #[serde(rename = "listItem", default, skip_serializing_if = "Option::is_none")]
    pub list_item: Option<String>,

    /// List nesting level, starting at 1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,

    /// Any other fields (custom block payloads such as `asset`)
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Block {
    /// Create an empty block of the given type
    pub fn new(type_name: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
            key: None,
            style: None,
            children: Vec::new(),
            mark_defs: Vec::new(),
            list_item: None,
            level: None,
            fields: Map::new(),
        }
    }

    /// Create a text block with the given children
    pub fn text(children: Vec<Child>) -> Self {
        Self {
            children,
            ..Self::new(BLOCK_TYPE)
        }
    }

    pub fn with_key(mut self, key: &str) -> Self {
        self.key = Some(key.to_string());
        self
    }

    pub fn with_style(mut self, style: &str) -> Self {
        self.style = Some(style.to_string());
        self
    }

    pub fn with_mark_def(mut self, def: MarkDef) -> Self {
        self.mark_defs.push(def);
        self
    }

    /// Mark this block as a list item of the given type and level
    pub fn with_list_item(mut self, list_type: &str, level: u32) -> Self {
        self.list_item = Some(list_type.to_string());
        self.level = Some(level);
        self
    }

    pub fn with_field(mut self, name: &str, value: Value) -> Self {
        self.fields.insert(name.to_string(), value);
        self
    }

    /// Check if this block belongs to a list
    pub fn is_list_item(&self) -> bool {
        self.list_item.is_some()
    }

    /// List nesting level, defaulting to 1
    pub fn level(&self) -> u32 {
        self.level.unwrap_or(1)
    }

    /// Get an extra field by name
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// A text span with a set of mark keys
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    #[serde(rename = "_type", default = "span_type")]
    pub type_name: String,

    #[serde(rename = "_key", default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    pub text: String,

    /// Decorator names (`strong`, `em`, ...) or `markDefs` keys
    #[serde(default)]
    pub marks: Vec<String>,
}

fn span_type() -> String {
    SPAN_TYPE.to_string()
}

impl Span {
    pub fn new(text: &str) -> Self {
        Self {
            type_name: span_type(),
            key: None,
            text: text.to_string(),
            marks: Vec::new(),
        }
    }

    pub fn with_key(mut self, key: &str) -> Self {
        self.key = Some(key.to_string());
        self
    }

    pub fn with_marks(mut self, marks: &[&str]) -> Self {
        self.marks = marks.iter().map(|m| m.to_string()).collect();
        self
    }
}

/// Inline content of a block
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Child {
    /// Text span
    Span(Span),
    /// Inline object, rendered through the block serializers
    Inline(Block),
}

impl Child {
    /// Marks applied to this child (inline objects carry none)
    pub fn marks(&self) -> &[String] {
        match self {
            Child::Span(span) => &span.marks,
            Child::Inline(_) => &[],
        }
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            Child::Span(span) => span.key.as_deref(),
            Child::Inline(block) => block.key.as_deref(),
        }
    }
}

impl From<Span> for Child {
    fn from(span: Span) -> Self {
        Child::Span(span)
    }
}

impl From<Block> for Child {
    fn from(block: Block) -> Self {
        Child::Inline(block)
    }
}

impl<'de> Deserialize<'de> for Child {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;

        // A text span is `_type: "span"` with string text; anything else is an inline object
        let is_span = value.get("_type").and_then(Value::as_str) == Some(SPAN_TYPE)
            && value.get("text").is_some_and(Value::is_string);

        if is_span {
            serde_json::from_value(value)
                .map(Child::Span)
                .map_err(de::Error::custom)
        } else {
            serde_json::from_value(value)
                .map(Child::Inline)
                .map_err(de::Error::custom)
        }
    }
}

/// An annotation definition (link, custom annotation) referenced by key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkDef {
    #[serde(rename = "_key")]
    pub key: String,

    #[serde(rename = "_type")]
    pub type_name: String,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl MarkDef {
    pub fn new(key: &str, type_name: &str) -> Self {
        Self {
            key: key.to_string(),
            type_name: type_name.to_string(),
            fields: Map::new(),
        }
    }

    pub fn with_field(mut self, name: &str, value: Value) -> Self {
        self.fields.insert(name.to_string(), value);
        self
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Get a string field (e.g. `href`)
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_text_block() {
        let block: Block = serde_json::from_value(json!({
            "_type": "block",
            "_key": "a1",
            "style": "h2",
            "markDefs": [{"_key": "l1", "_type": "link", "href": "https://example.com"}],
            "children": [
                {"_type": "span", "_key": "s1", "text": "Hello", "marks": ["strong", "l1"]}
            ]
        }))
        .unwrap();

        assert_eq!(block.type_name, "block");
        assert_eq!(block.key.as_deref(), Some("a1"));
        assert_eq!(block.style.as_deref(), Some("h2"));
        assert_eq!(block.mark_defs[0].str_field("href"), Some("https://example.com"));
        assert_eq!(
            block.children,
            vec![Child::Span(
                Span::new("Hello").with_key("s1").with_marks(&["strong", "l1"])
            )]
        );
    }

    #[test]
    fn test_deserialize_inline_object() {
        let block: Block = serde_json::from_value(json!({
            "_type": "block",
            "children": [
                {"_type": "span", "text": "See "},
                {"_type": "image", "_key": "img", "asset": {"url": "https://example.com/a.png"}}
            ]
        }))
        .unwrap();

        match &block.children[1] {
            Child::Inline(inline) => {
                assert_eq!(inline.type_name, "image");
                assert_eq!(inline.key.as_deref(), Some("img"));
                assert!(inline.field("asset").is_some());
            }
            other => panic!("expected inline object, got {:?}", other),
        }
    }

    #[test]
    fn test_span_without_text_is_inline_object() {
        let child: Child = serde_json::from_value(json!({"_type": "span", "marks": []})).unwrap();
        assert!(matches!(child, Child::Inline(_)));
    }

    #[test]
    fn test_custom_block_keeps_fields() {
        let block: Block = serde_json::from_value(json!({
            "_type": "youtube",
            "url": "https://youtu.be/x"
        }))
        .unwrap();

        assert_eq!(block.type_name, "youtube");
        assert!(block.children.is_empty());
        assert_eq!(block.field("url"), Some(&json!("https://youtu.be/x")));
    }

    #[test]
    fn test_list_item_level_defaults_to_one() {
        let mut block = Block::text(vec![]).with_list_item("bullet", 2);
        assert!(block.is_list_item());
        assert_eq!(block.level(), 2);
        block.level = None;
        assert_eq!(block.level(), 1);
    }
}
