//! Element builder abstraction.
//!
//! The renderer never constructs output nodes itself. Everything goes through
//! an [`ElementBuilder`], the hyperscript-style `h(tag, props, children)`
//! primitive, so the same serializers can target HTML strings, virtual DOM
//! trees or anything else.

use indexmap::IndexMap;

use crate::context::SerializeContext;
use crate::serializers::Serializer;
use crate::Result;

/// Property bag passed to [`ElementBuilder::element`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Props {
    /// Identity key (not rendered as an attribute)
    pub key: Option<String>,
    pub attributes: IndexMap<String, String>,
    /// Inline style declarations, CSS property names
    pub style: IndexMap<String, String>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    pub fn style(mut self, property: &str, value: impl Into<String>) -> Self {
        self.style.insert(property.to_string(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.key.is_none() && self.attributes.is_empty() && self.style.is_empty()
    }
}

/// Constructs output nodes, one call per element
pub trait ElementBuilder: Send + Sync + Sized {
    /// Output node type
    type Node: Clone + std::fmt::Debug;

    /// Build an element from a tag name
    fn element(&self, tag: &str, props: Props, children: Vec<Self::Node>) -> Self::Node;

    /// Build a text leaf
    fn text(&self, text: &str) -> Self::Node;

    /// Attach an identity key to a node built by a serializer
    fn keyed(&self, node: Self::Node, _key: &str) -> Self::Node {
        node
    }

    /// Build a node from a serializer component.
    ///
    /// The default runs the serializer and applies the context's key to the
    /// result. Builders that defer component rendering can override this.
    fn component(
        &self,
        serializer: &dyn Serializer<Self>,
        ctx: SerializeContext<'_, Self>,
    ) -> Result<Self::Node> {
        let key = ctx.key.clone();
        let node = serializer.serialize(ctx)?;
        Ok(match key {
            Some(key) => self.keyed(node, &key),
            None => node,
        })
    }
}
