//! Serialization context passed to every serializer.

use block_content_core::{Block, List, ListItem, Mark, SpanNode, SPAN_TYPE};

use crate::builder::{ElementBuilder, Props};
use crate::options::Options;
use crate::serializers::Serializers;

/// The node a serializer is asked to render
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    /// Top-level block or inline object
    Block(&'a Block),
    /// Marked span node
    Span(&'a SpanNode),
    List(&'a List),
    ListItem(&'a ListItem),
    HardBreak,
    /// Wrapper around all top-level nodes
    Container,
}

impl<'a> NodeRef<'a> {
    /// Type name used for block dispatch and error messages
    pub fn type_name(&self) -> &'a str {
        match *self {
            NodeRef::Block(block) => &block.type_name,
            NodeRef::Span(_) => SPAN_TYPE,
            NodeRef::List(_) => "list",
            NodeRef::ListItem(item) => &item.block.type_name,
            NodeRef::HardBreak => "hardBreak",
            NodeRef::Container => "container",
        }
    }

    pub fn as_block(&self) -> Option<&'a Block> {
        match *self {
            NodeRef::Block(block) => Some(block),
            NodeRef::ListItem(item) => Some(&item.block),
            _ => None,
        }
    }

    pub fn as_span(&self) -> Option<&'a SpanNode> {
        match *self {
            NodeRef::Span(span) => Some(span),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&'a List> {
        match *self {
            NodeRef::List(list) => Some(list),
            _ => None,
        }
    }
}

/// Per-invocation bag handed to a serializer.
///
/// Block, list and span serializers receive their children already
/// serialized in [`SerializeContext::children`], in document order.
pub struct SerializeContext<'a, B: ElementBuilder> {
    /// Element builder
    pub h: &'a B,
    pub node: NodeRef<'a>,
    /// Active registry, read-only for the whole render
    pub serializers: &'a Serializers<B>,
    pub options: &'a Options,
    /// Rendering inside a block's inline content
    pub is_inline: bool,
    pub children: Vec<B::Node>,
    /// Identity key for the produced node
    pub key: Option<String>,
    /// Position among siblings
    pub index: usize,
}

impl<'a, B: ElementBuilder> SerializeContext<'a, B> {
    pub fn block(&self) -> Option<&'a Block> {
        self.node.as_block()
    }

    pub fn span(&self) -> Option<&'a SpanNode> {
        self.node.as_span()
    }

    /// Mark of the span being rendered
    pub fn mark(&self) -> Option<&'a Mark> {
        self.span().and_then(|span| span.mark.as_ref())
    }

    /// List type (`bullet`, `number`, ...) of the list being rendered
    pub fn list_type(&self) -> Option<&'a str> {
        self.node.as_list().map(|list| list.list_type.as_str())
    }

    /// Wrap the serialized children in a `tag` element
    pub fn wrap(self, tag: &str, props: Props) -> B::Node {
        self.h.element(tag, props, self.children)
    }
}

impl<B: ElementBuilder> std::fmt::Debug for SerializeContext<'_, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerializeContext")
            .field("node", &self.node)
            .field("is_inline", &self.is_inline)
            .field("children", &self.children)
            .field("key", &self.key)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}
