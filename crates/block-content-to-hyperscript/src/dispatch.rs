//! Block and span dispatch.
//!
//! [`block_serializer`] and [`span_serializer`] are the default `block` and
//! `span` slots of the registry: they resolve the type-specific serializer
//! and hand it the context unchanged. [`Renderer`] does the recursion,
//! serializing children before their parent is dispatched.

use block_content_core::{build_marks_tree, Block, List, ListItem, Node, SpanChild};
use tracing::trace;

use crate::builder::ElementBuilder;
use crate::context::{NodeRef, SerializeContext};
use crate::options::Options;
use crate::serializers::Serializers;
use crate::{RenderError, Result};

/// Dispatch a block to `serializers.types[node._type]`
pub fn block_serializer<B: ElementBuilder>(ctx: SerializeContext<'_, B>) -> Result<B::Node> {
    let block_type = ctx.node.type_name();
    let serializers = ctx.serializers;
    let serializer = serializers
        .types
        .get(block_type)
        .ok_or_else(|| RenderError::UnknownBlockType(block_type.to_string()))?;

    trace!(block_type, is_inline = ctx.is_inline, "dispatching block");
    let h = ctx.h;
    h.component(serializer.as_ref(), ctx)
}

/// Dispatch a span node to `serializers.marks[mark type]`
pub fn span_serializer<B: ElementBuilder>(ctx: SerializeContext<'_, B>) -> Result<B::Node> {
    let mark_type = match ctx.span() {
        Some(span) => span.mark_type(),
        None => ctx.node.type_name(),
    };
    let serializers = ctx.serializers;
    let serializer = serializers
        .marks
        .get(mark_type)
        .ok_or_else(|| RenderError::UnknownMarkType(mark_type.to_string()))?;

    trace!(mark_type, "dispatching mark");
    let h = ctx.h;
    h.component(serializer.as_ref(), ctx)
}

/// Recursive walker over blocks, lists and span trees.
///
/// Holds the collaborators shared by the whole render; all of them are
/// read-only for its lifetime.
pub struct Renderer<'a, B: ElementBuilder> {
    pub h: &'a B,
    pub serializers: &'a Serializers<B>,
    pub options: &'a Options,
}

impl<B: ElementBuilder> Clone for Renderer<'_, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: ElementBuilder> Copy for Renderer<'_, B> {}

impl<'a, B: ElementBuilder> Renderer<'a, B> {
    pub fn new(h: &'a B, serializers: &'a Serializers<B>, options: &'a Options) -> Self {
        Self {
            h,
            serializers,
            options,
        }
    }

    /// Build a context for `node` with pre-serialized children
    pub fn context<'n>(
        &self,
        node: NodeRef<'n>,
        children: Vec<B::Node>,
        key: Option<String>,
        index: usize,
    ) -> SerializeContext<'n, B>
    where
        'a: 'n,
    {
        SerializeContext {
            h: self.h,
            node,
            serializers: self.serializers,
            options: self.options,
            is_inline: false,
            children,
            key,
            index,
        }
    }

    /// Serialize one entry of a span tree.
    ///
    /// Text is returned as a leaf, except a lone `"\n"` which becomes a hard
    /// break when one is registered. Span nodes have their children
    /// serialized first and are then dispatched through `serializers.span`.
    pub fn serialize_span(&self, span: &SpanChild, index: usize) -> Result<B::Node> {
        match span {
            SpanChild::Text(text) => match &self.serializers.hard_break {
                Some(hard_break) if text == "\n" => {
                    let key = format!("hb-{}", index);
                    let ctx = self.context(NodeRef::HardBreak, Vec::new(), Some(key), index);
                    self.h.component(hard_break.as_ref(), ctx)
                }
                _ => Ok(self.h.text(text)),
            },
            SpanChild::Node(node) => {
                let children = node
                    .children
                    .iter()
                    .enumerate()
                    .map(|(i, child)| self.serialize_span(child, i))
                    .collect::<Result<Vec<_>>>()?;

                let key = node
                    .key
                    .clone()
                    .unwrap_or_else(|| format!("span-{}", index));
                let mut ctx = self.context(NodeRef::Span(node), children, Some(key), index);
                ctx.is_inline = true;
                self.h.component(self.serializers.span.as_ref(), ctx)
            }
            SpanChild::Inline(block) => self.serialize_block(block, index, true),
        }
    }

    /// Serialize a block's inline content
    pub fn serialize_children(&self, block: &Block) -> Result<Vec<B::Node>> {
        build_marks_tree(block)
            .iter()
            .enumerate()
            .map(|(i, child)| self.serialize_span(child, i))
            .collect()
    }

    /// Serialize a block and dispatch it through `serializers.block`
    pub fn serialize_block(&self, block: &Block, index: usize, is_inline: bool) -> Result<B::Node> {
        let children = self.serialize_children(block)?;
        let key = block
            .key
            .clone()
            .unwrap_or_else(|| format!("block-{}", index));
        let mut ctx = self.context(NodeRef::Block(block), children, Some(key), index);
        ctx.is_inline = is_inline;
        self.h.component(self.serializers.block.as_ref(), ctx)
    }

    pub fn serialize_list(&self, list: &List, index: usize) -> Result<B::Node> {
        let children = list
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| self.serialize_list_item(item, i))
            .collect::<Result<Vec<_>>>()?;

        let key = list.key.clone().unwrap_or_else(|| format!("list-{}", index));
        let ctx = self.context(NodeRef::List(list), children, Some(key), index);
        self.h.component(self.serializers.list.as_ref(), ctx)
    }

    /// Serialize a list item; styled items render their content as a block
    pub fn serialize_list_item(&self, item: &ListItem, index: usize) -> Result<B::Node> {
        let block = &item.block;
        let styled = block.style.as_deref().is_some_and(|style| style != "normal");

        let mut children = if styled {
            vec![self.serialize_block(block, index, false)?]
        } else {
            self.serialize_children(block)?
        };

        for (i, sublist) in item.sublists.iter().enumerate() {
            children.push(self.serialize_list(sublist, i)?);
        }

        let key = block
            .key
            .clone()
            .unwrap_or_else(|| format!("list-item-{}", index));
        let ctx = self.context(NodeRef::ListItem(item), children, Some(key), index);
        self.h.component(self.serializers.list_item.as_ref(), ctx)
    }

    /// Serialize a top-level node
    pub fn serialize_node(&self, node: &Node, index: usize) -> Result<B::Node> {
        match node {
            Node::Block(block) => self.serialize_block(block, index, false),
            Node::List(list) => self.serialize_list(list, index),
        }
    }
}

/// Serialize one span tree entry with the given collaborators
pub fn serialize_span<B: ElementBuilder>(
    span: &SpanChild,
    h: &B,
    serializers: &Serializers<B>,
    options: &Options,
    index: usize,
) -> Result<B::Node> {
    Renderer::new(h, serializers, options).serialize_span(span, index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::{HtmlBuilder, HtmlNode};
    use crate::serializers::default_serializers;
    use block_content_core::{Mark, SpanNode};

    fn strong(children: Vec<SpanChild>) -> SpanChild {
        SpanChild::Node(SpanNode::new(Mark::Plain("strong".to_string())).with_children(children))
    }

    fn render(span: &SpanChild, serializers: &Serializers<HtmlBuilder>, index: usize) -> Result<HtmlNode> {
        serialize_span(span, &HtmlBuilder, serializers, &Options::default(), index)
    }

    #[test]
    fn test_plain_text_is_returned_verbatim() {
        let serializers = default_serializers();
        let node = render(&SpanChild::text("hello"), &serializers, 0).unwrap();
        assert_eq!(node, HtmlNode::Text("hello".to_string()));
    }

    #[test]
    fn test_newline_becomes_keyed_hard_break() {
        let serializers = default_serializers();
        let node = render(&SpanChild::text("\n"), &serializers, 3).unwrap();
        assert_eq!(node.tag(), Some("br"));
        assert_eq!(node.key(), Some("hb-3"));
        assert!(node.children().is_empty());

        let other = render(&SpanChild::text("\n"), &serializers, 4).unwrap();
        assert_eq!(other.key(), Some("hb-4"));
    }

    #[test]
    fn test_newline_without_hard_break_is_text() {
        let mut serializers = default_serializers();
        serializers.set_hard_break(None);
        let node = render(&SpanChild::text("\n"), &serializers, 0).unwrap();
        assert_eq!(node, HtmlNode::Text("\n".to_string()));
    }

    #[test]
    fn test_strong_span_wraps_leaf() {
        let serializers = default_serializers();
        let node = render(&strong(vec![SpanChild::text("hi")]), &serializers, 0).unwrap();
        assert_eq!(node.tag(), Some("strong"));
        assert_eq!(node.children(), &[HtmlNode::Text("hi".to_string())]);
        assert_eq!(node.to_html(), "<strong>hi</strong>");
    }

    #[test]
    fn test_span_key_prefers_own_key() {
        let serializers = default_serializers();
        let keyed = SpanChild::Node(
            SpanNode::new(Mark::Plain("em".to_string()))
                .with_key("abc")
                .with_children(vec![SpanChild::text("x")]),
        );
        assert_eq!(render(&keyed, &serializers, 2).unwrap().key(), Some("abc"));

        let unkeyed = strong(vec![SpanChild::text("x")]);
        assert_eq!(render(&unkeyed, &serializers, 2).unwrap().key(), Some("span-2"));
    }

    #[test]
    fn test_nested_spans_recurse() {
        let serializers = default_serializers();
        let span = strong(vec![
            SpanChild::text("a"),
            SpanChild::Node(
                SpanNode::new(Mark::Plain("em".to_string()))
                    .with_children(vec![SpanChild::text("b"), SpanChild::text("\n")]),
            ),
        ]);
        let node = render(&span, &serializers, 0).unwrap();
        assert_eq!(node.to_html(), "<strong>a<em>b<br></em></strong>");
    }

    #[test]
    fn test_unknown_mark_type() {
        let serializers = default_serializers();
        let span = SpanChild::Node(SpanNode::new(Mark::Plain("superscript".to_string())));
        let err = render(&span, &serializers, 0).unwrap_err();
        assert!(matches!(err, RenderError::UnknownMarkType(ref name) if name == "superscript"));
        assert!(err.to_string().contains("serializers.marks"));
    }

    #[test]
    fn test_missing_mark_is_unknown() {
        let serializers = default_serializers();
        let span = SpanChild::Node(SpanNode {
            key: None,
            mark: None,
            children: vec![SpanChild::text("x")],
        });
        let err = render(&span, &serializers, 0).unwrap_err();
        assert!(matches!(err, RenderError::UnknownMarkType(ref name) if name == "undefined"));
    }

    #[test]
    fn test_unknown_block_type() {
        let serializers = default_serializers();
        let options = Options::default();
        let renderer = Renderer::new(&HtmlBuilder, &serializers, &options);
        let err = renderer
            .serialize_block(&Block::new("customWidget"), 0, false)
            .unwrap_err();
        assert!(matches!(err, RenderError::UnknownBlockType(ref name) if name == "customWidget"));
        assert!(err.to_string().contains("serializers.types"));
    }

    #[test]
    fn test_block_dispatch_passes_children_and_inline_flag() {
        let mut serializers = default_serializers();
        serializers.add_type("callout", |ctx: SerializeContext<'_, HtmlBuilder>| {
            let tag = if ctx.is_inline { "span" } else { "aside" };
            Ok(ctx.wrap(tag, crate::Props::new()))
        });
        let options = Options::default();
        let renderer = Renderer::new(&HtmlBuilder, &serializers, &options);

        let block = Block::new("callout").with_key("c1");
        let node = renderer.serialize_block(&block, 0, false).unwrap();
        assert_eq!(node.tag(), Some("aside"));
        assert_eq!(node.key(), Some("c1"));

        let inline = renderer.serialize_block(&block, 0, true).unwrap();
        assert_eq!(inline.tag(), Some("span"));
    }
}
