//! BlockRenderer - the main entry point for rendering block content.

use tracing::debug;

use block_content_core::{nest_lists, Block};

use crate::builder::ElementBuilder;
use crate::context::NodeRef;
use crate::dispatch::Renderer;
use crate::html::HtmlBuilder;
use crate::options::Options;
use crate::serializers::{default_serializers, Serializers};
use crate::Result;

/// Renders whole documents with one builder, registry and set of options
pub struct BlockRenderer<B: ElementBuilder> {
    h: B,
    serializers: Serializers<B>,
    options: Options,
}

impl BlockRenderer<HtmlBuilder> {
    /// Create an HTML renderer with the default serializers and options
    pub fn new() -> Self {
        Self::with_builder(HtmlBuilder)
    }

    /// Render blocks straight to an HTML string
    pub fn render_html(&self, blocks: &[Block]) -> Result<String> {
        self.render(blocks).map(|node| node.to_html())
    }
}

impl Default for BlockRenderer<HtmlBuilder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: ElementBuilder + 'static> BlockRenderer<B> {
    /// Create a renderer for a custom element builder
    pub fn with_builder(h: B) -> Self {
        Self::with_options(h, Options::default())
    }

    /// Create a renderer with custom options
    pub fn with_options(h: B, options: Options) -> Self {
        Self {
            h,
            serializers: default_serializers(),
            options,
        }
    }

    /// Render a document.
    ///
    /// List items are grouped into lists first. A single top-level node is
    /// returned as is; several are wrapped by the container serializer.
    pub fn render(&self, blocks: &[Block]) -> Result<B::Node> {
        let nodes = nest_lists(blocks);
        debug!(blocks = blocks.len(), nodes = nodes.len(), "rendering block content");

        let renderer = Renderer::new(&self.h, &self.serializers, &self.options);
        let mut rendered = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| renderer.serialize_node(node, i))
            .collect::<Result<Vec<_>>>()?;

        if rendered.len() == 1 && !self.options.render_container_on_single_child {
            if let Some(node) = rendered.pop() {
                return Ok(node);
            }
        }

        let ctx = renderer.context(NodeRef::Container, rendered, None, 0);
        self.h.component(self.serializers.container.as_ref(), ctx)
    }

    /// Get the active serializers
    pub fn serializers(&self) -> &Serializers<B> {
        &self.serializers
    }

    /// Get mutable access to the serializers
    pub fn serializers_mut(&mut self) -> &mut Serializers<B> {
        &mut self.serializers
    }

    /// Get the current options
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    /// Apply a plugin that adjusts the serializers
    pub fn use_plugin<F>(&mut self, plugin: F) -> &mut Self
    where
        F: FnOnce(&mut Serializers<B>),
    {
        plugin(&mut self.serializers);
        self
    }
}
