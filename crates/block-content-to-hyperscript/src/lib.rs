//! # block-content-to-hyperscript
//!
//! Render block content documents through a hyperscript-style element builder.
//!
//! Every node of a document (blocks, lists, list items, marked spans, hard
//! breaks and the outer container) is rendered by a serializer looked up in a
//! [`Serializers`] registry. Serializers never build output themselves; they
//! call an [`ElementBuilder`], so the same registry can produce HTML strings,
//! virtual DOM nodes or any other tree.
//!
//! ## Example
//!
//! ```rust
//! use block_content_to_hyperscript::{Block, BlockRenderer, Span};
//!
//! let renderer = BlockRenderer::new();
//! let block = Block::text(vec![
//!     Span::new("Hello ").into(),
//!     Span::new("World").with_marks(&["strong"]).into(),
//! ]);
//!
//! let html = renderer.render_html(&[block]).unwrap();
//! assert_eq!(html, "<p>Hello <strong>World</strong></p>");
//! ```
//!
//! ## Custom serializers
//!
//! ```rust
//! use block_content_to_hyperscript::{Block, BlockRenderer, HtmlBuilder, Props, SerializeContext};
//!
//! let mut renderer = BlockRenderer::new();
//! renderer.serializers_mut().add_type("divider", |ctx: SerializeContext<'_, HtmlBuilder>| {
//!     Ok(ctx.wrap("hr", Props::new()))
//! });
//!
//! let html = renderer.render_html(&[Block::new("divider")]).unwrap();
//! assert_eq!(html, "<hr>");
//! ```

mod builder;
mod context;
mod dispatch;
pub mod html;
mod image_url;
mod options;
pub mod serializers;
mod service;

pub use block_content_core::{
    build_marks_tree, nest_lists, Block, Child, List, ListItem, Mark, MarkDef, Node, Span,
    SpanChild, SpanNode,
};
pub use builder::{ElementBuilder, Props};
pub use context::{NodeRef, SerializeContext};
pub use dispatch::{block_serializer, serialize_span, span_serializer, Renderer};
pub use html::{Element, HtmlBuilder, HtmlNode};
pub use image_url::{AssetUrlResolver, ImageUrlContext, ImageUrlError, ImageUrlResolver};
pub use options::{Options, DEFAULT_IMAGE_BASE_URL};
pub use serializers::{default_serializers, serializer, Serializer, SerializerRef, Serializers};
pub use service::BlockRenderer;

/// Error type for rendering operations
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Unknown block type \"{0}\", please specify a serializer for it in the `serializers.types` prop")]
    UnknownBlockType(String),

    #[error("Unknown mark type \"{0}\", please specify a serializer for it in the `serializers.marks` prop")]
    UnknownMarkType(String),

    #[error("The `{serializer}` serializer cannot render a `{found}` node")]
    UnexpectedNode {
        serializer: &'static str,
        found: String,
    },

    #[error(transparent)]
    ImageUrl(#[from] ImageUrlError),
}

pub type Result<T> = std::result::Result<T, RenderError>;
