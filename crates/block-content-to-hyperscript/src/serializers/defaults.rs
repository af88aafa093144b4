//! Built-in serializers for the common block, list and mark shapes.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{serializer, SerializerRef};
use crate::builder::{ElementBuilder, Props};
use crate::context::SerializeContext;
use crate::image_url::ImageUrlContext;
use crate::{RenderError, Result};

static HEADING_STYLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^h\d+$").expect("valid heading style regex"));

/// Renders `_type: "block"` by style: headings, blockquote, or paragraph
pub fn block_type_serializer<B: ElementBuilder>(ctx: SerializeContext<'_, B>) -> Result<B::Node> {
    let style = ctx
        .block()
        .and_then(|block| block.style.as_deref())
        .unwrap_or("normal");

    let tag = if HEADING_STYLE.is_match(style) {
        style
    } else if style == "blockquote" {
        "blockquote"
    } else {
        "p"
    };

    Ok(ctx.wrap(tag, Props::new()))
}

/// Renders an image, wrapped in a `figure` unless inline
pub fn image_serializer<B: ElementBuilder>(ctx: SerializeContext<'_, B>) -> Result<B::Node> {
    let node = ctx.block().ok_or_else(|| RenderError::UnexpectedNode {
        serializer: "image",
        found: ctx.node.type_name().to_string(),
    })?;

    let url_ctx = ImageUrlContext {
        node,
        options: ctx.options,
        is_inline: ctx.is_inline,
    };
    let src = ctx.options.image_url_resolver.resolve(&url_ctx)?;
    let img = ctx.h.element("img", Props::new().attr("src", src), Vec::new());

    if ctx.is_inline {
        Ok(img)
    } else {
        Ok(ctx.h.element("figure", Props::new(), vec![img]))
    }
}

/// `ul` for bullet lists, `ol` for everything else
pub fn list_serializer<B: ElementBuilder>(ctx: SerializeContext<'_, B>) -> Result<B::Node> {
    let tag = if ctx.list_type() == Some("bullet") {
        "ul"
    } else {
        "ol"
    };
    Ok(ctx.wrap(tag, Props::new()))
}

pub fn list_item_serializer<B: ElementBuilder>(ctx: SerializeContext<'_, B>) -> Result<B::Node> {
    Ok(ctx.wrap("li", Props::new()))
}

/// Serializer wrapping its children in `tag` with no props
pub fn raw_tag_serializer<B>(tag: &str) -> SerializerRef<B>
where
    B: ElementBuilder + 'static,
{
    let tag = tag.to_string();
    serializer(move |ctx: SerializeContext<'_, B>| Ok(ctx.wrap(&tag, Props::new())))
}

pub fn underline_serializer<B: ElementBuilder>(ctx: SerializeContext<'_, B>) -> Result<B::Node> {
    Ok(ctx.wrap("span", Props::new().style("text-decoration", "underline")))
}

pub fn strike_through_serializer<B: ElementBuilder>(
    ctx: SerializeContext<'_, B>,
) -> Result<B::Node> {
    Ok(ctx.wrap("del", Props::new()))
}

/// Anchor with `href` taken from the link annotation
pub fn link_serializer<B: ElementBuilder>(ctx: SerializeContext<'_, B>) -> Result<B::Node> {
    let props = match ctx.mark().and_then(|mark| mark.str_field("href")) {
        Some(href) => Props::new().attr("href", href),
        None => Props::new(),
    };
    Ok(ctx.wrap("a", props))
}

pub fn hard_break_serializer<B: ElementBuilder>(ctx: SerializeContext<'_, B>) -> Result<B::Node> {
    Ok(ctx.h.element("br", Props::new(), Vec::new()))
}

/// `div` around all top-level nodes, with the configured class
pub fn container_serializer<B: ElementBuilder>(ctx: SerializeContext<'_, B>) -> Result<B::Node> {
    let props = match &ctx.options.class_name {
        Some(class_name) => Props::new().attr("class", class_name.as_str()),
        None => Props::new(),
    };
    Ok(ctx.wrap("div", props))
}
