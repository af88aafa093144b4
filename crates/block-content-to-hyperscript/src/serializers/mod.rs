//! Serializer registry.
//!
//! A [`Serializers`] value maps block types and mark types to serializers and
//! holds the slots for the structural pieces (lists, list items, the block
//! and span dispatchers, hard breaks and the container). It starts out as
//! [`default_serializers`] and is adjusted per entry before rendering.

mod defaults;

pub use defaults::{
    block_type_serializer, container_serializer, hard_break_serializer, image_serializer,
    link_serializer, list_item_serializer, list_serializer, raw_tag_serializer,
    strike_through_serializer, underline_serializer,
};

use std::sync::Arc;

use indexmap::IndexMap;

use crate::builder::ElementBuilder;
use crate::context::SerializeContext;
use crate::dispatch::{block_serializer, span_serializer};
use crate::Result;

/// Renders one node from its serialization context
pub trait Serializer<B: ElementBuilder>: Send + Sync {
    fn serialize(&self, ctx: SerializeContext<'_, B>) -> Result<B::Node>;
}

impl<B, F> Serializer<B> for F
where
    B: ElementBuilder,
    F: for<'a> Fn(SerializeContext<'a, B>) -> Result<B::Node> + Send + Sync,
{
    fn serialize(&self, ctx: SerializeContext<'_, B>) -> Result<B::Node> {
        self(ctx)
    }
}

/// Shared handle to a serializer
pub type SerializerRef<B> = Arc<dyn Serializer<B>>;

/// Wrap a closure or function as a [`SerializerRef`]
pub fn serializer<B, F>(f: F) -> SerializerRef<B>
where
    B: ElementBuilder + 'static,
    F: for<'a> Fn(SerializeContext<'a, B>) -> Result<B::Node> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Registry of serializers, resolved once per render
pub struct Serializers<B: ElementBuilder> {
    /// Block type name → serializer
    pub types: IndexMap<String, SerializerRef<B>>,
    /// Mark type name → serializer
    pub marks: IndexMap<String, SerializerRef<B>>,
    pub list: SerializerRef<B>,
    pub list_item: SerializerRef<B>,
    /// Block dispatcher, looks up [`Serializers::types`]
    pub block: SerializerRef<B>,
    /// Span dispatcher, looks up [`Serializers::marks`]
    pub span: SerializerRef<B>,
    /// `None` renders newlines as plain text
    pub hard_break: Option<SerializerRef<B>>,
    pub container: SerializerRef<B>,
}

/// The built-in registry
pub fn default_serializers<B: ElementBuilder + 'static>() -> Serializers<B> {
    let mut types: IndexMap<String, SerializerRef<B>> = IndexMap::new();
    types.insert("block".to_string(), serializer(block_type_serializer::<B>));
    types.insert("image".to_string(), serializer(image_serializer::<B>));

    let mut marks: IndexMap<String, SerializerRef<B>> = IndexMap::new();
    marks.insert("strong".to_string(), raw_tag_serializer("strong"));
    marks.insert("em".to_string(), raw_tag_serializer("em"));
    marks.insert("code".to_string(), raw_tag_serializer("code"));
    marks.insert("underline".to_string(), serializer(underline_serializer::<B>));
    marks.insert(
        "strike-through".to_string(),
        serializer(strike_through_serializer::<B>),
    );
    marks.insert("link".to_string(), serializer(link_serializer::<B>));

    Serializers {
        types,
        marks,
        list: serializer(list_serializer::<B>),
        list_item: serializer(list_item_serializer::<B>),
        block: serializer(block_serializer::<B>),
        span: serializer(span_serializer::<B>),
        hard_break: Some(serializer(hard_break_serializer::<B>)),
        container: serializer(container_serializer::<B>),
    }
}

impl<B: ElementBuilder + 'static> Serializers<B> {
    /// Create the built-in registry
    pub fn new() -> Self {
        default_serializers()
    }

    /// Add or replace the serializer for one block type
    pub fn add_type<F>(&mut self, name: &str, f: F) -> &mut Self
    where
        F: for<'a> Fn(SerializeContext<'a, B>) -> Result<B::Node> + Send + Sync + 'static,
    {
        self.types.insert(name.to_string(), serializer(f));
        self
    }

    /// Add or replace the serializer for one mark type
    pub fn add_mark<F>(&mut self, name: &str, f: F) -> &mut Self
    where
        F: for<'a> Fn(SerializeContext<'a, B>) -> Result<B::Node> + Send + Sync + 'static,
    {
        self.marks.insert(name.to_string(), serializer(f));
        self
    }

    /// Replace the whole `types` namespace
    pub fn set_types(&mut self, types: IndexMap<String, SerializerRef<B>>) -> &mut Self {
        self.types = types;
        self
    }

    /// Replace the whole `marks` namespace
    pub fn set_marks(&mut self, marks: IndexMap<String, SerializerRef<B>>) -> &mut Self {
        self.marks = marks;
        self
    }

    pub fn set_list(&mut self, list: SerializerRef<B>) -> &mut Self {
        self.list = list;
        self
    }

    pub fn set_list_item(&mut self, list_item: SerializerRef<B>) -> &mut Self {
        self.list_item = list_item;
        self
    }

    pub fn set_block(&mut self, block: SerializerRef<B>) -> &mut Self {
        self.block = block;
        self
    }

    pub fn set_span(&mut self, span: SerializerRef<B>) -> &mut Self {
        self.span = span;
        self
    }

    /// Set the hard break serializer, `None` disables hard breaks
    pub fn set_hard_break(&mut self, hard_break: Option<SerializerRef<B>>) -> &mut Self {
        self.hard_break = hard_break;
        self
    }

    pub fn set_container(&mut self, container: SerializerRef<B>) -> &mut Self {
        self.container = container;
        self
    }
}

impl<B: ElementBuilder + 'static> Default for Serializers<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: ElementBuilder> Clone for Serializers<B> {
    fn clone(&self) -> Self {
        Self {
            types: self.types.clone(),
            marks: self.marks.clone(),
            list: Arc::clone(&self.list),
            list_item: Arc::clone(&self.list_item),
            block: Arc::clone(&self.block),
            span: Arc::clone(&self.span),
            hard_break: self.hard_break.clone(),
            container: Arc::clone(&self.container),
        }
    }
}

impl<B: ElementBuilder> std::fmt::Debug for Serializers<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Serializers")
            .field("types", &self.types.keys().collect::<Vec<_>>())
            .field("marks", &self.marks.keys().collect::<Vec<_>>())
            .field("hard_break", &self.hard_break.is_some())
            .finish_non_exhaustive()
    }
}
