//! block-content-core - Block content document model
//!
//! This crate provides the data structures for block content documents and the
//! two structural passes every renderer needs before serializing anything:
//! nesting flat span marks into span trees, and grouping list item blocks into
//! (possibly nested) lists. It is used by `block-content-to-hyperscript`.
//!
//! # Architecture
//!
//! ```text
//!                    ┌──────────────┐
//! [Block] ──────────▶│  nest_lists  │──▶ [Node] (blocks and lists)
//!                    └──────────────┘
//!                    ┌──────────────────┐
//! Block.children ───▶│ build_marks_tree │──▶ [SpanChild] (nested marks)
//!                    └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use block_content_core::{build_marks_tree, Block, Span, SpanChild};
//!
//! let block = Block::text(vec![
//!     Span::new("Hello ").into(),
//!     Span::new("world").with_marks(&["strong"]).into(),
//! ]);
//!
//! let tree = build_marks_tree(&block);
//! assert_eq!(tree[0], SpanChild::Text("Hello ".to_string()));
//! assert_eq!(tree[1].mark_type(), Some("strong"));
//! ```

mod lists;
mod model;
mod tree;

pub use lists::{nest_lists, List, ListItem, Node};
pub use model::{Block, Child, MarkDef, Span, BLOCK_TYPE, SPAN_TYPE};
pub use tree::{build_marks_tree, Mark, SpanChild, SpanNode, DEFAULT_MARKS, MISSING_MARK};
