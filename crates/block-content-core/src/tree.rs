//! Span trees
//!
//! Spans arrive flat, each carrying the list of marks applied to it. Renderers
//! want nested structures instead (`<strong>a <em>b</em></strong>`), so
//! [`build_marks_tree`] folds consecutive spans sharing marks into
//! [`SpanNode`]s, longest-running marks outermost.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde_json::Value;

use crate::model::{Block, Child, MarkDef};

/// Decorators in their preferred nesting order
pub const DEFAULT_MARKS: &[&str] = &["strong", "em", "code", "underline", "strike-through"];

/// Mark type reported for a span node that carries no mark
pub const MISSING_MARK: &str = "undefined";

/// A mark applied to a span node
#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    /// Decorator referenced by name (`strong`, `em`, ...)
    Plain(String),
    /// Annotation resolved from the block's `markDefs`
    Structured(MarkDef),
}

impl Mark {
    /// The name used for serializer lookup
    pub fn type_name(&self) -> &str {
        match self {
            Mark::Plain(name) => name,
            Mark::Structured(def) => &def.type_name,
        }
    }

    /// The key spans use to refer to this mark
    pub fn key(&self) -> &str {
        match self {
            Mark::Plain(name) => name,
            Mark::Structured(def) => &def.key,
        }
    }

    /// Annotation payload field; plain marks have none
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Mark::Plain(_) => None,
            Mark::Structured(def) => def.field(name),
        }
    }

    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Value::as_str)
    }
}

/// A structured inline node: one mark wrapping nested children
#[derive(Debug, Clone, PartialEq)]
pub struct SpanNode {
    /// Key of the span that opened this node
    pub key: Option<String>,
    pub mark: Option<Mark>,
    pub children: Vec<SpanChild>,
}

impl SpanNode {
    pub fn new(mark: Mark) -> Self {
        Self {
            key: None,
            mark: Some(mark),
            children: Vec::new(),
        }
    }

    pub fn with_key(mut self, key: &str) -> Self {
        self.key = Some(key.to_string());
        self
    }

    pub fn with_children(mut self, children: Vec<SpanChild>) -> Self {
        self.children = children;
        self
    }

    /// Mark type for serializer lookup, [`MISSING_MARK`] when no mark is set
    pub fn mark_type(&self) -> &str {
        self.mark.as_ref().map_or(MISSING_MARK, Mark::type_name)
    }
}

/// One entry of a span tree
#[derive(Debug, Clone, PartialEq)]
pub enum SpanChild {
    /// Text leaf; a lone `"\n"` marks a hard break
    Text(String),
    /// Marked node with nested children
    Node(SpanNode),
    /// Inline object
    Inline(Block),
}

impl SpanChild {
    pub fn text(text: &str) -> Self {
        SpanChild::Text(text.to_string())
    }

    /// Mark type of a span node, `None` for leaves and inline objects
    pub fn mark_type(&self) -> Option<&str> {
        match self {
            SpanChild::Node(node) => Some(node.mark_type()),
            _ => None,
        }
    }
}

struct OpenMark {
    key: String,
    node: SpanNode,
}

/// Nest a block's flat spans into a span tree
pub fn build_marks_tree(block: &Block) -> Vec<SpanChild> {
    let mut root = Vec::new();
    let mut stack: Vec<OpenMark> = Vec::new();
    let sorted = sort_marks_by_occurrences(&block.children);

    for (child, mut needed) in block.children.iter().zip(sorted) {
        // Keep the open marks this child still needs, close the rest
        let mut keep = 0;
        while keep < stack.len() {
            match needed.iter().position(|m| *m == stack[keep].key) {
                Some(pos) => {
                    needed.remove(pos);
                    keep += 1;
                }
                None => break,
            }
        }
        close_marks(&mut stack, &mut root, keep);

        for mark_key in needed {
            let mark = block
                .mark_defs
                .iter()
                .find(|def| def.key == mark_key)
                .map_or_else(|| Mark::Plain(mark_key.clone()), |def| Mark::Structured(def.clone()));

            stack.push(OpenMark {
                key: mark_key,
                node: SpanNode {
                    key: child.key().map(str::to_string),
                    mark: Some(mark),
                    children: Vec::new(),
                },
            });
        }

        let target = match stack.last_mut() {
            Some(open) => &mut open.node.children,
            None => &mut root,
        };

        match child {
            Child::Span(span) => push_lines(target, &span.text),
            Child::Inline(inline) => target.push(SpanChild::Inline(inline.clone())),
        }
    }

    close_marks(&mut stack, &mut root, 0);
    root
}

/// Pop open marks down to `depth`, attaching each to its parent
fn close_marks(stack: &mut Vec<OpenMark>, root: &mut Vec<SpanChild>, depth: usize) {
    while stack.len() > depth {
        let Some(open) = stack.pop() else { break };
        let parent = match stack.last_mut() {
            Some(parent) => &mut parent.node.children,
            None => &mut *root,
        };
        parent.push(SpanChild::Node(open.node));
    }
}

/// Split text at newlines, keeping each newline as its own leaf
fn push_lines(target: &mut Vec<SpanChild>, text: &str) {
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            target.push(SpanChild::text("\n"));
        }
        target.push(SpanChild::text(line));
    }
}

/// Order each child's marks so the longest-running ones open first
fn sort_marks_by_occurrences(children: &[Child]) -> Vec<Vec<String>> {
    children
        .iter()
        .enumerate()
        .map(|(i, child)| {
            let marks = child.marks();
            let mut occurrences: HashMap<&str, usize> = HashMap::new();

            for mark in marks {
                let run = children[i + 1..]
                    .iter()
                    .take_while(|sibling| sibling.marks().contains(mark))
                    .count();
                *occurrences.entry(mark.as_str()).or_insert(0) += run + 1;
            }

            let mut sorted = marks.to_vec();
            sorted.sort_by(|a, b| compare_marks(&occurrences, a, b));
            sorted
        })
        .collect()
}

fn compare_marks(occurrences: &HashMap<&str, usize>, a: &str, b: &str) -> Ordering {
    let a_count = occurrences.get(a).copied().unwrap_or(0);
    let b_count = occurrences.get(b).copied().unwrap_or(0);

    b_count
        .cmp(&a_count)
        .then_with(|| default_position(a).cmp(&default_position(b)))
        .then_with(|| a.cmp(b))
}

/// Position in [`DEFAULT_MARKS`]; unknown marks sort before all defaults
fn default_position(mark: &str) -> isize {
    DEFAULT_MARKS
        .iter()
        .position(|m| *m == mark)
        .map_or(-1, |pos| pos as isize)
}
