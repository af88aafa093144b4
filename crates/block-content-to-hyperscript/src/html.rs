//! HTML element builder.
//!
//! [`HtmlBuilder`] builds a small owned element tree ([`HtmlNode`]) that can be
//! inspected in tests or rendered to an HTML string with [`HtmlNode::to_html`].

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::builder::{ElementBuilder, Props};

static TAG_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9-]*$").expect("valid tag name regex"));

/// Void (self-closing) HTML elements
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Builder producing [`HtmlNode`] trees
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlBuilder;

impl ElementBuilder for HtmlBuilder {
    type Node = HtmlNode;

    fn element(&self, tag: &str, props: Props, children: Vec<HtmlNode>) -> HtmlNode {
        HtmlNode::Element(Element {
            tag: tag.to_string(),
            key: props.key,
            attributes: props.attributes,
            style: props.style,
            children,
        })
    }

    fn text(&self, text: &str) -> HtmlNode {
        HtmlNode::Text(text.to_string())
    }

    fn keyed(&self, node: HtmlNode, key: &str) -> HtmlNode {
        match node {
            HtmlNode::Element(mut element) => {
                element.key = Some(key.to_string());
                HtmlNode::Element(element)
            }
            text => text,
        }
    }
}

/// A node of the HTML output tree
#[derive(Debug, Clone, PartialEq)]
pub enum HtmlNode {
    Text(String),
    Element(Element),
}

/// An HTML element
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub key: Option<String>,
    pub attributes: IndexMap<String, String>,
    pub style: IndexMap<String, String>,
    pub children: Vec<HtmlNode>,
}

impl Element {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn is_void(&self) -> bool {
        VOID_ELEMENTS.contains(&self.tag.as_str())
    }

    /// Whether the tag can be written as an HTML tag name
    pub fn has_valid_tag(&self) -> bool {
        TAG_NAME.is_match(&self.tag)
    }
}

impl HtmlNode {
    /// The element, if this is not a text node
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            HtmlNode::Element(element) => Some(element),
            HtmlNode::Text(_) => None,
        }
    }

    /// Tag name of an element node
    pub fn tag(&self) -> Option<&str> {
        self.as_element().map(|e| e.tag.as_str())
    }

    pub fn key(&self) -> Option<&str> {
        self.as_element().and_then(|e| e.key.as_deref())
    }

    pub fn children(&self) -> &[HtmlNode] {
        match self {
            HtmlNode::Element(element) => &element.children,
            HtmlNode::Text(_) => &[],
        }
    }

    /// Concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        match self {
            HtmlNode::Text(text) => text.clone(),
            HtmlNode::Element(element) => element
                .children
                .iter()
                .map(HtmlNode::text_content)
                .collect(),
        }
    }

    /// Render as an HTML string
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            HtmlNode::Text(text) => out.push_str(&escape_html(text)),
            // Unusable tag names are dropped, keeping only the content
            HtmlNode::Element(element) if !element.has_valid_tag() => {
                for child in &element.children {
                    child.write_html(out);
                }
            }
            HtmlNode::Element(element) => {
                out.push('<');
                out.push_str(&element.tag);

                for (name, value) in &element.attributes {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape_html_attr(value));
                    out.push('"');
                }

                if !element.style.is_empty() {
                    let style = element
                        .style
                        .iter()
                        .map(|(property, value)| format!("{}:{}", property, value))
                        .collect::<Vec<_>>()
                        .join(";");
                    out.push_str(" style=\"");
                    out.push_str(&escape_html_attr(&style));
                    out.push('"');
                }

                out.push('>');

                if element.is_void() {
                    return;
                }

                for child in &element.children {
                    child.write_html(out);
                }

                out.push_str("</");
                out.push_str(&element.tag);
                out.push('>');
            }
        }
    }
}

/// Escape HTML text content
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape HTML attribute value
fn escape_html_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
