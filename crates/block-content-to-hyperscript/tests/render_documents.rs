use block_content_to_hyperscript::{
    block_serializer, serializer, span_serializer, Block, BlockRenderer, ElementBuilder,
    HtmlBuilder, Options, Props, RenderError, SerializeContext,
};
use serde_json::{json, Value};

fn blocks(value: Value) -> Vec<Block> {
    serde_json::from_value(value).unwrap()
}

fn render(value: Value) -> String {
    BlockRenderer::new().render_html(&blocks(value)).unwrap()
}

#[test]
fn test_plain_paragraph() {
    let html = render(json!([{
        "_type": "block",
        "_key": "p1",
        "style": "normal",
        "children": [{"_type": "span", "text": "Plain text."}]
    }]));
    assert_eq!(html, "<p>Plain text.</p>");
}

#[test]
fn test_text_is_escaped() {
    let html = render(json!([{
        "_type": "block",
        "children": [{"_type": "span", "text": "a <b> & c"}]
    }]));
    assert_eq!(html, "<p>a &lt;b&gt; &amp; c</p>");
}

#[test]
fn test_style_cannot_inject_markup() {
    let html = render(json!([{
        "_type": "block",
        "style": "h1 onmouseover=alert(1)",
        "children": [{"_type": "span", "text": "x"}]
    }]));
    assert_eq!(html, "<p>x</p>");
}

#[test]
fn test_custom_serializer_with_bad_tag_keeps_text() {
    let mut renderer = BlockRenderer::new();
    renderer
        .serializers_mut()
        .add_type("widget", |ctx: SerializeContext<'_, HtmlBuilder>| {
            let name = ctx
                .block()
                .and_then(|block| block.field("tag"))
                .and_then(Value::as_str)
                .unwrap_or("div")
                .to_string();
            let text = ctx.h.text("inner");
            Ok(ctx.h.element(&name, Props::new(), vec![text]))
        });

    let html = renderer
        .render_html(&blocks(json!([{"_type": "widget", "tag": "img src=x onerror=alert(1)"}])))
        .unwrap();
    assert_eq!(html, "inner");
}

#[test]
fn test_headings_and_blockquote() {
    let html = render(json!([
        {"_type": "block", "style": "h2", "children": [{"_type": "span", "text": "Title"}]},
        {"_type": "block", "style": "blockquote", "children": [{"_type": "span", "text": "Quote"}]}
    ]));
    assert_eq!(html, "<div><h2>Title</h2><blockquote>Quote</blockquote></div>");
}

#[test]
fn test_link_wraps_default_marks() {
    let html = render(json!([{
        "_type": "block",
        "markDefs": [{"_key": "l1", "_type": "link", "href": "https://example.com"}],
        "children": [
            {"_type": "span", "text": "Hello "},
            {"_type": "span", "text": "world", "marks": ["strong", "l1"]}
        ]
    }]));
    assert_eq!(
        html,
        "<p>Hello <a href=\"https://example.com\"><strong>world</strong></a></p>"
    );
}

#[test]
fn test_overlapping_marks_nest_by_run_length() {
    let html = render(json!([{
        "_type": "block",
        "children": [
            {"_type": "span", "text": "a", "marks": ["strong"]},
            {"_type": "span", "text": "b", "marks": ["strong", "em"]},
            {"_type": "span", "text": "c", "marks": ["em"]}
        ]
    }]));
    assert_eq!(html, "<p><strong>a<em>b</em></strong><em>c</em></p>");
}

#[test]
fn test_underline_and_strike_through() {
    let html = render(json!([{
        "_type": "block",
        "children": [
            {"_type": "span", "text": "u", "marks": ["underline"]},
            {"_type": "span", "text": "s", "marks": ["strike-through"]}
        ]
    }]));
    assert_eq!(
        html,
        "<p><span style=\"text-decoration:underline\">u</span><del>s</del></p>"
    );
}

#[test]
fn test_newlines_become_hard_breaks() {
    let html = render(json!([{
        "_type": "block",
        "children": [{"_type": "span", "text": "line one\nline two"}]
    }]));
    assert_eq!(html, "<p>line one<br>line two</p>");
}

#[test]
fn test_nested_bullet_list() {
    let item = |key: &str, level: u32| {
        json!({
            "_type": "block",
            "_key": key,
            "listItem": "bullet",
            "level": level,
            "children": [{"_type": "span", "text": key}]
        })
    };
    let html = render(json!([item("a", 1), item("b", 1), item("c", 2), item("d", 1)]));
    assert_eq!(
        html,
        "<ul><li>a</li><li>b<ul><li>c</li></ul></li><li>d</li></ul>"
    );
}

#[test]
fn test_list_followed_by_paragraph() {
    let html = render(json!([
        {"_type": "block", "listItem": "number", "children": [{"_type": "span", "text": "one"}]},
        {"_type": "block", "listItem": "number", "children": [{"_type": "span", "text": "two"}]},
        {"_type": "block", "children": [{"_type": "span", "text": "after"}]}
    ]));
    assert_eq!(html, "<div><ol><li>one</li><li>two</li></ol><p>after</p></div>");
}

#[test]
fn test_styled_list_item_renders_block() {
    let html = render(json!([{
        "_type": "block",
        "style": "h3",
        "listItem": "bullet",
        "children": [{"_type": "span", "text": "Heading item"}]
    }]));
    assert_eq!(html, "<ul><li><h3>Heading item</h3></li></ul>");
}

#[test]
fn test_image_block_and_inline_image() {
    let html = render(json!([
        {"_type": "image", "asset": {"url": "https://example.com/cat.png"}},
        {
            "_type": "block",
            "children": [
                {"_type": "span", "text": "See "},
                {"_type": "image", "asset": {"url": "https://example.com/dog.png"}}
            ]
        }
    ]));
    assert_eq!(
        html,
        "<div><figure><img src=\"https://example.com/cat.png\"></figure>\
         <p>See <img src=\"https://example.com/dog.png\"></p></div>"
    );
}

#[test]
fn test_image_reference_with_project() {
    let options = Options::default()
        .with_project("3do82whm", "production")
        .with_image_option("w", "320");
    let renderer = BlockRenderer::with_options(HtmlBuilder, options);
    let html = renderer
        .render_html(&blocks(json!([{
            "_type": "image",
            "asset": {"_ref": "image-YiOKD0O6AdjKPaK24WtbOEv0-1024x768-jpg"}
        }])))
        .unwrap();
    assert_eq!(
        html,
        "<figure><img src=\"https://cdn.sanity.io/images/3do82whm/production/\
         YiOKD0O6AdjKPaK24WtbOEv0-1024x768.jpg?w=320\"></figure>"
    );
}

#[test]
fn test_unknown_block_type_error() {
    let err = BlockRenderer::new()
        .render(&blocks(json!([{"_type": "customWidget"}])))
        .unwrap_err();
    assert!(matches!(err, RenderError::UnknownBlockType(ref name) if name == "customWidget"));
    assert_eq!(
        err.to_string(),
        "Unknown block type \"customWidget\", please specify a serializer for it in the `serializers.types` prop"
    );
}

#[test]
fn test_unknown_mark_type_error() {
    let err = BlockRenderer::new()
        .render(&blocks(json!([{
            "_type": "block",
            "children": [{"_type": "span", "text": "x", "marks": ["highlight"]}]
        }])))
        .unwrap_err();
    assert!(matches!(err, RenderError::UnknownMarkType(ref name) if name == "highlight"));
}

#[test]
fn test_custom_type_keeps_defaults() {
    let mut renderer = BlockRenderer::new();
    renderer
        .serializers_mut()
        .add_type("code", |ctx: SerializeContext<'_, HtmlBuilder>| {
            let code = ctx
                .block()
                .and_then(|block| block.field("code"))
                .and_then(Value::as_str)
                .unwrap_or_default();
            let text = ctx.h.text(code);
            let inner = ctx.h.element("code", Props::new(), vec![text]);
            Ok(ctx.h.element("pre", Props::new(), vec![inner]))
        });

    let html = renderer
        .render_html(&blocks(json!([
            {"_type": "code", "code": "let x = 1;"},
            {"_type": "block", "children": [{"_type": "span", "text": "bold", "marks": ["strong"]}]}
        ])))
        .unwrap();
    assert_eq!(
        html,
        "<div><pre><code>let x = 1;</code></pre><p><strong>bold</strong></p></div>"
    );
}

#[test]
fn test_custom_mark_with_annotation_data() {
    let mut renderer = BlockRenderer::new();
    renderer
        .serializers_mut()
        .add_mark("author", |ctx: SerializeContext<'_, HtmlBuilder>| {
            let name = ctx.mark().and_then(|mark| mark.str_field("name")).unwrap_or("");
            Ok(ctx.wrap("cite", Props::new().attr("title", name)))
        });

    let html = renderer
        .render_html(&blocks(json!([{
            "_type": "block",
            "markDefs": [{"_key": "a1", "_type": "author", "name": "Ada"}],
            "children": [{"_type": "span", "text": "quote", "marks": ["a1"]}]
        }])))
        .unwrap();
    assert_eq!(html, "<p><cite title=\"Ada\">quote</cite></p>");
}

#[test]
fn test_overrides_leave_lists_and_hard_breaks_working() {
    let mut renderer = BlockRenderer::new();
    renderer
        .serializers_mut()
        .add_type("image", |ctx: SerializeContext<'_, HtmlBuilder>| {
            Ok(ctx.h.element("picture", Props::new(), Vec::new()))
        })
        .add_mark("strong", |ctx: SerializeContext<'_, HtmlBuilder>| {
            Ok(ctx.wrap("b", Props::new()))
        });

    let html = renderer
        .render_html(&blocks(json!([
            {
                "_type": "block",
                "listItem": "bullet",
                "children": [
                    {"_type": "span", "text": "bold", "marks": ["strong"]},
                    {"_type": "span", "text": " and ", "marks": ["em"]}
                ]
            },
            {
                "_type": "block",
                "listItem": "bullet",
                "children": [{"_type": "span", "text": "a\nb"}]
            },
            {"_type": "image"}
        ])))
        .unwrap();
    assert_eq!(
        html,
        "<div><ul><li><b>bold</b><em> and </em></li><li>a<br>b</li></ul><picture></picture></div>"
    );
}

#[test]
fn test_replaced_span_dispatcher_is_used() {
    let mut renderer = BlockRenderer::new();
    renderer
        .serializers_mut()
        .set_span(serializer(|ctx: SerializeContext<'_, HtmlBuilder>| {
            let known = ctx
                .span()
                .is_some_and(|span| ctx.serializers.marks.contains_key(span.mark_type()));
            if known {
                span_serializer(ctx)
            } else {
                Ok(ctx.wrap("span", Props::new()))
            }
        }));

    let html = renderer
        .render_html(&blocks(json!([{
            "_type": "block",
            "children": [
                {"_type": "span", "text": "strong", "marks": ["strong"]},
                {"_type": "span", "text": "unknown", "marks": ["highlight"]}
            ]
        }])))
        .unwrap();
    assert_eq!(html, "<p><strong>strong</strong><span>unknown</span></p>");
}

#[test]
fn test_replaced_block_dispatcher_is_used() {
    let mut renderer = BlockRenderer::new();
    renderer
        .serializers_mut()
        .set_block(serializer(|ctx: SerializeContext<'_, HtmlBuilder>| {
            let h = ctx.h;
            let inner = block_serializer(ctx)?;
            Ok(h.element("section", Props::new(), vec![inner]))
        }));

    let html = renderer
        .render_html(&blocks(json!([
            {"_type": "block", "children": [{"_type": "span", "text": "one"}]},
            {"_type": "image", "asset": {"url": "https://example.com/a.png"}}
        ])))
        .unwrap();
    assert_eq!(
        html,
        "<div><section><p>one</p></section>\
         <section><figure><img src=\"https://example.com/a.png\"></figure></section></div>"
    );
}

#[test]
fn test_disabled_hard_break_keeps_newline() {
    let mut renderer = BlockRenderer::new();
    renderer.serializers_mut().set_hard_break(None);
    let html = renderer
        .render_html(&blocks(json!([{
            "_type": "block",
            "children": [{"_type": "span", "text": "a\nb"}]
        }])))
        .unwrap();
    assert_eq!(html, "<p>a\nb</p>");
}

/// Builds indented outline strings instead of HTML
struct OutlineBuilder;

impl ElementBuilder for OutlineBuilder {
    type Node = String;

    fn element(&self, tag: &str, _props: Props, children: Vec<String>) -> String {
        format!("({} {})", tag, children.join(" "))
    }

    fn text(&self, text: &str) -> String {
        format!("{:?}", text)
    }
}

#[test]
fn test_custom_element_builder() {
    let renderer = BlockRenderer::with_builder(OutlineBuilder);
    let node = renderer
        .render(&blocks(json!([{
            "_type": "block",
            "style": "h1",
            "children": [
                {"_type": "span", "text": "Hi "},
                {"_type": "span", "text": "there", "marks": ["em"]}
            ]
        }])))
        .unwrap();
    assert_eq!(node, "(h1 \"Hi \" (em \"there\"))");
}
