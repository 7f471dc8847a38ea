//! End-to-end rendering of page documents and bare nodes

use serde_json::json;
use trellis_ui::{
    ComponentNode, Document, ElementSnapshot, Field, FormBuilder, MAX_NESTING, Renderer,
    RendererOptions, TextContent, UiTree,
};

fn render(value: serde_json::Value) -> UiTree {
    let document = Document::from_value(value).unwrap();
    Renderer::default().render_page(&document)
}

fn snapshot_of(tree: &UiTree, index: usize) -> ElementSnapshot {
    tree.snapshot(tree.roots()[index]).unwrap()
}

#[test]
fn test_single_input_page() {
    let tree = render(json!({
        "page": {
            "title": "T",
            "layout": "single",
            "components": [
                { "type": "input", "attributes": { "name": "email", "type": "email", "required": true } }
            ]
        }
    }));

    assert_eq!(tree.title(), Some("T"));
    assert_eq!(tree.roots().len(), 2);

    let banner = snapshot_of(&tree, 0);
    assert_eq!(banner.children.len(), 1);
    assert_eq!(banner.children[0].tag, "h2");
    assert_eq!(banner.children[0].content, Some(TextContent::Plain("T".into())));

    let wrapper = snapshot_of(&tree, 1);
    assert_eq!(wrapper.classes, ["space-y-6"]);
    assert_eq!(wrapper.children.len(), 1);

    let input = &wrapper.children[0];
    assert_eq!(input.tag, "input");
    assert_eq!(input.attributes.len(), 3);
    assert_eq!(input.attributes["name"], json!("email"));
    assert_eq!(input.attributes["type"], json!("email"));
    assert_eq!(input.attributes["required"], json!(true));
    assert!(input.classes.is_empty());
    assert!(input.style.is_empty());
}

#[test]
fn test_page_without_title_or_layout() {
    let tree = render(json!({ "page": { "components": [{ "type": "p", "content": "x" }] } }));

    assert_eq!(tree.title(), None);
    assert_eq!(tree.roots().len(), 1);
    assert_eq!(
        snapshot_of(&tree, 0).classes,
        ["grid", "grid-cols-1", "md:grid-cols-2", "lg:grid-cols-3", "gap-6"]
    );
}

#[test]
fn test_layout_tokens() {
    let grid = snapshot_of(&render(json!({ "page": { "layout": "grid" } })), 0).classes;
    let flex = snapshot_of(&render(json!({ "page": { "layout": "flex" } })), 0).classes;
    let odd = snapshot_of(&render(json!({ "page": { "layout": "masonry" } })), 0).classes;

    assert_eq!(flex, ["flex", "flex-wrap", "gap-6"]);
    assert_eq!(odd, grid);
}

#[test]
fn test_unknown_type_is_skipped_among_siblings() {
    let tree = render(json!({
        "type": "div",
        "components": [
            { "type": "span", "content": "a" },
            { "type": "unicorn" },
            { "attributes": { "id": "no-type" } },
            { "type": "p", "content": "b" }
        ]
    }));

    assert_eq!(tree.roots().len(), 1);
    let root = snapshot_of(&tree, 0);
    let tags: Vec<&str> = root.children.iter().map(|c| c.tag.as_str()).collect();
    assert_eq!(tags, ["span", "p"]);
}

#[test]
fn test_children_keep_document_order() {
    let tree = render(json!({
        "type": "form",
        "components": [
            { "type": "label", "content": "1" },
            { "type": "input", "attributes": { "name": "2" } },
            { "type": "textarea", "content": "3" },
            { "type": "button", "content": "4" }
        ]
    }));

    let form = snapshot_of(&tree, 0);
    let tags: Vec<&str> = form.children.iter().map(|c| c.tag.as_str()).collect();
    assert_eq!(tags, ["label", "input", "textarea", "button"]);
}

#[test]
fn test_bare_node_has_no_wrapper() {
    let tree = render(json!({ "type": "h1", "content": "Hello" }));

    assert_eq!(tree.roots().len(), 1);
    let heading = snapshot_of(&tree, 0);
    assert_eq!(heading.tag, "h1");
    assert_eq!(heading.content, Some(TextContent::Markup("Hello".into())));
}

#[test]
fn test_unknown_bare_node_renders_nothing() {
    let tree = render(json!({ "type": "unicorn" }));
    assert!(tree.is_empty());
    assert!(tree.roots().is_empty());
}

#[test]
fn test_zero_is_kept_and_falsy_dropped() {
    let tree = render(json!({
        "type": "input",
        "attributes": {
            "tabIndex": 0,
            "maxLength": 0,
            "placeholder": "",
            "disabled": false,
            "value": null
        }
    }));

    let input = snapshot_of(&tree, 0);
    assert_eq!(input.attributes.len(), 2);
    assert_eq!(input.attributes["tabindex"], json!(0));
    assert_eq!(input.attributes["maxlength"], json!(0));
}

#[test]
fn test_rendering_is_idempotent() {
    let document = Document::from_value(json!({
        "page": {
            "title": "Again",
            "components": [{
                "type": "fieldset",
                "legend": "Who",
                "components": [
                    { "type": "checkbox", "label": "Yes", "attributes": { "id": "yes", "name": "yes" } },
                    { "type": "select", "options": [{ "content": "A" }, { "content": "B" }] }
                ]
            }]
        }
    }))
    .unwrap();

    let renderer = Renderer::default();
    let first = renderer.render_page(&document);
    let second = renderer.render_page(&document);

    assert_eq!(first.snapshot_roots(), second.snapshot_roots());
    assert_eq!(first.len(), second.len());
}

#[test]
fn test_form_builder_output_renders() {
    let node = FormBuilder::new("contact")
        .method("post")
        .text_field(Field::new("name", "Name").required())
        .email_field(Field::new("email", "E-mail").required())
        .checkbox_field(Field::new("terms", "I accept"))
        .submit_button("Send")
        .build();

    let renderer = Renderer::new(RendererOptions {
        enable_animations: false,
        ..RendererOptions::default()
    });
    let tree = renderer.render_component(&node).unwrap();

    let email = tree.find_by_dom_id("email").unwrap();
    let element = tree.get(email).unwrap();
    assert_eq!(element.attribute_str("type").as_deref(), Some("email"));
    assert!(element.has_class("form-control"));

    let terms = tree.find_by_dom_id("terms").unwrap();
    assert_eq!(tree.get(terms).unwrap().attribute_str("type").as_deref(), Some("checkbox"));

    let button = tree.find_by_tag("button");
    assert_eq!(button.len(), 1);
    assert_eq!(
        tree.get(button[0]).unwrap().content(),
        Some(&TextContent::Markup("Send".into()))
    );
}

#[test]
fn test_snapshot_serializes() {
    let tree = Renderer::default()
        .render_component(&ComponentNode::new("a").attr("href", "/home").content("Home"))
        .unwrap();

    let value = serde_json::to_value(tree.snapshot_roots()).unwrap();
    assert_eq!(
        value,
        json!([{
            "tag": "a",
            "attributes": { "href": "/home" },
            "content": { "kind": "markup", "value": "Home" }
        }])
    );
}

/// `levels` nested divs with a span at the bottom, as JSON text
fn div_chain(levels: usize) -> String {
    let mut node = r#"{"type": "span", "content": "bottom"}"#.to_string();
    for _ in 0..levels {
        node = format!(r#"{{"type": "div", "components": [{node}]}}"#);
    }
    node
}

fn chain_length(top: &ElementSnapshot) -> usize {
    let mut length = 1;
    let mut cursor = top;
    while let Some(child) = cursor.children.first() {
        length += 1;
        cursor = child;
    }
    length
}

#[test]
fn test_malformed_nodes_degrade_alone() {
    let source = r#"{
        "page": {
            "title": 5,
            "components": [
                { "type": "p", "content": "before" },
                "not a node",
                42,
                { "type": "div", "attributes": "x", "components": 5 },
                { "type": "select", "options": [7, { "content": "ok" }] },
                { "type": "p", "content": "after" }
            ]
        }
    }"#;
    let tree = Renderer::default().render_json(source).unwrap();

    // a non-string title means no banner
    assert_eq!(tree.title(), None);
    assert_eq!(tree.roots().len(), 1);

    let wrapper = snapshot_of(&tree, 0);
    let tags: Vec<_> = wrapper.children.iter().map(|c| c.tag.as_str()).collect();
    assert_eq!(tags, ["p", "div", "select", "p"]);

    let div = &wrapper.children[1];
    assert!(div.attributes.is_empty());
    assert!(div.children.is_empty());
    assert_eq!(wrapper.children[2].children.len(), 1);
    assert_eq!(wrapper.children[3].content, Some(TextContent::Markup("after".into())));
}

#[test]
fn test_deep_chain_is_cut_at_max_depth() {
    let source = format!(
        r#"{{"page": {{"components": [{}, {{"type": "p", "content": "sibling"}}]}}}}"#,
        div_chain(80)
    );
    let tree = Renderer::default().render_json(&source).unwrap();

    let wrapper = snapshot_of(&tree, 0);
    assert_eq!(wrapper.children.len(), 2);
    assert_eq!(chain_length(&wrapper.children[0]), RendererOptions::default().max_depth);
    assert_eq!(wrapper.children[1].tag, "p");
}

#[test]
fn test_chain_deeper_than_reader_limit_keeps_siblings() {
    let source = format!(
        r#"{{"page": {{"components": [{}, {{"type": "p", "content": "sibling"}}]}}}}"#,
        div_chain(200)
    );
    let renderer = Renderer::new(RendererOptions {
        max_depth: 1000,
        ..RendererOptions::default()
    });
    let tree = renderer.render_json(&source).unwrap();

    let wrapper = snapshot_of(&tree, 0);
    assert_eq!(wrapper.children.len(), 2);
    assert_eq!(wrapper.children[1].tag, "p");

    // root object, page object and the page's component array sit above the
    // first node; each node then takes an object and a child array
    let kept = (MAX_NESTING - 3).div_ceil(2);
    assert_eq!(chain_length(&wrapper.children[0]), kept);
}
