//! Event binding, queued delivery and the string-handler policy

use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;
use trellis_ui::{
    Callback, ComponentNode, Document, EventKind, EventQueue, Renderer, RendererOptions,
    ScriptPolicy, UiEvent,
};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("trellis_ui=debug")
        .with_test_writer()
        .try_init();
}

#[test]
fn test_string_handler_sees_event_fields() {
    let renderer = Renderer::default();
    let document = Document::from_value(json!({
        "type": "input",
        "attributes": {
            "id": "q",
            "onInput": "last_input = event.type .. '=' .. event.value",
            "onFocus": "focused = (focused or 0) + 1"
        }
    }))
    .unwrap();

    let mut tree = renderer.render_page(&document);
    let input = tree.find_by_dom_id("q").unwrap();

    let mut queue = EventQueue::new();
    queue.push(UiEvent::new(EventKind::Focus, input));
    queue.push(UiEvent::input(input, "rust"));
    queue.push(UiEvent::new(EventKind::Focus, input));

    let outcomes = renderer.process_events(&mut tree, &mut queue);
    assert_eq!(outcomes.len(), 3);
    assert!(outcomes.iter().all(|o| o.handlers_run == 1 && o.handler_errors == 0));
    assert!(queue.is_empty());

    let globals = renderer.scripts().lua().globals();
    assert_eq!(globals.get::<String>("last_input").unwrap(), "input=rust");
    assert_eq!(globals.get::<i64>("focused").unwrap(), 2);
    assert_eq!(tree.get(input).unwrap().value(), "rust");
}

#[test]
fn test_failing_script_is_counted_not_raised() {
    init_logging();
    let renderer = Renderer::default();
    let document = Document::from_value(json!({
        "type": "button",
        "attributes": { "onClick": "error('broken handler')" }
    }))
    .unwrap();

    let mut tree = renderer.render_page(&document);
    let button = tree.roots()[0];

    let outcome = renderer.handle_event(&mut tree, &UiEvent::click(button));
    assert_eq!(outcome.handlers_run, 1);
    assert_eq!(outcome.handler_errors, 1);
}

#[test]
fn test_reject_policy_keeps_native_handlers() {
    init_logging();
    let clicks = Rc::new(RefCell::new(0));
    let counter = clicks.clone();

    let node = ComponentNode::new("div")
        .child(ComponentNode::new("button").with_id("native").on(
            "onClick",
            Callback::new(move |_| {
                *counter.borrow_mut() += 1;
                Ok(())
            }),
        ))
        .child(
            ComponentNode::new("button")
                .with_id("scripted")
                .attr("onClick", "clicked = true"),
        );

    let renderer = Renderer::new(RendererOptions {
        script_policy: ScriptPolicy::Reject,
        ..RendererOptions::default()
    });
    let mut tree = renderer.render_component(&node).unwrap();

    let native = tree.find_by_dom_id("native").unwrap();
    let scripted = tree.find_by_dom_id("scripted").unwrap();

    // the scripted button is still built, just without a handler
    assert!(tree.get(scripted).unwrap().listeners().is_empty());

    renderer.handle_event(&mut tree, &UiEvent::click(native));
    let outcome = renderer.handle_event(&mut tree, &UiEvent::click(scripted));

    assert_eq!(*clicks.borrow(), 1);
    assert_eq!(outcome.handlers_run, 0);
}

#[test]
fn test_uncompilable_handler_still_builds_element() {
    init_logging();
    let renderer = Renderer::default();
    let document = Document::from_value(json!({
        "type": "div",
        "components": [
            { "type": "button", "attributes": { "id": "b", "onClick": "if then end (" } },
            { "type": "p", "content": "sibling" }
        ]
    }))
    .unwrap();

    let tree = renderer.render_page(&document);
    let root = tree.roots()[0];

    assert_eq!(tree.children(root).len(), 2);
    let button = tree.find_by_dom_id("b").unwrap();
    assert!(tree.get(button).unwrap().listeners().is_empty());
}

#[test]
fn test_handlers_survive_child_appends() {
    let renderer = Renderer::default();
    let document = Document::from_value(json!({
        "type": "form",
        "attributes": { "id": "f", "onSubmit": "submitted = event.type" },
        "components": [
            { "type": "input", "attributes": { "name": "a" } },
            { "type": "input", "attributes": { "name": "b" } }
        ]
    }))
    .unwrap();

    let mut tree = renderer.render_page(&document);
    let form = tree.find_by_dom_id("f").unwrap();
    assert_eq!(tree.children(form).len(), 2);

    let outcome = renderer.handle_event(&mut tree, &UiEvent::submit(form));
    assert_eq!(outcome.handlers_run, 1);
    assert_eq!(outcome.valid, Some(true));

    let submitted: String = renderer.scripts().lua().globals().get("submitted").unwrap();
    assert_eq!(submitted, "submit");
}

#[test]
fn test_radio_change_unchecks_group() {
    let renderer = Renderer::default();
    let document = Document::from_value(json!({
        "type": "fieldset",
        "legend": "Size",
        "components": [
            { "type": "radio", "label": "S", "attributes": { "id": "s", "name": "size", "value": "s", "checked": true } },
            { "type": "radio", "label": "L", "attributes": { "id": "l", "name": "size", "value": "l" } }
        ]
    }))
    .unwrap();

    let mut tree = renderer.render_page(&document);
    let small = tree.find_by_dom_id("s").unwrap();
    let large = tree.find_by_dom_id("l").unwrap();
    assert!(tree.get(small).unwrap().checked());

    renderer.handle_event(&mut tree, &UiEvent::toggle(large, true));

    assert!(!tree.get(small).unwrap().checked());
    assert!(tree.get(large).unwrap().checked());

    let fieldset = tree.roots()[0];
    let data = trellis_ui::form_data(&tree, fieldset);
    assert_eq!(data.get("size"), Some(&json!("l")));
}
