use super::{BuildContext, ComponentBuilder, ComponentKind};
use crate::binder::{AttrSpec, tables};
use crate::error::Result;
use crate::schema::{ComponentNode, OptionNode, present};
use crate::ui::{Element, ElementId, TextContent};
use serde_json::Value;

const CHECKBOX_WRAPPER: &str = "checkbox-wrapper flex items-center space-x-2";
const RADIO_WRAPPER: &str = "radio-wrapper";
const PLACEHOLDER: &str = "unknown-component border border-dashed border-red-400 text-red-600 text-sm p-2";

/// Builder for one of the built-in component types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Builtin(pub ComponentKind);

impl ComponentBuilder for Builtin {
    fn build(&self, cx: &mut BuildContext<'_>, node: &ComponentNode) -> Result<ElementId> {
        match self.0 {
            ComponentKind::Input => Ok(simple(cx, node, "input", tables::INPUT, None)),
            ComponentKind::Select => build_select(cx, node),
            ComponentKind::Textarea => Ok(build_textarea(cx, node)),
            ComponentKind::Button => Ok(simple(
                cx,
                node,
                "button",
                tables::BUTTON,
                Some(markup(node).unwrap_or_else(|| TextContent::Markup("Button".into()))),
            )),
            ComponentKind::Label => Ok(simple(cx, node, "label", tables::LABEL, markup(node))),
            ComponentKind::Div => Ok(simple(cx, node, "div", tables::NONE, markup(node))),
            ComponentKind::Span => Ok(simple(cx, node, "span", tables::NONE, markup(node))),
            ComponentKind::Form => Ok(simple(cx, node, "form", tables::FORM, None)),
            ComponentKind::Checkbox => build_toggle(cx, node, "checkbox", CHECKBOX_WRAPPER),
            ComponentKind::Radio => build_toggle(cx, node, "radio", RADIO_WRAPPER),
            ComponentKind::Fieldset => build_fieldset(cx, node),
            ComponentKind::Legend => Ok(simple(cx, node, "legend", tables::NONE, plain(node))),
            ComponentKind::Img => {
                let mut element = Element::new("img");
                cx.bind(&mut element, node, tables::IMG, tables::IMG_EVENTS);
                Ok(cx.create(element))
            }
            ComponentKind::Link => Ok(simple(cx, node, "a", tables::LINK, markup(node))),
            kind @ ComponentKind::Heading(_) => {
                Ok(simple(cx, node, kind.as_str(), tables::NONE, markup(node)))
            }
            ComponentKind::Paragraph => Ok(simple(cx, node, "p", tables::NONE, markup(node))),
        }
    }

    fn accepts_children(&self) -> bool {
        self.0.accepts_children()
    }
}

/// Stand-in for an unrecognized type, for use as a registry fallback
#[derive(Debug, Clone, Copy, Default)]
pub struct DiagnosticPlaceholder;

impl ComponentBuilder for DiagnosticPlaceholder {
    fn build(&self, cx: &mut BuildContext<'_>, node: &ComponentNode) -> Result<ElementId> {
        let kind = node.kind().unwrap_or_default();
        let mut element = Element::with_classes("div", PLACEHOLDER);
        element.set_attribute("data-component-type", Value::String(kind.to_string()));
        element.set_attribute("role", Value::String("alert".into()));
        element.set_content(TextContent::Plain(format!("Unsupported component: {kind}")));
        Ok(cx.create(element))
    }
}

fn markup(node: &ComponentNode) -> Option<TextContent> {
    text(node).map(TextContent::Markup)
}

fn plain(node: &ComponentNode) -> Option<TextContent> {
    text(node).map(TextContent::Plain)
}

fn text(node: &ComponentNode) -> Option<String> {
    node.content.clone().filter(|c| !c.is_empty())
}

fn simple(
    cx: &mut BuildContext<'_>,
    node: &ComponentNode,
    tag: &str,
    table: &[AttrSpec],
    content: Option<TextContent>,
) -> ElementId {
    let mut element = Element::new(tag);
    if let Some(content) = content {
        element.set_content(content);
    }
    cx.bind(&mut element, node, table, &[]);
    cx.create(element)
}

fn build_textarea(cx: &mut BuildContext<'_>, node: &ComponentNode) -> ElementId {
    let mut element = Element::new("textarea");
    if let Some(content) = text(node) {
        element.set_value(content.clone());
        element.set_content(TextContent::Plain(content));
    }
    cx.bind(&mut element, node, tables::TEXTAREA, &[]);
    cx.create(element)
}

fn build_select(cx: &mut BuildContext<'_>, node: &ComponentNode) -> Result<ElementId> {
    let mut select = Element::new("select");
    cx.bind(&mut select, node, tables::SELECT, &[]);
    let id = cx.create(select);

    let mut first = None;
    let mut selected = None;
    for option in &node.options {
        let element = build_option(cx, option);
        let value = element.value().to_string();
        let is_selected = element.has_attribute("selected");
        cx.append(id, element)?;

        first.get_or_insert_with(|| value.clone());
        if is_selected && selected.is_none() {
            selected = Some(value);
        }
    }

    if let Some(value) = selected.or(first) {
        cx.tree.set_value(id, value)?;
    }
    Ok(id)
}

fn build_option(cx: &BuildContext<'_>, option: &OptionNode) -> Element {
    let mut element = Element::new("option");
    let label = option.content.clone().unwrap_or_default();
    cx.binder.apply_table(&mut element, tables::OPTION, &option.attributes);

    // an option without a value submits its text
    if present(&option.attributes, "value").is_none() {
        element.set_value(label.clone());
    }
    if !label.is_empty() {
        element.set_content(TextContent::Plain(label));
    }
    element
}

fn build_toggle(
    cx: &mut BuildContext<'_>,
    node: &ComponentNode,
    input_type: &str,
    wrapper_classes: &str,
) -> Result<ElementId> {
    let wrapper = cx.create(Element::with_classes("div", wrapper_classes));

    let mut input = Element::new("input");
    input.set_attribute("type", Value::String(input_type.to_string()));
    cx.bind(&mut input, node, tables::TOGGLE, &[]);
    // checkboxes report "on" when checked without an explicit value
    if present(&node.attributes, "value").is_none() {
        input.set_value("on");
    }
    let target = input.attribute("id").cloned();
    cx.append(wrapper, input)?;

    if let Some(text) = node.label.as_deref().filter(|l| !l.is_empty()) {
        let mut label = Element::new("label");
        if let Some(target) = target {
            label.set_attribute("for", target);
        }
        label.set_content(TextContent::Plain(text.to_string()));
        cx.append(wrapper, label)?;
    }

    Ok(wrapper)
}

fn build_fieldset(cx: &mut BuildContext<'_>, node: &ComponentNode) -> Result<ElementId> {
    let mut fieldset = Element::new("fieldset");
    cx.bind(&mut fieldset, node, tables::FIELDSET, &[]);
    let id = cx.create(fieldset);

    if let Some(text) = node.legend.as_deref().filter(|l| !l.is_empty()) {
        let mut legend = Element::new("legend");
        legend.set_content(TextContent::Plain(text.to_string()));
        cx.append(id, legend)?;
    }
    Ok(id)
}
