//! Type tag to builder mapping.
//!
//! Every renderer owns one [`DispatchRegistry`]. It starts with a builder for
//! each [`ComponentKind`] and can be extended or overridden per instance.

mod builtin;

pub use builtin::{Builtin, DiagnosticPlaceholder};

use crate::binder::{AttrSpec, AttributeBinder};
use crate::error::Result;
use crate::schema::{ComponentNode, present};
use crate::ui::{Element, ElementId, UiTree};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Closed set of built-in component types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Input,
    Select,
    Textarea,
    Button,
    Label,
    Div,
    Span,
    Form,
    Checkbox,
    Radio,
    Fieldset,
    Legend,
    Img,
    Link,
    /// `h1` through `h6`
    Heading(u8),
    Paragraph,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 21] = [
        ComponentKind::Input,
        ComponentKind::Select,
        ComponentKind::Textarea,
        ComponentKind::Button,
        ComponentKind::Label,
        ComponentKind::Div,
        ComponentKind::Span,
        ComponentKind::Form,
        ComponentKind::Checkbox,
        ComponentKind::Radio,
        ComponentKind::Fieldset,
        ComponentKind::Legend,
        ComponentKind::Img,
        ComponentKind::Link,
        ComponentKind::Heading(1),
        ComponentKind::Heading(2),
        ComponentKind::Heading(3),
        ComponentKind::Heading(4),
        ComponentKind::Heading(5),
        ComponentKind::Heading(6),
        ComponentKind::Paragraph,
    ];

    pub fn parse(tag: &str) -> Option<Self> {
        let kind = match tag {
            "input" => ComponentKind::Input,
            "select" => ComponentKind::Select,
            "textarea" => ComponentKind::Textarea,
            "button" => ComponentKind::Button,
            "label" => ComponentKind::Label,
            "div" => ComponentKind::Div,
            "span" => ComponentKind::Span,
            "form" => ComponentKind::Form,
            "checkbox" => ComponentKind::Checkbox,
            "radio" => ComponentKind::Radio,
            "fieldset" => ComponentKind::Fieldset,
            "legend" => ComponentKind::Legend,
            "img" => ComponentKind::Img,
            "a" => ComponentKind::Link,
            "h1" => ComponentKind::Heading(1),
            "h2" => ComponentKind::Heading(2),
            "h3" => ComponentKind::Heading(3),
            "h4" => ComponentKind::Heading(4),
            "h5" => ComponentKind::Heading(5),
            "h6" => ComponentKind::Heading(6),
            "p" => ComponentKind::Paragraph,
            _ => return None,
        };
        Some(kind)
    }

    /// Type tag as written in documents
    pub fn as_str(self) -> &'static str {
        match self {
            ComponentKind::Input => "input",
            ComponentKind::Select => "select",
            ComponentKind::Textarea => "textarea",
            ComponentKind::Button => "button",
            ComponentKind::Label => "label",
            ComponentKind::Div => "div",
            ComponentKind::Span => "span",
            ComponentKind::Form => "form",
            ComponentKind::Checkbox => "checkbox",
            ComponentKind::Radio => "radio",
            ComponentKind::Fieldset => "fieldset",
            ComponentKind::Legend => "legend",
            ComponentKind::Img => "img",
            ComponentKind::Link => "a",
            ComponentKind::Heading(1) => "h1",
            ComponentKind::Heading(2) => "h2",
            ComponentKind::Heading(3) => "h3",
            ComponentKind::Heading(4) => "h4",
            ComponentKind::Heading(5) => "h5",
            ComponentKind::Heading(_) => "h6",
            ComponentKind::Paragraph => "p",
        }
    }

    /// Whether the node's `components` are built and appended
    pub fn accepts_children(self) -> bool {
        matches!(
            self,
            ComponentKind::Div | ComponentKind::Form | ComponentKind::Fieldset
        )
    }
}

/// State a builder works against while constructing one node
pub struct BuildContext<'a> {
    pub tree: &'a mut UiTree,
    pub binder: AttributeBinder<'a>,
}

impl<'a> BuildContext<'a> {
    pub fn new(tree: &'a mut UiTree, binder: AttributeBinder<'a>) -> Self {
        Self { tree, binder }
    }

    /// Bind a node's attributes onto `element` with the given type table.
    ///
    /// A node-level `id` becomes the `id` attribute when the attribute map
    /// carries none.
    pub fn bind(
        &self,
        element: &mut Element,
        node: &ComponentNode,
        table: &[AttrSpec],
        extra_events: &[&str],
    ) {
        if present(&node.attributes, "id").is_none()
            && let Some(id) = node.id.as_deref().filter(|id| !id.is_empty())
        {
            element.set_attribute("id", Value::String(id.to_string()));
        }
        self.binder.bind(element, &node.attributes, table, extra_events);
    }

    pub fn create(&mut self, element: Element) -> ElementId {
        self.tree.create(element)
    }

    pub fn append(&mut self, parent: ElementId, child: Element) -> Result<ElementId> {
        let id = self.tree.create(child);
        self.tree.append_child(parent, id)?;
        Ok(id)
    }
}

/// Builds the element for one node. Children, when accepted, are built and
/// appended afterwards by the tree builder.
pub trait ComponentBuilder {
    fn build(&self, cx: &mut BuildContext<'_>, node: &ComponentNode) -> Result<ElementId>;

    fn accepts_children(&self) -> bool {
        false
    }
}

impl<F> ComponentBuilder for F
where
    F: Fn(&mut BuildContext<'_>, &ComponentNode) -> Result<ElementId>,
{
    fn build(&self, cx: &mut BuildContext<'_>, node: &ComponentNode) -> Result<ElementId> {
        self(cx, node)
    }
}

/// Per-renderer mapping from type tag to builder
pub struct DispatchRegistry {
    builders: HashMap<String, Box<dyn ComponentBuilder>>,
    fallback: Option<Box<dyn ComponentBuilder>>,
}

impl DispatchRegistry {
    /// Registry holding only the built-in types
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for kind in ComponentKind::ALL {
            registry.register(kind.as_str(), Builtin(kind));
        }
        registry
    }

    /// Registry with no builders at all
    pub fn empty() -> Self {
        Self {
            builders: HashMap::new(),
            fallback: None,
        }
    }

    /// Add a builder for `kind`, replacing any previous one
    pub fn register(&mut self, kind: impl Into<String>, builder: impl ComponentBuilder + 'static) {
        self.builders.insert(kind.into(), Box::new(builder));
    }

    pub fn unregister(&mut self, kind: &str) -> bool {
        self.builders.remove(kind).is_some()
    }

    /// Builder used for unrecognized types instead of dropping the node
    pub fn set_fallback(&mut self, builder: impl ComponentBuilder + 'static) {
        self.fallback = Some(Box::new(builder));
    }

    pub fn clear_fallback(&mut self) {
        self.fallback = None;
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.builders.contains_key(kind)
    }

    /// Registered builder for `kind`, else the fallback if one is set
    pub fn resolve(&self, kind: &str) -> Option<&dyn ComponentBuilder> {
        self.builders
            .get(kind)
            .or(self.fallback.as_ref())
            .map(|builder| builder.as_ref())
    }
}

impl Default for DispatchRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DispatchRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<&str> = self.builders.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        f.debug_struct("DispatchRegistry")
            .field("kinds", &kinds)
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}
