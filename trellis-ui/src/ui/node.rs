use crate::error::Result;
use crate::events::{EventKind, UiEvent};
use crate::schema::Callback;
use crate::script::ScriptHandler;
use serde::Serialize;
use serde_json::Value;
use smallvec::SmallVec;
use std::collections::BTreeMap;

/// Unique identifier for an element within one built tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ElementId(pub(crate) u32);

impl ElementId {
    pub fn index(self) -> u32 {
        self.0
    }
}

/// Arena-based storage for elements
#[derive(Debug, Default)]
pub struct ElementArena {
    elements: Vec<Option<Element>>,
    free_list: Vec<u32>,
}

impl ElementArena {
    pub fn create(&mut self, element: Element) -> ElementId {
        if let Some(idx) = self.free_list.pop() {
            self.elements[idx as usize] = Some(element);
            ElementId(idx)
        } else {
            let idx = self.elements.len() as u32;
            self.elements.push(Some(element));
            ElementId(idx)
        }
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0 as usize).and_then(|e| e.as_ref())
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.0 as usize).and_then(|e| e.as_mut())
    }

    /// Remove an element and return it; its slot is reused by later creates
    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        let element = self.elements.get_mut(id.0 as usize)?.take();
        if element.is_some() {
            self.free_list.push(id.0);
        }
        element
    }

    /// Number of live elements
    pub fn len(&self) -> usize {
        self.elements.len() - self.free_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Text payload of an element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum TextContent {
    /// Literal text, never interpreted
    Plain(String),
    /// Markup fragment handed to the presentation layer as-is
    Markup(String),
}

impl TextContent {
    pub fn value(&self) -> &str {
        match self {
            TextContent::Plain(s) | TextContent::Markup(s) => s,
        }
    }
}

/// Queued presentation effect; playback belongs to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    FadeIn { duration_ms: u32 },
    SlideDown { duration_ms: u32 },
    /// Class added for `duration_ms` then removed again
    FlashClass { class: String, duration_ms: u32 },
    Named(String),
}

/// Bound handler, either native or compiled from handler source text
#[derive(Debug, Clone)]
pub enum EventHandler {
    Native(Callback),
    Script(ScriptHandler),
}

impl EventHandler {
    pub fn invoke(&self, event: &UiEvent) -> Result<()> {
        match self {
            EventHandler::Native(callback) => callback.call(event),
            EventHandler::Script(script) => script.call(event),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Listener {
    pub kind: EventKind,
    pub handler: EventHandler,
}

const INPUT_CAPABLE: &[&str] = &["input", "select", "textarea"];

/// One constructed UI element
#[derive(Debug, Clone)]
pub struct Element {
    pub(crate) tag: String,
    pub(crate) attributes: BTreeMap<String, Value>,
    pub(crate) classes: Vec<String>,
    pub(crate) style: BTreeMap<String, Value>,
    pub(crate) content: Option<TextContent>,
    pub(crate) value: String,
    pub(crate) checked: bool,
    pub(crate) listeners: SmallVec<[Listener; 2]>,
    pub(crate) transitions: Vec<Transition>,
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
    pub(crate) error_message: Option<ElementId>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            classes: Vec::new(),
            style: BTreeMap::new(),
            content: None,
            value: String::new(),
            checked: false,
            listeners: SmallVec::new(),
            transitions: Vec::new(),
            parent: None,
            children: Vec::new(),
            error_message: None,
        }
    }

    /// Element with a fixed class list, e.g. wrappers and banners
    pub fn with_classes(tag: impl Into<String>, classes: &str) -> Self {
        let mut element = Self::new(tag);
        element.add_class(classes);
        element
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Attribute rendered as text, the way a markup attribute would read
    pub fn attribute_str(&self, name: &str) -> Option<String> {
        self.attributes.get(name).map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    pub fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: Value) {
        self.attributes.insert(name.into(), value);
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add one or more whitespace-separated classes, skipping duplicates
    pub fn add_class(&mut self, classes: &str) {
        for class in classes.split_whitespace() {
            if !self.has_class(class) {
                self.classes.push(class.to_string());
            }
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    pub fn style(&self) -> &BTreeMap<String, Value> {
        &self.style
    }

    pub fn set_style(&mut self, property: impl Into<String>, value: Value) {
        self.style.insert(property.into(), value);
    }

    pub fn content(&self) -> Option<&TextContent> {
        self.content.as_ref()
    }

    pub fn set_content(&mut self, content: TextContent) {
        self.content = Some(content);
    }

    /// Live value, as typed by the user or seeded from the `value` attribute
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn checked(&self) -> bool {
        self.checked
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    pub fn listeners(&self) -> &[Listener] {
        &self.listeners
    }

    pub fn add_listener(&mut self, kind: EventKind, handler: EventHandler) {
        self.listeners.push(Listener { kind, handler });
    }

    pub fn listeners_for(&self, kind: EventKind) -> impl Iterator<Item = &EventHandler> + '_ {
        self.listeners
            .iter()
            .filter(move |l| l.kind == kind)
            .map(|l| &l.handler)
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn push_transition(&mut self, transition: Transition) {
        self.transitions.push(transition);
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    /// Inline validation message currently attached to this element
    pub fn error_message(&self) -> Option<ElementId> {
        self.error_message
    }

    /// input, select and textarea carry a value and take part in validation
    pub fn is_input_capable(&self) -> bool {
        INPUT_CAPABLE.contains(&self.tag.as_str())
    }

    /// Checkbox or radio input, whose value only counts when checked
    pub fn is_toggle(&self) -> bool {
        self.tag == "input"
            && matches!(
                self.attributes.get("type").and_then(Value::as_str),
                Some("checkbox") | Some("radio")
            )
    }
}
