use crate::error::Result;
use crate::events::UiEvent;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use tracing::warn;

/// Native event handler attached to a node built in Rust rather than parsed from JSON
#[derive(Clone)]
pub struct Callback(Rc<dyn Fn(&UiEvent) -> Result<()>>);

impl Callback {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&UiEvent) -> Result<()> + 'static,
    {
        Self(Rc::new(handler))
    }

    pub fn call(&self, event: &UiEvent) -> Result<()> {
        (self.0)(event)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(..)")
    }
}

/// Value of one entry in a node's attribute map
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "Value")]
pub enum AttrValue {
    Json(Value),
    Callback(Callback),
}

impl From<Value> for AttrValue {
    fn from(value: Value) -> Self {
        AttrValue::Json(value)
    }
}

impl From<Callback> for AttrValue {
    fn from(callback: Callback) -> Self {
        AttrValue::Callback(callback)
    }
}

impl AttrValue {
    /// Presence rule for attribute application.
    ///
    /// `null`, `""` and `false` count as absent. Numeric zero is present.
    pub fn is_present(&self) -> bool {
        match self {
            AttrValue::Callback(_) => true,
            AttrValue::Json(Value::Null) => false,
            AttrValue::Json(Value::Bool(b)) => *b,
            AttrValue::Json(Value::String(s)) => !s.is_empty(),
            AttrValue::Json(_) => true,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            AttrValue::Json(value) => Some(value),
            AttrValue::Callback(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_json().and_then(Value::as_str)
    }
}

pub type Attributes = BTreeMap<String, AttrValue>;

/// Look up `key` and return it only if it passes the presence rule
pub fn present<'a>(attributes: &'a Attributes, key: &str) -> Option<&'a AttrValue> {
    attributes.get(key).filter(|value| value.is_present())
}

/// One node of the input component tree.
///
/// Parsing never fails: a field of the wrong JSON kind falls back to its
/// default and malformed children are dropped with a warning, so one bad node
/// cannot take its siblings down with it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Value")]
pub struct ComponentNode {
    pub kind: Option<String>,
    pub id: Option<String>,
    pub attributes: Attributes,
    pub content: Option<String>,
    pub components: Vec<ComponentNode>,
    pub label: Option<String>,
    pub legend: Option<String>,
    pub options: Vec<OptionNode>,
    pub animation: Option<String>,
}

impl ComponentNode {
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref().filter(|k| !k.is_empty())
    }
}

impl From<Value> for ComponentNode {
    fn from(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            warn!("component node is not an object; treating it as empty");
            return Self::default();
        };

        // `children` is an alias; `components` wins when both are set
        let children = match map.remove("components") {
            Some(Value::Null) | None => map.remove("children"),
            found => found,
        };

        Self {
            kind: string_only(map.remove("type")),
            id: text_like(map.remove("id")),
            attributes: attributes(map.remove("attributes")),
            content: text_like(map.remove("content")),
            components: node_list(children),
            label: text_like(map.remove("label")),
            legend: text_like(map.remove("legend")),
            options: option_list(map.remove("options")),
            animation: string_only(map.remove("animation")),
        }
    }
}

/// Entry of a selection widget's option list
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Value")]
pub struct OptionNode {
    pub content: Option<String>,
    pub attributes: Attributes,
}

impl From<Value> for OptionNode {
    fn from(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            return Self::default();
        };
        Self {
            content: text_like(map.remove("content")),
            attributes: attributes(map.remove("attributes")),
        }
    }
}

pub(crate) fn string_only(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

fn text_like(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn attributes(value: Option<Value>) -> Attributes {
    match value {
        Some(Value::Object(map)) => map
            .into_iter()
            .map(|(key, value)| (key, AttrValue::Json(value)))
            .collect(),
        Some(Value::Null) | None => Attributes::new(),
        Some(other) => {
            warn!("ignoring attributes of kind {}; expected an object", json_kind(&other));
            Attributes::new()
        }
    }
}

/// Child list, keeping only the entries that are objects
pub(crate) fn node_list(value: Option<Value>) -> Vec<ComponentNode> {
    match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(_) => Some(ComponentNode::from(item)),
                other => {
                    warn!("dropping child of kind {}; expected an object", json_kind(&other));
                    None
                }
            })
            .collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => {
            warn!("ignoring child list of kind {}; expected an array", json_kind(&other));
            Vec::new()
        }
    }
}

fn option_list(value: Option<Value>) -> Vec<OptionNode> {
    match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(_) => Some(OptionNode::from(item)),
                other => {
                    warn!("dropping option of kind {}; expected an object", json_kind(&other));
                    None
                }
            })
            .collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => {
            warn!("ignoring options of kind {}; expected an array", json_kind(&other));
            Vec::new()
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_presence_rule() {
        assert!(!AttrValue::from(json!(null)).is_present());
        assert!(!AttrValue::from(json!("")).is_present());
        assert!(!AttrValue::from(json!(false)).is_present());
        assert!(AttrValue::from(json!(0)).is_present());
        assert!(AttrValue::from(json!(0.0)).is_present());
        assert!(AttrValue::from(json!("0")).is_present());
        assert!(AttrValue::from(json!(true)).is_present());
        assert!(AttrValue::from(json!([])).is_present());
        assert!(AttrValue::from(Callback::new(|_| Ok(()))).is_present());
    }

    #[test]
    fn test_deserialize_node() {
        let node: ComponentNode = serde_json::from_value(json!({
            "type": "div",
            "id": "box",
            "attributes": { "className": "card", "tabIndex": 0 },
            "components": [{ "type": "span", "content": "hi" }]
        }))
        .unwrap();

        assert_eq!(node.kind(), Some("div"));
        assert_eq!(node.id.as_deref(), Some("box"));
        assert_eq!(node.components.len(), 1);
        assert_eq!(node.components[0].content.as_deref(), Some("hi"));
        assert!(present(&node.attributes, "tabIndex").is_some());
    }

    #[test]
    fn test_children_alias_and_nulls() {
        let node: ComponentNode = serde_json::from_value(json!({
            "type": "form",
            "attributes": null,
            "children": [{ "type": "input" }],
            "options": null
        }))
        .unwrap();

        assert!(node.attributes.is_empty());
        assert_eq!(node.components.len(), 1);
        assert!(node.options.is_empty());
    }

    #[test]
    fn test_non_string_type_is_missing() {
        let node: ComponentNode = serde_json::from_value(json!({ "type": 42 })).unwrap();
        assert_eq!(node.kind(), None);

        let node: ComponentNode = serde_json::from_value(json!({ "type": "" })).unwrap();
        assert_eq!(node.kind(), None);
    }

    #[test]
    fn test_wrong_kinds_fall_back_to_defaults() {
        let node: ComponentNode = serde_json::from_value(json!({
            "type": "div",
            "attributes": "x",
            "components": 5,
            "options": { "value": "a" },
            "label": ["nope"]
        }))
        .unwrap();

        assert_eq!(node.kind(), Some("div"));
        assert!(node.attributes.is_empty());
        assert!(node.components.is_empty());
        assert!(node.options.is_empty());
        assert_eq!(node.label, None);
    }

    #[test]
    fn test_malformed_children_are_dropped() {
        let node: ComponentNode = serde_json::from_value(json!({
            "type": "div",
            "components": [
                { "type": "p", "content": "first" },
                "stray text",
                null,
                [1, 2],
                { "type": "p", "content": "last", "attributes": 7 }
            ]
        }))
        .unwrap();

        let contents: Vec<_> = node.components.iter().map(|c| c.content.as_deref()).collect();
        assert_eq!(contents, [Some("first"), Some("last")]);
    }

    #[test]
    fn test_null_components_fall_through_to_children() {
        let node: ComponentNode = serde_json::from_value(json!({
            "type": "select",
            "components": null,
            "children": [{ "type": "span" }],
            "options": ["one", null, { "content": "two", "attributes": false }]
        }))
        .unwrap();

        assert_eq!(node.components.len(), 1);
        assert_eq!(node.options.len(), 1);
        assert_eq!(node.options[0].content.as_deref(), Some("two"));
        assert!(node.options[0].attributes.is_empty());
    }

    #[test]
    fn test_numeric_content_is_text() {
        let node: ComponentNode =
            serde_json::from_value(json!({ "type": "p", "content": 12 })).unwrap();
        assert_eq!(node.content.as_deref(), Some("12"));
    }
}
