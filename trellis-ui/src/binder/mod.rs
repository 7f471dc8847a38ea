//! Table-driven attribute and event application onto built elements.

pub mod tables;

pub use tables::AttrSpec;

use crate::events::EventKind;
use crate::schema::{AttrValue, Attributes, present};
use crate::script::{ScriptHost, ScriptPolicy};
use crate::ui::{Element, EventHandler};
use serde_json::Value;
use tracing::{debug, warn};

/// Applies attribute tables and handler bindings to one element at a time
#[derive(Debug, Clone, Copy)]
pub struct AttributeBinder<'a> {
    scripts: &'a ScriptHost,
}

impl<'a> AttributeBinder<'a> {
    pub fn new(scripts: &'a ScriptHost) -> Self {
        Self { scripts }
    }

    /// Common keys, the type's own table, and the common event keys plus
    /// `extra_events`
    pub fn bind(
        &self,
        element: &mut Element,
        attributes: &Attributes,
        table: &[AttrSpec],
        extra_events: &[&str],
    ) {
        self.apply_common(element, attributes);
        self.apply_table(element, table, attributes);
        self.bind_events(element, attributes, tables::COMMON_EVENTS);
        self.bind_events(element, attributes, extra_events);
    }

    /// Common table plus `className`, `style` and `dataAttributes`
    pub fn apply_common(&self, element: &mut Element, attributes: &Attributes) {
        self.apply_table(element, tables::COMMON, attributes);

        if let Some(value) = present(attributes, "className").and_then(AttrValue::as_json) {
            match value {
                Value::String(classes) => element.add_class(classes),
                Value::Array(items) => items
                    .iter()
                    .filter_map(Value::as_str)
                    .for_each(|class| element.add_class(class)),
                other => debug!("ignoring className of unsupported shape: {}", other),
            }
        }

        if let Some(Value::Object(style)) =
            present(attributes, "style").and_then(AttrValue::as_json)
        {
            for (property, value) in style {
                if is_present(value) {
                    element.set_style(property.clone(), value.clone());
                }
            }
        }

        if let Some(Value::Object(data)) =
            present(attributes, "dataAttributes").and_then(AttrValue::as_json)
        {
            for (key, value) in data {
                if is_present(value) {
                    element.set_attribute(format!("data-{key}"), value.clone());
                }
            }
        }
    }

    /// Copy every present key of `table` onto the element under its DOM name.
    ///
    /// Never removes anything already set. `value` and `checked` also seed
    /// the element's live state.
    pub fn apply_table(&self, element: &mut Element, table: &[AttrSpec], attributes: &Attributes) {
        for spec in table {
            let Some(value) = present(attributes, spec.key) else {
                continue;
            };
            let Some(value) = value.as_json() else {
                debug!("ignoring callable value for {} on <{}>", spec.key, element.tag());
                continue;
            };

            match spec.dom {
                "value" => element.set_value(value_text(value)),
                "checked" => element.set_checked(true),
                _ => {}
            }
            element.set_attribute(spec.dom, value.clone());
        }
    }

    /// Bind handlers for each of `keys` found in the attribute map.
    ///
    /// Callables bind directly. Strings are compiled unless the script
    /// policy rejects them. Any other value kind is skipped.
    pub fn bind_events(&self, element: &mut Element, attributes: &Attributes, keys: &[&str]) {
        for &key in keys {
            let Some(value) = attributes.get(key) else {
                continue;
            };
            let Some(kind) = EventKind::from_attribute(key) else {
                continue;
            };

            match value {
                AttrValue::Callback(callback) => {
                    element.add_listener(kind, EventHandler::Native(callback.clone()));
                }
                AttrValue::Json(Value::String(source)) if !source.trim().is_empty() => {
                    if let Some(handler) = self.compile(element, key, source) {
                        element.add_listener(kind, EventHandler::Script(handler));
                    }
                }
                AttrValue::Json(Value::Null) => {}
                AttrValue::Json(other) => {
                    debug!("ignoring {} on <{}>: not a handler ({})", key, element.tag(), other)
                }
            }
        }
    }

    fn compile(
        &self,
        element: &Element,
        key: &str,
        source: &str,
    ) -> Option<crate::script::ScriptHandler> {
        let chunk = match element.attribute("id").and_then(Value::as_str) {
            Some(id) => format!("{}#{}.{}", element.tag(), id, key),
            None => format!("{}.{}", element.tag(), key),
        };

        if self.scripts.policy() == ScriptPolicy::Reject {
            warn!("rejected string handler {} (script policy is reject)", chunk);
            return None;
        }

        match self.scripts.compile(source, &chunk) {
            Ok(handler) => Some(handler),
            Err(e) => {
                warn!("skipping handler {}: {}", chunk, e);
                None
            }
        }
    }
}

/// Presence rule applied to a bare JSON value
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// Text form of an attribute value, as a form field would read it
pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
