//! Field validation driven by bound attributes.
//!
//! Rules are never declared separately: `required`, `type="email"`,
//! `minlength`, `maxlength` and `pattern` on a built element are its rules.
//! Failures are shown inline, next to the element, and never raised.

pub mod rules;

use crate::error::Result;
use crate::ui::{Element, ElementId, TextContent, UiTree};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

pub const ERROR_CLASS: &str = "border-red-500";
pub const MESSAGE_CLASSES: &str = "validation-error text-red-600 text-sm mt-1";

/// Parameter handed to a rule evaluator
#[derive(Debug, Clone, PartialEq)]
pub enum RuleParam {
    /// Rule with no parameter, e.g. `required`
    Flag,
    Length(usize),
    Pattern(String),
    /// Free-form parameter for caller-registered rules
    Value(Value),
}

impl RuleParam {
    pub fn as_length(&self) -> Option<usize> {
        match self {
            RuleParam::Length(n) => Some(*n),
            RuleParam::Value(value) => parse_length(value),
            _ => None,
        }
    }

    pub fn as_pattern(&self) -> Option<&str> {
        match self {
            RuleParam::Pattern(p) => Some(p),
            RuleParam::Value(Value::String(p)) => Some(p),
            _ => None,
        }
    }
}

/// Ordered rule name to parameter list; inserting an existing name keeps
/// its position
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    entries: Vec<(String, RuleParam)>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, param: RuleParam) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = param,
            None => self.entries.push((name, param)),
        }
    }

    pub fn with(mut self, name: impl Into<String>, param: RuleParam) -> Self {
        self.insert(name, param);
        self
    }

    pub fn get(&self, name: &str) -> Option<&RuleParam> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, p)| p)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleParam)> {
        self.entries.iter().map(|(n, p)| (n.as_str(), p))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Rule evaluator: `(current value, parameter) -> passes`
pub type RuleFn = Rc<dyn Fn(&str, &RuleParam) -> bool>;

/// Result of validating one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldReport {
    pub element: ElementId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Failed rule identifiers, in rule order
    pub failed: Vec<String>,
}

impl FieldReport {
    pub fn is_valid(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn message(&self) -> String {
        self.failed.join(", ")
    }
}

/// Registry of named rule evaluators, owned by one renderer
#[derive(Clone)]
pub struct ValidationEngine {
    rules: HashMap<String, RuleFn>,
}

impl ValidationEngine {
    /// Engine with the default rule set
    pub fn new() -> Self {
        let mut engine = Self {
            rules: HashMap::new(),
        };
        engine.register(rules::REQUIRED, rules::required);
        engine.register(rules::EMAIL, rules::email);
        engine.register(rules::MIN_LENGTH, rules::min_length);
        engine.register(rules::MAX_LENGTH, rules::max_length);
        engine.register(rules::PATTERN, rules::pattern);
        engine
    }

    /// Add or replace a named rule
    pub fn register<F>(&mut self, name: impl Into<String>, evaluator: F)
    where
        F: Fn(&str, &RuleParam) -> bool + 'static,
    {
        self.rules.insert(name.into(), Rc::new(evaluator));
    }

    pub fn has_rule(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Run one rule directly against a value. Unknown rules pass.
    pub fn check(&self, rule: &str, value: &str, param: &RuleParam) -> bool {
        match self.rules.get(rule) {
            Some(evaluator) => evaluator(value, param),
            None => {
                debug!("no evaluator registered for rule {}", rule);
                true
            }
        }
    }

    /// Failed rule identifiers for `value`, in rule-set order
    pub fn evaluate(&self, value: &str, rules: &RuleSet) -> Vec<String> {
        rules
            .iter()
            .filter(|(name, param)| !self.check(name, value, param))
            .map(|(name, _)| name.to_string())
            .collect()
    }

    /// Validate an element against the rules its attributes declare
    pub fn validate_element(&self, tree: &mut UiTree, id: ElementId) -> Result<bool> {
        let rules = extract_rules(tree.element(id)?);
        self.validate_element_with(tree, id, &rules)
    }

    /// Validate an element against an explicit rule set and update its
    /// inline error state
    pub fn validate_element_with(
        &self,
        tree: &mut UiTree,
        id: ElementId,
        rules: &RuleSet,
    ) -> Result<bool> {
        let failed = self.evaluate(&field_value(tree.element(id)?), rules);
        if failed.is_empty() {
            clear_error(tree, id)?;
            Ok(true)
        } else {
            show_error(tree, id, &failed.join(", "))?;
            Ok(false)
        }
    }

    /// Validate every input-capable descendant of `scope` that declares at
    /// least one rule. Never stops at the first failure.
    pub fn validate_form(&self, tree: &mut UiTree, scope: ElementId) -> Result<bool> {
        let reports = self.validate_scope(tree, scope)?;
        Ok(reports.iter().all(FieldReport::is_valid))
    }

    /// Like [`validate_form`](Self::validate_form), returning one report per
    /// validated field
    pub fn validate_scope(&self, tree: &mut UiTree, scope: ElementId) -> Result<Vec<FieldReport>> {
        tree.element(scope)?;
        let fields: Vec<ElementId> = tree
            .descendants(scope)
            .into_iter()
            .filter(|&id| tree.get(id).is_some_and(Element::is_input_capable))
            .collect();

        let mut reports = Vec::new();
        for id in fields {
            let element = tree.element(id)?;
            let rules = extract_rules(element);
            if rules.is_empty() {
                continue;
            }
            let name = element.attribute("name").and_then(Value::as_str).map(str::to_string);
            let failed = self.evaluate(&field_value(element), &rules);

            if failed.is_empty() {
                clear_error(tree, id)?;
            } else {
                show_error(tree, id, &failed.join(", "))?;
            }
            reports.push(FieldReport {
                element: id,
                name,
                failed,
            });
        }
        Ok(reports)
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ValidationEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("ValidationEngine").field("rules", &names).finish()
    }
}

/// Derive the active rules from an element's bound attributes, in the order
/// required, email, minLength, maxLength, pattern
pub fn extract_rules(element: &Element) -> RuleSet {
    let mut found = RuleSet::new();

    if element.has_attribute("required") {
        found.insert(rules::REQUIRED, RuleParam::Flag);
    }
    if element.attribute("type").and_then(Value::as_str) == Some("email") {
        found.insert(rules::EMAIL, RuleParam::Flag);
    }
    for (attribute, rule) in [("minlength", rules::MIN_LENGTH), ("maxlength", rules::MAX_LENGTH)] {
        if let Some(value) = element.attribute(attribute) {
            match parse_length(value) {
                Some(n) => found.insert(rule, RuleParam::Length(n)),
                None => debug!("ignoring unparseable {} {}", attribute, value),
            }
        }
    }
    if let Some(pattern) = element.attribute("pattern").and_then(Value::as_str) {
        found.insert(rules::PATTERN, RuleParam::Pattern(pattern.to_string()));
    }

    found
}

/// Value a rule sees: the live value, or empty for an unchecked toggle
fn field_value(element: &Element) -> String {
    if element.is_toggle() && !element.checked() {
        String::new()
    } else {
        element.value().to_string()
    }
}

/// Leading-integer parse of a length attribute
fn parse_length(value: &Value) -> Option<usize> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .map(|n| n as usize),
        Value::String(s) => {
            let digits: String = s.trim().chars().take_while(char::is_ascii_digit).collect();
            digits.parse().ok()
        }
        _ => None,
    }
}

/// Mark an element invalid and attach or update its inline message
pub fn show_error(tree: &mut UiTree, id: ElementId, message: &str) -> Result<()> {
    let existing = tree.element(id)?.error_message().filter(|m| tree.get(*m).is_some());

    match existing {
        Some(message_id) => {
            tree.element_mut(message_id)?
                .set_content(TextContent::Plain(message.to_string()));
        }
        None => {
            let mut div = Element::with_classes("div", MESSAGE_CLASSES);
            div.set_content(TextContent::Plain(message.to_string()));
            let message_id = tree.create(div);
            tree.insert_after(id, message_id)?;
            tree.element_mut(id)?.error_message = Some(message_id);
        }
    }

    tree.element_mut(id)?.add_class(ERROR_CLASS);
    Ok(())
}

/// Remove an element's error class and inline message, if any
pub fn clear_error(tree: &mut UiTree, id: ElementId) -> Result<()> {
    let element = tree.element_mut(id)?;
    element.remove_class(ERROR_CLASS);
    if let Some(message) = element.error_message.take()
        && tree.get(message).is_some()
    {
        tree.remove_subtree(message)?;
    }
    Ok(())
}
