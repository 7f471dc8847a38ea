use crate::error::Result;
use crate::ui::{Element, ElementId, UiTree};
use crate::validation;
use serde_json::{Map, Value};

/// Collect `name -> value` for every named, enabled field under `scope`.
///
/// Checkboxes and radios count only when checked. Repeated names collect
/// into an array, in document order.
pub fn form_data(tree: &UiTree, scope: ElementId) -> Map<String, Value> {
    let mut data = Map::new();

    for id in tree.descendants(scope) {
        let Some(element) = tree.get(id) else {
            continue;
        };
        if !element.is_input_capable() || element.has_attribute("disabled") {
            continue;
        }
        let Some(name) = element.attribute("name").and_then(Value::as_str) else {
            continue;
        };
        if element.is_toggle() && !element.checked() {
            continue;
        }

        let value = Value::String(element.value().to_string());
        match data.get_mut(name) {
            Some(Value::Array(values)) => values.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                data.insert(name.to_string(), value);
            }
        }
    }

    data
}

/// Empty every field under `scope`, uncheck toggles, and drop all inline
/// validation errors
pub fn clear_form(tree: &mut UiTree, scope: ElementId) -> Result<()> {
    tree.element(scope)?;
    let fields: Vec<ElementId> = tree
        .descendants(scope)
        .into_iter()
        .filter(|&id| tree.get(id).is_some_and(Element::is_input_capable))
        .collect();

    for id in fields {
        let element = tree.element_mut(id)?;
        if element.is_toggle() {
            element.set_checked(false);
        } else {
            element.set_value("");
        }
        validation::clear_error(tree, id)?;
    }
    Ok(())
}

/// Uncheck every other radio sharing `id`'s name
pub fn select_radio(tree: &mut UiTree, id: ElementId) -> Result<()> {
    let element = tree.element(id)?;
    if element.attribute("type").and_then(Value::as_str) != Some("radio") {
        return Ok(());
    }
    let Some(name) = element.attribute("name").cloned() else {
        return Ok(());
    };

    let others: Vec<ElementId> = tree
        .find_by_tag("input")
        .into_iter()
        .filter(|&other| other != id)
        .filter(|&other| {
            tree.get(other).is_some_and(|e| {
                e.attribute("type").and_then(Value::as_str) == Some("radio")
                    && e.attribute("name") == Some(&name)
            })
        })
        .collect();

    for other in others {
        tree.set_checked(other, false)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(tree: &mut UiTree, form: ElementId, attributes: Value, value: &str) -> ElementId {
        let mut element = Element::new("input");
        if let Value::Object(map) = attributes {
            for (key, value) in map {
                element.set_attribute(key, value);
            }
        }
        element.set_value(value);
        let id = tree.create(element);
        tree.append_child(form, id).unwrap();
        id
    }

    fn form() -> (UiTree, ElementId) {
        let mut tree = UiTree::new();
        let form = tree.create(Element::new("form"));
        tree.push_root(form);
        (tree, form)
    }

    #[test]
    fn test_form_data() {
        let (mut tree, form) = form();
        input(&mut tree, form, json!({ "name": "email" }), "a@b.com");
        input(&mut tree, form, json!({}), "unnamed");
        input(&mut tree, form, json!({ "name": "gone", "disabled": true }), "x");
        let agree = input(&mut tree, form, json!({ "name": "agree", "type": "checkbox" }), "on");
        input(&mut tree, form, json!({ "name": "news", "type": "checkbox" }), "on");

        tree.set_checked(agree, true).unwrap();

        let data = form_data(&tree, form);
        assert_eq!(Value::Object(data), json!({ "email": "a@b.com", "agree": "on" }));
    }

    #[test]
    fn test_repeated_names_collect() {
        let (mut tree, form) = form();
        for tag in ["red", "green", "blue"] {
            let id = input(&mut tree, form, json!({ "name": "color", "type": "checkbox" }), tag);
            tree.set_checked(id, tag != "green").unwrap();
        }

        let data = form_data(&tree, form);
        assert_eq!(data.get("color"), Some(&json!(["red", "blue"])));
    }

    #[test]
    fn test_clear_form() {
        let (mut tree, form) = form();
        let name = input(&mut tree, form, json!({ "name": "name" }), "Ada");
        let agree = input(&mut tree, form, json!({ "name": "agree", "type": "checkbox" }), "on");
        tree.set_checked(agree, true).unwrap();
        validation::show_error(&mut tree, name, "required").unwrap();
        assert_eq!(tree.children(form).len(), 3);

        clear_form(&mut tree, form).unwrap();

        assert_eq!(tree.get(name).unwrap().value(), "");
        assert_eq!(tree.get(agree).unwrap().value(), "on");
        assert!(!tree.get(agree).unwrap().checked());
        assert_eq!(tree.children(form), [name, agree]);
        assert!(!tree.get(name).unwrap().has_class(validation::ERROR_CLASS));
    }

    #[test]
    fn test_select_radio() {
        let (mut tree, form) = form();
        let small = input(&mut tree, form, json!({ "name": "size", "type": "radio" }), "s");
        let large = input(&mut tree, form, json!({ "name": "size", "type": "radio" }), "l");
        let other = input(&mut tree, form, json!({ "name": "tier", "type": "radio" }), "t");
        tree.set_checked(small, true).unwrap();
        tree.set_checked(other, true).unwrap();

        tree.set_checked(large, true).unwrap();
        select_radio(&mut tree, large).unwrap();

        assert!(!tree.get(small).unwrap().checked());
        assert!(tree.get(large).unwrap().checked());
        assert!(tree.get(other).unwrap().checked());
    }
}
