use super::node::{AttrValue, Callback, ComponentNode, OptionNode};
use serde_json::{Value, json};

impl ComponentNode {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes
            .insert(key.into(), AttrValue::Json(value.into()));
        self
    }

    /// Bind a native handler under an event key such as `onClick`
    pub fn on(mut self, event_key: impl Into<String>, callback: Callback) -> Self {
        self.attributes
            .insert(event_key.into(), AttrValue::Callback(callback));
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn legend(mut self, legend: impl Into<String>) -> Self {
        self.legend = Some(legend.into());
        self
    }

    pub fn animation(mut self, animation: impl Into<String>) -> Self {
        self.animation = Some(animation.into());
        self
    }

    pub fn child(mut self, child: ComponentNode) -> Self {
        self.components.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = ComponentNode>) -> Self {
        self.components.extend(children);
        self
    }

    pub fn option(
        mut self,
        value: impl Into<String>,
        text: impl Into<String>,
        selected: bool,
    ) -> Self {
        let mut option = OptionNode {
            content: Some(text.into()),
            ..OptionNode::default()
        };
        option
            .attributes
            .insert("value".to_string(), AttrValue::Json(Value::String(value.into())));
        if selected {
            option
                .attributes
                .insert("selected".to_string(), AttrValue::Json(Value::Bool(true)));
        }
        self.options.push(option);
        self
    }
}

/// Assembles a form node out of labelled field groups
#[derive(Debug)]
pub struct FormBuilder {
    form: ComponentNode,
    current_group: Option<ComponentNode>,
    group_class: String,
}

impl FormBuilder {
    pub fn new(form_id: impl Into<String>) -> Self {
        let form_id: String = form_id.into();
        let form = ComponentNode::new("form").attr("id", form_id);
        Self {
            form,
            current_group: None,
            group_class: "form-group".to_string(),
        }
    }

    pub fn action(mut self, action: impl Into<String>) -> Self {
        let action: String = action.into();
        self.form = self.form.attr("action", action);
        self
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        let method: String = method.into();
        self.form = self.form.attr("method", method);
        self
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        let class_name: String = class_name.into();
        self.form = self.form.attr("className", class_name);
        self
    }

    pub fn start_group(mut self, class_name: impl Into<String>) -> Self {
        self = self.end_group();
        let class_name: String = class_name.into();
        self.current_group = Some(ComponentNode::new("div").attr("className", class_name));
        self
    }

    pub fn end_group(mut self) -> Self {
        if let Some(group) = self.current_group.take() {
            self.form.components.push(group);
        }
        self
    }

    pub fn text_field(self, field: Field) -> Self {
        self.input_field("text", field)
    }

    pub fn email_field(self, field: Field) -> Self {
        self.input_field("email", field)
    }

    pub fn password_field(self, field: Field) -> Self {
        self.input_field("password", field)
    }

    pub fn textarea_field(self, field: Field, rows: u32) -> Self {
        let label = field.label_node();
        let textarea = field.apply(ComponentNode::new("textarea").attr("rows", rows));
        self.push_pair(label, textarea)
    }

    pub fn select_field(self, field: Field, options: &[(&str, &str)]) -> Self {
        let label = field.label_node();
        let mut select = field.apply(ComponentNode::new("select"));
        for (value, text) in options {
            select = select.option(*value, *text, false);
        }
        self.push_pair(label, select)
    }

    pub fn checkbox_field(mut self, field: Field) -> Self {
        let checkbox = ComponentNode::new("checkbox")
            .attr("id", field.id.clone())
            .attr("name", field.name())
            .attr("required", field.required)
            .label(field.label.clone());
        self.group().components.push(checkbox);
        self
    }

    pub fn submit_button(mut self, text: impl Into<String>) -> Self {
        self = self.end_group();
        let button = ComponentNode::new("button")
            .attr("type", "submit")
            .attr("className", "btn btn-primary")
            .content(text);
        self.form.components.push(button);
        self
    }

    pub fn build(self) -> ComponentNode {
        self.end_group().form
    }

    fn input_field(self, input_type: &str, field: Field) -> Self {
        let label = field.label_node();
        let input = field.apply(ComponentNode::new("input").attr("type", input_type));
        self.push_pair(label, input)
    }

    fn push_pair(mut self, label: ComponentNode, control: ComponentNode) -> Self {
        let group = self.group();
        group.components.push(label);
        group.components.push(control);
        self
    }

    fn group(&mut self) -> &mut ComponentNode {
        let class_name = self.group_class.clone();
        self.current_group
            .get_or_insert_with(|| ComponentNode::new("div").attr("className", class_name))
    }
}

/// Description of one labelled form field
#[derive(Debug, Clone, Default)]
pub struct Field {
    pub id: String,
    pub label: String,
    pub name: Option<String>,
    pub placeholder: Option<String>,
    pub required: bool,
    pub min_length: Option<u32>,
    pub max_length: Option<u32>,
    pub pattern: Option<String>,
}

impl Field {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn min_length(mut self, min: u32) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: u32) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    fn name(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.id.clone())
    }

    fn label_node(&self) -> ComponentNode {
        ComponentNode::new("label")
            .attr("htmlFor", self.id.clone())
            .attr("className", "form-label")
            .content(self.label.clone())
    }

    fn apply(&self, node: ComponentNode) -> ComponentNode {
        let mut node = node
            .attr("id", self.id.clone())
            .attr("name", self.name())
            .attr("className", "form-control")
            .attr("required", self.required);
        if let Some(placeholder) = &self.placeholder {
            node = node.attr("placeholder", placeholder.clone());
        }
        if let Some(min) = self.min_length {
            node = node.attr("minLength", min);
        }
        if let Some(max) = self.max_length {
            node = node.attr("maxLength", max);
        }
        if let Some(pattern) = &self.pattern {
            node = node.attr("pattern", json!(pattern));
        }
        node
    }
}
