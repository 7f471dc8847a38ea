use super::json::parse_bounded;
use super::node::{ComponentNode, node_list, string_only};
use crate::error::Result;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

/// Top-level page document: optional title, layout token and component list
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Value")]
pub struct PageDescription {
    pub title: Option<String>,
    pub layout: Option<String>,
    pub components: Vec<ComponentNode>,
}

impl From<Value> for PageDescription {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(mut map) => Self {
                title: string_only(map.remove("title")),
                layout: string_only(map.remove("layout")),
                components: node_list(map.remove("components")),
            },
            Value::Null => Self::default(),
            _ => {
                warn!("page is not an object; rendering an empty page");
                Self::default()
            }
        }
    }
}

/// Either of the two accepted input shapes
#[derive(Debug, Clone)]
pub enum Document {
    Page(PageDescription),
    Component(ComponentNode),
}

impl Document {
    /// Only malformed JSON text or a top level that is not an object fails;
    /// problems inside the tree degrade the affected node alone.
    pub fn from_json(source: &str) -> Result<Self> {
        Self::from_value(parse_bounded(source)?)
    }

    /// An object carrying a `page` key is a page; any other object is a bare node
    pub fn from_value(value: Value) -> Result<Self> {
        let mut map: Map<String, Value> = serde_json::from_value(value)?;
        match map.remove("page") {
            Some(page) => Ok(Document::Page(PageDescription::from(page))),
            None => Ok(Document::Component(ComponentNode::from(Value::Object(map)))),
        }
    }
}

impl From<PageDescription> for Document {
    fn from(page: PageDescription) -> Self {
        Document::Page(page)
    }
}

impl From<ComponentNode> for Document {
    fn from(node: ComponentNode) -> Self {
        Document::Component(node)
    }
}
