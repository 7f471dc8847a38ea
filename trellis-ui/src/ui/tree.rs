use super::node::{Element, ElementArena, ElementId, TextContent};
use crate::error::{RenderError, Result};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// A built element tree: arena storage plus the ordered top-level elements
/// handed to the mount point
#[derive(Debug, Default)]
pub struct UiTree {
    arena: ElementArena,
    roots: Vec<ElementId>,
    title: Option<String>,
}

impl UiTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, element: Element) -> ElementId {
        self.arena.create(element)
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.arena.get(id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.arena.get_mut(id)
    }

    pub(crate) fn element(&self, id: ElementId) -> Result<&Element> {
        self.arena.get(id).ok_or(RenderError::MissingElement(id))
    }

    pub(crate) fn element_mut(&mut self, id: ElementId) -> Result<&mut Element> {
        self.arena.get_mut(id).ok_or(RenderError::MissingElement(id))
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn roots(&self) -> &[ElementId] {
        &self.roots
    }

    pub fn push_root(&mut self, id: ElementId) {
        self.roots.push(id);
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.arena.get(id).map(Element::children).unwrap_or(&[])
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.arena.get(id).and_then(Element::parent)
    }

    /// Append `child` as the last child of `parent`
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) -> Result<()> {
        self.element(child)?;
        self.element_mut(parent)?.children.push(child);
        self.element_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Insert `new` directly after `anchor`, among its siblings or the roots
    pub fn insert_after(&mut self, anchor: ElementId, new: ElementId) -> Result<()> {
        self.element(new)?;
        let parent = self.element(anchor)?.parent;
        let siblings = match parent {
            Some(parent) => &mut self.element_mut(parent)?.children,
            None => &mut self.roots,
        };
        let position = siblings
            .iter()
            .position(|&id| id == anchor)
            .map(|pos| pos + 1)
            .unwrap_or(siblings.len());
        siblings.insert(position, new);
        self.element_mut(new)?.parent = parent;
        Ok(())
    }

    /// Unlink an element from its parent (or from the roots)
    pub fn detach(&mut self, id: ElementId) -> Result<()> {
        let parent = self.element_mut(id)?.parent.take();
        match parent {
            Some(parent) => self.element_mut(parent)?.children.retain(|&c| c != id),
            None => self.roots.retain(|&r| r != id),
        }
        Ok(())
    }

    /// Detach an element and free it together with all its descendants
    pub fn remove_subtree(&mut self, id: ElementId) -> Result<()> {
        self.detach(id)?;
        let mut stack = vec![id];
        let mut messages = Vec::new();
        while let Some(current) = stack.pop() {
            if let Some(element) = self.arena.remove(current) {
                messages.extend(element.error_message);
                stack.extend(element.children);
            }
        }
        // inline messages live beside their element, not under it
        for message in messages {
            if self.get(message).is_some() {
                self.remove_subtree(message)?;
            }
        }
        Ok(())
    }

    /// Pre-order descendants of `scope`, excluding `scope` itself
    pub fn descendants(&self, scope: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.children(scope).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev());
        }
        out
    }

    /// Pre-order walk over every element reachable from the roots
    pub fn walk(&self) -> Vec<ElementId> {
        let mut out = Vec::new();
        for &root in &self.roots {
            out.push(root);
            out.extend(self.descendants(root));
        }
        out
    }

    /// First element, in document order, whose DOM `id` attribute equals `dom_id`
    pub fn find_by_dom_id(&self, dom_id: &str) -> Option<ElementId> {
        self.find_by_attribute("id", dom_id)
    }

    /// First element, in document order, whose `name` attribute equals `name`
    pub fn find_by_name(&self, name: &str) -> Option<ElementId> {
        self.find_by_attribute("name", name)
    }

    pub fn find_by_tag(&self, tag: &str) -> Vec<ElementId> {
        self.walk()
            .into_iter()
            .filter(|&id| self.get(id).is_some_and(|e| e.tag() == tag))
            .collect()
    }

    fn find_by_attribute(&self, attribute: &str, expected: &str) -> Option<ElementId> {
        self.walk().into_iter().find(|&id| {
            self.get(id)
                .and_then(|e| e.attribute(attribute))
                .and_then(Value::as_str)
                == Some(expected)
        })
    }

    /// Set an element's live value
    pub fn set_value(&mut self, id: ElementId, value: impl Into<String>) -> Result<()> {
        self.element_mut(id)?.set_value(value);
        Ok(())
    }

    pub fn set_checked(&mut self, id: ElementId, checked: bool) -> Result<()> {
        self.element_mut(id)?.set_checked(checked);
        Ok(())
    }

    /// Structural copy of the subtree rooted at `id`
    pub fn snapshot(&self, id: ElementId) -> Option<ElementSnapshot> {
        let element = self.get(id)?;
        Some(ElementSnapshot {
            tag: element.tag.clone(),
            attributes: element.attributes.clone(),
            classes: element.classes.clone(),
            style: element.style.clone(),
            content: element.content.clone(),
            children: element
                .children
                .iter()
                .filter_map(|&child| self.snapshot(child))
                .collect(),
        })
    }

    /// Snapshots of every top-level element, in mount order
    pub fn snapshot_roots(&self) -> Vec<ElementSnapshot> {
        self.roots.iter().filter_map(|&id| self.snapshot(id)).collect()
    }
}

/// Plain, comparable copy of an element subtree; listeners and queued
/// transitions are left out
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementSnapshot {
    pub tag: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub style: BTreeMap<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<TextContent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ElementSnapshot>,
}

/// Caller-owned location that receives rendered output.
///
/// Every render replaces whatever was mounted before.
#[derive(Debug, Default)]
pub struct Mount {
    tree: Option<UiTree>,
    generation: u64,
}

impl Mount {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard the current tree and mount `tree` in its place
    pub fn replace(&mut self, tree: UiTree) -> Option<UiTree> {
        self.generation += 1;
        self.tree.replace(tree)
    }

    pub fn tree(&self) -> Option<&UiTree> {
        self.tree.as_ref()
    }

    pub fn tree_mut(&mut self) -> Option<&mut UiTree> {
        self.tree.as_mut()
    }

    /// Number of renders this mount point has received
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
