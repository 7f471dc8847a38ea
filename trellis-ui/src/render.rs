//! Tree building and the renderer that owns every per-instance registry.

use crate::binder::AttributeBinder;
use crate::dispatch::{BuildContext, ComponentBuilder, DispatchRegistry};
use crate::effects::EffectRegistry;
use crate::error::{RenderError, Result};
use crate::events::{EventKind, EventQueue, UiEvent};
use crate::form;
use crate::schema::{ComponentNode, Document, PageDescription};
use crate::script::{ScriptHost, ScriptPolicy};
use crate::source::DocumentSource;
use crate::ui::{Element, ElementId, EventHandler, Mount, TextContent, UiTree, select_layout};
use crate::validation::{RuleParam, ValidationEngine};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

const TITLE_BANNER: &str = "bg-white rounded-lg shadow-sm border p-6 mb-6";
const TITLE_HEADING: &str = "text-2xl font-bold text-gray-800";

/// Renderer configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RendererOptions {
    /// Queue a presentation effect on every built component
    pub enable_animations: bool,
    /// Validate on blur and submit, clear on reset
    pub enable_validation: bool,
    /// Report unknown component types at warn level instead of debug
    pub debug_mode: bool,
    /// Deepest nesting level that is still built
    pub max_depth: usize,
    pub script_policy: ScriptPolicy,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            enable_animations: true,
            enable_validation: true,
            debug_mode: false,
            max_depth: 64,
            script_policy: ScriptPolicy::Compile,
        }
    }
}

impl RendererOptions {
    pub fn from_json(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }
}

/// What handling one event did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EventOutcome {
    /// Validation result, when the event triggered validation
    pub valid: Option<bool>,
    pub handlers_run: usize,
    pub handler_errors: usize,
}

/// Builds element trees from documents.
///
/// Each renderer owns its dispatch, validation and effect registries, so
/// registrations on one instance never leak into another.
#[derive(Debug)]
pub struct Renderer {
    options: RendererOptions,
    registry: DispatchRegistry,
    validation: ValidationEngine,
    effects: EffectRegistry,
    scripts: ScriptHost,
}

impl Renderer {
    pub fn new(options: RendererOptions) -> Self {
        Self {
            scripts: ScriptHost::new(options.script_policy),
            options,
            registry: DispatchRegistry::new(),
            validation: ValidationEngine::new(),
            effects: EffectRegistry::new(),
        }
    }

    pub fn options(&self) -> &RendererOptions {
        &self.options
    }

    pub fn registry(&self) -> &DispatchRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut DispatchRegistry {
        &mut self.registry
    }

    pub fn validation(&self) -> &ValidationEngine {
        &self.validation
    }

    pub fn effects(&self) -> &EffectRegistry {
        &self.effects
    }

    pub fn scripts(&self) -> &ScriptHost {
        &self.scripts
    }

    /// Add or replace the builder for a component type
    pub fn register_component(
        &mut self,
        kind: impl Into<String>,
        builder: impl ComponentBuilder + 'static,
    ) {
        self.registry.register(kind, builder);
    }

    /// Builder for types nothing else handles, e.g.
    /// [`DiagnosticPlaceholder`](crate::dispatch::DiagnosticPlaceholder)
    pub fn set_fallback(&mut self, builder: impl ComponentBuilder + 'static) {
        self.registry.set_fallback(builder);
    }

    pub fn register_rule<F>(&mut self, name: impl Into<String>, evaluator: F)
    where
        F: Fn(&str, &RuleParam) -> bool + 'static,
    {
        self.validation.register(name, evaluator);
    }

    pub fn register_effect<F>(&mut self, name: impl Into<String>, effect: F)
    where
        F: Fn(&mut Element) + 'static,
    {
        self.effects.register(name, effect);
    }

    /// Build one node into a fresh tree. `None` when the node itself could
    /// not be built.
    pub fn render_component(&self, node: &ComponentNode) -> Option<UiTree> {
        let mut tree = UiTree::new();
        let root = self.build_node(&mut tree, node)?;
        tree.push_root(root);
        Some(tree)
    }

    /// Build `node` and its children into `tree` without mounting it anywhere
    pub fn build_node(&self, tree: &mut UiTree, node: &ComponentNode) -> Option<ElementId> {
        let mut cx = BuildContext::new(tree, AttributeBinder::new(&self.scripts));
        self.build(&mut cx, node, 0)
    }

    /// Build a whole document. Pages get the title banner and the layout
    /// wrapper; a bare node is built as-is.
    pub fn render_page(&self, document: &Document) -> UiTree {
        match document {
            Document::Page(page) => self.render_page_description(page),
            Document::Component(node) => self.render_component(node).unwrap_or_default(),
        }
    }

    fn render_page_description(&self, page: &PageDescription) -> UiTree {
        let mut tree = UiTree::new();

        if let Some(title) = page.title.as_deref().filter(|t| !t.is_empty()) {
            tree.set_title(title);
            let banner = tree.create(Element::with_classes("div", TITLE_BANNER));
            let mut heading = Element::with_classes("h2", TITLE_HEADING);
            heading.set_content(TextContent::Plain(title.to_string()));
            let heading = tree.create(heading);
            if let Err(e) = tree.append_child(banner, heading) {
                warn!("failed to attach title heading: {}", e);
            }
            tree.push_root(banner);
        }

        let layout = select_layout(page.layout.as_deref());
        let wrapper = tree.create(Element::with_classes("div", layout.classes));
        tree.push_root(wrapper);

        for node in &page.components {
            if let Some(id) = self.build_node(&mut tree, node)
                && let Err(e) = tree.append_child(wrapper, id)
            {
                warn!("failed to attach component: {}", e);
            }
        }

        tree
    }

    /// Render into a mount point, discarding whatever it held
    pub fn render_into(&self, document: &Document, mount: &mut Mount) {
        mount.replace(self.render_page(document));
    }

    pub fn render_json(&self, source: &str) -> Result<UiTree> {
        Ok(self.render_page(&Document::from_json(source)?))
    }

    pub fn render_source(&self, source: &dyn DocumentSource) -> Result<UiTree> {
        let document = source.fetch()?;
        debug!("rendering document from {}", source.describe());
        Ok(self.render_page(&document))
    }

    fn build(
        &self,
        cx: &mut BuildContext<'_>,
        node: &ComponentNode,
        depth: usize,
    ) -> Option<ElementId> {
        if depth >= self.options.max_depth {
            let e = RenderError::DepthExceeded {
                limit: self.options.max_depth,
            };
            error!("{}; dropping subtree", e);
            return None;
        }

        let Some(kind) = node.kind() else {
            warn!("skipping component: {}", RenderError::MissingType);
            return None;
        };

        let Some(builder) = self.registry.resolve(kind) else {
            let e = RenderError::UnknownType(kind.to_string());
            if self.options.debug_mode {
                warn!("{}", e);
            } else {
                debug!("{}", e);
            }
            return None;
        };

        let id = match builder.build(cx, node) {
            Ok(id) => id,
            Err(e) => {
                warn!("failed to build <{}>: {}", kind, e);
                return None;
            }
        };

        if builder.accepts_children() {
            for child in &node.components {
                if let Some(child_id) = self.build(cx, child, depth + 1)
                    && let Err(e) = cx.tree.append_child(id, child_id)
                {
                    warn!("failed to attach child of <{}>: {}", kind, e);
                }
            }
        } else if !node.components.is_empty() {
            debug!("<{}> does not take children; ignoring {}", kind, node.components.len());
        }

        if self.options.enable_animations
            && let Some(element) = cx.tree.get_mut(id)
        {
            self.effects.apply(node.animation.as_deref(), element);
        }

        Some(id)
    }

    pub fn validate_element(&self, tree: &mut UiTree, id: ElementId) -> Result<bool> {
        self.validation.validate_element(tree, id)
    }

    pub fn validate_form(&self, tree: &mut UiTree, scope: ElementId) -> Result<bool> {
        self.validation.validate_form(tree, scope)
    }

    /// Deliver one interaction event.
    ///
    /// Input and change events update live state first. With validation
    /// enabled, blur validates the field, submit validates the form and
    /// reset clears it. Bound handlers then run in binding order; their
    /// failures are logged and counted.
    pub fn handle_event(&self, tree: &mut UiTree, event: &UiEvent) -> EventOutcome {
        let mut outcome = EventOutcome::default();
        let Some(element) = tree.get(event.target) else {
            warn!(
                "dropping {} event for missing element {:?}",
                event.kind.as_str(),
                event.target
            );
            return outcome;
        };
        let tag = element.tag().to_string();
        let input_capable = element.is_input_capable();
        let handlers: Vec<EventHandler> = element.listeners_for(event.kind).cloned().collect();

        if let Err(e) = self.apply_state(tree, event) {
            warn!("failed to update element state: {}", e);
        }

        if self.options.enable_validation {
            let checked = match event.kind {
                EventKind::Blur if input_capable => Some(self.validate_element(tree, event.target)),
                EventKind::Submit if tag == "form" => Some(self.validate_form(tree, event.target)),
                EventKind::Reset if tag == "form" => {
                    if let Err(e) = form::clear_form(tree, event.target) {
                        warn!("failed to reset form: {}", e);
                    }
                    None
                }
                _ => None,
            };
            outcome.valid = match checked {
                Some(Ok(valid)) => Some(valid),
                Some(Err(e)) => {
                    warn!("validation failed to run: {}", e);
                    None
                }
                None => None,
            };
        }

        for handler in handlers {
            outcome.handlers_run += 1;
            if let Err(e) = handler.invoke(event) {
                outcome.handler_errors += 1;
                warn!("{} handler on <{}> failed: {}", event.kind.as_str(), tag, e);
            }
        }

        outcome
    }

    fn apply_state(&self, tree: &mut UiTree, event: &UiEvent) -> Result<()> {
        if !matches!(event.kind, EventKind::Input | EventKind::Change) {
            return Ok(());
        }
        if let Some(value) = &event.value {
            tree.set_value(event.target, value.clone())?;
        }
        if let Some(checked) = event.checked {
            tree.set_checked(event.target, checked)?;
            if checked {
                form::select_radio(tree, event.target)?;
            }
        }
        Ok(())
    }

    /// Drain `queue` in order through [`handle_event`](Self::handle_event)
    pub fn process_events(&self, tree: &mut UiTree, queue: &mut EventQueue) -> Vec<EventOutcome> {
        let mut outcomes = Vec::with_capacity(queue.len());
        while let Some(event) = queue.pop() {
            outcomes.push(self.handle_event(tree, &event));
        }
        outcomes
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RendererOptions::default())
    }
}
