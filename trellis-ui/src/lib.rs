//! Builds live UI element trees from JSON page and component descriptions.
//!
//! ```no_run
//! use trellis_ui::{Document, Renderer};
//!
//! let document = Document::from_json(r#"{"page": {"title": "T", "components": []}}"#)?;
//! let tree = Renderer::default().render_page(&document);
//! assert_eq!(tree.title(), Some("T"));
//! # Ok::<(), trellis_ui::RenderError>(())
//! ```

pub mod binder;
pub mod dispatch;
pub mod effects;
mod error;
pub mod events;
pub mod form;
pub mod render;
pub mod schema;
pub mod script;
pub mod source;
pub mod ui;
pub mod validation;

pub use dispatch::{
    BuildContext, Builtin, ComponentBuilder, ComponentKind, DiagnosticPlaceholder,
    DispatchRegistry,
};
pub use effects::EffectRegistry;
pub use error::{RenderError, Result};
pub use events::{EventKind, EventQueue, UiEvent};
pub use form::{clear_form, form_data};
pub use render::{EventOutcome, Renderer, RendererOptions};
pub use schema::{
    AttrValue, Attributes, Callback, ComponentNode, Document, Field, FormBuilder, MAX_NESTING,
    OptionNode, PageDescription,
};
pub use script::ScriptPolicy;
pub use source::{DocumentSource, FileSource, StaticSource};
pub use ui::{
    Element, ElementId, ElementSnapshot, Layout, LayoutDescriptor, Mount, TextContent,
    Transition, UiTree, select_layout,
};
pub use validation::{FieldReport, RuleParam, RuleSet, ValidationEngine};
