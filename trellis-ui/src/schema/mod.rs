mod builder;
mod json;
pub mod node;
pub mod page;

pub use builder::{Field, FormBuilder};
pub use json::MAX_NESTING;
pub use node::{AttrValue, Attributes, Callback, ComponentNode, OptionNode, present};
pub use page::{Document, PageDescription};
