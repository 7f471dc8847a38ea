pub mod layout;
pub mod node;
pub mod tree;

pub use layout::{Layout, LayoutDescriptor, select_layout};
pub use node::{
    Element, ElementArena, ElementId, EventHandler, Listener, TextContent, Transition,
};
pub use tree::{ElementSnapshot, Mount, UiTree};
