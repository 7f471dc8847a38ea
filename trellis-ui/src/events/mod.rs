mod queue;

pub use queue::EventQueue;

use crate::ui::ElementId;
use serde::Serialize;

/// Interaction event kinds a handler can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Click,
    Focus,
    Blur,
    KeyDown,
    KeyUp,
    KeyPress,
    Change,
    Input,
    Submit,
    Reset,
    Scroll,
    Load,
    Error,
}

impl EventKind {
    /// Map an attribute key such as `onKeyDown` to its event kind
    pub fn from_attribute(key: &str) -> Option<Self> {
        let kind = match key {
            "onClick" => EventKind::Click,
            "onFocus" => EventKind::Focus,
            "onBlur" => EventKind::Blur,
            "onKeyDown" => EventKind::KeyDown,
            "onKeyUp" => EventKind::KeyUp,
            "onKeyPress" => EventKind::KeyPress,
            "onChange" => EventKind::Change,
            "onInput" => EventKind::Input,
            "onSubmit" => EventKind::Submit,
            "onReset" => EventKind::Reset,
            "onScroll" => EventKind::Scroll,
            "onLoad" => EventKind::Load,
            "onError" => EventKind::Error,
            _ => return None,
        };
        Some(kind)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::Focus => "focus",
            EventKind::Blur => "blur",
            EventKind::KeyDown => "keydown",
            EventKind::KeyUp => "keyup",
            EventKind::KeyPress => "keypress",
            EventKind::Change => "change",
            EventKind::Input => "input",
            EventKind::Submit => "submit",
            EventKind::Reset => "reset",
            EventKind::Scroll => "scroll",
            EventKind::Load => "load",
            EventKind::Error => "error",
        }
    }
}

/// Event delivered by the host event loop to a built element
#[derive(Debug, Clone, Serialize)]
pub struct UiEvent {
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub target: ElementId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
}

impl UiEvent {
    pub fn new(kind: EventKind, target: ElementId) -> Self {
        Self {
            kind,
            target,
            value: None,
            checked: None,
        }
    }

    pub fn click(target: ElementId) -> Self {
        Self::new(EventKind::Click, target)
    }

    pub fn blur(target: ElementId) -> Self {
        Self::new(EventKind::Blur, target)
    }

    pub fn submit(target: ElementId) -> Self {
        Self::new(EventKind::Submit, target)
    }

    /// Text entry: carries the element's new value
    pub fn input(target: ElementId, value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::new(EventKind::Input, target)
        }
    }

    /// Checkbox/radio toggle
    pub fn toggle(target: ElementId, checked: bool) -> Self {
        Self {
            checked: Some(checked),
            ..Self::new(EventKind::Change, target)
        }
    }

    /// Get the target element ID for this event
    pub fn target(&self) -> ElementId {
        self.target
    }
}
