use crate::ui::ElementId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("component node has no type")]
    MissingType,

    #[error("unsupported component type: {0}")]
    UnknownType(String),

    #[error("maximum nesting depth of {limit} exceeded")]
    DepthExceeded { limit: usize },

    #[error("element {0:?} does not exist in this tree")]
    MissingElement(ElementId),

    #[error("invalid document: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    #[error("script error: {0}")]
    Script(String),

    #[error("failed to read document: {0}")]
    Io(#[from] std::io::Error),

    #[error("event handler failed: {0}")]
    Handler(String),
}

// mlua::Error is not Send + Sync without mlua's `send` feature. Keep the
// message only, so RenderError converts into anyhow::Error.
impl From<mlua::Error> for RenderError {
    fn from(err: mlua::Error) -> Self {
        RenderError::Script(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RenderError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_thread_safe<T: Send + Sync + 'static>() {}

    #[test]
    fn test_render_error_is_thread_safe() {
        assert_thread_safe::<RenderError>();
    }

    #[test]
    fn test_script_error_keeps_message() {
        let err = RenderError::from(mlua::Error::runtime("boom"));
        assert!(matches!(&err, RenderError::Script(msg) if msg.contains("boom")));
        assert!(err.to_string().starts_with("script error:"));
    }
}
