//! Compilation of handler source text taken from documents.
//!
//! Handler strings are turned into executable Lua functions with a single
//! `event` parameter. Any document whose string handlers are compiled runs
//! that code with the full standard library of the embedded interpreter, so
//! documents from untrusted origins must either be authorized by the caller
//! beforehand or rendered with [`ScriptPolicy::Reject`].

use crate::error::Result;
use crate::events::UiEvent;
use mlua::{Function, Lua};
use serde::Deserialize;
use std::fmt;
use std::rc::Rc;

/// What to do with string-valued event handlers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptPolicy {
    /// Compile and bind them
    #[default]
    Compile,
    /// Refuse them with a warning; native callbacks still bind
    Reject,
}

/// Prelude that exposes the call arguments as the `event` table
const EVENT_PRELUDE: &str = "local event = { type = select(1, ...), target = select(2, ...), \
value = select(3, ...), checked = select(4, ...) }\n";

/// Owns the interpreter that string handlers run in
pub struct ScriptHost {
    lua: Rc<Lua>,
    policy: ScriptPolicy,
}

impl ScriptHost {
    pub fn new(policy: ScriptPolicy) -> Self {
        Self {
            lua: Rc::new(Lua::new()),
            policy,
        }
    }

    pub fn policy(&self) -> ScriptPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: ScriptPolicy) {
        self.policy = policy;
    }

    /// Interpreter handle, for exposing host functions to handlers
    pub fn lua(&self) -> &Lua {
        &self.lua
    }

    /// Compile handler source into a callable taking one `event` argument
    pub fn compile(&self, source: &str, chunk_name: &str) -> Result<ScriptHandler> {
        let code = format!("{EVENT_PRELUDE}{source}");
        let function = self
            .lua
            .load(code)
            .set_name(format!("={chunk_name}"))
            .into_function()?;
        Ok(ScriptHandler {
            function,
            name: chunk_name.to_string(),
            _lua: self.lua.clone(),
        })
    }
}

impl Default for ScriptHost {
    fn default() -> Self {
        Self::new(ScriptPolicy::default())
    }
}

impl fmt::Debug for ScriptHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptHost")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

/// Compiled string handler
#[derive(Clone)]
pub struct ScriptHandler {
    function: Function,
    name: String,
    // keeps the interpreter alive for as long as the handler is bound
    _lua: Rc<Lua>,
}

impl ScriptHandler {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, event: &UiEvent) -> Result<()> {
        self.function.call::<()>((
            event.kind.as_str(),
            event.target.index(),
            event.value.clone(),
            event.checked,
        ))?;
        Ok(())
    }
}

impl fmt::Debug for ScriptHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptHandler")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
