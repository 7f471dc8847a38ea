//! Named post-render presentation effects.
//!
//! An effect only queues [`Transition`]s on the element; playing them back is
//! up to the presentation layer, and building never waits on them.

use crate::ui::{Element, Transition};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

pub const FADE_IN: &str = "fadeIn";
pub const SLIDE_DOWN: &str = "slideDown";
pub const BOUNCE: &str = "bounce";

/// Effect applied when a node names none
pub const DEFAULT_EFFECT: &str = FADE_IN;

pub type EffectFn = Rc<dyn Fn(&mut Element)>;

#[derive(Clone)]
pub struct EffectRegistry {
    effects: HashMap<String, EffectFn>,
}

impl EffectRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            effects: HashMap::new(),
        };
        registry.register(FADE_IN, |element: &mut Element| {
            element.push_transition(Transition::FadeIn { duration_ms: 300 })
        });
        registry.register(SLIDE_DOWN, |element: &mut Element| {
            element.push_transition(Transition::SlideDown { duration_ms: 300 })
        });
        registry.register(BOUNCE, |element: &mut Element| {
            element.push_transition(Transition::FlashClass {
                class: "animate-bounce".into(),
                duration_ms: 1000,
            })
        });
        registry
    }

    pub fn register<F>(&mut self, name: impl Into<String>, effect: F)
    where
        F: Fn(&mut Element) + 'static,
    {
        self.effects.insert(name.into(), Rc::new(effect));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.effects.contains_key(name)
    }

    /// Apply the named effect, or [`DEFAULT_EFFECT`] when `name` is `None`.
    /// Unknown names do nothing.
    pub fn apply(&self, name: Option<&str>, element: &mut Element) -> bool {
        let name = name.filter(|n| !n.is_empty()).unwrap_or(DEFAULT_EFFECT);
        match self.effects.get(name) {
            Some(effect) => {
                effect(element);
                true
            }
            None => {
                debug!("no effect named {} for <{}>", name, element.tag());
                false
            }
        }
    }
}

impl Default for EffectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EffectRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.effects.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("EffectRegistry").field("effects", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_fade_in() {
        let registry = EffectRegistry::new();
        let mut element = Element::new("div");

        assert!(registry.apply(None, &mut element));
        assert_eq!(
            element.transitions(),
            [Transition::FadeIn { duration_ms: 300 }]
        );
    }

    #[test]
    fn test_bounce_flashes_class() {
        let registry = EffectRegistry::new();
        let mut element = Element::new("div");

        registry.apply(Some("bounce"), &mut element);
        assert_eq!(
            element.transitions(),
            [Transition::FlashClass {
                class: "animate-bounce".into(),
                duration_ms: 1000
            }]
        );
    }

    #[test]
    fn test_unknown_is_noop() {
        let registry = EffectRegistry::new();
        let mut element = Element::new("div");

        assert!(!registry.apply(Some("wobble"), &mut element));
        assert!(element.transitions().is_empty());
    }

    #[test]
    fn test_custom_effect() {
        let mut registry = EffectRegistry::new();
        registry.register("pulse", |element: &mut Element| {
            element.push_transition(Transition::Named("pulse".into()))
        });

        let mut element = Element::new("span");
        registry.apply(Some("pulse"), &mut element);
        assert_eq!(element.transitions(), [Transition::Named("pulse".into())]);
    }
}
