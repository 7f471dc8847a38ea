use super::RuleParam;
use regex::Regex;
use std::sync::OnceLock;
use tracing::warn;

pub const REQUIRED: &str = "required";
pub const EMAIL: &str = "email";
pub const MIN_LENGTH: &str = "minLength";
pub const MAX_LENGTH: &str = "maxLength";
pub const PATTERN: &str = "pattern";

static EMAIL_REGEX: OnceLock<Option<Regex>> = OnceLock::new();

fn email_regex() -> Option<&'static Regex> {
    EMAIL_REGEX
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok())
        .as_ref()
}

pub fn required(value: &str, _: &RuleParam) -> bool {
    !value.trim().is_empty()
}

pub fn email(value: &str, _: &RuleParam) -> bool {
    email_regex().is_some_and(|re| re.is_match(value))
}

pub fn min_length(value: &str, param: &RuleParam) -> bool {
    match param.as_length() {
        Some(min) => value.chars().count() >= min,
        None => false,
    }
}

pub fn max_length(value: &str, param: &RuleParam) -> bool {
    match param.as_length() {
        Some(max) => value.chars().count() <= max,
        None => false,
    }
}

/// Unanchored match, like a script-side `RegExp.test`
pub fn pattern(value: &str, param: &RuleParam) -> bool {
    let Some(source) = param.as_pattern() else {
        return false;
    };
    match Regex::new(source) {
        Ok(re) => re.is_match(value),
        Err(e) => {
            warn!("invalid validation pattern {:?}: {}", source, e);
            false
        }
    }
}
