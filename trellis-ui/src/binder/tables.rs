/// One row of an attribute table: document key and the DOM attribute it sets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttrSpec {
    pub key: &'static str,
    pub dom: &'static str,
}

const fn same(key: &'static str) -> AttrSpec {
    AttrSpec { key, dom: key }
}

const fn renamed(key: &'static str, dom: &'static str) -> AttrSpec {
    AttrSpec { key, dom }
}

/// Keys every element accepts. `className`, `style` and `dataAttributes`
/// are handled separately.
pub const COMMON: &[AttrSpec] = &[
    same("id"),
    same("title"),
    same("lang"),
    same("dir"),
    same("hidden"),
    renamed("tabIndex", "tabindex"),
    renamed("accessKey", "accesskey"),
    renamed("contentEditable", "contenteditable"),
    same("draggable"),
    renamed("spellCheck", "spellcheck"),
    same("translate"),
    same("role"),
    renamed("ariaLabel", "aria-label"),
    renamed("ariaDescribedBy", "aria-describedby"),
    renamed("ariaLabelledBy", "aria-labelledby"),
];

/// Event keys bound on every element
pub const COMMON_EVENTS: &[&str] = &[
    "onClick",
    "onFocus",
    "onBlur",
    "onKeyDown",
    "onKeyUp",
    "onKeyPress",
    "onChange",
    "onInput",
    "onSubmit",
    "onReset",
    "onScroll",
];

pub const IMG_EVENTS: &[&str] = &["onLoad", "onError"];

pub const INPUT: &[AttrSpec] = &[
    same("type"),
    same("value"),
    same("placeholder"),
    same("name"),
    same("disabled"),
    same("readonly"),
    same("required"),
    same("autofocus"),
    same("autocomplete"),
    renamed("maxLength", "maxlength"),
    renamed("minLength", "minlength"),
    same("max"),
    same("min"),
    same("step"),
    same("pattern"),
    same("size"),
    same("multiple"),
    same("accept"),
    same("capture"),
    same("list"),
    same("checked"),
];

pub const SELECT: &[AttrSpec] = &[
    same("name"),
    same("disabled"),
    same("required"),
    same("autofocus"),
    same("multiple"),
    same("size"),
];

pub const OPTION: &[AttrSpec] = &[same("value"), same("selected"), same("disabled")];

pub const TEXTAREA: &[AttrSpec] = &[
    same("name"),
    same("disabled"),
    same("readonly"),
    same("required"),
    same("autofocus"),
    same("placeholder"),
    same("rows"),
    same("cols"),
    renamed("maxLength", "maxlength"),
    renamed("minLength", "minlength"),
    same("wrap"),
    same("autocomplete"),
];

pub const BUTTON: &[AttrSpec] = &[
    same("type"),
    same("name"),
    same("value"),
    same("disabled"),
    same("autofocus"),
    renamed("formAction", "formaction"),
    renamed("formEncType", "formenctype"),
    renamed("formMethod", "formmethod"),
    renamed("formNoValidate", "formnovalidate"),
    renamed("formTarget", "formtarget"),
];

pub const LABEL: &[AttrSpec] = &[renamed("htmlFor", "for")];

pub const FORM: &[AttrSpec] = &[
    same("action"),
    same("method"),
    renamed("encType", "enctype"),
    same("target"),
    renamed("acceptCharset", "accept-charset"),
    same("autocomplete"),
    renamed("noValidate", "novalidate"),
];

/// Checkbox and radio inner input; the `type` is fixed by the widget
pub const TOGGLE: &[AttrSpec] = &[
    same("name"),
    same("value"),
    same("checked"),
    same("disabled"),
    same("required"),
    same("autofocus"),
];

pub const FIELDSET: &[AttrSpec] = &[same("disabled"), same("form")];

pub const IMG: &[AttrSpec] = &[
    same("src"),
    same("alt"),
    same("width"),
    same("height"),
    same("loading"),
    renamed("crossOrigin", "crossorigin"),
    renamed("useMap", "usemap"),
    renamed("isMap", "ismap"),
    same("decoding"),
    renamed("fetchPriority", "fetchpriority"),
];

pub const LINK: &[AttrSpec] = &[
    same("href"),
    same("target"),
    same("rel"),
    same("download"),
    same("hreflang"),
    same("type"),
];

/// Types with nothing beyond the common table
pub const NONE: &[AttrSpec] = &[];
