//! Classification of root tags and configuration keys.
//!
//! These predicates decide where each piece of configuration goes: visual
//! attributes land on the rendered root, everything else is offered to the
//! drag engine.

/// Standard markup element names (lower-case only).
const HTML_TAGS: &[&str] = &[
    "html", "body", "base", "head", "link", "meta", "style", "title", "address", "article",
    "aside", "footer", "header", "hgroup", "h1", "h2", "h3", "h4", "h5", "h6", "nav",
    "section", "div", "dd", "dl", "dt", "figcaption", "figure", "picture", "hr", "img", "li",
    "main", "ol", "p", "pre", "ul", "a", "b", "abbr", "bdi", "bdo", "br", "cite", "code",
    "data", "dfn", "em", "i", "kbd", "mark", "q", "rp", "rt", "ruby", "s", "samp", "small",
    "span", "strong", "sub", "sup", "time", "u", "var", "wbr", "area", "audio", "map", "track",
    "video", "embed", "object", "param", "source", "canvas", "script", "noscript", "del",
    "ins", "caption", "col", "colgroup", "table", "thead", "tbody", "td", "th", "tr", "button",
    "datalist", "fieldset", "form", "input", "label", "legend", "meter", "optgroup", "option",
    "output", "progress", "select", "textarea", "details", "dialog", "menu", "summary",
    "template", "blockquote", "iframe", "tfoot",
];

/// Attributes that always belong to the rendered root.
const VISUAL_ATTRIBUTES: &[&str] = &["id", "class", "style", "role", "title", "tabindex"];

/// Kebab form of the animated-list wrapper.
pub const TRANSITION_GROUP: &str = "transition-group";
/// Pascal form of the animated-list wrapper.
pub const TRANSITION_GROUP_PASCAL: &str = "TransitionGroup";

pub fn is_html_tag(name: &str) -> bool {
    HTML_TAGS.contains(&name)
}

pub fn is_transition(name: &str) -> bool {
    name == TRANSITION_GROUP || name == TRANSITION_GROUP_PASCAL
}

/// Returns true when `key` is passed through to the rendered root rather
/// than forwarded to the drag engine.
pub fn is_html_attribute(key: &str) -> bool {
    VISUAL_ATTRIBUTES.contains(&key)
        || key.starts_with("data-")
        || key.starts_with("aria-")
        || is_event_handler(key)
}

/// `on` followed by a capitalized word, e.g. `onClick`.
fn is_event_handler(key: &str) -> bool {
    key.strip_prefix("on")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_uppercase())
}
