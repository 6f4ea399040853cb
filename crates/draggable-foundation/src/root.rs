//! Resolution of the requested root tag.

use draggable_core::tags::{is_html_tag, is_transition};
use draggable_core::ComponentRef;

/// The root a consumer asks for: a tag name or a component reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TagRequest {
    Name(String),
    Component(ComponentRef),
}

impl Default for TagRequest {
    fn default() -> Self {
        Self::Name("div".to_owned())
    }
}

impl From<&str> for TagRequest {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl From<String> for TagRequest {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<ComponentRef> for TagRequest {
    fn from(component: ComponentRef) -> Self {
        Self::Component(component)
    }
}

/// Resolved root, decided once per render cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RootTag {
    /// A standard markup element, rendered as-is.
    Native(String),
    /// The host's built-in animated-list wrapper.
    AnimatedGroup(ComponentRef),
    /// A component, either passed directly or looked up by name.
    External(ComponentRef),
}

/// Name lookups provided by the host framework.
pub trait ComponentResolver {
    /// Resolves a registered component by name.
    fn resolve_component(&self, name: &str) -> ComponentRef;

    /// The built-in animated-list wrapper.
    fn transition_group(&self) -> ComponentRef;
}

/// Root descriptor carried by the reconciled structure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RootInfo {
    tag: RootTag,
}

impl RootInfo {
    pub fn new(tag: RootTag) -> Self {
        Self { tag }
    }

    pub fn tag(&self) -> &RootTag {
        &self.tag
    }

    pub fn external_component(&self) -> bool {
        matches!(self.tag, RootTag::External(_))
    }

    pub fn transition(&self) -> bool {
        matches!(self.tag, RootTag::AnimatedGroup(_))
    }

    /// Component roots take their children as a default content region
    /// instead of positional children.
    pub fn is_root_component(&self) -> bool {
        self.external_component() || self.transition()
    }
}

/// Decides what kind of root `tag` names.
pub fn root_information(tag: &TagRequest, resolver: &dyn ComponentResolver) -> RootInfo {
    let resolved = match tag {
        TagRequest::Component(component) => RootTag::External(component.clone()),
        TagRequest::Name(name) if is_transition(name) => {
            RootTag::AnimatedGroup(resolver.transition_group())
        }
        TagRequest::Name(name) if is_html_tag(name) => RootTag::Native(name.clone()),
        TagRequest::Name(name) => RootTag::External(resolver.resolve_component(name)),
    };
    RootInfo::new(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct Registry {
        transition: ComponentRef,
        looked_up: RefCell<Vec<String>>,
    }

    impl Registry {
        fn new() -> Self {
            Self {
                transition: ComponentRef::new("TransitionGroup"),
                looked_up: RefCell::new(Vec::new()),
            }
        }
    }

    impl ComponentResolver for Registry {
        fn resolve_component(&self, name: &str) -> ComponentRef {
            self.looked_up.borrow_mut().push(name.to_owned());
            ComponentRef::new(name)
        }

        fn transition_group(&self) -> ComponentRef {
            self.transition.clone()
        }
    }

    #[test]
    fn test_native_tags() {
        let registry = Registry::new();
        for name in ["div", "ul", "tbody"] {
            let root = root_information(&TagRequest::from(name), &registry);
            assert_eq!(root.tag(), &RootTag::Native(name.to_owned()));
            assert!(!root.external_component());
            assert!(!root.transition());
            assert!(!root.is_root_component());
        }
        assert!(registry.looked_up.borrow().is_empty());
    }

    #[test]
    fn test_transition_group_both_forms() {
        let registry = Registry::new();
        for name in ["transition-group", "TransitionGroup"] {
            let root = root_information(&TagRequest::from(name), &registry);
            assert!(root.transition());
            assert!(!root.external_component());
            assert!(root.is_root_component());
            assert_eq!(root.tag(), &RootTag::AnimatedGroup(registry.transition.clone()));
        }
    }

    #[test]
    fn test_component_reference() {
        let registry = Registry::new();
        let component = ComponentRef::anonymous();
        let root = root_information(&TagRequest::from(component.clone()), &registry);
        assert!(root.external_component());
        assert!(!root.transition());
        assert_eq!(root.tag(), &RootTag::External(component));
        assert!(registry.looked_up.borrow().is_empty());
    }

    #[test]
    fn test_unknown_name_is_looked_up() {
        let registry = Registry::new();
        let root = root_information(&TagRequest::from("el-collapse"), &registry);
        assert!(root.external_component());
        assert_eq!(*registry.looked_up.borrow(), ["el-collapse"]);
    }

    #[test]
    fn test_default_tag_is_div() {
        assert_eq!(TagRequest::default(), TagRequest::from("div"));
    }
}
