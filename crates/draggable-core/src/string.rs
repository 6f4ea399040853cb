//! Key normalization for drag-engine options.
//!
//! Template attributes arrive hyphenated (`ghost-class`), the drag engine
//! expects camel-style names (`ghostClass`).

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::collections::map::{new_map, HashMap};

static HYPHEN_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    // A hyphen run is dropped together with the word character after it.
    Regex::new(r"-+([A-Za-z0-9_])").expect("hyphen pattern is valid")
});

/// Converts a hyphen-delimited key to camel form without caching.
///
/// `ghost-class` becomes `ghostClass`, `-foo` becomes `Foo`. Hyphens not
/// followed by a word character are kept.
pub fn camelize(key: &str) -> String {
    HYPHEN_SEGMENT
        .replace_all(key, |caps: &Captures<'_>| caps[1].to_ascii_uppercase())
        .into_owned()
}

/// Memoizing wrapper around [`camelize`].
///
/// Identical inputs return the identical `Rc<str>`. Entries are never
/// evicted; the key space is bounded by the attributes templates declare.
#[derive(Debug)]
pub struct CamelizeCache {
    entries: RefCell<HashMap<String, Rc<str>>>,
}

impl Default for CamelizeCache {
    fn default() -> Self {
        Self::new()
    }
}

impl CamelizeCache {
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(new_map()),
        }
    }

    pub fn camelize(&self, key: &str) -> Rc<str> {
        if let Some(hit) = self.entries.borrow().get(key) {
            return Rc::clone(hit);
        }
        let value: Rc<str> = Rc::from(camelize(key));
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), Rc::clone(&value));
        value
    }

    /// Number of distinct keys seen so far.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camelize() {
        assert_eq!(camelize("ghost-class"), "ghostClass");
        assert_eq!(camelize("chosen-class"), "chosenClass");
        assert_eq!(camelize("swap-threshold-x"), "swapThresholdX");
        assert_eq!(camelize("group"), "group");
        assert_eq!(camelize(""), "");
        assert_eq!(camelize("-foo"), "Foo");
    }

    #[test]
    fn test_consecutive_and_trailing_hyphens() {
        assert_eq!(camelize("a--b"), "aB");
        assert_eq!(camelize("trailing-"), "trailing-");
        assert_eq!(camelize("a-.b"), "a-.b");
    }

    #[test]
    fn test_camelize_is_idempotent() {
        for key in ["ghost-class", "-foo", "a--b", "trailing-", "", "x-1-y", "drag-_x"] {
            let once = camelize(key);
            assert_eq!(camelize(&once), once, "{key}");
        }
    }

    #[test]
    fn test_cache_returns_same_instance() {
        let cache = CamelizeCache::new();
        let first = cache.camelize("force-fallback");
        let second = cache.camelize("force-fallback");
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(&*first, "forceFallback");

        let plain = cache.camelize("group");
        assert_eq!(&*plain, "group");
        assert_eq!(cache.len(), 2);
    }
}
