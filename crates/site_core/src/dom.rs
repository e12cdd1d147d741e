//! Minimal document model: root classes, document-level pointer listeners and
//! viewport observers. Registrations are guards that release on drop.

use std::{
    cell::RefCell,
    collections::{BTreeMap, BTreeSet},
    fmt,
    rc::{Rc, Weak},
};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ancestry of an event target, outermost first, target last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementPath(Vec<ElementId>);

impl ElementPath {
    pub fn new(ids: impl IntoIterator<Item = ElementId>) -> Self {
        Self(ids.into_iter().collect())
    }

    pub fn from_ids<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        Self(ids.into_iter().map(ElementId::new).collect())
    }

    /// True when `element` is the target or one of its ancestors.
    pub fn is_within(&self, element: &ElementId) -> bool {
        self.0.iter().any(|id| id == element)
    }

    pub fn target(&self) -> Option<&ElementId> {
        self.0.last()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerDown {
    pub path: ElementPath,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEntry {
    pub target: ElementId,
    pub intersection_ratio: f32,
}

impl IntersectionEntry {
    pub fn new(target: ElementId, intersection_ratio: f32) -> Self {
        Self {
            target,
            intersection_ratio,
        }
    }
}

#[derive(Default)]
struct DocumentState {
    root_classes: BTreeSet<String>,
    pointer_listeners: BTreeMap<u64, &'static str>,
    observers: BTreeMap<u64, ElementId>,
    next_registration: u64,
}

impl DocumentState {
    fn next_id(&mut self) -> u64 {
        self.next_registration += 1;
        self.next_registration
    }
}

/// Shared handle to the page document. Cloning shares the same document.
#[derive(Clone, Default)]
pub struct Document {
    inner: Rc<RefCell<DocumentState>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_root_class(&self, class: &str) {
        self.inner.borrow_mut().root_classes.insert(class.to_string());
    }

    pub fn remove_root_class(&self, class: &str) {
        self.inner.borrow_mut().root_classes.remove(class);
    }

    pub fn has_root_class(&self, class: &str) -> bool {
        self.inner.borrow().root_classes.contains(class)
    }

    /// Space-separated class list for the `<html>` element.
    pub fn root_class_attr(&self) -> String {
        let state = self.inner.borrow();
        state
            .root_classes
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn add_pointer_listener(&self, owner: &'static str) -> ListenerGuard {
        let mut state = self.inner.borrow_mut();
        let id = state.next_id();
        state.pointer_listeners.insert(id, owner);
        ListenerGuard {
            document: Rc::downgrade(&self.inner),
            id,
        }
    }

    pub fn pointer_listener_count(&self) -> usize {
        self.inner.borrow().pointer_listeners.len()
    }

    pub fn observe(&self, target: ElementId) -> ObserverGuard {
        let mut state = self.inner.borrow_mut();
        let id = state.next_id();
        state.observers.insert(id, target);
        ObserverGuard {
            document: Rc::downgrade(&self.inner),
            id,
        }
    }

    pub fn observer_count(&self) -> usize {
        self.inner.borrow().observers.len()
    }

    pub fn is_observed(&self, target: &ElementId) -> bool {
        self.inner
            .borrow()
            .observers
            .values()
            .any(|observed| observed == target)
    }
}

#[must_use = "dropping the guard removes the listener"]
pub struct ListenerGuard {
    document: Weak<RefCell<DocumentState>>,
    id: u64,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(document) = self.document.upgrade() {
            document.borrow_mut().pointer_listeners.remove(&self.id);
        }
    }
}

#[must_use = "dropping the guard stops observing"]
pub struct ObserverGuard {
    document: Weak<RefCell<DocumentState>>,
    id: u64,
}

impl Drop for ObserverGuard {
    fn drop(&mut self) {
        if let Some(document) = self.document.upgrade() {
            document.borrow_mut().observers.remove(&self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guards_release_registrations_on_drop() {
        let document = Document::new();
        let listener = document.add_pointer_listener("menu");
        let observer = document.observe(ElementId::new("hero"));
        assert_eq!(document.pointer_listener_count(), 1);
        assert!(document.is_observed(&ElementId::new("hero")));

        drop(listener);
        drop(observer);
        assert_eq!(document.pointer_listener_count(), 0);
        assert_eq!(document.observer_count(), 0);
    }

    #[test]
    fn guard_outliving_document_is_harmless() {
        let document = Document::new();
        let guard = document.add_pointer_listener("menu");
        drop(document);
        drop(guard);
    }

    #[test]
    fn path_containment_checks_ancestors() {
        let path = ElementPath::from_ids(["body", "menu-panel", "menu-entry-2"]);
        assert!(path.is_within(&ElementId::new("menu-panel")));
        assert!(!path.is_within(&ElementId::new("menu-button")));
        assert_eq!(path.target(), Some(&ElementId::new("menu-entry-2")));
    }
}
