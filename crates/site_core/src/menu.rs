//! Slide-out navigation menu.
//!
//! The document-level pointer listener exists only while the menu is open.

use crate::dom::{Document, ElementId, ListenerGuard, PointerDown};

pub const MENU_BUTTON_ID: &str = "menu-button";
pub const MENU_PANEL_ID: &str = "menu-panel";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub anchor: &'static str,
}

pub const MENU_ITEMS: [MenuItem; 6] = [
    MenuItem { label: "HOME", anchor: "#home" },
    MenuItem { label: "ABOUT", anchor: "#about" },
    MenuItem { label: "PORTFOLIO", anchor: "#portfolio" },
    MenuItem { label: "SERVICES", anchor: "#services" },
    MenuItem { label: "TESTIMONIALS", anchor: "#testimonials" },
    MenuItem { label: "CONTACT", anchor: "#contact" },
];

pub struct Menu {
    document: Document,
    trigger: ElementId,
    panel: ElementId,
    outside_listener: Option<ListenerGuard>,
}

impl Menu {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            trigger: ElementId::new(MENU_BUTTON_ID),
            panel: ElementId::new(MENU_PANEL_ID),
            outside_listener: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.outside_listener.is_some()
    }

    pub fn items(&self) -> &'static [MenuItem] {
        &MENU_ITEMS
    }

    /// Trigger button press.
    pub fn toggle(&mut self) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    pub fn open(&mut self) {
        if self.outside_listener.is_none() {
            self.outside_listener = Some(self.document.add_pointer_listener("menu"));
        }
    }

    pub fn close(&mut self) {
        self.outside_listener = None;
    }

    /// Entry selection; returns the anchor to scroll to.
    pub fn select(&mut self, index: usize) -> Option<&'static str> {
        let item = MENU_ITEMS.get(index)?;
        self.close();
        Some(item.anchor)
    }

    /// Document pointer-down. Closes the menu when the target lies outside
    /// both the trigger and the panel. Returns whether it closed.
    pub fn handle_pointer_down(&mut self, event: &PointerDown) -> bool {
        if !self.is_open() {
            return false;
        }
        if event.path.is_within(&self.trigger) || event.path.is_within(&self.panel) {
            return false;
        }
        self.close();
        true
    }
}

#[cfg(test)]
#[path = "tests/menu_tests.rs"]
mod tests;
