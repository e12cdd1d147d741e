use crate::dom::Document;

pub const DARK_CLASS: &str = "dark";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn flipped(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

/// Single owner of the active theme. Every change is mirrored onto the
/// document root in the same call.
pub struct ThemeContext {
    document: Document,
    theme: Theme,
}

impl ThemeContext {
    pub fn new(document: Document, initial: Theme) -> Self {
        let context = Self {
            document,
            theme: initial,
        };
        context.apply();
        context
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_dark(&self) -> bool {
        self.theme.is_dark()
    }

    pub fn toggle(&mut self) -> Theme {
        self.set(self.theme.flipped());
        self.theme
    }

    pub fn set(&mut self, theme: Theme) {
        self.theme = theme;
        self.apply();
    }

    /// Picks between the dark and light class variants of an element.
    pub fn pick<'a>(&self, dark: &'a str, light: &'a str) -> &'a str {
        if self.is_dark() {
            dark
        } else {
            light
        }
    }

    fn apply(&self) {
        if self.theme.is_dark() {
            self.document.add_root_class(DARK_CLASS);
        } else {
            self.document.remove_root_class(DARK_CLASS);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_dark_and_marks_document() {
        let document = Document::new();
        let context = ThemeContext::new(document.clone(), Theme::Dark);
        assert!(context.is_dark());
        assert!(document.has_root_class(DARK_CLASS));
    }

    #[test]
    fn two_toggles_restore_document_flag() {
        let document = Document::new();
        let mut context = ThemeContext::new(document.clone(), Theme::Dark);

        assert_eq!(context.toggle(), Theme::Light);
        assert!(!document.has_root_class(DARK_CLASS));

        assert_eq!(context.toggle(), Theme::Dark);
        assert!(document.has_root_class(DARK_CLASS));
    }

    #[test]
    fn pick_follows_theme() {
        let mut context = ThemeContext::new(Document::new(), Theme::Light);
        assert_eq!(context.pick("bg-black", "bg-white"), "bg-white");
        context.toggle();
        assert_eq!(context.pick("bg-black", "bg-white"), "bg-black");
    }
}
