use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Scroll behaviour of the page underneath any overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    #[default]
    Auto,
    Scroll,
    Visible,
    Hidden,
}

/// The page-wide state an overlay borrows while it is open: which element
/// has keyboard focus, and whether the page may scroll.
pub trait PageEnvironment {
    fn focused(&self) -> Option<ElementId>;
    fn focus(&mut self, element: ElementId);
    fn overflow(&self) -> Overflow;
    fn set_overflow(&mut self, overflow: Overflow);
}

impl<T: PageEnvironment + ?Sized> PageEnvironment for &mut T {
    fn focused(&self) -> Option<ElementId> {
        (**self).focused()
    }

    fn focus(&mut self, element: ElementId) {
        (**self).focus(element)
    }

    fn overflow(&self) -> Overflow {
        (**self).overflow()
    }

    fn set_overflow(&mut self, overflow: Overflow) {
        (**self).set_overflow(overflow)
    }
}

/// The terminal page: a ring of focusable elements (navigation links and
/// buttons), whatever currently has focus, and a scrollable body.
#[derive(Debug, Default)]
pub struct Page {
    elements: Vec<ElementId>,
    focused: Option<ElementId>,
    overflow: Overflow,
    pub scroll: u16,
}

impl Page {
    pub fn new(elements: Vec<ElementId>) -> Self {
        let focused = elements.first().cloned();
        Self {
            elements,
            focused,
            overflow: Overflow::Auto,
            scroll: 0,
        }
    }

    pub fn elements(&self) -> &[ElementId] {
        &self.elements
    }

    pub fn is_focused(&self, element: &ElementId) -> bool {
        self.focused.as_ref() == Some(element)
    }

    /// Moves focus along the page's own elements, wrapping at either end.
    pub fn focus_next(&mut self, backwards: bool) {
        if self.elements.is_empty() {
            return;
        }
        let len = self.elements.len();
        let next = match self
            .focused
            .as_ref()
            .and_then(|f| self.elements.iter().position(|e| e == f))
        {
            Some(offset) if backwards => (offset + len - 1) % len,
            Some(offset) => (offset + 1) % len,
            None => 0,
        };
        self.focused = Some(self.elements[next].clone());
    }

    /// Scrolls the body unless an overlay has locked it.
    pub fn scroll_by(&mut self, amount: i16) -> bool {
        if self.overflow == Overflow::Hidden {
            return false;
        }
        self.scroll = self.scroll.saturating_add_signed(amount);
        true
    }
}

impl PageEnvironment for Page {
    fn focused(&self) -> Option<ElementId> {
        self.focused.clone()
    }

    fn focus(&mut self, element: ElementId) {
        self.focused = Some(element);
    }

    fn overflow(&self) -> Overflow {
        self.overflow
    }

    fn set_overflow(&mut self, overflow: Overflow) {
        self.overflow = overflow;
    }
}
