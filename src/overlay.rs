use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::page::{ElementId, Overflow, PageEnvironment};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogSize {
    Sm,
    #[default]
    Md,
    Lg,
    Xl,
    Full,
}

impl DialogSize {
    pub fn width(&self) -> u16 {
        match self {
            DialogSize::Sm => 40,
            DialogSize::Md => 50,
            DialogSize::Lg => 60,
            DialogSize::Xl => 70,
            DialogSize::Full => 100,
        }
    }
}

/// What an overlay shows: its container and the focusable elements inside
/// it, in tab order.
#[derive(Debug, Clone)]
pub struct OverlayContent {
    pub container: ElementId,
    pub focusables: Vec<ElementId>,
    pub size: DialogSize,
}

impl OverlayContent {
    pub fn new(container: impl Into<ElementId>, focusables: Vec<ElementId>) -> Self {
        Self {
            container: container.into(),
            focusables,
            size: DialogSize::default(),
        }
    }

    pub fn with_size(mut self, size: DialogSize) -> Self {
        self.size = size;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Backdrop,
    Content,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Closed,
    /// Focus wrapped around the trap.
    Wrapped,
    Ignored,
}

#[derive(Debug)]
struct Session {
    content: OverlayContent,
    return_focus: Option<ElementId>,
    saved_overflow: Overflow,
}

/// A single modal overlay over a page.
///
/// While open, focus stays inside the overlay and the page cannot scroll.
/// Closing, or dropping the overlay while open, hands focus back to
/// whatever had it before and restores the page's scroll style.
pub struct Overlay<E: PageEnvironment> {
    env: E,
    session: Option<Session>,
}

impl<E: PageEnvironment> Overlay<E> {
    pub fn new(env: E) -> Self {
        Self { env, session: None }
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut E {
        &mut self.env
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn content(&self) -> Option<&OverlayContent> {
        self.session.as_ref().map(|s| &s.content)
    }

    pub fn open(&mut self, content: OverlayContent) -> Result<(), anyhow::Error> {
        if let Some(session) = &self.session {
            anyhow::bail!(
                "cannot open overlay {}: overlay {} is already open",
                content.container,
                session.content.container
            );
        }

        let return_focus = self.env.focused();
        let saved_overflow = self.env.overflow();

        match content.focusables.first() {
            Some(first) => self.env.focus(first.clone()),
            None => self.env.focus(content.container.clone()),
        }
        self.env.set_overflow(Overflow::Hidden);

        log::debug!(
            "open overlay {} ({} focusable, returning to {:?})",
            content.container,
            content.focusables.len(),
            return_focus
        );
        self.session = Some(Session {
            content,
            return_focus,
            saved_overflow,
        });
        Ok(())
    }

    pub fn close(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        self.env.set_overflow(session.saved_overflow);
        if let Some(element) = session.return_focus {
            self.env.focus(element);
        }
        log::debug!("close overlay {}", session.content.container);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        let Some(session) = &self.session else {
            return KeyOutcome::Ignored;
        };

        let backwards = match key.code {
            KeyCode::Esc => {
                self.close();
                return KeyOutcome::Closed;
            }
            KeyCode::BackTab => true,
            KeyCode::Tab => key.modifiers.contains(KeyModifiers::SHIFT),
            _ => return KeyOutcome::Ignored,
        };

        let focusables = &session.content.focusables;
        let (Some(first), Some(last)) = (focusables.first(), focusables.last()) else {
            return KeyOutcome::Ignored;
        };
        let focused = self.env.focused();

        let target = match backwards {
            true if focused.as_ref() == Some(first) => last.clone(),
            false if focused.as_ref() == Some(last) => first.clone(),
            _ => return KeyOutcome::Ignored,
        };
        self.env.focus(target);
        KeyOutcome::Wrapped
    }

    /// Moves focus one step within the overlay. Used by the presentation
    /// layer for tab presses the trap itself does not intercept.
    pub fn focus_step(&mut self, backwards: bool) {
        let Some(session) = &self.session else {
            return;
        };
        let focusables = &session.content.focusables;
        if focusables.is_empty() {
            return;
        }
        let len = focusables.len();
        let next = match self
            .env
            .focused()
            .and_then(|f| focusables.iter().position(|e| *e == f))
        {
            Some(offset) if backwards => (offset + len - 1) % len,
            Some(offset) => (offset + 1) % len,
            None => 0,
        };
        let target = focusables[next].clone();
        self.env.focus(target);
    }

    pub fn click(&mut self, target: ClickTarget) {
        match target {
            ClickTarget::Backdrop => self.close(),
            ClickTarget::Content => (),
        }
    }
}

impl<E: PageEnvironment> Drop for Overlay<E> {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::page::Page;
    use anyhow::Result;
    use pretty_assertions::assert_eq;

    fn page() -> Page {
        let mut page = Page::new(vec!["nav".into(), "contact".into()]);
        page.focus("contact".into());
        page.set_overflow(Overflow::Scroll);
        page
    }

    fn content() -> OverlayContent {
        OverlayContent::new(
            "dialog",
            vec!["f1".into(), "f2".into(), "f3".into()],
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_open_focuses_first_and_locks_scroll() -> Result<()> {
        let mut page = page();
        let mut overlay = Overlay::new(&mut page);
        overlay.open(content())?;

        assert!(overlay.is_open());
        assert_eq!(Some(ElementId::new("f1")), overlay.env().focused());
        assert_eq!(Overflow::Hidden, overlay.env().overflow());
        Ok(())
    }

    #[test]
    fn test_close_restores_focus_and_scroll() -> Result<()> {
        let mut page = page();
        let mut overlay = Overlay::new(&mut page);
        overlay.open(content())?;
        overlay.close();
        overlay.close();

        assert!(!overlay.is_open());
        drop(overlay);
        assert_eq!(Some(ElementId::new("contact")), page.focused());
        assert_eq!(Overflow::Scroll, page.overflow());
        Ok(())
    }

    #[test]
    fn test_open_without_focusables_focuses_container() -> Result<()> {
        let mut page = page();
        let mut overlay = Overlay::new(&mut page);
        overlay.open(OverlayContent::new("empty", vec![]))?;
        assert_eq!(Some(ElementId::new("empty")), overlay.env().focused());
        assert_eq!(KeyOutcome::Ignored, overlay.handle_key(key(KeyCode::Tab)));

        assert_eq!(KeyOutcome::Closed, overlay.handle_key(key(KeyCode::Esc)));
        assert_eq!(Some(ElementId::new("contact")), overlay.env().focused());
        Ok(())
    }

    #[test]
    fn test_open_with_nothing_focused() -> Result<()> {
        let mut page = Page::new(vec![]);
        let mut overlay = Overlay::new(&mut page);
        overlay.open(content())?;
        overlay.close();
        // nothing to return to, focus is left where it was
        assert_eq!(Some(ElementId::new("f1")), overlay.env().focused());
        Ok(())
    }

    #[test]
    fn test_tab_wraps_forward_and_backward() -> Result<()> {
        let mut page = page();
        let mut overlay = Overlay::new(&mut page);
        overlay.open(content())?;

        overlay.env_mut().focus("f3".into());
        assert_eq!(KeyOutcome::Wrapped, overlay.handle_key(key(KeyCode::Tab)));
        assert_eq!(Some(ElementId::new("f1")), overlay.env().focused());

        assert_eq!(KeyOutcome::Wrapped, overlay.handle_key(key(KeyCode::BackTab)));
        assert_eq!(Some(ElementId::new("f3")), overlay.env().focused());

        overlay.env_mut().focus("f1".into());
        let shift_tab = KeyEvent::new(KeyCode::Tab, KeyModifiers::SHIFT);
        assert_eq!(KeyOutcome::Wrapped, overlay.handle_key(shift_tab));
        assert_eq!(Some(ElementId::new("f3")), overlay.env().focused());
        Ok(())
    }

    #[test]
    fn test_tab_in_the_middle_is_not_intercepted() -> Result<()> {
        let mut page = page();
        let mut overlay = Overlay::new(&mut page);
        overlay.open(content())?;
        overlay.env_mut().focus("f2".into());

        assert_eq!(KeyOutcome::Ignored, overlay.handle_key(key(KeyCode::Tab)));
        assert_eq!(KeyOutcome::Ignored, overlay.handle_key(key(KeyCode::BackTab)));
        assert_eq!(Some(ElementId::new("f2")), overlay.env().focused());

        overlay.focus_step(false);
        assert_eq!(Some(ElementId::new("f3")), overlay.env().focused());
        Ok(())
    }

    #[test]
    fn test_escape_restores_scroll() -> Result<()> {
        let mut page = page();
        let mut overlay = Overlay::new(&mut page);
        overlay.open(content())?;
        overlay.handle_key(key(KeyCode::Esc));
        drop(overlay);
        assert_eq!(Overflow::Scroll, page.overflow());
        assert_eq!(Some(ElementId::new("contact")), page.focused());
        Ok(())
    }

    #[test]
    fn test_backdrop_click_closes_but_content_click_does_not() -> Result<()> {
        let mut page = page();
        let mut overlay = Overlay::new(&mut page);
        overlay.open(content())?;

        overlay.click(ClickTarget::Content);
        assert!(overlay.is_open());
        overlay.click(ClickTarget::Backdrop);
        assert!(!overlay.is_open());
        assert_eq!(Overflow::Scroll, overlay.env().overflow());
        Ok(())
    }

    #[test]
    fn test_keys_ignored_while_closed() {
        let mut page = page();
        let mut overlay = Overlay::new(&mut page);
        assert_eq!(KeyOutcome::Ignored, overlay.handle_key(key(KeyCode::Esc)));
        assert_eq!(Some(ElementId::new("contact")), overlay.env().focused());
    }

    #[test]
    fn test_second_open_is_rejected() -> Result<()> {
        let mut page = page();
        let mut overlay = Overlay::new(&mut page);
        overlay.open(content())?;
        assert!(overlay.open(OverlayContent::new("other", vec![])).is_err());
        assert_eq!(Some("dialog"), overlay.content().map(|c| c.container.as_str()));

        overlay.close();
        assert_eq!(Some(ElementId::new("contact")), overlay.env().focused());
        assert_eq!(Overflow::Scroll, overlay.env().overflow());
        Ok(())
    }

    #[test]
    fn test_drop_while_open_restores_page() -> Result<()> {
        let mut page = page();
        {
            let mut overlay = Overlay::new(&mut page);
            overlay.open(content())?;
        }
        assert_eq!(Some(ElementId::new("contact")), page.focused());
        assert_eq!(Overflow::Scroll, page.overflow());
        Ok(())
    }
}
