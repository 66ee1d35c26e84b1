use std::io;

use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use ratatui::{prelude::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{Receiver, Sender};

use crate::config::Config;
use crate::event::input::AppEvent;
use crate::form::{submit_contact, submit_newsletter};
use crate::notification::{Action, NewNotification, ToastQueue};
use crate::overlay::{ClickTarget, KeyOutcome, Overlay};
use crate::page::Page;
use crate::scheduler::{Scheduler, TokioScheduler};
use crate::theme::Theme;
use crate::view::contact::ContactState;
use crate::view::dialog::{dialog_area, DialogKind};
use crate::view::layout::LayoutView;
use crate::view::newsletter::NewsletterState;
use crate::view::page::{self, Section};
use crate::view::toast::toast_at;
use crate::view::View;

pub struct App<S: Scheduler = TokioScheduler> {
    pub config: Config,
    pub theme: Theme,
    pub toasts: ToastQueue<S>,
    pub overlay: Overlay<Page>,
    pub dialog: Option<DialogKind>,
    pub contact: ContactState,
    pub newsletter: NewsletterState,
    pub section: Section,
    /// Last drawn frame size, used to hit test the mouse.
    pub area: Rect,
    receiver: Receiver<AppEvent>,
    sender: Sender<AppEvent>,
    quit: bool,
}

impl App<TokioScheduler> {
    pub fn new(config: Config, receiver: Receiver<AppEvent>, sender: Sender<AppEvent>) -> App {
        let scheduler = TokioScheduler::new(sender.clone());
        App::with_scheduler(config, scheduler, receiver, sender)
    }
}

impl<S: Scheduler> App<S> {
    pub fn with_scheduler(
        config: Config,
        scheduler: S,
        receiver: Receiver<AppEvent>,
        sender: Sender<AppEvent>,
    ) -> App<S> {
        App {
            theme: config.theme,
            toasts: ToastQueue::new(config.queue.clone(), scheduler),
            overlay: Overlay::new(Page::new(page::elements())),
            dialog: None,
            contact: ContactState::default(),
            newsletter: NewsletterState::default(),
            section: Section::default(),
            area: Rect::default(),
            config,
            receiver,
            sender,
            quit: false,
        }
    }

    pub async fn handle_event(&mut self, event: AppEvent) -> Result<(), anyhow::Error> {
        match event {
            AppEvent::Quit => self.quit = true,
            AppEvent::Startup => {
                let sender = self.sender.clone();
                self.toasts.enqueue(
                    NewNotification::info("Welcome")
                        .with_description("Press ? for help.")
                        .with_action(Action::new("Subscribe to the newsletter", move || {
                            if let Err(err) = sender.try_send(AppEvent::OpenNewsletter) {
                                log::warn!("could not open newsletter: {}", err);
                            }
                        })),
                );
            }
            AppEvent::Tick => (),
            AppEvent::TimerFired(timer) => self.toasts.expire(timer),
            AppEvent::OpenContact => self.open_dialog(DialogKind::Contact)?,
            AppEvent::OpenNewsletter => self.open_dialog(DialogKind::Newsletter)?,
            AppEvent::OpenHelp => self.open_dialog(DialogKind::Help)?,
            AppEvent::CloseOverlay => self.close_dialog(),
            AppEvent::SubmitForm => self.submit_form(),
            AppEvent::Mouse(mouse) => self.handle_mouse(mouse),
            AppEvent::Input(key) => {
                if self.overlay.is_open() {
                    match self.overlay.handle_key(key) {
                        KeyOutcome::Closed | KeyOutcome::Wrapped => {
                            self.sync_dialog();
                            return Ok(());
                        }
                        KeyOutcome::Ignored => (),
                    }
                    match key.code {
                        KeyCode::Tab => {
                            self.overlay
                                .focus_step(key.modifiers.contains(KeyModifiers::SHIFT));
                            return Ok(());
                        }
                        KeyCode::BackTab => {
                            self.overlay.focus_step(true);
                            return Ok(());
                        }
                        _ => (),
                    }
                }
                if let Some(next) = LayoutView::handle(self, AppEvent::Input(key)) {
                    self.sender.send(next).await?;
                }
            }
        };
        Ok(())
    }

    /// Opening while a dialog is already up is ignored here: toast actions
    /// may ask for a dialog at any time.
    fn open_dialog(&mut self, kind: DialogKind) -> Result<(), anyhow::Error> {
        if let Some(current) = self.dialog {
            log::debug!("ignoring request for {:?}, {:?} is open", kind, current);
            return Ok(());
        }
        self.overlay.open(kind.content())?;
        self.dialog = Some(kind);
        Ok(())
    }

    fn close_dialog(&mut self) {
        self.overlay.close();
        self.dialog = None;
    }

    fn sync_dialog(&mut self) {
        if !self.overlay.is_open() {
            self.dialog = None;
        }
    }

    fn submit_form(&mut self) {
        let (accepted, notification) = match self.dialog {
            Some(DialogKind::Contact) => submit_contact(&self.contact.request()),
            Some(DialogKind::Newsletter) => submit_newsletter(&self.newsletter.request()),
            _ => return,
        };
        self.toasts.enqueue(notification);

        if accepted {
            match self.dialog {
                Some(DialogKind::Contact) => self.contact.reset(),
                Some(DialogKind::Newsletter) => self.newsletter.reset(),
                _ => (),
            }
            self.close_dialog();
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let position = Position::new(mouse.column, mouse.row);
        let toast = toast_at(&self.toasts, self.area, position);

        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => self.toasts.hover(toast),
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(id) = toast {
                    match self.toasts.get(id).is_some_and(|n| n.action.is_some()) {
                        true => self.toasts.activate(id),
                        false => self.toasts.dismiss(id),
                    }
                    return;
                }
                if let Some(kind) = self.dialog {
                    let target = match dialog_area(kind, self.area).contains(position) {
                        true => ClickTarget::Content,
                        false => ClickTarget::Backdrop,
                    };
                    self.overlay.click(target);
                    self.sync_dialog();
                }
            }
            _ => (),
        }
    }
}

impl App<TokioScheduler> {
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<(), anyhow::Error> {
        loop {
            let Some(event) = self.receiver.recv().await else {
                return Ok(());
            };

            self.handle_event(event).await?;

            if self.quit {
                return Ok(());
            }

            terminal.autoresize()?;
            terminal.draw(|frame| {
                let area = frame.area();
                self.area = area;
                LayoutView::draw(self, frame, area);
            })?;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::page::{ElementId, Overflow, PageEnvironment};
    use crate::scheduler::ManualScheduler;
    use crate::view::contact;
    use anyhow::Result;
    use crossterm::event::{KeyEvent, KeyEventState};
    use pretty_assertions::assert_eq;
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn app() -> (App<ManualScheduler>, Receiver<AppEvent>) {
        let (sender, receiver) = mpsc::channel(32);
        let (_, app_receiver) = mpsc::channel(1);
        let mut app = App::with_scheduler(Config::default(), ManualScheduler::new(), app_receiver, sender);
        app.area = Rect::new(0, 0, 120, 40);
        (app, receiver)
    }

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Input(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click(column: u16, row: u16) -> AppEvent {
        AppEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    async fn type_text(app: &mut App<ManualScheduler>, text: &str) -> Result<()> {
        for c in text.chars() {
            app.handle_event(key(KeyCode::Char(c))).await?;
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_page_key_opens_contact_dialog() -> Result<()> {
        let (mut app, mut events) = app();
        app.handle_event(key(KeyCode::Char('c'))).await?;
        let event = events.recv().await.expect("event");
        assert!(matches!(event, AppEvent::OpenContact));

        app.handle_event(event).await?;
        assert_eq!(Some(DialogKind::Contact), app.dialog);
        assert_eq!(Some(ElementId::new(contact::NAME)), app.overlay.env().focused());
        assert_eq!(Overflow::Hidden, app.overlay.env().overflow());
        Ok(())
    }

    #[tokio::test]
    async fn test_escape_closes_and_restores_page() -> Result<()> {
        let (mut app, _events) = app();
        app.handle_event(AppEvent::OpenHelp).await?;
        assert_eq!(Some(ElementId::new("help-dialog")), app.overlay.env().focused());

        app.handle_event(key(KeyCode::Esc)).await?;
        assert_eq!(None, app.dialog);
        assert_eq!(Some(ElementId::new(page::BOOK)), app.overlay.env().focused());
        assert_eq!(Overflow::Auto, app.overlay.env().overflow());
        Ok(())
    }

    #[tokio::test]
    async fn test_backdrop_click_closes_content_click_does_not() -> Result<()> {
        let (mut app, _events) = app();
        app.handle_event(AppEvent::OpenNewsletter).await?;
        let inside = dialog_area(DialogKind::Newsletter, app.area);

        app.handle_event(click(inside.x + 1, inside.y + 1)).await?;
        assert_eq!(Some(DialogKind::Newsletter), app.dialog);

        app.handle_event(click(0, 39)).await?;
        assert_eq!(None, app.dialog);
        assert_eq!(Overflow::Auto, app.overlay.env().overflow());
        Ok(())
    }

    #[tokio::test]
    async fn test_tab_cycles_within_dialog() -> Result<()> {
        let (mut app, _events) = app();
        app.handle_event(AppEvent::OpenNewsletter).await?;
        app.handle_event(key(KeyCode::Tab)).await?;
        app.handle_event(key(KeyCode::Tab)).await?;
        assert_eq!(Some(ElementId::new("newsletter-close")), app.overlay.env().focused());
        app.handle_event(key(KeyCode::Tab)).await?;
        assert_eq!(Some(ElementId::new("newsletter-email")), app.overlay.env().focused());
        app.handle_event(AppEvent::Input(KeyEvent {
            code: KeyCode::BackTab,
            modifiers: KeyModifiers::SHIFT,
            kind: crossterm::event::KeyEventKind::Press,
            state: KeyEventState::NONE,
        }))
        .await?;
        assert_eq!(Some(ElementId::new("newsletter-close")), app.overlay.env().focused());
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_newsletter_keeps_dialog_open() -> Result<()> {
        let (mut app, mut events) = app();
        app.handle_event(AppEvent::OpenNewsletter).await?;
        type_text(&mut app, "not-an-email").await?;
        app.handle_event(key(KeyCode::Enter)).await?;
        let event = events.recv().await.expect("event");
        app.handle_event(event).await?;

        assert_eq!(Some(DialogKind::Newsletter), app.dialog);
        let toast = app.toasts.notifications().last().expect("toast");
        assert_eq!("Subscription failed", toast.title);
        Ok(())
    }

    #[tokio::test]
    async fn test_contact_submission_closes_dialog() -> Result<()> {
        let (mut app, _events) = app();
        app.handle_event(AppEvent::OpenContact).await?;
        type_text(&mut app, "Jane Doe").await?;
        app.handle_event(key(KeyCode::Tab)).await?;
        type_text(&mut app, "a@b.co").await?;
        app.handle_event(key(KeyCode::Tab)).await?;
        app.handle_event(key(KeyCode::Tab)).await?;
        app.handle_event(key(KeyCode::Char(' '))).await?;
        app.handle_event(key(KeyCode::Tab)).await?;
        type_text(&mut app, "Hello there").await?;
        app.handle_event(AppEvent::SubmitForm).await?;

        assert_eq!(None, app.dialog);
        assert_eq!("", app.contact.name.value());
        let toast = app.toasts.notifications().last().expect("toast");
        assert_eq!("Message sent!", toast.title);
        Ok(())
    }

    #[tokio::test]
    async fn test_timer_expires_toast() -> Result<()> {
        let (mut app, _events) = app();
        app.handle_event(AppEvent::Startup).await?;
        assert_eq!(1, app.toasts.len());

        for timer in app.toasts.scheduler_mut().advance(Duration::from_millis(5000)) {
            app.handle_event(AppEvent::TimerFired(timer)).await?;
        }
        assert!(app.toasts.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_welcome_action_opens_newsletter() -> Result<()> {
        let (mut app, mut events) = app();
        app.handle_event(AppEvent::Startup).await?;
        app.handle_event(key(KeyCode::Char('a'))).await?;
        assert!(app.toasts.is_empty());

        let event = events.recv().await.expect("event");
        assert!(matches!(event, AppEvent::OpenNewsletter));
        app.handle_event(event).await?;
        assert_eq!(Some(DialogKind::Newsletter), app.dialog);

        // a second request while open is ignored
        app.handle_event(AppEvent::OpenContact).await?;
        assert_eq!(Some(DialogKind::Newsletter), app.dialog);
        Ok(())
    }

    #[tokio::test]
    async fn test_scroll_is_locked_while_dialog_open() -> Result<()> {
        let (mut app, _events) = app();
        app.handle_event(key(KeyCode::Char('j'))).await?;
        assert_eq!(1, app.overlay.env().scroll);
        app.handle_event(AppEvent::OpenHelp).await?;
        app.overlay.env_mut().scroll_by(5);
        assert_eq!(1, app.overlay.env().scroll);
        Ok(())
    }
}
