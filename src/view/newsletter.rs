use crossterm::event::{Event, KeyCode};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::Frame;
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use super::dialog::{draw_button, draw_frame, draw_input, DialogKind};
use super::View;
use crate::app::App;
use crate::event::input::AppEvent;
use crate::scheduler::Scheduler;
use crate::form::NewsletterRequest;
use crate::page::{ElementId, PageEnvironment};

pub const EMAIL: &str = "newsletter-email";
pub const SUBMIT: &str = "newsletter-submit";
pub const CLOSE: &str = "newsletter-close";

pub const FOCUSABLES: [&str; 3] = [EMAIL, SUBMIT, CLOSE];

#[derive(Default)]
pub struct NewsletterState {
    pub email: Input,
}

impl NewsletterState {
    pub fn request(&self) -> NewsletterRequest {
        NewsletterRequest {
            email: self.email.value().trim().to_string(),
        }
    }

    pub fn reset(&mut self) {
        self.email = Input::default();
    }
}

pub struct NewsletterDialog {}

impl View for NewsletterDialog {
    fn handle<S: Scheduler>(app: &mut App<S>, event: AppEvent) -> Option<AppEvent> {
        let AppEvent::Input(key) = event else {
            return None;
        };
        let focused = app.overlay.env().focused()?;
        match (focused.as_str(), key.code) {
            (CLOSE, KeyCode::Enter) => Some(AppEvent::CloseOverlay),
            (_, KeyCode::Enter) => Some(AppEvent::SubmitForm),
            (EMAIL, _) => {
                app.newsletter.email.handle_event(&Event::Key(key));
                None
            }
            _ => None,
        }
    }

    fn draw<S: Scheduler>(app: &App<S>, frame: &mut Frame, area: Rect) {
        let scheme = app.theme.scheme();
        let body = draw_frame(DialogKind::Newsletter, &scheme, frame, area);
        let page = app.overlay.env();

        let rows = Layout::vertical([Constraint::Length(3), Constraint::Length(1)]).split(body);
        draw_input(
            &scheme,
            frame,
            rows[0],
            "Your email address",
            &app.newsletter.email,
            page.is_focused(&ElementId::new(EMAIL)),
        );
        let buttons = Layout::horizontal([Constraint::Length(13), Constraint::Length(12)])
            .spacing(2)
            .split(rows[1]);
        draw_button(&scheme, frame, buttons[0], "Subscribe", page.is_focused(&ElementId::new(SUBMIT)));
        draw_button(&scheme, frame, buttons[1], "Cancel", page.is_focused(&ElementId::new(CLOSE)));
    }
}
