use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use super::dialog::{draw_button, draw_frame, draw_input, DialogKind};
use super::View;
use crate::app::App;
use crate::event::input::AppEvent;
use crate::scheduler::Scheduler;
use crate::form::{ContactRequest, InquiryType};
use crate::page::{ElementId, PageEnvironment};

pub const NAME: &str = "contact-name";
pub const EMAIL: &str = "contact-email";
pub const ORGANIZATION: &str = "contact-organization";
pub const INQUIRY: &str = "contact-inquiry";
pub const MESSAGE: &str = "contact-message";
pub const SUBMIT: &str = "contact-submit";
pub const CLOSE: &str = "contact-close";

pub const FOCUSABLES: [&str; 7] = [NAME, EMAIL, ORGANIZATION, INQUIRY, MESSAGE, SUBMIT, CLOSE];

#[derive(Default)]
pub struct ContactState {
    pub name: Input,
    pub email: Input,
    pub organization: Input,
    pub inquiry: Option<InquiryType>,
    pub message: Input,
}

impl ContactState {
    pub fn request(&self) -> ContactRequest {
        let organization = self.organization.value().trim();
        ContactRequest {
            name: self.name.value().trim().to_string(),
            email: self.email.value().trim().to_string(),
            organization: match organization.is_empty() {
                true => None,
                false => Some(organization.to_string()),
            },
            inquiry_type: self.inquiry.map(|t| t.value().to_string()).unwrap_or_default(),
            message: self.message.value().trim().to_string(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Steps through the inquiry types, including the unselected state.
    pub fn cycle_inquiry(&mut self, backwards: bool) {
        let options: Vec<Option<InquiryType>> = std::iter::once(None)
            .chain(InquiryType::ALL.into_iter().map(Some))
            .collect();
        let len = options.len();
        let current = options.iter().position(|o| *o == self.inquiry).unwrap_or(0);
        let next = match backwards {
            true => (current + len - 1) % len,
            false => (current + 1) % len,
        };
        self.inquiry = options[next];
    }

    fn input_mut(&mut self, element: &str) -> Option<&mut Input> {
        match element {
            NAME => Some(&mut self.name),
            EMAIL => Some(&mut self.email),
            ORGANIZATION => Some(&mut self.organization),
            MESSAGE => Some(&mut self.message),
            _ => None,
        }
    }
}

pub struct ContactDialog {}

impl View for ContactDialog {
    fn handle<S: Scheduler>(app: &mut App<S>, event: AppEvent) -> Option<AppEvent> {
        let AppEvent::Input(key) = event else {
            return None;
        };
        let focused = app.overlay.env().focused()?;
        handle_key(&mut app.contact, focused, key)
    }

    fn draw<S: Scheduler>(app: &App<S>, frame: &mut Frame, area: Rect) {
        let scheme = app.theme.scheme();
        let body = draw_frame(DialogKind::Contact, &scheme, frame, area);
        let page = app.overlay.env();
        let is_focused = |id: &str| page.is_focused(&ElementId::new(id));
        let state = &app.contact;

        let rows = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(body);

        draw_input(&scheme, frame, rows[0], "Name *", &state.name, is_focused(NAME));
        draw_input(&scheme, frame, rows[1], "Email *", &state.email, is_focused(EMAIL));
        draw_input(
            &scheme,
            frame,
            rows[2],
            "Organization",
            &state.organization,
            is_focused(ORGANIZATION),
        );

        let inquiry = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(rows[3]);
        frame.render_widget(
            Paragraph::new("Inquiry type * (space to change)").style(scheme.field_label),
            inquiry[0],
        );
        frame.render_widget(
            Paragraph::new(Line::from(vec![Span::raw(format!(
                "< {} >",
                state.inquiry.map_or("Select an option", |t| t.label())
            ))]))
            .style(match is_focused(INQUIRY) {
                true => scheme.field_focused,
                false => scheme.field_unfocused,
            }),
            inquiry[1],
        );

        draw_input(&scheme, frame, rows[4], "Message *", &state.message, is_focused(MESSAGE));

        let buttons = Layout::horizontal([Constraint::Length(16), Constraint::Length(12)])
            .spacing(2)
            .split(rows[5]);
        draw_button(&scheme, frame, buttons[0], "Send message", is_focused(SUBMIT));
        draw_button(&scheme, frame, buttons[1], "Cancel", is_focused(CLOSE));
    }
}

fn handle_key(state: &mut ContactState, focused: ElementId, key: KeyEvent) -> Option<AppEvent> {
    match (focused.as_str(), key.code) {
        (SUBMIT, KeyCode::Enter) => Some(AppEvent::SubmitForm),
        (CLOSE, KeyCode::Enter) => Some(AppEvent::CloseOverlay),
        (INQUIRY, KeyCode::Char(' ') | KeyCode::Right | KeyCode::Enter) => {
            state.cycle_inquiry(false);
            None
        }
        (INQUIRY, KeyCode::Left) => {
            state.cycle_inquiry(true);
            None
        }
        // enter in a text field sends the form
        (_, KeyCode::Enter) => Some(AppEvent::SubmitForm),
        (element, _) => {
            if let Some(input) = state.input_mut(element) {
                input.handle_event(&Event::Key(key));
            }
            None
        }
    }
}
