use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use super::View;
use crate::app::App;
use crate::event::input::AppEvent;
use crate::scheduler::Scheduler;
use crate::page::{ElementId, PageEnvironment};

pub const BOOK: &str = "nav-book";
pub const CHAPTERS: &str = "nav-chapters";
pub const AUTHORS: &str = "nav-authors";
pub const CONTACT: &str = "nav-contact";
pub const NEWSLETTER: &str = "nav-newsletter";

const LINKS: [(&str, &str); 5] = [
    (BOOK, "The Book"),
    (CHAPTERS, "Chapters"),
    (AUTHORS, "Authors"),
    (CONTACT, "Contact"),
    (NEWSLETTER, "Newsletter"),
];

pub fn elements() -> Vec<ElementId> {
    LINKS.iter().map(|(id, _)| ElementId::new(*id)).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Book,
    Chapters,
    Authors,
}

impl Section {
    fn heading(&self) -> &'static str {
        match self {
            Section::Book => "About the Book",
            Section::Chapters => "Chapters",
            Section::Authors => "Authors",
        }
    }

    fn body(&self) -> Vec<&'static str> {
        match self {
            Section::Book => vec![
                "Why do American institutions so often fail the people they serve?",
                "",
                "The book traces a strong nation built around a weak state, from the",
                "founding to the present day, and asks what it would take to build",
                "institutions that earn back the trust they have lost.",
            ],
            Section::Chapters => vec![
                " 1. Mistrust",
                " 2. Foundations: A Strong Nation and a Weak State",
                " 3. A Rich Land and the Idea of Equality",
                " 4. Break up and Reconstruction",
                " 5. Building an Empire in the Land of Milk and Honey",
                " 6. Populists, Progressives, a New Deal",
                " 7. The War Against the New Deal",
                " 8. Broken Hearts",
                " 9. Government is the Problem, Not the Solution",
                "10. When Harry Met Louise",
                "11. America Goes Shopping",
                "12. Conclusion: The Enduring Challenge of American Institutions",
            ],
            Section::Authors => vec!["Sven Steinmo", "", "John D'Attoma"],
        }
    }
}

pub struct PageView {}

impl View for PageView {
    fn handle<S: Scheduler>(app: &mut App<S>, event: AppEvent) -> Option<AppEvent> {
        let AppEvent::Input(key) = event else {
            return None;
        };
        let page = app.overlay.env_mut();

        match key.code {
            KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => page.focus_next(true),
            KeyCode::Tab => page.focus_next(false),
            KeyCode::BackTab => page.focus_next(true),
            KeyCode::Char('j') | KeyCode::Down => {
                page.scroll_by(1);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                page.scroll_by(-1);
            }
            KeyCode::Enter => match page.focused()?.as_str() {
                BOOK => app.section = Section::Book,
                CHAPTERS => app.section = Section::Chapters,
                AUTHORS => app.section = Section::Authors,
                CONTACT => return Some(AppEvent::OpenContact),
                NEWSLETTER => return Some(AppEvent::OpenNewsletter),
                _ => (),
            },
            KeyCode::Char('c') => return Some(AppEvent::OpenContact),
            KeyCode::Char('s') => return Some(AppEvent::OpenNewsletter),
            KeyCode::Char('?') => return Some(AppEvent::OpenHelp),
            KeyCode::Char('x') => app.toasts.dismiss_all(),
            KeyCode::Char('d') => {
                if let Some(id) = app.toasts.notifications().last().map(|n| n.id) {
                    app.toasts.dismiss(id);
                }
            }
            KeyCode::Char('a') => {
                let newest = app
                    .toasts
                    .notifications()
                    .filter(|n| n.action.is_some())
                    .last()
                    .map(|n| n.id);
                if let Some(id) = newest {
                    app.toasts.activate(id);
                }
            }
            KeyCode::Char('t') => app.theme = app.theme.next(),
            KeyCode::Char('q') => return Some(AppEvent::Quit),
            _ => (),
        }
        None
    }

    fn draw<S: Scheduler>(app: &App<S>, frame: &mut Frame, area: Rect) {
        let scheme = app.theme.scheme();
        let page = app.overlay.env();
        let rows = Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).split(area);

        let mut links = vec![];
        for (id, label) in LINKS {
            links.push(Span::styled(
                format!(" {} ", label),
                match page.is_focused(&ElementId::new(id)) {
                    true => scheme.nav_active,
                    false => scheme.nav_inactive,
                },
            ));
            links.push(Span::raw(" "));
        }
        frame.render_widget(Paragraph::new(Line::from(links)), rows[0]);

        let mut lines = vec![Line::from(Span::styled(app.section.heading(), scheme.heading)), Line::default()];
        lines.extend(app.section.body().into_iter().map(|l| Line::from(l).style(scheme.body)));

        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .scroll((page.scroll, 0))
                .block(Block::default().borders(Borders::TOP)),
            rows[1],
        );
    }
}
