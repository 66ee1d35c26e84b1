use super::contact::ContactDialog;
use super::dialog::DialogKind;
use super::help::HelpDialog;
use super::newsletter::NewsletterDialog;
use super::page::PageView;
use super::toast::ToastView;
use super::View;
use crate::app::App;
use crate::event::input::AppEvent;
use crate::scheduler::Scheduler;
use crate::page::{Overflow, PageEnvironment};
use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub struct LayoutView {}

impl View for LayoutView {
    fn handle<S: Scheduler>(app: &mut App<S>, event: AppEvent) -> Option<AppEvent> {
        match app.dialog {
            Some(DialogKind::Contact) => ContactDialog::handle(app, event),
            Some(DialogKind::Newsletter) => NewsletterDialog::handle(app, event),
            Some(DialogKind::Help) => HelpDialog::handle(app, event),
            None => PageView::handle(app, event),
        }
    }

    fn draw<S: Scheduler>(app: &App<S>, f: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .margin(0)
            .constraints([Constraint::Length(1), Constraint::Min(4)])
            .split(area);

        f.render_widget(status_widget(app), rows[0]);
        PageView::draw(app, f, rows[1]);

        match app.dialog {
            Some(DialogKind::Contact) => ContactDialog::draw(app, f, area),
            Some(DialogKind::Newsletter) => NewsletterDialog::draw(app, f, area),
            Some(DialogKind::Help) => HelpDialog::draw(app, f, area),
            None => (),
        }

        ToastView::draw(app, f, area);
    }
}

fn status_widget<S: Scheduler>(app: &App<S>) -> Paragraph {
    let locked = app.overlay.env().overflow() == Overflow::Hidden;
    Paragraph::new(vec![Line::from(vec![
        Span::styled(
            " colophon ",
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::Magenta)
                .fg(Color::White),
        ),
        Span::styled(
            format!(" {} toast(s) ", app.toasts.len()),
            Style::default().bg(Color::Blue).fg(Color::White),
        ),
        Span::styled(
            match app.dialog {
                Some(kind) => format!(" {} [esc] close ", kind.title()),
                None => " [?] help [q] quit ".to_string(),
            },
            Style::default().bg(match locked {
                true => Color::Red,
                false => Color::DarkGray,
            }),
        ),
    ])])
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::Config;
    use crate::notification::NewNotification;
    use crate::scheduler::ManualScheduler;
    use anyhow::Result;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use tokio::sync::mpsc;

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_draws_page_dialog_and_toasts() -> Result<()> {
        let (sender, _events) = mpsc::channel(8);
        let (_, receiver) = mpsc::channel(1);
        let mut app = App::with_scheduler(Config::default(), ManualScheduler::new(), receiver, sender);
        app.toasts.enqueue(NewNotification::success("Message sent!"));
        app.overlay.open(DialogKind::Newsletter.content())?;
        app.dialog = Some(DialogKind::Newsletter);

        let mut terminal = Terminal::new(TestBackend::new(100, 30))?;
        terminal.draw(|frame| {
            let area = frame.area();
            LayoutView::draw(&app, frame, area);
        })?;

        let screen = screen(&terminal);
        assert!(screen.contains("About the Book"));
        assert!(screen.contains("Stay informed"));
        assert!(screen.contains("Message sent!"));
        assert!(screen.contains("1 toast(s)"));
        Ok(())
    }
}
