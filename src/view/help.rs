use super::dialog::{draw_frame, DialogKind};
use super::View;
use crate::app::App;
use crate::event::input::AppEvent;
use crate::scheduler::Scheduler;
use ratatui::layout::Rect;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub struct HelpDialog {}

impl View for HelpDialog {
    fn handle<S: Scheduler>(_app: &mut App<S>, _event: AppEvent) -> Option<AppEvent> {
        None
    }

    fn draw<S: Scheduler>(app: &App<S>, frame: &mut Frame, area: Rect) {
        let scheme = app.theme.scheme();
        let body = draw_frame(DialogKind::Help, &scheme, frame, area);
        frame.render_widget(Paragraph::new(help()).style(scheme.body), body);
    }
}

fn help() -> String {
"Key mappings:

[tab]   next link or field
[S-tab] previous link or field
[enter] follow link / press button
[j]     scroll down
[k]     scroll up
[c]     contact form
[s]     newsletter signup
[a]     run the newest toast action
[d]     dismiss the newest toast
[x]     dismiss all toasts
[t]     rotate the theme
[q]     quit

Hover a toast to keep it on screen, click it to dismiss.
".to_string()
}
