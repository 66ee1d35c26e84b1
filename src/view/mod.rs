pub mod contact;
pub mod dialog;
pub mod help;
pub mod layout;
pub mod newsletter;
pub mod page;
pub mod toast;

use crate::app::App;
use crate::event::input::AppEvent;
use crate::scheduler::Scheduler;
use ratatui::layout::Rect;
use ratatui::Frame;

pub trait View {
    fn handle<S: Scheduler>(app: &mut App<S>, event: AppEvent) -> Option<AppEvent>;
    fn draw<S: Scheduler>(app: &App<S>, frame: &mut Frame, area: Rect);
}

pub fn centered_rect_absolute(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
