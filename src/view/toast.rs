use ratatui::layout::{Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::View;
use crate::app::App;
use crate::event::input::AppEvent;
use crate::notification::{Anchor, Notification, NotificationId, Severity, ToastQueue};
use crate::scheduler::Scheduler;

const WIDTH: u16 = 40;
const MARGIN: u16 = 1;

pub struct ToastView {}

impl View for ToastView {
    fn handle<S: Scheduler>(_app: &mut App<S>, _event: AppEvent) -> Option<AppEvent> {
        None
    }

    fn draw<S: Scheduler>(app: &App<S>, frame: &mut Frame, area: Rect) {
        let scheme = app.theme.scheme();
        for (id, rect) in toast_areas(&app.toasts, area) {
            let Some(notification) = app.toasts.get(id) else {
                continue;
            };
            let mut style = scheme.toast(notification.severity);
            if app.toasts.is_paused(id) {
                style = style.patch(scheme.toast_paused);
            }

            let mut lines = vec![Line::from(vec![
                Span::raw(icon(notification.severity)),
                Span::raw(notification.title.clone()),
            ])];
            if let Some(description) = &notification.description {
                lines.push(Line::from(description.clone()));
            }
            if let Some(action) = &notification.action {
                lines.push(Line::from(Span::styled(format!("[a] {}", action.label), scheme.toast_action)));
            }

            frame.render_widget(Clear, rect);
            frame.render_widget(
                Paragraph::new(lines).style(style).block(
                    Block::default()
                        .borders(Borders::all())
                        .title_top(Line::from(" x ").right_aligned()),
                ),
                rect,
            );
        }
    }
}

fn icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Default => "",
        Severity::Info => "i ",
        Severity::Success => "✓ ",
        Severity::Warning => "! ",
        Severity::Error => "✗ ",
    }
}

fn height(notification: &Notification) -> u16 {
    let mut height = 3;
    if notification.description.is_some() {
        height += 1;
    }
    if notification.action.is_some() {
        height += 1;
    }
    height
}

/// Where each active toast is drawn, oldest first. When the stack is taller
/// than the screen the oldest toasts are left out until the rest fit.
pub fn toast_areas<S: Scheduler>(queue: &ToastQueue<S>, area: Rect) -> Vec<(NotificationId, Rect)> {
    let width = WIDTH.min(area.width.saturating_sub(MARGIN * 2));
    let heights: Vec<(NotificationId, u16)> = queue.notifications().map(|n| (n.id, height(n))).collect();

    let top = area.y + MARGIN;
    let bottom = (area.y + area.height).saturating_sub(MARGIN);
    let space = bottom.saturating_sub(top);

    let mut first = heights.len();
    let mut total: u16 = 0;
    while first > 0 && total + heights[first - 1].1 <= space {
        first -= 1;
        total += heights[first].1;
    }

    let anchor = queue.config().anchor;
    let x = match anchor {
        Anchor::TopLeft | Anchor::BottomLeft => area.x + MARGIN,
        Anchor::TopRight | Anchor::BottomRight => {
            (area.x + area.width).saturating_sub(width + MARGIN)
        }
        Anchor::TopCenter | Anchor::BottomCenter => area.x + (area.width - width) / 2,
    };
    let mut y = match anchor {
        Anchor::TopLeft | Anchor::TopRight | Anchor::TopCenter => top,
        _ => bottom - total,
    };

    let mut areas = vec![];
    for (id, height) in &heights[first..] {
        areas.push((*id, Rect::new(x, y, width, *height)));
        y += height;
    }
    areas
}

pub fn toast_at<S: Scheduler>(queue: &ToastQueue<S>, area: Rect, position: Position) -> Option<NotificationId> {
    toast_areas(queue, area)
        .into_iter()
        .find(|(_, rect)| rect.contains(position))
        .map(|(id, _)| id)
}
