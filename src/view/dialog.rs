use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use tui_input::Input;

use super::centered_rect_absolute;
use super::contact;
use super::newsletter;
use crate::overlay::{DialogSize, OverlayContent};
use crate::page::ElementId;
use crate::theme::Scheme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Contact,
    Newsletter,
    Help,
}

impl DialogKind {
    pub fn container(&self) -> &'static str {
        match self {
            DialogKind::Contact => "contact-dialog",
            DialogKind::Newsletter => "newsletter-dialog",
            DialogKind::Help => "help-dialog",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DialogKind::Contact => "Get in touch",
            DialogKind::Newsletter => "Stay informed",
            DialogKind::Help => "Help",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DialogKind::Contact => {
                "Questions about the book? Interested in a speaking engagement? Media inquiry?"
            }
            DialogKind::Newsletter => "Updates about the book and events.",
            DialogKind::Help => "Press escape or click outside to return.",
        }
    }

    pub fn size(&self) -> DialogSize {
        match self {
            DialogKind::Contact => DialogSize::Lg,
            DialogKind::Newsletter => DialogSize::Sm,
            DialogKind::Help => DialogSize::Md,
        }
    }

    fn height(&self) -> u16 {
        match self {
            DialogKind::Contact => 22,
            DialogKind::Newsletter => 10,
            DialogKind::Help => 20,
        }
    }

    pub fn focusables(&self) -> Vec<ElementId> {
        let ids: &[&str] = match self {
            DialogKind::Contact => &contact::FOCUSABLES,
            DialogKind::Newsletter => &newsletter::FOCUSABLES,
            DialogKind::Help => &[],
        };
        ids.iter().map(|id| ElementId::new(*id)).collect()
    }

    pub fn content(&self) -> OverlayContent {
        OverlayContent::new(self.container(), self.focusables()).with_size(self.size())
    }
}

/// The screen area the dialog occupies, everything else is backdrop.
pub fn dialog_area(kind: DialogKind, area: Rect) -> Rect {
    centered_rect_absolute(kind.size().width(), kind.height(), area)
}

/// Dims the page, clears the dialog area and draws its frame. Returns the
/// area left for the dialog body.
pub fn draw_frame(kind: DialogKind, scheme: &Scheme, frame: &mut Frame, area: Rect) -> Rect {
    frame.render_widget(Block::default().style(scheme.backdrop), area);

    let darea = dialog_area(kind, area);
    frame.render_widget(Clear, darea);
    let block = Block::default()
        .borders(Borders::all())
        .title(Span::styled(format!(" {} ", kind.title()), scheme.dialog_title))
        .title_bottom(Line::from(" [esc] close ").right_aligned())
        .style(scheme.dialog_border);
    let inner = block.inner(darea);
    frame.render_widget(block, darea);

    let rows = Layout::vertical([Constraint::Length(2), Constraint::Min(1)]).split(inner);
    frame.render_widget(
        Paragraph::new(kind.description())
            .style(scheme.dialog_description)
            .wrap(Wrap { trim: true }),
        rows[0],
    );
    rows[1]
}

/// A labelled single line text input. Places the cursor when focused.
pub fn draw_input(
    scheme: &Scheme,
    frame: &mut Frame,
    area: Rect,
    label: &str,
    input: &Input,
    focused: bool,
) {
    let rows = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(area);
    frame.render_widget(Paragraph::new(label).style(scheme.field_label), rows[0]);

    let width = rows[1].width.max(3);
    let scroll = input.visual_scroll(width as usize);
    frame.render_widget(
        Paragraph::new(input.value())
            .scroll((0, scroll as u16))
            .style(match focused {
                true => scheme.field_focused,
                false => scheme.field_unfocused,
            }),
        rows[1],
    );

    if focused {
        let x = input.visual_cursor().max(scroll) - scroll;
        frame.set_cursor_position((rows[1].x + x as u16, rows[1].y));
    }
}

pub fn draw_button(scheme: &Scheme, frame: &mut Frame, area: Rect, label: &str, focused: bool) {
    frame.render_widget(
        Paragraph::new(format!("[ {} ]", label)).style(match focused {
            true => scheme.field_focused,
            false => scheme.field_unfocused,
        }),
        area,
    );
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_help_has_no_focusables() {
        let content = DialogKind::Help.content();
        assert!(content.focusables.is_empty());
        assert_eq!("help-dialog", content.container.as_str());
    }

    #[test]
    fn test_dialog_area_is_centered() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(Rect::new(30, 15, 40, 10), dialog_area(DialogKind::Newsletter, area));
    }
}
