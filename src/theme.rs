use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;

use crate::notification::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    SolarizedDark,
}

impl Theme {
    pub fn next(&self) -> Theme {
        match self {
            Theme::Dark => Theme::SolarizedDark,
            Theme::SolarizedDark => Theme::Dark,
        }
    }

    pub fn scheme(&self) -> Scheme {
        match self {
            Theme::SolarizedDark => Scheme {
                toast_default: Style::default().fg(Solarized::Base1.to_color()).bg(Solarized::Base02.to_color()),
                toast_info: Style::default().fg(Solarized::Blue.to_color()).bg(Solarized::Base02.to_color()),
                toast_success: Style::default().fg(Solarized::Green.to_color()).bg(Solarized::Base02.to_color()),
                toast_warning: Style::default().fg(Solarized::Yellow.to_color()).bg(Solarized::Base02.to_color()),
                toast_error: Style::default().fg(Solarized::Red.to_color()).bg(Solarized::Base02.to_color()),
                toast_paused: Style::default().add_modifier(Modifier::BOLD),
                toast_action: Style::default().fg(Solarized::Cyan.to_color()).add_modifier(Modifier::UNDERLINED),

                backdrop: Style::default().fg(Solarized::Base01.to_color()).bg(Solarized::Base03.to_color()),
                dialog_border: Style::default().fg(Solarized::Base1.to_color()),
                dialog_title: Style::default().fg(Solarized::Orange.to_color()).add_modifier(Modifier::BOLD),
                dialog_description: Style::default().fg(Solarized::Base0.to_color()),

                field_label: Style::default().fg(Solarized::Base00.to_color()),
                field_focused: Style::default().fg(Solarized::Base02.to_color()).bg(Solarized::Green.to_color()),
                field_unfocused: Style::default().fg(Solarized::Base1.to_color()).bg(Solarized::Base03.to_color()),

                nav_active: Style::default().fg(Solarized::Base02.to_color()).bg(Solarized::Yellow.to_color()),
                nav_inactive: Style::default().fg(Solarized::Base1.to_color()),
                body: Style::default().fg(Solarized::Base0.to_color()),
                heading: Style::default().fg(Solarized::Magenta.to_color()).add_modifier(Modifier::BOLD),
            },
            Theme::Dark => Scheme {
                toast_default: Style::default().fg(Color::White).bg(Color::DarkGray),
                toast_info: Style::default().fg(Color::Black).bg(Color::LightBlue),
                toast_success: Style::default().fg(Color::Black).bg(Color::Green),
                toast_warning: Style::default().fg(Color::Black).bg(Color::Yellow),
                toast_error: Style::default().fg(Color::White).bg(Color::Red),
                toast_paused: Style::default().add_modifier(Modifier::BOLD),
                toast_action: Style::default().add_modifier(Modifier::UNDERLINED),

                backdrop: Style::default().fg(Color::DarkGray),
                dialog_border: Style::default().fg(Color::Green),
                dialog_title: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                dialog_description: Style::default().fg(Color::Gray),

                field_label: Style::default().fg(Color::Gray),
                field_focused: Style::default().fg(Color::Black).bg(Color::Green),
                field_unfocused: Style::default().fg(Color::White).bg(Color::DarkGray),

                nav_active: Style::default().fg(Color::Black).bg(Color::Yellow),
                nav_inactive: Style::default().fg(Color::White),
                body: Style::default(),
                heading: Style::default().fg(Color::LightMagenta).add_modifier(Modifier::BOLD),
            },
        }
    }
}

pub struct Scheme {
    pub toast_default: Style,
    pub toast_info: Style,
    pub toast_success: Style,
    pub toast_warning: Style,
    pub toast_error: Style,
    pub toast_paused: Style,
    pub toast_action: Style,

    pub backdrop: Style,
    pub dialog_border: Style,
    pub dialog_title: Style,
    pub dialog_description: Style,

    pub field_label: Style,
    pub field_focused: Style,
    pub field_unfocused: Style,

    pub nav_active: Style,
    pub nav_inactive: Style,
    pub body: Style,
    pub heading: Style,
}

impl Scheme {
    pub fn toast(&self, severity: Severity) -> Style {
        match severity {
            Severity::Default => self.toast_default,
            Severity::Info => self.toast_info,
            Severity::Success => self.toast_success,
            Severity::Warning => self.toast_warning,
            Severity::Error => self.toast_error,
        }
    }
}

pub enum Solarized {
    Base03,
    Base02,
    Base01,
    Base00,
    Base0,
    Base1,
    Yellow,
    Orange,
    Red,
    Magenta,
    Blue,
    Cyan,
    Green,
}

impl Solarized {
    fn to_color(&self) -> Color {
        match self {
            Solarized::Base03 => Color::Rgb(0, 43, 54),
            Solarized::Base02 => Color::Rgb(7, 54, 66),
            Solarized::Base01 => Color::Rgb(88, 110, 117),
            Solarized::Base00 => Color::Rgb(101, 123, 131),
            Solarized::Base0 => Color::Rgb(131, 148, 150),
            Solarized::Base1 => Color::Rgb(147, 161, 161),
            Solarized::Yellow => Color::Rgb(181, 137, 0),
            Solarized::Orange => Color::Rgb(203, 75, 22),
            Solarized::Red => Color::Rgb(220, 50, 47),
            Solarized::Magenta => Color::Rgb(211, 54, 130),
            Solarized::Blue => Color::Rgb(38, 139, 210),
            Solarized::Cyan => Color::Rgb(42, 161, 152),
            Solarized::Green => Color::Rgb(133, 153, 0),
        }
    }
}
