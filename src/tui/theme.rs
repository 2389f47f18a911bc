use ratatui::style::Color;

use crate::model::task::{Priority, Status};

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub dim: Color,
    pub header_bg: Color,
    pub selection_bg: Color,
    pub selection_border: Color,
    pub edit_bg: Color,
    pub error: Color,
    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x10, 0x10, 0x14),
            text: Color::Rgb(0xC8, 0xC8, 0xD0),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            dim: Color::Rgb(0x6E, 0x6E, 0x78),
            header_bg: Color::Rgb(0x1E, 0x1E, 0x26),
            selection_bg: Color::Rgb(0x26, 0x30, 0x42),
            selection_border: Color::Rgb(0x40, 0xA9, 0xFF),
            edit_bg: Color::Rgb(0x33, 0x3A, 0x22),
            error: Color::Rgb(0xFF, 0x4D, 0x4F),
            accent: Color::Rgb(0x40, 0xA9, 0xFF),
        }
    }
}

impl Theme {
    /// Status tag colors: red for todo, amber for in-progress, green for
    /// done, grey for stuck
    pub fn status_color(&self, status: Status) -> Color {
        match status {
            Status::Todo => Color::Rgb(0xFF, 0x4D, 0x4F),
            Status::InProgress => Color::Rgb(0xFA, 0xAD, 0x14),
            Status::Done => Color::Rgb(0x52, 0xC4, 0x1A),
            Status::Stuck => Color::Rgb(0x59, 0x59, 0x59),
        }
    }

    /// Priority tag colors, dark red down to light grey
    pub fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::UrgentImportant => Color::Rgb(0xA8, 0x07, 0x1A),
            Priority::Urgent => Color::Rgb(0xFA, 0x54, 0x1C),
            Priority::Important => Color::Rgb(0x18, 0x90, 0xFF),
            Priority::Routine => Color::Rgb(0xD9, 0xD9, 0xD9),
        }
    }
}
