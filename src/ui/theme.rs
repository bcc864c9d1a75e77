use crate::render::CellStyle;
use ratatui::style::{Color, Modifier, Style};

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub border_focused: Color,
    pub border_normal: Color,
    pub status_bg: Color,
    pub canvas_bg: Color,
    pub cell_text: Color,
    pub marked_by_text: Color,
    pub unknown: Color,
    pub prime: Color,
    pub composite: Color,   // Light orange
    pub current_base: Color, // Yellow
    pub current_multiple: Color, // Light red
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),
    secondary: Color::Rgb(250, 179, 135),
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    border_focused: Color::Rgb(249, 226, 175),
    border_normal: Color::Rgb(108, 112, 134),
    status_bg: Color::Rgb(50, 50, 70),
    canvas_bg: Color::Rgb(255, 255, 255),
    cell_text: Color::Rgb(30, 30, 30),
    marked_by_text: Color::Rgb(110, 110, 110),
    unknown: Color::Rgb(245, 245, 245),
    prime: Color::Rgb(210, 255, 210),
    composite: Color::Rgb(255, 230, 200),
    current_base: Color::Rgb(255, 255, 0),
    current_multiple: Color::Rgb(255, 200, 200),
};

impl Theme {
    /// Fill color for a cell style
    pub fn fill(&self, style: CellStyle) -> Color {
        match style {
            CellStyle::Unknown => self.unknown,
            CellStyle::Prime => self.prime,
            CellStyle::Composite => self.composite,
            CellStyle::CurrentBase => self.current_base,
            CellStyle::CurrentMultiple => self.current_multiple,
        }
    }

    /// Full text style for a cell's number
    pub fn style_for(&self, style: CellStyle) -> Style {
        let base = Style::default().bg(self.fill(style)).fg(self.cell_text);
        match style {
            CellStyle::CurrentBase | CellStyle::CurrentMultiple => {
                base.add_modifier(Modifier::BOLD)
            }
            _ => base,
        }
    }
}
