use ratatui::buffer::Buffer;
use ratatui::layout::{Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::register_cell_style;
use crate::styles::{CellStyle, digit_symbol};

const STYLE_NAME: &str = "Underlined";

/// Compact cells: the digit on top, a rule underneath.
#[derive(Clone, Default)]
pub struct Underlined;

impl CellStyle for Underlined {
    fn cell_size(&self) -> Size {
        Size::new(3, 2)
    }

    fn render_cell(&self, digit: Option<u8>, active: bool, area: Rect, buf: &mut Buffer) {
        let rule_color = if active { Color::Cyan } else { Color::Gray };
        let rule = "─".repeat(area.width as usize);
        Paragraph::new(vec![
            Line::from(Span::styled(
                digit_symbol(digit),
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .centered(),
            Line::from(Span::styled(rule, Style::default().fg(rule_color))),
        ])
        .render(area, buf);
    }

    fn name(&self) -> &'static str {
        STYLE_NAME
    }
}

register_cell_style!(Underlined, STYLE_NAME);
