use ratatui::buffer::Buffer;
use ratatui::layout::{Rect, Size};
use ratatui::style::{Modifier, Style, Stylize};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::register_cell_style;
use crate::styles::{CellStyle, digit_symbol};

const STYLE_NAME: &str = "Boxed";

/// Every digit sits in its own bordered box; the active box is highlighted.
#[derive(Clone, Default)]
pub struct Boxed;

impl CellStyle for Boxed {
    fn cell_size(&self) -> Size {
        Size::new(5, 3)
    }

    fn render_cell(&self, digit: Option<u8>, active: bool, area: Rect, buf: &mut Buffer) {
        let block = if active {
            Block::bordered().cyan()
        } else {
            Block::bordered()
        };
        Paragraph::new(Line::from(digit_symbol(digit)).centered())
            .style(Style::default().add_modifier(Modifier::BOLD))
            .block(block)
            .render(area, buf);
    }

    fn name(&self) -> &'static str {
        STYLE_NAME
    }
}

register_cell_style!(Boxed, STYLE_NAME);
