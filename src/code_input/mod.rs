use std::num::NonZeroUsize;

use crossterm::event::KeyEvent;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Flex, Layout, Position, Rect};
use ratatui::widgets::StatefulWidgetRef;
use tracing::{debug, trace};

use crate::styles::CellStyle;

pub mod cells;
pub mod keys;

use cells::Cells;
use keys::KeyAction;

/// Gap between two neighbouring cells.
const CELL_SPACING: u16 = 1;

/// Whether an event was taken by the widget or should be handled by its host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handled {
    Consumed,
    Ignored,
}

/// Fixed-length numeric code entry with one focusable cell per digit.
///
/// The digits are private to the widget; the host observes them through the
/// `on_change` callback, which receives the concatenated digits after every
/// mutation, and through the read-only accessors.
pub struct CodeInput {
    cells: Cells,
    active: Option<usize>,
    on_change: Box<dyn FnMut(&str)>,
}

impl CodeInput {
    /// Builds the widget from an initial value. Like any other mutation this
    /// reports the value once and moves focus to the first empty cell.
    pub fn new(length: NonZeroUsize, value: &str, on_change: impl FnMut(&str) + 'static) -> Self {
        let mut input = Self {
            cells: Cells::parse(length, value),
            active: None,
            on_change: Box::new(on_change),
        };
        input.commit();
        input
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn cell(&self, index: usize) -> Option<u8> {
        self.cells.get(index)
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn value(&self) -> String {
        self.cells.value()
    }

    pub fn is_complete(&self) -> bool {
        self.cells.is_complete()
    }

    /// Focus-in: lands on the first empty cell before `index` if there is one.
    /// Out-of-range indices are ignored.
    pub fn focus(&mut self, index: usize) {
        if index >= self.len() {
            return;
        }
        self.active = Some(self.cells.find_first_empty_before(index).unwrap_or(index));
    }

    pub fn blur(&mut self) {
        self.active = None;
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> Handled {
        let Some(index) = self.active else {
            return Handled::Ignored;
        };
        let Some(action) = KeyAction::classify(key) else {
            return Handled::Ignored;
        };
        trace!(?action, index, "key consumed");
        match action {
            KeyAction::Populate(digit) => {
                self.cells.populate(index, digit);
                if self.cells.is_empty_at(index + 1) {
                    self.focus(index + 1);
                }
                self.commit();
            }
            KeyAction::Backspace => {
                if self.cells.clear(index) {
                    self.commit();
                } else if let Some(previous) = self.cells.find_last_populated_before(index) {
                    self.cells.clear(previous);
                    self.focus(previous);
                    self.commit();
                }
            }
            KeyAction::Delete => {
                if self.cells.clear(index) {
                    self.commit();
                }
            }
            KeyAction::MoveLeft => {
                if let Some(previous) = index.checked_sub(1) {
                    self.focus(previous);
                }
            }
            KeyAction::MoveRight => self.focus(index + 1),
            KeyAction::Suppress => {}
        }
        Handled::Consumed
    }

    /// Fills every cell at once when `text` is exactly `len()` decimal digits;
    /// anything else is dropped without a trace in the cells.
    pub fn handle_paste(&mut self, text: &str) -> Handled {
        if self.active.is_none() {
            return Handled::Ignored;
        }
        let digits: Option<Vec<u8>> = text
            .chars()
            .map(|c| c.is_ascii_digit().then(|| c as u8 - b'0'))
            .collect();
        match digits {
            Some(digits) if digits.len() == self.len() => {
                self.cells.fill(digits);
                self.commit();
            }
            _ => trace!(len = text.len(), "paste rejected"),
        }
        Handled::Consumed
    }

    /// Focuses the cell under `position`, e.g. after a mouse click.
    pub fn handle_click(&mut self, cell_areas: &[Rect], position: Position) -> Handled {
        match cell_areas.iter().position(|area| area.contains(position)) {
            Some(index) => {
                self.focus(index);
                Handled::Consumed
            }
            None => Handled::Ignored,
        }
    }

    /// Screen rectangles of the cells when the widget is drawn into `area`.
    pub fn cell_areas(&self, area: Rect, style: &dyn CellStyle) -> Vec<Rect> {
        let size = style.cell_size();
        let row = Rect {
            height: size.height.min(area.height),
            ..area
        };
        Layout::horizontal(vec![Constraint::Length(size.width); self.len()])
            .flex(Flex::Start)
            .spacing(CELL_SPACING)
            .split(row)
            .to_vec()
    }

    /// Total width and height needed to draw every cell without shrinking.
    pub fn required_size(&self, style: &dyn CellStyle) -> (u16, u16) {
        let size = style.cell_size();
        let cells = u16::try_from(self.len()).unwrap_or(u16::MAX);
        let width = cells
            .saturating_mul(size.width)
            .saturating_add(cells.saturating_sub(1).saturating_mul(CELL_SPACING));
        (width, size.height)
    }

    /// Where the terminal cursor belongs: the middle of the active cell.
    pub fn cursor_position(&self, cell_areas: &[Rect]) -> Option<Position> {
        let area = cell_areas.get(self.active?)?;
        Some(Position::new(
            area.x + area.width / 2,
            area.y + area.height.saturating_sub(1) / 2,
        ))
    }

    /// Reports the value and re-targets focus at the leftmost gap. With no gap
    /// the target is `len()`, which is out of range, so focus stays put.
    fn commit(&mut self) {
        let value = self.cells.value();
        debug!(%value, active = ?self.active, "code changed");
        (self.on_change)(&value);
        let target = self
            .cells
            .find_first_empty_before(self.len())
            .unwrap_or(self.len());
        self.focus(target);
    }
}

impl StatefulWidgetRef for &CodeInput {
    type State = Box<dyn CellStyle + Send>;
    fn render_ref(&self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let style = state.as_ref();
        for (index, cell_area) in self.cell_areas(area, style).into_iter().enumerate() {
            style.render_cell(
                self.cells.get(index),
                self.active == Some(index),
                cell_area,
                buf,
            );
        }
    }
}
