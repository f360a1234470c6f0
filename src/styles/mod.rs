use once_cell::sync::Lazy;
use ratatui::buffer::Buffer;
use ratatui::layout::{Rect, Size};
use std::collections::BTreeMap;
use std::sync::Mutex;

pub mod boxed;
pub mod underlined;

#[macro_export]
macro_rules! register_cell_style {
    ($type:ty, $name:expr) => {
        #[ctor::ctor] // runs at program startup
        fn register() {
            crate::styles::register_cell_style($name, || Box::new(<$type>::default()));
        }
    };
}

/// Draws a single digit cell of a [`crate::code_input::CodeInput`].
pub trait CellStyle {
    /// Width and height of one cell.
    fn cell_size(&self) -> Size;
    fn render_cell(&self, digit: Option<u8>, active: bool, area: Rect, buf: &mut Buffer);
    fn name(&self) -> &'static str;
}

pub type CellStyleFactory = fn() -> Box<dyn CellStyle + Send>;

// Ordered so the style picker lists entries in a stable order.
pub static CELL_STYLE_REGISTRY: Lazy<Mutex<BTreeMap<&'static str, CellStyleFactory>>> =
    Lazy::new(|| Mutex::new(BTreeMap::new()));

pub fn register_cell_style(name: &'static str, factory: CellStyleFactory) {
    CELL_STYLE_REGISTRY
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .insert(name, factory);
}

fn registry() -> std::sync::MutexGuard<'static, BTreeMap<&'static str, CellStyleFactory>> {
    CELL_STYLE_REGISTRY
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn cell_style_names() -> Vec<&'static str> {
    registry().keys().copied().collect()
}

pub fn get_cell_style_by_name(name: &str) -> Option<Box<dyn CellStyle + Send>> {
    registry().get(name).map(|f| f())
}

pub fn get_cell_style_by_index(idx: usize) -> Option<Box<dyn CellStyle + Send>> {
    registry().values().nth(idx).map(|f| f())
}

pub fn cell_style_index(name: &str) -> Option<usize> {
    registry().keys().position(|n| *n == name)
}

/// Digit shown inside a cell, blank when empty.
pub(crate) fn digit_symbol(digit: Option<u8>) -> String {
    digit.map_or_else(String::new, |d| d.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_styles_are_registered() {
        assert_eq!(cell_style_names(), vec!["Boxed", "Underlined"]);
        assert_eq!(cell_style_index("Underlined"), Some(1));
        assert_eq!(get_cell_style_by_index(0).map(|s| s.name()), Some("Boxed"));
        assert!(get_cell_style_by_name("Fancy").is_none());
    }

    #[test]
    fn digit_symbol_renders_zero() {
        assert_eq!(digit_symbol(Some(0)), "0");
        assert_eq!(digit_symbol(None), "");
    }
}
