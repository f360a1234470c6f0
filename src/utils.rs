use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// helper function to create a centered rect using up certain percentage of the available rect `r`
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [row] = r.layout(&vertical);
    let [area] = row.layout(&horizontal);
    area
}

/// Rect of `width` x `height` centered horizontally at the top of `r`, clipped to it.
pub(crate) fn top_centered(width: u16, height: u16, r: Rect) -> Rect {
    let horizontal = Layout::horizontal([Constraint::Length(width)]).flex(Flex::Center);
    let [column] = r.layout(&horizontal);
    Rect {
        height: height.min(column.height),
        ..column
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_centered() {
        let area = centered_rect(50, 50, Rect::new(0, 0, 100, 40));
        assert_eq!(area, Rect::new(25, 10, 50, 20));
    }

    #[test]
    fn top_centered_clips_to_parent() {
        assert_eq!(top_centered(10, 3, Rect::new(0, 0, 30, 10)), Rect::new(10, 0, 10, 3));
        assert_eq!(top_centered(10, 3, Rect::new(0, 0, 30, 2)).height, 2);
    }
}
