pub mod card;
pub mod charts;
pub mod modal;
pub mod money;
pub mod tabs;
pub mod toast;

use ratatui::layout::Rect;

/// A `width` x `height` box centered in `area`, shrunk to fit.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_fits_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(40, 10, area);
        assert_eq!((rect.width, rect.height), (40, 10));
        assert_eq!((rect.x, rect.y), (30, 15));

        let small = centered_rect(200, 80, Rect::new(0, 0, 20, 5));
        assert_eq!((small.width, small.height), (20, 5));
    }
}
