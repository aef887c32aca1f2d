//! Layout helpers

use ratatui::layout::Rect;

/// A `width` x `height` rect centered in `area`, shrunk to fit if needed
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Top-right corner slot for a toast `width` wide, one row below the top edge
pub fn top_right(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + area.width.saturating_sub(width + 2),
        y: area.y + area.height.saturating_sub(height).min(1),
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_fits_inside() {
        let area = Rect::new(0, 0, 80, 24);
        let rect = centered_rect_fixed(40, 10, area);
        assert_eq!(rect, Rect::new(20, 7, 40, 10));
    }

    #[test]
    fn test_centered_clips_to_small_area() {
        let area = Rect::new(5, 5, 20, 8);
        let rect = centered_rect_fixed(40, 26, area);
        assert_eq!(rect, Rect::new(5, 5, 20, 8));
    }

    #[test]
    fn test_top_right() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(top_right(20, 3, area), Rect::new(58, 1, 20, 3));
    }
}
