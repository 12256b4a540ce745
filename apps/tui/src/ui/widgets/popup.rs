use ratatui::layout::Rect;

/// Rect centered inside `area`, sized as a percentage of it.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = area.width * percent_x.min(100) / 100;
    let height = area.height * percent_y.min(100) / 100;

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
    fn centered_rect_is_centered_and_sized() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(80, 80, area);
        assert_eq!(popup, Rect::new(10, 5, 80, 40));
    }

    #[test]
    fn oversized_percentages_are_capped() {
        let area = Rect::new(0, 0, 40, 20);
        let popup = centered_rect(150, 150, area);
        assert_eq!(popup, area);
    }
}
