use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen areas, computed once per frame.
pub struct AppLayout {
    pub hero: Rect,
    pub mode_toggle: Rect,
    pub scanner: Rect,
    pub results: Rect,
    pub footer: Rect,
}

/// Hero on top, mode toggle under it, then scanner and results side by side.
/// The results column only exists while there is something to show.
pub fn create_layout(area: Rect, show_results: bool) -> AppLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Length(1),
            Constraint::Min(8),
            Constraint::Length(2),
        ])
        .split(area);

    let (scanner, results) = if show_results {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[2]);
        (columns[0], columns[1])
    } else {
        (rows[2], Rect::default())
    };

    AppLayout {
        hero: rows[0],
        mode_toggle: rows[1],
        scanner,
        results,
        footer: rows[3],
    }
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use super::create_layout;

    #[test]
    fn results_column_only_when_shown() {
        let area = Rect::new(0, 0, 100, 40);

        let hidden = create_layout(area, false);
        assert_eq!(hidden.scanner.width, 100);
        assert_eq!(hidden.results, Rect::default());

        let shown = create_layout(area, true);
        assert_eq!(shown.scanner.width + shown.results.width, 100);
        assert_eq!(shown.hero.height, 6);
        assert_eq!(shown.footer.y, 38);
    }
}
