use cyberware_core::{AppViewModel, ResultsPanel};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Key hints for the current screen plus the credits line.
pub fn render_footer(frame: &mut Frame, view: &AppViewModel, area: Rect) {
    let key = Style::new().bold().fg(Color::Yellow);
    let mut hints = vec![
        Span::styled("Tab", key),
        Span::raw(" mode  "),
        Span::styled("←/→", key),
        Span::raw(" tab  "),
    ];
    if matches!(
        view.results,
        ResultsPanel::Error { .. } | ResultsPanel::Verdict(_)
    ) {
        hints.push(Span::styled("Esc", key));
        hints.push(Span::raw(" reset  "));
    }
    hints.push(Span::styled("Ctrl+C", key));
    hints.push(Span::raw(" quit"));

    let text = vec![
        Line::from(hints),
        Line::from("Built with ❤️ by TEAM VIBRANT").fg(Color::DarkGray),
    ];
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}
