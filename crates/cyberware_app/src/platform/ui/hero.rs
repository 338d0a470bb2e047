use cyberware_core::AppViewModel;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

const SUB_HEADLINE: &str =
    "Detect fake images, videos, texts, and links with real-time AI verification.";
const BADGES: [&str; 3] = ["Image & text Detection", "Instant Analysis", "Privacy Protected"];

pub fn render_hero(frame: &mut Frame, view: &AppViewModel, area: Rect) {
    let lines = hero_lines();
    let visible = visible_lines(lines.len(), view.hero_reveal);
    let hero = Paragraph::new(lines.into_iter().take(visible).collect::<Vec<_>>())
        .alignment(Alignment::Center);
    frame.render_widget(hero, area);
}

fn hero_lines() -> Vec<Line<'static>> {
    let highlight = Style::new().fg(Color::Cyan).bold();
    let badge = Style::new().fg(Color::Gray);
    let mut badges = Vec::new();
    for (index, label) in BADGES.iter().enumerate() {
        if index > 0 {
            badges.push(Span::raw("   "));
        }
        badges.push(Span::styled(format!("[ {label} ]"), badge));
    }

    vec![
        Line::from(vec![
            Span::raw("Detect ").bold(),
            Span::styled("Deepfakes", highlight),
            Span::raw(" & ").bold(),
            Span::styled("Phishing", highlight),
        ]),
        Line::from(vec![
            Span::styled("Ultimate", Style::new().fg(Color::Red).bold().italic()),
            Span::raw(" Scam Detection").bold(),
        ]),
        Line::default(),
        Line::from(SUB_HEADLINE).fg(Color::Gray),
        Line::default(),
        Line::from(badges),
    ]
}

fn visible_lines(total: usize, reveal_percent: u8) -> usize {
    (total * usize::from(reveal_percent.min(100))).div_ceil(100)
}

#[cfg(test)]
mod tests {
    use super::visible_lines;

    #[test]
    fn reveal_grows_with_percentage() {
        assert_eq!(visible_lines(6, 0), 0);
        assert_eq!(visible_lines(6, 8), 1);
        assert_eq!(visible_lines(6, 50), 3);
        assert_eq!(visible_lines(6, 100), 6);
        assert_eq!(visible_lines(6, 250), 6);
    }
}
