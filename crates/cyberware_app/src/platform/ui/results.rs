use cyberware_core::{
    AppViewModel, DetailsView, ResultsPanel, VerdictView, CAUTION_NOTE, LEGITIMATE_NOTE,
    NO_INCONSISTENCIES, NO_SUSPICIOUS_ELEMENTS,
};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Wrap};

pub fn render_results(frame: &mut Frame, view: &AppViewModel, area: Rect) {
    match &view.results {
        ResultsPanel::Hidden => {}
        ResultsPanel::Loading => render_notice(
            frame,
            area,
            "Analyzing Content",
            "This might take a few moments...",
        ),
        ResultsPanel::Polling { progress } => render_polling(frame, area, *progress),
        ResultsPanel::Error { message } => render_error(frame, area, message),
        ResultsPanel::Verdict(verdict) => render_verdict(frame, area, verdict),
    }
}

fn panel(title: &str, color: Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} ").bold())
        .border_style(Style::new().fg(color))
}

fn render_notice(frame: &mut Frame, area: Rect, title: &str, body: &str) {
    let text = vec![Line::default(), Line::from(body.to_string()).fg(Color::Gray)];
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(panel(title, Color::Blue)),
        area,
    );
}

fn render_polling(frame: &mut Frame, area: Rect, progress: u8) {
    let container = panel("Processing Analysis", Color::Blue);
    let inner = container.inner(area);
    frame.render_widget(container, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new("We're analyzing your content...").alignment(Alignment::Center),
        rows[0],
    );
    let gauge = Gauge::default()
        .percent(u16::from(progress.min(100)))
        .label("")
        .gauge_style(Style::new().fg(Color::Blue).bg(Color::DarkGray));
    frame.render_widget(gauge, rows[1]);
    frame.render_widget(
        Paragraph::new(format!("{progress}% complete"))
            .alignment(Alignment::Right)
            .fg(Color::Gray),
        rows[2],
    );
}

fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    let text = vec![
        Line::default(),
        Line::from(message.to_string()),
        Line::default(),
        reset_hint("Try Again"),
    ];
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(panel("Analysis Failed", Color::Red)),
        area,
    );
}

fn render_verdict(frame: &mut Frame, area: Rect, verdict: &VerdictView) {
    let (color, icon) = if verdict.suspicious {
        (Color::Red, "✗")
    } else {
        (Color::Green, "✓")
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("{icon} "), Style::new().fg(color).bold()),
            Span::styled(verdict.headline, Style::new().fg(color).bold()),
        ]),
        Line::from(format!("Confidence: {}", verdict.confidence)),
        Line::default(),
        Line::from("Analysis Details".bold()),
    ];
    lines.extend(detail_lines(&verdict.details));
    lines.push(Line::default());
    lines.push(reset_hint("Start New Analysis"));

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(panel("Result", color)),
        area,
    );
}

fn detail_lines(details: &DetailsView) -> Vec<Line<'static>> {
    match details {
        DetailsView::Manipulation {
            score,
            inconsistencies,
        } => scored_list(
            "Manipulation Score",
            score,
            "Detected Inconsistencies",
            inconsistencies,
            NO_INCONSISTENCIES,
        ),
        DetailsView::Risk {
            score,
            suspicious_elements,
        } => scored_list(
            "Risk Score",
            score,
            "Suspicious Elements",
            suspicious_elements,
            NO_SUSPICIOUS_ELEMENTS,
        ),
        DetailsView::Legitimate => vec![
            Line::from(LEGITIMATE_NOTE),
            Line::from(CAUTION_NOTE).fg(Color::Gray),
        ],
    }
}

fn scored_list(
    score_label: &str,
    score: &str,
    list_label: &str,
    items: &[String],
    empty: &'static str,
) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("{score_label}: "), Style::new().fg(Color::Gray)),
            Span::styled(score.to_string(), Style::new().bold()),
        ]),
        Line::from(Span::styled(
            list_label.to_string(),
            Style::new().fg(Color::Gray),
        )),
    ];
    if items.is_empty() {
        lines.push(Line::from(empty));
    } else {
        lines.extend(items.iter().map(|item| Line::from(format!("  • {item}"))));
    }
    lines
}

fn reset_hint(label: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled("[R]", Style::new().fg(Color::Yellow).bold()),
        Span::raw(format!(" {label}")),
    ])
}
