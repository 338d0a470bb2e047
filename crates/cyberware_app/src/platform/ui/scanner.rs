use cyberware_core::{AppViewModel, ScanMode, SubmissionKind};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Tabs, Wrap};

const URL_PLACEHOLDER: &str = "https://example.com";
const TEXT_PLACEHOLDER: &str = "Paste suspicious email content here...";
const FILE_PLACEHOLDER: &str = "Type a file path and press Enter";

pub fn render_mode_toggle(frame: &mut Frame, view: &AppViewModel, area: Rect) {
    let mut spans = Vec::new();
    for mode in [ScanMode::Deepfake, ScanMode::Phishing] {
        let style = if mode == view.mode {
            Style::new().bg(Color::Blue).fg(Color::White).bold()
        } else {
            Style::new().fg(Color::Gray)
        };
        spans.push(Span::styled(format!("  {}  ", mode.label()), style));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

pub fn render_scanner(frame: &mut Frame, view: &AppViewModel, area: Rect) {
    let container = Block::default()
        .borders(Borders::ALL)
        .title(" AI Content Scanner ".bold())
        .border_style(Style::new().fg(Color::Cyan));
    let inner = container.inner(area);
    frame.render_widget(container, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(view.mode.tagline()).style(Style::new().fg(Color::Gray)),
        chunks[0],
    );

    let labels: Vec<&str> = view.tabs.iter().map(|tab| tab.label).collect();
    let selected = view.tabs.iter().position(|tab| tab.active).unwrap_or(0);
    let tabs = Tabs::new(labels)
        .select(selected)
        .highlight_style(Style::new().fg(Color::Blue).bold().underlined())
        .divider("|");
    frame.render_widget(tabs, chunks[1]);

    let active = view.active_tab.unwrap_or_else(|| view.mode.default_tab());
    match active {
        SubmissionKind::Image | SubmissionKind::Video => {
            render_file_input(frame, view, active, chunks[3])
        }
        SubmissionKind::Url => render_line_input(
            frame,
            "Website URL",
            &view.url_input,
            URL_PLACEHOLDER,
            chunks[3],
        ),
        SubmissionKind::Text => render_text_input(frame, view, chunks[3]),
    }

    frame.render_widget(submit_line(view, active), chunks[4]);
}

fn render_file_input(frame: &mut Frame, view: &AppViewModel, kind: SubmissionKind, area: Rect) {
    let title = if kind == SubmissionKind::Image {
        "Upload image to analyze"
    } else {
        "Upload video to analyze"
    };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);
    render_line_input(frame, title, &view.file_input, FILE_PLACEHOLDER, rows[0]);
    if let Some(hint) = kind.upload_hint() {
        frame.render_widget(
            Paragraph::new(hint).style(Style::new().fg(Color::DarkGray)),
            rows[1],
        );
    }
}

fn render_line_input(frame: &mut Frame, title: &str, value: &str, placeholder: &str, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title.to_string());
    let paragraph = if value.is_empty() {
        Paragraph::new(placeholder.to_string()).style(Style::new().fg(Color::DarkGray))
    } else {
        Paragraph::new(value.to_string()).style(Style::new().fg(Color::Yellow))
    };
    frame.render_widget(paragraph.block(block), area);

    let width = u16::try_from(value.chars().count()).unwrap_or(u16::MAX);
    let x = area.x.saturating_add(1).saturating_add(width);
    if x < area.right().saturating_sub(1) {
        frame.set_cursor_position((x, area.y + 1));
    }
}

fn render_text_input(frame: &mut Frame, view: &AppViewModel, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Mail content");
    let paragraph = if view.text_input.is_empty() {
        Paragraph::new(TEXT_PLACEHOLDER).style(Style::new().fg(Color::DarkGray))
    } else {
        Paragraph::new(view.text_input.as_str()).style(Style::new().fg(Color::Yellow))
    };
    frame.render_widget(paragraph.wrap(Wrap { trim: false }).block(block), area);
}

fn submit_line(view: &AppViewModel, kind: SubmissionKind) -> Paragraph<'static> {
    let (label, key) = match kind {
        SubmissionKind::Image | SubmissionKind::Video if view.in_flight => ("Uploading...", ""),
        _ if view.in_flight => ("Analyzing...", ""),
        SubmissionKind::Image | SubmissionKind::Video => ("Analyze file", "Enter"),
        SubmissionKind::Url => ("Detect Phishing", "Enter"),
        SubmissionKind::Text => ("Detect Phishing", "Ctrl+S"),
    };
    let style = if view.can_submit {
        Style::new().bg(Color::Blue).fg(Color::White).bold()
    } else {
        Style::new().fg(Color::DarkGray)
    };
    let mut spans = vec![Span::styled(format!(" {label} "), style)];
    if !key.is_empty() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(key, Style::new().fg(Color::Yellow).bold()));
    }
    Paragraph::new(Line::from(spans)).alignment(Alignment::Right)
}
