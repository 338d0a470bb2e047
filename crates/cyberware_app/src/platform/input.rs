use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use cyberware_core::{AppViewModel, Msg, ResultsPanel, SubmissionKind};

#[derive(Debug, Clone, PartialEq)]
pub enum KeyAction {
    Dispatch(Msg),
    Quit,
    Ignore,
}

/// Maps a key press to a core message, given what is currently on screen.
pub fn map_key(view: &AppViewModel, key: KeyEvent) -> KeyAction {
    if key.kind != KeyEventKind::Press {
        return KeyAction::Ignore;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let active = view.active_tab.unwrap_or_else(|| view.mode.default_tab());
    let input = active_input(view, active);
    let resettable = matches!(
        view.results,
        ResultsPanel::Error { .. } | ResultsPanel::Verdict(_)
    );

    match key.code {
        KeyCode::Char('c') if ctrl => KeyAction::Quit,
        KeyCode::Char('s') if ctrl => KeyAction::Dispatch(submit_msg(active)),
        KeyCode::Enter if ctrl => KeyAction::Dispatch(submit_msg(active)),
        KeyCode::Esc if resettable => KeyAction::Dispatch(Msg::ResetClicked),
        KeyCode::Tab | KeyCode::BackTab => KeyAction::Dispatch(Msg::ModeToggled),
        KeyCode::Left | KeyCode::Right => match sibling_tab(view, active) {
            Some(tab) => KeyAction::Dispatch(Msg::TabSelected(tab)),
            None => KeyAction::Ignore,
        },
        KeyCode::Enter => match active {
            SubmissionKind::Text => {
                KeyAction::Dispatch(edit_msg(active, format!("{input}\n")))
            }
            _ => KeyAction::Dispatch(submit_msg(active)),
        },
        KeyCode::Backspace => {
            let mut value = input.to_string();
            if value.pop().is_some() {
                KeyAction::Dispatch(edit_msg(active, value))
            } else {
                KeyAction::Ignore
            }
        }
        KeyCode::Char(c) if !ctrl => {
            if input.is_empty() {
                match c {
                    'q' => return KeyAction::Quit,
                    'm' => return KeyAction::Dispatch(Msg::ModeToggled),
                    'r' if resettable => return KeyAction::Dispatch(Msg::ResetClicked),
                    _ => {}
                }
            }
            let mut value = input.to_string();
            value.push(c);
            KeyAction::Dispatch(edit_msg(active, value))
        }
        _ => KeyAction::Ignore,
    }
}

fn active_input(view: &AppViewModel, kind: SubmissionKind) -> &str {
    match kind {
        SubmissionKind::Image | SubmissionKind::Video => &view.file_input,
        SubmissionKind::Url => &view.url_input,
        SubmissionKind::Text => &view.text_input,
    }
}

fn edit_msg(kind: SubmissionKind, value: String) -> Msg {
    match kind {
        SubmissionKind::Image | SubmissionKind::Video => Msg::FileInputChanged(value),
        SubmissionKind::Url => Msg::UrlInputChanged(value),
        SubmissionKind::Text => Msg::TextInputChanged(value),
    }
}

fn submit_msg(kind: SubmissionKind) -> Msg {
    match kind {
        SubmissionKind::Image | SubmissionKind::Video => Msg::FileChosen,
        SubmissionKind::Url => Msg::UrlSubmitted,
        SubmissionKind::Text => Msg::TextSubmitted,
    }
}

// Two tabs per mode, so left and right both land on the other one.
fn sibling_tab(view: &AppViewModel, active: SubmissionKind) -> Option<SubmissionKind> {
    view.tabs
        .iter()
        .map(|tab| tab.kind)
        .find(|kind| *kind != active)
}
