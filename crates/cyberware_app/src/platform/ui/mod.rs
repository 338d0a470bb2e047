use cyberware_core::{AppViewModel, ResultsPanel};
use ratatui::prelude::*;

mod footer;
mod hero;
mod layout;
mod results;
mod scanner;

pub fn render(frame: &mut Frame, view: &AppViewModel) {
    let show_results = view.results != ResultsPanel::Hidden;
    let layout = layout::create_layout(frame.area(), show_results);

    hero::render_hero(frame, view, layout.hero);
    scanner::render_mode_toggle(frame, view, layout.mode_toggle);
    scanner::render_scanner(frame, view, layout.scanner);
    if show_results {
        results::render_results(frame, view, layout.results);
    }
    footer::render_footer(frame, view, layout.footer);
}
