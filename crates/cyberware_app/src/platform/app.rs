use std::collections::VecDeque;
use std::io::{stdout, Stdout};
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use cyberware_core::{update, AppState, Msg};
use cyberware_logging::{parse_level, scan_debug, scan_info, scan_warn};
use ratatui::prelude::*;

use super::config::{self, AppConfig};
use super::effects::EffectRunner;
use super::input::{map_key, KeyAction};
use super::{logging, ui};

type Term = Terminal<CrosstermBackend<Stdout>>;

pub fn run_app() -> anyhow::Result<()> {
    let config_path = config::config_path();
    let loaded = config::load_from(&config_path);
    let config = match &loaded {
        Ok(Some(config)) => config.clone(),
        _ => AppConfig::default(),
    };

    logging::initialize(parse_level(&config.log_level));
    match loaded {
        Ok(Some(_)) => scan_info!("Loaded config from {:?}", config_path),
        Ok(None) => scan_info!("No config at {:?}; using defaults", config_path),
        Err(err) => scan_warn!("{}; using defaults", err),
    }

    let runner = EffectRunner::new(&config).context("failed to start analysis backend")?;

    let mut terminal = enter_terminal().context("failed to prepare terminal")?;
    let result = event_loop(&mut terminal, &runner, config.tick_interval());
    leave_terminal(&mut terminal).context("failed to restore terminal")?;
    scan_info!("CyberWare exited");
    result
}

fn enter_terminal() -> std::io::Result<Term> {
    stdout().execute(EnterAlternateScreen)?;
    enable_raw_mode()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;
    Ok(terminal)
}

fn leave_terminal(terminal: &mut Term) -> std::io::Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()
}

fn event_loop(terminal: &mut Term, runner: &EffectRunner, tick: Duration) -> anyhow::Result<()> {
    let mut state = AppState::new();
    let mut last_tick = Instant::now();
    terminal.draw(|frame| ui::render(frame, &state.view()))?;

    loop {
        let mut inbox = VecDeque::new();
        let mut redraw = false;

        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match map_key(&state.view(), key) {
                    KeyAction::Quit => return Ok(()),
                    KeyAction::Dispatch(msg) => inbox.push_back(msg),
                    KeyAction::Ignore => {}
                },
                Event::Resize(..) => redraw = true,
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick {
            inbox.push_back(Msg::Tick);
            last_tick = Instant::now();
        }
        inbox.extend(runner.drain());

        while let Some(msg) = inbox.pop_front() {
            if msg != Msg::Tick {
                scan_debug!("Dispatch {:?}", msg);
            }
            let (next, effects) = update(state, msg);
            state = next;
            inbox.extend(runner.enqueue(effects));
        }

        if state.consume_dirty() || redraw {
            terminal.draw(|frame| ui::render(frame, &state.view()))?;
        }
    }
}
