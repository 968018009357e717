pub mod form;
pub mod render;
pub mod state;

use crate::fields::FieldKey;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use form::{build_form_tabs, FormAction, FormTab, FormViewState};
use ratatui::prelude::*;
use state::AppState;
use std::io::stdout;
use std::time::Duration;
use tokio::sync::{mpsc, watch};

/// Commands the TUI sends to the engine loop.
#[derive(Debug, Clone, PartialEq)]
pub enum TuiCommand {
    Quit,
    SetField { key: FieldKey, value: String },
    CycleField(FieldKey),
    Export,
    Reset,
}

impl From<FormAction> for TuiCommand {
    fn from(action: FormAction) -> Self {
        match action {
            FormAction::Set { key, value } => TuiCommand::SetField { key, value },
            FormAction::Cycle(key) => TuiCommand::CycleField(key),
        }
    }
}

/// Run the TUI. Reads state from `state_rx`, sends commands on `cmd_tx`.
pub async fn run_tui(
    state_rx: watch::Receiver<AppState>,
    cmd_tx: mpsc::Sender<TuiCommand>,
) -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = tui_loop(&mut terminal, state_rx, cmd_tx).await;

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

async fn tui_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    mut state_rx: watch::Receiver<AppState>,
    cmd_tx: mpsc::Sender<TuiCommand>,
) -> Result<()> {
    let mut view = FormViewState::default();

    loop {
        let state = state_rx.borrow_and_update().clone();
        let tabs = build_form_tabs(&state.inputs, state.results.entry_investment);
        terminal.draw(|f| render::draw(f, &state, &tabs, &view))?;

        // Poll for keyboard events with 100ms timeout
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if let Some(cmd) = handle_key(&mut view, &tabs, key) {
            let quit = cmd == TuiCommand::Quit;
            if cmd_tx.send(cmd).await.is_err() || quit {
                return Ok(());
            }
            // Give the engine loop a moment to publish the recomputed state
            // so the next frame already shows it.
            let _ = tokio::time::timeout(Duration::from_millis(50), state_rx.changed()).await;
        }
    }
}

/// Map a key press onto view changes and, when needed, an engine command.
pub fn handle_key(view: &mut FormViewState, tabs: &[FormTab], key: KeyEvent) -> Option<TuiCommand> {
    if view.editing {
        match key.code {
            KeyCode::Enter => return view.activate(tabs).map(TuiCommand::from),
            KeyCode::Esc => view.cancel_edit(),
            KeyCode::Backspace => view.backspace(),
            KeyCode::Char(c) => view.type_char(c),
            _ => {}
        }
        return None;
    }

    let field_count = tabs.get(view.active_tab).map_or(0, |t| t.fields.len());
    match key.code {
        KeyCode::Char('q') => Some(TuiCommand::Quit),
        KeyCode::Char('x') => Some(TuiCommand::Export),
        KeyCode::Char('r') => Some(TuiCommand::Reset),
        KeyCode::Left => {
            view.prev_tab(tabs.len());
            None
        }
        KeyCode::Right | KeyCode::Tab => {
            view.next_tab(tabs.len());
            None
        }
        KeyCode::Up => {
            view.prev_field();
            None
        }
        KeyCode::Down => {
            view.next_field(field_count);
            None
        }
        KeyCode::Enter => view.activate(tabs).map(TuiCommand::from),
        KeyCode::Char(' ') => {
            let key = tabs
                .get(view.active_tab)
                .and_then(|t| t.fields.get(view.selected_field))
                .and_then(|f| f.key)?;
            matches!(key.kind(), crate::fields::FieldKind::Choice(_))
                .then_some(TuiCommand::CycleField(key))
        }
        _ => None,
    }
}
