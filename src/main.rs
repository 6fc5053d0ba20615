mod app;
mod cli;
mod domain;
mod infra;
mod ui;

use crate::app::{AppCommand, AppEvent, AppModel};
use crate::cli::CliInvocation;
use crate::domain::parse_report;
use crate::infra::{Displayplacer, init_logging, resolve_log_path};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::size as terminal_size;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::{ExecutableCommand, execute};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io::{self, IsTerminal, Stdout, Write};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
enum MainError {
    #[error(transparent)]
    App(#[from] crate::app::AppError),

    #[error(transparent)]
    Cli(#[from] crate::cli::CliRunError),

    #[error(transparent)]
    Logging(#[from] crate::infra::LoggingError),
}

fn main() {
    if let Err(error) = run_main() {
        let mut err = io::stderr().lock();
        let _ = writeln!(err, "{error}");
        std::process::exit(1);
    }
}

fn run_main() -> Result<(), MainError> {
    let args = std::env::args().collect::<Vec<_>>();
    let invocation = match crate::cli::parse_invocation(&args) {
        Ok(invocation) => invocation,
        Err(error) => {
            let mut err = io::stderr().lock();
            let _ = writeln!(err, "{error}");
            let _ = writeln!(err);
            print_help();
            std::process::exit(2);
        }
    };

    match invocation {
        CliInvocation::PrintHelp => {
            print_help();
            Ok(())
        }
        CliInvocation::PrintVersion => {
            let mut out = io::stdout().lock();
            let _ = writeln!(out, "{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        CliInvocation::Tui { debug } => {
            start_logging(debug)?;
            Ok(run_tui()?)
        }
        CliInvocation::Command { command, debug } => {
            start_logging(debug)?;
            crate::cli::run(command, &Displayplacer::resolve())?;
            Ok(())
        }
    }
}

fn start_logging(debug: bool) -> Result<(), crate::infra::LoggingError> {
    match resolve_log_path(debug) {
        Some(path) => init_logging(&path, debug),
        None => Ok(()),
    }
}

fn print_help() {
    let text = format!(
        "{name} - switch macOS display resolutions from the terminal (via displayplacer)\n\nUSAGE:\n  {name} [--debug]                Start the interactive switcher\n  {name} list [--json] [--debug]  Print displays and their modes\n  {name} --help | --version (-v)\n\nKEYS:\n  Left/Right   Select display\n  Up/Down      Select mode (wraps)\n  PgUp/PgDn    Jump through modes\n  Enter        Apply the highlighted mode\n  q/Esc        Quit\n\nOUTPUT:\n  list: persistent_id<TAB>short_name<TAB>current<TAB>mode_count\n        followed by <SPACE><SPACE>[ordinal]<TAB>label<TAB>color_depth[<TAB>current] per mode\n\nENV:\n  RESMODE_DISPLAYPLACER  Program to run instead of `displayplacer` on PATH\n  RESMODE_LOG            Write logs to this file (--debug defaults to the user cache dir)\n  RUST_LOG               Log filter (default: info, or debug with --debug)\n",
        name = env!("CARGO_PKG_NAME")
    );
    let mut out = io::stdout().lock();
    let _ = write!(out, "{text}");
}

fn run_tui() -> Result<(), crate::app::AppError> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        return Err(crate::app::AppError::NotInteractive);
    }

    let displayplacer = Displayplacer::resolve();
    let report = displayplacer.list()?;
    let displays = parse_report(&report)?;
    info!(
        program = %displayplacer.program_label(),
        displays = displays.len(),
        "loaded display report"
    );

    let mut model = AppModel::new(displays);
    let mut terminal = setup_terminal()?;
    if let Ok((width, height)) = terminal_size() {
        model = model.with_terminal_size(width, height);
    }
    let result = run(&mut terminal, model, &displayplacer);
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, crate::app::AppError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
) -> Result<(), crate::app::AppError> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    mut model: AppModel,
    displayplacer: &Displayplacer,
) -> Result<(), crate::app::AppError> {
    loop {
        terminal.draw(|frame| ui::render(frame, &model))?;
        model.tick_status();

        let app_event = match event::read()? {
            Event::Key(key) => {
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                AppEvent::Key(key)
            }
            Event::Resize(width, height) => AppEvent::Resize(width, height),
            _ => continue,
        };

        let (next, command) = app::update(model, app_event);
        model = next;
        match command {
            AppCommand::None => {}
            AppCommand::Quit => return Ok(()),
            AppCommand::Apply(plan) => {
                let result = displayplacer.apply(&plan.args());
                model = app::finish_apply(model, &plan, result);
            }
        }
    }
}
