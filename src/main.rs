mod app;
mod cli;
mod infra;
mod state;
mod ui;

use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

use crossterm::{
    ExecutableCommand,
    event::{DisableBracketedPaste, EnableBracketedPaste},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tracing::{error, info};
use turbine_core::Config;
use turbine_core::presentation::ThemeMode;

use app::App;
use cli::Command;
use infra::constants::{CONFIG_ENV, STATE_DIR};
use state::State;

fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match cli::parse_args(&args) {
        Ok(command) => command,
        Err(msg) => {
            eprintln!("{}\n\n{}", msg, cli::USAGE);
            std::process::exit(2);
        }
    };

    if let Err(e) = infra::logging::init(Path::new(STATE_DIR)) {
        eprintln!("warning: logging disabled: {}", e);
    }

    match command {
        Command::Help => {
            println!("{}", cli::USAGE);
            Ok(())
        }
        Command::Query { config, edits, json } => {
            let config = load_config(config);
            let service = build_service_or_exit(&config);
            let report = cli::run_query(&config, &edits, service);
            if json {
                println!("{}", serde_json::to_string_pretty(&report).map_err(io::Error::other)?);
            } else if let Some(reason) = &report.reason {
                eprintln!("{}: {}", report.outcome, reason);
                println!("{}", report.display);
            } else {
                println!("{}", report.display);
            }
            std::process::exit(report.exit_code());
        }
        Command::Tui { config, theme } => {
            let config = load_config(config);
            run_tui(config, theme)
        }
    }
}

/// Flag beats environment; no file means embedded defaults.
fn load_config(flag: Option<PathBuf>) -> Config {
    let path = flag.or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
    match Config::load(path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!(%e, "config rejected");
            eprintln!("{}", e);
            std::process::exit(2);
        }
    }
}

fn build_service_or_exit(config: &Config) -> std::sync::Arc<dyn turbine_core::RandomnessService> {
    match infra::build_service(&config.service) {
        Ok(service) => service,
        Err(e) => {
            error!(%e, "service setup failed");
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

fn run_tui(config: Config, theme: Option<ThemeMode>) -> io::Result<()> {
    let service = build_service_or_exit(&config);

    // Panic hook: restore terminal state and log the panic to disk.
    // Without this, a panic leaves the terminal in raw mode + alternate screen.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = io::stdout().execute(DisableBracketedPaste);
        let _ = io::stdout().execute(LeaveAlternateScreen);

        let backtrace = std::backtrace::Backtrace::force_capture();
        infra::logging::write_panic_report(Path::new(STATE_DIR), &format!("{}\n\n{}", info, backtrace));

        default_hook(info);
    }));

    let mut state = State::new(config);
    if let Some(theme) = theme {
        state.theme_mode = theme;
    }

    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    io::stdout().execute(EnableBracketedPaste)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    info!("form started");
    let (tx, rx) = mpsc::channel();
    let mut app = App::new(state, service);
    let result = app.run(&mut terminal, tx, rx);

    // Cleanup
    disable_raw_mode()?;
    io::stdout().execute(DisableBracketedPaste)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    result
}
