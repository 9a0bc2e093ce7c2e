use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    cursor::{SetCursorStyle, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use pacer::{
    app::{App, Flow, Settings},
    app_dirs::AppDirs,
    config::{CaretStyle, Config, ConfigStore, FileConfigStore},
    logging,
    passage::Passage,
    runtime::{CrosstermEventSource, PacerEventSource, Runner},
    ui,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    panic,
    path::PathBuf,
    sync::Once,
};
use tracing::info;

/// minimal typing-speed test for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type the passage as fast and as accurately as you can. Words per minute and accuracy are shown when you reach the end. Escape restarts, ctrl+c quits."
)]
pub struct Cli {
    /// caret shape drawn before the next character
    #[clap(long, value_enum)]
    caret: Option<CaretStyle>,

    /// leave mistyped spaces blank instead of marking them with `·`
    #[clap(long)]
    plain_spaces: bool,

    /// log filter for the log file (PACER_LOG takes precedence)
    #[clap(long)]
    log_level: Option<String>,

    /// config file to read instead of the default location
    #[clap(long)]
    config: Option<PathBuf>,

    /// write the effective settings back to the config file
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Command line flags win over the config file.
    fn apply(&self, mut cfg: Config) -> Config {
        if let Some(caret) = self.caret {
            cfg.caret_style = caret;
        }
        if self.plain_spaces {
            cfg.mark_incorrect_spaces = false;
        }
        if let Some(level) = &self.log_level {
            cfg.log_level = level.clone();
        }
        cfg
    }
}

fn cursor_style(style: CaretStyle) -> SetCursorStyle {
    match style {
        CaretStyle::Bar => SetCursorStyle::SteadyBar,
        CaretStyle::Block => SetCursorStyle::SteadyBlock,
        CaretStyle::Underline => SetCursorStyle::SteadyUnderScore,
    }
}

/// Puts the terminal back the way the shell expects it. Safe to call
/// more than once and when raw mode was never entered.
fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(
        io::stdout(),
        SetCursorStyle::DefaultUserShape,
        LeaveAlternateScreen,
        Show
    );
}

/// Raw mode and the alternate screen, undone on drop so every early
/// return after `enable_raw_mode` restores the terminal.
struct TerminalGuard;

impl TerminalGuard {
    fn enter(caret: CaretStyle) -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = TerminalGuard;
        execute!(io::stdout(), EnterAlternateScreen, cursor_style(caret))?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            restore_terminal();
            tracing::error!(%info, "panic");
            default_panic(info);
        }));
    });
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = cli
        .config
        .as_ref()
        .map(FileConfigStore::with_path)
        .unwrap_or_default();
    let config = cli.apply(store.load());

    if let Some(log_path) = AppDirs::log_path() {
        if let Err(err) = logging::init(&log_path, &config.log_level) {
            eprintln!("pacer: logging disabled: {err}");
        }
    }

    if cli.save_config {
        store.save(&config)?;
        info!(path = %store.path().display(), "config saved");
    }

    install_panic_hook();
    let guard = TerminalGuard::enter(config.caret_style)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let mut app = App::with_system_clock(Passage::default(), Settings::from(&config));
    // one reader for the whole run; restarts reuse it
    let runner = Runner::new(CrosstermEventSource::new());
    let result = start_tui(&mut terminal, &mut app, &runner);

    drop(guard);
    result?;

    if let Some(results) = app.last_results() {
        println!("{} wpm   {}% acc", results.wpm, results.accuracy);
    }

    Ok(())
}

fn start_tui<B: Backend, E: PacerEventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| ui::draw(app, f))?;

    while let Some(event) = runner.step() {
        match app.on_event(&event) {
            Flow::Quit => break,
            Flow::Redraw => {
                terminal.draw(|f| ui::draw(app, f))?;
            }
        }
    }

    Ok(())
}
