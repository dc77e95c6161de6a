use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};
use crossterm::event::{self, Event as CEvent};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use tracing::{error, info, warn};

use profiletui::config::Config;
use profiletui::render::{MemoryView, text};
use profiletui::tui::{App, KeyBindings};
use profiletui::{ReportController, ReportModel};

/// Browse a data-quality profile report in the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Profile report JSON file
    #[arg(value_name = "REPORT")]
    report: PathBuf,
    /// Enable file logging at the given level (overrides RUST_LOG)
    #[arg(long = "logging", value_enum)]
    logging: Option<LogLevel>,
    /// Path to a config file (overrides default config discovery)
    #[arg(long = "config", value_name = "PATH")]
    config: Option<PathBuf>,
    /// Print the report as plain text instead of starting the TUI
    #[arg(long = "print")]
    print: bool,
    /// Column to select when printing
    #[arg(long = "column", value_name = "N", requires = "print")]
    column: Option<usize>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let config = Config::from_path(args.config.as_ref())
        .map_err(|e| eyre!("failed to load configuration: {e}"))?;
    let log_path = profiletui::logging::log_path(Some(&config.log_dir()))?;
    profiletui::logging::init_with(Some(log_path), args.logging.map(Into::into))?;
    info!(report = %args.report.display(), theme = %config.theme, "starting");

    let model = ReportModel::from_path(&args.report)
        .wrap_err_with(|| format!("could not open {}", args.report.display()))?;

    if args.print {
        let mut controller = ReportController::mount_with(model, MemoryView::new(), config.formatter());
        if let Some(column) = args.column {
            if controller.activate(column).is_none() {
                return Err(eyre!(
                    "column {column} is out of range (report has {} columns)",
                    controller.model().column_count()
                ));
            }
        }
        print!("{}", text::render(controller.view()));
        return Ok(());
    }

    let keybindings = match &config.keybindings {
        Some(path) => KeyBindings::load_from_file(path)
            .wrap_err_with(|| format!("could not load keybindings from {}", path.display()))?,
        None => KeyBindings::default(),
    };
    for warning in keybindings.validate() {
        warn!("keybindings: {warning}");
    }

    let mut app = App::new(model, config.formatter()).with_source(args.report.clone());
    app.set_theme(config.theme());
    app.set_keybindings(keybindings);

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    if let Err(e) = res {
        error!("Error: {e}");
        return Err(eyre!("{e:#}"));
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;

        if event::poll(Duration::from_millis(100))? {
            if let CEvent::Key(key_event) = event::read()? {
                app.handle_key_event(key_event)
                    .map_err(|e| anyhow::anyhow!("{e}"))?;
            }
        }
        if app.should_quit() {
            return Ok(());
        }
    }
}
