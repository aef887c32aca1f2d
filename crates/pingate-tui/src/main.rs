//! Pingate TUI - terminal keypad for setting, checking and resetting a
//! 4-digit PIN.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use pingate_core::{
    events, BiometricOutcome, BiometricScanner, CredentialStore, FileCredentialStore,
    FileKeyValueStore, KeyValueStore, MemoryCredentialStore, MemoryKeyValueStore, NoBiometrics,
    PinController, PinMode, PingateConfig, ScriptedBiometrics,
};
use pingate_tui::{App, SessionOutcome};
use ratatui::prelude::*;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log file written inside the data directory
const LOG_FILE_NAME: &str = "pingate.log";

#[derive(Parser, Debug)]
#[command(name = "pingate-tui", version, about = "Terminal keypad for a 4-digit PIN gate")]
struct Args {
    /// Keypad mode; defaults to `set` when no PIN is stored, else `authenticate`
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Directory holding credentials, the retry counter and the log
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Keep everything in memory for this run
    #[arg(long)]
    ephemeral: bool,

    /// Simulated biometric sensor result
    #[arg(long, value_enum)]
    biometric: Option<BiometricArg>,

    /// Failed attempts before the lockout prompt
    #[arg(long)]
    max_tries: Option<u32>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Set,
    Authenticate,
    Reset,
}

impl From<ModeArg> for PinMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Set => PinMode::Set,
            ModeArg::Authenticate => PinMode::Authenticate,
            ModeArg::Reset => PinMode::Reset,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BiometricArg {
    Success,
    Failure,
    Unavailable,
}

impl From<BiometricArg> for BiometricOutcome {
    fn from(arg: BiometricArg) -> Self {
        match arg {
            BiometricArg::Success => BiometricOutcome::Success,
            BiometricArg::Failure => BiometricOutcome::Failure,
            BiometricArg::Unavailable => BiometricOutcome::Unavailable,
        }
    }
}

/// Collaborators shared by every session in this process
struct Backends {
    credentials: Arc<dyn CredentialStore>,
    key_values: Arc<dyn KeyValueStore>,
    biometrics: Arc<dyn BiometricScanner>,
}

impl Backends {
    fn new(args: &Args, data_dir: &Path) -> Self {
        let (credentials, key_values): (Arc<dyn CredentialStore>, Arc<dyn KeyValueStore>) =
            if args.ephemeral {
                (
                    Arc::new(MemoryCredentialStore::new()),
                    Arc::new(MemoryKeyValueStore::new()),
                )
            } else {
                (
                    Arc::new(FileCredentialStore::new(data_dir)),
                    Arc::new(FileKeyValueStore::new(data_dir)),
                )
            };

        let biometrics: Arc<dyn BiometricScanner> = match args.biometric {
            Some(outcome) => Arc::new(ScriptedBiometrics::new(outcome.into())),
            None => Arc::new(NoBiometrics),
        };

        Self {
            credentials,
            key_values,
            biometrics,
        }
    }
}

/// Application entry point with panic handling for terminal restoration
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let mut config = PingateConfig::load();
    if let Some(dir) = &args.data_dir {
        config.data_dir = Some(dir.clone());
    }
    if let Some(max_tries) = args.max_tries {
        config.max_tries = max_tries;
    }
    let data_dir = config.data_dir();
    fs::create_dir_all(&data_dir)?;

    init_logging(&data_dir)?;

    // Restore the terminal before the default hook prints the panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableFocusChange
        );
        original_hook(panic_info);
    }));

    let backends = Backends::new(&args, &data_dir);
    let result = run_app(&args, &config, &backends).await;

    match result {
        Ok(outcome) => {
            println!("{}", describe(outcome));
            Ok(if outcome.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Err(e) => {
            tracing::error!("Application error: {}", e);
            Err(e)
        }
    }
}

/// Send logs to a file so they don't draw over the alternate screen
fn init_logging(data_dir: &Path) -> Result<()> {
    let log_file: File = OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join(LOG_FILE_NAME))?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(log_file)),
        )
        .with(EnvFilter::from_default_env().add_directive("pingate=info".parse()?))
        .init();

    Ok(())
}

/// Terminal setup, the session loop, then terminal teardown
async fn run_app(args: &Args, config: &PingateConfig, backends: &Backends) -> Result<SessionOutcome> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_sessions(&mut terminal, args.mode.map(PinMode::from), config, backends).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    result
}

/// Run keypad sessions until one ends without asking for a restart
async fn run_sessions<B: Backend>(
    terminal: &mut Terminal<B>,
    mut requested_mode: Option<PinMode>,
    config: &PingateConfig,
    backends: &Backends,
) -> Result<SessionOutcome> {
    loop {
        let mode = match requested_mode.take() {
            Some(mode) => mode,
            None if backends.credentials.pin().await?.is_some() => PinMode::Authenticate,
            None => PinMode::Set,
        };
        info!(?mode, "Starting keypad session");

        let (tx, rx) = events::channel();
        let controller = PinController::new(
            mode,
            backends.credentials.clone(),
            backends.key_values.clone(),
            backends.biometrics.clone(),
            tx,
        )
        .with_config(config);

        let mut app = App::new(controller, rx);
        app.start().await;
        let outcome = app.run(terminal).await?;

        if outcome != SessionOutcome::RestartRequired {
            return Ok(outcome);
        }
        info!("Credentials wiped, restarting");
    }
}

fn describe(outcome: SessionOutcome) -> &'static str {
    match outcome {
        SessionOutcome::Authenticated => "PIN accepted",
        SessionOutcome::Configured => "PIN saved",
        SessionOutcome::Cancelled => "Cancelled",
        SessionOutcome::RestartRequired => "Restart required",
    }
}
