//! Tamagotchi: headless terminal driver.
//!
//! Plays the role of the GUI: owns the ~1 s timer, forwards player input to
//! the core, shows the pet after every call, and saves on change.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  SystemClock   JsonSaveStore   JsonConfigFile   LogSink  │
//! │  (Clock)       (SaveSlotPort)  (ConfigPort)  (EventSink) │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ───────────────     │
//! │                                                          │
//! │   ┌──────────────────────────────────────────────────┐   │
//! │   │          PetService (pure logic) · Pet           │   │
//! │   └──────────────────────────────────────────────────┘   │
//! │                                                          │
//! │  stdin reader thread ──▶ channel ──▶ main loop + timer   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands, one per line: `feed`, `play`, `sleep`, `new <name>`,
//! `switch <name>`, `status`, `list`, `reload`, `quit`.
#![deny(unused_must_use)]

use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use tracing_subscriber::EnvFilter;

use tamagotchi::adapters::config_file::JsonConfigFile;
use tamagotchi::adapters::json_store::JsonSaveStore;
use tamagotchi::adapters::log_sink::LogEventSink;
use tamagotchi::adapters::time::SystemClock;
use tamagotchi::app::commands::{PetCommand, split_verb};
use tamagotchi::app::events::StatusReport;
use tamagotchi::app::service::PetService;
use tamagotchi::config::PetConfig;

/// Keep a virtual pet alive from the terminal.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Pet to load (or hatch if it has no save)
    #[arg(short, long, default_value = "Tama")]
    name: String,

    /// Directory holding one save file per pet
    #[arg(long, default_value = "saves")]
    save_dir: PathBuf,

    /// JSON file overriding the simulation rates (written with defaults
    /// if it does not exist)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Input forwarded from the stdin reader thread.
enum Input {
    Line(String),
    Closed,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    info!("Tamagotchi v{}", env!("CARGO_PKG_VERSION"));

    // ── 1. Config (file or defaults) ──────────────────────────
    let config = match &args.config {
        Some(path) => JsonConfigFile::new(path).load_or_init().unwrap_or_else(|e| {
            warn!("Config load failed ({}), using defaults", e);
            PetConfig::default()
        }),
        None => PetConfig::default(),
    };

    // ── 2. Adapters ───────────────────────────────────────────
    let store = JsonSaveStore::new(&args.save_dir);
    let clock = SystemClock::new();
    let mut sink = LogEventSink::new();

    // ── 3. Load or hatch ──────────────────────────────────────
    let mut app = PetService::load_or_create(&args.name, config, &store, &clock, &mut sink)
        .with_context(|| format!("cannot start with pet name {:?}", args.name))?;
    app.force_save_if_dirty(&store);
    show(&app.status());

    // ── 4. Main loop: timer ticks + player input ──────────────
    let input = spawn_stdin_reader();
    let mut next_tick = Instant::now() + tick_interval(&app);

    loop {
        let timeout = next_tick.saturating_duration_since(Instant::now());
        match input.recv_timeout(timeout) {
            Err(RecvTimeoutError::Timeout) => {
                app.tick(&clock, &mut sink);
                app.auto_save_if_needed(&store);
                next_tick += tick_interval(&app);
            }
            Ok(Input::Line(line)) => {
                let config_path = args.config.as_deref();
                if !handle_line(&line, &mut app, &store, &clock, &mut sink, config_path) {
                    break;
                }
            }
            Ok(Input::Closed) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    // ── 5. Shutdown ───────────────────────────────────────────
    app.force_save_if_dirty(&store);
    info!("Goodbye from {}", app.pet().name());
    Ok(())
}

/// Handle one input line. Returns `false` when the player quits.
fn handle_line(
    line: &str,
    app: &mut PetService,
    store: &JsonSaveStore,
    clock: &SystemClock,
    sink: &mut LogEventSink,
    config_path: Option<&Path>,
) -> bool {
    let (head, rest) = split_verb(line);
    match head.to_ascii_lowercase().as_str() {
        "" => {}
        "quit" | "exit" => return false,
        "status" => show(&app.status()),
        "list" => {
            let names = store.list();
            if names.is_empty() {
                println!("(no saved pets in {})", store.dir().display());
            } else {
                println!("{}", names.join(", "));
            }
        }
        "reload" => match config_path {
            Some(path) => match JsonConfigFile::new(path)
                .load_or_init()
                .and_then(|cfg| app.update_config(cfg))
            {
                Ok(()) => println!("Config reloaded from {}", path.display()),
                Err(e) => println!("Config not reloaded: {e}"),
            },
            None => println!("No --config file to reload"),
        },
        "switch" => match app.switch_pet(rest, store, clock, sink) {
            Ok(()) => {
                app.force_save_if_dirty(store);
                show(&app.status());
            }
            Err(e) => println!("{e}"),
        },
        _ => match line.parse::<PetCommand>() {
            Ok(cmd) => match app.handle_command(cmd, store, clock, sink) {
                Ok(outcome) => {
                    if let Some(reason) = outcome.reason() {
                        println!("Cannot do that: {reason}.");
                    }
                    app.force_save_if_dirty(store);
                    show(&app.status());
                }
                Err(e) => println!("{e}"),
            },
            Err(e) => println!(
                "{e}; try feed, play, sleep, new <name>, switch <name>, status, list, reload, quit"
            ),
        },
    }
    true
}

fn tick_interval(app: &PetService) -> Duration {
    Duration::from_millis(u64::from(app.config().tick_interval_ms))
}

fn show(s: &StatusReport) {
    println!(
        "{:<12} {:<28} hunger {:>3}  happiness {:>3}  energy {:>3}",
        s.name, s.label, s.hunger, s.happiness, s.energy
    );
}

fn spawn_stdin_reader() -> Receiver<Input> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(Input::Line(line)).is_err() {
                return;
            }
        }
        let _ = tx.send(Input::Closed);
    });
    rx
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .init();
}
