//! devcli-term - run the devcli shell emulator in the current console
//!
//! # Quick Start
//!
//! ```text
//! devcli-term                  # Start with the configured theme
//! devcli-term --theme nord     # Override the color scheme
//! ```
//!
//! # Keys
//!
//! | Key | Action |
//! |-----|--------|
//! | Enter | Run the input line |
//! | Up/Down | Recall previous inputs |
//! | Tab | Complete a command name |
//! | Ctrl+L | Clear the scrollback |
//! | Esc, Ctrl+C, Ctrl+D | Exit |

use std::env;

use crossterm::event::{self, Event};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use devcli_term::config::{ColorScheme, Config, ConfigError};
use devcli_term::ui::{KeyMapper, Renderer};
use devcli_term::Terminal;

/// Command line options
#[derive(Debug, Default)]
struct Options {
    /// Color scheme override
    theme: Option<String>,
    /// Hide the welcome banner
    no_banner: bool,
    /// Write the effective config file and exit
    init_config: bool,
}

/// Version string from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_version() {
    eprintln!("devcli-term {}", VERSION);
}

fn print_help() {
    eprintln!("devcli-term {} - An in-memory shell simulating devcli", VERSION);
    eprintln!();
    eprintln!("Usage: devcli-term [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -t, --theme <NAME>    Color scheme ({})", ColorScheme::list().join(", "));
    eprintln!("      --no-banner       Do not show the welcome banner");
    eprintln!("      --init-config     Write the effective config file and exit");
    eprintln!("  -v, --version         Show version");
    eprintln!("  -h, --help            Show this help");
    eprintln!();
    eprintln!("Keys:");
    eprintln!("  Enter                 Run the input line");
    eprintln!("  Up/Down               Recall previous inputs");
    eprintln!("  Tab                   Complete a command name");
    eprintln!("  Ctrl+L                Clear the scrollback");
    eprintln!("  Esc, Ctrl+C, Ctrl+D   Exit");
    eprintln!();
    eprintln!("Configuration: ~/.devcli-term/config.toml");
}

fn parse_args() -> Result<Options, String> {
    let args: Vec<String> = env::args().collect();
    let mut options = Options::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-v" | "--version" => {
                print_version();
                std::process::exit(0);
            }
            "-t" | "--theme" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing theme argument".to_string());
                }
                options.theme = Some(args[i].clone());
            }
            "--no-banner" => {
                options.no_banner = true;
            }
            "--init-config" => {
                options.init_config = true;
            }
            arg => {
                return Err(format!("Unknown argument: {}. Use -h for help.", arg));
            }
        }
        i += 1;
    }

    Ok(options)
}

/// Install the file logger. The console belongs to the renderer.
fn init_logging(config: &Config) {
    let log_path = Config::config_dir()
        .map(|dir| dir.join("devcli-term.log"))
        .unwrap_or_else(|| std::path::PathBuf::from("devcli-term.log"));

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .ok();

    if let Some(file) = log_file {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }
}

fn main() -> anyhow::Result<()> {
    let options = match parse_args() {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Use --help for usage information");
            std::process::exit(1);
        }
    };

    let (mut config, config_error): (Config, Option<ConfigError>) = match Config::load() {
        Ok(c) => (c, None),
        Err(e) => (Config::default(), Some(e)),
    };

    init_logging(&config);
    info!("devcli-term {} starting...", VERSION);
    if let Some(e) = config_error {
        warn!("{}; using defaults", e);
    }

    if let Some(theme) = options.theme {
        config.color_scheme = theme;
    }
    if options.no_banner {
        config.banner = false;
    }
    info!("Color scheme: {}", config.color_scheme);

    if options.init_config {
        let path = config.save()?;
        info!("Wrote config to {}", path.display());
        eprintln!("Wrote {}", path.display());
        return Ok(());
    }

    let mut renderer = Renderer::with_color_scheme(config.get_color_scheme());
    renderer.init()?;

    let result = run_main_loop(&mut renderer, &config);

    let _ = renderer.cleanup();
    if let Err(e) = &result {
        error!("Main loop failed: {}", e);
    }
    info!("devcli-term exiting");
    result
}

/// Event loop: paint, wait for a key, feed it to the terminal
fn run_main_loop(renderer: &mut Renderer, config: &Config) -> anyhow::Result<()> {
    let mut term = Terminal::new();
    term.open();

    while term.is_open() {
        let mut lines = Vec::new();
        let scrollback_empty = term
            .session()
            .map(|s| s.scrollback().is_empty())
            .unwrap_or(true);
        if config.banner && scrollback_empty {
            lines.extend(Terminal::welcome_banner());
        }
        lines.extend(term.renderable_lines());
        renderer.render(&lines)?;

        match event::read()? {
            Event::Key(key_event) => {
                if let Some(key) = KeyMapper::map(&key_event) {
                    term.handle_key(key);
                }
            }
            Event::Resize(cols, rows) => {
                info!("Resized to {}x{}", cols, rows);
            }
            _ => {}
        }
    }

    Ok(())
}
