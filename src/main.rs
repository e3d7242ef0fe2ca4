//! termfeed - a scripted fake terminal in your real terminal.

mod cli;

use cli::Cli;
use termfeed::config::Config;
use termfeed::error::{Result, TermError};
use termfeed::{logging, tui};
use tracing::{error, info};

fn main() {
    let cli = Cli::parse_args();

    // The TUI owns the screen, so its logs go to a file.
    if cli.headless {
        logging::init_stderr_logging();
    } else {
        logging::init_file_logging();
    }

    match run(&cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            error!("{}: {}", e.category(), e);
            eprintln!("{}: {}", e.category(), e);
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<i32> {
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let mut config = Config::load_from_file(&config_path)?;
    cli.apply_overrides(&mut config);

    if cli.headless {
        cli.validate_headless().map_err(TermError::config)?;
        let headless = cli.headless_config()?;
        let events = cli.read_events()?;
        return tui::headless::run_headless(&config, headless, &events);
    }

    tui::run(&config)?;
    Ok(0)
}
