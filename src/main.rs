use anyhow::Context;
use clap::{Parser, Subcommand};
use marking_menu::app::App;
use marking_menu::config;
use marking_menu::events::{self, AppEvent};
use marking_menu::sys::runtime;
use marking_menu::sys::server::SOCKET_PATH;
use std::io::Write;
use std::os::unix::net::UnixStream;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "marking-menu", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file to use instead of the per-user default
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Run the menu daemon and read pointer events from its socket (default)
    Serve,
    /// Feed pointer events from a file (or stdin) and print the selections
    Replay {
        /// Event script, one `press|move|release|cancel X Y` per line
        file: Option<PathBuf>,
    },
    /// Send one event line to a running daemon, e.g. `send move 10 20`
    Send {
        #[arg(required = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },
    /// Write the default config file if none exists and print its path
    InitConfig,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(cli.config),
        Commands::Replay { file } => replay(cli.config, file),
        Commands::Send { words } => send_command(&words.join(" ")),
        Commands::InitConfig => {
            let path = config::write_default_config(cli.config.as_deref())?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn serve(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = config::load_or_default(config_path.as_deref());
    let mut app = App::new(config, config_path.clone())?;

    let (tx, rx) = async_channel::bounded(32);
    let watch_path = config::resolve_path(config_path.as_deref()).ok();
    runtime::start_background_services(tx, watch_path);

    while let Ok(event) = rx.recv_blocking() {
        if app.update(event).is_break() {
            break;
        }
        // the recorder has already logged each trial
        let finished = app.take_records().len();
        if finished > 0 {
            log::debug!("Dropped {} logged trial record(s)", finished);
        }
    }
    Ok(())
}

fn replay(config_path: Option<PathBuf>, file: Option<PathBuf>) -> anyhow::Result<()> {
    let mut config = config::load_or_default(config_path.as_deref());
    config.experiment.enabled = true;
    let mut app = App::new(config, config_path)?;

    let script = match &file {
        Some(path) => fs_err::read_to_string(path)?,
        None => std::io::read_to_string(std::io::stdin()).context("Failed to read stdin")?,
    };

    for (number, line) in script.lines().enumerate() {
        match events::parse_line(line) {
            Ok(Some(AppEvent::Quit)) => break,
            Ok(Some(event)) => {
                let _ = app.update(event);
            }
            Ok(None) => {}
            Err(e) => log::warn!("Line {}: {}", number + 1, e),
        }
    }

    if app.menu().is_visible() {
        log::warn!("Input ended in the middle of a selection");
    }

    for (n, record) in app.records().iter().enumerate() {
        println!(
            "{}\t{}\t{}\t{}ms",
            n + 1,
            record
                .index
                .map_or_else(|| "-".to_string(), |i| i.to_string()),
            record.label.as_ref().map_or("-", |l| l.as_str()),
            record.elapsed.as_millis()
        );
    }
    Ok(())
}

fn send_command(line: &str) -> anyhow::Result<()> {
    if events::parse_line(line)?.is_none() {
        anyhow::bail!("Nothing to send");
    }

    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to marking-menu daemon at {}: {}. Is it running?",
            SOCKET_PATH,
            e
        )
    })?;

    writeln!(stream, "{}", line)?;
    Ok(())
}
