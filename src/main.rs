use anyhow::{Context, Result};
use clap::Parser;
use music_manager::manager::DEFAULT_DATA_FILE;
use music_manager::{ManagerConfig, MusicManager, Shell};
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "music-manager")]
#[command(about = "Manage songs and playlists stored in a local JSON file", long_about = None)]
struct Args {
    /// Path to the library file
    #[arg(short = 'd', long, default_value = DEFAULT_DATA_FILE)]
    data: String,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr; keep them quiet unless asked so the menu stays readable
    let log_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Expand ~ in paths
    let data_path = shellexpand::tilde(&args.data);
    let config = ManagerConfig::new(PathBuf::from(data_path.as_ref()));

    log::info!("Opening music library at {:?}", config.data_path);
    let mut manager = MusicManager::from_config(&config)
        .with_context(|| format!("Failed to load music library: {:?}", config.data_path))?;

    log::info!(
        "Library loaded: {} songs, {} playlists",
        manager.songs().len(),
        manager.playlists().len()
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    Shell::new(&mut manager, stdin.lock(), stdout.lock()).run()
}
