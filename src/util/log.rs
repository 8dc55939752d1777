use std::path::PathBuf;

use color_eyre::eyre::eyre;
use directories::ProjectDirs;
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt,
};

const LOG_ENV: &str = "MOODTUNE_LOG_LEVEL";
const LOG_FILE: &str = "moodtune.log";

fn data_dir() -> color_eyre::Result<PathBuf> {
    let dirs = ProjectDirs::from("com", "moodtune", "moodtune")
        .ok_or_else(|| eyre!("could not resolve a data directory"))?;
    Ok(dirs.data_local_dir().to_path_buf())
}

/// File logging only; stdout belongs to the terminal UI.
pub fn initialize_logging() -> color_eyre::Result<()> {
    let directory = data_dir()?;
    std::fs::create_dir_all(&directory)?;
    let log_file = std::fs::File::create(directory.join(LOG_FILE))?;

    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file_subscriber = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_filter(env_filter);

    tracing_subscriber::registry()
        .with(file_subscriber)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
