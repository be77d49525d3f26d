pub mod codegen;
pub mod config;
pub mod error;
pub mod field;
pub mod logging;
pub mod store;
pub mod tokens;
pub mod units;
pub use error::{AppError, AppResult};

use std::io::Write;
use std::path::Path;

use store::{FileCache, FileDocumentStore, TokenSource, TokenStore};

/// Opens the file-backed store under `data_dir`, loads the working tree and
/// renders the full stylesheet.
pub fn export_stylesheet(data_dir: &Path) -> (TokenSource, String) {
    let mut store = TokenStore::new(
        FileDocumentStore::new(data_dir),
        FileCache::new(config::cache_dir(data_dir)),
    );
    let source = store.load();
    (source, codegen::stylesheet(store.tokens()))
}

/// Entrypoint used by the CLI binary: prints the working stylesheet to stdout.
pub fn run() -> AppResult<()> {
    let loaded = config::read_app_config();
    logging::init(
        loaded
            .as_ref()
            .ok()
            .and_then(|config| config.log_filter.as_deref()),
    );
    let app_config = loaded.unwrap_or_else(|err| {
        tracing::warn!(?err, "failed to load config.json; using defaults");
        config::AppConfig::default()
    });
    tracing::info!("starting token-studio");

    let (xdg_config_home, home) = config::config_env_dirs();
    let data_dir = app_config.resolve_data_dir(xdg_config_home.as_deref(), home.as_deref())?;
    tracing::debug!(data_dir = %data_dir.display(), "opening token store");

    let (source, css) = export_stylesheet(&data_dir);
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{css}")?;
    stdout.flush()?;

    tracing::info!(?source, "stylesheet exported");
    Ok(())
}
