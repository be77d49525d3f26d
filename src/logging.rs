use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Installs the global fmt subscriber on stderr. The filter comes from
/// `RUST_LOG`, then `config_filter`, then `info`; the first one that parses
/// wins. Calling this twice is harmless.
pub fn init(config_filter: Option<&str>) {
    let env_filter = std::env::var("RUST_LOG").ok();
    let directives = select_directives(env_filter.as_deref(), config_filter);
    let filter = EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn select_directives<'a>(env_filter: Option<&'a str>, config_filter: Option<&'a str>) -> &'a str {
    [env_filter, config_filter]
        .into_iter()
        .flatten()
        .filter(|directives| !directives.trim().is_empty())
        .find(|directives| EnvFilter::try_new(directives).is_ok())
        .unwrap_or(DEFAULT_FILTER)
}
