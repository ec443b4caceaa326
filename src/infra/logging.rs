use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter for the global verbosity flags
pub fn level_for(
    quiet: bool,
    verbose: u8,
) -> &'static str
{
    match (quiet, verbose)
    {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        _ => "trace",
    }
}

/// Install the stderr subscriber. `RUST_LOG` overrides the flag-derived
/// level. A second call is a no-op.
pub fn init(
    quiet: bool,
    verbose: u8,
    no_color: bool,
)
{
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level_for(quiet, verbose)))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_target(false);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .try_init();
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn flags_map_to_levels()
    {
        assert_eq!(level_for(true, 2), "warn");
        assert_eq!(level_for(false, 0), "info");
        assert_eq!(level_for(false, 1), "debug");
        assert_eq!(level_for(false, 5), "trace");
    }
}
