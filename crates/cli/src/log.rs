use dso_admin_common::constant::ENV_ADMIN_LOG;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn make_env_filter(level: LevelFilter) -> anyhow::Result<EnvFilter> {
    Ok(EnvFilter::builder()
        .with_env_var(ENV_ADMIN_LOG)
        .with_default_directive(level.into())
        .from_env_lossy()
        .add_directive("hyper=off".parse()?)
        .add_directive("hyper_util=off".parse()?)
        .add_directive("reqwest=off".parse()?))
}

/// Log to stderr so stdout only carries the command's json result.
pub fn init_logging(verbose: bool) -> anyhow::Result<WorkerGuard> {
    let (stderr, guard) = tracing_appender::non_blocking(std::io::stderr());

    let output = tracing_subscriber::fmt::layer()
        .with_writer(stderr)
        .with_target(false);

    let output = if cfg!(debug_assertions) {
        output.with_file(true).with_line_number(true)
    } else {
        output
    };

    let filter_level = if verbose || cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    tracing_subscriber::registry()
        .with(make_env_filter(filter_level)?)
        .with(output)
        .try_init()?;

    Ok(guard)
}
