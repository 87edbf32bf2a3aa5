use tracing_subscriber::{fmt, EnvFilter};

use crate::core::config::Settings;

/// Noisy dependencies are capped below the service's own level.
const DEPENDENCY_DIRECTIVES: &[&str] = &["sqlx=warn", "hyper=warn", "tower_http=info"];

pub(crate) fn init_tracing(settings: &Settings) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives(&settings.telemetry().log_level)))
        .map_err(|err| anyhow::anyhow!("invalid log filter: {err}"))?;

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_span_events(fmt::format::FmtSpan::CLOSE);

    let installed = if settings.telemetry().json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|err| anyhow::anyhow!(err.to_string()))?;

    tracing::debug!(
        level = %settings.telemetry().log_level,
        json = settings.telemetry().json,
        "Tracing initialised"
    );
    Ok(())
}

fn default_directives(level: &str) -> String {
    std::iter::once(level).chain(DEPENDENCY_DIRECTIVES.iter().copied()).collect::<Vec<_>>().join(",")
}
