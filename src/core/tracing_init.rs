use crate::core::config::LoggingConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// HTTP client internals that stay at `warn` whatever the configured level
const QUIET_TARGETS: [&str; 3] = ["hyper", "hyper_util", "reqwest"];

/// Filter used when `RUST_LOG` is unset: the configured level for the
/// dashboard and its request traces, the client stack kept quiet
pub fn default_directives(level: &str) -> String {
    let mut directives = format!("{level},siswa_dashboard={level},tower_http={level}");
    for target in QUIET_TARGETS {
        directives.push_str(&format!(",{target}=warn"));
    }
    directives
}

pub fn init_tracing(config: &LoggingConfig) {
    let directives = default_directives(&config.level);
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&directives));

    let use_console = config.console || config.format == "console";

    if use_console {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_ansi(true)
                    .with_line_number(true),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true),
            )
            .init();
    }

    tracing::debug!(
        filter = %directives,
        console = use_console,
        "Dashboard logging initialised"
    );
}
