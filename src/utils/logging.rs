//! Logging setup and secret scrubbing for log output

use crate::config::{LogFormat, LoggingConfig};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing_subscriber::EnvFilter;

static SECRET_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"(?i)bearer\s+[a-zA-Z0-9\-._~+/]+=*", "Bearer [REDACTED]"),
        (r"sk-[a-zA-Z0-9_\-]{8,}", "sk-[REDACTED]"),
        (
            r#"(?i)(api[_-]?key|xi-api-key|token|secret|password)(["']?\s*[:=]\s*["']?)[^\s"',}&]+"#,
            "$1$2[REDACTED]",
        ),
    ]
    .into_iter()
    .filter_map(|(pattern, replacement)| Regex::new(pattern).ok().map(|re| (re, replacement)))
    .collect()
});

/// Mask API keys and tokens before text reaches a log line
pub fn sanitize_for_logging(input: &str) -> String {
    let mut result = input.to_string();
    for (re, replacement) in SECRET_PATTERNS.iter() {
        result = re.replace_all(&result, *replacement).into_owned();
    }
    result
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` wins over the configured level. `format_override` comes from
/// the command line and wins over the configured format.
pub fn init_logging(config: &LoggingConfig, format_override: Option<LogFormat>) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false);

    // try_init so a second call (tests, embedding) is a no-op
    let _ = match format_override.unwrap_or(config.format) {
        LogFormat::Json => builder.json().with_current_span(false).try_init(),
        LogFormat::Pretty => builder.try_init(),
    };
}
