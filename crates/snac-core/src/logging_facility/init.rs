//! Logging initialization

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output, debug level
    Development,
    /// JSON structured output, info level
    Production,
    /// No output; tests install their own capture layer
    Test,
}

impl Profile {
    fn default_directive(&self) -> &'static str {
        match self {
            Profile::Development => "snac=debug",
            Profile::Production => "snac=info",
            Profile::Test => "off",
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility with the profile's default level
///
/// Safe to call more than once; only the first call installs a subscriber.
///
/// ```
/// use snac_core::logging_facility::{init, Profile};
///
/// init(Profile::Test);
/// ```
pub fn init(profile: Profile) {
    init_with_level(profile, None);
}

/// Initialize the logging facility with an explicit level
///
/// `level` is a plain level name (`"debug"`, `"WARN"`, ...) applied to the
/// snac crates. `RUST_LOG` takes precedence when set.
pub fn init_with_level(profile: Profile, level: Option<&str>) {
    INIT_ONCE.call_once(|| {
        let directive = level_directive(level).unwrap_or_else(|| profile.default_directive().to_string());
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&directive));

        match profile {
            Profile::Development => {
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
            Profile::Production => {
                tracing_subscriber::fmt()
                    .json()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
            Profile::Test => {
                tracing_subscriber::registry().init();
            }
        }
    });
}

/// Map a configured level name to a filter directive for the snac crates
fn level_directive(level: Option<&str>) -> Option<String> {
    let level = level?.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" | "off" => Some(format!("snac={}", level)),
        // Legacy level name from older configs
        "success" => Some("snac=info".to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_idempotent() {
        init(Profile::Test);
        init(Profile::Test);
        init_with_level(Profile::Test, Some("debug"));
    }

    #[test]
    fn test_level_directive() {
        assert_eq!(level_directive(Some("DEBUG")), Some("snac=debug".to_string()));
        assert_eq!(level_directive(Some(" warn ")), Some("snac=warn".to_string()));
        assert_eq!(level_directive(Some("success")), Some("snac=info".to_string()));
        assert_eq!(level_directive(Some("loud")), None);
        assert_eq!(level_directive(None), None);
    }
}
