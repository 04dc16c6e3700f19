//! Logging initialization module
//!
//! Provides a single initialization point for the logging facility.

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Default directives when `RUST_LOG` is unset, per profile
const DEV_FILTER: &str = "rosterdelta_core=debug,rosterdelta_io=debug,rosterdelta_cli=debug";
const PROD_FILTER: &str = "rosterdelta_core=info,rosterdelta_io=info,rosterdelta_cli=info";

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for production
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// Call once at startup; later calls are no-ops. Output goes to stderr so
/// that stdout stays free for command output.
///
/// # Profiles
///
/// - **Development**: Human-readable logs with debug level
/// - **Production**: JSON structured logs with info level
/// - **Test**: Capture mode for test assertions
///
/// # Example
///
/// ```
/// use rosterdelta_core::logging_facility::{init, Profile};
///
/// init(Profile::Development);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEV_FILTER)),
                )
                .init();
        }
        Profile::Production => {
            tracing_subscriber::fmt()
                .json()
                .with_writer(std::io::stderr)
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new(PROD_FILTER)),
                )
                .init();
        }
        Profile::Test => {
            // Test capture is initialized separately via init_test_capture()
            tracing_subscriber::registry().init();
        }
    });
}
