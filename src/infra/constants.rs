// =============================================================================
// FILES & ENVIRONMENT
// =============================================================================

/// Directory for logs and crash reports, relative to the working directory
pub const STATE_DIR: &str = ".turbine";

/// Log file inside STATE_DIR
pub const LOG_FILE: &str = "turbine.log";

/// Env var holding a tracing filter directive (e.g. "turbine_core=debug")
pub const LOG_ENV: &str = "TURBINE_LOG";

/// Env var pointing at a config overlay file
pub const CONFIG_ENV: &str = "TURBINE_CONFIG";

/// Env var holding the bearer token for the HTTP service
pub const API_KEY_ENV: &str = "TURBINE_API_KEY";

// =============================================================================
// EVENT LOOP
// =============================================================================

/// Poll interval while a request is in flight (milliseconds)
pub const EVENT_POLL_BUSY_MS: u64 = 16;

/// Poll interval while idle (milliseconds)
pub const EVENT_POLL_IDLE_MS: u64 = 50;

/// Minimum time between renders (milliseconds)
pub const RENDER_THROTTLE_MS: u64 = 33;

/// Spinner frame duration (milliseconds)
pub const SPINNER_FRAME_MS: u64 = 400;

// =============================================================================
// HTTP SERVICE
// =============================================================================

/// Delay between readiness probes while the service answers 503 (milliseconds)
pub const READY_POLL_MS: u64 = 250;

/// Connection timeout for the HTTP service (seconds)
pub const CONNECT_TIMEOUT_SECS: u64 = 5;

// =============================================================================
// HEADLESS MODE
// =============================================================================

/// How often the headless runner re-checks the readiness timeout (milliseconds)
pub const HEADLESS_TICK_MS: u64 = 100;
