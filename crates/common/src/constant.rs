use std::time::Duration;

/// Environment variable for the admin bridge url
pub const ENV_ADMIN_URL: &str = "DSO_ADMIN_URL";
/// Environment variable for the `cell/node/server` target
pub const ENV_ADMIN_ENDPOINT: &str = "DSO_ADMIN_ENDPOINT";
/// Environment variable for an optional YAML config file
pub const ENV_ADMIN_CONFIG: &str = "DSO_ADMIN_CONFIG";
/// Environment variable holding the log filter directives
pub const ENV_ADMIN_LOG: &str = "DSO_ADMIN_LOG";

/// Discovery pattern matching the server whose state is polled
pub const DEFAULT_SERVER_QUERY: &str = "type=Server,*";
/// Attribute holding the server state
pub const DEFAULT_STATE_ATTRIBUTE: &str = "state";
/// State value after which polling stops
pub const STATE_STOPPED: &str = "STOPPED";
/// State value marking a graceful shutdown in progress
pub const STATE_STOPPING: &str = "STOPPING";

/// Time between two state reads
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Directory (relative to the install root) holding the DSO boot jars
pub const DSO_BOOT_DIR: &str = "lib/dso-boot";
/// File extension of deployable web application archives
pub const ARTIFACT_EXTENSION: &str = "war";

/// Admin bridge url used when neither a flag, env var nor config file sets one
pub const DEFAULT_ADMIN_URL: &str = "http://localhost:9060";
/// Timeout of a single request to the admin bridge
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
