/// The core application state that holds configuration, preferences, and
/// other shared resources.
///
/// This struct contains all the data that needs to be shared across async
/// tasks in the application. It is wrapped in [`SharedState`] so handlers
/// can read it concurrently.
#[derive(Clone)]
pub struct State {
    /// The loaded application configuration.
    pub config: soundboard_bridge::config::Config,
    /// Shared HTTP client for making efficient, pooled requests.
    pub request_client: reqwest::Client,
    /// Persisted preference toggles, also read by the playback coordinator.
    pub preferences: crate::preferences::SharedPreferences,
}

/// Thread-safe, async-friendly shared reference to the application [`State`].
pub type SharedState = std::sync::Arc<tokio::sync::RwLock<State>>;
