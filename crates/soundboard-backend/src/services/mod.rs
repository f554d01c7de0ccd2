//! Backend service handlers for frontend-driven requests.
//!
//! This module groups async request handlers that operate on the shared
//! `AppContext`, perform side effects (network, persistence, playback), and
//! emit responses or notifications back to the frontend.

pub mod config_service;
pub mod playback_service;
pub mod preference_service;
pub mod quickplay_service;
pub mod server_events_service;
pub mod swap_service;

/// Represents a type that is used in all handlers as an application context.
pub(crate) type AppContextHandle = std::sync::Arc<crate::AppContext>;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use soundboard_bridge::{MessageFromBackend, config::Config};
    use tokio::sync::{RwLock, mpsc};

    use super::AppContextHandle;
    use crate::{
        AppContext,
        playback::{PlaybackCommand, PlaybackHandle},
        preferences::{MemoryStorage, PreferenceStore},
        state::State,
    };

    /// A context wired to plain channels instead of a frontend and a
    /// playback coordinator.
    pub(crate) struct TestContext {
        pub context: AppContextHandle,
        pub frontend_rx: mpsc::Receiver<MessageFromBackend>,
        pub playback_rx: mpsc::Receiver<PlaybackCommand>,
    }

    pub(crate) fn test_context(config: Config) -> TestContext {
        let (tx, frontend_rx) = mpsc::channel(16);
        let (playback_tx, playback_rx) = mpsc::channel(16);
        let state = State {
            config,
            request_client: reqwest::Client::new(),
            preferences: Arc::new(RwLock::new(PreferenceStore::load(Box::new(
                MemoryStorage::default(),
            )))),
        };
        let context = Arc::new(AppContext {
            state: Arc::new(RwLock::new(state)),
            tx,
            playback: PlaybackHandle::new(playback_tx),
        });
        TestContext {
            context,
            frontend_rx,
            playback_rx,
        }
    }

    /// Config pointing every server endpoint at `base_url`.
    pub(crate) fn config_for(base_url: &str) -> Config {
        let mut config = Config::default();
        config.server.base_url = base_url.to_owned();
        config
    }
}
