//! Backend runtime setup and orchestration.
//!
//! This module wires together configuration, shared state, the playback
//! coordinator, the server event feed and the message dispatch loop that
//! listens to frontend bridge requests.

use std::{sync::Arc, thread};

use soundboard_audio::engine::{AudioEngine, EngineError};
use soundboard_bridge::{
    MessageFromBackend, MessageToBackend,
    config::Config,
    notification::{NotificationMessage, NotificationType},
};
use tokio::sync::{
    RwLock,
    mpsc::{Receiver, Sender},
};

use crate::app::AppContext;
use crate::config::ConfigError;
use crate::playback::{CdnAudioOutput, PlaybackCoordinator};
use crate::preferences::{FileStorage, MemoryStorage, PreferenceStorage, PreferenceStore};
use crate::services::server_events_service;
use crate::state::State;

/// Errors that prevent the backend from starting.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to build tokio runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Initialize backend state and start processing frontend messages.
async fn setup_backend(
    rx: Receiver<MessageToBackend>,
    tx: Sender<MessageFromBackend>,
) -> Result<(), RuntimeError> {
    let (config, storage): (_, Box<dyn PreferenceStorage>) =
        match crate::config::load_config().await {
            Ok((config, config_dir)) => {
                let preferences_path = config_dir.join("preferences.toml");
                log::info!("Loading preferences from {preferences_path:?}");
                (config, Box::new(FileStorage::new(preferences_path)))
            }
            Err(ConfigError::DirectoriesNotFound) => {
                log::warn!("No configuration directory, using defaults and volatile preferences");
                (Config::default(), Box::new(MemoryStorage::default()))
            }
            Err(error) => return Err(error.into()),
        };

    let engine = open_audio_engine(AudioEngine::start, &tx).await;
    serve(config, storage, engine, rx, tx).await;
    Ok(())
}

/// Opens the audio output. A missing device is reported to the user but does
/// not stop the backend: swaps, quickplay and preferences keep working.
async fn open_audio_engine(
    start: impl FnOnce() -> Result<AudioEngine, EngineError>,
    tx: &Sender<MessageFromBackend>,
) -> Option<Arc<AudioEngine>> {
    match start() {
        Ok(engine) => Some(Arc::new(engine)),
        Err(error) => {
            log::warn!("Continuing without audio output: {error}");
            let notification = NotificationMessage {
                notification_type: NotificationType::Warning,
                message: format!("Sounds will not play: {error}"),
            };
            let _ = tx
                .send(MessageFromBackend::NotificationMessage(notification))
                .await;
            None
        }
    }
}

/// Builds the shared state around `engine` and dispatches bridge messages
/// until the frontend goes away.
async fn serve(
    config: Config,
    storage: Box<dyn PreferenceStorage>,
    engine: Option<Arc<AudioEngine>>,
    rx: Receiver<MessageToBackend>,
    tx: Sender<MessageFromBackend>,
) {
    let preferences = Arc::new(RwLock::new(PreferenceStore::load(storage)));

    let request_client = reqwest::Client::new();
    let output = CdnAudioOutput::new(request_client.clone(), config.audio.clone(), engine);
    let playback = PlaybackCoordinator::spawn(output, tx.clone(), preferences.clone());

    let events_url = config.server.events_url.clone();
    let state = Arc::new(RwLock::new(State {
        config,
        request_client,
        preferences,
    }));

    let context = Arc::new(AppContext {
        state,
        tx,
        playback,
    });
    tokio::spawn(server_events_service::listen(context.clone(), events_url));

    context.consume_bridge_messages(rx).await;
}

/// Spawn the backend runtime and begin processing bridge messages.
pub fn run(rx: Receiver<MessageToBackend>, tx: Sender<MessageFromBackend>) {
    thread::spawn(move || {
        let error_tx = tx.clone();
        let result = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(RuntimeError::from)
            .and_then(|runtime| runtime.block_on(setup_backend(rx, tx)));

        if let Err(error) = result {
            log::error!("Backend stopped: {error}");
            let notification = NotificationMessage {
                notification_type: NotificationType::Error,
                message: format!("Backend failed to start: {error}"),
            };
            let _ = error_tx.blocking_send(MessageFromBackend::NotificationMessage(notification));
        }
    });
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use soundboard_bridge::{
        BridgeChannels,
        preference::PreferenceKey,
        sound::{SoundSource, SwapRequest},
    };
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    use super::*;

    fn no_output_device() -> Result<AudioEngine, EngineError> {
        Err(EngineError::Backend("no output device".to_owned()))
    }

    #[tokio::test]
    async fn backend_keeps_serving_without_an_output_device() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/swap-sound"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        let mut config = Config::default();
        config.server.base_url = server.uri();
        config.server.events_url = "ws://127.0.0.1:9/ws".to_owned();

        let BridgeChannels {
            mut frontend_rx,
            frontend_tx,
            backend_rx,
            backend_tx,
        } = BridgeChannels::new(16);

        let engine = open_audio_engine(no_output_device, &backend_tx).await;
        assert!(engine.is_none());
        match frontend_rx.recv().await {
            Some(MessageFromBackend::NotificationMessage(notification)) => {
                assert_eq!(notification.notification_type, NotificationType::Warning);
            }
            other => panic!("expected a warning, got {other:?}"),
        }

        tokio::spawn(serve(
            config,
            Box::new(MemoryStorage::default()),
            engine,
            backend_rx,
            backend_tx,
        ));

        frontend_tx
            .send(MessageToBackend::UpdatePreference {
                key: PreferenceKey::MuteSounds,
                value: true,
            })
            .await
            .unwrap();
        match frontend_rx.recv().await {
            Some(MessageFromBackend::PreferencesResponse(preferences)) => {
                assert!(preferences.muted);
            }
            other => panic!("expected preferences, got {other:?}"),
        }

        let source = SoundSource {
            name: "foo".to_owned(),
            extension: ".mp3".to_owned(),
        };
        frontend_tx
            .send(MessageToBackend::SwapSoundRequest(SwapRequest::new(
                &source, None,
            )))
            .await
            .unwrap();
        for _ in 0..50 {
            if !server.received_requests().await.unwrap().is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }
}
