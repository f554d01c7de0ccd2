//! Communication bridge between the soundboard frontend and backend.
//!
//! This crate defines the types and protocols used to connect the graphical
//! board with the asynchronous backend responsible for clip playback,
//! preference persistence and talking to the soundboard server.
//!
//! The flow is unidirectional on each side:
//! - The frontend sends commands (e.g., play a sound, toggle a preference,
//!   swap a slot).
//! - The backend pushes events (e.g., highlight changes, preference
//!   snapshots, server-driven board updates, notifications).
//!
//! Communication happens over bounded [`tokio::sync::mpsc`] channels wrapped
//! in [`BridgeChannels`].

pub mod config;
pub mod notification;
pub mod preference;
pub mod server;
pub mod sound;

use tokio::sync::mpsc::{self, Receiver, Sender};

/// Messages emitted by the backend to inform the frontend of state updates.
#[derive(Debug, Clone)]
pub enum MessageFromBackend {
    /// Generic message for all notifications in the application.
    NotificationMessage(notification::NotificationMessage),
    /// Response to the configuration request from the frontend.
    ConfigurationResponse(config::Config),
    /// Current preference values. Sent on request and after every update so
    /// the toggles in the UI reflect the stored state.
    PreferencesResponse(preference::Preferences),
    /// A sound element should change its highlight state.
    HighlightChanged {
        element_id: sound::ElementId,
        state: sound::HighlightState,
    },
    /// Server-driven state that only the UI consumes.
    ServerUpdate(server::ServerEvent),
}

/// Commands issued by the frontend to control or query the backend.
#[derive(Debug, Clone)]
pub enum MessageToBackend {
    /// Request for the application configuration.
    ConfigurationRequest,
    /// Request for the current preference values.
    PreferencesRequest,
    /// Persist a new value for one of the preference toggles.
    UpdatePreference {
        key: preference::PreferenceKey,
        value: bool,
    },
    /// Play a sound, subject to the mute and send-sound preferences.
    PlaySoundRequest(sound::PlayRequest),
    /// Load a sound and highlight its element without playing it.
    PreviewSoundRequest(sound::PlayRequest),
    /// Reassign a slot on the server after a drop.
    SwapSoundRequest(sound::SwapRequest),
    /// Send a stored sound to the shared channel.
    QuickplayRequest(sound::QuickplayRequest),
}

/// Paired `tokio::mpsc` channels for bidirectional communication between
/// frontend and backend.
pub struct BridgeChannels {
    /// Receiver used by the frontend to get messages from the backend.
    pub frontend_rx: Receiver<MessageFromBackend>,
    /// Sender used by the frontend to send commands to the backend.
    pub frontend_tx: Sender<MessageToBackend>,

    /// Receiver used by the backend to get commands from the frontend.
    pub backend_rx: Receiver<MessageToBackend>,
    /// Sender used by the backend to send events/responses to the frontend.
    pub backend_tx: Sender<MessageFromBackend>,
}

impl BridgeChannels {
    /// Creates a new pair of bridged channels with the given buffer capacity.
    pub fn new(buffer: usize) -> Self {
        let (to_backend_tx, to_backend_rx) = mpsc::channel(buffer);
        let (to_frontend_tx, to_frontend_rx) = mpsc::channel(buffer);
        Self {
            frontend_tx: to_backend_tx,
            frontend_rx: to_frontend_rx,
            backend_rx: to_backend_rx,
            backend_tx: to_frontend_tx,
        }
    }
}

impl Default for BridgeChannels {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn channels_are_cross_wired() {
        let mut channels = BridgeChannels::new(4);

        channels
            .frontend_tx
            .send(MessageToBackend::PreferencesRequest)
            .await
            .unwrap();
        assert!(matches!(
            channels.backend_rx.recv().await,
            Some(MessageToBackend::PreferencesRequest)
        ));

        channels
            .backend_tx
            .send(MessageFromBackend::PreferencesResponse(
                preference::Preferences::default(),
            ))
            .await
            .unwrap();
        assert!(matches!(
            channels.frontend_rx.recv().await,
            Some(MessageFromBackend::PreferencesResponse(_))
        ));
    }
}
