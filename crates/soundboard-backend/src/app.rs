//! Application context and message dispatching utilities.
//!
//! The context contains the shared state and the playback handle, and
//! provides helpers for sending responses and notifications back to the
//! frontend bridge.

use std::sync::Arc;

use soundboard_bridge::{
    MessageFromBackend, MessageToBackend,
    notification::{NotificationMessage, NotificationType},
};
use tokio::sync::mpsc::{Receiver, Sender};

use crate::playback::PlaybackHandle;
use crate::services;
use crate::state::SharedState;

/// Shared application context passed to services and message handlers.
pub(crate) struct AppContext {
    /// Mutable runtime application state shared across services.
    pub state: SharedState,
    /// Outbound channel to the frontend bridge.
    pub tx: Sender<MessageFromBackend>,
    /// Entry point of the playback coordinator.
    pub playback: PlaybackHandle,
}

impl AppContext {
    /// Read and dispatch messages from the frontend bridge until it closes.
    pub async fn consume_bridge_messages(self: &Arc<Self>, mut rx: Receiver<MessageToBackend>) {
        while let Some(message) = rx.recv().await {
            log::debug!("Got a frontend message: {message:?}");
            self.dispatch_message(message).await;
        }
        log::info!("Frontend bridge closed, stopping message dispatch");
    }

    /// Dispatches the received message from frontend down to individual
    /// service handlers.
    pub(crate) async fn dispatch_message(self: &Arc<Self>, message: MessageToBackend) {
        match message {
            MessageToBackend::ConfigurationRequest => {
                services::config_service::handle_config_request(self.clone()).await;
            }
            MessageToBackend::PreferencesRequest => {
                services::preference_service::handle_preferences_request(self.clone()).await;
            }
            MessageToBackend::UpdatePreference { key, value } => {
                services::preference_service::handle_update_preference(self.clone(), key, value)
                    .await;
            }
            MessageToBackend::PlaySoundRequest(request) => {
                services::playback_service::handle_play_request(self.clone(), request).await;
            }
            MessageToBackend::PreviewSoundRequest(request) => {
                services::playback_service::handle_preview_request(self.clone(), request).await;
            }
            MessageToBackend::SwapSoundRequest(request) => {
                services::swap_service::handle_swap_request(self.clone(), request).await;
            }
            MessageToBackend::QuickplayRequest(request) => {
                services::quickplay_service::handle_quickplay_request(self.clone(), request).await;
            }
        }
    }

    /// Send a message to the frontend bridge.
    pub async fn send(&self, message: MessageFromBackend) {
        if self.tx.send(message).await.is_err() {
            log::warn!("Frontend channel closed, dropping message");
        }
    }

    /// Send a notification message to the frontend bridge.
    pub async fn send_notification(
        &self,
        notification_type: NotificationType,
        content: impl Into<String>,
    ) {
        self.send(MessageFromBackend::NotificationMessage(NotificationMessage {
            notification_type,
            message: content.into(),
        }))
        .await;
    }
}
