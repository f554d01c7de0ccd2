use gpui::{AppContext, Application, Global, WindowOptions};
use gpui_component::{
    Root, WindowExt,
    notification::{Notification, NotificationType},
};
use soundboard_bridge::{
    MessageFromBackend, MessageToBackend,
    preference::PreferenceKey,
    sound::{PlayRequest, QuickplayRequest, SwapRequest},
};
use tokio::sync::mpsc;

use crate::entities::{board_entity::BoardEntity, settings_entity::SettingsEntity};

mod assets;
pub mod components;
pub mod entities;
pub mod interaction;
pub mod ui_sync;
mod views;

#[derive(Clone)]
pub struct BackendBridge {
    pub to_backend: mpsc::Sender<MessageToBackend>,
}

impl BackendBridge {
    async fn send(&self, message: MessageToBackend) {
        if let Err(error) = self.to_backend.send(message).await {
            log::error!("Backend is gone, dropping {:?}", error.0);
        }
    }

    pub async fn request_config(&self) {
        self.send(MessageToBackend::ConfigurationRequest).await;
    }

    pub async fn request_preferences(&self) {
        self.send(MessageToBackend::PreferencesRequest).await;
    }

    pub async fn update_preference(&self, key: PreferenceKey, value: bool) {
        self.send(MessageToBackend::UpdatePreference { key, value })
            .await;
    }

    pub async fn play_sound(&self, request: PlayRequest) {
        self.send(MessageToBackend::PlaySoundRequest(request)).await;
    }

    pub async fn preview_sound(&self, request: PlayRequest) {
        self.send(MessageToBackend::PreviewSoundRequest(request))
            .await;
    }

    pub async fn swap_sound(&self, request: SwapRequest) {
        self.send(MessageToBackend::SwapSoundRequest(request)).await;
    }

    pub async fn quickplay(&self, request: QuickplayRequest) {
        self.send(MessageToBackend::QuickplayRequest(request)).await;
    }
}

impl Global for BackendBridge {}

fn notification_type(
    notification_type: soundboard_bridge::notification::NotificationType,
) -> NotificationType {
    match notification_type {
        soundboard_bridge::notification::NotificationType::Info => NotificationType::Info,
        soundboard_bridge::notification::NotificationType::Success => NotificationType::Success,
        soundboard_bridge::notification::NotificationType::Warning => NotificationType::Warning,
        soundboard_bridge::notification::NotificationType::Error => NotificationType::Error,
    }
}

pub fn run(
    mut rx: mpsc::Receiver<MessageFromBackend>,
    tx: mpsc::Sender<MessageToBackend>,
) -> anyhow::Result<()> {
    let app = Application::new().with_assets(assets::Assets);

    app.run(move |cx| {
        gpui_component::init(cx);

        let settings = cx.new(|_| SettingsEntity::default());
        let board = cx.new(|_| BoardEntity::default());

        let data = entities::DataEntities { settings, board };
        let listener_data = data.clone();

        let bridge = BackendBridge {
            to_backend: tx.clone(),
        };
        cx.set_global(bridge.clone());

        cx.spawn(async move |cx| {
            cx.open_window(WindowOptions::default(), |window, cx| {
                let window_handle = window.window_handle();
                cx.spawn(async move |cx| {
                    while let Some(message) = rx.recv().await {
                        log::debug!("Got a message from backend: {message:?}");
                        match message {
                            MessageFromBackend::ConfigurationResponse(config) => {
                                SettingsEntity::update_config(&listener_data.settings, config, cx)
                            }
                            MessageFromBackend::PreferencesResponse(preferences) => {
                                SettingsEntity::update_preferences(
                                    &listener_data.settings,
                                    preferences,
                                    cx,
                                )
                            }
                            MessageFromBackend::HighlightChanged { element_id, state } => {
                                BoardEntity::update_highlight(
                                    &listener_data.board,
                                    element_id,
                                    state,
                                    cx,
                                )
                            }
                            MessageFromBackend::ServerUpdate(event) => {
                                BoardEntity::update_from_server(&listener_data.board, event, cx)
                            }
                            MessageFromBackend::NotificationMessage(notification) => {
                                let pushed = window_handle.update(cx, |_, window, cx| {
                                    let toast = Notification::new()
                                        .message(notification.message)
                                        .with_type(notification_type(
                                            notification.notification_type,
                                        ));
                                    window.push_notification(toast, cx);
                                });
                                if let Err(error) = pushed {
                                    log::warn!("Failed to push a notification: {error}");
                                }
                            }
                        }
                    }
                })
                .detach();

                cx.spawn(async move |_| {
                    bridge.request_config().await;
                    bridge.request_preferences().await;
                })
                .detach();

                let view = cx.new(|cx| crate::views::FrontendUi::new(&data, window, cx));
                cx.new(|cx| Root::new(view, window, cx))
            })?;

            Ok::<_, anyhow::Error>(())
        })
        .detach();
    });

    Ok(())
}
