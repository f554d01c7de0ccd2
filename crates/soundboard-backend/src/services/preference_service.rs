use soundboard_bridge::{
    MessageFromBackend,
    preference::{PreferenceKey, Preferences},
};

async fn send_snapshot(context: &super::AppContextHandle) {
    let preferences = {
        let state = context.state.read().await;
        let store = state.preferences.read().await;
        store.snapshot()
    };
    context
        .send(MessageFromBackend::PreferencesResponse(preferences))
        .await;
}

/// Handles an incoming preferences request (see
/// [`soundboard_bridge::MessageToBackend::PreferencesRequest`]) with the
/// durable values of every toggle.
pub async fn handle_preferences_request(context: super::AppContextHandle) {
    let preferences = {
        let state = context.state.read().await;
        let store = state.preferences.read().await;
        let mut preferences = Preferences::default();
        for key in PreferenceKey::ALL {
            preferences.set(key, store.read(key));
        }
        preferences
    };
    context
        .send(MessageFromBackend::PreferencesResponse(preferences))
        .await;
}

/// Writes the new value through to storage and echoes the updated snapshot
/// so every view of the toggle stays in sync.
pub async fn handle_update_preference(
    context: super::AppContextHandle,
    key: PreferenceKey,
    value: bool,
) {
    let preferences = context.state.read().await.preferences.clone();
    preferences.write().await.update(key, value);
    send_snapshot(&context).await;
}

#[cfg(test)]
mod tests {
    use soundboard_bridge::config::Config;

    use super::*;
    use crate::services::test_support::test_context;

    #[tokio::test]
    async fn update_is_echoed_as_a_snapshot() {
        let mut test = test_context(Config::default());

        handle_update_preference(test.context.clone(), PreferenceKey::MuteSounds, true).await;

        match test.frontend_rx.recv().await {
            Some(MessageFromBackend::PreferencesResponse(preferences)) => assert_eq!(
                preferences,
                Preferences {
                    muted: true,
                    play_send_sounds: false,
                }
            ),
            other => panic!("unexpected message {other:?}"),
        }

        let state = test.context.state.read().await;
        assert!(state.preferences.read().await.read(PreferenceKey::MuteSounds));
    }

    #[tokio::test]
    async fn request_returns_current_values() {
        let mut test = test_context(Config::default());

        handle_preferences_request(test.context.clone()).await;

        assert!(matches!(
            test.frontend_rx.recv().await,
            Some(MessageFromBackend::PreferencesResponse(preferences))
                if preferences == Preferences::default()
        ));
    }
}
