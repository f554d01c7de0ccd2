//! Subscription to the soundboard server's event feed.
//!
//! The feed is a WebSocket carrying one JSON [`ServerEvent`] per text frame.
//! Sent sounds go straight to the playback coordinator; everything else is
//! forwarded to the frontend.

use std::time::Duration;

use futures_util::{Stream, StreamExt};
use soundboard_bridge::{
    MessageFromBackend, notification::NotificationType, server::ServerEvent, sound::PlayRequest,
};
use tokio_tungstenite::{
    connect_async,
    tungstenite::{Error as WsError, Message},
};

use super::AppContextHandle;

const INITIAL_BACKOFF: Duration = Duration::from_secs(2);
const MAX_BACKOFF: Duration = Duration::from_secs(15);

fn next_backoff(current: Duration) -> Duration {
    (current * 2).min(MAX_BACKOFF)
}

/// Keeps a connection to `events_url` open for the lifetime of the backend,
/// reconnecting with exponential backoff.
pub async fn listen(context: AppContextHandle, events_url: String) {
    let mut backoff = INITIAL_BACKOFF;
    loop {
        match connect_async(events_url.as_str()).await {
            Ok((stream, _)) => {
                log::info!("Connected to server event feed at {events_url}");
                backoff = INITIAL_BACKOFF;
                read_events(&context, stream).await;
                context
                    .send_notification(
                        NotificationType::Warning,
                        "Lost connection to the soundboard server, reconnecting",
                    )
                    .await;
            }
            Err(error) => log::warn!("Failed to connect to {events_url}: {error}"),
        }

        log::debug!("Reconnecting to server event feed in {backoff:?}");
        tokio::time::sleep(backoff).await;
        backoff = next_backoff(backoff);
    }
}

/// Dispatches every event of `stream` until it closes or fails.
pub(crate) async fn read_events<S>(context: &AppContextHandle, mut stream: S)
where
    S: Stream<Item = Result<Message, WsError>> + Unpin,
{
    while let Some(message) = stream.next().await {
        match message {
            Ok(Message::Text(text)) => {
                if let Some(event) = parse_event(&text) {
                    dispatch_event(context, event).await;
                }
            }
            Ok(Message::Close(frame)) => {
                log::info!("Server closed the event feed: {frame:?}");
                break;
            }
            Ok(_) => {}
            Err(error) => {
                log::warn!("Server event feed failed: {error}");
                break;
            }
        }
    }
}

fn parse_event(text: &str) -> Option<ServerEvent> {
    serde_json::from_str(text)
        .inspect_err(|error| log::warn!("Skipping malformed server event {text:?}: {error}"))
        .ok()
}

async fn dispatch_event(context: &AppContextHandle, event: ServerEvent) {
    log::debug!("Server event: {event:?}");
    match event {
        ServerEvent::SoundSent {
            element_id,
            sound_id,
        } => {
            context
                .playback
                .play(PlayRequest::sent(element_id, sound_id))
                .await;
        }
        other => context.send(MessageFromBackend::ServerUpdate(other)).await,
    }
}

#[cfg(test)]
mod tests {
    use futures_util::stream;
    use soundboard_bridge::{
        config::Config,
        sound::{ElementId, SoundId, SoundOrigin},
    };

    use super::*;
    use crate::{playback::PlaybackCommand, services::test_support::test_context};

    #[test]
    fn backoff_doubles_up_to_the_cap() {
        let mut backoff = INITIAL_BACKOFF;
        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push(backoff.as_secs());
            backoff = next_backoff(backoff);
        }
        assert_eq!(seen, vec![2, 4, 8, 15, 15]);
    }

    #[tokio::test]
    async fn sent_sounds_play_with_sent_origin() {
        let mut test = test_context(Config::default());
        let frames = stream::iter(vec![Ok(Message::text(
            r#"{"type":"sound_sent","element_id":"slot-2","sound_id":"99"}"#,
        ))]);

        read_events(&test.context, frames).await;

        match test.playback_rx.recv().await {
            Some(PlaybackCommand::Play(request)) => {
                assert_eq!(request.element_id, Some(ElementId::slot(2)));
                assert_eq!(request.sound_id, SoundId::from("99"));
                assert_eq!(request.origin, SoundOrigin::Sent);
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert!(test.frontend_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn malformed_events_are_skipped_and_reading_stops_at_close() {
        let mut test = test_context(Config::default());
        let frames = stream::iter(vec![
            Ok(Message::text("{not json")),
            Ok(Message::text(r#"{"type":"listener_count","count":3}"#)),
            Ok(Message::Close(None)),
            Ok(Message::text(r#"{"type":"listener_count","count":4}"#)),
        ]);

        read_events(&test.context, frames).await;

        assert!(matches!(
            test.frontend_rx.try_recv(),
            Ok(MessageFromBackend::ServerUpdate(ServerEvent::ListenerCount { count: 3 }))
        ));
        assert!(test.frontend_rx.try_recv().is_err());
        assert!(test.playback_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn transport_error_ends_the_session() {
        let mut test = test_context(Config::default());
        let frames = stream::iter(vec![
            Err(WsError::ConnectionClosed),
            Ok(Message::text(r#"{"type":"send_sounds_enabled","enabled":true}"#)),
        ]);

        read_events(&test.context, frames).await;

        assert!(test.frontend_rx.try_recv().is_err());
    }
}
