use soundboard_bridge::sound::PlayRequest;

/// Handles a play request (see
/// [`soundboard_bridge::MessageToBackend::PlaySoundRequest`]).
pub async fn handle_play_request(context: super::AppContextHandle, request: PlayRequest) {
    context.playback.play(request).await;
}

/// Handles a highlight-only request (see
/// [`soundboard_bridge::MessageToBackend::PreviewSoundRequest`]).
pub async fn handle_preview_request(context: super::AppContextHandle, request: PlayRequest) {
    context.playback.preview(request).await;
}
