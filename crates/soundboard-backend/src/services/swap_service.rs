//! Slot reassignment through `POST /swap-sound`.

use soundboard_bridge::sound::SwapRequest;

/// Errors that can occur while submitting a swap.
#[derive(Debug, thiserror::Error)]
pub enum SwapError {
    /// The request could not be sent or the connection failed.
    #[error("swap request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("server rejected swap with status {0}")]
    Status(reqwest::StatusCode),
}

/// Posts `request` as JSON to `{base_url}/swap-sound`. The response body is
/// not consumed.
pub(crate) async fn submit_swap(
    client: &reqwest::Client,
    base_url: &str,
    request: &SwapRequest,
) -> Result<(), SwapError> {
    let url = format!("{}/swap-sound", base_url.trim_end_matches('/'));
    let response = client.post(url).json(request).send().await?;
    if !response.status().is_success() {
        return Err(SwapError::Status(response.status()));
    }
    Ok(())
}

/// Handles a swap request (see
/// [`soundboard_bridge::MessageToBackend::SwapSoundRequest`]).
///
/// The request is submitted on its own task so the dispatch loop never waits
/// on the server. Failures are only logged.
pub async fn handle_swap_request(context: super::AppContextHandle, request: SwapRequest) {
    let (client, base_url) = {
        let state = context.state.read().await;
        (state.request_client.clone(), state.config.server.base_url.clone())
    };

    log::info!(
        "Swapping in {} (replacing {:?})",
        request.add.sound_location,
        request.delete.as_ref().map(|delete| &delete.sound_id)
    );
    tokio::spawn(async move {
        if let Err(error) = submit_swap(&client, &base_url, &request).await {
            log::warn!("Failed to swap sound {}: {error}", request.add.sound_location);
        }
    });
}
