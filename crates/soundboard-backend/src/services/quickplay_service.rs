//! Sending a stored sound to the shared channel through `GET /quickplay`.

use soundboard_bridge::sound::QuickplayRequest;

use super::swap_service::SwapError;

/// Asks the server to send a stored sound. The server echoes the sound back
/// over the event feed once it went out, which is what plays it locally.
pub(crate) async fn submit_quickplay(
    client: &reqwest::Client,
    base_url: &str,
    request: &QuickplayRequest,
) -> Result<(), SwapError> {
    let url = format!("{}/quickplay", base_url.trim_end_matches('/'));
    let response = client.get(url).query(request).send().await?;
    if !response.status().is_success() {
        return Err(SwapError::Status(response.status()));
    }
    Ok(())
}

/// Handles a quickplay request (see
/// [`soundboard_bridge::MessageToBackend::QuickplayRequest`]).
pub async fn handle_quickplay_request(context: super::AppContextHandle, request: QuickplayRequest) {
    let (client, base_url) = {
        let state = context.state.read().await;
        (state.request_client.clone(), state.config.server.base_url.clone())
    };

    log::info!("Sending stored sound {}", request.sound_location);
    tokio::spawn(async move {
        if let Err(error) = submit_quickplay(&client, &base_url, &request).await {
            log::warn!("Failed to send sound {}: {error}", request.sound_location);
        }
    });
}

#[cfg(test)]
mod tests {
    use soundboard_bridge::sound::ElementId;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    use super::*;

    #[tokio::test]
    async fn sends_location_and_ordinal_as_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/quickplay"))
            .and(query_param("soundLocation", "doug"))
            .and(query_param("ordinal", "stored-doug"))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        let request = QuickplayRequest {
            sound_location: "doug".to_owned(),
            ordinal: ElementId::stored("doug"),
        };
        submit_quickplay(&reqwest::Client::new(), &server.uri(), &request)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn bad_request_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;

        let request = QuickplayRequest {
            sound_location: String::new(),
            ordinal: ElementId::slot(0),
        };
        let result = submit_quickplay(&reqwest::Client::new(), &server.uri(), &request).await;

        assert!(matches!(result, Err(SwapError::Status(_))));
    }
}
