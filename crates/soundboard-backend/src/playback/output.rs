use std::{sync::Arc, time::Duration};

use futures_util::{FutureExt, future::BoxFuture};
use soundboard_audio::{
    clip::{Clip, ClipError},
    engine::{AudioEngine, EngineError, PlaybackId},
};
use soundboard_bridge::{config::AudioConfig, sound::SoundId};

/// Errors that can occur while loading or starting a clip.
#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    /// The clip could not be downloaded.
    #[error("failed to fetch clip: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error(transparent)]
    Decode(#[from] ClipError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    /// The decoding task panicked or was cancelled.
    #[error("clip decoding task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    /// No audio output device was available when the backend started.
    #[error("no audio output is available")]
    NoOutput,
}

/// Where the coordinator loads clips from and plays them on.
pub(crate) trait AudioOutput: Send + Sync + 'static {
    /// A clip loaded far enough to play without stalling.
    type Clip: Send + 'static;
    /// A started playback that can be stopped.
    type Playback: Send + 'static;

    fn load(&self, sound_id: SoundId) -> BoxFuture<'static, Result<Self::Clip, PlaybackError>>;
    fn clip_duration(&self, clip: &Self::Clip) -> Duration;
    fn play(&self, clip: Self::Clip) -> Result<Self::Playback, PlaybackError>;
    /// Silences a superseded playback and releases it.
    fn stop(&self, playback: &Self::Playback);
}

/// Downloads the clip at `url` and decodes it off the async workers.
async fn fetch_clip(client: &reqwest::Client, url: &str) -> Result<Clip, PlaybackError> {
    let bytes = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;
    let clip = tokio::task::spawn_blocking(move || Clip::decode(bytes.to_vec())).await??;
    Ok(clip)
}

/// Downloads clips from the sound CDN and plays them on the audio engine.
///
/// Without an engine clips still load, but every playback fails with
/// [`PlaybackError::NoOutput`].
pub(crate) struct CdnAudioOutput {
    client: reqwest::Client,
    audio: AudioConfig,
    engine: Option<Arc<AudioEngine>>,
}

impl CdnAudioOutput {
    pub fn new(
        client: reqwest::Client,
        audio: AudioConfig,
        engine: Option<Arc<AudioEngine>>,
    ) -> Self {
        Self {
            client,
            audio,
            engine,
        }
    }
}

impl AudioOutput for CdnAudioOutput {
    type Clip = Clip;
    type Playback = PlaybackId;

    fn load(&self, sound_id: SoundId) -> BoxFuture<'static, Result<Clip, PlaybackError>> {
        let client = self.client.clone();
        let url = self.audio.sound_url(&sound_id);
        async move {
            log::debug!("Fetching clip {sound_id} from {url}");
            fetch_clip(&client, &url).await
        }
        .boxed()
    }

    fn clip_duration(&self, clip: &Clip) -> Duration {
        clip.duration()
    }

    fn play(&self, clip: Clip) -> Result<PlaybackId, PlaybackError> {
        let engine = self.engine.as_ref().ok_or(PlaybackError::NoOutput)?;
        Ok(engine.play(clip)?)
    }

    fn stop(&self, playback: &PlaybackId) {
        let Some(engine) = &self.engine else {
            return;
        };
        if let Err(error) = engine.stop(*playback) {
            log::warn!("Failed to stop playback {playback:?}: {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    /// One second of 16-bit mono silence at 8 kHz.
    fn one_second_wav() -> Vec<u8> {
        let data_len: u32 = 16_000;
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
        bytes.extend_from_slice(b"WAVEfmt ");
        bytes.extend_from_slice(&16u32.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes());
        bytes.extend_from_slice(&8000u32.to_le_bytes());
        bytes.extend_from_slice(&16_000u32.to_le_bytes());
        bytes.extend_from_slice(&2u16.to_le_bytes());
        bytes.extend_from_slice(&16u16.to_le_bytes());
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&data_len.to_le_bytes());
        bytes.resize(44 + data_len as usize, 0);
        bytes
    }

    #[tokio::test]
    async fn fetches_and_decodes_a_clip() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/soundboard-sounds/1234"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(one_second_wav()))
            .expect(1)
            .mount(&server)
            .await;

        let audio = AudioConfig {
            cdn_base_url: format!("{}/soundboard-sounds/", server.uri()),
        };
        let url = audio.sound_url(&SoundId::from("1234"));
        let clip = fetch_clip(&reqwest::Client::new(), &url).await.unwrap();

        assert_eq!(clip.duration(), Duration::from_secs(1));
    }

    #[tokio::test]
    async fn missing_clip_is_a_fetch_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let result = fetch_clip(&reqwest::Client::new(), &format!("{}/nope", server.uri())).await;

        assert!(matches!(result, Err(PlaybackError::Fetch(_))));
    }

    #[tokio::test]
    async fn output_without_an_engine_loads_but_cannot_play() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/soundboard-sounds/1234"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(one_second_wav()))
            .mount(&server)
            .await;
        let audio = AudioConfig {
            cdn_base_url: format!("{}/soundboard-sounds/", server.uri()),
        };
        let output = CdnAudioOutput::new(reqwest::Client::new(), audio, None);

        let clip = output.load(SoundId::from("1234")).await.unwrap();

        assert_eq!(output.clip_duration(&clip), Duration::from_secs(1));
        assert!(matches!(output.play(clip), Err(PlaybackError::NoOutput)));
    }
}
