use serde::{Deserialize, Serialize};

/// Where the soundboard server lives. Both the HTTP endpoints and the event
/// feed are served by the same process.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Origin used for `/swap-sound` and `/quickplay`.
    pub base_url: String,
    /// WebSocket address of the server event feed.
    pub events_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_owned(),
            events_url: "ws://127.0.0.1:3000/ws".to_owned(),
        }
    }
}

/// Configuration for fetching sound clips.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Base address of the sound CDN. A clip address is this value with the
    /// sound identifier appended verbatim.
    pub cdn_base_url: String,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            cdn_base_url: "https://cdn.discordapp.com/soundboard-sounds/".to_owned(),
        }
    }
}

impl AudioConfig {
    /// Builds the address of the clip for `sound_id`.
    pub fn sound_url(&self, sound_id: &crate::sound::SoundId) -> String {
        format!("{}{}", self.cdn_base_url, sound_id)
    }
}

/// Global application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Soundboard server endpoints.
    pub server: ServerConfig,
    /// Clip source settings.
    pub audio: AudioConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sound::SoundId;

    #[test]
    fn sound_url_is_a_plain_concatenation() {
        let audio = AudioConfig::default();
        assert_eq!(
            audio.sound_url(&SoundId::from("1239382282930884608")),
            "https://cdn.discordapp.com/soundboard-sounds/1239382282930884608"
        );
    }
}
