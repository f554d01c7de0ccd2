/// Identifies one of the persisted boolean preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceKey {
    /// Silences every sound, local or sent.
    MuteSounds,
    /// Plays sounds sent by other listeners instead of locally triggered ones.
    PlaySendSounds,
}

impl PreferenceKey {
    pub const ALL: [PreferenceKey; 2] = [PreferenceKey::MuteSounds, PreferenceKey::PlaySendSounds];

    /// The stable key under which the value is stored.
    pub fn storage_key(self) -> &'static str {
        match self {
            PreferenceKey::MuteSounds => "mute-sounds-checkbox",
            PreferenceKey::PlaySendSounds => "play-send-sounds-checkbox",
        }
    }

    /// Decodes a stored string. Only the literal `"true"` reads as set;
    /// a missing value or any other string reads as unset.
    pub fn decode(raw: Option<&str>) -> bool {
        raw == Some("true")
    }

    /// Encodes a value in the stored string form.
    pub fn encode(value: bool) -> &'static str {
        if value { "true" } else { "false" }
    }
}

/// Snapshot of every preference value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Preferences {
    pub muted: bool,
    pub play_send_sounds: bool,
}

impl Preferences {
    pub fn get(&self, key: PreferenceKey) -> bool {
        match key {
            PreferenceKey::MuteSounds => self.muted,
            PreferenceKey::PlaySendSounds => self.play_send_sounds,
        }
    }

    pub fn set(&mut self, key: PreferenceKey, value: bool) {
        match key {
            PreferenceKey::MuteSounds => self.muted = value,
            PreferenceKey::PlaySendSounds => self.play_send_sounds = value,
        }
    }
}
