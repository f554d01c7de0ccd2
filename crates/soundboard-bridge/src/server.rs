//! Events pushed by the soundboard server over its event feed.
//!
//! Every event is a JSON object tagged by `type`, e.g.
//! `{"type":"sound_sent","element_id":"stored-doug","sound_id":"12"}`.

use serde::{Deserialize, Serialize};

use crate::sound::{ElementId, SoundId, SoundSource};

/// A slot on the board. Empty slots have neither id nor name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct BoardSlot {
    #[serde(default)]
    pub sound_id: Option<SoundId>,
    #[serde(default)]
    pub name: Option<String>,
}

impl BoardSlot {
    pub fn is_empty(&self) -> bool {
        self.sound_id.is_none()
    }
}

/// The full board as known by the server: the bound slots plus every sound
/// file stored on the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct BoardSnapshot {
    pub slots: Vec<BoardSlot>,
    pub stored_sounds: Vec<SoundSource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Replaces the whole board.
    Board(BoardSnapshot),
    /// Someone sent a sound to the shared channel.
    SoundSent {
        #[serde(default)]
        element_id: Option<ElementId>,
        sound_id: SoundId,
    },
    /// Which stored sounds already sit on the board and whether a slot is free.
    AddSoundAvailability {
        hidden_sounds: Vec<String>,
        has_empty_slot: bool,
    },
    /// Whether the server can currently send sounds to the channel.
    SendSoundsEnabled { enabled: bool },
    /// Number of clients connected to the server.
    ListenerCount { count: u32 },
}
