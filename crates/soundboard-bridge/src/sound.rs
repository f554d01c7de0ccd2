use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a sound resource on the CDN.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct SoundId(String);

impl SoundId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SoundId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl From<&str> for SoundId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for SoundId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Identifier of a sound element on the board (a slot or a stored sound
/// card).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Element of the board slot at `index`.
    pub fn slot(index: usize) -> Self {
        Self(format!("slot-{index}"))
    }

    /// Element of the stored sound card named `name`.
    pub fn stored(name: &str) -> Self {
        Self(format!("stored-{name}"))
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Where a play request came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SoundOrigin {
    /// Triggered directly by the local user.
    #[default]
    Local,
    /// Broadcast by the server after someone sent the sound.
    Sent,
}

impl SoundOrigin {
    pub fn is_sent(self) -> bool {
        matches!(self, SoundOrigin::Sent)
    }
}

/// A request to load (and possibly play) one sound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayRequest {
    /// Element to highlight while the clip plays, if any.
    pub element_id: Option<ElementId>,
    pub sound_id: SoundId,
    pub origin: SoundOrigin,
}

impl PlayRequest {
    /// A locally triggered request.
    pub fn local(element_id: Option<ElementId>, sound_id: SoundId) -> Self {
        Self {
            element_id,
            sound_id,
            origin: SoundOrigin::Local,
        }
    }

    /// A request for a sound broadcast by the server.
    pub fn sent(element_id: Option<ElementId>, sound_id: SoundId) -> Self {
        Self {
            element_id,
            sound_id,
            origin: SoundOrigin::Sent,
        }
    }
}

/// Visual state of a sound element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HighlightState {
    #[default]
    Neutral,
    /// The element's clip is currently playing.
    Active,
}

/// A sound file that can be dragged onto a slot: a name plus its extension
/// (including the leading dot, e.g. `.mp3`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct SoundSource {
    pub name: String,
    pub extension: String,
}

impl SoundSource {
    /// Builds a source from the optional name/extension pair carried by a
    /// drag element. Both parts are required and must be non-empty.
    pub fn from_parts(name: Option<&str>, extension: Option<&str>) -> Option<Self> {
        match (name, extension) {
            (Some(name), Some(extension)) if !name.is_empty() && !extension.is_empty() => {
                Some(Self {
                    name: name.to_owned(),
                    extension: extension.to_owned(),
                })
            }
            _ => None,
        }
    }

    /// The file location the server knows the sound by.
    pub fn location(&self) -> String {
        format!("{}{}", self.name, self.extension)
    }
}

/// `add` part of a swap: the sound to upload into the slot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSound {
    pub sound_location: String,
}

/// `delete` part of a swap: the sound currently bound to the slot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DeleteSound {
    #[serde(rename = "soundID")]
    pub sound_id: SoundId,
}

/// Body of `POST /swap-sound`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SwapRequest {
    pub add: AddSound,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<DeleteSound>,
}

impl SwapRequest {
    /// Builds the request for dropping `source` onto a slot that currently
    /// holds `replaced` (if anything).
    pub fn new(source: &SoundSource, replaced: Option<&SoundId>) -> Self {
        Self {
            add: AddSound {
                sound_location: source.location(),
            },
            delete: replaced.map(|sound_id| DeleteSound {
                sound_id: sound_id.clone(),
            }),
        }
    }
}

/// Parameters of `GET /quickplay`: send a stored sound to the shared channel.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickplayRequest {
    /// Stored sound name without extension.
    pub sound_location: String,
    /// Element the server echoes back when it broadcasts the sound.
    pub ordinal: ElementId,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn foo_mp3() -> SoundSource {
        SoundSource::from_parts(Some("foo"), Some(".mp3")).unwrap()
    }

    #[test]
    fn swap_with_replaced_sound_matches_wire_format() {
        let request = SwapRequest::new(&foo_mp3(), Some(&SoundId::from("42")));
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"add":{"soundLocation":"foo.mp3"},"delete":{"soundID":"42"}}"#
        );
    }

    #[test]
    fn swap_into_empty_slot_has_no_delete_field() {
        let request = SwapRequest::new(&foo_mp3(), None);
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"add":{"soundLocation":"foo.mp3"}}"#
        );
    }

    #[test]
    fn source_requires_both_parts() {
        assert_eq!(SoundSource::from_parts(Some("foo"), None), None);
        assert_eq!(SoundSource::from_parts(None, Some(".mp3")), None);
        assert_eq!(SoundSource::from_parts(Some("foo"), Some("")), None);
        assert_eq!(foo_mp3().location(), "foo.mp3");
    }

    #[test]
    fn quickplay_uses_camel_case_keys() {
        let request = QuickplayRequest {
            sound_location: "doug".to_owned(),
            ordinal: ElementId::stored("doug"),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({ "soundLocation": "doug", "ordinal": "stored-doug" })
        );
    }

    #[test]
    fn origin_defaults_to_local() {
        assert_eq!(SoundOrigin::default(), SoundOrigin::Local);
        assert!(PlayRequest::sent(None, SoundId::from("1")).origin.is_sent());
    }
}
