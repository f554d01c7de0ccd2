use std::{io::Cursor, time::Duration};

use kira::sound::{FromFileError, static_sound::StaticSoundData};

/// Errors that can occur while decoding a downloaded clip.
#[derive(Debug, thiserror::Error)]
pub enum ClipError {
    /// The payload is empty, so there is nothing to decode.
    #[error("clip payload is empty")]
    Empty,
    /// The payload is not in a supported format or is corrupted.
    #[error("failed to decode clip: {0}")]
    Decode(#[from] FromFileError),
}

/// A clip decoded into memory, ready to be played without stalling.
#[derive(Clone)]
pub struct Clip {
    data: StaticSoundData,
}

impl std::fmt::Debug for Clip {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Clip")
            .field("duration", &self.duration())
            .finish()
    }
}

impl Clip {
    /// Decodes an encoded clip (mp3, ogg, wav, flac) held in memory.
    pub fn decode(bytes: Vec<u8>) -> Result<Self, ClipError> {
        if bytes.is_empty() {
            return Err(ClipError::Empty);
        }
        let data = StaticSoundData::from_cursor(Cursor::new(bytes))?;
        Ok(Self { data })
    }

    /// Playback length of the clip.
    pub fn duration(&self) -> Duration {
        self.data.duration()
    }

    pub(crate) fn into_sound_data(self) -> StaticSoundData {
        self.data
    }
}

/// Builds a 16-bit mono PCM WAV file of silence.
#[cfg(test)]
pub(crate) fn silent_wav(sample_rate: u32, frames: u32) -> Vec<u8> {
    let data_len = frames * 2;
    let mut bytes = Vec::with_capacity(44 + data_len as usize);
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVEfmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
    bytes.extend_from_slice(&sample_rate.to_le_bytes());
    bytes.extend_from_slice(&(sample_rate * 2).to_le_bytes());
    bytes.extend_from_slice(&2u16.to_le_bytes());
    bytes.extend_from_slice(&16u16.to_le_bytes());
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    bytes.resize(44 + data_len as usize, 0);
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decoded_wav_reports_its_duration() {
        let clip = Clip::decode(silent_wav(8000, 4000)).unwrap();
        assert_eq!(clip.duration().as_millis(), 500);
    }

    #[test]
    fn empty_payload_is_rejected() {
        assert!(matches!(Clip::decode(Vec::new()), Err(ClipError::Empty)));
    }

    #[test]
    fn garbage_payload_fails_to_decode() {
        let garbage = b"definitely not an audio file".to_vec();
        assert!(matches!(Clip::decode(garbage), Err(ClipError::Decode(_))));
    }
}
