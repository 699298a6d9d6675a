//! Playable audio clips.

use std::sync::Arc;

use super::error::PlaybackError;

/// Audio bytes that passed the MP3 sniff test.
#[derive(Debug, Clone)]
pub struct AudioClip {
    bytes: Arc<[u8]>,
}

impl AudioClip {
    /// Accepts `bytes` when they start with an ID3 tag or an MPEG frame
    /// sync.
    ///
    /// # Errors
    ///
    /// Returns `PlaybackError::Undecodable` for empty or unrecognized
    /// input.
    pub fn decode(bytes: Arc<[u8]>) -> Result<Self, PlaybackError> {
        match *bytes {
            [] => Err(PlaybackError::Undecodable("empty audio".to_owned())),
            [b'I', b'D', b'3', ..] => Ok(Self { bytes }),
            [0xFF, second, ..] if second & 0xE0 == 0xE0 => Ok(Self { bytes }),
            _ => Err(PlaybackError::Undecodable(
                "missing ID3 tag or MPEG frame sync".to_owned(),
            )),
        }
    }

    /// The underlying bytes.
    #[must_use]
    pub fn bytes(&self) -> &Arc<[u8]> {
        &self.bytes
    }
}
