//! Frame codec for JSON-RPC messages on the host socket.
//!
//! Each frame is a 4-byte big-endian payload length followed by the UTF-8
//! JSON text of one [`Message`]:
//! ```text
//! +----------------+------------------+
//! |  4 bytes       |  N bytes         |
//! |  (length BE)   |  (JSON payload)  |
//! +----------------+------------------+
//! ```

use bytes::{Bytes, BytesMut};
use std::io;
use tokio_util::codec::{Decoder, Encoder, LengthDelimitedCodec};

use crate::protocol::Message;

/// Largest payload either side may send (1 MiB)
pub const MAX_FRAME_SIZE: usize = 1024 * 1024;

const LENGTH_PREFIX_SIZE: usize = 4;

/// Codec for length-prefixed JSON-RPC messages
#[derive(Debug)]
pub struct FrameCodec {
    frames: LengthDelimitedCodec,
    // Inner codec has consumed a length prefix and waits for its payload
    in_frame: bool,
}

impl FrameCodec {
    #[must_use]
    pub fn new() -> Self {
        let frames = LengthDelimitedCodec::builder()
            .length_field_length(LENGTH_PREFIX_SIZE)
            .big_endian()
            .max_frame_length(MAX_FRAME_SIZE)
            .new_codec();
        Self {
            frames,
            in_frame: false,
        }
    }
}

impl Default for FrameCodec {
    fn default() -> Self {
        Self::new()
    }
}

fn announced_length(src: &BytesMut) -> Option<usize> {
    let prefix: [u8; LENGTH_PREFIX_SIZE] = src.get(..LENGTH_PREFIX_SIZE)?.try_into().ok()?;
    Some(u32::from_be_bytes(prefix) as usize)
}

impl Decoder for FrameCodec {
    type Item = Message;
    type Error = CodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        // Checked up front so oversized frames get a typed error instead of a
        // bare InvalidData from the inner codec.
        if !self.in_frame
            && let Some(len) = announced_length(src)
            && len > MAX_FRAME_SIZE
        {
            return Err(CodecError::MessageTooLarge(len));
        }

        let buffered = src.len();
        let Some(payload) = self.frames.decode(src)? else {
            self.in_frame = self.in_frame || src.len() < buffered;
            return Ok(None);
        };
        self.in_frame = false;

        let json = std::str::from_utf8(&payload)?;
        Ok(Some(serde_json::from_str(json)?))
    }
}

impl Encoder<Message> for FrameCodec {
    type Error = CodecError;

    fn encode(&mut self, item: Message, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let json = serde_json::to_vec(&item)?;

        if json.len() > MAX_FRAME_SIZE {
            return Err(CodecError::MessageTooLarge(json.len()));
        }

        self.frames.encode(Bytes::from(json), dst)?;
        Ok(())
    }
}

/// Errors that can occur during codec operations
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("Message too large: {0} bytes (max: {MAX_FRAME_SIZE})")]
    MessageTooLarge(usize),
}
