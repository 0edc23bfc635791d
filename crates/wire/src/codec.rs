//! Line codec
//!
//! One JSON message per line, `\n`-terminated. Blank lines are skipped on
//! read. Writes append the delimiter and flush so the peer sees every reply
//! as soon as it is produced.

use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::WireError;
use crate::message::{Envelope, Message};

const LINE_ENDINGS: &[char] = &['\n', '\r'];

/// Decode one line into a [`Message`]
pub fn decode_line(line: &str) -> Result<Message, WireError> {
    Ok(serde_json::from_str(line.trim_end_matches(LINE_ENDINGS))?)
}

/// Decode only the addressing fields of a line
///
/// Used after [`decode_line`] fails, to find out who to send the error to.
pub fn decode_envelope(line: &str) -> Result<Envelope, WireError> {
    Ok(serde_json::from_str(line.trim_end_matches(LINE_ENDINGS))?)
}

/// Encode a message as a single line, without the trailing delimiter
pub fn encode_line(message: &Message) -> Result<String, WireError> {
    Ok(serde_json::to_string(message)?)
}

/// Read the next non-blank line.
///
/// Returns `Ok(None)` at end of input. The returned line has its line
/// ending stripped.
pub async fn read_line<R>(reader: &mut R) -> io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = String::new();
    loop {
        line.clear();
        let bytes = reader.read_line(&mut line).await?;
        if bytes == 0 {
            return Ok(None);
        }

        let trimmed = line.trim_end_matches(LINE_ENDINGS);
        if trimmed.trim().is_empty() {
            continue;
        }
        return Ok(Some(trimmed.to_owned()));
    }
}

/// Encode `message`, write it followed by `\n`, and flush.
pub async fn write_message<W>(writer: &mut W, message: &Message) -> Result<(), WireError>
where
    W: AsyncWrite + Unpin,
{
    let mut encoded = serde_json::to_vec(message)?;
    encoded.push(b'\n');
    writer.write_all(&encoded).await?;
    writer.flush().await?;
    Ok(())
}
