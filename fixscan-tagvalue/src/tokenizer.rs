/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Zero-copy FIX line tokenizer.
//!
//! Splits one log line into tag=value pairs by a configurable one-byte
//! delimiter and routes each pair into a [`ParsedMessage`]: hot tags into
//! fixed slots, everything else into the overflow map, all tags into the
//! ordered sequence.
//!
//! Tokenization never fails outright. A structurally broken line still
//! yields a message, keeping whatever tags were routed before the fault
//! plus the fault itself, so the scan can emit the row with a
//! `parse_error` diagnostic instead of dropping it.

use fixscan_core::error::StructuralError;
use fixscan_core::message::ParsedMessage;
use memchr::memchr;

/// SOH (Start of Header), the canonical FIX field delimiter.
pub const SOH: u8 = 0x01;

/// Equals sign separating tag from value inside a segment.
const EQUALS: u8 = b'=';

/// Tokenizes one line into a [`ParsedMessage`] borrowing from `input`.
///
/// Empty segments (consecutive delimiters, trailing delimiter) are skipped.
/// The message is structurally valid iff at least one tag was read and the
/// MsgType slot (tag 35) is non-empty; otherwise the returned message
/// carries a [`StructuralError`].
///
/// # Arguments
/// * `input` - The line bytes, already stripped of the terminator
/// * `delimiter` - The one-byte field delimiter
#[must_use]
pub fn tokenize<'a>(input: &'a [u8], delimiter: u8) -> ParsedMessage<'a> {
    let mut msg = ParsedMessage::new(input);

    if input.is_empty() {
        msg.set_error(StructuralError::EmptyMessage);
        return msg;
    }

    let mut pos = 0;
    let mut tag_count = 0usize;

    while pos < input.len() {
        let end = memchr(delimiter, &input[pos..]).map_or(input.len(), |i| pos + i);
        let segment = &input[pos..end];

        if !segment.is_empty() {
            let Some(eq) = memchr(EQUALS, segment) else {
                msg.set_error(StructuralError::MissingEquals);
                return msg;
            };

            let Some(tag) = parse_tag(&segment[..eq]) else {
                msg.set_error(StructuralError::InvalidTag);
                return msg;
            };

            msg.record(tag, &segment[eq + 1..]);
            tag_count += 1;
        }

        pos = end + 1;
    }

    if tag_count == 0 {
        msg.set_error(StructuralError::NoTags);
        return msg;
    }

    if msg.msg_type().map_or(true, <[u8]>::is_empty) {
        msg.set_error(StructuralError::MissingMsgType);
    }

    msg
}

/// Parses a decimal tag number from ASCII bytes.
///
/// # Returns
/// The parsed tag, or `None` if the bytes are empty, too long, or contain a
/// non-digit.
#[inline]
fn parse_tag(bytes: &[u8]) -> Option<u32> {
    if bytes.is_empty() || bytes.len() > 10 {
        return None;
    }

    let mut result: u32 = 0;
    for &b in bytes {
        if !b.is_ascii_digit() {
            return None;
        }
        result = result.checked_mul(10)?.checked_add(u32::from(b - b'0'))?;
    }

    Some(result)
}
