/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Zero-copy parsed message.
//!
//! This module provides:
//! - [`TagRef`]: one tag/value pair borrowed from the line buffer
//! - [`ParsedMessage`]: the result of tokenizing a single log line
//!
//! A parsed message routes every tag three ways: hot tags land in fixed
//! slots, everything else lands in the overflow map, and ALL tags are
//! appended to an ordered sequence. The ordered sequence is what makes
//! repeating-group reconstruction possible: FIX groups are delimited
//! positionally, and a map alone loses the wire order.

use crate::error::StructuralError;
use crate::hot::{HotSlot, NUM_HOT_TAGS};
use smallvec::SmallVec;
use std::collections::HashMap;

/// One tag/value pair borrowed from a message buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagRef<'a> {
    /// The field tag number.
    pub tag: u32,
    /// The value bytes (without delimiters), possibly empty.
    pub value: &'a [u8],
}

impl<'a> TagRef<'a> {
    /// Creates a new tag reference.
    ///
    /// # Arguments
    /// * `tag` - The field tag number
    /// * `value` - Reference to the value bytes
    #[inline]
    #[must_use]
    pub const fn new(tag: u32, value: &'a [u8]) -> Self {
        Self { tag, value }
    }

    /// Returns the value as a string slice, if it is valid UTF-8.
    #[must_use]
    pub fn as_str(&self) -> Option<&'a str> {
        std::str::from_utf8(self.value).ok()
    }

    /// Returns the length of the value in bytes.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.value.len()
    }

    /// Returns true if the value is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// Zero-copy view of one tokenized FIX log line.
///
/// Borrows every value from the line buffer it was tokenized from; the
/// buffer must outlive the message. Constructed for each line and discarded
/// at row emission.
#[derive(Debug, Clone)]
pub struct ParsedMessage<'a> {
    /// Hot slot values, indexed by [`HotSlot`].
    hot: [Option<&'a [u8]>; NUM_HOT_TAGS],
    /// Every non-hot tag; duplicate tags keep the last occurrence only.
    overflow: HashMap<u32, &'a [u8]>,
    /// Every tag in wire order, duplicates included.
    ordered: SmallVec<[TagRef<'a>; 32]>,
    /// The raw line buffer.
    raw: &'a [u8],
    /// Structural failure, if tokenization did not produce a usable message.
    error: Option<StructuralError>,
}

impl<'a> ParsedMessage<'a> {
    /// Creates an empty parsed message over a raw line buffer.
    #[must_use]
    pub fn new(raw: &'a [u8]) -> Self {
        Self {
            hot: [None; NUM_HOT_TAGS],
            overflow: HashMap::new(),
            ordered: SmallVec::new(),
            raw,
            error: None,
        }
    }

    /// Records one tag/value pair, routing it to its hot slot or the
    /// overflow map and appending it to the ordered sequence.
    ///
    /// For duplicate non-hot tags the overflow map keeps the last write;
    /// the ordered sequence keeps every occurrence.
    pub fn record(&mut self, tag: u32, value: &'a [u8]) {
        self.ordered.push(TagRef::new(tag, value));
        match HotSlot::from_tag(tag) {
            Some(slot) => self.hot[slot.index()] = Some(value),
            None => {
                self.overflow.insert(tag, value);
            }
        }
    }

    /// Marks the message as structurally broken.
    pub fn set_error(&mut self, error: StructuralError) {
        self.error = Some(error);
    }

    /// Returns the structural error, if any.
    #[inline]
    #[must_use]
    pub const fn error(&self) -> Option<StructuralError> {
        self.error
    }

    /// Returns the value of a hot slot.
    #[inline]
    #[must_use]
    pub fn hot(&self, slot: HotSlot) -> Option<&'a [u8]> {
        self.hot[slot.index()]
    }

    /// Returns the MsgType (tag 35) value.
    #[inline]
    #[must_use]
    pub fn msg_type(&self) -> Option<&'a [u8]> {
        self.hot(HotSlot::MsgType)
    }

    /// Looks a tag up: hot slots first, then the overflow map.
    #[must_use]
    pub fn get(&self, tag: u32) -> Option<&'a [u8]> {
        match HotSlot::from_tag(tag) {
            Some(slot) => self.hot(slot),
            None => self.overflow.get(&tag).copied(),
        }
    }

    /// Returns the overflow map (every non-hot tag, last occurrence).
    #[inline]
    #[must_use]
    pub fn overflow(&self) -> &HashMap<u32, &'a [u8]> {
        &self.overflow
    }

    /// Returns all tags in wire order, duplicates included.
    #[inline]
    #[must_use]
    pub fn ordered(&self) -> &[TagRef<'a>] {
        &self.ordered
    }

    /// Returns the raw line buffer.
    #[inline]
    #[must_use]
    pub const fn raw(&self) -> &'a [u8] {
        self.raw
    }

    /// Returns the number of tags recorded (duplicates included).
    #[inline]
    #[must_use]
    pub fn tag_count(&self) -> usize {
        self.ordered.len()
    }
}
