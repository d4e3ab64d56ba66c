/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Dictionary-driven repeating-group reconstruction.
//!
//! FIX repeating groups are positional: the count tag announces how many
//! instances follow, and the recurrence of the first member tag (the
//! delimiter tag) marks each instance boundary. Reconstruction therefore
//! walks the ordered tag sequence, not the overflow map.
//!
//! The declared count is an upper bound only: short or absent data
//! truncates silently, and the first non-member tag ends collection.
//! Nested subgroup definitions are not expanded: subgroup tags either
//! appear inline (when listed in the member set) or terminate the
//! instance. No content validation is performed.

use fixscan_core::message::ParsedMessage;
use fixscan_dictionary::{Dictionary, GroupDef};
use tracing::trace;

/// Sanity ceiling on the declared instance count; anything larger is
/// treated as absent.
pub const MAX_GROUP_COUNT: i64 = 100;

/// One reconstructed instance: member tag/value pairs in wire order.
pub type GroupInstance<'a> = Vec<(u32, &'a [u8])>;

/// Reconstructed groups for one message: count tag → instances, ordered by
/// count tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupValues<'a> {
    /// Per-count-tag instance lists; every list is non-empty.
    pub groups: Vec<(u32, Vec<GroupInstance<'a>>)>,
}

/// Reconstructs the repeating groups declared for this message's type.
///
/// Returns `None` when the message type is unknown to the dictionary, no
/// declared group is present with a usable count, or no instance could be
/// collected.
#[must_use]
pub fn parse_groups<'a>(
    msg: &ParsedMessage<'a>,
    dictionary: &Dictionary,
) -> Option<GroupValues<'a>> {
    if msg.ordered().is_empty() {
        return None;
    }
    let msg_type = std::str::from_utf8(msg.msg_type()?).ok()?;
    let message_def = dictionary.message(msg_type)?;

    let mut groups = Vec::new();
    for (&count_tag, group_def) in &message_def.groups {
        let count = declared_count(msg, count_tag);
        if count == 0 || group_def.member_tags.is_empty() {
            continue;
        }

        let Some(start) = msg.ordered().iter().position(|t| t.tag == count_tag) else {
            continue;
        };

        let instances = collect_instances(msg, start + 1, count, group_def);
        if !instances.is_empty() {
            trace!(count_tag, instances = instances.len(), "reconstructed group");
            groups.push((count_tag, instances));
        }
    }

    if groups.is_empty() {
        None
    } else {
        Some(GroupValues { groups })
    }
}

/// Reads the declared instance count from the overflow map. Absent,
/// unparseable, non-positive, or implausibly large counts all read as 0.
fn declared_count(msg: &ParsedMessage<'_>, count_tag: u32) -> i64 {
    let Some(value) = msg.overflow().get(&count_tag) else {
        return 0;
    };
    let count = std::str::from_utf8(value)
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .unwrap_or(0);

    if count <= 0 || count > MAX_GROUP_COUNT {
        0
    } else {
        count
    }
}

/// Collects up to `count` instances starting at `start` in the ordered
/// sequence. An instance ends when the next tag is the delimiter tag
/// (a new instance begins) or is not a member (collection stops).
fn collect_instances<'a>(
    msg: &ParsedMessage<'a>,
    start: usize,
    count: i64,
    group_def: &GroupDef,
) -> Vec<GroupInstance<'a>> {
    let ordered = msg.ordered();
    let delimiter = group_def.member_tags[0];
    let mut instances = Vec::new();
    let mut pos = start;

    for _ in 0..count {
        if pos >= ordered.len() || !group_def.is_member(ordered[pos].tag) {
            break;
        }

        let mut instance: GroupInstance<'a> = Vec::new();
        while pos < ordered.len() && group_def.is_member(ordered[pos].tag) {
            instance.push((ordered[pos].tag, ordered[pos].value));
            pos += 1;
            if pos < ordered.len() && ordered[pos].tag == delimiter {
                break;
            }
        }
        instances.push(instance);
    }

    instances
}
