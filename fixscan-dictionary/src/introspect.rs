/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Flat introspection catalogs over a loaded dictionary.
//!
//! These are trivial projections used by the catalog table surfaces: all
//! fields, per-message field usage, and the repeating-group inventory.
//! Rows are sorted (fields and groups by tag, message usage by msg_type)
//! so output is deterministic regardless of map iteration order.

use crate::schema::{Dictionary, EnumValue, GroupDef};
use std::collections::BTreeMap;

/// One row of the field catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCatalogRow {
    /// Field tag number.
    pub tag: u32,
    /// Field name.
    pub name: String,
    /// FIX wire-type label.
    pub type_name: String,
    /// Enumerated values, in declaration order.
    pub enums: Vec<EnumValue>,
}

/// How a field participates in a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldUsage {
    /// Declared `required="Y"` at message level.
    Required,
    /// Declared optional at message level.
    Optional,
    /// Member of a repeating group.
    Group,
}

impl FieldUsage {
    /// Returns the catalog label for this usage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Optional => "optional",
            Self::Group => "group",
        }
    }
}

/// One row of the per-message field usage catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageFieldRow {
    /// Message type symbol.
    pub msg_type: String,
    /// Message name.
    pub message: String,
    /// How the field participates.
    pub usage: FieldUsage,
    /// Field tag number.
    pub tag: u32,
    /// Field name, `"Unknown"` when the tag has no definition.
    pub field_name: String,
    /// True for message-level required fields.
    pub required: bool,
    /// Enclosing group's count tag for group members, `None` otherwise.
    pub group_id: Option<u32>,
}

/// One row of the repeating-group catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCatalogRow {
    /// The group's count tag.
    pub count_tag: u32,
    /// Group name from the field catalog, `"Unknown"` when undefined.
    pub name: String,
    /// Member tags in declaration order.
    pub member_tags: Vec<u32>,
    /// Message types referencing this group, deduplicated and sorted.
    pub message_types: Vec<String>,
}

/// Returns every field definition, sorted by tag.
#[must_use]
pub fn field_catalog(dict: &Dictionary) -> Vec<FieldCatalogRow> {
    let mut rows: Vec<FieldCatalogRow> = dict
        .fields
        .values()
        .map(|def| FieldCatalogRow {
            tag: def.tag,
            name: def.name.clone(),
            type_name: def.type_name.clone(),
            enums: def.enums.clone(),
        })
        .collect();
    rows.sort_by_key(|row| row.tag);
    rows
}

/// Returns per-message field usage, sorted by msg_type, walking group
/// members recursively through nested subgroups.
#[must_use]
pub fn message_field_catalog(dict: &Dictionary) -> Vec<MessageFieldRow> {
    let mut msg_types: Vec<&String> = dict.messages.keys().collect();
    msg_types.sort();

    let mut rows = Vec::new();
    for msg_type in msg_types {
        let msg = &dict.messages[msg_type];

        for &tag in &msg.required_tags {
            rows.push(MessageFieldRow {
                msg_type: msg.msg_type.clone(),
                message: msg.name.clone(),
                usage: FieldUsage::Required,
                tag,
                field_name: field_name(dict, tag),
                required: true,
                group_id: None,
            });
        }
        for &tag in &msg.optional_tags {
            rows.push(MessageFieldRow {
                msg_type: msg.msg_type.clone(),
                message: msg.name.clone(),
                usage: FieldUsage::Optional,
                tag,
                field_name: field_name(dict, tag),
                required: false,
                group_id: None,
            });
        }
        for group in msg.groups.values() {
            push_group_rows(dict, msg.msg_type.as_str(), msg.name.as_str(), group, &mut rows);
        }
    }
    rows
}

fn push_group_rows(
    dict: &Dictionary,
    msg_type: &str,
    message: &str,
    group: &GroupDef,
    rows: &mut Vec<MessageFieldRow>,
) {
    for &tag in &group.member_tags {
        rows.push(MessageFieldRow {
            msg_type: msg_type.to_string(),
            message: message.to_string(),
            usage: FieldUsage::Group,
            tag,
            field_name: field_name(dict, tag),
            required: false,
            group_id: Some(group.count_tag),
        });
    }
    for sub in group.subgroups.values() {
        push_group_rows(dict, msg_type, message, sub, rows);
    }
}

/// Returns the repeating-group inventory across all messages, sorted by
/// count tag, with referencing message types deduplicated and sorted.
#[must_use]
pub fn group_catalog(dict: &Dictionary) -> Vec<GroupCatalogRow> {
    let mut by_tag: BTreeMap<u32, GroupCatalogRow> = BTreeMap::new();

    for msg in dict.messages.values() {
        for group in msg.groups.values() {
            collect_group(dict, msg.msg_type.as_str(), group, &mut by_tag);
        }
    }

    let mut rows: Vec<GroupCatalogRow> = by_tag.into_values().collect();
    for row in &mut rows {
        row.message_types.sort();
        row.message_types.dedup();
    }
    rows
}

fn collect_group(
    dict: &Dictionary,
    msg_type: &str,
    group: &GroupDef,
    by_tag: &mut BTreeMap<u32, GroupCatalogRow>,
) {
    let entry = by_tag
        .entry(group.count_tag)
        .or_insert_with(|| GroupCatalogRow {
            count_tag: group.count_tag,
            name: field_name(dict, group.count_tag),
            member_tags: group.member_tags.clone(),
            message_types: Vec::new(),
        });
    entry.message_types.push(msg_type.to_string());

    for sub in group.subgroups.values() {
        collect_group(dict, msg_type, sub, by_tag);
    }
}

fn field_name(dict: &Dictionary, tag: u32) -> String {
    dict.field(tag)
        .map_or_else(|| "Unknown".to_string(), |def| def.name.clone())
}
