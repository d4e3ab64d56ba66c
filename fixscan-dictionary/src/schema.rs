/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Schema definitions for FIX dictionaries.
//!
//! This module defines the structures that represent a FIX dialect:
//! - [`FieldDef`]: Field definitions with tag, name, wire-type label, and enums
//! - [`GroupDef`]: Repeating group definitions, possibly nested
//! - [`ComponentDef`]: Reusable component definitions (loader-internal;
//!   expanded into messages during load)
//! - [`MessageDef`]: Message definitions with required/optional tags and groups
//! - [`Dictionary`]: The complete dialect
//!
//! The wire-type label on a field (`STRING`, `PRICE`, `UTCTIMESTAMP`, ...) is
//! carried as an opaque string for introspection; it is not a coercion
//! instruction. Typed output columns are fixed by the hot-tag catalog.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// One enumerated value of a FIX field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    /// The wire symbol (e.g. `"1"`, `"D"`).
    pub value: String,
    /// The human-readable description (e.g. `"BUY"`).
    pub description: String,
}

/// Definition of a FIX field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field tag number.
    pub tag: u32,
    /// Field name.
    pub name: String,
    /// FIX wire-type label, kept opaque.
    pub type_name: String,
    /// Enumerated values, in declaration order.
    pub enums: Vec<EnumValue>,
}

impl FieldDef {
    /// Creates a new field definition without enum values.
    ///
    /// # Arguments
    /// * `tag` - The field tag number
    /// * `name` - The field name
    /// * `type_name` - The FIX wire-type label
    #[must_use]
    pub fn new(tag: u32, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            tag,
            name: name.into(),
            type_name: type_name.into(),
            enums: Vec::new(),
        }
    }
}

/// Definition of a repeating group.
///
/// The count tag IS the field whose numeric value announces the number of
/// instances; the first member tag is the delimiter whose recurrence marks
/// an instance boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDef {
    /// Tag of the count field (NumInGroup).
    pub count_tag: u32,
    /// Member tags in declaration order; the first one delimits instances.
    pub member_tags: Vec<u32>,
    /// Nested groups, keyed by their count tag.
    pub subgroups: BTreeMap<u32, GroupDef>,
}

impl GroupDef {
    /// Returns the delimiter tag (the first member), or `None` for an
    /// empty member list.
    #[must_use]
    pub fn delimiter_tag(&self) -> Option<u32> {
        self.member_tags.first().copied()
    }

    /// Returns true if `tag` is a direct member of this group.
    #[must_use]
    pub fn is_member(&self, tag: u32) -> bool {
        self.member_tags.contains(&tag)
    }
}

/// Definition of a reusable component.
///
/// Components only exist while loading; their content is merged into every
/// message that references them, and they never surface at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentDef {
    /// Component name.
    pub name: String,
    /// Member field tags in declaration order.
    pub member_tags: Vec<u32>,
    /// Groups declared inside the component, keyed by count tag.
    pub groups: BTreeMap<u32, GroupDef>,
}

/// Definition of a FIX message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDef {
    /// Message name (e.g. `"NewOrderSingle"`).
    pub name: String,
    /// Message type symbol (tag 35 value, e.g. `"D"`).
    pub msg_type: String,
    /// Tags marked `required="Y"`, in declaration order. Recorded for
    /// introspection; presence is not enforced at parse time.
    pub required_tags: Vec<u32>,
    /// Remaining declared tags, in declaration order.
    pub optional_tags: Vec<u32>,
    /// Repeating groups, keyed by count tag.
    pub groups: BTreeMap<u32, GroupDef>,
}

impl MessageDef {
    /// Creates an empty message definition.
    #[must_use]
    pub fn new(name: impl Into<String>, msg_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            msg_type: msg_type.into(),
            required_tags: Vec::new(),
            optional_tags: Vec::new(),
            groups: BTreeMap::new(),
        }
    }
}

/// Complete FIX dictionary for one dialect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dictionary {
    /// Field definitions indexed by tag.
    pub fields: HashMap<u32, FieldDef>,
    /// Message definitions indexed by msg_type symbol.
    pub messages: HashMap<String, MessageDef>,
    /// Component definitions indexed by name (loader-internal).
    pub components: HashMap<String, ComponentDef>,
    /// Reverse index from field name to tag.
    pub name_to_tag: HashMap<String, u32>,
}

impl Dictionary {
    /// Creates an empty dictionary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field definition, replacing any previous definition with the
    /// same tag and updating the name index.
    pub fn add_field(&mut self, field: FieldDef) {
        self.name_to_tag.insert(field.name.clone(), field.tag);
        self.fields.insert(field.tag, field);
    }

    /// Gets a field definition by tag.
    #[must_use]
    pub fn field(&self, tag: u32) -> Option<&FieldDef> {
        self.fields.get(&tag)
    }

    /// Resolves a field name to its tag.
    #[must_use]
    pub fn tag_by_name(&self, name: &str) -> Option<u32> {
        self.name_to_tag.get(name).copied()
    }

    /// Gets a message definition by msg_type symbol.
    #[must_use]
    pub fn message(&self, msg_type: &str) -> Option<&MessageDef> {
        self.messages.get(msg_type)
    }

    /// Returns the column name for a tag: the dictionary name when known,
    /// `Tag<N>` otherwise.
    #[must_use]
    pub fn column_name(&self, tag: u32) -> String {
        match self.field(tag) {
            Some(def) => def.name.clone(),
            None => format!("Tag{tag}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_field_updates_name_index() {
        let mut dict = Dictionary::new();
        dict.add_field(FieldDef::new(35, "MsgType", "STRING"));

        assert_eq!(dict.tag_by_name("MsgType"), Some(35));
        assert_eq!(dict.field(35).unwrap().name, "MsgType");
        assert!(dict.field(999).is_none());
    }

    #[test]
    fn test_column_name_falls_back_to_tag_number() {
        let mut dict = Dictionary::new();
        dict.add_field(FieldDef::new(60, "TransactTime", "UTCTIMESTAMP"));

        assert_eq!(dict.column_name(60), "TransactTime");
        assert_eq!(dict.column_name(9999), "Tag9999");
    }

    #[test]
    fn test_group_delimiter_tag() {
        let group = GroupDef {
            count_tag: 453,
            member_tags: vec![448, 447, 452],
            subgroups: BTreeMap::new(),
        };
        assert_eq!(group.delimiter_tag(), Some(448));
        assert!(group.is_member(447));
        assert!(!group.is_member(55));
    }
}
