/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! QuickFIX XML dictionary loader.
//!
//! Parses the QuickFIX dictionary format into a [`Dictionary`]:
//! `<fields>` first, then `<components>` (which must precede messages so
//! references resolve), then `<messages>`. Component references inside a
//! message are expanded in place; after loading, components no longer
//! participate in parsing.
//!
//! Two operations are supported: [`load_base`] builds a fresh dictionary,
//! [`apply_overlay`] re-parses `<fields>` and `<messages>` from a second
//! document into an existing dictionary, overwriting colliding tags and
//! msg_types. Overlays carry venue-specific extensions.

use crate::error::DictionaryError;
use crate::schema::{ComponentDef, Dictionary, EnumValue, FieldDef, GroupDef, MessageDef};
use std::path::Path;
use tracing::{debug, info, warn};
use xmltree::{Element, XMLNode};

trait ElementExt {
    fn attr(&self, name: &str) -> Result<&str, DictionaryError>;
    fn elements(&self) -> impl Iterator<Item = &Element>;
    fn named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element>;
}

impl ElementExt for Element {
    fn attr(&self, name: &str) -> Result<&str, DictionaryError> {
        self.attributes
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| DictionaryError::MissingAttribute {
                element: self.name.clone(),
                attribute: name.to_string(),
            })
    }

    fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(XMLNode::as_element)
    }

    fn named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.elements().filter(move |e| e.name == name)
    }
}

/// Loads a fresh dictionary from QuickFIX XML bytes.
///
/// # Errors
/// Returns [`DictionaryError`] on malformed XML, a `<group>` without a
/// `name`, or a member name the `<fields>` section does not define. The
/// whole dictionary is discarded on failure.
pub fn load_base(bytes: &[u8]) -> Result<Dictionary, DictionaryError> {
    let root = Element::parse(bytes)?;
    let mut dict = Dictionary::new();

    if let Some(fields) = root.get_child("fields") {
        load_fields(&mut dict, fields)?;
    }
    // Components must be resolved before the messages that reference them.
    if let Some(components) = root.get_child("components") {
        load_components(&mut dict, components)?;
    }
    if let Some(messages) = root.get_child("messages") {
        load_messages(&mut dict, messages)?;
    }

    info!(
        fields = dict.fields.len(),
        messages = dict.messages.len(),
        components = dict.components.len(),
        "loaded FIX dictionary"
    );
    Ok(dict)
}

/// Loads a dictionary from a file on the local filesystem.
///
/// # Errors
/// Returns [`DictionaryError`] on I/O or parse failure.
pub fn load_file(path: impl AsRef<Path>) -> Result<Dictionary, DictionaryError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading dictionary file");
    let bytes = std::fs::read(path)?;
    load_base(&bytes)
}

/// Merges `<fields>` and `<messages>` from a second document into an
/// existing dictionary. Later definitions replace earlier ones with the
/// same tag or msg_type; everything else is left untouched.
///
/// # Errors
/// Returns [`DictionaryError`] on malformed XML or unresolved references.
pub fn apply_overlay(dict: &mut Dictionary, bytes: &[u8]) -> Result<(), DictionaryError> {
    let root = Element::parse(bytes)?;

    if let Some(fields) = root.get_child("fields") {
        load_fields(dict, fields)?;
    }
    if let Some(messages) = root.get_child("messages") {
        load_messages(dict, messages)?;
    }

    info!(
        fields = dict.fields.len(),
        messages = dict.messages.len(),
        "applied dictionary overlay"
    );
    Ok(())
}

/// Applies an overlay read from a file on the local filesystem.
///
/// # Errors
/// Returns [`DictionaryError`] on I/O or parse failure.
pub fn apply_overlay_file(
    dict: &mut Dictionary,
    path: impl AsRef<Path>,
) -> Result<(), DictionaryError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading overlay file");
    let bytes = std::fs::read(path)?;
    apply_overlay(dict, &bytes)
}

fn load_fields(dict: &mut Dictionary, fields_root: &Element) -> Result<(), DictionaryError> {
    for field in fields_root.named("field") {
        let number = field.attr("number")?;
        let tag: u32 =
            number
                .parse()
                .map_err(|_| DictionaryError::InvalidTagNumber {
                    element: field.name.clone(),
                    value: number.to_string(),
                })?;

        let mut def = FieldDef::new(tag, field.attr("name")?, field.attr("type")?);
        for value in field.named("value") {
            def.enums.push(EnumValue {
                value: value.attr("enum")?.to_string(),
                description: value
                    .attributes
                    .get("description")
                    .cloned()
                    .unwrap_or_default(),
            });
        }

        dict.add_field(def);
    }
    Ok(())
}

fn resolve_name(
    dict: &Dictionary,
    name: &str,
    referenced_by: &str,
) -> Result<u32, DictionaryError> {
    dict.tag_by_name(name)
        .ok_or_else(|| DictionaryError::UnknownFieldName {
            name: name.to_string(),
            referenced_by: referenced_by.to_string(),
        })
}

fn load_group(dict: &Dictionary, group: &Element) -> Result<GroupDef, DictionaryError> {
    let name = group.attr("name")?;
    let context = format!("group `{name}`");

    let mut def = GroupDef {
        count_tag: resolve_name(dict, name, &context)?,
        member_tags: Vec::new(),
        subgroups: Default::default(),
    };

    for field in group.named("field") {
        let tag = resolve_name(dict, field.attr("name")?, &context)?;
        def.member_tags.push(tag);
    }

    for sub in group.named("group") {
        let sub_def = load_group(dict, sub)?;
        def.subgroups.insert(sub_def.count_tag, sub_def);
    }

    Ok(def)
}

fn load_components(
    dict: &mut Dictionary,
    components_root: &Element,
) -> Result<(), DictionaryError> {
    for comp in components_root.named("component") {
        let name = comp.attr("name")?.to_string();
        let context = format!("component `{name}`");

        let mut def = ComponentDef {
            name: name.clone(),
            member_tags: Vec::new(),
            groups: Default::default(),
        };

        for field in comp.named("field") {
            let tag = resolve_name(dict, field.attr("name")?, &context)?;
            def.member_tags.push(tag);
        }

        for group in comp.named("group") {
            let group_def = load_group(dict, group)?;
            def.groups.insert(group_def.count_tag, group_def);
        }

        dict.components.insert(name, def);
    }
    Ok(())
}

fn load_messages(dict: &mut Dictionary, messages_root: &Element) -> Result<(), DictionaryError> {
    for msg in messages_root.named("message") {
        let mut def = MessageDef::new(msg.attr("name")?, msg.attr("msgtype")?);
        let context = format!("message `{}`", def.name);

        // Children are walked in document order so declaration order is
        // preserved in the required/optional lists.
        for child in msg.elements() {
            match child.name.as_str() {
                "field" => {
                    let tag = resolve_name(dict, child.attr("name")?, &context)?;
                    if is_required(child) {
                        def.required_tags.push(tag);
                    } else {
                        def.optional_tags.push(tag);
                    }
                }
                "group" => {
                    let group_def = load_group(dict, child)?;
                    def.groups.insert(group_def.count_tag, group_def);
                }
                "component" => expand_component(dict, &mut def, child),
                _ => {}
            }
        }

        dict.messages.insert(def.msg_type.clone(), def);
    }
    Ok(())
}

/// Expands a component reference into a message: the component's fields are
/// appended as required or optional depending on the reference's `required`
/// flag, and its groups are merged into the message's group map.
fn expand_component(dict: &Dictionary, msg: &mut MessageDef, comp_ref: &Element) {
    let Some(name) = comp_ref.attributes.get("name") else {
        return;
    };
    let Some(comp) = dict.components.get(name) else {
        warn!(component = %name, message = %msg.name, "unresolved component reference");
        return;
    };

    if is_required(comp_ref) {
        msg.required_tags.extend(&comp.member_tags);
    } else {
        msg.optional_tags.extend(&comp.member_tags);
    }

    for (count_tag, group_def) in &comp.groups {
        msg.groups.insert(*count_tag, group_def.clone());
    }
}

fn is_required(element: &Element) -> bool {
    element.attributes.get("required").map(String::as_str) == Some("Y")
}
