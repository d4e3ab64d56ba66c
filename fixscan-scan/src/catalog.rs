/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Dictionary introspection as record batches.
//!
//! Thin table surfaces over the flat catalogs in `fixscan-dictionary`:
//! every field, per-message field usage, and the repeating-group
//! inventory. Rows arrive pre-sorted from the catalogs, so the batches
//! are deterministic for a given dictionary.

use crate::error::ScanError;
use arrow::array::{
    ArrayRef, BooleanBuilder, Int32Builder, ListBuilder, MapBuilder, StringBuilder,
};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;
use fixscan_dictionary::introspect::{field_catalog, group_catalog, message_field_catalog};
use fixscan_dictionary::Dictionary;
use std::sync::Arc;

fn batch_from(columns: Vec<(&str, ArrayRef)>) -> Result<RecordBatch, ScanError> {
    let fields: Vec<Field> = columns
        .iter()
        .map(|(name, array)| Field::new(*name, array.data_type().clone(), true))
        .collect();
    let arrays = columns.into_iter().map(|(_, array)| array).collect();
    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)?)
}

/// All field definitions: `tag`, `name`, `type`, and an `enum_values` map
/// from wire symbol to description. Sorted by tag.
///
/// # Errors
/// Returns [`ScanError::Arrow`] on batch assembly failure.
pub fn fields_batch(dictionary: &Dictionary) -> Result<RecordBatch, ScanError> {
    let rows = field_catalog(dictionary);

    let mut tags = Int32Builder::new();
    let mut names = StringBuilder::new();
    let mut types = StringBuilder::new();
    let mut enums = MapBuilder::new(None, StringBuilder::new(), StringBuilder::new());

    for row in rows {
        tags.append_value(row.tag as i32);
        names.append_value(&row.name);
        types.append_value(&row.type_name);

        if row.enums.is_empty() {
            enums.append(false)?;
        } else {
            for value in &row.enums {
                enums.keys().append_value(&value.value);
                enums.values().append_value(&value.description);
            }
            enums.append(true)?;
        }
    }

    batch_from(vec![
        ("tag", Arc::new(tags.finish()) as ArrayRef),
        ("name", Arc::new(names.finish())),
        ("type", Arc::new(types.finish())),
        ("enum_values", Arc::new(enums.finish())),
    ])
}

/// Per-message field usage: `msgtype`, `name`, `category`, `tag`,
/// `field_name`, `required`, and the enclosing `group_id` (null outside
/// groups). Sorted by msg_type.
///
/// # Errors
/// Returns [`ScanError::Arrow`] on batch assembly failure.
pub fn message_fields_batch(dictionary: &Dictionary) -> Result<RecordBatch, ScanError> {
    let rows = message_field_catalog(dictionary);

    let mut msg_types = StringBuilder::new();
    let mut names = StringBuilder::new();
    let mut categories = StringBuilder::new();
    let mut tags = Int32Builder::new();
    let mut field_names = StringBuilder::new();
    let mut required = BooleanBuilder::new();
    let mut group_ids = Int32Builder::new();

    for row in rows {
        msg_types.append_value(&row.msg_type);
        names.append_value(&row.message);
        categories.append_value(row.usage.as_str());
        tags.append_value(row.tag as i32);
        field_names.append_value(&row.field_name);
        required.append_value(row.required);
        group_ids.append_option(row.group_id.map(|id| id as i32));
    }

    batch_from(vec![
        ("msgtype", Arc::new(msg_types.finish()) as ArrayRef),
        ("name", Arc::new(names.finish())),
        ("category", Arc::new(categories.finish())),
        ("tag", Arc::new(tags.finish())),
        ("field_name", Arc::new(field_names.finish())),
        ("required", Arc::new(required.finish())),
        ("group_id", Arc::new(group_ids.finish())),
    ])
}

/// The repeating-group inventory: `group_tag`, `name`, member `field_tags`,
/// and the referencing `message_types` (deduplicated, sorted). Sorted by
/// group tag.
///
/// # Errors
/// Returns [`ScanError::Arrow`] on batch assembly failure.
pub fn groups_batch(dictionary: &Dictionary) -> Result<RecordBatch, ScanError> {
    let rows = group_catalog(dictionary);

    let mut group_tags = Int32Builder::new();
    let mut names = StringBuilder::new();
    let mut field_tags = ListBuilder::new(Int32Builder::new());
    let mut message_types = ListBuilder::new(StringBuilder::new());

    for row in rows {
        group_tags.append_value(row.count_tag as i32);
        names.append_value(&row.name);

        for &tag in &row.member_tags {
            field_tags.values().append_value(tag as i32);
        }
        field_tags.append(true);

        for msg_type in &row.message_types {
            message_types.values().append_value(msg_type);
        }
        message_types.append(true);
    }

    batch_from(vec![
        ("group_tag", Arc::new(group_tags.finish()) as ArrayRef),
        ("name", Arc::new(names.finish())),
        ("field_tags", Arc::new(field_tags.finish())),
        ("message_types", Arc::new(message_types.finish())),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Array, Int32Array, StringArray};
    use fixscan_dictionary::embedded_fix44;

    #[test]
    fn test_fields_batch_sorted_by_tag() {
        let dictionary = embedded_fix44().unwrap();
        let batch = fields_batch(&dictionary).unwrap();

        assert_eq!(batch.num_rows(), dictionary.fields.len());
        let tags = batch
            .column(0)
            .as_any()
            .downcast_ref::<Int32Array>()
            .unwrap();
        for i in 1..tags.len() {
            assert!(tags.value(i - 1) < tags.value(i));
        }
    }

    #[test]
    fn test_message_fields_batch_schema() {
        let dictionary = embedded_fix44().unwrap();
        let batch = message_fields_batch(&dictionary).unwrap();

        assert!(batch.num_rows() > 0);
        let schema = batch.schema();
        let names: Vec<&str> = schema
            .fields()
            .iter()
            .map(|f| f.name().as_str())
            .collect();
        assert_eq!(
            names,
            vec!["msgtype", "name", "category", "tag", "field_name", "required", "group_id"]
        );
    }

    #[test]
    fn test_groups_batch_contains_parties() {
        let dictionary = embedded_fix44().unwrap();
        let batch = groups_batch(&dictionary).unwrap();

        let tags = batch
            .column(0)
            .as_any()
            .downcast_ref::<Int32Array>()
            .unwrap();
        let names = batch
            .column(1)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();

        let row = (0..tags.len()).find(|&i| tags.value(i) == 453).unwrap();
        assert_eq!(names.value(row), "NoPartyIDs");
    }
}
