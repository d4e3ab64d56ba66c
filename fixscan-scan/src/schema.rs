/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Output schema of the scan.
//!
//! Twenty-three fixed columns (19 hot columns, the `tags` and `groups`
//! containers, `raw_message` and `parse_error`) followed by one string
//! column per custom tag. The nested types here must agree exactly with
//! what the driver's Arrow builders produce, nested field names included.

use crate::bind::CustomTag;
use arrow::datatypes::{DataType, Field, Fields, Schema, SchemaRef, TimeUnit};
use fixscan_core::hot::HotSlot;
use std::sync::Arc;

/// Schema index of the `tags` overflow map column.
pub const COL_TAGS: usize = 19;
/// Schema index of the `groups` column.
pub const COL_GROUPS: usize = 20;
/// Schema index of the `raw_message` column.
pub const COL_RAW_MESSAGE: usize = 21;
/// Schema index of the `parse_error` column.
pub const COL_PARSE_ERROR: usize = 22;
/// Number of fixed columns; custom tag columns follow.
pub const FIXED_COLUMNS: usize = 23;

/// Output type of a hot column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotKind {
    /// Nullable UTF-8 string.
    Str,
    /// Signed 64-bit integer.
    Int64,
    /// 64-bit float.
    Float64,
    /// Microsecond UTC timestamp.
    Timestamp,
}

/// Maps a hot slot to its output column type.
pub trait HotSlotKind {
    /// Returns the output type of this slot's column.
    fn kind(self) -> HotKind;
}

impl HotSlotKind for HotSlot {
    fn kind(self) -> HotKind {
        match self {
            HotSlot::MsgSeqNum => HotKind::Int64,
            HotSlot::SendingTime => HotKind::Timestamp,
            HotSlot::Price
            | HotSlot::OrderQty
            | HotSlot::CumQty
            | HotSlot::LeavesQty
            | HotSlot::LastPx
            | HotSlot::LastQty => HotKind::Float64,
            _ => HotKind::Str,
        }
    }
}

/// UTC microsecond timestamp type used for `SendingTime`.
#[must_use]
pub fn timestamp_type() -> DataType {
    DataType::Timestamp(TimeUnit::Microsecond, Some("UTC".into()))
}

/// `Map<Int32, Utf8>`, matching the driver's `MapBuilder` layout.
#[must_use]
pub fn tags_type() -> DataType {
    map_type(DataType::Utf8)
}

/// `Map<Int32, List<Map<Int32, Utf8>>>`, matching the driver's nested
/// builder layout.
#[must_use]
pub fn groups_type() -> DataType {
    let instances = DataType::List(Arc::new(Field::new("item", tags_type(), true)));
    map_type(instances)
}

fn map_type(value_type: DataType) -> DataType {
    let entries = Field::new(
        "entries",
        DataType::Struct(Fields::from(vec![
            Field::new("keys", DataType::Int32, false),
            Field::new("values", value_type, true),
        ])),
        false,
    );
    DataType::Map(Arc::new(entries), false)
}

/// Builds the full output schema: the 23 fixed columns followed by one
/// string column per custom tag, in declaration order.
#[must_use]
pub fn scan_schema(custom_tags: &[CustomTag]) -> SchemaRef {
    let mut fields = Vec::with_capacity(FIXED_COLUMNS + custom_tags.len());

    for slot in HotSlot::ALL {
        let data_type = match slot.kind() {
            HotKind::Str => DataType::Utf8,
            HotKind::Int64 => DataType::Int64,
            HotKind::Float64 => DataType::Float64,
            HotKind::Timestamp => timestamp_type(),
        };
        fields.push(Field::new(slot.name(), data_type, true));
    }

    fields.push(Field::new("tags", tags_type(), true));
    fields.push(Field::new("groups", groups_type(), true));
    fields.push(Field::new("raw_message", DataType::Utf8, true));
    fields.push(Field::new("parse_error", DataType::Utf8, true));

    for tag in custom_tags {
        fields.push(Field::new(tag.name.as_str(), DataType::Utf8, true));
    }

    Arc::new(Schema::new(fields))
}
