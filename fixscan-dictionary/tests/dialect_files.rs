/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! File-backed dictionary loading and overlay merging.

use fixscan_dictionary::{
    apply_overlay, apply_overlay_file, embedded_fix44, load_file, DictionaryError,
    EMBEDDED_FIX44_XML,
};
use std::path::PathBuf;

fn write_xml(dir: &tempfile::TempDir, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_file_matches_embedded() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_xml(&dir, "FIX44.xml", EMBEDDED_FIX44_XML);

    let from_file = load_file(&path).unwrap();
    let embedded = embedded_fix44().unwrap();

    assert_eq!(from_file.fields, embedded.fields);
    assert_eq!(from_file.messages, embedded.messages);
    assert_eq!(from_file.name_to_tag, embedded.name_to_tag);
}

#[test]
fn test_load_file_missing_path() {
    let err = load_file("/no/such/dialect.xml").unwrap_err();
    assert!(matches!(err, DictionaryError::Io(_)));
}

#[test]
fn test_overlay_file_extends_base() {
    let dir = tempfile::tempdir().unwrap();
    let overlay = write_xml(
        &dir,
        "venue.xml",
        br#"<fix>
  <fields>
    <field number="25036" name="ResponseMode" type="INT"/>
    <field number="55" name="Symbol" type="EXCHANGE"/>
  </fields>
</fix>"#,
    );

    let mut dict = embedded_fix44().unwrap();
    apply_overlay_file(&mut dict, &overlay).unwrap();

    assert_eq!(dict.tag_by_name("ResponseMode"), Some(25036));
    // Colliding tags take the overlay's definition.
    assert_eq!(dict.field(55).unwrap().type_name, "EXCHANGE");
    // Unrelated definitions survive.
    assert!(dict.message("D").is_some());
}

#[test]
fn test_reload_plus_empty_overlay_is_identity() {
    let base = embedded_fix44().unwrap();
    let mut reloaded = embedded_fix44().unwrap();
    apply_overlay(&mut reloaded, b"<fix/>").unwrap();

    assert_eq!(base.fields, reloaded.fields);
    assert_eq!(base.messages, reloaded.messages);
    assert_eq!(base.name_to_tag, reloaded.name_to_tag);
}
