//! # Reader Integration Tests
//!
//! Loading annotation record sets and reading identifiers from them.


use test_helpers::{dataset_dir, fragment_at, record, record_set, write_file, yaml_record_set};
use vehicle_passport_ocr::{PassportIdReader, ReaderConfig, ReaderError};

fn reader() -> PassportIdReader {
    PassportIdReader::new(ReaderConfig::with_target_size(1000))
}

#[test]
fn test_read_before_load_is_unloaded_state() {
    let mut reader = reader();
    assert_eq!(reader.read_identifier(), Err(ReaderError::UnloadedState));
}

#[test]
fn test_failed_load_keeps_reader_unloaded() {
    let mut reader = reader();
    let result = reader.load_str(r#"{ "ocr_results": [ { "text": "12AB123456" } ] }"#);

    assert!(matches!(result, Err(ReaderError::MalformedInput(_))));
    assert!(!reader.is_loaded());
    assert_eq!(reader.read_identifier(), Err(ReaderError::UnloadedState));
}

#[test]
fn test_load_round_trip() {
    let source = r#"{
        "ocr_results": [
            { "bbox": [[700, 10], [900, 12], [900, 40], [700, 38]], "confidence": 0.9731, "text": "12 AB 123456" },
            { "bbox": [[10, 500], [90, 500], [90, 520], [10, 520]], "confidence": 0.4, "text": "PASSPORT" }
        ]
    }"#;

    let mut reader = reader();
    assert_eq!(reader.load_str(source), Ok(2));

    let fragments = reader.fragments().unwrap();
    assert_eq!(fragments.len(), 2);
    assert_eq!(fragments[0].text(), "12 AB 123456");
    assert_eq!(fragments[0].confidence(), 0.9731);
    assert_eq!(fragments[0].bbox().tr.y, 12.0);
    assert_eq!(fragments[1].text(), "PASSPORT");
    assert_eq!(fragments[1].confidence(), 0.4);
}

#[test]
fn test_new_load_replaces_previous_set() {
    let mut reader = reader();
    reader
        .load_str(&record_set(vec![record("12AB123456", 500.0, 0.0, 20.0)]))
        .unwrap();
    assert_eq!(reader.read_identifier(), Ok(Some("12AB123456".to_string())));

    reader
        .load_str(&record_set(vec![record("NOTHING HERE", 500.0, 0.0, 20.0)]))
        .unwrap();
    assert_eq!(reader.fragments().unwrap().len(), 1);
    assert_eq!(reader.read_identifier(), Ok(None));
}

#[test]
fn test_stitches_identifier_split_in_two() {
    let mut reader = reader();
    reader.load_fragments(vec![
        fragment_at("12AB", 10.0, 0.0, 20.0),
        fragment_at("123456", 50.0, 0.0, 20.0),
    ]);
    assert_eq!(reader.read_identifier(), Ok(Some("12AB123456".to_string())));
}

#[test]
fn test_stitches_nearest_neighbors_first() {
    let mut reader = reader();
    // Input order deliberately differs from left-to-right order
    reader.load_fragments(vec![
        fragment_at("3456", 90.0, 0.0, 20.0),
        fragment_at("12 V0", 10.0, 0.0, 20.0),
        fragment_at("12", 50.0, 2.0, 18.0),
    ]);
    assert_eq!(reader.read_identifier(), Ok(Some("12YO123456".to_string())));
}

#[test]
fn test_single_leading_digit_starts_stitching() {
    let mut reader = reader();
    reader.load_fragments(vec![
        fragment_at("1", 10.0, 0.0, 20.0),
        fragment_at("2AB123456", 50.0, 0.0, 20.0),
    ]);
    assert_eq!(reader.read_identifier(), Ok(Some("12AB123456".to_string())));
}

#[test]
fn test_stitching_stops_once_too_long() {
    let mut reader = reader();
    reader.load_fragments(vec![
        fragment_at("12AB", 10.0, 0.0, 20.0),
        fragment_at("1234567", 50.0, 0.0, 20.0),
        fragment_at("8", 90.0, 0.0, 20.0),
    ]);
    assert_eq!(reader.read_identifier(), Ok(None));
}

#[test]
fn test_neighbor_centroid_must_be_inside_band() {
    let mut reader = reader();
    reader.load_fragments(vec![
        fragment_at("12AB", 10.0, 0.0, 20.0),
        // Centroid y = 25, outside 0..=20 even though the boxes overlap
        fragment_at("123456", 50.0, 15.0, 35.0),
    ]);
    assert_eq!(reader.read_identifier(), Ok(None));
}

#[test]
fn test_direct_match_wins_over_stitching() {
    let mut reader = reader();
    reader.load_fragments(vec![
        fragment_at("34CD654321", 990.0, 0.0, 20.0),
        fragment_at("12AB", 10.0, 0.0, 20.0),
        fragment_at("123456", 50.0, 0.0, 20.0),
    ]);
    assert_eq!(reader.read_identifier(), Ok(Some("34CD654321".to_string())));
}

#[test]
fn test_read_is_idempotent() {
    let mut reader = reader();
    reader.load_fragments(vec![
        fragment_at("far", 0.0, 900.0, 920.0),
        fragment_at("12AB", 10.0, 0.0, 20.0),
        fragment_at("123456", 50.0, 0.0, 20.0),
    ]);

    let first = reader.read_identifier();
    let order: Vec<String> = reader
        .fragments()
        .unwrap()
        .iter()
        .map(|f| f.text().to_string())
        .collect();
    let second = reader.read_identifier();
    let order_again: Vec<String> = reader
        .fragments()
        .unwrap()
        .iter()
        .map(|f| f.text().to_string())
        .collect();

    assert_eq!(first, second);
    assert_eq!(order, order_again);
    assert_eq!(order, vec!["123456", "12AB", "far"]);
}

#[test]
fn test_vicinity_sort_is_stable() {
    let mut reader = reader();
    reader.load_fragments(vec![
        fragment_at("a", 500.0, 100.0, 120.0),
        fragment_at("b", 990.0, 0.0, 20.0),
        fragment_at("c", 500.0, 100.0, 120.0),
        fragment_at("d", 500.0, 100.0, 120.0),
    ]);
    reader.sort_by_vicinity_to_reference_corner().unwrap();

    let texts: Vec<&str> = reader.fragments().unwrap().iter().map(|f| f.text()).collect();
    assert_eq!(texts, vec!["b", "a", "c", "d"]);
}

#[test]
fn test_load_path() {
    let dir = dataset_dir();
    let path = write_file(
        dir.path(),
        "sample_0.json",
        &record_set(vec![
            record("RUS", 900.0, 0.0, 20.0),
            record("77 VO", 600.0, 100.0, 130.0),
            record("654321", 700.0, 100.0, 130.0),
        ]),
    );

    let mut reader = reader();
    assert_eq!(reader.load_path(&path), Ok(3));
    assert_eq!(reader.read_identifier(), Ok(Some("77YO654321".to_string())));
}

#[test]
fn test_load_yaml_annotation_file() {
    let dir = dataset_dir();
    let path = write_file(
        dir.path(),
        "sample_0.yaml",
        &yaml_record_set(&[
            ("RUS", 900.0, 0.0, 20.0),
            ("77 VO", 600.0, 100.0, 130.0),
            ("654321", 700.0, 100.0, 130.0),
        ]),
    );

    let mut reader = reader();
    assert_eq!(reader.load_path(&path), Ok(3));
    assert_eq!(reader.fragments().unwrap()[1].text(), "77 VO");
    assert_eq!(reader.read_identifier(), Ok(Some("77YO654321".to_string())));
}

#[test]
fn test_load_str_accepts_yaml() {
    let mut reader = reader();
    let source = "\
ocr_results:
- bbox:
  - - 700.0
    - 10.0
  - - 900.0
    - 12.0
  - - 900.0
    - 40.0
  - - 700.0
    - 38.0
  confidence: 0.9731
  text: 12 AB 123456
";
    assert_eq!(reader.load_str(source), Ok(1));
    assert_eq!(reader.fragments().unwrap()[0].bbox().tr.y, 12.0);
    assert_eq!(reader.read_identifier(), Ok(Some("12AB123456".to_string())));
}

#[test]
fn test_malformed_yaml_file_is_malformed_input() {
    let dir = dataset_dir();
    let path = write_file(
        dir.path(),
        "sample_0.yaml",
        "ocr_results:\n- bbox:\n  - [0, 0]\n  confidence: 0.9\n  text: '12'\n",
    );

    let mut reader = reader();
    assert!(matches!(
        reader.load_path(&path),
        Err(ReaderError::MalformedInput(_))
    ));
    assert!(!reader.is_loaded());
}

#[test]
fn test_load_missing_file_is_filesystem_error() {
    let dir = dataset_dir();
    let mut reader = reader();
    let result = reader.load_path(dir.path().join("missing.json"));
    assert!(matches!(result, Err(ReaderError::FileSystem(_))));
}
