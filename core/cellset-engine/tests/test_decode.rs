//! FILENAME: tests/test_decode.rs
//! Integration tests for cellset decoding.

mod common;

use cellset_engine::{
    decode_cellset, Cellset, CellsetDecoder, CellsetError, DecodeOptions, IndexColumn,
    LevelCoordinate, MeasureValue, QueryResult, RowKey,
};
use chrono::NaiveDate;
use common::{
    multi_level_cellset, sales_discovery, scalar_cellset, scalar_cellset_with_cell, SalesFixture,
};
use serde_json::json;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn decode(cellset: &Cellset) -> Result<QueryResult, CellsetError> {
    decode_cellset(cellset, &sales_discovery(), None, DecodeOptions::default())
}

// ============================================================================
// SCALAR SHAPE
// ============================================================================

#[test]
fn test_no_axes_no_cells() {
    let result = decode(&scalar_cellset(false)).unwrap();
    assert_eq!(result.column_count(), 0);
    assert_eq!(result.row_count(), 0);
    assert!(result.row_key.is_none());
    assert!(!result.has_styles());
}

#[test]
fn test_no_axes_one_cell() {
    let result = decode(&scalar_cellset(true)).unwrap();
    assert_eq!(result.columns, vec!["contributors.COUNT".to_string()]);
    assert_eq!(result.row_count(), 1);
    assert_eq!(result.value(0, 0), Some(&MeasureValue::Integer(42)));
    assert_eq!(result.formatted_value(0, 0), Some("42"));
    assert_eq!(
        result.style(0, 0),
        Some("background-color: transparent; font-weight: bold")
    );
    assert!(result.row_key.is_none());
}

#[test]
fn test_no_axes_one_unstyled_cell() {
    let cellset = scalar_cellset_with_cell(json!({"ordinal": 0, "value": 42, "formattedValue": "42"}));
    let result = decode(&cellset).unwrap();
    assert_eq!(result.value(0, 0), Some(&MeasureValue::Integer(42)));
    assert!(!result.has_styles());
    assert_eq!(result.style(0, 0), None);
}

#[test]
fn test_no_axes_cell_ordinal_is_ignored() {
    let cellset = scalar_cellset_with_cell(json!({"ordinal": 3, "value": 7, "formattedValue": "7"}));
    let result = decode(&cellset).unwrap();
    assert_eq!(result.row_count(), 1);
    assert_eq!(result.value(0, 0), Some(&MeasureValue::Integer(7)));
    assert_eq!(result.formatted_value(0, 0), Some("7"));
}

// ============================================================================
// GENERAL SHAPE
// ============================================================================

#[test]
fn test_sales_end_to_end() {
    let result = decode(&SalesFixture::cellset()).unwrap();

    assert_eq!(result.columns, vec!["Qty".to_string(), "Price".to_string()]);
    assert_eq!(result.cube, "Sales");
    match result.row_key.as_ref().unwrap() {
        RowKey::Single { level, values } => {
            assert_eq!(level, &LevelCoordinate::new("Country", "Country"));
            assert_eq!(
                values,
                &IndexColumn::Text(vec!["France".to_string(), "Germany".to_string()])
            );
        }
        other => panic!("expected a single-level key, got {:?}", other),
    }
    assert_eq!(
        result.values,
        vec![
            vec![Some(MeasureValue::Integer(10)), Some(MeasureValue::Float(1.5))],
            vec![Some(MeasureValue::Integer(20)), Some(MeasureValue::Float(2.0))],
        ]
    );
    assert_eq!(result.formatted_value(0, 1), Some("1.50"));
    assert!(result.styles.is_none());
}

#[test]
fn test_decoding_is_idempotent() {
    let cellset = SalesFixture::cellset();
    let discovery = sales_discovery();
    let decoder = CellsetDecoder::new(&cellset, &discovery);
    assert_eq!(decoder.decode().unwrap(), decoder.decode().unwrap());
}

#[test]
fn test_cell_order_does_not_matter() {
    let cellset = SalesFixture::cellset();
    let mut shuffled = cellset.clone();
    shuffled.cells.reverse();
    shuffled.cells.swap(0, 2);
    assert_eq!(decode(&cellset).unwrap(), decode(&shuffled).unwrap());
}

#[test]
fn test_columns_only() {
    let mut json = SalesFixture::json();
    json["axes"].as_array_mut().unwrap().pop();
    json["cells"] = json!([
        {"ordinal": 1, "value": 1.5, "formattedValue": "1.50"},
        {"ordinal": 0, "value": 10, "formattedValue": "10"}
    ]);
    let result = decode(&Cellset::from_json_value(json).unwrap()).unwrap();

    assert_eq!(result.row_count(), 1);
    assert!(result.row_key.is_none());
    assert_eq!(result.value(0, 0), Some(&MeasureValue::Integer(10)));
    assert_eq!(result.value(0, 1), Some(&MeasureValue::Float(1.5)));
}

#[test]
fn test_rows_only_without_cells() {
    let mut json = SalesFixture::json();
    json["axes"].as_array_mut().unwrap().remove(0);
    json["cells"] = json!([]);
    let result = decode(&Cellset::from_json_value(json).unwrap()).unwrap();
    assert_eq!(result.column_count(), 0);
    assert_eq!(result.row_count(), 0);
}

#[test]
fn test_rows_only_with_cells_is_inconsistent() {
    let mut json = SalesFixture::json();
    json["axes"].as_array_mut().unwrap().remove(0);
    let err = decode(&Cellset::from_json_value(json).unwrap()).unwrap_err();
    assert!(matches!(err, CellsetError::InternalConsistency(_)));
}

#[test]
fn test_slicing_axis_is_ignored() {
    let mut json = SalesFixture::json();
    json["axes"].as_array_mut().unwrap().push(json!({
        "id": -1,
        "hierarchies": [{"dimension": "Time", "hierarchy": "Date"}],
        "positions": [[{"namePath": ["AllMember", "2020-01-15"]}]]
    }));
    let sliced = decode(&Cellset::from_json_value(json).unwrap()).unwrap();
    assert_eq!(sliced, decode(&SalesFixture::cellset()).unwrap());
}

#[test]
fn test_multi_level_row_key_with_types() {
    let cellset = multi_level_cellset();
    let discovery = sales_discovery();
    let level_types = |cube: &str, levels: &[LevelCoordinate]| -> Vec<String> {
        assert_eq!(cube, "Sales");
        levels
            .iter()
            .map(|l| match l.level.as_str() {
                "Date" => "LocalDate[yyyy-MM-dd]".to_string(),
                _ => "object".to_string(),
            })
            .collect()
    };
    let result = CellsetDecoder::new(&cellset, &discovery)
        .with_level_types(&level_types)
        .decode()
        .unwrap();

    let row_key = result.row_key.as_ref().unwrap();
    assert!(matches!(row_key, RowKey::Composite { .. }));
    assert_eq!(row_key.level_names(), vec!["Country", "City", "Date"]);

    let columns = row_key.columns();
    assert_eq!(
        columns[1],
        &IndexColumn::Text(vec!["Paris".to_string(), "Berlin".to_string()])
    );
    assert_eq!(
        columns[2],
        &IndexColumn::Date(vec![
            NaiveDate::from_ymd_opt(2020, 1, 15).unwrap(),
            NaiveDate::from_ymd_opt(2020, 2, 20).unwrap(),
        ])
    );

    assert_eq!(result.value(0, 0), Some(&MeasureValue::Integer(3)));
    assert_eq!(result.value(1, 0), Some(&MeasureValue::Integer(7)));
    assert_eq!(result.style(0, 0), Some(""));
    assert_eq!(result.style(1, 0), Some("color: rgb(0, 0, 255)"));
}

// ============================================================================
// REJECTED SHAPES
// ============================================================================

#[test]
fn test_sub_totals_are_rejected() {
    let mut json = SalesFixture::json();
    json["axes"][1]["positions"][1] = json!([{"namePath": ["AllMember"]}]);
    let err = decode(&Cellset::from_json_value(json).unwrap()).unwrap_err();
    assert!(matches!(err, CellsetError::GrandTotalUnsupported { .. }));
    assert!(err.to_string().contains("grand or sub totals"));
}

#[test]
fn test_three_axes_are_rejected() {
    let mut json = SalesFixture::json();
    json["axes"].as_array_mut().unwrap().push(json!({"id": 2, "hierarchies": [], "positions": []}));
    let err = decode(&Cellset::from_json_value(json).unwrap()).unwrap_err();
    assert!(matches!(err, CellsetError::UnsupportedShape(_)));
}

#[test]
fn test_out_of_bounds_ordinal_is_rejected() {
    let mut json = SalesFixture::json();
    json["cells"][3]["ordinal"] = json!(4);
    let err = decode(&Cellset::from_json_value(json).unwrap()).unwrap_err();
    assert!(matches!(err, CellsetError::InternalConsistency(_)));
}

#[test]
fn test_invalid_number_level_is_rejected() {
    let cellset = SalesFixture::cellset();
    let discovery = sales_discovery();
    let ints = |_: &str, levels: &[LevelCoordinate]| -> Vec<String> {
        levels.iter().map(|_| "int".to_string()).collect()
    };
    let err = CellsetDecoder::new(&cellset, &discovery)
        .with_level_types(&ints)
        .decode()
        .unwrap_err();
    assert!(matches!(err, CellsetError::InvalidNumber { .. }));
}

#[test]
fn test_malformed_payload() {
    let err = Cellset::from_json(r#"{"axes": []}"#).unwrap_err();
    assert!(matches!(err, CellsetError::Json(_)));
}
