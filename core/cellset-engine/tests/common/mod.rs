//! FILENAME: tests/common/mod.rs
//! Fixtures for cellset-engine integration tests.

#![allow(dead_code)]

use cellset_engine::{Cellset, Discovery, LevelDescription};
use serde_json::json;

// ============================================================================
// DISCOVERY FIXTURES
// ============================================================================

/// Level metadata of the "Sales" cube.
pub fn sales_discovery() -> Discovery {
    let mut discovery = Discovery::new();
    discovery.add_hierarchy(
        "Sales",
        "Geo",
        "Country",
        vec![
            LevelDescription::new("ALL", "ALL"),
            LevelDescription::new("Country", "REGULAR"),
        ],
    );
    discovery.add_hierarchy(
        "Sales",
        "Geo",
        "City",
        vec![
            LevelDescription::new("ALL", "ALL"),
            LevelDescription::new("Country", "REGULAR"),
            LevelDescription::new("City", "REGULAR"),
        ],
    );
    discovery.add_hierarchy(
        "Sales",
        "Time",
        "Date",
        vec![
            LevelDescription::new("ALL", "ALL"),
            LevelDescription::new("Date", "REGULAR"),
        ],
    );
    discovery
}

// ============================================================================
// CELLSET FIXTURES
// ============================================================================

/// Qty and Price per country: two axes, four cells.
pub struct SalesFixture;

impl SalesFixture {
    pub fn json() -> serde_json::Value {
        json!({
            "cube": "Sales",
            "axes": [
                {
                    "id": 0,
                    "hierarchies": [{"dimension": "Measures", "hierarchy": "Measures"}],
                    "positions": [[{"namePath": ["Qty"]}], [{"namePath": ["Price"]}]]
                },
                {
                    "id": 1,
                    "hierarchies": [{"dimension": "Geo", "hierarchy": "Country"}],
                    "positions": [
                        [{"namePath": ["AllMember", "France"]}],
                        [{"namePath": ["AllMember", "Germany"]}]
                    ]
                }
            ],
            "cells": [
                {"ordinal": 0, "value": 10, "formattedValue": "10"},
                {"ordinal": 1, "value": 1.5, "formattedValue": "1.50"},
                {"ordinal": 2, "value": 20, "formattedValue": "20"},
                {"ordinal": 3, "value": 2.0, "formattedValue": "2.00"}
            ],
            "defaultMembers": []
        })
    }

    pub fn cellset() -> Cellset {
        Cellset::from_json_value(Self::json()).unwrap()
    }
}

/// A cellset without any axis holding one styled cell, or no cell.
pub fn scalar_cellset(with_cell: bool) -> Cellset {
    let cells = if with_cell {
        json!([{
            "ordinal": 0,
            "value": 42,
            "formattedValue": "42",
            "properties": {"BACK_COLOR": "\"transparent\"", "FONT_FLAGS": 1}
        }])
    } else {
        json!([])
    };
    scalar_cellset_from_cells(cells)
}

/// A cellset without any axis holding the given cell.
pub fn scalar_cellset_with_cell(cell: serde_json::Value) -> Cellset {
    scalar_cellset_from_cells(json!([cell]))
}

fn scalar_cellset_from_cells(cells: serde_json::Value) -> Cellset {
    Cellset::from_json_value(json!({
        "cube": "Sales",
        "axes": [{"id": -1, "hierarchies": [], "positions": []}],
        "cells": cells,
        "defaultMembers": [
            {"dimension": "Geo", "hierarchy": "Country", "path": ["AllMember"]},
            {"dimension": "Measures", "hierarchy": "Measures", "path": ["contributors.COUNT"]}
        ]
    }))
    .unwrap()
}

/// Country and city of two positions, plus a date hierarchy.
pub fn multi_level_cellset() -> Cellset {
    Cellset::from_json_value(json!({
        "cube": "Sales",
        "axes": [
            {
                "id": 0,
                "hierarchies": [{"dimension": "Measures", "hierarchy": "Measures"}],
                "positions": [[{"namePath": ["Qty"]}]]
            },
            {
                "id": 1,
                "hierarchies": [
                    {"dimension": "Geo", "hierarchy": "City"},
                    {"dimension": "Time", "hierarchy": "Date"}
                ],
                "positions": [
                    [{"namePath": ["AllMember", "France", "Paris"]}, {"namePath": ["AllMember", "2020-01-15"]}],
                    [{"namePath": ["AllMember", "Germany", "Berlin"]}, {"namePath": ["AllMember", "2020-02-20"]}]
                ]
            }
        ],
        "cells": [
            {"ordinal": 1, "value": 7, "formattedValue": "7", "properties": {"FORE_COLOR": 16711680}},
            {"ordinal": 0, "value": 3, "formattedValue": "3", "properties": {}}
        ]
    }))
    .unwrap()
}
