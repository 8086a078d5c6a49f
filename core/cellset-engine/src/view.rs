//! FILENAME: core/cellset-engine/src/view.rs
//! Query Result - The tabular output of the decoder.
//!
//! A `QueryResult` owns all of its data: nothing borrows from the cellset it
//! was decoded from. Rows are addressed by index; the optional row key gives
//! the member values of every row, one column per level coordinate.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::definition::MeasureValue;
use crate::discovery::LevelCoordinate;
use crate::grid::CellGrid;

// ============================================================================
// ROW KEY
// ============================================================================

/// The values of one row-key level, typed according to the level data type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "values")]
pub enum IndexColumn {
    Text(Vec<String>),
    Integer(Vec<i64>),
    Float(Vec<f64>),
    Date(Vec<NaiveDate>),
    DateTime(Vec<DateTime<FixedOffset>>),
}

impl IndexColumn {
    pub fn len(&self) -> usize {
        match self {
            IndexColumn::Text(v) => v.len(),
            IndexColumn::Integer(v) => v.len(),
            IndexColumn::Float(v) => v.len(),
            IndexColumn::Date(v) => v.len(),
            IndexColumn::DateTime(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_text(&self) -> Option<&[String]> {
        match self {
            IndexColumn::Text(v) => Some(v),
            _ => None,
        }
    }
}

/// Index over the rows of a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RowKey {
    /// Exactly one level on the ROWS axis.
    Single {
        level: LevelCoordinate,
        values: IndexColumn,
    },
    /// Two or more levels, root to leaf and hierarchy after hierarchy.
    Composite {
        levels: Vec<LevelCoordinate>,
        columns: Vec<IndexColumn>,
    },
}

impl RowKey {
    /// Builds the key matching the number of levels, `None` for zero levels.
    pub fn from_levels(mut levels: Vec<LevelCoordinate>, mut columns: Vec<IndexColumn>) -> Option<Self> {
        match levels.len() {
            0 => None,
            1 => Some(RowKey::Single {
                level: levels.pop()?,
                values: columns.pop()?,
            }),
            _ => Some(RowKey::Composite { levels, columns }),
        }
    }

    pub fn levels(&self) -> Vec<&LevelCoordinate> {
        match self {
            RowKey::Single { level, .. } => vec![level],
            RowKey::Composite { levels, .. } => levels.iter().collect(),
        }
    }

    pub fn level_names(&self) -> Vec<&str> {
        self.levels().into_iter().map(|l| l.level.as_str()).collect()
    }

    pub fn level_count(&self) -> usize {
        match self {
            RowKey::Single { .. } => 1,
            RowKey::Composite { levels, .. } => levels.len(),
        }
    }

    pub fn columns(&self) -> Vec<&IndexColumn> {
        match self {
            RowKey::Single { values, .. } => vec![values],
            RowKey::Composite { columns, .. } => columns.iter().collect(),
        }
    }
}

// ============================================================================
// QUERY RESULT
// ============================================================================

/// The canonical tabular form of a cellset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Measure names, in column order.
    pub columns: Vec<String>,

    pub row_key: Option<RowKey>,

    pub values: Vec<Vec<Option<MeasureValue>>>,

    pub formatted_values: Vec<Vec<Option<String>>>,

    /// CSS declarations per cell; `None` when no cell has style properties.
    pub styles: Option<Vec<Vec<Option<String>>>>,

    /// Cube the query ran against.
    pub cube: String,

    pub mdx: Option<String>,

    pub context: BTreeMap<String, String>,
}

impl QueryResult {
    pub(crate) fn new(
        columns: Vec<String>,
        row_key: Option<RowKey>,
        grid: CellGrid,
        cube: String,
    ) -> Self {
        QueryResult {
            columns,
            row_key,
            values: grid.values,
            formatted_values: grid.formatted_values,
            styles: grid.styles,
            cube,
            mdx: None,
            context: BTreeMap::new(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.values.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn has_styles(&self) -> bool {
        self.styles.is_some()
    }

    pub fn value(&self, row: usize, col: usize) -> Option<&MeasureValue> {
        self.values.get(row)?.get(col)?.as_ref()
    }

    pub fn formatted_value(&self, row: usize, col: usize) -> Option<&str> {
        self.formatted_values.get(row)?.get(col)?.as_deref()
    }

    pub fn style(&self, row: usize, col: usize) -> Option<&str> {
        self.styles.as_ref()?.get(row)?.get(col)?.as_deref()
    }

    /// Position of a measure among the columns.
    pub fn column_index(&self, measure: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == measure)
    }
}
