//! FILENAME: core/cellset-engine/src/engine.rs
//! Cellset Engine - Turns a cellset into a tabular query result.
//!
//! This module takes a Cellset (wire data) and the metadata collaborators and
//! produces a QueryResult (columns, row key, value grids).
//!
//! Algorithm:
//! 1. Split the axes into COLUMNS and ROWS, rejecting unsupported shapes
//! 2. Extract the measure names shown as columns
//! 3. Dispatch on the shape:
//!    - no axis: a single cell holding the default measure
//!    - no cell or no column: an empty result
//!    - otherwise: row key from the ROWS axis, then the cell grid
//! 4. Wrap the row key according to its level count
//!
//! Every failure is detected before the result is assembled. The only
//! recovered condition is a date column that does not parse, which keeps its
//! raw strings.

use log::debug;

use crate::axes::{classify_axes, extract_measure_names, ClassifiedAxes};
use crate::coercion::coerce_column;
use crate::definition::{Cellset, DecodeOptions};
use crate::discovery::{LevelCoordinate, LevelDiscovery, LevelTypeLookup};
use crate::error::{CellsetError, CellsetResult};
use crate::grid::{decode_cells, decode_single_cell, CellGrid};
use crate::row_key::build_row_keys;
use crate::view::{IndexColumn, QueryResult, RowKey};

// ============================================================================
// CELLSET DECODER
// ============================================================================

/// Decodes one cellset. Holds borrowed inputs only: decoding twice yields
/// equal results.
pub struct CellsetDecoder<'a> {
    cellset: &'a Cellset,
    discovery: &'a dyn LevelDiscovery,
    level_types: Option<&'a dyn LevelTypeLookup>,
    options: DecodeOptions,
}

impl<'a> CellsetDecoder<'a> {
    pub fn new(cellset: &'a Cellset, discovery: &'a dyn LevelDiscovery) -> Self {
        CellsetDecoder {
            cellset,
            discovery,
            level_types: None,
            options: DecodeOptions::default(),
        }
    }

    pub fn with_level_types(mut self, level_types: &'a dyn LevelTypeLookup) -> Self {
        self.level_types = Some(level_types);
        self
    }

    pub fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    /// Executes the decoding and returns the tabular result.
    pub fn decode(&self) -> CellsetResult<QueryResult> {
        let cellset = self.cellset;
        let has_cells = !cellset.cells.is_empty();

        // Step 1: Classify axes
        let axes = classify_axes(&cellset.axes)?;

        // Step 2: Measure names
        let columns = extract_measure_names(&axes, &cellset.default_members, has_cells)?;
        if columns.is_empty() && has_cells {
            return Err(CellsetError::InternalConsistency(format!(
                "{} cells received without any column",
                cellset.cells.len()
            )));
        }

        // Step 3: Shape dispatch
        let has_some_style = cellset.has_some_style();
        let result = if axes.is_empty() {
            debug!("cube={} scalar cellset, cells={}", cellset.cube, cellset.cells.len());
            self.decode_scalar(columns)?
        } else if !has_cells {
            debug!("cube={} empty cellset, columns={}", cellset.cube, columns.len());
            let column_count = columns.len();
            QueryResult::new(columns, None, CellGrid::empty(0, column_count, false), cellset.cube.clone())
        } else {
            self.decode_general(&axes, columns, has_some_style)?
        };

        Ok(QueryResult {
            mdx: self.options.mdx.clone(),
            context: self.options.context.clone(),
            ..result
        })
    }

    /// No axis at all: at most one cell, the top-level aggregate of the
    /// default measure.
    fn decode_scalar(&self, columns: Vec<String>) -> CellsetResult<QueryResult> {
        let grid = match self.cellset.cells.first() {
            Some(cell) => decode_single_cell(cell),
            None => CellGrid::empty(0, columns.len(), false),
        };
        Ok(QueryResult::new(columns, None, grid, self.cellset.cube.clone()))
    }

    fn decode_general(
        &self,
        axes: &ClassifiedAxes<'_>,
        columns: Vec<String>,
        has_some_style: bool,
    ) -> CellsetResult<QueryResult> {
        let cellset = self.cellset;

        let (levels, raw_columns) = match axes.rows {
            Some(rows) => build_row_keys(&cellset.cube, rows, self.discovery)?.into_columns(),
            None => (Vec::new(), Vec::new()),
        };
        let labels = self.level_type_labels(&levels)?;
        let index_columns = levels
            .iter()
            .zip(raw_columns)
            .zip(labels)
            .map(|((level, raw), label)| coerce_column(level, label.as_deref(), raw))
            .collect::<CellsetResult<Vec<IndexColumn>>>()?;

        let row_count = axes.rows.map_or(1, |rows| rows.positions.len());
        debug!(
            "cube={} rows={} columns={} levels={} styled={}",
            cellset.cube,
            row_count,
            columns.len(),
            levels.len(),
            has_some_style
        );
        let grid = decode_cells(&cellset.cells, columns.len(), row_count, has_some_style)?;

        let row_key = RowKey::from_levels(levels, index_columns);
        Ok(QueryResult::new(columns, row_key, grid, cellset.cube.clone()))
    }

    /// One optional type label per level; all `None` without a lookup.
    fn level_type_labels(&self, levels: &[LevelCoordinate]) -> CellsetResult<Vec<Option<String>>> {
        let Some(lookup) = self.level_types.filter(|_| !levels.is_empty()) else {
            return Ok(vec![None; levels.len()]);
        };
        let labels = lookup.type_labels_of(&self.cellset.cube, levels);
        if labels.len() != levels.len() {
            return Err(CellsetError::InternalConsistency(format!(
                "{} type labels received for {} levels",
                labels.len(),
                levels.len()
            )));
        }
        Ok(labels.into_iter().map(Some).collect())
    }
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Decodes `cellset` into a query result.
///
/// `level_types` gives the data type label of every row-key level; without
/// it every level is kept as text.
pub fn decode_cellset(
    cellset: &Cellset,
    discovery: &dyn LevelDiscovery,
    level_types: Option<&dyn LevelTypeLookup>,
    options: DecodeOptions,
) -> CellsetResult<QueryResult> {
    let mut decoder = CellsetDecoder::new(cellset, discovery).with_options(options);
    if let Some(level_types) = level_types {
        decoder = decoder.with_level_types(level_types);
    }
    decoder.decode()
}
