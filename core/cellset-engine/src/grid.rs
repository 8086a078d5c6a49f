//! FILENAME: core/cellset-engine/src/grid.rs
//! PURPOSE: Scatters ordinal-addressed cells into row-major grids.
//! CONTEXT: The engine flattens the result grid row by row, so a cell with
//! ordinal `k` lives at row `k / C`, column `k % C` where `C` is the column
//! count. Cells may arrive in any order and missing cells stay empty.

use crate::definition::{CellsetCell, MeasureValue};
use crate::error::{CellsetError, CellsetResult};
use crate::style::properties_to_css;

/// The three parallel grids of a decoded result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellGrid {
    pub values: Vec<Vec<Option<MeasureValue>>>,
    pub formatted_values: Vec<Vec<Option<String>>>,
    /// `None` when no cell of the cellset carries style properties.
    pub styles: Option<Vec<Vec<Option<String>>>>,
}

impl CellGrid {
    /// Allocates `row_count` x `column_count` empty grids.
    pub fn empty(row_count: usize, column_count: usize, with_styles: bool) -> Self {
        CellGrid {
            values: vec![vec![None; column_count]; row_count],
            formatted_values: vec![vec![None; column_count]; row_count],
            styles: with_styles.then(|| vec![vec![None; column_count]; row_count]),
        }
    }

    pub fn row_count(&self) -> usize {
        self.values.len()
    }
}

/// Places one cell in a 1x1 grid whatever its ordinal. The style grid exists
/// only when that cell is styled.
pub fn decode_single_cell(cell: &CellsetCell) -> CellGrid {
    let mut grid = CellGrid::empty(1, 1, cell.has_style());
    grid.values[0][0] = cell.value.clone();
    grid.formatted_values[0][0] = Some(cell.formatted_value.clone());
    if let Some(styles) = grid.styles.as_mut() {
        styles[0][0] = Some(properties_to_css(cell.properties.as_ref()));
    }
    grid
}

/// Decodes `cells` into a grid of `row_count` rows and `column_count` columns.
pub fn decode_cells(
    cells: &[CellsetCell],
    column_count: usize,
    row_count: usize,
    has_some_style: bool,
) -> CellsetResult<CellGrid> {
    if column_count == 0 {
        return Err(CellsetError::InternalConsistency(
            "cannot place cells in a grid without columns".to_string(),
        ));
    }

    let mut grid = CellGrid::empty(row_count, column_count, has_some_style);
    let capacity = row_count * column_count;

    for cell in cells {
        if cell.ordinal >= capacity {
            return Err(CellsetError::InternalConsistency(format!(
                "cell ordinal {} is outside of the {}x{} grid",
                cell.ordinal, row_count, column_count
            )));
        }
        let (row, col) = (cell.ordinal / column_count, cell.ordinal % column_count);

        grid.values[row][col] = cell.value.clone();
        grid.formatted_values[row][col] = Some(cell.formatted_value.clone());
        if let Some(styles) = grid.styles.as_mut() {
            styles[row][col] = Some(properties_to_css(cell.properties.as_ref()));
        }
    }

    Ok(grid)
}
