//! FILENAME: core/cellset-engine/src/row_key.rs
//! PURPOSE: Builds the level coordinates and raw row keys of the ROWS axis.
//! CONTEXT: Each position on the ROWS axis becomes one row. The members of a
//! position are walked in axis order and their name paths (minus the
//! synthetic root) are concatenated into one key tuple per row.
//!
//! A position whose name path is shorter or longer than the one of the first
//! position, for the same hierarchy, is a grand total or a subtotal. Those
//! cannot be represented as a flat index and are rejected up front.

use smallvec::SmallVec;

use crate::definition::CellsetAxis;
use crate::discovery::{LevelCoordinate, LevelDiscovery};
use crate::error::{CellsetError, CellsetResult};

/// Raw string values of one row key, one per level coordinate.
pub type RawKey = SmallVec<[String; 4]>;

/// Output of the row key builder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRowKeys {
    pub levels: Vec<LevelCoordinate>,
    pub rows: Vec<RawKey>,
}

impl RawRowKeys {
    /// Transposes the row tuples into one column of raw strings per level.
    pub fn into_columns(self) -> (Vec<LevelCoordinate>, Vec<Vec<String>>) {
        let mut columns: Vec<Vec<String>> = self
            .levels
            .iter()
            .map(|_| Vec::with_capacity(self.rows.len()))
            .collect();
        for row in self.rows {
            for (column, value) in columns.iter_mut().zip(row) {
                column.push(value);
            }
        }
        (self.levels, columns)
    }
}

// ============================================================================
// DEPTH VALIDATION
// ============================================================================

/// Returns the name path length of every hierarchy, as reported by the first
/// position, after checking that every other position agrees.
pub fn level_count_per_hierarchy(rows: &CellsetAxis) -> CellsetResult<Vec<usize>> {
    let Some(first) = rows.positions.first() else {
        return Ok(vec![0; rows.hierarchies.len()]);
    };
    let depths: Vec<usize> = first.iter().map(|m| m.name_path.len()).collect();

    for (position_index, position) in rows.positions.iter().enumerate().skip(1) {
        if position.len() != depths.len() {
            return Err(CellsetError::InternalConsistency(format!(
                "ROWS position {} has {} members, expected {}",
                position_index,
                position.len(),
                depths.len()
            )));
        }
        for (hierarchy_index, member) in position.iter().enumerate() {
            let found = member.name_path.len();
            if found != depths[hierarchy_index] {
                return Err(CellsetError::GrandTotalUnsupported {
                    position: position_index,
                    hierarchy: hierarchy_index,
                    expected: depths[hierarchy_index],
                    found,
                });
            }
        }
    }

    Ok(depths)
}

// ============================================================================
// LEVEL DERIVATION
// ============================================================================

/// Lists the level coordinates shown by the ROWS axis, root to leaf and
/// hierarchy after hierarchy. The ALL level never becomes an index column.
pub fn extract_level_coordinates(
    cube: &str,
    rows: &CellsetAxis,
    depths: &[usize],
    discovery: &dyn LevelDiscovery,
) -> CellsetResult<Vec<LevelCoordinate>> {
    let mut coordinates = Vec::new();

    for (hierarchy_index, hierarchy) in rows.hierarchies.iter().enumerate() {
        let levels = discovery
            .levels_of(cube, &hierarchy.dimension, &hierarchy.hierarchy)
            .ok_or_else(|| CellsetError::UnknownHierarchy {
                cube: cube.to_string(),
                dimension: hierarchy.dimension.clone(),
                hierarchy: hierarchy.hierarchy.clone(),
            })?;
        let depth = depths.get(hierarchy_index).copied().unwrap_or(0);

        coordinates.extend(
            levels
                .iter()
                .take(depth)
                .filter(|level| !level.is_all_level())
                .map(|level| LevelCoordinate::new(hierarchy.hierarchy.clone(), level.name.clone())),
        );
    }

    Ok(coordinates)
}

// ============================================================================
// RAW KEY EXTRACTION
// ============================================================================

/// Validates the ROWS axis and produces the level coordinates together with
/// one raw key tuple per position.
pub fn build_row_keys(
    cube: &str,
    rows: &CellsetAxis,
    discovery: &dyn LevelDiscovery,
) -> CellsetResult<RawRowKeys> {
    let depths = level_count_per_hierarchy(rows)?;
    let levels = extract_level_coordinates(cube, rows, &depths, discovery)?;

    let mut keys = Vec::with_capacity(rows.positions.len());
    for (position_index, position) in rows.positions.iter().enumerate() {
        let key: RawKey = position
            .iter()
            .flat_map(|member| member.data_path().iter().cloned())
            .collect();

        if key.len() != levels.len() {
            return Err(CellsetError::InternalConsistency(format!(
                "ROWS position {} yields {} key values for {} levels",
                position_index,
                key.len(),
                levels.len()
            )));
        }
        keys.push(key);
    }

    Ok(RawRowKeys { levels, rows: keys })
}
