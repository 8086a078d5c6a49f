//! FILENAME: core/cellset-engine/src/axes.rs
//! PURPOSE: Splits the cellset axes and derives the measure (column) names.

use crate::definition::{CellsetAxis, DefaultMember, MEASURES};
use crate::error::{CellsetError, CellsetResult};

/// The non-slicing axes of a cellset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassifiedAxes<'a> {
    pub columns: Option<&'a CellsetAxis>,
    pub rows: Option<&'a CellsetAxis>,
}

impl ClassifiedAxes<'_> {
    pub fn is_empty(&self) -> bool {
        self.columns.is_none() && self.rows.is_none()
    }
}

/// Assigns axis 0 to COLUMNS and the other non-slicing axis to ROWS.
pub fn classify_axes(axes: &[CellsetAxis]) -> CellsetResult<ClassifiedAxes<'_>> {
    let non_slicing: Vec<&CellsetAxis> = axes.iter().filter(|a| !a.is_slicing()).collect();
    if non_slicing.len() > 2 {
        return Err(CellsetError::UnsupportedShape(format!(
            "cellsets with more than two non-slicing axes are not supported (found {})",
            non_slicing.len()
        )));
    }

    let mut classified = ClassifiedAxes::default();
    for axis in non_slicing {
        if axis.is_columns() {
            classified.columns = Some(axis);
        } else {
            classified.rows = Some(axis);
        }
    }
    Ok(classified)
}

/// Returns the ordered measure names shown as columns.
///
/// With no axis at all the engine sends a single cell holding the default
/// measure aggregated at the top, so its name comes from the default members.
pub fn extract_measure_names(
    axes: &ClassifiedAxes<'_>,
    default_members: &[DefaultMember],
    has_cells: bool,
) -> CellsetResult<Vec<String>> {
    let Some(columns) = axes.columns else {
        if axes.rows.is_some() || !has_cells {
            return Ok(Vec::new());
        }
        let name = default_members
            .iter()
            .find(|m| m.dimension == MEASURES)
            .and_then(|m| m.path.first())
            .ok_or_else(|| {
                CellsetError::InternalConsistency(
                    "cellset without axes has no default measure member".to_string(),
                )
            })?;
        return Ok(vec![name.clone()]);
    };

    let measures_only = columns.hierarchies.is_empty()
        || (columns.hierarchies.len() == 1 && columns.hierarchies[0].is_measures());
    if !measures_only {
        return Err(CellsetError::UnsupportedShape(
            "cellsets with something else than measures on the COLUMNS axis are not supported"
                .to_string(),
        ));
    }

    columns
        .positions
        .iter()
        .enumerate()
        .map(|(index, position)| {
            position
                .first()
                .and_then(|member| member.name_path.first())
                .cloned()
                .ok_or_else(|| {
                    CellsetError::InternalConsistency(format!(
                        "COLUMNS position {} has no measure name",
                        index
                    ))
                })
        })
        .collect()
}
