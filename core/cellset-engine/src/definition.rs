//! FILENAME: core/cellset-engine/src/definition.rs
//! Cellset Definition - The wire model of a multidimensional query response.
//!
//! This module contains all the types needed to DESCRIBE a cellset as the
//! remote engine sends it. These structures are designed to be:
//! - Deserializable straight from the JSON payload (field names are fixed)
//! - Explicit about optional members (absence is an `Option`, not a lookup)
//! - Immutable snapshots, produced once per query

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CellsetResult;

/// Axis id reserved for the slicing (filter) axis.
pub const SLICING_AXIS_ID: i32 = -1;

/// Axis id of the COLUMNS axis.
pub const COLUMNS_AXIS_ID: i32 = 0;

/// Synthetic leading name path element that denotes the implicit root member.
pub const ALL_MEMBER: &str = "AllMember";

/// Dimension (and hierarchy) name carrying the measures.
pub const MEASURES: &str = "Measures";

// ============================================================================
// CELLSET
// ============================================================================

/// The raw structured result of one multidimensional query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cellset {
    #[serde(default)]
    pub axes: Vec<CellsetAxis>,

    #[serde(default)]
    pub cells: Vec<CellsetCell>,

    /// Name of the cube the query ran against.
    pub cube: String,

    #[serde(default)]
    pub default_members: Vec<DefaultMember>,
}

impl Cellset {
    pub fn from_json(payload: &str) -> CellsetResult<Self> {
        Ok(serde_json::from_str(payload)?)
    }

    pub fn from_json_value(value: serde_json::Value) -> CellsetResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// True when at least one cell carries a non-empty style property map.
    pub fn has_some_style(&self) -> bool {
        self.cells.iter().any(CellsetCell::has_style)
    }
}

// ============================================================================
// AXES
// ============================================================================

/// A `(dimension, hierarchy)` pair placed on an axis.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellsetHierarchy {
    pub dimension: String,
    pub hierarchy: String,
}

impl CellsetHierarchy {
    pub fn new(dimension: impl Into<String>, hierarchy: impl Into<String>) -> Self {
        CellsetHierarchy {
            dimension: dimension.into(),
            hierarchy: hierarchy.into(),
        }
    }

    pub fn is_measures(&self) -> bool {
        self.dimension == MEASURES && self.hierarchy == MEASURES
    }
}

/// One member of a position. The caption path is not part of the wire model:
/// only identifiers end up in the row key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellsetMember {
    pub name_path: Vec<String>,
}

impl CellsetMember {
    /// The name path without the synthetic root token.
    pub fn data_path(&self) -> &[String] {
        match self.name_path.split_first() {
            Some((first, rest)) if first == ALL_MEMBER => rest,
            _ => &self.name_path,
        }
    }
}

/// One coordinate along an axis: one member per hierarchy, in axis order.
pub type Position = Vec<CellsetMember>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellsetAxis {
    pub id: i32,

    #[serde(default)]
    pub hierarchies: Vec<CellsetHierarchy>,

    #[serde(default)]
    pub positions: Vec<Position>,
}

impl CellsetAxis {
    pub fn is_slicing(&self) -> bool {
        self.id == SLICING_AXIS_ID
    }

    pub fn is_columns(&self) -> bool {
        self.id == COLUMNS_AXIS_ID
    }
}

// ============================================================================
// CELLS
// ============================================================================

/// A cell value as sent by the engine. Null values are `None` on the cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MeasureValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl From<i64> for MeasureValue {
    fn from(value: i64) -> Self {
        MeasureValue::Integer(value)
    }
}

impl From<f64> for MeasureValue {
    fn from(value: f64) -> Self {
        MeasureValue::Float(value)
    }
}

impl From<&str> for MeasureValue {
    fn from(value: &str) -> Self {
        MeasureValue::Text(value.to_string())
    }
}

/// A color property: either a packed integer or an engine keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellColor {
    Packed(i64),
    Named(String),
}

/// Style properties attached to a cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CellProperties {
    #[serde(rename = "BACK_COLOR", default, skip_serializing_if = "Option::is_none")]
    pub back_color: Option<CellColor>,

    #[serde(rename = "FONT_FLAGS", default, skip_serializing_if = "Option::is_none")]
    pub font_flags: Option<u32>,

    #[serde(rename = "FONT_NAME", default, skip_serializing_if = "Option::is_none")]
    pub font_name: Option<String>,

    #[serde(rename = "FONT_SIZE", default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,

    #[serde(rename = "FORE_COLOR", default, skip_serializing_if = "Option::is_none")]
    pub fore_color: Option<CellColor>,
}

impl CellProperties {
    pub fn is_empty(&self) -> bool {
        self.back_color.is_none()
            && self.font_flags.is_none()
            && self.font_name.is_none()
            && self.font_size.is_none()
            && self.fore_color.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellsetCell {
    /// Linear index in the row-major flattening of the grid.
    pub ordinal: usize,

    #[serde(default)]
    pub value: Option<MeasureValue>,

    #[serde(default)]
    pub formatted_value: String,

    #[serde(default)]
    pub properties: Option<CellProperties>,
}

impl CellsetCell {
    pub fn new(ordinal: usize, value: Option<MeasureValue>, formatted_value: impl Into<String>) -> Self {
        CellsetCell {
            ordinal,
            value,
            formatted_value: formatted_value.into(),
            properties: None,
        }
    }

    pub fn with_properties(mut self, properties: CellProperties) -> Self {
        self.properties = Some(properties);
        self
    }

    pub fn has_style(&self) -> bool {
        self.properties.as_ref().is_some_and(|p| !p.is_empty())
    }
}

// ============================================================================
// DEFAULT MEMBERS
// ============================================================================

/// The member a hierarchy falls back to when no axis carries it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultMember {
    pub dimension: String,
    pub hierarchy: String,
    #[serde(default)]
    pub path: Vec<String>,
}

// ============================================================================
// DECODE OPTIONS
// ============================================================================

/// Query metadata carried through to the decoded result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeOptions {
    /// Text of the query that produced the cellset.
    #[serde(default)]
    pub mdx: Option<String>,

    /// Context values the query was executed with.
    #[serde(default)]
    pub context: BTreeMap<String, String>,
}

impl DecodeOptions {
    pub fn with_mdx(mut self, mdx: impl Into<String>) -> Self {
        self.mdx = Some(mdx.into());
        self
    }

    pub fn with_context_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }
}
