//! FILENAME: core/cellset-engine/src/discovery.rs
//! PURPOSE: Metadata collaborators consumed by the decoder.
//! CONTEXT: The decoder never talks to a server. Level metadata and level
//! data types are provided through the two traits below. `Discovery` is an
//! in-memory implementation built from the server's discovery document.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::CellsetResult;

/// Level type of the synthetic root level of a hierarchy.
pub const ALL_LEVEL_TYPE: &str = "ALL";

/// Identifies one row-index column: `(hierarchy name, level name)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LevelCoordinate {
    pub hierarchy: String,
    pub level: String,
}

impl LevelCoordinate {
    pub fn new(hierarchy: impl Into<String>, level: impl Into<String>) -> Self {
        LevelCoordinate {
            hierarchy: hierarchy.into(),
            level: level.into(),
        }
    }
}

/// One level of a hierarchy as reported by discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDescription {
    pub name: String,
    #[serde(rename = "type")]
    pub level_type: String,
}

impl LevelDescription {
    pub fn new(name: impl Into<String>, level_type: impl Into<String>) -> Self {
        LevelDescription {
            name: name.into(),
            level_type: level_type.into(),
        }
    }

    pub fn is_all_level(&self) -> bool {
        self.level_type == ALL_LEVEL_TYPE
    }
}

// ============================================================================
// COLLABORATOR TRAITS
// ============================================================================

/// Supplies the ordered levels (root to leaf) of a hierarchy.
pub trait LevelDiscovery {
    /// Returns `None` when the cube has no such hierarchy.
    fn levels_of(&self, cube: &str, dimension: &str, hierarchy: &str) -> Option<Vec<LevelDescription>>;
}

/// Supplies one data type label per level coordinate, in the same order.
pub trait LevelTypeLookup {
    fn type_labels_of(&self, cube: &str, levels: &[LevelCoordinate]) -> Vec<String>;
}

impl<F> LevelTypeLookup for F
where
    F: Fn(&str, &[LevelCoordinate]) -> Vec<String>,
{
    fn type_labels_of(&self, cube: &str, levels: &[LevelCoordinate]) -> Vec<String> {
        self(cube, levels)
    }
}

// ============================================================================
// DISCOVERY DOCUMENT
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscoveryDocument {
    #[serde(default)]
    pub catalogs: Vec<DiscoveryCatalog>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryCatalog {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cubes: Vec<DiscoveryCube>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryCube {
    pub name: String,
    #[serde(default)]
    pub dimensions: Vec<DiscoveryDimension>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryDimension {
    pub name: String,
    #[serde(default)]
    pub hierarchies: Vec<DiscoveryHierarchy>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryHierarchy {
    pub name: String,
    #[serde(default)]
    pub levels: Vec<LevelDescription>,
}

/// Levels keyed by `(dimension, hierarchy)` for one cube.
type HierarchyIndex = FxHashMap<(String, String), Vec<LevelDescription>>;

/// In-memory level metadata, indexed per cube.
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    cubes: FxHashMap<String, HierarchyIndex>,
}

impl Discovery {
    pub fn new() -> Self {
        Discovery::default()
    }

    pub fn from_document(document: &DiscoveryDocument) -> Self {
        let mut discovery = Discovery::new();
        for cube in document.catalogs.iter().flat_map(|c| c.cubes.iter()) {
            // First catalog wins when two catalogs expose the same cube name.
            if discovery.cubes.contains_key(&cube.name) {
                continue;
            }
            for dimension in &cube.dimensions {
                for hierarchy in &dimension.hierarchies {
                    discovery.add_hierarchy(
                        &cube.name,
                        &dimension.name,
                        &hierarchy.name,
                        hierarchy.levels.clone(),
                    );
                }
            }
            discovery.cubes.entry(cube.name.clone()).or_default();
        }
        discovery
    }

    pub fn from_json(payload: &str) -> CellsetResult<Self> {
        let document: DiscoveryDocument = serde_json::from_str(payload)?;
        Ok(Discovery::from_document(&document))
    }

    /// Registers (or replaces) the levels of one hierarchy.
    pub fn add_hierarchy(
        &mut self,
        cube: &str,
        dimension: &str,
        hierarchy: &str,
        levels: Vec<LevelDescription>,
    ) {
        self.cubes
            .entry(cube.to_string())
            .or_default()
            .insert((dimension.to_string(), hierarchy.to_string()), levels);
    }

    pub fn has_cube(&self, cube: &str) -> bool {
        self.cubes.contains_key(cube)
    }
}

impl LevelDiscovery for Discovery {
    fn levels_of(&self, cube: &str, dimension: &str, hierarchy: &str) -> Option<Vec<LevelDescription>> {
        self.cubes
            .get(cube)?
            .get(&(dimension.to_string(), hierarchy.to_string()))
            .cloned()
    }
}
