//! FILENAME: core/cellset-engine/src/lib.rs
//! Cellset decoding subsystem.
//!
//! This crate turns the raw response of a multidimensional query (a
//! "cellset": axes of member paths plus a flat array of cells) into a
//! tabular result with ordered columns, an optional row key and parallel
//! grids of values, formatted values and styles. It performs no I/O: level
//! metadata and level data types come from the collaborator traits in
//! `discovery`.
//!
//! Layers:
//! - `definition`: Wire model of the cellset (what the engine SENDS)
//! - `axes`, `row_key`, `coercion`, `grid`, `style`: Decoding steps
//! - `view`: Tabular output (WHAT the caller gets)
//! - `engine`: Orchestration (HOW the steps are chained)

pub mod axes;
pub mod coercion;
pub mod definition;
pub mod discovery;
pub mod engine;
pub mod error;
pub mod grid;
pub mod row_key;
pub mod style;
pub mod view;


pub use definition::*;
pub use discovery::{
    Discovery, DiscoveryDocument, LevelCoordinate, LevelDescription, LevelDiscovery,
    LevelTypeLookup,
};
pub use engine::{decode_cellset, CellsetDecoder};
pub use error::{CellsetError, CellsetResult};
pub use style::properties_to_css;
pub use view::{IndexColumn, QueryResult, RowKey};
