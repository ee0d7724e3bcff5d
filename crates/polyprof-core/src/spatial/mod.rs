//! Spatial lookup for profile bins
//!
//! - Bin geometry abstraction and 2D bounding boxes
//! - Regular super-grid mapping cells to candidate bins

pub mod bbox;
pub mod grid;

pub use bbox::{BinGeometry, BoundingBox};
pub use grid::CellGrid;
