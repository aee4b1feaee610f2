//! Implements the voxelized grain orientation field for crystal plasticity

mod orientation;
mod orientation_consumer;
mod orientation_field;
mod orientation_table;
mod voxel_grid;
pub use crate::orientation::orientation::*;
pub use crate::orientation::orientation_consumer::*;
pub use crate::orientation::orientation_field::*;
pub use crate::orientation::orientation_table::*;
pub use crate::orientation::voxel_grid::*;
