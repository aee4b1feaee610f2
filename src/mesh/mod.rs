//! Implements the structured rectangular domain

mod domain;
mod mesh_image;
mod partition;
mod structured_mesh;
pub use crate::mesh::domain::*;
pub use crate::mesh::mesh_image::*;
pub use crate::mesh::partition::*;
pub use crate::mesh::structured_mesh::*;
