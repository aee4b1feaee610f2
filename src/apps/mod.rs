//! Implements the simple tension and crystal shear applications

mod crystal_shear;
mod setup;
mod simple_tension;
pub use crate::apps::crystal_shear::*;
pub use crate::apps::setup::*;
pub use crate::apps::simple_tension::*;
