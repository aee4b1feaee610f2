//! Implements the boundary classification and the incremental Dirichlet constraints

mod boundary_classifier;
mod constraint_builder;
mod constraint_set;
mod driver;
mod load_step;
mod vector_function;
pub use crate::fem::boundary_classifier::*;
pub use crate::fem::constraint_builder::*;
pub use crate::fem::constraint_set::*;
pub use crate::fem::driver::*;
pub use crate::fem::load_step::*;
pub use crate::fem::vector_function::*;
