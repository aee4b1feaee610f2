//! Implements the base structures shared by the domain, boundary conditions and materials

mod config;
mod constants;
mod enums;
mod parameters;
pub use crate::base::config::*;
pub use crate::base::constants::*;
pub use crate::base::enums::*;
pub use crate::base::parameters::*;
