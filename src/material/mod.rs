//! Implements the injection of material parameters into constitutive models

mod constitutive_model;
mod material_properties;
pub use crate::material::constitutive_model::*;
pub use crate::material::material_properties::*;
