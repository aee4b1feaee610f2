//! Incremental boundary-value-problem drivers for elastoplastic and crystal-plasticity simulations
//!
//! This crate sits between a generic finite element solver and the constitutive models. It
//! generates the structured domain, tags the boundary faces, rebuilds the Dirichlet constraints
//! for every load increment and nonlinear iteration, injects material parameters into the
//! constitutive model and, for crystal plasticity, maps a voxelized grain map onto the domain.

/// Defines a type alias for the error type as a static string
pub type StrError = &'static str;

pub mod apps;
pub mod base;
pub mod fem;
pub mod material;
pub mod mesh;
pub mod orientation;
pub mod prelude;
