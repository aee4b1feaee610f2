//! Makes available common structures needed to set up a boundary value problem
//!
//! You may write `use plasticity_bvp::prelude::*` in your code and obtain
//! access to commonly used functionality.

pub use crate::apps::{CrystalShear, SimpleTension};
pub use crate::base::{Config, Dof, ParamDomain, ParamLoading, ParamMaterial, ParamMicrostructure, ParamRun, VoxelPolicy};
pub use crate::base::{DEFAULT_OUT_DIR, DEFAULT_TEST_DIR, NDIM};
pub use crate::fem::{BoundaryClassifier, BoundaryRule, BoundaryTags, BoundaryValue, ConstraintBuilder, ConstraintSet};
pub use crate::fem::{Driver, IncrementControl, IterationOutcome, LoadStep, NonlinearSolver, Plane, Selector};
pub use crate::fem::{IncrementFunction, VectorFunction, ZeroFunction};
pub use crate::material::{inject_material, ConstitutiveModel, MaterialProperties, PlasticityModel};
pub use crate::mesh::{Domain, MeshImage, Partition, StructuredMesh};
pub use crate::orientation::{CellOrientations, Orientation, OrientationConsumer, OrientationField};
pub use crate::StrError;
