/// Defines the space dimension of all simulations handled here
pub const NDIM: usize = 3;

/// Defines the tolerance used to check whether a coordinate lies on a domain plane
///
/// The tolerance is relative to the cell size along the corresponding axis.
pub const BOUNDARY_TOLERANCE: f64 = 1e-8;

/// Defines the maximum number of cells of a generated mesh
pub const MAX_N_CELL: usize = 2_000_000;

/// Defines the default maximum number of cells that still triggers writing the mesh image
pub const DEFAULT_MESH_IMAGE_THRESHOLD: usize = 1000;

/// Defines the directory where the simulation result files are saved
pub const DEFAULT_OUT_DIR: &str = "/tmp/plasticity_bvp/results";

/// Defines an auxiliary directory where the test result files are saved
pub const DEFAULT_TEST_DIR: &str = "/tmp/plasticity_bvp/test";
