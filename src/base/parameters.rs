use super::{Dof, VoxelPolicy, DEFAULT_MESH_IMAGE_THRESHOLD, MAX_N_CELL};
use serde::{Deserialize, Serialize};

/// Holds parameters for the axis-aligned rectangular domain
///
/// The number of cells along each axis is:
///
/// ```text
/// ndiv[i] = base_divisions[i] × 2^refinement × multipliers[i]
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ParamDomain {
    /// Physical extents (Lx, Ly, Lz); the domain spans from the origin to the extents
    pub extents: [f64; 3],

    /// Number of cells along each axis before refinement
    #[serde(default = "unit_counts")]
    pub base_divisions: [usize; 3],

    /// Refinement factor; each level halves the cells along every axis
    #[serde(default)]
    pub refinement: usize,

    /// Axis-specific multipliers (e.g., 5 along a long axis)
    #[serde(default = "unit_counts")]
    pub multipliers: [usize; 3],
}

/// Holds parameters for the incremental loading
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ParamLoading {
    /// Total number of planned load increments
    pub n_increment: usize,

    /// Total target displacement along the loading axis
    pub total_displacement: f64,

    /// Loading axis
    #[serde(default = "default_loading_axis")]
    pub axis: Dof,

    /// Maximum number of nonlinear iterations within one increment
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

/// Holds the elastic/plastic constants and model selectors for continuum plasticity
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ParamMaterial {
    /// First Lamé parameter λ
    pub lame_lambda: f64,

    /// Second Lamé parameter (shear modulus) μ
    pub lame_mu: f64,

    /// Initial yield stress τy
    pub yield_stress: f64,

    /// Strain hardening modulus K
    pub hardening: f64,

    /// Name of the strain energy density function
    pub strain_energy_model: String,

    /// Name of the yield function
    pub yield_model: String,
}

/// Holds parameters for the voxelized microstructure (crystal plasticity only)
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ParamMicrostructure {
    /// Path of the grain-id raster file
    pub grain_id_file: String,

    /// Number of header lines to skip in the grain-id raster file
    #[serde(default)]
    pub header_lines: usize,

    /// Path of the grain orientations file
    pub orientation_file: String,

    /// Number of voxels along each axis
    pub n_voxel: [usize; 3],

    /// Policy for points falling outside the raster
    #[serde(default)]
    pub policy: VoxelPolicy,
}

/// Holds parameters controlling the run (processes and auxiliary output)
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ParamRun {
    /// Number of processes sharing the mesh
    #[serde(default = "default_n_process")]
    pub n_process: usize,

    /// Rank of this process
    #[serde(default)]
    pub rank: usize,

    /// The mesh image is written only if the number of cells is smaller than this value
    #[serde(default = "default_mesh_image_threshold")]
    pub mesh_image_threshold: usize,

    /// Path of the mesh image (None disables the image)
    #[serde(default)]
    pub mesh_image_path: Option<String>,
}

fn unit_counts() -> [usize; 3] {
    [1, 1, 1]
}

fn default_loading_axis() -> Dof {
    Dof::Ux
}

fn default_max_iterations() -> usize {
    20
}

fn default_n_process() -> usize {
    1
}

fn default_mesh_image_threshold() -> usize {
    DEFAULT_MESH_IMAGE_THRESHOLD
}

impl ParamDomain {
    /// Returns the parameters of the 5×1×1 simple tension specimen
    pub fn sample_simple_tension(refinement: usize) -> Self {
        ParamDomain {
            extents: [5.0, 1.0, 1.0],
            base_divisions: [1, 1, 1],
            refinement,
            multipliers: [5, 1, 1],
        }
    }

    /// Returns parameters for a unit cube
    pub fn sample_unit_cube(refinement: usize) -> Self {
        ParamDomain {
            extents: [1.0, 1.0, 1.0],
            base_divisions: [1, 1, 1],
            refinement,
            multipliers: [1, 1, 1],
        }
    }

    /// Returns a message describing the first invalid value, if any
    pub fn validate(&self) -> Option<String> {
        for i in 0..3 {
            if !self.extents[i].is_finite() || self.extents[i] <= 0.0 {
                return Some(format!("extents[{}] = {:?} is incorrect; it must be > 0.0", i, self.extents[i]));
            }
            if self.base_divisions[i] < 1 {
                return Some(format!("base_divisions[{}] = 0 is incorrect; it must be ≥ 1", i));
            }
            if self.multipliers[i] < 1 {
                return Some(format!("multipliers[{}] = 0 is incorrect; it must be ≥ 1", i));
            }
        }
        if self.refinement > 16 {
            return Some(format!(
                "refinement = {} is incorrect; it must be ≤ 16",
                self.refinement
            ));
        }
        let factor = f64::powi(2.0, self.refinement as i32);
        let mut n_cell = 1.0;
        for i in 0..3 {
            n_cell *= (self.base_divisions[i] as f64) * factor * (self.multipliers[i] as f64);
        }
        if n_cell > MAX_N_CELL as f64 {
            return Some(format!(
                "the number of cells = {:e} is incorrect; it must be ≤ {}",
                n_cell, MAX_N_CELL
            ));
        }
        None
    }
}

impl ParamLoading {
    /// Returns the loading of the simple tension test (0.5 over 10 increments)
    pub fn sample_simple_tension() -> Self {
        ParamLoading {
            n_increment: 10,
            total_displacement: 0.5,
            axis: Dof::Ux,
            max_iterations: default_max_iterations(),
        }
    }

    /// Returns the displacement prescribed at each increment
    #[inline]
    pub fn delta(&self) -> f64 {
        self.total_displacement / (self.n_increment as f64)
    }

    /// Returns a message describing the first invalid value, if any
    pub fn validate(&self) -> Option<String> {
        if self.n_increment < 1 {
            return Some("n_increment = 0 is incorrect; it must be ≥ 1".to_string());
        }
        if !self.total_displacement.is_finite() {
            return Some(format!(
                "total_displacement = {:?} is incorrect; it must be finite",
                self.total_displacement
            ));
        }
        if self.max_iterations < 1 {
            return Some("max_iterations = 0 is incorrect; it must be ≥ 1".to_string());
        }
        None
    }
}

impl ParamMaterial {
    /// Returns sample parameters (aluminum-like, in GPa)
    pub fn sample() -> Self {
        ParamMaterial {
            lame_lambda: 56.25,
            lame_mu: 26.25,
            yield_stress: 0.15,
            hardening: 1.0,
            strain_energy_model: "quadlog".to_string(),
            yield_model: "von_mises".to_string(),
        }
    }
}

impl ParamMicrostructure {
    /// Returns a message describing the first invalid value, if any
    pub fn validate(&self) -> Option<String> {
        for i in 0..3 {
            if self.n_voxel[i] < 2 {
                return Some(format!(
                    "n_voxel[{}] = {} is incorrect; it must be ≥ 2",
                    i, self.n_voxel[i]
                ));
            }
        }
        if self.grain_id_file.is_empty() {
            return Some("grain_id_file must not be empty".to_string());
        }
        if self.orientation_file.is_empty() {
            return Some("orientation_file must not be empty".to_string());
        }
        if let VoxelPolicy::Reject { tolerance } = self.policy {
            if !(tolerance >= 0.0) {
                return Some(format!("voxel tolerance = {:?} is incorrect; it must be ≥ 0.0", tolerance));
            }
        }
        None
    }
}

impl ParamRun {
    /// Returns the parameters of a serial run without mesh image
    pub fn serial() -> Self {
        ParamRun {
            n_process: 1,
            rank: 0,
            mesh_image_threshold: DEFAULT_MESH_IMAGE_THRESHOLD,
            mesh_image_path: None,
        }
    }

    /// Returns a message describing the first invalid value, if any
    pub fn validate(&self) -> Option<String> {
        if self.n_process < 1 {
            return Some("n_process = 0 is incorrect; it must be ≥ 1".to_string());
        }
        if self.rank >= self.n_process {
            return Some(format!(
                "rank = {} is incorrect; it must be < n_process = {}",
                self.rank, self.n_process
            ));
        }
        None
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{ParamDomain, ParamLoading, ParamMaterial, ParamMicrostructure, ParamRun};
    use crate::base::{Dof, VoxelPolicy};

    #[test]
    fn param_domain_validate_works() {
        let mut param = ParamDomain::sample_simple_tension(0);
        assert_eq!(param.validate(), None);
        param.extents[1] = 0.0;
        assert_eq!(
            param.validate(),
            Some("extents[1] = 0.0 is incorrect; it must be > 0.0".to_string())
        );
        param.extents[1] = f64::NAN;
        assert_eq!(
            param.validate(),
            Some("extents[1] = NaN is incorrect; it must be > 0.0".to_string())
        );
        param.extents[1] = 1.0;
        param.base_divisions[2] = 0;
        assert_eq!(
            param.validate(),
            Some("base_divisions[2] = 0 is incorrect; it must be ≥ 1".to_string())
        );
        param.base_divisions[2] = 1;
        param.multipliers[0] = 0;
        assert_eq!(
            param.validate(),
            Some("multipliers[0] = 0 is incorrect; it must be ≥ 1".to_string())
        );
        param.multipliers[0] = 5;
        param.refinement = 17;
        assert_eq!(
            param.validate(),
            Some("refinement = 17 is incorrect; it must be ≤ 16".to_string())
        );
        param.refinement = 16;
        param.multipliers = [1, 1, 1];
        assert_eq!(
            param.validate(),
            Some("the number of cells = 2.81474976710656e14 is incorrect; it must be ≤ 2000000".to_string())
        );
        param.refinement = 6;
        assert_eq!(param.validate(), None);
    }

    #[test]
    fn param_domain_deserialize_uses_defaults() {
        let param: ParamDomain = serde_json::from_str("{\"extents\":[2.0,1.0,1.0]}").unwrap();
        assert_eq!(param.base_divisions, [1, 1, 1]);
        assert_eq!(param.multipliers, [1, 1, 1]);
        assert_eq!(param.refinement, 0);
    }

    #[test]
    fn param_loading_works() {
        let mut param = ParamLoading::sample_simple_tension();
        assert_eq!(param.delta(), 0.05);
        assert_eq!(param.axis, Dof::Ux);
        assert_eq!(param.validate(), None);
        param.max_iterations = 0;
        assert_eq!(
            param.validate(),
            Some("max_iterations = 0 is incorrect; it must be ≥ 1".to_string())
        );
        param.max_iterations = 10;
        param.total_displacement = f64::INFINITY;
        assert_eq!(
            param.validate(),
            Some("total_displacement = inf is incorrect; it must be finite".to_string())
        );
        param.n_increment = 0;
        assert_eq!(
            param.validate(),
            Some("n_increment = 0 is incorrect; it must be ≥ 1".to_string())
        );
    }

    #[test]
    fn param_material_sample_works() {
        let param = ParamMaterial::sample();
        assert_eq!(param.strain_energy_model, "quadlog");
        assert_eq!(param.yield_model, "von_mises");
        let clone = param.clone();
        assert_eq!(clone, param);
    }

    #[test]
    fn param_microstructure_works() {
        let mut param = ParamMicrostructure {
            grain_id_file: "grains.txt".to_string(),
            header_lines: 1,
            orientation_file: "orientations.txt".to_string(),
            n_voxel: [2, 3, 5],
            policy: VoxelPolicy::Clamp,
        };
        assert_eq!(param.validate(), None);
        param.policy = VoxelPolicy::Reject { tolerance: -1.0 };
        assert_eq!(
            param.validate(),
            Some("voxel tolerance = -1.0 is incorrect; it must be ≥ 0.0".to_string())
        );
        param.orientation_file = String::new();
        assert_eq!(param.validate(), Some("orientation_file must not be empty".to_string()));
        param.grain_id_file = String::new();
        assert_eq!(param.validate(), Some("grain_id_file must not be empty".to_string()));
        param.n_voxel[1] = 1;
        assert_eq!(
            param.validate(),
            Some("n_voxel[1] = 1 is incorrect; it must be ≥ 2".to_string())
        );
    }

    #[test]
    fn param_run_works() {
        let mut param = ParamRun::serial();
        assert_eq!(param.validate(), None);
        param.rank = 1;
        assert_eq!(
            param.validate(),
            Some("rank = 1 is incorrect; it must be < n_process = 1".to_string())
        );
        param.n_process = 0;
        assert_eq!(
            param.validate(),
            Some("n_process = 0 is incorrect; it must be ≥ 1".to_string())
        );
    }
}
