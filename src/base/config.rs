use super::{ParamDomain, ParamLoading, ParamMaterial, ParamMicrostructure, ParamRun};
use crate::StrError;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fmt;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Holds all configuration values read once at startup
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Domain extents and refinement
    pub domain: ParamDomain,

    /// Incremental loading
    pub loading: ParamLoading,

    /// Material constants for continuum plasticity
    #[serde(default)]
    pub material: Option<ParamMaterial>,

    /// Voxelized microstructure for crystal plasticity
    #[serde(default)]
    pub microstructure: Option<ParamMicrostructure>,

    /// Processes and auxiliary output
    #[serde(default = "ParamRun::serial")]
    pub run: ParamRun,
}

impl Config {
    /// Allocates a new instance with a serial run and no material or microstructure
    pub fn new(domain: ParamDomain, loading: ParamLoading) -> Self {
        Config {
            domain,
            loading,
            material: None,
            microstructure: None,
            run: ParamRun::serial(),
        }
    }

    /// Sets the refinement factor
    pub fn set_refinement(&mut self, refinement: usize) -> Result<&mut Self, StrError> {
        if refinement > 16 {
            return Err("refinement must be ≤ 16");
        }
        self.domain.refinement = refinement;
        Ok(self)
    }

    /// Sets the number of increments and the total displacement
    pub fn set_loading(&mut self, n_increment: usize, total_displacement: f64) -> Result<&mut Self, StrError> {
        if n_increment < 1 {
            return Err("n_increment must be ≥ 1");
        }
        if !total_displacement.is_finite() {
            return Err("total_displacement must be finite");
        }
        self.loading.n_increment = n_increment;
        self.loading.total_displacement = total_displacement;
        Ok(self)
    }

    /// Sets the material parameters
    pub fn set_material(&mut self, material: ParamMaterial) -> Result<&mut Self, StrError> {
        self.material = Some(material);
        Ok(self)
    }

    /// Sets the microstructure parameters
    pub fn set_microstructure(&mut self, microstructure: ParamMicrostructure) -> Result<&mut Self, StrError> {
        if microstructure.validate().is_some() {
            return Err("microstructure parameters are invalid");
        }
        self.microstructure = Some(microstructure);
        Ok(self)
    }

    /// Sets the process count and rank
    pub fn set_process(&mut self, n_process: usize, rank: usize) -> Result<&mut Self, StrError> {
        if n_process < 1 {
            return Err("n_process must be ≥ 1");
        }
        if rank >= n_process {
            return Err("rank must be < n_process");
        }
        self.run.n_process = n_process;
        self.run.rank = rank;
        Ok(self)
    }

    /// Sets the path of the mesh image (written only for small serial runs)
    pub fn set_mesh_image<P>(&mut self, path: &P, threshold: usize) -> Result<&mut Self, StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(path).to_str().ok_or("mesh image path is not valid UTF-8")?;
        self.run.mesh_image_path = Some(path.to_string());
        self.run.mesh_image_threshold = threshold;
        Ok(self)
    }

    /// Returns a message describing the first invalid value, if any
    pub fn validate(&self) -> Option<String> {
        if let Some(msg) = self.domain.validate() {
            return Some(msg);
        }
        if let Some(msg) = self.loading.validate() {
            return Some(msg);
        }
        if let Some(micro) = &self.microstructure {
            if let Some(msg) = micro.validate() {
                return Some(msg);
            }
        }
        self.run.validate()
    }

    /// Reads a JSON file containing the configuration
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn read_json<P>(full_path: &P) -> Result<Self, StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        let file = File::open(&path).map_err(|_| "cannot open configuration file")?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader).map_err(|_| "cannot parse configuration file")?;
        Ok(config)
    }

    /// Writes a JSON file with the configuration
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn write_json<P>(&self, full_path: &P) -> Result<(), StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        if let Some(p) = path.parent() {
            fs::create_dir_all(p).map_err(|_| "cannot create directory")?;
        }
        let mut file = File::create(&path).map_err(|_| "cannot create file")?;
        serde_json::to_writer_pretty(&mut file, &self).map_err(|_| "cannot write file")?;
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Configuration data")?;
        writeln!(f, "==================")?;
        writeln!(f, "extents = {:?}", self.domain.extents)?;
        writeln!(f, "base_divisions = {:?}", self.domain.base_divisions)?;
        writeln!(f, "refinement = {:?}", self.domain.refinement)?;
        writeln!(f, "multipliers = {:?}", self.domain.multipliers)?;
        writeln!(f, "n_increment = {:?}", self.loading.n_increment)?;
        writeln!(f, "total_displacement = {:?}", self.loading.total_displacement)?;
        writeln!(f, "axis = {}", self.loading.axis)?;
        writeln!(f, "max_iterations = {:?}", self.loading.max_iterations)?;
        writeln!(f, "n_process = {:?}", self.run.n_process)?;
        writeln!(f, "rank = {:?}", self.run.rank)?;
        writeln!(f, "\nMaterial parameters")?;
        writeln!(f, "===================")?;
        writeln!(f, "{:?}", self.material)?;
        writeln!(f, "\nMicrostructure")?;
        writeln!(f, "==============")?;
        writeln!(f, "{:?}", self.microstructure)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
