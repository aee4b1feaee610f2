use crate::StrError;
use log::error;
use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Holds the grain ids of a voxelized microstructure
///
/// The voxel (i, j, k) is stored at `i + nx × (j + ny × k)`.
#[derive(Clone, Debug, PartialEq)]
pub struct VoxelGrid {
    /// Number of voxels along each axis
    pub n_voxel: [usize; 3],

    /// Grain id of each voxel
    ids: Vec<usize>,
}

impl VoxelGrid {
    /// Allocates a new instance from a list of grain ids
    pub fn new(n_voxel: [usize; 3], ids: Vec<usize>) -> Result<Self, StrError> {
        if n_voxel.iter().any(|n| *n < 1) {
            return Err("the number of voxels must be ≥ 1 along each axis");
        }
        if ids.len() != n_voxel[0] * n_voxel[1] * n_voxel[2] {
            return Err("the number of grain ids must equal the number of voxels");
        }
        Ok(VoxelGrid { n_voxel, ids })
    }

    /// Reads the grain-id raster from a file
    ///
    /// After `header_lines` skipped lines, each non-empty row lists `nx` grain ids;
    /// there are `ny × nz` rows with y varying fastest.
    ///
    /// # Input
    ///
    /// * `full_path` -- may be a String, &str, or Path
    pub fn read<P>(full_path: &P, header_lines: usize, n_voxel: [usize; 3]) -> Result<Self, StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path);
        let file = File::open(path).map_err(|_| "cannot open grain-id file")?;
        VoxelGrid::from_reader(BufReader::new(file), header_lines, n_voxel)
    }

    /// Reads the grain-id raster from a buffered reader
    pub fn from_reader<R>(reader: R, header_lines: usize, n_voxel: [usize; 3]) -> Result<Self, StrError>
    where
        R: BufRead,
    {
        let [nx, ny, nz] = n_voxel;
        if nx < 1 || ny < 1 || nz < 1 {
            return Err("the number of voxels must be ≥ 1 along each axis");
        }
        let n_row = ny * nz;
        let mut ids = Vec::with_capacity(nx * n_row);
        let mut n_line = 0;
        for line in reader.lines() {
            let line = line.map_err(|_| "cannot read line of grain-id file")?;
            n_line += 1;
            if n_line <= header_lines {
                continue;
            }
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if ids.len() == nx * n_row {
                error!("grain-id file, line {}: more than {} rows", n_line, n_row);
                return Err("grain-id file has too many rows");
            }
            let mut count = 0;
            for token in trimmed.split_whitespace() {
                let id = token.parse::<usize>().map_err(|_| {
                    error!("grain-id file, line {}: invalid grain id '{}'", n_line, token);
                    "cannot parse grain id"
                })?;
                ids.push(id);
                count += 1;
            }
            if count != nx {
                error!("grain-id file, line {}: found {} ids instead of {}", n_line, count, nx);
                return Err("grain-id row has the wrong number of entries");
            }
        }
        if n_line < header_lines {
            return Err("grain-id file is shorter than its header");
        }
        if ids.len() != nx * n_row {
            error!("grain-id file: found {} rows instead of {}", ids.len() / nx, n_row);
            return Err("grain-id file has too few rows");
        }
        Ok(VoxelGrid { n_voxel, ids })
    }

    /// Returns the grain id of a voxel
    #[inline]
    pub fn id(&self, i: usize, j: usize, k: usize) -> usize {
        self.ids[i + self.n_voxel[0] * (j + self.n_voxel[1] * k)]
    }

    /// Returns all grain ids
    pub fn ids(&self) -> &[usize] {
        &self.ids
    }

    /// Returns the total number of voxels
    pub fn n_voxel_total(&self) -> usize {
        self.ids.len()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
