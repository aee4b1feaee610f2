use crate::base::{Dof, ParamDomain, BOUNDARY_TOLERANCE, MAX_N_CELL};
use crate::StrError;
use gemlab::mesh::{Block, Mesh};
use gemlab::shapes::GeoKind;
use std::fmt;

/// Holds the axis-aligned box of the simulation and its subdivision
///
/// The box spans from `min` (the origin) to `max` (the extents) and is
/// subdivided into `ndiv[0] × ndiv[1] × ndiv[2]` hexahedral cells.
#[derive(Clone, Debug, PartialEq)]
pub struct Domain {
    /// Minimum coordinates
    pub min: [f64; 3],

    /// Maximum coordinates
    pub max: [f64; 3],

    /// Number of cells along each axis
    pub ndiv: [usize; 3],
}

impl Domain {
    /// Allocates a new instance
    ///
    /// The number of cells along axis `i` is `base_divisions[i] × 2^refinement × multipliers[i]`.
    pub fn new(param: &ParamDomain) -> Result<Self, StrError> {
        if param.refinement > 16 {
            return Err("refinement must be ≤ 16");
        }
        let factor = 1_usize << param.refinement;
        let mut ndiv = [0; 3];
        for i in 0..3 {
            if !param.extents[i].is_finite() || param.extents[i] <= 0.0 {
                return Err("extents must be > 0.0");
            }
            if param.base_divisions[i] < 1 {
                return Err("base divisions must be ≥ 1");
            }
            if param.multipliers[i] < 1 {
                return Err("multipliers must be ≥ 1");
            }
            ndiv[i] = param.base_divisions[i]
                .checked_mul(factor)
                .and_then(|n| n.checked_mul(param.multipliers[i]))
                .ok_or("the number of divisions is too large")?;
        }
        let n_cell = ndiv[0]
            .checked_mul(ndiv[1])
            .and_then(|n| n.checked_mul(ndiv[2]))
            .ok_or("the number of cells is too large")?;
        if n_cell > MAX_N_CELL {
            return Err("the number of cells is too large");
        }
        Ok(Domain {
            min: [0.0, 0.0, 0.0],
            max: param.extents,
            ndiv,
        })
    }

    /// Returns the extent along an axis
    #[inline]
    pub fn extent(&self, axis: Dof) -> f64 {
        self.max[axis.index()] - self.min[axis.index()]
    }

    /// Returns the total number of cells
    #[inline]
    pub fn n_cell(&self) -> usize {
        self.ndiv[0] * self.ndiv[1] * self.ndiv[2]
    }

    /// Returns the total number of points
    #[inline]
    pub fn n_point(&self) -> usize {
        (self.ndiv[0] + 1) * (self.ndiv[1] + 1) * (self.ndiv[2] + 1)
    }

    /// Returns the size of one cell along an axis
    #[inline]
    pub fn cell_size(&self, axis: Dof) -> f64 {
        self.extent(axis) / (self.ndiv[axis.index()] as f64)
    }

    /// Returns the absolute tolerance for coordinate comparisons along an axis
    ///
    /// The tolerance is a fraction of the cell size, thus it scales with the domain.
    #[inline]
    pub fn tolerance(&self, axis: Dof) -> f64 {
        BOUNDARY_TOLERANCE * self.cell_size(axis)
    }

    /// Subdivides the box into hexahedra
    pub fn subdivide(&self) -> Result<Mesh, StrError> {
        let [x0, y0, z0] = self.min;
        let [x1, y1, z1] = self.max;
        let mut block = Block::new(&[
            [x0, y0, z0],
            [x1, y0, z0],
            [x1, y1, z0],
            [x0, y1, z0],
            [x0, y0, z1],
            [x1, y0, z1],
            [x1, y1, z1],
            [x0, y1, z1],
        ])?;
        block.set_ndiv(&self.ndiv)?;
        block.subdivide(GeoKind::Hex8)
    }

    /// Indicates whether a coordinate lies on the minimum plane of an axis
    #[inline]
    pub fn on_min(&self, axis: Dof, coord: f64) -> bool {
        f64::abs(coord - self.min[axis.index()]) <= self.tolerance(axis)
    }

    /// Indicates whether a coordinate lies on the maximum plane of an axis
    #[inline]
    pub fn on_max(&self, axis: Dof, coord: f64) -> bool {
        f64::abs(coord - self.max[axis.index()]) <= self.tolerance(axis)
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Domain")?;
        writeln!(f, "======")?;
        writeln!(f, "min = {:?}", self.min)?;
        writeln!(f, "max = {:?}", self.max)?;
        writeln!(f, "ndiv = {:?}", self.ndiv)?;
        writeln!(f, "ncell = {}", self.n_cell())?;
        writeln!(f, "npoint = {}", self.n_point())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
