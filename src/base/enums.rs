use crate::StrError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Defines degrees-of-freedom (DOF) types
///
/// Note: The fixed numbering scheme assists in sorting the DOFs and
/// corresponds to the axis index of the displacement component.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Deserialize, Serialize)]
pub enum Dof {
    /// Displacement along the first dimension
    Ux = 0,

    /// Displacement along the second dimension
    Uy = 1,

    /// Displacement along the third dimension
    Uz = 2,
}

impl Dof {
    /// Returns all displacement DOFs sorted by axis
    pub fn all() -> [Dof; 3] {
        [Dof::Ux, Dof::Uy, Dof::Uz]
    }

    /// Returns the axis index (0, 1, or 2)
    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Returns the DOF corresponding to an axis index
    pub fn from_index(axis: usize) -> Result<Self, StrError> {
        match axis {
            0 => Ok(Dof::Ux),
            1 => Ok(Dof::Uy),
            2 => Ok(Dof::Uz),
            _ => Err("axis index must be 0, 1, or 2"),
        }
    }
}

/// Defines how points falling outside the voxel raster are handled
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub enum VoxelPolicy {
    /// Clamps the voxel index to the valid range (clamp-to-edge)
    Clamp,

    /// Rejects points farther than `tolerance` outside the domain
    ///
    /// Points within the tolerance band (e.g., due to round-off) are clamped.
    Reject { tolerance: f64 },
}

impl Default for VoxelPolicy {
    fn default() -> Self {
        VoxelPolicy::Clamp
    }
}

impl fmt::Display for Dof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
