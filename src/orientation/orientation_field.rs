use super::{Orientation, OrientationTable, VoxelGrid};
use crate::base::{ParamMicrostructure, VoxelPolicy};
use crate::mesh::Domain;
use crate::StrError;
use log::{error, info};
use std::fmt;

/// Maps physical points to the orientation of the grain occupying their voxel
///
/// The field is loaded once at startup and is read-only afterwards.
///
/// ```text
/// stencil[a] = extent[a] / (n_voxel[a] - 1)
/// index[a]   = floor((x[a] - origin[a]) / stencil[a])   (clamped to 0..n_voxel[a])
/// ```
#[derive(Clone, Debug)]
pub struct OrientationField {
    grid: VoxelGrid,
    table: OrientationTable,
    origin: [f64; 3],
    extents: [f64; 3],
    stencil: [f64; 3],
    policy: VoxelPolicy,
}

impl OrientationField {
    /// Allocates a new instance from a raster and a table
    ///
    /// Every grain id in the raster must have an orientation.
    pub fn new(
        grid: VoxelGrid,
        table: OrientationTable,
        origin: [f64; 3],
        extents: [f64; 3],
        policy: VoxelPolicy,
    ) -> Result<Self, StrError> {
        let mut stencil = [0.0; 3];
        for a in 0..3 {
            if grid.n_voxel[a] < 2 {
                return Err("the number of voxels must be ≥ 2 along each axis");
            }
            if !extents[a].is_finite() || extents[a] <= 0.0 {
                return Err("extents must be > 0.0");
            }
            stencil[a] = extents[a] / ((grid.n_voxel[a] - 1) as f64);
        }
        if let VoxelPolicy::Reject { tolerance } = policy {
            if !(tolerance >= 0.0) {
                return Err("voxel tolerance must be ≥ 0.0");
            }
        }
        if let Some(id) = grid.ids().iter().find(|id| table.get(**id).is_none()) {
            error!("grain {} of the raster is missing in the orientation table", id);
            return Err("grain id in raster has no orientation");
        }
        Ok(OrientationField {
            grid,
            table,
            origin,
            extents,
            stencil,
            policy,
        })
    }

    /// Loads the raster and the table for a domain
    pub fn load(param: &ParamMicrostructure, domain: &Domain) -> Result<Self, StrError> {
        if let Some(message) = param.validate() {
            error!("{}", message);
            return Err("microstructure parameters are invalid");
        }
        let grid = VoxelGrid::read(&param.grain_id_file, param.header_lines, param.n_voxel)?;
        let table = OrientationTable::read(&param.orientation_file)?;
        let mut extents = [0.0; 3];
        for a in 0..3 {
            extents[a] = domain.max[a] - domain.min[a];
        }
        let field = OrientationField::new(grid, table, domain.min, extents, param.policy)?;
        info!(
            "loaded {} voxels and {} grain orientations",
            field.grid.n_voxel_total(),
            field.table.len()
        );
        Ok(field)
    }

    /// Returns the physical size of one voxel along each axis
    pub fn stencil(&self) -> [f64; 3] {
        self.stencil
    }

    /// Returns the voxel raster
    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    /// Returns the orientation table
    pub fn table(&self) -> &OrientationTable {
        &self.table
    }

    /// Returns the voxel containing a point
    pub fn voxel_index(&self, x: &[f64]) -> Result<[usize; 3], StrError> {
        if x.len() != 3 {
            return Err("dimension mismatch: point must have 3 coordinates");
        }
        let mut index = [0; 3];
        for a in 0..3 {
            if !x[a].is_finite() {
                return Err("point coordinates must be finite");
            }
            if let VoxelPolicy::Reject { tolerance } = self.policy {
                let lower = self.origin[a] - tolerance;
                let upper = self.origin[a] + self.extents[a] + tolerance;
                if x[a] < lower || x[a] > upper {
                    return Err("point is outside the voxel raster");
                }
            }
            let t = f64::floor((x[a] - self.origin[a]) / self.stencil[a]);
            let last = self.grid.n_voxel[a] - 1;
            index[a] = if t <= 0.0 {
                0
            } else if t >= last as f64 {
                last
            } else {
                t as usize
            };
        }
        Ok(index)
    }

    /// Returns the grain id at a point
    pub fn grain_id_at(&self, x: &[f64]) -> Result<usize, StrError> {
        let [i, j, k] = self.voxel_index(x)?;
        Ok(self.grid.id(i, j, k))
    }

    /// Returns the orientation at a point
    pub fn orientation_at(&self, x: &[f64]) -> Result<&Orientation, StrError> {
        let id = self.grain_id_at(x)?;
        self.table.get(id).ok_or("grain id in raster has no orientation")
    }
}

impl fmt::Display for OrientationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Orientation field")?;
        writeln!(f, "=================")?;
        writeln!(f, "n_voxel = {:?}", self.grid.n_voxel)?;
        writeln!(f, "stencil = {:?}", self.stencil)?;
        writeln!(f, "n_grain = {}", self.table.len())?;
        writeln!(f, "policy = {:?}", self.policy)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::OrientationField;
    use crate::base::{ParamDomain, ParamMicrostructure, VoxelPolicy};
    use crate::mesh::Domain;
    use crate::orientation::{Orientation, OrientationTable, VoxelGrid};
    use crate::StrError;

    fn table_2x2x2() -> Result<OrientationTable, StrError> {
        let mut text = String::new();
        for id in 1..9 {
            text.push_str(&format!("{} {} 0.0 0.0\n", id, (id as f64) / 10.0));
        }
        OrientationTable::from_reader(text.as_bytes())
    }

    fn field_2x2x2(policy: VoxelPolicy) -> Result<OrientationField, StrError> {
        let grid = VoxelGrid::new([2, 2, 2], vec![1, 2, 3, 4, 5, 6, 7, 8])?;
        OrientationField::new(grid, table_2x2x2()?, [0.0, 0.0, 0.0], [1.0, 1.0, 1.0], policy)
    }

    fn microstructure() -> ParamMicrostructure {
        ParamMicrostructure {
            grain_id_file: "data/microstructure/grain_ids_2x2x2.txt".to_string(),
            header_lines: 2,
            orientation_file: "data/microstructure/orientations_2x2x2.txt".to_string(),
            n_voxel: [2, 2, 2],
            policy: VoxelPolicy::Clamp,
        }
    }

    #[test]
    fn new_captures_errors() -> Result<(), StrError> {
        let grid = VoxelGrid::new([1, 2, 2], vec![1, 2, 3, 4])?;
        assert_eq!(
            OrientationField::new(grid, table_2x2x2()?, [0.0; 3], [1.0; 3], VoxelPolicy::Clamp).err(),
            Some("the number of voxels must be ≥ 2 along each axis")
        );
        let grid = VoxelGrid::new([2, 2, 2], vec![1, 2, 3, 4, 5, 6, 7, 8])?;
        assert_eq!(
            OrientationField::new(grid.clone(), table_2x2x2()?, [0.0; 3], [1.0, 0.0, 1.0], VoxelPolicy::Clamp).err(),
            Some("extents must be > 0.0")
        );
        assert_eq!(
            OrientationField::new(
                grid,
                table_2x2x2()?,
                [0.0; 3],
                [1.0; 3],
                VoxelPolicy::Reject { tolerance: f64::NAN }
            )
            .err(),
            Some("voxel tolerance must be ≥ 0.0")
        );
        let grid = VoxelGrid::new([2, 2, 2], vec![1, 2, 3, 4, 5, 6, 7, 9])?;
        assert_eq!(
            OrientationField::new(grid, table_2x2x2()?, [0.0; 3], [1.0; 3], VoxelPolicy::Clamp).err(),
            Some("grain id in raster has no orientation")
        );
        Ok(())
    }

    #[test]
    fn voxel_index_works() -> Result<(), StrError> {
        let field = field_2x2x2(VoxelPolicy::Clamp)?;
        assert_eq!(field.stencil(), [1.0, 1.0, 1.0]);
        assert_eq!(field.voxel_index(&[0.6, 0.6, 0.6])?, [0, 0, 0]);
        assert_eq!(field.voxel_index(&[0.0, 0.0, 0.0])?, [0, 0, 0]);
        assert_eq!(field.voxel_index(&[0.999, 0.5, 0.0])?, [0, 0, 0]);
        // points exactly on a voxel boundary belong to the upper voxel
        assert_eq!(field.voxel_index(&[1.0, 1.0, 1.0])?, [1, 1, 1]);
        assert_eq!(field.voxel_index(&[1.0, 0.2, 0.0])?, [1, 0, 0]);
        assert_eq!(
            field.voxel_index(&[1.0, 0.2]).err(),
            Some("dimension mismatch: point must have 3 coordinates")
        );
        assert_eq!(
            field.voxel_index(&[f64::NAN, 0.2, 0.0]).err(),
            Some("point coordinates must be finite")
        );
        Ok(())
    }

    #[test]
    fn clamp_policy_works() -> Result<(), StrError> {
        let field = field_2x2x2(VoxelPolicy::Clamp)?;
        // just outside due to round-off
        assert_eq!(field.voxel_index(&[1.0 + 1e-12, -1e-12, 0.5])?, [1, 0, 0]);
        // far outside
        assert_eq!(field.voxel_index(&[7.0, -3.0, 0.5])?, [1, 0, 0]);
        Ok(())
    }

    #[test]
    fn reject_policy_works() -> Result<(), StrError> {
        let field = field_2x2x2(VoxelPolicy::Reject { tolerance: 1e-9 })?;
        assert_eq!(field.voxel_index(&[1.0 + 1e-12, -1e-12, 0.5])?, [1, 0, 0]);
        assert_eq!(field.voxel_index(&[1.0, 1.0, 1.0])?, [1, 1, 1]);
        assert_eq!(
            field.voxel_index(&[1.5, 0.5, 0.5]).err(),
            Some("point is outside the voxel raster")
        );
        assert_eq!(
            field.voxel_index(&[0.5, -0.01, 0.5]).err(),
            Some("point is outside the voxel raster")
        );
        Ok(())
    }

    #[test]
    fn orientation_at_works() -> Result<(), StrError> {
        let field = field_2x2x2(VoxelPolicy::Clamp)?;
        assert_eq!(field.grain_id_at(&[0.6, 0.6, 0.6])?, 1);
        assert_eq!(field.orientation_at(&[0.6, 0.6, 0.6])?, &Orientation::new([0.1, 0.0, 0.0]));
        assert_eq!(field.grain_id_at(&[1.0, 0.0, 1.0])?, 6);
        assert_eq!(field.grain_id_at(&[1.0, 1.0, 1.0])?, 8);
        // repeated calls return the same result
        let a = *field.orientation_at(&[0.25, 0.75, 1.0])?;
        let b = *field.orientation_at(&[0.25, 0.75, 1.0])?;
        assert_eq!(a, b);
        Ok(())
    }

    #[test]
    fn load_works() -> Result<(), StrError> {
        let domain = Domain::new(&ParamDomain::sample_unit_cube(1))?;
        let field = OrientationField::load(&microstructure(), &domain)?;
        assert_eq!(field.stencil(), [1.0, 1.0, 1.0]);
        assert_eq!(field.grid().n_voxel_total(), 8);
        assert_eq!(field.table().len(), 8);
        assert_eq!(field.orientation_at(&[0.6, 0.6, 0.6])?, &Orientation::new([0.0, 0.0, 0.0]));
        assert_eq!(field.orientation_at(&[1.0, 1.0, 1.0])?, &Orientation::new([0.1, 0.1, 0.1]));
        assert_eq!(
            format!("{}", field),
            "Orientation field\n\
             =================\n\
             n_voxel = [2, 2, 2]\n\
             stencil = [1.0, 1.0, 1.0]\n\
             n_grain = 8\n\
             policy = Clamp\n"
        );
        Ok(())
    }

    #[test]
    fn load_captures_errors() -> Result<(), StrError> {
        let domain = Domain::new(&ParamDomain::sample_unit_cube(0))?;
        let mut param = microstructure();
        param.n_voxel = [2, 2, 1];
        assert_eq!(
            OrientationField::load(&param, &domain).err(),
            Some("microstructure parameters are invalid")
        );
        param.n_voxel = [2, 2, 3];
        assert_eq!(
            OrientationField::load(&param, &domain).err(),
            Some("grain-id file has too few rows")
        );
        param.n_voxel = [2, 2, 2];
        param.header_lines = 1;
        assert_eq!(
            OrientationField::load(&param, &domain).err(),
            Some("cannot parse grain id")
        );
        Ok(())
    }
}
