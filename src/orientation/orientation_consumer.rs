use super::{Orientation, OrientationField};
use crate::mesh::StructuredMesh;
use crate::StrError;
use gemlab::mesh::CellId;
use std::collections::BTreeMap;

/// Specifies the initialization hook of crystal plasticity models
pub trait OrientationConsumer {
    /// Receives the orientation field before the first solve
    fn assign_orientations(&mut self, mesh: &StructuredMesh, field: &OrientationField) -> Result<(), StrError>;
}

/// Holds the grain and orientation of each locally owned cell (sampled at the cell centroid)
#[derive(Clone, Debug, Default)]
pub struct CellOrientations {
    /// Maps cell ids to grain ids
    pub grain_ids: BTreeMap<CellId, usize>,

    /// Maps cell ids to orientations
    pub orientations: BTreeMap<CellId, Orientation>,
}

impl CellOrientations {
    /// Allocates a new empty instance
    pub fn new() -> Self {
        CellOrientations::default()
    }

    /// Returns the number of cells of each grain
    pub fn grain_sizes(&self) -> BTreeMap<usize, usize> {
        let mut sizes = BTreeMap::new();
        for id in self.grain_ids.values() {
            *sizes.entry(*id).or_insert(0) += 1;
        }
        sizes
    }
}

impl OrientationConsumer for CellOrientations {
    fn assign_orientations(&mut self, mesh: &StructuredMesh, field: &OrientationField) -> Result<(), StrError> {
        self.grain_ids.clear();
        self.orientations.clear();
        for cell in mesh.locally_owned_cells() {
            let centroid = mesh.cell_centroid(cell);
            self.grain_ids.insert(cell.id, field.grain_id_at(&centroid)?);
            self.orientations.insert(cell.id, *field.orientation_at(&centroid)?);
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
