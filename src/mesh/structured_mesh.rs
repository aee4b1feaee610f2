use super::{Domain, Partition};
use crate::StrError;
use gemlab::mesh::{Cell, CellId, Features, Mesh, PointId};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Holds a face on the domain boundary and the cell it belongs to
#[derive(Clone, Debug, PartialEq)]
pub struct Face {
    /// Cell owning this face
    pub cell_id: CellId,

    /// Points of this face (the corners of a Qua4)
    pub points: Vec<PointId>,
}

/// Holds the hexahedral mesh of a rectangular domain and the ownership of its cells
pub struct StructuredMesh {
    /// The domain being discretized
    pub domain: Domain,

    /// Ownership of cells
    pub partition: Partition,

    /// The mesh (points and Hex8 cells)
    pub mesh: Mesh,

    /// Faces on the domain boundary sorted by cell
    boundary: Vec<Face>,
}

impl StructuredMesh {
    /// Allocates a new instance by subdividing the domain
    pub fn new(domain: Domain, partition: Partition) -> Result<Self, StrError> {
        let mesh = domain.subdivide()?;
        let boundary = boundary_faces(&mesh)?;
        Ok(StructuredMesh {
            domain,
            partition,
            mesh,
            boundary,
        })
    }

    /// Returns the number of points
    #[inline]
    pub fn n_point(&self) -> usize {
        self.mesh.points.len()
    }

    /// Returns the number of cells
    #[inline]
    pub fn n_cell(&self) -> usize {
        self.mesh.cells.len()
    }

    /// Returns the coordinates of a point
    #[inline]
    pub fn coords(&self, point_id: PointId) -> &[f64] {
        &self.mesh.points[point_id].coords
    }

    /// Returns all faces on the domain boundary (all processes)
    pub fn boundary_faces(&self) -> &[Face] {
        &self.boundary
    }

    /// Returns the centroid of a face
    pub fn face_centroid(&self, face: &Face) -> [f64; 3] {
        let mut centroid = [0.0; 3];
        for p in &face.points {
            for i in 0..3 {
                centroid[i] += self.mesh.points[*p].coords[i] / (face.points.len() as f64);
            }
        }
        centroid
    }

    /// Returns the centroid of a cell
    pub fn cell_centroid(&self, cell: &Cell) -> [f64; 3] {
        let mut centroid = [0.0; 3];
        for p in &cell.points {
            for i in 0..3 {
                centroid[i] += self.mesh.points[*p].coords[i] / (cell.points.len() as f64);
            }
        }
        centroid
    }

    /// Indicates whether a cell is owned by this process
    #[inline]
    pub fn is_locally_owned(&self, cell_id: CellId) -> bool {
        self.partition.is_locally_owned(cell_id, self.mesh.cells.len())
    }

    /// Returns an iterator over the cells owned by this process
    pub fn locally_owned_cells(&self) -> impl Iterator<Item = &Cell> {
        self.mesh.cells.iter().filter(move |cell| self.is_locally_owned(cell.id))
    }

    /// Returns an iterator over the boundary faces of the cells owned by this process
    pub fn locally_owned_boundary_faces(&self) -> impl Iterator<Item = &Face> {
        self.boundary.iter().filter(move |face| self.is_locally_owned(face.cell_id))
    }

    /// Returns the points of the cells owned by this process (sorted)
    pub fn locally_relevant_points(&self) -> BTreeSet<PointId> {
        let mut points = BTreeSet::new();
        for cell in self.locally_owned_cells() {
            points.extend(cell.points.iter().copied());
        }
        points
    }

    /// Returns the point at the given coordinates
    #[cfg(test)]
    pub(crate) fn point_at(&self, x: &[f64]) -> Result<PointId, StrError> {
        let tol = 1e-12 * self.domain.max.iter().fold(1.0, |acc: f64, e| acc.max(*e));
        self.mesh
            .points
            .iter()
            .find(|p| p.coords.iter().zip(x).all(|(a, b)| f64::abs(a - b) <= tol))
            .map(|p| p.id)
            .ok_or("cannot find point with the given coordinates")
    }
}

/// Finds the boundary faces and the cell owning each one of them
fn boundary_faces(mesh: &Mesh) -> Result<Vec<Face>, StrError> {
    let mut cells_via_point: HashMap<PointId, Vec<CellId>> = HashMap::new();
    for cell in &mesh.cells {
        for p in &cell.points {
            cells_via_point.entry(*p).or_insert_with(Vec::new).push(cell.id);
        }
    }
    let features = Features::new(mesh, false);
    let mut faces = Vec::with_capacity(features.faces.len());
    for feature in features.faces.values() {
        let first = feature.points.first().ok_or("boundary face has no points")?;
        let cell_id = cells_via_point
            .get(first)
            .and_then(|ids| {
                ids.iter()
                    .copied()
                    .find(|id| feature.points.iter().all(|p| mesh.cells[*id].points.contains(p)))
            })
            .ok_or("cannot find the cell of a boundary face")?;
        faces.push(Face {
            cell_id,
            points: feature.points.clone(),
        });
    }
    faces.sort_by(|a, b| (a.cell_id, &a.points).cmp(&(b.cell_id, &b.points)));
    Ok(faces)
}

impl fmt::Display for StructuredMesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mesh data")?;
        writeln!(f, "=========")?;
        writeln!(f, "ndiv = {:?}", self.domain.ndiv)?;
        writeln!(f, "npoint = {}", self.n_point())?;
        writeln!(f, "ncell = {}", self.n_cell())?;
        writeln!(f, "nface_boundary = {}", self.boundary.len())?;
        writeln!(f, "rank = {} of {}", self.partition.rank, self.partition.n_process)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
