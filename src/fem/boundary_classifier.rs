use crate::base::Dof;
use crate::mesh::{Domain, Face, StructuredMesh};
use crate::StrError;
use gemlab::mesh::PointId;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Defines the tag of a boundary face
///
/// The value zero is reserved for untagged faces and cannot be assigned.
pub type BoundaryTag = usize;

/// Defines an axis-aligned plane of the domain boundary
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Plane {
    /// The plane at the minimum coordinate of an axis (e.g., x = 0)
    Min(Dof),

    /// The plane at the maximum coordinate of an axis (e.g., x = x_max)
    Max(Dof),
}

impl Plane {
    /// Indicates whether a point lies on this plane (within the domain tolerance)
    pub fn contains(&self, domain: &Domain, coords: &[f64]) -> bool {
        match self {
            Plane::Min(axis) => domain.on_min(*axis, coords[axis.index()]),
            Plane::Max(axis) => domain.on_max(*axis, coords[axis.index()]),
        }
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = |axis: &Dof| match axis {
            Dof::Ux => "x",
            Dof::Uy => "y",
            Dof::Uz => "z",
        };
        match self {
            Plane::Min(axis) => write!(f, "{}=min", name(axis)),
            Plane::Max(axis) => write!(f, "{}=max", name(axis)),
        }
    }
}

/// Assigns tags to boundary faces according to the plane they lie on
///
/// The rules are checked in the order they were added and the first matching
/// plane wins. Faces matching no plane remain untagged.
pub struct BoundaryClassifier {
    rules: Vec<(Plane, BoundaryTag)>,
}

/// Holds the tags of the boundary faces owned by this process
///
/// The tags are assigned once by [BoundaryClassifier::classify()] and never change.
pub struct BoundaryTags {
    faces: BTreeMap<BoundaryTag, Vec<Face>>,
}

impl BoundaryClassifier {
    /// Allocates a new instance without rules
    pub fn new() -> Self {
        BoundaryClassifier { rules: Vec::new() }
    }

    /// Assigns a tag to all boundary faces lying on a plane
    pub fn mark(&mut self, plane: Plane, tag: BoundaryTag) -> Result<&mut Self, StrError> {
        if tag == 0 {
            return Err("boundary tag 0 is reserved for untagged faces");
        }
        if self.rules.iter().any(|(p, _)| *p == plane) {
            return Err("plane has already been assigned a tag");
        }
        self.rules.push((plane, tag));
        Ok(self)
    }

    /// Returns the tag assigned to a face centroid, if any
    pub fn tag_of(&self, domain: &Domain, centroid: &[f64]) -> Option<BoundaryTag> {
        self.rules
            .iter()
            .find(|(plane, _)| plane.contains(domain, centroid))
            .map(|(_, tag)| *tag)
    }

    /// Visits the boundary faces of all locally owned cells and assigns their tags
    pub fn classify(&self, mesh: &StructuredMesh) -> BoundaryTags {
        let mut faces: BTreeMap<BoundaryTag, Vec<Face>> = BTreeMap::new();
        for face in mesh.locally_owned_boundary_faces() {
            let centroid = mesh.face_centroid(face);
            if let Some(tag) = self.tag_of(&mesh.domain, &centroid) {
                faces.entry(tag).or_default().push(face.clone());
            }
        }
        BoundaryTags { faces }
    }
}

impl BoundaryTags {
    /// Returns the faces carrying a tag
    pub fn faces(&self, tag: BoundaryTag) -> &[Face] {
        match self.faces.get(&tag) {
            Some(faces) => faces,
            None => &[],
        }
    }

    /// Returns the points on the faces carrying a tag (sorted)
    pub fn points(&self, tag: BoundaryTag) -> BTreeSet<PointId> {
        let mut points = BTreeSet::new();
        for face in self.faces(tag) {
            points.extend(face.points.iter().copied());
        }
        points
    }

    /// Returns the number of faces carrying a tag
    pub fn count(&self, tag: BoundaryTag) -> usize {
        self.faces(tag).len()
    }

    /// Returns the total number of tagged faces
    pub fn n_tagged(&self) -> usize {
        self.faces.values().map(|faces| faces.len()).sum()
    }
}

impl fmt::Display for BoundaryTags {
    /// Prints the number of faces per tag
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Boundary tags")?;
        writeln!(f, "=============")?;
        for (tag, faces) in &self.faces {
            writeln!(f, "{} : {} faces", tag, faces.len())?;
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{BoundaryClassifier, BoundaryTag, BoundaryTags, Plane};
    use crate::base::{Dof, ParamDomain};
    use crate::mesh::{Domain, Face, Partition, StructuredMesh};
    use crate::StrError;

    fn simple_tension_mesh(refinement: usize, partition: Partition) -> Result<StructuredMesh, StrError> {
        let domain = Domain::new(&ParamDomain::sample_simple_tension(refinement))?;
        StructuredMesh::new(domain, partition)
    }

    fn tag_of_face(tags: &BoundaryTags, face: &Face) -> Option<BoundaryTag> {
        (1..5).find(|tag| tags.faces(*tag).contains(face))
    }

    fn simple_tension_classifier() -> Result<BoundaryClassifier, StrError> {
        let mut classifier = BoundaryClassifier::new();
        classifier
            .mark(Plane::Min(Dof::Ux), 1)?
            .mark(Plane::Max(Dof::Ux), 2)?
            .mark(Plane::Min(Dof::Uy), 3)?
            .mark(Plane::Min(Dof::Uz), 4)?;
        Ok(classifier)
    }

    #[test]
    fn mark_captures_errors() -> Result<(), StrError> {
        let mut classifier = BoundaryClassifier::new();
        assert_eq!(
            classifier.mark(Plane::Min(Dof::Ux), 0).err(),
            Some("boundary tag 0 is reserved for untagged faces")
        );
        classifier.mark(Plane::Min(Dof::Ux), 1)?;
        assert_eq!(
            classifier.mark(Plane::Min(Dof::Ux), 2).err(),
            Some("plane has already been assigned a tag")
        );
        Ok(())
    }

    #[test]
    fn plane_contains_and_display_work() -> Result<(), StrError> {
        let domain = Domain::new(&ParamDomain::sample_simple_tension(0))?;
        assert!(Plane::Min(Dof::Ux).contains(&domain, &[0.0, 0.3, 0.2]));
        assert!(Plane::Max(Dof::Ux).contains(&domain, &[5.0, 0.3, 0.2]));
        assert!(Plane::Max(Dof::Ux).contains(&domain, &[5.0 + 1e-13, 0.3, 0.2]));
        assert!(!Plane::Max(Dof::Ux).contains(&domain, &[4.99, 0.3, 0.2]));
        assert!(Plane::Max(Dof::Uz).contains(&domain, &[2.5, 0.5, 1.0]));
        assert_eq!(format!("{}", Plane::Min(Dof::Ux)), "x=min");
        assert_eq!(format!("{}", Plane::Max(Dof::Uy)), "y=max");
        assert_eq!(format!("{}", Plane::Min(Dof::Uz)), "z=min");
        Ok(())
    }

    #[test]
    fn tag_of_works_with_tiny_extents() -> Result<(), StrError> {
        // 5 cells of size 1e-11 along x
        let param = ParamDomain {
            extents: [5e-11, 1e-11, 1e-11],
            base_divisions: [1, 1, 1],
            refinement: 0,
            multipliers: [5, 1, 1],
        };
        let domain = Domain::new(&param)?;
        let classifier = simple_tension_classifier()?;
        let h = 0.5e-11;
        assert_eq!(classifier.tag_of(&domain, &[0.0, h, h]), Some(1));
        assert_eq!(classifier.tag_of(&domain, &[5e-11, h, h]), Some(2));
        assert_eq!(classifier.tag_of(&domain, &[1e-11, h, h]), None);
        let mut counts = [0; 5];
        for i in 0..5 {
            let x = (i as f64 + 0.5) * 1e-11;
            for centroid in &[[x, 0.0, h], [x, 1e-11, h], [x, h, 0.0], [x, h, 1e-11]] {
                if let Some(tag) = classifier.tag_of(&domain, centroid) {
                    counts[tag] += 1;
                }
            }
        }
        assert_eq!(counts, [0, 0, 0, 5, 5]);
        Ok(())
    }

    #[test]
    fn classify_works_simple_tension() -> Result<(), StrError> {
        let mesh = simple_tension_mesh(0, Partition::serial())?;
        let tags = simple_tension_classifier()?.classify(&mesh);
        assert_eq!(tags.count(1), 1);
        assert_eq!(tags.count(2), 1);
        assert_eq!(tags.count(3), 5);
        assert_eq!(tags.count(4), 5);
        assert_eq!(tags.count(5), 0);
        assert_eq!(tags.n_tagged(), 12);
        let back = tags.points(1);
        assert_eq!(back.len(), 4);
        for p in &back {
            assert_eq!(mesh.coords(*p)[0], 0.0);
        }
        let front = tags.points(2);
        assert_eq!(front.len(), 4);
        for p in &front {
            assert!(f64::abs(mesh.coords(*p)[0] - 5.0) < 1e-12);
        }
        assert_eq!(tags.points(3).len(), 12);
        Ok(())
    }

    #[test]
    fn every_face_on_a_plane_gets_its_tag() -> Result<(), StrError> {
        let mesh = simple_tension_mesh(1, Partition::serial())?;
        let classifier = simple_tension_classifier()?;
        let tags = classifier.classify(&mesh);
        let planes = [
            (Plane::Min(Dof::Ux), Some(1)),
            (Plane::Max(Dof::Ux), Some(2)),
            (Plane::Min(Dof::Uy), Some(3)),
            (Plane::Max(Dof::Uy), None),
            (Plane::Min(Dof::Uz), Some(4)),
            (Plane::Max(Dof::Uz), None),
        ];
        for face in mesh.boundary_faces() {
            let centroid = mesh.face_centroid(face);
            let matching: Vec<_> = planes.iter().filter(|(p, _)| p.contains(&mesh.domain, &centroid)).collect();
            assert_eq!(matching.len(), 1);
            assert_eq!(tag_of_face(&tags, face), matching[0].1);
        }
        assert_eq!(tags.count(1), 4);
        assert_eq!(tags.count(2), 4);
        assert_eq!(tags.count(3), 20);
        assert_eq!(tags.count(4), 20);
        Ok(())
    }

    #[test]
    fn classify_visits_locally_owned_cells_only() -> Result<(), StrError> {
        let classifier = simple_tension_classifier()?;
        let mut total = 0;
        for rank in 0..2 {
            let mesh = simple_tension_mesh(0, Partition::new(2, rank)?)?;
            let tags = classifier.classify(&mesh);
            for face in mesh.boundary_faces() {
                if !mesh.is_locally_owned(face.cell_id) {
                    assert_eq!(tag_of_face(&tags, face), None);
                }
            }
            total += tags.n_tagged();
        }
        assert_eq!(total, 12);
        Ok(())
    }

    #[test]
    fn display_works() -> Result<(), StrError> {
        let mesh = simple_tension_mesh(0, Partition::serial())?;
        let tags = simple_tension_classifier()?.classify(&mesh);
        assert_eq!(
            format!("{}", tags),
            "Boundary tags\n\
             =============\n\
             1 : 1 faces\n\
             2 : 1 faces\n\
             3 : 5 faces\n\
             4 : 5 faces\n"
        );
        Ok(())
    }
}
