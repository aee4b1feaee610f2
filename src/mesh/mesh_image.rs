use super::StructuredMesh;
use crate::StrError;
use gemlab::mesh::Features;
use log::{info, warn};
use plotpy::{Curve, Plot};
use std::ffi::OsStr;
use std::fs;
use std::path::Path;

/// Angle of the receding (y) axis in the oblique projection
const OBLIQUE_ANGLE: f64 = std::f64::consts::FRAC_PI_6;

/// Scale of the receding (y) axis in the oblique projection
const OBLIQUE_SCALE: f64 = 0.5;

/// Draws a 2D oblique projection of small meshes for debugging
///
/// The image is best-effort: it is only written for serial runs with fewer cells
/// than the threshold and any failure is reported as a warning.
pub struct MeshImage {
    /// Maximum number of cells (exclusive) for which the image is written
    pub threshold: usize,
}

impl MeshImage {
    /// Allocates a new instance
    pub fn new(threshold: usize) -> Self {
        MeshImage { threshold }
    }

    /// Indicates whether the image should be written for the given mesh
    pub fn is_wanted(&self, mesh: &StructuredMesh) -> bool {
        mesh.n_cell() < self.threshold && mesh.partition.is_serial()
    }

    /// Projects the 3D coordinates onto the drawing plane
    ///
    /// ```text
    /// u = x + s y cos(α)
    /// v = z + s y sin(α)
    /// ```
    pub fn project(coords: &[f64]) -> (f64, f64) {
        let u = coords[0] + OBLIQUE_SCALE * coords[1] * f64::cos(OBLIQUE_ANGLE);
        let v = coords[2] + OBLIQUE_SCALE * coords[1] * f64::sin(OBLIQUE_ANGLE);
        (u, v)
    }

    /// Draws the edges on the boundary of the mesh
    pub fn draw(&self, mesh: &StructuredMesh) -> Plot {
        let features = Features::new(&mesh.mesh, false);
        let mut curve = Curve::new();
        curve.set_line_color("#1a1a1a").set_line_width(0.75);
        for (a, b) in features.edges.keys() {
            let (ua, va) = MeshImage::project(mesh.coords(*a));
            let (ub, vb) = MeshImage::project(mesh.coords(*b));
            curve.draw(&vec![ua, ub], &vec![va, vb]);
        }
        let mut plot = Plot::new();
        plot.add(&curve).set_equal_axes(true).set_hide_axes(true);
        plot
    }

    /// Writes the image if wanted
    ///
    /// Returns `true` if the file has been written.
    ///
    /// # Input
    ///
    /// * `filepath` -- may be a String, &str, or Path
    pub fn write<P>(&self, mesh: &StructuredMesh, filepath: &P) -> Result<bool, StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        if !self.is_wanted(mesh) {
            return Ok(false);
        }
        let path = Path::new(filepath);
        if let Some(p) = path.parent() {
            fs::create_dir_all(p).map_err(|_| "cannot create directory for the mesh image")?;
        }
        let plot = self.draw(mesh);
        plot.save(filepath)?;
        info!("writing mesh image to {}", path.display());
        Ok(true)
    }

    /// Writes the image if wanted and reports failures as warnings
    pub fn write_best_effort<P>(&self, mesh: &StructuredMesh, filepath: &P) -> bool
    where
        P: AsRef<OsStr> + ?Sized,
    {
        match self.write(mesh, filepath) {
            Ok(written) => written,
            Err(e) => {
                warn!("cannot write mesh image: {}", e);
                false
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
