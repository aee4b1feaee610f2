use super::{check_config, generate_mesh};
use crate::base::{Config, Dof, ParamMicrostructure, NDIM};
use crate::fem::{BoundaryClassifier, BoundaryRule, ConstraintBuilder, Driver, IncrementFunction, Plane, Selector};
use crate::mesh::Domain;
use crate::orientation::{OrientationConsumer, OrientationField};
use crate::StrError;
use log::error;

/// Implements the simple shear test of a BCC polycrystal (crystal plasticity)
///
/// The boundary values are per-point predicates; when a point lies on more than
/// one plane, the first rule below wins:
///
/// ```text
/// z = z_max : Ux = Δu at the first iteration of each increment; Uy = Uz = 0
/// z = 0     : Ux = Uy = Uz = 0
/// y = y_max : Uy = Uz = 0
/// y = 0     : Uy = Uz = 0
/// x = x_max : Uy = Uz = 0
/// x = 0     : Uy = Uz = 0
/// ```
pub struct CrystalShear {
    /// Configuration
    pub config: Config,
}

impl CrystalShear {
    /// Allocates a new instance
    pub fn new(config: Config) -> Result<Self, StrError> {
        check_config(&config)?;
        if config.microstructure.is_none() {
            error!("the crystal shear test needs microstructure parameters");
            return Err("microstructure parameters are missing");
        }
        Ok(CrystalShear { config })
    }

    /// Returns the constraint builder with the shear boundary rules
    pub fn builder(&self) -> Result<ConstraintBuilder, StrError> {
        let loading = &self.config.loading;
        let shear = IncrementFunction::new(NDIM, loading.axis, loading.delta())?;
        let lateral = [Dof::Uy, Dof::Uz];
        let mut builder = ConstraintBuilder::new();
        builder
            .add(BoundaryRule::loaded(
                Selector::Plane(Plane::Max(Dof::Uz)),
                &Dof::all(),
                Box::new(shear),
            ))?
            .add(BoundaryRule::fixed(Selector::Plane(Plane::Min(Dof::Uz)), &Dof::all()))?
            .add(BoundaryRule::fixed(Selector::Plane(Plane::Max(Dof::Uy)), &lateral))?
            .add(BoundaryRule::fixed(Selector::Plane(Plane::Min(Dof::Uy)), &lateral))?
            .add(BoundaryRule::fixed(Selector::Plane(Plane::Max(Dof::Ux)), &lateral))?
            .add(BoundaryRule::fixed(Selector::Plane(Plane::Min(Dof::Ux)), &lateral))?;
        Ok(builder)
    }

    /// Returns the microstructure parameters
    pub fn microstructure(&self) -> Result<&ParamMicrostructure, StrError> {
        self.config
            .microstructure
            .as_ref()
            .ok_or("microstructure parameters are missing")
    }

    /// Loads the orientation field spanning the domain
    pub fn orientation_field(&self, domain: &Domain) -> Result<OrientationField, StrError> {
        OrientationField::load(self.microstructure()?, domain)
    }

    /// Generates the mesh and allocates the driver
    ///
    /// No boundary tags are assigned; all rules select points by plane.
    pub fn driver(&self) -> Result<Driver, StrError> {
        let mesh = generate_mesh(&self.config)?;
        let tags = BoundaryClassifier::new().classify(&mesh);
        Driver::new(mesh, tags, self.builder()?, self.config.loading.clone())
    }

    /// Allocates the driver, loads the orientation field and feeds it to the model
    ///
    /// The field is loaded before any solve step; malformed files abort the setup.
    pub fn setup(&self, model: &mut dyn OrientationConsumer) -> Result<(Driver, OrientationField), StrError> {
        let driver = self.driver()?;
        let field = self.orientation_field(&driver.mesh.domain)?;
        model.assign_orientations(&driver.mesh, &field)?;
        Ok((driver, field))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
