use super::{check_config, generate_mesh};
use crate::base::{Config, Dof, ParamMaterial, NDIM};
use crate::fem::{
    BoundaryClassifier, BoundaryRule, BoundaryTag, ConstraintBuilder, Driver, IncrementFunction, Plane, Selector,
};
use crate::material::ConstitutiveModel;
use crate::StrError;
use log::error;

/// Tag of the back boundary (x = 0)
pub const TAG_BACK: BoundaryTag = 1;

/// Tag of the front boundary (x = x_max), where the displacement is applied
pub const TAG_FRONT: BoundaryTag = 2;

/// Tag of the left boundary (y = 0)
pub const TAG_LEFT: BoundaryTag = 3;

/// Tag of the bottom boundary (z = 0)
pub const TAG_BOTTOM: BoundaryTag = 4;

/// Implements the simple tension test of an elongated continuum plasticity specimen
///
/// ```text
/// x = 0     : Ux = 0
/// x = x_max : Ux = Δu at the first iteration of each increment
/// y = 0     : Uy = 0
/// z = 0     : Uz = 0
/// ```
pub struct SimpleTension {
    /// Configuration
    pub config: Config,
}

impl SimpleTension {
    /// Allocates a new instance
    pub fn new(config: Config) -> Result<Self, StrError> {
        check_config(&config)?;
        if config.material.is_none() {
            error!("the simple tension test needs material parameters");
            return Err("material parameters are missing");
        }
        Ok(SimpleTension { config })
    }

    /// Returns the classifier assigning the four boundary tags
    pub fn classifier() -> Result<BoundaryClassifier, StrError> {
        let mut classifier = BoundaryClassifier::new();
        classifier
            .mark(Plane::Min(Dof::Ux), TAG_BACK)?
            .mark(Plane::Max(Dof::Ux), TAG_FRONT)?
            .mark(Plane::Min(Dof::Uy), TAG_LEFT)?
            .mark(Plane::Min(Dof::Uz), TAG_BOTTOM)?;
        Ok(classifier)
    }

    /// Returns the constraint builder with the tension boundary rules
    pub fn builder(&self) -> Result<ConstraintBuilder, StrError> {
        let loading = &self.config.loading;
        let delta = IncrementFunction::new(NDIM, loading.axis, loading.delta())?;
        let mut builder = ConstraintBuilder::new();
        builder
            .add(BoundaryRule::loaded(Selector::Tag(TAG_FRONT), &[Dof::Ux], Box::new(delta)))?
            .add(BoundaryRule::fixed(Selector::Tag(TAG_BACK), &[Dof::Ux]))?
            .add(BoundaryRule::fixed(Selector::Tag(TAG_LEFT), &[Dof::Uy]))?
            .add(BoundaryRule::fixed(Selector::Tag(TAG_BOTTOM), &[Dof::Uz]))?;
        Ok(builder)
    }

    /// Returns the material parameters
    pub fn material(&self) -> Result<&ParamMaterial, StrError> {
        self.config.material.as_ref().ok_or("material parameters are missing")
    }

    /// Generates the mesh, tags the boundaries and allocates the driver
    pub fn driver(&self) -> Result<Driver, StrError> {
        let mesh = generate_mesh(&self.config)?;
        let tags = SimpleTension::classifier()?.classify(&mesh);
        Driver::new(mesh, tags, self.builder()?, self.config.loading.clone())
    }

    /// Allocates the driver and injects the material parameters into the model
    pub fn setup(&self, model: &mut dyn ConstitutiveModel) -> Result<Driver, StrError> {
        let mut driver = self.driver()?;
        driver.inject_material(model, self.material()?)?;
        Ok(driver)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
