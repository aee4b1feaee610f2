use super::MaterialProperties;
use crate::base::ParamMaterial;
use crate::StrError;
use log::info;

/// Specifies the parameter record of a constitutive (stress-update) model
///
/// The stress and tangent updates belong to the model implementation; the
/// driver only populates the parameter record.
pub trait ConstitutiveModel {
    /// Returns the parameter record
    fn properties(&self) -> &MaterialProperties;

    /// Returns the parameter record for modification
    fn properties_mut(&mut self) -> &mut MaterialProperties;
}

/// Holds the parameter record of a continuum plasticity model
///
/// This is the receiving end of [inject_material()] when the actual model
/// lives in the external solver.
#[derive(Clone, Debug, Default)]
pub struct PlasticityModel {
    properties: MaterialProperties,
}

impl PlasticityModel {
    /// Allocates a new instance with an empty parameter record
    pub fn new() -> Self {
        PlasticityModel {
            properties: MaterialProperties::default(),
        }
    }
}

impl ConstitutiveModel for PlasticityModel {
    fn properties(&self) -> &MaterialProperties {
        &self.properties
    }

    fn properties_mut(&mut self) -> &mut MaterialProperties {
        &mut self.properties
    }
}

/// Copies the material parameters into a constitutive model
pub fn inject_material(model: &mut dyn ConstitutiveModel, param: &ParamMaterial) -> Result<(), StrError> {
    if param.strain_energy_model.is_empty() {
        return Err("strain energy model name must not be empty");
    }
    if param.yield_model.is_empty() {
        return Err("yield model name must not be empty");
    }
    *model.properties_mut() = MaterialProperties::from_param(param);
    info!(
        "material: strain energy = {}, yield function = {}",
        param.strain_energy_model, param.yield_model
    );
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
