use crate::base::ParamMaterial;
use std::fmt;

/// Holds the material constants and model selectors of a constitutive model
///
/// The record is populated once before the first solve and is not modified
/// afterwards by the driver.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MaterialProperties {
    /// First Lamé parameter λ
    pub lame_lambda: f64,

    /// Second Lamé parameter (shear modulus) μ
    pub lame_mu: f64,

    /// Initial yield stress
    pub yield_stress: f64,

    /// Strain hardening modulus
    pub hardening: f64,

    /// Selects the strain energy density function
    pub strain_energy_model: String,

    /// Selects the yield function
    pub yield_model: String,
}

impl MaterialProperties {
    /// Allocates a new instance by copying the parameters
    pub fn from_param(param: &ParamMaterial) -> Self {
        MaterialProperties {
            lame_lambda: param.lame_lambda,
            lame_mu: param.lame_mu,
            yield_stress: param.yield_stress,
            hardening: param.hardening,
            strain_energy_model: param.strain_energy_model.clone(),
            yield_model: param.yield_model.clone(),
        }
    }
}

impl fmt::Display for MaterialProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Material properties")?;
        writeln!(f, "===================")?;
        writeln!(f, "lame_lambda = {:?}", self.lame_lambda)?;
        writeln!(f, "lame_mu = {:?}", self.lame_mu)?;
        writeln!(f, "yield_stress = {:?}", self.yield_stress)?;
        writeln!(f, "hardening = {:?}", self.hardening)?;
        writeln!(f, "strain_energy_model = {}", self.strain_energy_model)?;
        writeln!(f, "yield_model = {}", self.yield_model)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
