use crate::base::Dof;
use crate::StrError;

/// Defines a vector-valued function of the position used as a boundary value
///
/// Implementations must fill exactly `n_components()` values and reject
/// output slices of any other length.
pub trait VectorFunction {
    /// Returns the number of components of the function
    fn n_components(&self) -> usize;

    /// Calculates the function value at a point
    ///
    /// # Input
    ///
    /// * `x` -- the point coordinates
    /// * `values` -- the output (len = n_components)
    fn vector_value(&self, x: &[f64], values: &mut [f64]) -> Result<(), StrError>;
}

/// Returns zero for all components
pub struct ZeroFunction {
    n_components: usize,
}

/// Returns a displacement increment along one axis and zero along the others
pub struct IncrementFunction {
    n_components: usize,
    axis: Dof,
    delta: f64,
}

impl ZeroFunction {
    /// Allocates a new instance
    pub fn new(n_components: usize) -> Self {
        ZeroFunction { n_components }
    }
}

impl IncrementFunction {
    /// Allocates a new instance
    pub fn new(n_components: usize, axis: Dof, delta: f64) -> Result<Self, StrError> {
        if axis.index() >= n_components {
            return Err("loading axis must be smaller than the number of components");
        }
        if !delta.is_finite() {
            return Err("displacement increment must be finite");
        }
        Ok(IncrementFunction {
            n_components,
            axis,
            delta,
        })
    }

    /// Returns the displacement increment
    pub fn delta(&self) -> f64 {
        self.delta
    }
}

impl VectorFunction for ZeroFunction {
    fn n_components(&self) -> usize {
        self.n_components
    }

    fn vector_value(&self, _x: &[f64], values: &mut [f64]) -> Result<(), StrError> {
        if values.len() != self.n_components {
            return Err("dimension mismatch: values must have n_components entries");
        }
        values.iter_mut().for_each(|v| *v = 0.0);
        Ok(())
    }
}

impl VectorFunction for IncrementFunction {
    fn n_components(&self) -> usize {
        self.n_components
    }

    fn vector_value(&self, _x: &[f64], values: &mut [f64]) -> Result<(), StrError> {
        if values.len() != self.n_components {
            return Err("dimension mismatch: values must have n_components entries");
        }
        values.iter_mut().for_each(|v| *v = 0.0);
        values[self.axis.index()] = self.delta;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
