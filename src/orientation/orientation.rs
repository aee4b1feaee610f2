use std::fmt;

/// Holds a crystallographic orientation as a Rodrigues vector
///
/// ```text
/// r = tan(θ/2) n
/// ```
///
/// where θ is the rotation angle and n the unit rotation axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orientation {
    /// Rodrigues vector components
    pub r: [f64; 3],
}

impl Orientation {
    /// Allocates a new instance
    pub fn new(r: [f64; 3]) -> Self {
        Orientation { r }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?}, {:?})", self.r[0], self.r[1], self.r[2])
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
