use crate::base::{Dof, NDIM};
use crate::StrError;
use gemlab::mesh::PointId;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Holds one constraint line
///
/// ```text
/// u[eq] = Σ weight × u[j] + inhomogeneity
/// ```
///
/// A Dirichlet (prescribed value) line has no entries.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstraintLine {
    /// Pairs (j, weight) referring to other equations
    pub entries: Vec<(usize, f64)>,

    /// Constant term (the prescribed value of a Dirichlet line)
    pub inhomogeneity: f64,
}

/// Holds the constraints of one nonlinear iteration
///
/// The set is filled by the constraint builder and then closed. After closing,
/// every entry of every line refers to an unconstrained equation and no more
/// lines can be added.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstraintSet {
    lines: BTreeMap<usize, ConstraintLine>,
    closed: bool,
}

impl ConstraintLine {
    /// Indicates whether this line prescribes a value directly
    pub fn is_dirichlet(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ConstraintSet {
    /// Allocates a new (open) instance
    pub fn new() -> Self {
        ConstraintSet {
            lines: BTreeMap::new(),
            closed: false,
        }
    }

    /// Returns the equation number of a DOF of a point
    #[inline]
    pub fn equation(point_id: PointId, dof: Dof) -> usize {
        point_id * NDIM + dof.index()
    }

    /// Prescribes the value of a DOF
    ///
    /// Returns `false` if the DOF was already constrained; the existing line is kept.
    pub fn add_dirichlet(&mut self, point_id: PointId, dof: Dof, value: f64) -> Result<bool, StrError> {
        if !value.is_finite() {
            return Err("prescribed value must be finite");
        }
        self.add_line(ConstraintSet::equation(point_id, dof), Vec::new(), value)
    }

    /// Adds a general constraint line
    ///
    /// Returns `false` if the equation was already constrained; the existing line is kept.
    pub fn add_line(&mut self, eq: usize, entries: Vec<(usize, f64)>, inhomogeneity: f64) -> Result<bool, StrError> {
        if self.closed {
            return Err("cannot add constraints to a closed set");
        }
        if entries.iter().any(|(j, _)| *j == eq) {
            return Err("constraint line cannot refer to its own equation");
        }
        if self.lines.contains_key(&eq) {
            return Ok(false);
        }
        self.lines.insert(eq, ConstraintLine { entries, inhomogeneity });
        Ok(true)
    }

    /// Finalizes the set by resolving chains of constraints
    ///
    /// Entries referring to constrained equations are replaced by the lines of
    /// these equations until all entries refer to unconstrained equations.
    pub fn close(&mut self) -> Result<(), StrError> {
        if self.closed {
            return Ok(());
        }
        let mut resolved = BTreeMap::new();
        let mut visiting = HashMap::new();
        let equations: Vec<usize> = self.lines.keys().copied().collect();
        for eq in equations {
            self.resolve(eq, &mut visiting, &mut resolved)?;
        }
        self.lines = resolved;
        self.closed = true;
        Ok(())
    }

    /// Resolves the line of an equation (depth-first)
    fn resolve(
        &self,
        eq: usize,
        visiting: &mut HashMap<usize, bool>,
        resolved: &mut BTreeMap<usize, ConstraintLine>,
    ) -> Result<(), StrError> {
        if resolved.contains_key(&eq) {
            return Ok(());
        }
        if visiting.insert(eq, true).is_some() {
            return Err("constraints are circular");
        }
        let line = &self.lines[&eq];
        let mut weights: BTreeMap<usize, f64> = BTreeMap::new();
        let mut inhomogeneity = line.inhomogeneity;
        for (j, w) in &line.entries {
            if self.lines.contains_key(j) {
                self.resolve(*j, visiting, resolved)?;
                let other = &resolved[j];
                for (k, v) in &other.entries {
                    *weights.entry(*k).or_insert(0.0) += w * v;
                }
                inhomogeneity += w * other.inhomogeneity;
            } else {
                *weights.entry(*j).or_insert(0.0) += w;
            }
        }
        let entries = weights.into_iter().filter(|(_, w)| *w != 0.0).collect();
        resolved.insert(eq, ConstraintLine { entries, inhomogeneity });
        Ok(())
    }

    /// Indicates whether the set has been closed
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Indicates whether an equation is constrained
    pub fn is_constrained(&self, eq: usize) -> bool {
        self.lines.contains_key(&eq)
    }

    /// Returns the line of an equation
    pub fn line(&self, eq: usize) -> Option<&ConstraintLine> {
        self.lines.get(&eq)
    }

    /// Returns the prescribed value of a DOF (None if not prescribed by a Dirichlet line)
    pub fn value(&self, point_id: PointId, dof: Dof) -> Option<f64> {
        match self.lines.get(&ConstraintSet::equation(point_id, dof)) {
            Some(line) if line.is_dirichlet() => Some(line.inhomogeneity),
            _ => None,
        }
    }

    /// Returns the constrained equations (sorted)
    pub fn equations(&self) -> Vec<usize> {
        self.lines.keys().copied().collect()
    }

    /// Sets the constrained entries of a vector of unknowns
    pub fn distribute(&self, uu: &mut [f64]) -> Result<(), StrError> {
        if !self.closed {
            return Err("constraints must be closed before distributing");
        }
        for (eq, line) in &self.lines {
            if *eq >= uu.len() || line.entries.iter().any(|(j, _)| *j >= uu.len()) {
                return Err("vector of unknowns is too short for the constraints");
            }
            let mut value = line.inhomogeneity;
            for (j, w) in &line.entries {
                value += w * uu[*j];
            }
            uu[*eq] = value;
        }
        Ok(())
    }

    /// Returns the number of constrained equations
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Indicates whether no equation is constrained
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for ConstraintSet {
    /// Prints one line per constrained equation
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Constraints")?;
        writeln!(f, "===========")?;
        for (eq, line) in &self.lines {
            let dof = match Dof::from_index(eq % NDIM) {
                Ok(d) => d,
                Err(_) => return Err(fmt::Error),
            };
            write!(f, "{} (point {}, {}) =", eq, eq / NDIM, dof)?;
            for (j, w) in &line.entries {
                write!(f, " {:?} × u[{}] +", w, j)?;
            }
            writeln!(f, " {:?}", line.inhomogeneity)?;
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
