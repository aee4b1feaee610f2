use super::{BoundaryTag, BoundaryTags, ConstraintLine, ConstraintSet, LoadStep, Plane, VectorFunction, ZeroFunction};
use crate::base::{Dof, NDIM};
use crate::mesh::StructuredMesh;
use crate::StrError;
use gemlab::mesh::PointId;
use log::debug;
use std::collections::{BTreeMap, BTreeSet};

/// Selects the points receiving a boundary rule
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Selector {
    /// Points on the faces carrying a tag
    Tag(BoundaryTag),

    /// Points lying on a plane of the domain (per-point predicate)
    Plane(Plane),
}

/// Defines the value imposed by a boundary rule
pub enum BoundaryValue {
    /// Holds the components at their previously converged position (zero increment)
    Fixed,

    /// Imposes the function value at the first iteration of each increment and zero afterwards
    Loaded(Box<dyn VectorFunction>),
}

/// Holds the constrained components and the imposed value of a group of points
pub struct BoundaryRule {
    /// Points receiving the rule
    pub selector: Selector,

    /// Constrained displacement components (axis mask)
    pub components: Vec<Dof>,

    /// Imposed value
    pub value: BoundaryValue,
}

/// Builds the Dirichlet constraints of each nonlinear iteration
///
/// The rules are applied in the order they were added and, when two rules
/// constrain the same DOF, the first one wins. Interpolation (hanging-point)
/// lines come before all rules.
pub struct ConstraintBuilder {
    rules: Vec<BoundaryRule>,
    interpolation: BTreeMap<usize, ConstraintLine>,
    zero: ZeroFunction,
}

impl BoundaryRule {
    /// Returns a rule holding the components fixed
    pub fn fixed(selector: Selector, components: &[Dof]) -> Self {
        BoundaryRule {
            selector,
            components: components.to_vec(),
            value: BoundaryValue::Fixed,
        }
    }

    /// Returns a rule imposing a function at the first iteration of each increment
    pub fn loaded(selector: Selector, components: &[Dof], function: Box<dyn VectorFunction>) -> Self {
        BoundaryRule {
            selector,
            components: components.to_vec(),
            value: BoundaryValue::Loaded(function),
        }
    }
}

impl ConstraintBuilder {
    /// Allocates a new instance without rules
    pub fn new() -> Self {
        ConstraintBuilder {
            rules: Vec::new(),
            interpolation: BTreeMap::new(),
            zero: ZeroFunction::new(NDIM),
        }
    }

    /// Adds a boundary rule
    pub fn add(&mut self, rule: BoundaryRule) -> Result<&mut Self, StrError> {
        if let Selector::Tag(0) = rule.selector {
            return Err("boundary tag 0 is reserved for untagged faces");
        }
        if rule.components.is_empty() {
            return Err("boundary rule must constrain at least one component");
        }
        let unique: BTreeSet<_> = rule.components.iter().collect();
        if unique.len() != rule.components.len() {
            return Err("boundary rule has repeated components");
        }
        if let BoundaryValue::Loaded(function) = &rule.value {
            if function.n_components() != NDIM {
                return Err("dimension mismatch: boundary function must have ndim components");
            }
        }
        self.rules.push(rule);
        Ok(self)
    }

    /// Sets the interpolation constraints of nonconforming points
    ///
    /// These lines are supplied by the mesh owner and copied into every constraint set.
    pub fn set_interpolation_constraints(&mut self, lines: BTreeMap<usize, ConstraintLine>) -> &mut Self {
        self.interpolation = lines;
        self
    }

    /// Returns the number of rules
    pub fn n_rule(&self) -> usize {
        self.rules.len()
    }

    /// Builds the closed constraint set of a load step
    ///
    /// The set is rebuilt from scratch at every call and depends only on the
    /// mesh, the tags, the rules and the step.
    pub fn build(&self, mesh: &StructuredMesh, tags: &BoundaryTags, step: LoadStep) -> Result<ConstraintSet, StrError> {
        let mut constraints = ConstraintSet::new();
        for (eq, line) in &self.interpolation {
            constraints.add_line(*eq, line.entries.clone(), line.inhomogeneity)?;
        }

        let mut relevant: Option<BTreeSet<PointId>> = None;
        let mut values = vec![0.0; NDIM];
        for rule in &self.rules {
            let points = match rule.selector {
                Selector::Tag(tag) => tags.points(tag),
                Selector::Plane(plane) => {
                    let all = relevant.get_or_insert_with(|| mesh.locally_relevant_points());
                    all.iter()
                        .copied()
                        .filter(|p| plane.contains(&mesh.domain, mesh.coords(*p)))
                        .collect()
                }
            };
            let function: &dyn VectorFunction = match &rule.value {
                BoundaryValue::Loaded(f) if step.is_first_iteration() => f.as_ref(),
                _ => &self.zero,
            };
            for p in points {
                function.vector_value(mesh.coords(p), &mut values)?;
                for dof in &rule.components {
                    constraints.add_dirichlet(p, *dof, values[dof.index()])?;
                }
            }
        }

        constraints.close()?;
        debug!("{}: {} constrained equations", step, constraints.len());
        Ok(constraints)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
