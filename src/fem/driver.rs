use super::{BoundaryTags, ConstraintBuilder, ConstraintSet, IncrementControl, LoadStep};
use crate::base::{ParamLoading, ParamMaterial};
use crate::material::{inject_material, ConstitutiveModel};
use crate::mesh::StructuredMesh;
use crate::StrError;
use log::{error, info};

/// Indicates the result of one nonlinear iteration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IterationOutcome {
    /// The increment has converged
    Converged,

    /// Another (corrective) iteration is required
    NotConverged,
}

/// Defines the external nonlinear solver
///
/// The solver assembles and solves the linear system of one iteration using
/// the given (closed) constraints and decides whether the increment has converged.
pub trait NonlinearSolver {
    /// Performs one nonlinear iteration
    fn iterate(&mut self, step: LoadStep, constraints: &ConstraintSet) -> Result<IterationOutcome, StrError>;
}

/// Drives the incremental boundary value problem
pub struct Driver {
    /// The mesh of this process
    pub mesh: StructuredMesh,

    /// Tags of the boundary faces
    pub tags: BoundaryTags,

    /// Builder of the Dirichlet constraints
    pub builder: ConstraintBuilder,

    /// Loading parameters
    pub loading: ParamLoading,

    /// Indicates whether the material parameters have been injected
    material_injected: bool,
}

impl Driver {
    /// Allocates a new instance
    pub fn new(
        mesh: StructuredMesh,
        tags: BoundaryTags,
        builder: ConstraintBuilder,
        loading: ParamLoading,
    ) -> Result<Self, StrError> {
        if let Some(message) = loading.validate() {
            error!("{}", message);
            return Err("loading parameters are invalid");
        }
        Ok(Driver {
            mesh,
            tags,
            builder,
            loading,
            material_injected: false,
        })
    }

    /// Builds the closed constraints of a load step
    pub fn constraints(&self, step: LoadStep) -> Result<ConstraintSet, StrError> {
        self.builder.build(&self.mesh, &self.tags, step)
    }

    /// Copies the material parameters into the constitutive model (once, before the first solve)
    pub fn inject_material(&mut self, model: &mut dyn ConstitutiveModel, param: &ParamMaterial) -> Result<(), StrError> {
        if self.material_injected {
            return Err("material parameters have already been injected");
        }
        inject_material(model, param)?;
        self.material_injected = true;
        Ok(())
    }

    /// Indicates whether the material parameters have been injected
    pub fn material_injected(&self) -> bool {
        self.material_injected
    }

    /// Runs all increments
    ///
    /// The constraints are rebuilt and closed before every iteration. Errors from
    /// the solver are returned unchanged.
    pub fn run(&self, solver: &mut dyn NonlinearSolver) -> Result<IncrementControl, StrError> {
        let mut control = IncrementControl::new(&self.loading)?;
        while control.has_next_increment() {
            let mut step = control.begin_increment()?;
            info!(
                "increment {} of {}: imposing {:?} along {}",
                step.increment + 1,
                self.loading.n_increment,
                control.delta(),
                self.loading.axis
            );
            loop {
                let constraints = self.constraints(step)?;
                match solver.iterate(step, &constraints)? {
                    IterationOutcome::Converged => {
                        control.converge()?;
                        break;
                    }
                    IterationOutcome::NotConverged => {
                        if step.iteration + 1 >= self.loading.max_iterations {
                            error!("{}: no convergence after {} iterations", step, step.iteration + 1);
                            return Err("nonlinear iterations did not converge");
                        }
                        step = control.next_iteration()?;
                    }
                }
            }
        }
        info!(
            "completed {} increments in {} iterations; applied displacement = {:?}",
            control.n_converged(),
            control.n_iteration_total(),
            control.applied_displacement()
        );
        Ok(control)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{Driver, IterationOutcome, NonlinearSolver};
    use crate::base::{Dof, ParamDomain, ParamLoading, ParamMaterial};
    use crate::fem::{
        BoundaryClassifier, BoundaryRule, ConstraintBuilder, ConstraintSet, IncrementFunction, LoadStep, Plane,
        Selector,
    };
    use crate::material::{ConstitutiveModel, MaterialProperties};
    use crate::mesh::{Domain, Partition, StructuredMesh};
    use crate::StrError;
    use approx::assert_abs_diff_eq;

    /// Converges after a fixed number of iterations and records the imposed displacement
    struct MockSolver {
        n_iteration: usize,
        steps: Vec<LoadStep>,
        total: f64,
        fail_at: Option<LoadStep>,
    }

    impl MockSolver {
        fn new(n_iteration: usize) -> Self {
            MockSolver {
                n_iteration,
                steps: Vec::new(),
                total: 0.0,
                fail_at: None,
            }
        }
    }

    impl NonlinearSolver for MockSolver {
        fn iterate(&mut self, step: LoadStep, constraints: &ConstraintSet) -> Result<IterationOutcome, StrError> {
            if Some(step) == self.fail_at {
                return Err("linear solver failed");
            }
            if !constraints.is_closed() {
                return Err("constraints must be closed");
            }
            self.steps.push(step);
            self.total += constraints.value(5, Dof::Ux).unwrap_or(f64::NAN);
            if step.iteration + 1 >= self.n_iteration {
                Ok(IterationOutcome::Converged)
            } else {
                Ok(IterationOutcome::NotConverged)
            }
        }
    }

    struct MockModel {
        properties: MaterialProperties,
    }

    impl ConstitutiveModel for MockModel {
        fn properties(&self) -> &MaterialProperties {
            &self.properties
        }
        fn properties_mut(&mut self) -> &mut MaterialProperties {
            &mut self.properties
        }
    }

    fn simple_tension_driver(loading: ParamLoading) -> Result<Driver, StrError> {
        let domain = Domain::new(&ParamDomain::sample_simple_tension(0))?;
        let mesh = StructuredMesh::new(domain, Partition::serial())?;
        let mut classifier = BoundaryClassifier::new();
        classifier
            .mark(Plane::Min(Dof::Ux), 1)?
            .mark(Plane::Max(Dof::Ux), 2)?
            .mark(Plane::Min(Dof::Uy), 3)?
            .mark(Plane::Min(Dof::Uz), 4)?;
        let tags = classifier.classify(&mesh);
        let delta = IncrementFunction::new(3, loading.axis, loading.delta())?;
        let mut builder = ConstraintBuilder::new();
        builder
            .add(BoundaryRule::loaded(Selector::Tag(2), &[Dof::Ux], Box::new(delta)))?
            .add(BoundaryRule::fixed(Selector::Tag(1), &[Dof::Ux]))?
            .add(BoundaryRule::fixed(Selector::Tag(3), &[Dof::Uy]))?
            .add(BoundaryRule::fixed(Selector::Tag(4), &[Dof::Uz]))?;
        Driver::new(mesh, tags, builder, loading)
    }

    #[test]
    fn new_captures_errors() {
        let mut loading = ParamLoading::sample_simple_tension();
        loading.n_increment = 0;
        assert_eq!(
            simple_tension_driver(loading).err(),
            Some("loading parameters are invalid")
        );
    }

    #[test]
    fn run_works() -> Result<(), StrError> {
        let driver = simple_tension_driver(ParamLoading::sample_simple_tension())?;
        let mut solver = MockSolver::new(3);
        let control = driver.run(&mut solver)?;
        assert_eq!(control.n_converged(), 10);
        assert_eq!(control.n_iteration_total(), 30);
        assert_eq!(solver.steps.len(), 30);
        assert_eq!(solver.steps[0], LoadStep::new(0, 0));
        assert_eq!(solver.steps[1], LoadStep::new(0, 1));
        assert_eq!(solver.steps[2], LoadStep::new(0, 2));
        assert_eq!(solver.steps[3], LoadStep::new(1, 0));
        assert_eq!(solver.steps[29], LoadStep::new(9, 2));
        // only the first iteration of each increment adds displacement
        assert_abs_diff_eq!(solver.total, 0.5, epsilon = 1e-14);
        assert_abs_diff_eq!(control.applied_displacement(), 0.5, epsilon = 1e-14);
        Ok(())
    }

    #[test]
    fn run_captures_solver_errors() -> Result<(), StrError> {
        let driver = simple_tension_driver(ParamLoading::sample_simple_tension())?;
        let mut solver = MockSolver::new(2);
        solver.fail_at = Some(LoadStep::new(4, 1));
        assert_eq!(driver.run(&mut solver).err(), Some("linear solver failed"));
        assert_eq!(solver.steps.len(), 9);
        Ok(())
    }

    #[test]
    fn run_captures_divergence() -> Result<(), StrError> {
        let mut loading = ParamLoading::sample_simple_tension();
        loading.max_iterations = 4;
        let driver = simple_tension_driver(loading)?;
        let mut solver = MockSolver::new(5);
        assert_eq!(
            driver.run(&mut solver).err(),
            Some("nonlinear iterations did not converge")
        );
        assert_eq!(solver.steps.len(), 4);
        Ok(())
    }

    #[test]
    fn inject_material_works_once() -> Result<(), StrError> {
        let mut driver = simple_tension_driver(ParamLoading::sample_simple_tension())?;
        let mut model = MockModel {
            properties: MaterialProperties::default(),
        };
        assert!(!driver.material_injected());
        driver.inject_material(&mut model, &ParamMaterial::sample())?;
        assert!(driver.material_injected());
        assert_eq!(model.properties().lame_mu, 26.25);
        assert_eq!(model.properties().yield_model, "von_mises");
        assert_eq!(
            driver.inject_material(&mut model, &ParamMaterial::sample()).err(),
            Some("material parameters have already been injected")
        );
        Ok(())
    }
}
