use crate::base::ParamLoading;
use crate::StrError;
use std::fmt;

/// Identifies one nonlinear iteration of one load increment
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadStep {
    /// Index of the load increment (starting at 0)
    pub increment: usize,

    /// Index of the nonlinear iteration within the increment (starting at 0)
    pub iteration: usize,
}

/// Drives the increment/iteration state machine
///
/// ```text
/// begin_increment → first iteration (delta imposed)
///   next_iteration → subsequent iteration (no additional displacement)
///   converge → increment completed; displacement accumulated
/// ```
#[derive(Clone, Debug)]
pub struct IncrementControl {
    /// Total number of planned increments
    n_increment: usize,

    /// Displacement imposed at the first iteration of each increment
    delta: f64,

    /// Number of converged increments
    n_converged: usize,

    /// Current step (None if no increment is in progress)
    current: Option<LoadStep>,

    /// Total number of iterations performed so far
    n_iteration_total: usize,
}

impl LoadStep {
    /// Allocates a new instance
    pub fn new(increment: usize, iteration: usize) -> Self {
        LoadStep { increment, iteration }
    }

    /// Indicates whether this is the first iteration of the increment
    #[inline]
    pub fn is_first_iteration(&self) -> bool {
        self.iteration == 0
    }
}

impl fmt::Display for LoadStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "increment {}, iteration {}", self.increment, self.iteration)
    }
}

impl IncrementControl {
    /// Allocates a new instance
    pub fn new(loading: &ParamLoading) -> Result<Self, StrError> {
        if loading.n_increment < 1 {
            return Err("n_increment must be ≥ 1");
        }
        let delta = loading.delta();
        if !delta.is_finite() {
            return Err("total_displacement must be finite");
        }
        Ok(IncrementControl {
            n_increment: loading.n_increment,
            delta,
            n_converged: 0,
            current: None,
            n_iteration_total: 0,
        })
    }

    /// Indicates whether there are increments left to solve
    pub fn has_next_increment(&self) -> bool {
        self.current.is_none() && self.n_converged < self.n_increment
    }

    /// Starts a new increment and returns its first step
    pub fn begin_increment(&mut self) -> Result<LoadStep, StrError> {
        if self.current.is_some() {
            return Err("the current increment has not converged yet");
        }
        if self.n_converged >= self.n_increment {
            return Err("all increments have been completed");
        }
        let step = LoadStep::new(self.n_converged, 0);
        self.current = Some(step);
        self.n_iteration_total += 1;
        Ok(step)
    }

    /// Moves to the next (corrective) iteration of the current increment
    pub fn next_iteration(&mut self) -> Result<LoadStep, StrError> {
        match self.current.as_mut() {
            Some(step) => {
                step.iteration += 1;
                self.n_iteration_total += 1;
                Ok(*step)
            }
            None => Err("no increment is in progress"),
        }
    }

    /// Marks the current increment as converged
    pub fn converge(&mut self) -> Result<(), StrError> {
        if self.current.take().is_none() {
            return Err("no increment is in progress");
        }
        self.n_converged += 1;
        Ok(())
    }

    /// Returns the current step, if an increment is in progress
    pub fn current(&self) -> Option<LoadStep> {
        self.current
    }

    /// Returns the displacement imposed at the first iteration of each increment
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Returns the number of converged increments
    pub fn n_converged(&self) -> usize {
        self.n_converged
    }

    /// Returns the total number of iterations performed so far
    pub fn n_iteration_total(&self) -> usize {
        self.n_iteration_total
    }

    /// Returns the displacement accumulated by the converged increments
    pub fn applied_displacement(&self) -> f64 {
        self.delta * (self.n_converged as f64)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{IncrementControl, LoadStep};
    use crate::base::ParamLoading;
    use crate::StrError;
    use approx::assert_abs_diff_eq;

    #[test]
    fn load_step_works() {
        let step = LoadStep::new(3, 0);
        assert!(step.is_first_iteration());
        assert!(!LoadStep::new(3, 1).is_first_iteration());
        assert_eq!(format!("{}", step), "increment 3, iteration 0");
    }

    #[test]
    fn new_captures_errors() {
        let mut loading = ParamLoading::sample_simple_tension();
        loading.n_increment = 0;
        assert_eq!(IncrementControl::new(&loading).err(), Some("n_increment must be ≥ 1"));
        loading.n_increment = 1;
        loading.total_displacement = f64::INFINITY;
        assert_eq!(
            IncrementControl::new(&loading).err(),
            Some("total_displacement must be finite")
        );
    }

    #[test]
    fn transitions_capture_errors() -> Result<(), StrError> {
        let mut loading = ParamLoading::sample_simple_tension();
        loading.n_increment = 1;
        let mut control = IncrementControl::new(&loading)?;
        assert_eq!(control.next_iteration().err(), Some("no increment is in progress"));
        assert_eq!(control.converge().err(), Some("no increment is in progress"));
        control.begin_increment()?;
        assert_eq!(
            control.begin_increment().err(),
            Some("the current increment has not converged yet")
        );
        control.converge()?;
        assert_eq!(control.begin_increment().err(), Some("all increments have been completed"));
        Ok(())
    }

    #[test]
    fn state_machine_works() -> Result<(), StrError> {
        let loading = ParamLoading::sample_simple_tension();
        let mut control = IncrementControl::new(&loading)?;
        assert_abs_diff_eq!(control.delta(), 0.05, epsilon = 1e-15);
        assert!(control.has_next_increment());

        let step = control.begin_increment()?;
        assert_eq!(step, LoadStep::new(0, 0));
        assert!(!control.has_next_increment());
        assert_eq!(control.next_iteration()?, LoadStep::new(0, 1));
        assert_eq!(control.next_iteration()?, LoadStep::new(0, 2));
        control.converge()?;
        assert_eq!(control.current(), None);
        assert_abs_diff_eq!(control.applied_displacement(), 0.05, epsilon = 1e-15);

        // the iteration counter resets for each new increment
        assert_eq!(control.begin_increment()?, LoadStep::new(1, 0));
        assert_eq!(control.current(), Some(LoadStep::new(1, 0)));
        control.converge()?;

        while control.has_next_increment() {
            control.begin_increment()?;
            control.converge()?;
        }
        assert_eq!(control.n_converged(), 10);
        assert_eq!(control.n_iteration_total(), 12);
        assert_abs_diff_eq!(control.applied_displacement(), 0.5, epsilon = 1e-14);
        Ok(())
    }
}
