#![allow(non_snake_case)]
use super::*;
use crate::solver::core::{
    accel::AndersonAccelerator,
    cones::{CompositeCone, Cone, ConeError, SupportedConeT},
    linsys::FactorizationError,
    traits::{ProblemData, Settings},
    SettingsError, Solver,
};

use crate::algebra::*;
use crate::timers::*;
use thiserror::Error;

/// Error type returned at problem setup
#[derive(Error, Debug)]
pub enum SolverError {
    /// Inconsistent problem dimensions
    #[error("Inconsistent dimension for '{0}'")]
    DimensionMismatch(&'static str),
    /// Invalid settings
    #[error(transparent)]
    BadSettings(#[from] SettingsError),
    /// Invalid cone specification
    #[error(transparent)]
    BadCone(#[from] ConeError),
    /// Matrix data is not valid CSC format
    #[error("Data formatting error")]
    BadMatrixFormat(#[from] SparseFormatError),
    /// Linear system initialization failed
    #[error(transparent)]
    Factorization(#[from] FactorizationError),
    /// File output failure, e.g. for the data dump option
    #[error("IO error")]
    IOError(#[from] std::io::Error),
}

/// Solver for problems in standard conic program form

pub type DefaultSolver<T = f64> = Solver<
    DefaultProblemData<T>,
    DefaultVariables<T>,
    DefaultResiduals<T>,
    DefaultSplitSystem<T>,
    CompositeCone<T>,
    AndersonAccelerator<T>,
    DefaultInfo<T>,
    DefaultSolution<T>,
    DefaultSettings<T>,
>;

impl<T> DefaultSolver<T>
where
    T: FloatT,
{
    pub fn new(
        P: &CscMatrix<T>,
        c: &[T],
        A: &CscMatrix<T>,
        b: &[T],
        cone_types: &[SupportedConeT<T>],
        settings: DefaultSettings<T>,
    ) -> Result<Self, SolverError> {
        settings.validate()?;
        check_dimensions(P, c, A, b)?;
        P.check_format()?;
        A.check_format()?;

        #[cfg(feature = "serde")]
        if let Some(ref filename) = settings.write_data_filename {
            crate::solver::implementations::default::json::write_data_file(
                filename, P, c, A, b, cone_types, &settings,
            )?;
        }

        let mut timers = Timers::default();
        let mut output;

        timeit! {timers => "setup"; {

        let info = DefaultInfo::<T>::new();
        let cones = CompositeCone::<T>::new(cone_types)?;
        let mut data = DefaultProblemData::<T>::new(P,c,A,b);

        if cones.numel() != data.m {
            return Err(SolverError::DimensionMismatch("cones"));
        }

        let variables = DefaultVariables::<T>::new(data.n,data.m);
        let residuals = DefaultResiduals::<T>::new(data.n,data.m);

        // equilibrate problem data immediately on setup.
        // this prevents multiple equilibrations if solve
        // is called more than once.
        timeit!{timers => "equilibration"; {
            data.equilibrate(&cones,&settings);
        }}

        let splitsystem;
        timeit!{timers => "linsysinit"; {
            splitsystem = DefaultSplitSystem::<T>::new(&data,&cones,&settings)?;
        }}

        let accel = AndersonAccelerator::<T>::new(
            data.n + data.m + 1,
            settings.acceleration_lookback as usize,
            settings.acceleration_regularization,
        );

        // user facing results go here.
        let solution = DefaultSolution::<T>::new(data.n,data.m);

        output = Self{data,variables,residuals,splitsystem,cones,accel,
             info,solution,settings,timers: None,
             callbacks: Default::default()};

        }} //end "setup" timer

        //now that the timer is finished we can swap our
        //timer object into the solver structure
        output.timers.replace(timers);

        Ok(output)
    }

    /// Replace the solver settings.   Parameters that are fixed at
    /// initialization are rejected.
    pub fn update_settings(&mut self, settings: DefaultSettings<T>) -> Result<(), SettingsError> {
        settings.validate_as_update(&self.settings)?;
        self.settings = settings;
        Ok(())
    }
}

impl<T> crate::io::ConfigurablePrintTarget for DefaultSolver<T>
where
    T: FloatT,
{
    fn print_to_stdout(&mut self) {
        self.info.print_to_stdout()
    }
    fn print_to_file(&mut self, file: std::fs::File) {
        self.info.print_to_file(file)
    }
    fn print_to_stream(&mut self, stream: Box<dyn std::io::Write + Send + Sync>) {
        self.info.print_to_stream(stream)
    }
    fn print_to_buffer(&mut self) {
        self.info.print_to_buffer()
    }
    fn get_print_buffer(&mut self) -> std::io::Result<String> {
        self.info.get_print_buffer()
    }
}

fn check_dimensions<T: FloatT>(
    P: &CscMatrix<T>,
    c: &[T],
    A: &CscMatrix<T>,
    b: &[T],
) -> Result<(), SolverError> {
    if !P.is_square() {
        return Err(SolverError::DimensionMismatch("P"));
    }
    if P.n != c.len() {
        return Err(SolverError::DimensionMismatch("c"));
    }
    if A.n != P.n {
        return Err(SolverError::DimensionMismatch("A"));
    }
    if A.m != b.len() {
        return Err(SolverError::DimensionMismatch("b"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_checks() {
        let P = CscMatrix::<f64>::zeros((2, 2));
        let A = CscMatrix::<f64>::from(&[[1.0, 1.0]]);
        let c = [1.0, 1.0];
        let b = [1.0];
        let cones = [SupportedConeT::NonnegativeConeT(1)];
        let settings = DefaultSettings::default();

        assert!(DefaultSolver::new(&P, &c, &A, &b, &cones, settings.clone()).is_ok());

        // short cost vector
        assert!(matches!(
            DefaultSolver::new(&P, &c[..1], &A, &b, &cones, settings.clone()),
            Err(SolverError::DimensionMismatch("c"))
        ));

        // cone dimensions disagree with row count of A
        let badcones = [SupportedConeT::NonnegativeConeT(3)];
        assert!(matches!(
            DefaultSolver::new(&P, &c, &A, &b, &badcones, settings),
            Err(SolverError::DimensionMismatch("cones"))
        ));
    }
}
