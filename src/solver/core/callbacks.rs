// ---------------------------------
// enum for managing callbacks
// ---------------------------------

#[derive(Default)]
pub(crate) enum Callback<I> {
    #[default]
    None,
    Rust(Box<dyn FnMut(&I) -> bool + Send>),
}

impl<I> Callback<I> {
    fn call(&mut self, info: &I) -> bool {
        match self {
            Callback::None => false,
            Callback::Rust(f) => f(info),
        }
    }
}

impl<I> std::fmt::Debug for Callback<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Callback::None => write!(f, "Callback::None"),
            Callback::Rust(_) => write!(f, "Callback::Rust"),
        }
    }
}

#[derive(Debug)]
pub(crate) struct SolverCallbacks<I> {
    /// callback polled between iterations for an external stop request
    pub termination_callback: Callback<I>,
}

impl<I> Default for SolverCallbacks<I> {
    fn default() -> Self {
        Self {
            termination_callback: Callback::None,
        }
    }
}

impl<I> SolverCallbacks<I> {
    pub(crate) fn check_termination(&mut self, info: &I) -> bool {
        self.termination_callback.call(info)
    }
}
