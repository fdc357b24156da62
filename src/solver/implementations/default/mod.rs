#![allow(non_snake_case)]

mod data_updating;
mod equilibration;
mod info;
mod info_print;
mod problemdata;
mod residuals;
mod settings;
mod solution;
mod solver;
mod splitsystem;
mod variables;

#[cfg(feature = "serde")]
pub(crate) mod json;

//export flattened
pub use data_updating::*;
pub use equilibration::*;
pub use info::*;
pub use problemdata::*;
pub use residuals::*;
pub use settings::*;
pub use solution::*;
pub use solver::*;
pub use splitsystem::*;
pub use variables::*;
