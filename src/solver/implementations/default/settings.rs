use crate::solver::core::traits::Settings;
use crate::{algebra::*, solver::core::SettingsError};
use derive_builder::Builder;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Standard-form solver type implementing the [`Settings`](crate::solver::core::traits::Settings) trait

#[derive(Builder, Debug, Clone)]
#[builder(build_fn(validate = "Self::validate"))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DefaultSettings<T: FloatT> {
    ///maximum number of iterations
    #[builder(default = "2500")]
    pub max_iters: u32,

    ///maximum run time (seconds).  zero disables the limit
    #[builder(default = "0.0")]
    pub time_limit: f64,

    ///verbose printing
    #[builder(default = "true")]
    pub verbose: bool,

    ///enable data equilibration pre-scaling
    #[builder(default = "true")]
    pub normalize: bool,

    ///initial dual scale factor
    #[builder(default = "(5.0).as_T()")]
    pub scale: T,

    ///primal weight of the splitting metric
    #[builder(default = "(1e-3).as_T()")]
    pub rho_x: T,

    ///ratio of the dual metric weight on equality rows to that
    ///on cone rows
    #[builder(default = "(1e-3).as_T()")]
    pub rho_zero_ratio: T,

    ///over-relaxation parameter, in (0, 2)
    #[builder(default = "(1.8).as_T()")]
    pub alpha: T,

    ///absolute feasibility tolerance
    #[builder(default = "(1e-4).as_T()")]
    pub eps_abs: T,

    ///relative feasibility tolerance
    #[builder(default = "(1e-4).as_T()")]
    pub eps_rel: T,

    ///infeasibility and unboundedness certificate tolerance
    #[builder(default = "(1e-5).as_T()")]
    pub eps_infeas: T,

    ///absolute tolerance accepted at soft stops for an inaccurate solution
    #[builder(default = "(1e-4).as_T()")]
    pub reduced_eps_abs: T,

    ///relative tolerance accepted at soft stops for an inaccurate solution
    #[builder(default = "(1e-4).as_T()")]
    pub reduced_eps_rel: T,

    ///certificate tolerance accepted at soft stops
    #[builder(default = "(1e-5).as_T()")]
    pub reduced_eps_infeas: T,

    /// maximum equilibration scaling iterations
    #[builder(default = "10")]
    pub equilibrate_max_iter: u32,

    ///minimum equilibration scaling allowed
    #[builder(default = "(1e-4).as_T()")]
    pub equilibrate_min_scaling: T,

    ///maximum equilibration scaling allowed
    #[builder(default = "(1e+4).as_T()")]
    pub equilibrate_max_scaling: T,

    ///start from the previous solution instead of the origin
    #[builder(default = "false")]
    pub warm_start: bool,

    ///acceleration history length.  zero disables acceleration
    #[builder(default = "10")]
    pub acceleration_lookback: u32,

    ///iterations between acceleration attempts
    #[builder(default = "10")]
    pub acceleration_interval: u32,

    ///Tikhonov regularization for the acceleration subproblem
    #[builder(default = "(1e-8).as_T()")]
    pub acceleration_regularization: T,

    ///accepted growth of the fixed point residual before an
    ///accelerated candidate is rejected
    #[builder(default = "(1.0).as_T()")]
    pub acceleration_safeguard_factor: T,

    ///enable adaptive rescaling of the splitting metric
    #[builder(default = "true")]
    pub adaptive_scale: bool,

    ///minimum iterations between adaptive rescalings
    #[builder(default = "100")]
    pub adaptive_scale_interval: u32,

    ///residual imbalance band that triggers a rescaling
    #[builder(default = "(2.0).as_T()")]
    pub adaptive_scale_band: T,

    ///lower limit of the adaptive scale factor
    #[builder(default = "(1e-6).as_T()")]
    pub scale_min: T,

    ///upper limit of the adaptive scale factor
    #[builder(default = "(1e6).as_T()")]
    pub scale_max: T,

    ///iterations between convergence checks
    #[builder(default = "25")]
    pub check_termination_interval: u32,

    ///direct linear solver method (e.g. "denseldl")
    #[builder(default = r#""denseldl".to_string()"#)]
    pub direct_solve_method: String,

    ///dump problem data to a JSON file at initialization
    #[builder(default = "None")]
    pub write_data_filename: Option<String>,

    ///write per-refresh progress rows to a CSV file
    #[builder(default = "None")]
    pub log_csv_filename: Option<String>,
}

impl<T> Default for DefaultSettings<T>
where
    T: FloatT,
{
    fn default() -> DefaultSettings<T> {
        DefaultSettingsBuilder::<T>::default().build().unwrap()
    }
}

macro_rules! check_immutable_setting {
    ($self:expr, $prev:expr, $field:ident) => {
        if $self.$field != $prev.$field {
            return Err(SettingsError::ImmutableSetting(stringify!($field)));
        }
    };
}

impl<T> Settings<T> for DefaultSettings<T>
where
    T: FloatT,
{
    //NB: CoreSettings is typedef'd to DefaultSettings
    fn core(&self) -> &DefaultSettings<T> {
        self
    }
    fn core_mut(&mut self) -> &mut DefaultSettings<T> {
        self
    }

    fn validate(&self) -> Result<(), SettingsError> {
        validate_direct_solve_method(&self.direct_solve_method)?;

        if !(self.alpha > T::zero() && self.alpha < (2.0).as_T()) {
            return Err(SettingsError::BadFieldValue("alpha"));
        }
        if !(self.scale > T::zero()) {
            return Err(SettingsError::BadFieldValue("scale"));
        }
        if !(self.rho_x > T::zero()) {
            return Err(SettingsError::BadFieldValue("rho_x"));
        }
        if !(self.rho_zero_ratio > T::zero()) {
            return Err(SettingsError::BadFieldValue("rho_zero_ratio"));
        }
        if self.scale_min > self.scale_max {
            return Err(SettingsError::BadFieldValue("scale_min"));
        }
        if self.equilibrate_min_scaling > self.equilibrate_max_scaling {
            return Err(SettingsError::BadFieldValue("equilibrate_min_scaling"));
        }
        if self.max_iters == 0 {
            return Err(SettingsError::BadFieldValue("max_iters"));
        }
        if self.check_termination_interval == 0 {
            return Err(SettingsError::BadFieldValue("check_termination_interval"));
        }
        if self.acceleration_interval == 0 {
            return Err(SettingsError::BadFieldValue("acceleration_interval"));
        }
        if !(self.adaptive_scale_band >= T::one()) {
            return Err(SettingsError::BadFieldValue("adaptive_scale_band"));
        }

        Ok(())
    }

    fn validate_as_update(&self, prev: &Self) -> Result<(), SettingsError> {
        self.validate()?;

        check_immutable_setting!(self, prev, normalize);
        check_immutable_setting!(self, prev, scale);
        check_immutable_setting!(self, prev, rho_x);
        check_immutable_setting!(self, prev, rho_zero_ratio);
        check_immutable_setting!(self, prev, equilibrate_max_iter);
        check_immutable_setting!(self, prev, equilibrate_min_scaling);
        check_immutable_setting!(self, prev, equilibrate_max_scaling);
        check_immutable_setting!(self, prev, direct_solve_method);

        Ok(())
    }
}

// pre build checker (for auto-validation when using the builder)

impl From<SettingsError> for DefaultSettingsBuilderError {
    fn from(e: SettingsError) -> Self {
        DefaultSettingsBuilderError::ValidationError(e.to_string())
    }
}

/// Automatic pre-build settings validation
impl<T> DefaultSettingsBuilder<T>
where
    T: FloatT,
{
    /// check that the specified direct_solve_method is valid
    pub fn validate(&self) -> Result<(), SettingsError> {
        if let Some(ref direct_solve_method) = self.direct_solve_method {
            validate_direct_solve_method(direct_solve_method)?;
        }
        Ok(())
    }
}

fn validate_direct_solve_method(direct_solve_method: &str) -> Result<(), SettingsError> {
    match direct_solve_method {
        "denseldl" => Ok(()),
        _ => Err(SettingsError::BadFieldValue("direct_solve_method")),
    }
}

#[test]
fn test_settings_validate() {
    // all standard settings
    DefaultSettingsBuilder::<f64>::default().build().unwrap();

    // fail on unknown direct solve method
    assert!(DefaultSettingsBuilder::<f64>::default()
        .direct_solve_method("foo".to_string())
        .build()
        .is_err());

    // directly construct a bad DefaultSettings and manually check
    let settings = DefaultSettings::<f64> {
        alpha: 2.5,
        ..DefaultSettings::default()
    };
    assert!(settings.validate().is_err());

    // try to overlay prohibited update values
    let oldsettings = DefaultSettings::<f64> {
        rho_x: 1e-3,
        ..DefaultSettings::default()
    };
    let newsettings = DefaultSettings::<f64> {
        rho_x: 1e-2,
        ..DefaultSettings::default()
    };
    assert!(newsettings.validate_as_update(&oldsettings).is_err());

    // try to overlay allowed update values
    let oldsettings = DefaultSettings::<f64> {
        max_iters: 10,
        ..DefaultSettings::default()
    };
    let newsettings = DefaultSettings::<f64> {
        max_iters: 11,
        ..DefaultSettings::default()
    };
    assert!(newsettings.validate_as_update(&oldsettings).is_ok());
}
