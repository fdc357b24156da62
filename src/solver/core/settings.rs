use thiserror::Error;

/// Error type returned by settings validation
#[derive(Error, Debug)]
pub enum SettingsError {
    /// An error attributable to one of the named fields
    #[error("Bad value for field '{0}'")]
    BadFieldValue(&'static str),
    /// Tried to change a setting that is immutable after initialization
    #[error("Field '{0}' cannot be changed after solver initialization")]
    ImmutableSetting(&'static str),
}

// Currently the only settings implementation is the DefaultSettings
// object, so the CoreSettings required by the engine is just an alias.

/// Settings type for the core solver engine.
pub type CoreSettings<T> = crate::solver::implementations::default::DefaultSettings<T>;
