//! Implementations of core solver traits for concrete problem formats.

pub mod default;
