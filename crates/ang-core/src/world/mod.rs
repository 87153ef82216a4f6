//! Engine-wide configuration and error types

pub mod config;
pub mod errors;

pub use config::{ConfigError, GenerationConfig, NastyCurve, SpecialRaces};
pub use errors::{PlacementError, Rejection};
