pub mod enums;
pub mod graph;
pub mod lab;
pub mod profile;

pub use enums::*;
pub use graph::*;
pub use lab::*;
pub use profile::*;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },

    #[error("Age must be between 0 and {max} years, got {age}")]
    InvalidAge { age: i64, max: u32 },

    #[error("Invalid {field}: {value} (must be a finite positive number)")]
    InvalidBodyMetric { field: &'static str, value: f64 },

    #[error("Value for {parameter} is not a finite number")]
    NonFiniteValue { parameter: String },
}
