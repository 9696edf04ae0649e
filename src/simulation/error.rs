use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("Invalid lattice dimensions: {width}x{height} (both must be positive)")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Invalid parameter '{name}' = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

pub type FieldResult<T> = Result<T, FieldError>;
