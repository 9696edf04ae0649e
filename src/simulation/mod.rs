mod error;
mod field;
mod params;
mod shape;

pub use error::{FieldError, FieldResult};
pub use field::{WaveField, REFERENCE_HEIGHT};
pub use params::{Impulse, WaveParams};
pub use shape::Shape;
