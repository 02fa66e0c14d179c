//! Scalar field generation and normalization

mod noise;
mod scalar_field;

pub use noise::{CoherentNoise, NoiseKind, NoiseSource, ValueNoise};
pub use scalar_field::{ScalarField, MAX_FIELD_SIZE, MIN_FIELD_SIZE};
