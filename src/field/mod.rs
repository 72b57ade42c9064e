mod par;

pub mod blend;
pub mod config;
pub mod error;
pub mod fractal;
pub mod hash;
pub mod heightfield;
pub mod layer;
pub mod octave;
pub mod permutation;
pub mod sample;
pub mod stats;

pub use config::{FractalParams, NoiseConfig, SlopeMode};
pub use error::NoiseError;
pub use fractal::ValueNoise;
pub use permutation::PermutationTable;
pub use sample::NoiseSample;
