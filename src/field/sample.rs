use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Field value and its partial derivatives at one point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NoiseSample {
    pub value: f64,
    pub sx: f64,
    pub sy: f64,
}

impl NoiseSample {
    pub fn gradient(&self) -> DVec2 {
        DVec2::new(self.sx, self.sy)
    }

    /// Steepness, `|(sx, sy)|`.
    pub fn slope(&self) -> f64 {
        self.gradient().length()
    }
}
