use std::sync::Arc;

use crate::field::config::{FractalParams, SlopeMode};
use crate::field::error::NoiseError;
use crate::field::octave::{evaluate_octave, Octave, OctaveSample};
use crate::field::permutation::PermutationTable;
use crate::field::sample::NoiseSample;

/// Added to the seed at the start of every octave.
pub const OCTAVE_RESEED: i64 = 239_487_234;
/// Modulus of the per-octave reseed.
pub const SEED_MODULUS: i64 = 293_842_387_423;

/// Yields the lattice settings of each octave in order: resolution starts at
/// `2 * density` and doubles, amplitude starts at 1 and is scaled by `ratio`,
/// and each seed is `(previous + OCTAVE_RESEED) mod SEED_MODULUS`.
#[derive(Debug, Clone)]
pub struct OctaveSchedule {
    remaining: u32,
    resolution: f64,
    amplitude: f64,
    ratio: f64,
    seed: i64,
}

impl OctaveSchedule {
    pub fn new(params: &FractalParams, seed: i64) -> Self {
        Self {
            remaining: params.octaves,
            resolution: 2.0 * params.density,
            amplitude: 1.0,
            ratio: params.ratio,
            seed,
        }
    }
}

impl Iterator for OctaveSchedule {
    type Item = Octave;

    fn next(&mut self) -> Option<Octave> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        self.seed = self.seed.wrapping_add(OCTAVE_RESEED).rem_euclid(SEED_MODULUS);
        let octave = Octave {
            resolution: self.resolution,
            amplitude: self.amplitude,
            seed: self.seed,
        };

        self.resolution *= 2.0;
        self.amplitude *= self.ratio;
        Some(octave)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining as usize;
        (n, Some(n))
    }
}

/// Running sums of the octave loop.
#[derive(Debug, Clone, Default)]
pub struct FractalAccumulator {
    value_sum: f64,
    sx_sum: f64,
    sy_sum: f64,
    amplitude_sum: f64,
}

impl FractalAccumulator {
    /// Folds in one octave. In [`SlopeMode::Lattice`] the slopes are added
    /// unweighted; in [`SlopeMode::Spatial`] they are converted to domain
    /// units and weighted like the value.
    pub fn add(
        &mut self,
        octave: &Octave,
        sample: OctaveSample,
        mode: SlopeMode,
        cell: (f64, f64),
    ) {
        self.value_sum += octave.amplitude * sample.value;
        self.amplitude_sum += octave.amplitude;
        match mode {
            SlopeMode::Lattice => {
                self.sx_sum += sample.slope_x;
                self.sy_sum += sample.slope_y;
            }
            SlopeMode::Spatial => {
                self.sx_sum += octave.amplitude * sample.slope_x / cell.0;
                self.sy_sum += octave.amplitude * sample.slope_y / cell.1;
            }
        }
    }

    /// Normalizes the value into `[-1, 1]`. Requires at least one octave.
    pub fn finish(self, mode: SlopeMode) -> NoiseSample {
        let scale = 2.0 / self.amplitude_sum;
        let (sx, sy) = match mode {
            SlopeMode::Lattice => (self.sx_sum, self.sy_sum),
            SlopeMode::Spatial => (self.sx_sum * scale, self.sy_sum * scale),
        };
        NoiseSample {
            value: self.value_sum * scale,
            sx,
            sy,
        }
    }
}

/// Tileable fractal value noise over a frozen permutation table.
///
/// Cheap to clone; clones share the table.
#[derive(Debug, Clone)]
pub struct ValueNoise {
    table: Arc<PermutationTable>,
    seed: i64,
    slope_mode: SlopeMode,
}

impl ValueNoise {
    pub fn new(table: Arc<PermutationTable>, seed: i64) -> Self {
        Self {
            table,
            seed,
            slope_mode: SlopeMode::default(),
        }
    }

    pub fn with_slope_mode(mut self, slope_mode: SlopeMode) -> Self {
        self.slope_mode = slope_mode;
        self
    }

    pub fn table(&self) -> &PermutationTable {
        &self.table
    }

    pub fn seed(&self) -> i64 {
        self.seed
    }

    pub fn slope_mode(&self) -> SlopeMode {
        self.slope_mode
    }

    pub fn evaluate(
        &self,
        x: f64,
        y: f64,
        params: &FractalParams,
    ) -> Result<NoiseSample, NoiseError> {
        params.validate()?;
        Ok(self.evaluate_unchecked(x, y, params))
    }

    /// Skips parameter validation; `params` must already have passed
    /// [`FractalParams::validate`].
    pub(crate) fn evaluate_unchecked(
        &self,
        x: f64,
        y: f64,
        params: &FractalParams,
    ) -> NoiseSample {
        let (width, height) = (params.domain_width, params.domain_height);
        let mut acc = FractalAccumulator::default();
        for octave in OctaveSchedule::new(params, self.seed) {
            let sample = evaluate_octave(&self.table, x, y, width, height, &octave);
            acc.add(&octave, sample, self.slope_mode, octave.cell_size(width, height));
        }
        acc.finish(self.slope_mode)
    }
}
