use crate::field::config::FractalParams;
use crate::field::error::NoiseError;
use crate::field::fractal::ValueNoise;
use crate::field::layer::Layer;
use crate::field::par::collect_indexed;
use crate::field::sample::NoiseSample;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridRequest {
    pub columns: usize,
    pub rows: usize,
}

impl GridRequest {
    pub fn sample_count(&self) -> Result<usize, NoiseError> {
        self.columns
            .checked_mul(self.rows)
            .ok_or(NoiseError::GridTooLarge {
                columns: self.columns,
                rows: self.rows,
            })
    }
}

/// Row-major samples covering one tile of the field.
#[derive(Debug, Clone, PartialEq)]
pub struct Heightfield {
    pub columns: usize,
    pub rows: usize,
    pub values: Vec<f64>,
    pub slopes_x: Vec<f64>,
    pub slopes_y: Vec<f64>,
    pub min_value: f64,
    pub max_value: f64,
}

impl Heightfield {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn sample(&self, column: usize, row: usize) -> Option<NoiseSample> {
        let idx = self.index(column, row)?;
        Some(NoiseSample {
            value: self.values[idx],
            sx: self.slopes_x[idx],
            sy: self.slopes_y[idx],
        })
    }

    pub fn slope_magnitude(&self, column: usize, row: usize) -> Option<f64> {
        self.sample(column, row).map(|s| s.slope())
    }

    pub fn max_slope(&self) -> f64 {
        self.slopes_x
            .iter()
            .zip(&self.slopes_y)
            .map(|(sx, sy)| (sx * sx + sy * sy).sqrt())
            .fold(0.0, f64::max)
    }

    pub fn mean(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }

    fn index(&self, column: usize, row: usize) -> Option<usize> {
        (column < self.columns && row < self.rows).then_some(row * self.columns + column)
    }
}

/// Samples a [`ValueNoise`] over one tile, `[0, width) x [0, height)`.
pub struct HeightfieldLayer {
    noise: ValueNoise,
    params: FractalParams,
}

impl HeightfieldLayer {
    pub fn new(noise: ValueNoise, params: FractalParams) -> Result<Self, NoiseError> {
        params.validate()?;
        params.warn_degraded(noise.table().side());
        Ok(Self { noise, params })
    }

    pub fn params(&self) -> &FractalParams {
        &self.params
    }
}

impl Layer<GridRequest, Result<Heightfield, NoiseError>> for HeightfieldLayer {
    fn generate(&self, request: GridRequest) -> Result<Heightfield, NoiseError> {
        let total = request.sample_count()?;
        let GridRequest { columns, rows } = request;
        let step_x = self.params.domain_width / columns.max(1) as f64;
        let step_y = self.params.domain_height / rows.max(1) as f64;

        let samples: Vec<NoiseSample> = collect_indexed(total, |idx| {
            let x = (idx % columns) as f64 * step_x;
            let y = (idx / columns) as f64 * step_y;
            self.noise.evaluate_unchecked(x, y, &self.params)
        });

        let (min_value, max_value) = if samples.is_empty() {
            (0.0, 0.0)
        } else {
            samples
                .iter()
                .fold((f64::MAX, f64::MIN), |(lo, hi), s| (lo.min(s.value), hi.max(s.value)))
        };
        log::debug!(
            "sampled {columns}x{rows} heightfield, value range [{min_value:.4}, {max_value:.4}]"
        );

        Ok(Heightfield {
            columns,
            rows,
            values: samples.iter().map(|s| s.value).collect(),
            slopes_x: samples.iter().map(|s| s.sx).collect(),
            slopes_y: samples.iter().map(|s| s.sy).collect(),
            min_value,
            max_value,
        })
    }
}
