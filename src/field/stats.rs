use serde::Serialize;

use crate::field::heightfield::Heightfield;

pub const HISTOGRAM_BINS: usize = 20;

/// Distribution of field values over `[-1, 1]` in equal-width bins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueHistogram {
    pub counts: [u64; HISTOGRAM_BINS],
    pub below: u64,
    pub above: u64,
}

impl Default for ValueHistogram {
    fn default() -> Self {
        Self {
            counts: [0; HISTOGRAM_BINS],
            below: 0,
            above: 0,
        }
    }
}

impl ValueHistogram {
    pub fn from_values<'a>(values: impl IntoIterator<Item = &'a f64>) -> Self {
        let mut hist = Self::default();
        for &v in values {
            hist.add(v);
        }
        hist
    }

    pub fn add(&mut self, value: f64) {
        if value < -1.0 {
            self.below += 1;
        } else if value > 1.0 || value.is_nan() {
            self.above += 1;
        } else {
            let bin = ((value + 1.0) * 0.5 * HISTOGRAM_BINS as f64) as usize;
            self.counts[bin.min(HISTOGRAM_BINS - 1)] += 1;
        }
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum::<u64>() + self.below + self.above
    }

    pub fn fraction_in_range(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 1.0;
        }
        self.counts.iter().sum::<u64>() as f64 / total as f64
    }

    /// Lower edge of `bin`.
    pub fn bin_start(bin: usize) -> f64 {
        -1.0 + 2.0 * bin as f64 / HISTOGRAM_BINS as f64
    }
}

/// Summary of a sampled heightfield, emitted by the binary.
#[derive(Debug, Clone, Serialize)]
pub struct FieldSummary {
    pub columns: usize,
    pub rows: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub max_slope: f64,
    pub histogram: ValueHistogram,
}

impl FieldSummary {
    pub fn from_heightfield(field: &Heightfield) -> Self {
        Self {
            columns: field.columns,
            rows: field.rows,
            min: field.min_value,
            max: field.max_value,
            mean: field.mean(),
            max_slope: field.max_slope(),
            histogram: ValueHistogram::from_values(&field.values),
        }
    }
}
