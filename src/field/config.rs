use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::field::error::NoiseError;
use crate::field::heightfield::GridRequest;
use crate::field::permutation::DEFAULT_TABLE_SIDE;

/// Per-call parameters of the fractal sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FractalParams {
    /// Horizontal tiling period.
    pub domain_width: f64,
    /// Vertical tiling period.
    pub domain_height: f64,
    /// Base lattice resolution; octave 0 has `2 * density` cells per axis.
    pub density: f64,
    pub octaves: u32,
    /// Amplitude falloff per octave (persistence).
    pub ratio: f64,
}

impl Default for FractalParams {
    fn default() -> Self {
        Self {
            domain_width: 256.0,
            domain_height: 256.0,
            density: 1.0,
            octaves: 8,
            ratio: 0.5,
        }
    }
}

impl FractalParams {
    pub fn validate(&self) -> Result<(), NoiseError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.domain_width) || !positive(self.domain_height) {
            return Err(NoiseError::NonPositiveDomain {
                width: self.domain_width,
                height: self.domain_height,
            });
        }
        if !positive(self.density) {
            return Err(NoiseError::NonPositiveDensity(self.density));
        }
        if self.octaves == 0 {
            return Err(NoiseError::ZeroOctaves);
        }
        if !positive(self.ratio) {
            return Err(NoiseError::NonPositiveRatio(self.ratio));
        }
        Ok(())
    }

    /// Lattice cells per axis of the finest octave.
    pub fn finest_resolution(&self) -> f64 {
        let doublings = self.octaves.saturating_sub(1).min(i32::MAX as u32) as i32;
        2.0 * self.density * 2f64.powi(doublings)
    }

    /// True when the finest octave has more cells per axis than the hash
    /// domain, so distinct cells start sharing hash values.
    pub fn exceeds_hash_domain(&self, table_side: u32) -> bool {
        self.finest_resolution() > table_side as f64
    }

    /// Logs accepted-but-degraded parameter choices.
    pub fn warn_degraded(&self, table_side: u32) {
        if self.exceeds_hash_domain(table_side) {
            log::warn!(
                "finest octave resolution {} exceeds hash domain side {table_side}; lattice values will alias",
                self.finest_resolution()
            );
        }
        if self.ratio >= 1.0 {
            log::warn!(
                "octave ratio {} does not decay; finer octaves dominate the sum",
                self.ratio
            );
        }
    }
}

/// How partial derivatives are accumulated across octaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlopeMode {
    /// Each octave's slope with respect to its own lattice coordinate,
    /// summed without amplitude weighting.
    #[default]
    Lattice,
    /// Exact partial derivatives of the returned value in domain units.
    Spatial,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub side: u32,
    /// Seed for table construction. `None` draws from the thread rng.
    pub seed: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            side: DEFAULT_TABLE_SIDE,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub columns: usize,
    pub rows: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: 128,
            rows: 128,
        }
    }
}

impl GridConfig {
    pub fn request(&self) -> GridRequest {
        GridRequest {
            columns: self.columns,
            rows: self.rows,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    /// Session seed fed to every evaluation.
    pub seed: i64,
    pub table: TableConfig,
    pub fractal: FractalParams,
    pub slope_mode: SlopeMode,
    pub grid: GridConfig,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            seed: 32279,
            table: TableConfig::default(),
            fractal: FractalParams::default(),
            slope_mode: SlopeMode::default(),
            grid: GridConfig::default(),
        }
    }
}

impl NoiseConfig {
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            log::info!("no {} found, using defaults", path.display());
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("loaded {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("failed to parse {}: {e}, using defaults", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("failed to read {}: {e}, using defaults", path.display());
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("saved noise config to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_parameters() {
        let p = FractalParams::default();
        assert_eq!(p.domain_width, 256.0);
        assert_eq!(p.domain_height, 256.0);
        assert_eq!(p.density, 1.0);
        assert_eq!(p.octaves, 8);
        assert_eq!(p.ratio, 0.5);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn rejects_preconditions() {
        let base = FractalParams::default();
        let zero_octaves = FractalParams {
            octaves: 0,
            ..base.clone()
        };
        assert_eq!(zero_octaves.validate(), Err(NoiseError::ZeroOctaves));

        let flat = FractalParams {
            domain_height: 0.0,
            ..base.clone()
        };
        assert!(matches!(
            flat.validate(),
            Err(NoiseError::NonPositiveDomain { .. })
        ));

        let nan_width = FractalParams {
            domain_width: f64::NAN,
            ..base.clone()
        };
        assert!(nan_width.validate().is_err());

        let density = FractalParams {
            density: -1.0,
            ..base.clone()
        };
        assert_eq!(density.validate(), Err(NoiseError::NonPositiveDensity(-1.0)));

        let ratio = FractalParams { ratio: 0.0, ..base };
        assert_eq!(ratio.validate(), Err(NoiseError::NonPositiveRatio(0.0)));
    }

    #[test]
    fn finest_resolution_doubles_per_octave() {
        let p = FractalParams::default();
        assert_eq!(p.finest_resolution(), 256.0);
        assert!(!p.exceeds_hash_domain(256));

        let deep = FractalParams { octaves: 9, ..p };
        assert_eq!(deep.finest_resolution(), 512.0);
        assert!(deep.exceeds_hash_domain(256));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let json = r#"{ "seed": -4, "fractal": { "octaves": 3 }, "slope_mode": "spatial" }"#;
        let config: NoiseConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.seed, -4);
        assert_eq!(config.fractal.octaves, 3);
        assert_eq!(config.fractal.ratio, 0.5);
        assert_eq!(config.slope_mode, SlopeMode::Spatial);
        assert_eq!(config.table, TableConfig::default());
        assert_eq!(config.grid.columns, 128);
    }

    #[test]
    fn load_falls_back_to_defaults() {
        let missing = std::env::temp_dir().join("slope-noise-missing-config.json");
        let _ = std::fs::remove_file(&missing);
        assert_eq!(NoiseConfig::load(&missing), NoiseConfig::default());

        let broken = std::env::temp_dir().join(format!(
            "slope-noise-broken-{}.json",
            std::process::id()
        ));
        std::fs::write(&broken, "{ not json").unwrap();
        assert_eq!(NoiseConfig::load(&broken), NoiseConfig::default());
        let _ = std::fs::remove_file(&broken);
    }

    #[test]
    fn save_then_load_keeps_overrides() {
        let path = std::env::temp_dir().join(format!(
            "slope-noise-saved-{}.json",
            std::process::id()
        ));
        let mut config = NoiseConfig::default();
        config.table.seed = Some(99);
        config.grid.rows = 7;
        config.save(&path).unwrap();
        assert_eq!(NoiseConfig::load(&path), config);
        let _ = std::fs::remove_file(&path);
    }
}
