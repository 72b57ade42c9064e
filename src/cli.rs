use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use slope_noise::field::{NoiseConfig, SlopeMode};

pub const DEFAULT_CONFIG_PATH: &str = "noise.json";

/// Command-line overrides applied on top of the config file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CliArgs {
    pub config_path: Option<PathBuf>,
    pub seed: Option<i64>,
    pub table_seed: Option<u64>,
    pub octaves: Option<u32>,
    pub grid: Option<usize>,
    pub spatial_slopes: bool,
}

impl CliArgs {
    pub fn from_env_args() -> Result<Self> {
        Self::from_iter(
            std::env::args_os().skip(1),
            std::env::var_os("SLOPE_NOISE_TABLE_SEED"),
        )
    }

    fn from_iter<I>(args: I, env_table_seed: Option<OsString>) -> Result<Self>
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut parsed = Self::default();

        if let Some(value) = env_table_seed.as_deref() {
            parsed.table_seed =
                Some(parse_value(value).context("invalid SLOPE_NOISE_TABLE_SEED")?);
        }

        let mut iter = args.into_iter();
        while let Some(arg) = iter.next() {
            let arg_str = arg.to_string_lossy();
            let flag = arg_str.as_ref();
            match flag {
                "--spatial-slopes" => parsed.spatial_slopes = true,
                "--config" | "--seed" | "--table-seed" | "--octaves" | "--grid" => {
                    let Some(value) = iter.next() else {
                        return Err(anyhow!("{flag} requires a value"));
                    };
                    match flag {
                        "--config" => parsed.config_path = Some(PathBuf::from(value)),
                        "--seed" => parsed.seed = Some(parse_value(&value).context("--seed")?),
                        "--table-seed" => {
                            parsed.table_seed = Some(parse_value(&value).context("--table-seed")?)
                        }
                        "--octaves" => {
                            parsed.octaves = Some(parse_value(&value).context("--octaves")?)
                        }
                        _ => parsed.grid = Some(parse_value(&value).context("--grid")?),
                    }
                }
                other => log::warn!("ignoring unknown argument {other}"),
            }
        }

        Ok(parsed)
    }

    pub fn apply(&self, config: &mut NoiseConfig) {
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(seed) = self.table_seed {
            config.table.seed = Some(seed);
        }
        if let Some(octaves) = self.octaves {
            config.fractal.octaves = octaves;
        }
        if let Some(side) = self.grid {
            config.grid.columns = side;
            config.grid.rows = side;
        }
        if self.spatial_slopes {
            config.slope_mode = SlopeMode::Spatial;
        }
    }
}

fn parse_value<T>(value: &OsStr) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let text = value.to_string_lossy();
    text.trim()
        .parse()
        .with_context(|| format!("cannot parse {text:?}"))
}
