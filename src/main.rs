// Binary entry point, native only.

#[cfg(not(target_arch = "wasm32"))]
mod cli;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use std::path::Path;
    use std::sync::Arc;

    use anyhow::Context;

    use slope_noise::field::heightfield::HeightfieldLayer;
    use slope_noise::field::layer::Layer;
    use slope_noise::field::stats::FieldSummary;
    use slope_noise::field::{NoiseConfig, PermutationTable, ValueNoise};

    use cli::{CliArgs, DEFAULT_CONFIG_PATH};

    env_logger::init();
    let args = CliArgs::from_env_args()?;

    let config_path = args
        .config_path
        .clone()
        .unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH).to_path_buf());
    let mut config = NoiseConfig::load(&config_path);
    args.apply(&mut config);
    config
        .fractal
        .validate()
        .context("invalid fractal parameters")?;

    let side = config.table.side;
    let table = match config.table.seed {
        Some(seed) => PermutationTable::with_seed(side, seed),
        None => PermutationTable::build(side, &mut rand::rng()),
    }
    .context("failed to build permutation table")?;
    log::info!(
        "session seed {}, {} octaves, slope mode {:?}",
        config.seed,
        config.fractal.octaves,
        config.slope_mode
    );

    let noise = ValueNoise::new(Arc::new(table), config.seed).with_slope_mode(config.slope_mode);
    let layer = HeightfieldLayer::new(noise, config.fractal.clone())?;
    let field = layer
        .generate(config.grid.request())
        .context("cannot sample configured grid")?;

    let summary = FieldSummary::from_heightfield(&field);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Library-only on wasm32.
}
