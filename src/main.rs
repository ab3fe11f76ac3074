use std::io::{self, Write};

use life3d::*;
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng as _;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod args;

use args::RunConfig;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let config = args::parse()?;
    let stdout = io::stdout();
    run(&config, &mut stdout.lock())?;
    Ok(())
}

/// Fill a fresh world, run the requested generations and report population
/// per generation on `out`. Returns the final population.
fn run(config: &RunConfig, out: &mut impl Write) -> anyhow::Result<usize> {
    let seed = config.seed.unwrap_or_else(rand::random);
    info!(
        rules = %config.grid.rules,
        bounds = ?config.grid.bounds,
        density = config.density,
        seed,
        "starting"
    );

    // Solid shell so neighbor reads just outside the box stay in the world
    let world = VoxelWorld::enclosing(config.grid.bounds, Voxel::Empty, Voxel::Solid(0))?;
    let mut grid = config.grid.build(world, Voxel::classifier())?;

    let mut prng = ChaCha8Rng::seed_from_u64(seed);
    let writes = grid.shuffle(config.density, &mut prng)?;
    debug!(writes, "filled");

    let mut population = grid.population()?;
    writeln!(out, "gen 0: population {population}")?;
    for _ in 0..config.generations {
        let gen = grid.step()?;
        population = grid.population()?;
        writeln!(
            out,
            "gen {}: population {} (+{} -{})",
            gen.index, population, gen.births, gen.deaths
        )?;
        if gen.changes() == 0 {
            info!(generation = gen.index, "stable");
            break;
        }
    }
    Ok(population)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_reports_generations() {
        let config = RunConfig {
            seed: Some(1),
            generations: 3,
            ..RunConfig::default()
        };
        let mut out = Vec::new();
        run(&config, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("gen 0: population "));
        assert!(lines.len() >= 2 && lines.len() <= 4);
        assert!(lines[1].starts_with("gen 1: population "));
    }

    #[test]
    fn run_is_reproducible() {
        let config = RunConfig {
            seed: Some(99),
            generations: 5,
            ..RunConfig::default()
        };
        let (mut a, mut b) = (Vec::new(), Vec::new());
        let pa = run(&config, &mut a).unwrap();
        let pb = run(&config, &mut b).unwrap();
        assert_eq!(pa, pb);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_world_is_stable() {
        let config = RunConfig {
            density: 0.0,
            seed: Some(0),
            generations: 50,
            ..RunConfig::default()
        };
        let mut out = Vec::new();
        assert_eq!(run(&config, &mut out).unwrap(), 0);
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out, "gen 0: population 0\ngen 1: population 0 (+0 -0)\n");
    }

    #[test]
    fn inverted_bounds_fail() {
        let mut config = RunConfig::default();
        config.grid.bounds = Bounds::new(3, 0, 0, 3, 0, 3);
        assert!(run(&config, &mut Vec::new()).is_err());
    }
}
