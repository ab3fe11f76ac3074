//! Command-line arguments and run configuration.

use std::{fs, path::PathBuf};

use anyhow::{bail, Context as _};
use clap::{
    crate_authors, crate_description, crate_version, value_parser, Arg, ArgAction, ArgMatches,
    Command,
};
use life3d::{Boundary, Bounds, GridConfig, Neighborhood, RuleSet};
use serde::Deserialize;

/// A complete run: grid setup, initial fill and how long to run.
///
/// Can be loaded from a TOML file, e.g.
///
/// ```toml
/// density = 0.3
/// seed = 42
/// generations = 20
///
/// [grid]
/// bounds = { min = [0, 0, 0], max = [15, 15, 15] }
/// rules = { max_adjacent_dims = 2, birth_min = 3, birth_max = 3, starvation_max = 2, suffocation_min = 5 }
/// boundary = "Clipped"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RunConfig {
    #[serde(default = "default_grid")]
    pub(crate) grid: GridConfig,
    #[serde(default = "default_density")]
    pub(crate) density: f64,
    #[serde(default)]
    pub(crate) seed: Option<u64>,
    #[serde(default = "default_generations")]
    pub(crate) generations: u64,
}

fn default_grid() -> GridConfig {
    GridConfig::new(Bounds::new(0, 15, 0, 15, 0, 15), RuleSet::classic())
}

fn default_density() -> f64 {
    0.3
}

fn default_generations() -> u64 {
    10
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            grid: default_grid(),
            density: default_density(),
            seed: None,
            generations: default_generations(),
        }
    }
}

impl RunConfig {
    pub(crate) fn from_toml(s: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Override fields with whatever was given on the command line.
    fn apply(&mut self, matches: &ArgMatches) -> anyhow::Result<()> {
        if let Some(b) = matches.get_many::<i32>("bounds") {
            let b: Vec<i32> = b.copied().collect();
            if b.len() != 6 {
                bail!("--bounds takes 6 values, got {}", b.len());
            }
            self.grid.bounds = Bounds::new(b[0], b[1], b[2], b[3], b[4], b[5]);
        }
        if let Some(rules) = matches.get_one::<RuleSet>("rules") {
            self.grid.rules = *rules;
        }
        if let Some(&density) = matches.get_one::<f64>("density") {
            self.density = density;
        }
        if let Some(&seed) = matches.get_one::<u64>("seed") {
            self.seed = Some(seed);
        }
        if let Some(&generations) = matches.get_one::<u64>("generations") {
            self.generations = generations;
        }
        if matches.get_flag("clip") {
            self.grid.boundary = Boundary::Clipped;
        }
        if matches.get_flag("adjacent-dims") {
            self.grid.neighborhood = Neighborhood::AdjacentDims;
        }
        Ok(())
    }
}

fn command() -> Command {
    Command::new("life3d")
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .long_about(
            "Run a 3D life-like cellular automaton on an in-memory voxel world.\n\
             \n\
             Rules are written DIMS/BMIN-BMAX/STARVE/SUFFOCATE:\n\
             * a dead cell with BMIN to BMAX live neighbors is born;\n\
             * a live cell with STARVE or fewer live neighbors dies;\n\
             * a live cell with SUFFOCATE or more live neighbors dies;\n\
             * DIMS is only used with --adjacent-dims.\n",
        )
        .arg(
            Arg::new("config")
                .help("TOML run file; other options override its values")
                .long("config")
                .short('c')
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("bounds")
                .help("Inclusive box as XMIN,XMAX,YMIN,YMAX,ZMIN,ZMAX")
                .long("bounds")
                .short('b')
                .value_delimiter(',')
                .allow_hyphen_values(true)
                .value_parser(value_parser!(i32)),
        )
        .arg(
            Arg::new("rules")
                .help("Rules, e.g. 2/3-3/2/5")
                .long("rules")
                .short('r')
                .allow_hyphen_values(true)
                .value_parser(|s: &str| s.parse::<RuleSet>()),
        )
        .arg(
            Arg::new("density")
                .help("Probability of a cell starting live")
                .long("density")
                .short('d')
                .allow_negative_numbers(true)
                .value_parser(value_parser!(f64)),
        )
        .arg(
            Arg::new("seed")
                .help("Seed for the initial fill")
                .long("seed")
                .short('s')
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("generations")
                .help("Number of generations to run")
                .long("generations")
                .short('n')
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("clip")
                .help("Treat cells outside the box as dead")
                .long("clip")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("adjacent-dims")
                .help("Only count neighbors offset along at most DIMS axes")
                .long("adjacent-dims")
                .action(ArgAction::SetTrue),
        )
}

/// Parse the command line, loading the run file if one is given.
pub(crate) fn parse() -> anyhow::Result<RunConfig> {
    from_matches(&command().get_matches())
}

fn from_matches(matches: &ArgMatches) -> anyhow::Result<RunConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            RunConfig::from_toml(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => RunConfig::default(),
    };
    config.apply(matches)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_from(args: &[&str]) -> anyhow::Result<RunConfig> {
        let matches = command().try_get_matches_from(args)?;
        from_matches(&matches)
    }

    #[test]
    fn defaults() {
        let config = parse_from(&["life3d"]).unwrap();
        assert_eq!(config, RunConfig::default());
        assert_eq!(config.grid.rules, RuleSet::classic());
        assert_eq!(config.grid.boundary, Boundary::Unclipped);
    }

    #[test]
    fn flags() {
        let config = parse_from(&[
            "life3d",
            "--bounds",
            "-4,4,0,1,-2,-1",
            "--rules",
            "3/1-1/-1/100",
            "-d",
            "0.5",
            "-s",
            "7",
            "-n",
            "3",
            "--clip",
            "--adjacent-dims",
        ])
        .unwrap();
        assert_eq!(config.grid.bounds, Bounds::new(-4, 4, 0, 1, -2, -1));
        assert_eq!(config.grid.rules, RuleSet::new(3, 1, 1, -1, 100));
        assert_eq!(config.density, 0.5);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.generations, 3);
        assert_eq!(config.grid.boundary, Boundary::Clipped);
        assert_eq!(config.grid.neighborhood, Neighborhood::AdjacentDims);
    }

    #[test]
    fn bad_bounds() {
        assert!(parse_from(&["life3d", "--bounds", "0,1,2"]).is_err());
        assert!(parse_from(&["life3d", "--rules", "3/1/1"]).is_err());
    }

    #[test]
    fn toml() {
        let config = RunConfig::from_toml(
            r#"
            density = 0.25
            seed = 42

            [grid]
            bounds = { min = [0, 0, 0], max = [7, 7, 3] }
            rules = { max_adjacent_dims = 3, birth_min = 6, birth_max = 7, starvation_max = 5, suffocation_min = 9 }
            boundary = "Clipped"
            "#,
        )
        .unwrap();
        assert_eq!(config.density, 0.25);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.generations, 10);
        assert_eq!(config.grid.bounds, Bounds::new(0, 7, 0, 7, 0, 3));
        assert_eq!(config.grid.rules, RuleSet::new(3, 6, 7, 5, 9));
        assert_eq!(config.grid.boundary, Boundary::Clipped);
        assert_eq!(config.grid.neighborhood, Neighborhood::Moore);

        assert!(RunConfig::from_toml("speed = 3").is_err());
    }
}
