use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use wn_components::{Curve, CurveType};
use wn_network::{ConfigError, ModelConfig};
use wn_solver::{SolverError, fit_curve};

#[derive(Parser)]
#[command(name = "wn-cli")]
#[command(about = "WaterNet CLI - water distribution network model tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fit pump head-curve coefficients h(q) = a - b*q^c
    FitCurve {
        /// Curve point as FLOW,HEAD; give once or three times
        #[arg(long = "point", value_parser = parse_point, required = true)]
        points: Vec<(f64, f64)>,
        /// Model configuration YAML supplying the solver budget
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Load a model configuration file and print the effective settings
    CheckConfig {
        /// Path to the configuration YAML file
        path: PathBuf,
    },
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error("Invalid curve: {0}")]
    Curve(#[from] wn_components::ComponentError),
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::FitCurve { points, config } => cmd_fit_curve(points, config.as_deref()),
        Commands::CheckConfig { path } => cmd_check_config(&path),
    }
}

fn parse_point(s: &str) -> Result<(f64, f64), String> {
    let (q, h) = s
        .split_once(',')
        .ok_or_else(|| format!("expected FLOW,HEAD, got '{s}'"))?;
    let q: f64 = q.trim().parse().map_err(|e| format!("bad flow '{q}': {e}"))?;
    let h: f64 = h.trim().parse().map_err(|e| format!("bad head '{h}': {e}"))?;
    Ok((q, h))
}

fn load_config(path: Option<&Path>) -> CliResult<ModelConfig> {
    match path {
        Some(p) => {
            info!(path = %p.display(), "loading configuration");
            Ok(ModelConfig::load_yaml(p)?)
        }
        None => Ok(ModelConfig::default()),
    }
}

fn cmd_fit_curve(points: Vec<(f64, f64)>, config: Option<&Path>) -> CliResult<()> {
    let config = load_config(config)?;
    let curve = Curve::new("cli", CurveType::Head, points)?;
    let coeffs = fit_curve(&curve, &config.newton())?;

    println!("a = {:.10}", coeffs.a);
    println!("b = {:.10}", coeffs.b);
    println!("c = {:.10}", coeffs.c);

    let max_residual = curve
        .points()
        .iter()
        .map(|&(q, h)| coeffs.residual(q, h).abs())
        .fold(0.0, f64::max);
    println!("max residual = {max_residual:.3e}");
    Ok(())
}

fn cmd_check_config(path: &Path) -> CliResult<()> {
    let config = load_config(Some(path))?;
    println!("✓ Configuration is valid: {}", path.display());
    print!("{}", config.to_yaml_string()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_parsing() {
        assert_eq!(parse_point("10,20"), Ok((10.0, 20.0)));
        assert_eq!(parse_point(" 0.5 , 3 "), Ok((0.5, 3.0)));
        assert!(parse_point("10").is_err());
        assert!(parse_point("a,b").is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn fit_curve_args_collect_points() {
        let cli = Cli::try_parse_from([
            "wn-cli", "fit-curve", "--point", "0,35", "--point", "10,20", "--point", "18,2",
        ])
        .unwrap();
        match cli.command {
            Commands::FitCurve { points, config } => {
                assert_eq!(points, vec![(0.0, 35.0), (10.0, 20.0), (18.0, 2.0)]);
                assert!(config.is_none());
            }
            Commands::CheckConfig { .. } => panic!("wrong subcommand"),
        }
    }
}
