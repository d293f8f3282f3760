use cartotrace_client::route_service_client::DEFAULT_API_URL;
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

use crate::{
    app::ServiceArgs, generate::GenerateSubcommands, points::PointsSubcommands,
    replay::ReplayArgs, solve::SolveArgs,
};

mod app;
mod compare;
mod generate;
mod parsers;
mod points;
mod render;
mod replay;
mod scenario;
mod solve;
mod terminal_surface;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true)]
    debug: bool,

    /// Base URL of the route service
    #[arg(long, env = "CARTOTRACE_API_URL", default_value = DEFAULT_API_URL, global = true)]
    api_url: String,

    /// Timeout of a single request (e.g., "30s", "PT1M")
    #[arg(
        long,
        env = "CARTOTRACE_TIMEOUT",
        value_parser = parsers::parse_std_duration,
        default_value = "60s",
        global = true
    )]
    timeout: std::time::Duration,
}

#[derive(Subcommand)]
enum Commands {
    /// List, add or remove points of the active dataset
    Points {
        #[command(subcommand)]
        commands: PointsSubcommands,
    },
    /// Solve on the service and replay the search step by step
    Solve {
        #[command(flatten)]
        args: SolveArgs,
    },
    /// Replay a saved trace without contacting the service
    Replay {
        #[command(flatten)]
        args: ReplayArgs,
    },
    /// Run every algorithm and compare their metrics
    Compare,
    /// Switch to another predefined dataset
    Scenario { id: u32 },
    /// Go back to the default dataset
    Reset,
    #[command(visible_alias = "g")]
    Generate {
        #[command(subcommand)]
        commands: GenerateSubcommands,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let service = ServiceArgs {
        api_url: cli.api_url,
        timeout: cli.timeout,
    };

    match cli.command {
        Commands::Points { commands } => points::run(commands, &service).await?,
        Commands::Solve { args } => solve::run(args, &service).await?,
        Commands::Replay { args } => replay::run(args).await?,
        Commands::Compare => compare::run(&service).await?,
        Commands::Scenario { id } => scenario::run(id, &service).await?,
        Commands::Reset => scenario::reset(&service).await?,
        Commands::Generate { commands } => generate::run(commands)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_solve() {
        let cli = Cli::try_parse_from([
            "cartotrace",
            "--api-url",
            "http://planner.local:8080",
            "solve",
            "--algorithm",
            "astar",
            "--delay",
            "0.5",
        ])
        .unwrap();

        assert_eq!(cli.api_url, "http://planner.local:8080");
        assert!(matches!(cli.command, Commands::Solve { .. }));
    }

    #[test]
    fn test_parse_negative_coordinates() {
        let cli = Cli::try_parse_from(["cartotrace", "points", "add", "Lima", "-12.0464", "-77.0428"])
            .unwrap();

        assert!(matches!(
            cli.command,
            Commands::Points {
                commands: PointsSubcommands::Add { lat, lng, .. }
            } if lat == -12.0464 && lng == -77.0428
        ));
    }

    #[test]
    fn test_parse_generate_points_schema() {
        let cli = Cli::try_parse_from(["cartotrace", "g", "json-schema", "--target", "points"])
            .unwrap();

        assert!(matches!(
            cli.command,
            Commands::Generate {
                commands: GenerateSubcommands::JsonSchema {
                    target: generate::SchemaTarget::Points,
                    out: None,
                }
            }
        ));
    }
}
