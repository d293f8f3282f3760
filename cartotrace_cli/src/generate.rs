use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

#[derive(Subcommand)]
pub enum GenerateSubcommands {
    /// JSON schema of the files `replay` reads
    JsonSchema {
        #[arg(long, value_enum, default_value_t = SchemaTarget::Trace)]
        target: SchemaTarget,

        /// Written to stdout when omitted
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SchemaTarget {
    /// A solver response passed with `--trace`
    Trace,
    /// A point list passed with `--points`
    Points,
}

pub fn run(subcommand: GenerateSubcommands) -> Result<(), anyhow::Error> {
    match subcommand {
        GenerateSubcommands::JsonSchema { target, out } => {
            let schema = schema_for(target)?;

            match out {
                Some(out) => {
                    if let Some(parent) = out.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(out, schema)?;
                }
                None => println!("{schema}"),
            }
        }
    }

    Ok(())
}

fn schema_for(target: SchemaTarget) -> Result<String, serde_json::Error> {
    match target {
        SchemaTarget::Trace => cartotrace_core::trace::generate_json_schema(),
        SchemaTarget::Points => cartotrace_core::point::generate_points_json_schema(),
    }
}
