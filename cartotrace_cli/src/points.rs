use clap::Subcommand;
use tracing::info;

use crate::{
    app::{self, ServiceArgs},
    render,
};

#[derive(Subcommand)]
pub enum PointsSubcommands {
    /// List the points of the active dataset
    List,
    Add {
        name: String,
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        #[arg(allow_negative_numbers = true)]
        lng: f64,
    },
    Remove {
        name: String,
    },
}

pub async fn run(subcommand: PointsSubcommands, service: &ServiceArgs) -> anyhow::Result<()> {
    let mut session = app::connect(service, std::time::Duration::ZERO)?;

    match subcommand {
        PointsSubcommands::List => {
            let result = session.load_points().await;
            app::finish(&mut session, result)?;
        }
        PointsSubcommands::Add { name, lat, lng } => {
            let result = session.add_point(&name, lat, lng).await;
            if let Some(added) = app::finish(&mut session, result)? {
                info!("Add {}: {}", name.trim(), added);
            }
        }
        PointsSubcommands::Remove { name } => {
            let result = session.remove_point(&name).await;
            match app::finish(&mut session, result)? {
                Some(false) => info!("No point named {}", name),
                Some(true) => info!("Removed {}", name),
                None => {}
            }
        }
    }

    if session.sidebar().is_empty() {
        let result = session.load_points().await;
        app::finish(&mut session, result)?;
    }
    render::print_points(session.sidebar());

    Ok(())
}
