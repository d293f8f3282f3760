use std::time::Duration;

use cartotrace_core::{
    map_surface::MapSurface, route_service::RouteService, session::{Session, SolveOutcome},
    trace::Algorithm,
};
use clap::Args;
use tracing::{info, warn};

use crate::{
    app::{self, ServiceArgs},
    parsers, render,
};

#[derive(Args)]
pub struct SolveArgs {
    #[arg(short, long, value_parser = parsers::parse_algorithm, default_value = "greedy")]
    algorithm: Algorithm,

    /// Pause between replayed steps (e.g., "1.2s", "PT2S", "0.5")
    #[arg(long, value_parser = parsers::parse_std_duration, default_value = "1.2s")]
    delay: Duration,
}

pub async fn run(args: SolveArgs, service: &ServiceArgs) -> anyhow::Result<()> {
    let mut session = app::connect(service, args.delay)?;
    let cancel = app::cancel_on_ctrl_c(session.gate());

    let result = session.load_points().await;
    if app::finish(&mut session, result)?.is_none() {
        cancel.abort();
        return Ok(());
    }

    info!("Solving with {}", args.algorithm.label());
    let result = session.solve(args.algorithm).await;
    cancel.abort();

    if let Some(outcome) = app::finish(&mut session, result)? {
        report(&session, &outcome);
    }

    Ok(())
}

pub fn report<S, M>(session: &Session<S, M>, outcome: &SolveOutcome)
where
    S: RouteService,
    M: MapSurface,
{
    for inconsistency in &outcome.replay.inconsistencies {
        warn!("{}", inconsistency);
    }

    if let Some(panel) = &session.view().result {
        render::print_result(panel);
    }
}
