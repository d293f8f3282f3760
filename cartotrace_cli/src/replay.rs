use std::{fs::File, io::BufReader, path::PathBuf, sync::Arc, time::Duration};

use cartotrace_core::{
    in_memory_service::InMemoryService,
    point::{Point, PointEntry},
    trace::{Algorithm, Trace},
};
use clap::Args;
use tracing::info;

use crate::{app, parsers, solve};

#[derive(Args)]
pub struct ReplayArgs {
    /// Solver response saved as JSON (see `generate json-schema`)
    #[arg(short, long)]
    trace: PathBuf,

    /// Points as `[[name, [lat, lng]], ...]`
    #[arg(short, long)]
    points: PathBuf,

    /// Used for the evaluation mode when the trace does not name its algorithm
    #[arg(short, long, value_parser = parsers::parse_algorithm, default_value = "greedy")]
    algorithm: Algorithm,

    #[arg(long, value_parser = parsers::parse_std_duration, default_value = "1.2s")]
    delay: Duration,
}

pub async fn run(args: ReplayArgs) -> anyhow::Result<()> {
    let trace: Trace = serde_json::from_reader(BufReader::new(File::open(&args.trace)?))?;
    let entries: Vec<PointEntry> =
        serde_json::from_reader(BufReader::new(File::open(&args.points)?))?;
    let points: Vec<Point> = entries.into_iter().map(Point::from).collect();
    info!(
        "Replaying {} steps over {} points",
        trace.steps.len(),
        points.len()
    );

    let service = Arc::new(InMemoryService::new(points));
    let mut session = app::with_service(service, args.delay);
    let cancel = app::cancel_on_ctrl_c(session.gate());

    let result = session.load_points().await;
    if app::finish(&mut session, result)?.is_none() {
        cancel.abort();
        return Ok(());
    }

    let result = session.replay_trace(trace, args.algorithm).await;
    cancel.abort();

    if let Some(outcome) = app::finish(&mut session, result)? {
        solve::report(&session, &outcome);
    }

    Ok(())
}
