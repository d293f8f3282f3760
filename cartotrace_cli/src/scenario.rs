use tracing::info;

use crate::{
    app::{self, ServiceArgs},
    render,
};

pub async fn run(id: u32, service: &ServiceArgs) -> anyhow::Result<()> {
    let mut session = app::connect(service, std::time::Duration::ZERO)?;

    let result = session.switch_scenario(id).await;
    if let Some(points) = app::finish(&mut session, result)? {
        info!("Scenario {} is active with {} points", id, points.len());
        render::print_points(session.sidebar());
    }

    Ok(())
}

pub async fn reset(service: &ServiceArgs) -> anyhow::Result<()> {
    let mut session = app::connect(service, std::time::Duration::ZERO)?;

    let result = session.reset().await;
    if app::finish(&mut session, result)?.is_some() {
        render::print_points(session.sidebar());
    }

    Ok(())
}
