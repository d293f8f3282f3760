use crate::{
    app::{self, ServiceArgs},
    render,
};

pub async fn run(service: &ServiceArgs) -> anyhow::Result<()> {
    let mut session = app::connect(service, std::time::Duration::ZERO)?;

    let result = session.compare().await;
    if app::finish(&mut session, result)?.is_some()
        && let Some(view) = &session.view().comparison
    {
        render::print_comparison(view);
    }

    Ok(())
}
