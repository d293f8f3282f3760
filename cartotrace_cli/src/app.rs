use std::{sync::Arc, time::Duration};

use cartotrace_client::route_service_client::{RouteServiceClient, RouteServiceClientParams};
use cartotrace_core::{
    error::OperationError, map_surface::MapSurface, operation::OperationGate,
    route_service::RouteService, session::Session, trace_replayer::ReplayParams,
};
use tracing::warn;

use crate::{render, terminal_surface::TerminalSurface};

pub struct ServiceArgs {
    pub api_url: String,
    pub timeout: Duration,
}

pub fn connect(
    service: &ServiceArgs,
    step_delay: Duration,
) -> anyhow::Result<Session<RouteServiceClient, TerminalSurface>> {
    let client = RouteServiceClient::new(RouteServiceClientParams {
        base_url: service.api_url.clone(),
        timeout: service.timeout,
    })?;

    Ok(with_service(Arc::new(client), step_delay))
}

/// A session printing every step log entry as soon as it is committed.
pub fn with_service<S: RouteService>(
    service: Arc<S>,
    step_delay: Duration,
) -> Session<S, TerminalSurface> {
    let mut session = Session::new(service, TerminalSurface, ReplayParams { step_delay });
    session.on_step(|log| {
        if let Some(entry) = log.latest() {
            render::print_step(entry);
        }
    });
    session
}

/// Ctrl-C cancels whatever operation is in flight instead of killing the process.
/// Every press cancels, for as long as the task runs.
pub fn cancel_on_ctrl_c(gate: OperationGate) -> tokio::task::JoinHandle<()> {
    cancel_on_signal(gate, tokio::signal::ctrl_c)
}

fn cancel_on_signal<F, Fut>(gate: OperationGate, mut signal: F) -> tokio::task::JoinHandle<()>
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = std::io::Result<()>> + Send,
{
    tokio::spawn(async move {
        while signal().await.is_ok() {
            warn!("Interrupted, cancelling the current operation");
            gate.cancel_current();
        }
    })
}

/// Prints pending alerts; a cancelled operation yields `None` rather than an error.
pub fn finish<S, M, T>(
    session: &mut Session<S, M>,
    result: Result<T, OperationError>,
) -> anyhow::Result<Option<T>>
where
    S: RouteService,
    M: MapSurface,
{
    for alert in session.view_mut().take_alerts() {
        render::print_alert(&alert);
    }

    match result {
        Ok(value) => Ok(Some(value)),
        Err(OperationError::Superseded(_)) => {
            warn!("Operation cancelled");
            Ok(None)
        }
        Err(error) => Err(error.into()),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::Notify;

    use super::*;

    #[tokio::test]
    async fn test_every_signal_cancels() {
        let gate = OperationGate::new();
        let signals = Arc::new(Notify::new());

        let source = Arc::clone(&signals);
        let cancel = cancel_on_signal(gate.clone(), move || {
            let source = Arc::clone(&source);
            async move {
                source.notified().await;
                Ok(())
            }
        });

        // An interrupted first operation must not disarm the handler for the next one
        for _ in 0..2 {
            let token = gate.begin();
            signals.notify_one();
            token.superseded().await;
            assert!(!token.is_current());
        }

        cancel.abort();
    }
}
